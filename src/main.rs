//! Purpose: `jsonprobe` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, runs commands, emits JSON on stdout.
//! Invariants: Commands emit stable stdout formats (compact JSON when piped).
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: Every query goes through `jsonprobe::api` (no direct parser access).
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde_json::{Map, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod color_json;
mod command_dispatch;

use color_json::colorize_value;
use jsonprobe::api::{
    DEFAULT_DELIMITER, DEFAULT_MAX_DEPTH, Error, ErrorKind, Path, Policy, Value, to_exit_code,
};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse_from(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Run `jsonprobe --help` for usage."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    let options = QueryOptions {
        max_depth: cli.depth.unwrap_or(DEFAULT_MAX_DEPTH),
        delimiter: cli.delimiter.unwrap_or_else(|| DEFAULT_DELIMITER.to_string()),
        policy: if cli.record {
            Policy::Record
        } else {
            Policy::Dict
        },
    };

    command_dispatch::dispatch_command(cli.command, &options, color_mode)
        .map_err(add_parse_hint)
        .map_err(|err| (err, color_mode))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "jsonprobe",
    version,
    about = "Path lookups over JSON documents without decoding the whole tree",
    long_about = None,
    after_help = r#"EXAMPLES
  $ jsonprobe valid data.json
  $ jsonprobe parse --record data.json
  $ jsonprobe --delimiter . get data.json users.0.name users.1.name
  $ cat data.json | jsonprobe --delimiter . exists - users.3

NOTES
  - Path segments are TAB-separated unless --delimiter is given
  - A segment indexes arrays or keys objects depending on the node it meets"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Maximum container nesting accepted by the parser (default: 512, capped at 4096)"
    )]
    depth: Option<usize>,
    #[arg(
        long,
        global = true,
        help = "Path segment delimiter (default: TAB)"
    )]
    delimiter: Option<String>,
    #[arg(
        long,
        global = true,
        help = "Materialize objects as records instead of dicts"
    )]
    record: bool,
    #[arg(
        long,
        global = true,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics and pretty JSON output: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

struct QueryOptions {
    max_depth: usize,
    delimiter: String,
    policy: Policy,
}

impl QueryOptions {
    fn path(&self, expr: &str) -> Path {
        Path::split(expr, &self.delimiter)
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Check whether input is valid JSON")]
    Valid {
        #[arg(help = "Input file, or - for stdin", value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },
    #[command(about = "Materialize the whole document")]
    Parse {
        #[arg(help = "Input file, or - for stdin", value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },
    #[command(
        about = "Print the value at each path",
        long_about = r#"Parse the input once and print the value found at each PATH, one per line.

Fails with exit code 3 at the first path that does not exist."#
    )]
    Get {
        #[arg(help = "Input file, or - for stdin", value_hint = ValueHint::FilePath)]
        input: PathBuf,
        #[arg(required = true, help = "Path expressions")]
        paths: Vec<String>,
    },
    #[command(about = "Report whether each path exists")]
    Exists {
        #[arg(help = "Input file, or - for stdin", value_hint = ValueHint::FilePath)]
        input: PathBuf,
        #[arg(required = true, help = "Path expressions")]
        paths: Vec<String>,
    },
    #[command(
        arg_required_else_help = true,
        about = "Generate shell completions",
        after_help = r#"EXAMPLES
  $ jsonprobe completion bash > ~/.local/share/bash-completion/completions/jsonprobe
  $ jsonprobe completion fish > ~/.config/fish/completions/jsonprobe.fish"#
    )]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

fn read_input(input: &std::path::Path) -> Result<Vec<u8>, Error> {
    if input.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read stdin")
                .with_source(err)
        })?;
        return Ok(buf);
    }
    std::fs::read(input).map_err(|err| {
        let kind = if err.kind() == io::ErrorKind::NotFound {
            ErrorKind::NotFound
        } else {
            ErrorKind::Io
        };
        Error::new(kind)
            .with_message("failed to read input")
            .with_path(input)
            .with_source(err)
    })
}

fn add_parse_hint(err: Error) -> Error {
    if err.kind() == ErrorKind::Parse && err.hint().is_none() {
        return err.with_hint("Check the input is well-formed JSON, or raise --depth.");
    }
    err
}

fn clap_error_summary(err: &clap::Error) -> String {
    let text = err.to_string();
    text.lines()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.trim_start_matches("error: ").trim().to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}

fn emit_value(value: &Value, color_mode: ColorMode) {
    let is_tty = io::stdout().is_terminal();
    let use_color = color_mode.use_color(is_tty);
    let pretty = is_tty || use_color;
    let json = if pretty {
        colorize_value(value, use_color)
    } else {
        serde_json::to_string(value)
            .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string())
    };
    println!("{json}");
}

fn emit_json(value: serde_json::Value) {
    let json = serde_json::to_string(&value)
        .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\x1b[{code}m{label}\x1b[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::Parse => "invalid json".to_string(),
        ErrorKind::Alloc => "allocation failed".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> serde_json::Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    if let Some(segment) = err.segment() {
        inner.insert("segment".to_string(), json!(segment));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), serde_json::Value::Object(inner));
    serde_json::Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));
    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }
    if let Some(segment) = err.segment() {
        lines.push(format!(
            "{} {segment}",
            colorize_label("segment:", use_color, AnsiColor::Yellow)
        ));
    }
    for cause in error_causes(err) {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, QueryOptions, error_json, error_text};
    use jsonprobe::api::Policy;

    #[test]
    fn error_json_carries_hint_and_segment() {
        let err = Error::new(ErrorKind::NotFound)
            .with_message("path not found")
            .with_hint("segment 1: array index out of range")
            .with_segment(1);
        let value = error_json(&err);
        assert_eq!(value["error"]["kind"], "NotFound");
        assert_eq!(value["error"]["segment"], 1);
        assert_eq!(value["error"]["hint"], "segment 1: array index out of range");
    }

    #[test]
    fn error_text_without_color_has_no_escapes() {
        let err = Error::new(ErrorKind::Parse).with_hint("parse category: syntax");
        let text = error_text(&err, false);
        assert!(text.starts_with("error: invalid json"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn options_split_on_configured_delimiter() {
        let options = QueryOptions {
            max_depth: 8,
            delimiter: ".".to_string(),
            policy: Policy::Dict,
        };
        assert_eq!(options.path("a.0.b").segments(), ["a", "0", "b"]);
    }
}
