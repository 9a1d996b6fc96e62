//! Purpose: Hold top-level CLI command dispatch for `jsonprobe`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: `get` and `exists` parse the input once and reuse one handle for all paths.
//! Invariants: Output envelopes and exit code semantics stay stable.

use super::*;
use clap::CommandFactory;
use jsonprobe::api::{Handle, parse_document, parse_to_value};

pub(super) fn dispatch_command(
    command: Command,
    options: &QueryOptions,
    color_mode: ColorMode,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "jsonprobe", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Valid { input } => {
            let bytes = read_input(&input)?;
            let valid = parse_document(&bytes, options.max_depth).is_ok();
            emit_json(json!({ "valid": valid }));
            let exit_code = if valid {
                0
            } else {
                to_exit_code(ErrorKind::Parse)
            };
            Ok(RunOutcome::with_code(exit_code))
        }
        Command::Parse { input } => {
            let bytes = read_input(&input)?;
            let value = parse_to_value(&bytes, options.policy, options.max_depth)
                .map_err(|err| err.with_path(&input))?;
            emit_value(&value, color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Get { input, paths } => {
            let bytes = read_input(&input)?;
            let mut handle =
                Handle::open(&bytes, options.max_depth).map_err(|err| err.with_path(&input))?;
            for expr in &paths {
                let path = options.path(expr);
                let value = handle.locate(&path, options.policy).map_err(|miss| {
                    Error::new(ErrorKind::NotFound)
                        .with_message(format!("path not found: {path}"))
                        .with_hint(miss.to_string())
                        .with_segment(miss.segment)
                })?;
                emit_value(&value, color_mode);
            }
            handle.close();
            Ok(RunOutcome::ok())
        }
        Command::Exists { input, paths } => {
            let bytes = read_input(&input)?;
            let mut handle =
                Handle::open(&bytes, options.max_depth).map_err(|err| err.with_path(&input))?;
            for expr in &paths {
                let status = handle.key_exists(&options.path(expr));
                emit_json(json!({ "path": expr, "exists": status.exists() }));
            }
            handle.close();
            Ok(RunOutcome::ok())
        }
    }
}
