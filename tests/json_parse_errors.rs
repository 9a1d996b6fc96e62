//! Purpose: Regression coverage for parse-failure reporting through the public API.
//! Exports: Integration tests only.
//! Role: Verify error kinds and category hints used by CLI and ABI diagnostics.
//! Invariants: Tests avoid payload leakage; assertions target kind/hint text only.

use jsonprobe::api::{ErrorKind, Handle, Policy, parse_to_value};

fn hint_for(input: &[u8], depth: usize) -> String {
    let err = parse_to_value(input, Policy::Dict, depth).expect_err("should fail");
    assert_eq!(err.kind(), ErrorKind::Parse);
    err.hint().expect("hint").to_string()
}

#[test]
fn depth_failures_carry_depth_category() {
    let hint = hint_for(b"[[[[1]]]]", 3);
    assert!(hint.contains("parse category: depth-limit"), "{hint}");
    assert!(hint.contains("context: document"), "{hint}");
}

#[test]
fn syntax_failures_carry_a_category() {
    let hint = hint_for(br#"{"a":}"#, 8);
    assert!(hint.starts_with("parse category: "), "{hint}");
    assert!(!hint.contains("depth-limit"), "{hint}");
}

#[test]
fn parse_errors_keep_their_source() {
    let err = Handle::open(b"[1,,2]", 8).expect_err("invalid");
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(std::error::Error::source(&err).is_some());
}
