//! Purpose: Lock parser contract expectations with corpus + differential coverage.
//! Exports: Integration tests only (no runtime exports).
//! Role: Catch semantic drift between simd-json-backed documents and a serde_json baseline.
//! Invariants: Differential checks assert parity for documents without duplicate keys.
//! Notes: Duplicate keys intentionally diverge (serde_json keeps one; we keep all).

use jsonprobe::api::{Policy, parse_to_value};
use serde_json::Value;

fn parse_probe(input: &[u8]) -> Result<Value, String> {
    let value = parse_to_value(input, Policy::Dict, 512).map_err(|err| err.to_string())?;
    let text = serde_json::to_string(&value).map_err(|err| err.to_string())?;
    serde_json::from_str(&text).map_err(|err| err.to_string())
}

fn parse_serde_json(input: &[u8]) -> Result<Value, String> {
    serde_json::from_slice::<Value>(input).map_err(|err| err.to_string())
}

fn assert_differential_parity(input: &[u8]) {
    let probe = parse_probe(input);
    let serde = parse_serde_json(input);
    match (probe, serde) {
        (Ok(a), Ok(b)) => assert_eq!(a, b, "parser value mismatch"),
        (Err(_), Err(_)) => {}
        (left, right) => panic!("parser outcome mismatch: probe={left:?}, serde={right:?}"),
    }
}

#[test]
fn corpus_valid_payloads_match_serde() {
    let corpus = [
        br#"{"a":1,"b":"ok"}"#.as_slice(),
        br#"[1,2,3,{"x":true}]"#.as_slice(),
        br#"{"nested":{"arr":[{"k":"v"}]}}"#.as_slice(),
        r#"{"unicode":"☃","esc":"a\"b\\c\n"}"#.as_bytes(),
        br#"[-0.5,1e3,-9223372036854775808,null]"#.as_slice(),
        br#""bare string""#.as_slice(),
    ];

    for case in corpus {
        assert_differential_parity(case);
    }
}

#[test]
fn corpus_malformed_payloads_rejected_by_both() {
    let corpus = [
        b"{a:1}".as_slice(),
        b"[1,2".as_slice(),
        b"".as_slice(),
        br#"{"a" 1}"#.as_slice(),
        b"tru".as_slice(),
    ];
    for case in corpus {
        assert_differential_parity(case);
        assert!(parse_probe(case).is_err());
    }
}

#[test]
fn corpus_malformed_utf8_rejected() {
    let bad_utf8 = [b'"', 0xff, 0xfe, b'"'];
    assert!(parse_probe(&bad_utf8).is_err());
    assert!(parse_serde_json(&bad_utf8).is_err());
}

#[test]
fn corpus_duplicate_keys_are_kept() {
    let input = br#"{"a":1,"a":2}"#;
    let value = parse_to_value(input, Policy::Dict, 8).expect("parse");
    let mapping = value.as_mapping().expect("mapping");
    assert_eq!(mapping.len(), 2);
}

#[test]
fn integer_range_boundaries() {
    use jsonprobe::api::{ErrorKind, Value as ProbeValue};

    let min = parse_to_value(b"-9223372036854775808", Policy::Dict, 8).expect("i64 min");
    assert_eq!(min, ProbeValue::Integer(i64::MIN));
    let max = parse_to_value(b"9223372036854775807", Policy::Dict, 8).expect("i64 max");
    assert_eq!(max, ProbeValue::Integer(i64::MAX));

    let above_i64 = parse_to_value(b"9223372036854775808", Policy::Dict, 8).expect("u64");
    assert_eq!(above_i64, ProbeValue::Double(9_223_372_036_854_775_808.0));
    let u64_max = parse_to_value(b"18446744073709551615", Policy::Dict, 8).expect("u64 max");
    assert_eq!(u64_max, ProbeValue::Double(u64::MAX as f64));

    // Integers outside i64::MIN..=u64::MAX do not parse at all.
    for input in [
        b"[100000000000000000000000000000]".as_slice(),
        b"-9223372036854775809".as_slice(),
    ] {
        let err = parse_to_value(input, Policy::Dict, 8).expect_err("out of range");
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
