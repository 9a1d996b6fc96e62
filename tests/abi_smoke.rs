//! Purpose: Smoke-test the C ABI surface from Rust.
//! Exports: Integration tests only.
//! Role: Exercise return codes, buffer ownership, and error structs the way a C host would.
//! Invariants: Every buffer and error handed out is released through the matching free function.

use std::ffi::CString;
use std::ptr;

use jsonprobe::abi::{
    jprobe_buf, jprobe_buf_free, jprobe_error, jprobe_error_free, jprobe_handle,
    jprobe_handle_free, jprobe_handle_key_exists, jprobe_handle_lookup, jprobe_handle_open,
    jprobe_is_valid, jprobe_key_exists, jprobe_lookup, jprobe_parse,
};

fn take_json(buf: &mut jprobe_buf) -> serde_json::Value {
    let value = serde_json::from_slice(buf.as_slice()).expect("json buffer");
    jprobe_buf_free(buf);
    value
}

#[test]
fn validity_probe() {
    let good = br#"{"a":1}"#;
    let bad = b"{a:1}";
    assert_eq!(jprobe_is_valid(good.as_ptr(), good.len()), 1);
    assert_eq!(jprobe_is_valid(bad.as_ptr(), bad.len()), 0);
    assert_eq!(jprobe_is_valid(ptr::null(), 0), 0);
}

#[test]
fn parse_writes_json_buffer() {
    let input = br#"{"b":[1,2.5,"s"],"a":null}"#;
    let mut buf = jprobe_buf::empty();
    let mut err: *mut jprobe_error = ptr::null_mut();
    let rc = jprobe_parse(input.as_ptr(), input.len(), 1, 0, &mut buf, &mut err);
    assert_eq!(rc, 0);
    assert!(err.is_null());
    assert_eq!(buf.as_slice(), br#"{"b":[1,2.5,"s"],"a":null}"#);
    jprobe_buf_free(&mut buf);
    assert!(buf.as_slice().is_empty());
}

#[test]
fn parse_failure_fills_error() {
    let input = b"[1,";
    let mut buf = jprobe_buf::empty();
    let mut err: *mut jprobe_error = ptr::null_mut();
    let rc = jprobe_parse(input.as_ptr(), input.len(), 0, 0, &mut buf, &mut err);
    assert_eq!(rc, -1);
    assert!(!err.is_null());
    assert_eq!(unsafe { &*err }.kind(), 4);
    jprobe_error_free(err);
}

#[test]
fn invalid_policy_is_usage_error() {
    let input = b"[]";
    let mut buf = jprobe_buf::empty();
    let mut err: *mut jprobe_error = ptr::null_mut();
    let rc = jprobe_parse(input.as_ptr(), input.len(), 7, 0, &mut buf, &mut err);
    assert_eq!(rc, -1);
    assert_eq!(unsafe { &*err }.kind(), 2);
    jprobe_error_free(err);
}

#[test]
fn single_shot_lookup_and_exists() {
    let input = b"[[1,2],[3,4]]";
    let path = CString::new("1\t0").expect("cstring");
    let absent = CString::new("2").expect("cstring");
    let mut buf = jprobe_buf::empty();
    let mut err: *mut jprobe_error = ptr::null_mut();

    let rc = jprobe_lookup(
        input.as_ptr(),
        input.len(),
        path.as_ptr(),
        0,
        0,
        &mut buf,
        &mut err,
    );
    assert_eq!(rc, 1);
    assert_eq!(take_json(&mut buf), serde_json::json!(3));

    let rc = jprobe_lookup(
        input.as_ptr(),
        input.len(),
        absent.as_ptr(),
        0,
        0,
        &mut buf,
        &mut err,
    );
    assert_eq!(rc, 0);
    assert!(err.is_null());

    assert_eq!(jprobe_key_exists(input.as_ptr(), input.len(), path.as_ptr(), 0), 1);
    assert_eq!(jprobe_key_exists(input.as_ptr(), input.len(), absent.as_ptr(), 0), 2);
    let bad = b"{a:1}";
    assert_eq!(jprobe_key_exists(bad.as_ptr(), bad.len(), path.as_ptr(), 0), 0);
    assert_eq!(jprobe_key_exists(input.as_ptr(), input.len(), ptr::null(), 0), -1);
}

#[test]
fn handle_lifecycle() {
    let input = br#"{"a":{"b":[10,20]}}"#;
    let mut handle: *mut jprobe_handle = ptr::null_mut();
    let mut err: *mut jprobe_error = ptr::null_mut();
    let rc = jprobe_handle_open(input.as_ptr(), input.len(), 0, &mut handle, &mut err);
    assert_eq!(rc, 0);
    assert!(!handle.is_null());

    let path = CString::new("a\tb\t1").expect("cstring");
    let missing = CString::new("a\tc").expect("cstring");
    for _ in 0..2 {
        let mut buf = jprobe_buf::empty();
        let rc = jprobe_handle_lookup(handle, path.as_ptr(), 0, &mut buf, &mut err);
        assert_eq!(rc, 1);
        assert_eq!(take_json(&mut buf), serde_json::json!(20));
        assert_eq!(jprobe_handle_key_exists(handle, missing.as_ptr()), 2);
    }
    assert_eq!(jprobe_handle_key_exists(handle, path.as_ptr()), 1);
    jprobe_handle_free(handle);
}

#[test]
fn handle_open_rejects_deep_input() {
    let input = b"[[[0]]]";
    let mut handle: *mut jprobe_handle = ptr::null_mut();
    let mut err: *mut jprobe_error = ptr::null_mut();
    let rc = jprobe_handle_open(input.as_ptr(), input.len(), 2, &mut handle, &mut err);
    assert_eq!(rc, -1);
    assert!(handle.is_null());
    assert_eq!(unsafe { &*err }.kind(), 4);
    jprobe_error_free(err);
    assert_eq!(jprobe_handle_key_exists(ptr::null_mut(), ptr::null()), -1);
}

#[test]
fn oversized_depth_request_is_clamped() {
    std::thread::Builder::new()
        .stack_size(8 * 1024 * 1024)
        .spawn(|| {
            let depth = jsonprobe::api::MAX_DEPTH_LIMIT + 1;
            let input = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
            let mut buf = jprobe_buf::empty();
            let mut err: *mut jprobe_error = ptr::null_mut();
            let rc = jprobe_parse(
                input.as_ptr(),
                input.len(),
                0,
                u32::MAX,
                &mut buf,
                &mut err,
            );
            assert_eq!(rc, -1);
            assert_eq!(unsafe { &*err }.kind(), 4);
            jprobe_error_free(err);
        })
        .expect("spawn")
        .join()
        .expect("join");
}
