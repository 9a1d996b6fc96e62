//! Purpose: C ABI bridge for host bindings (libjsonprobe).
//! Exports: C-callable parse/lookup/exists functions, handle lifecycle, buffer/error helpers.
//! Role: Stable ABI surface for non-Rust hosts.
//! Invariants: JSON bytes in/out; opaque handles; explicit free functions.
//! Invariants: Error kinds map 1:1 with core error kinds.
//! Invariants: Paths are TAB-delimited, NUL-terminated UTF-8 strings.
//! Invariants: `max_depth == 0` selects the default; bounds above `MAX_DEPTH_LIMIT` are clamped.
//! Notes: Using one handle from several threads at once is undefined behavior.
#![allow(non_camel_case_types)]

use crate::api::{
    DEFAULT_MAX_DEPTH, Error, ErrorKind, Handle, KeyStatus, Path, Policy, Value, is_valid,
    key_exists, lookup, parse_to_value,
};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

#[repr(C)]
pub struct jprobe_handle {
    handle: Handle,
}

#[repr(C)]
pub struct jprobe_buf {
    data: *mut u8,
    len: usize,
}

#[repr(C)]
pub struct jprobe_error {
    kind: i32,
    message: *mut c_char,
    hint: *mut c_char,
}

/// Returns 1 when the input is valid JSON, 0 otherwise.
#[unsafe(no_mangle)]
pub extern "C" fn jprobe_is_valid(json_bytes: *const u8, json_len: usize) -> i32 {
    match input_slice(json_bytes, json_len) {
        Ok(input) => i32::from(is_valid(input)),
        Err(_) => 0,
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn jprobe_parse(
    json_bytes: *const u8,
    json_len: usize,
    policy: u32,
    max_depth: u32,
    out_value: *mut jprobe_buf,
    out_err: *mut *mut jprobe_error,
) -> i32 {
    let input = match input_slice(json_bytes, json_len) {
        Ok(input) => input,
        Err(err) => return fail(out_err, err),
    };
    let policy = match parse_policy(policy) {
        Ok(policy) => policy,
        Err(err) => return fail(out_err, err),
    };
    let value = match parse_to_value(input, policy, depth_or_default(max_depth)) {
        Ok(value) => value,
        Err(err) => return fail(out_err, err),
    };
    if let Err(err) = write_value_buf(out_value, &value) {
        return fail(out_err, err);
    }
    0
}

/// Returns 1 when found (value written), 0 when the path is absent, -1 on error.
#[unsafe(no_mangle)]
pub extern "C" fn jprobe_lookup(
    json_bytes: *const u8,
    json_len: usize,
    path: *const c_char,
    policy: u32,
    max_depth: u32,
    out_value: *mut jprobe_buf,
    out_err: *mut *mut jprobe_error,
) -> i32 {
    let input = match input_slice(json_bytes, json_len) {
        Ok(input) => input,
        Err(err) => return fail(out_err, err),
    };
    let path = match parse_path(path) {
        Ok(path) => path,
        Err(err) => return fail(out_err, err),
    };
    let policy = match parse_policy(policy) {
        Ok(policy) => policy,
        Err(err) => return fail(out_err, err),
    };
    match lookup(input, &path, policy, depth_or_default(max_depth)) {
        Ok(Some(value)) => emit_found(out_value, out_err, &value),
        Ok(None) => 0,
        Err(err) => fail(out_err, err),
    }
}

/// Returns a `KeyStatus` code (0 parse failure, 1 exists, 2 absent), or -1 on bad arguments.
#[unsafe(no_mangle)]
pub extern "C" fn jprobe_key_exists(
    json_bytes: *const u8,
    json_len: usize,
    path: *const c_char,
    max_depth: u32,
) -> i32 {
    let Ok(input) = input_slice(json_bytes, json_len) else {
        return -1;
    };
    let Ok(path) = parse_path(path) else {
        return -1;
    };
    key_exists(input, &path, depth_or_default(max_depth)).code()
}

#[unsafe(no_mangle)]
pub extern "C" fn jprobe_handle_open(
    json_bytes: *const u8,
    json_len: usize,
    max_depth: u32,
    out_handle: *mut *mut jprobe_handle,
    out_err: *mut *mut jprobe_error,
) -> i32 {
    if out_handle.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("out_handle is null"),
        );
    }
    let input = match input_slice(json_bytes, json_len) {
        Ok(input) => input,
        Err(err) => return fail(out_err, err),
    };
    let handle = match Handle::open(input, depth_or_default(max_depth)) {
        Ok(handle) => handle,
        Err(err) => return fail(out_err, err),
    };
    let handle = Box::new(jprobe_handle { handle });
    unsafe {
        *out_handle = Box::into_raw(handle);
    }
    0
}

/// Same return convention as `jprobe_lookup`.
#[unsafe(no_mangle)]
pub extern "C" fn jprobe_handle_lookup(
    handle: *mut jprobe_handle,
    path: *const c_char,
    policy: u32,
    out_value: *mut jprobe_buf,
    out_err: *mut *mut jprobe_error,
) -> i32 {
    let handle = match borrow_handle(handle, out_err) {
        Ok(handle) => handle,
        Err(code) => return code,
    };
    let path = match parse_path(path) {
        Ok(path) => path,
        Err(err) => return fail(out_err, err),
    };
    let policy = match parse_policy(policy) {
        Ok(policy) => policy,
        Err(err) => return fail(out_err, err),
    };
    match handle.handle.lookup(&path, policy) {
        Some(value) => emit_found(out_value, out_err, &value),
        None => 0,
    }
}

/// Returns 1 when the path exists, 2 when absent, -1 on bad arguments.
#[unsafe(no_mangle)]
pub extern "C" fn jprobe_handle_key_exists(handle: *mut jprobe_handle, path: *const c_char) -> i32 {
    if handle.is_null() {
        return -1;
    }
    let Ok(path) = parse_path(path) else {
        return -1;
    };
    let handle = unsafe { &mut *handle };
    let status: KeyStatus = handle.handle.key_exists(&path);
    status.code()
}

#[unsafe(no_mangle)]
pub extern "C" fn jprobe_handle_free(handle: *mut jprobe_handle) {
    if handle.is_null() {
        return;
    }
    let handle = unsafe { Box::from_raw(handle) };
    handle.handle.close();
}

#[unsafe(no_mangle)]
pub extern "C" fn jprobe_buf_free(buf: *mut jprobe_buf) {
    if buf.is_null() {
        return;
    }
    unsafe {
        let buf = &mut *buf;
        if !buf.data.is_null() && buf.len != 0 {
            drop(Vec::from_raw_parts(buf.data, buf.len, buf.len));
        }
        buf.data = ptr::null_mut();
        buf.len = 0;
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn jprobe_error_free(err: *mut jprobe_error) {
    if err.is_null() {
        return;
    }
    unsafe {
        let err = Box::from_raw(err);
        if !err.message.is_null() {
            drop(CString::from_raw(err.message));
        }
        if !err.hint.is_null() {
            drop(CString::from_raw(err.hint));
        }
    }
}

fn borrow_handle<'a>(
    handle: *mut jprobe_handle,
    out_err: *mut *mut jprobe_error,
) -> Result<&'a mut jprobe_handle, i32> {
    if handle.is_null() {
        return Err(fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("handle is null"),
        ));
    }
    unsafe { Ok(&mut *handle) }
}

fn input_slice<'a>(bytes: *const u8, len: usize) -> Result<&'a [u8], Error> {
    if bytes.is_null() {
        if len == 0 {
            return Ok(&[]);
        }
        return Err(Error::new(ErrorKind::Usage).with_message("json_bytes is null"));
    }
    Ok(unsafe { std::slice::from_raw_parts(bytes, len) })
}

fn parse_path(input: *const c_char) -> Result<Path, Error> {
    if input.is_null() {
        return Err(Error::new(ErrorKind::Usage).with_message("path is null"));
    }
    let raw = unsafe { CStr::from_ptr(input) }
        .to_str()
        .map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message("path is not valid UTF-8")
                .with_source(err)
        })?;
    Ok(Path::parse(raw))
}

fn parse_policy(policy: u32) -> Result<Policy, Error> {
    match policy {
        0 => Ok(Policy::Dict),
        1 => Ok(Policy::Record),
        _ => Err(Error::new(ErrorKind::Usage)
            .with_message("invalid policy")
            .with_hint("Use 0 for dict or 1 for record.")),
    }
}

fn depth_or_default(max_depth: u32) -> usize {
    if max_depth == 0 {
        DEFAULT_MAX_DEPTH
    } else {
        max_depth as usize
    }
}

fn emit_found(out_value: *mut jprobe_buf, out_err: *mut *mut jprobe_error, value: &Value) -> i32 {
    match write_value_buf(out_value, value) {
        Ok(()) => 1,
        Err(err) => fail(out_err, err),
    }
}

fn write_value_buf(out_value: *mut jprobe_buf, value: &Value) -> Result<(), Error> {
    if out_value.is_null() {
        return Err(Error::new(ErrorKind::Usage).with_message("out_value is null"));
    }
    let json_bytes = serde_json::to_vec(value).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to serialize value")
            .with_source(err)
    })?;
    unsafe {
        let buf = &mut *out_value;
        let mut data = json_bytes.into_boxed_slice();
        buf.len = data.len();
        buf.data = data.as_mut_ptr();
        std::mem::forget(data);
    }
    Ok(())
}

fn fail(out_err: *mut *mut jprobe_error, err: Error) -> i32 {
    if out_err.is_null() {
        return -1;
    }
    let error = Box::new(jprobe_error {
        kind: error_kind_code(err.kind()),
        message: to_c_string(err.message().unwrap_or("")),
        hint: err.hint().map(to_c_string).unwrap_or(ptr::null_mut()),
    });
    unsafe {
        *out_err = Box::into_raw(error);
    }
    -1
}

fn to_c_string(input: &str) -> *mut c_char {
    CString::new(input)
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

fn error_kind_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::Parse => 4,
        ErrorKind::Alloc => 5,
        ErrorKind::Io => 8,
    }
}

#[doc(hidden)]
impl jprobe_buf {
    pub fn empty() -> Self {
        Self {
            data: ptr::null_mut(),
            len: 0,
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        if self.data.is_null() {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(self.data, self.len) }
    }
}

#[doc(hidden)]
impl jprobe_error {
    pub fn kind(&self) -> i32 {
        self.kind
    }
}
