//! Purpose: Single-shot query operations over raw JSON bytes.
//! Exports: `parse_document`, `parse_to_value`, `lookup`, `key_exists`, `is_valid`, `KeyStatus`.
//! Role: Composes parse + resolve + materialize for callers that query a document once.
//! Invariants: Depth is bounded at parse time; traversal never sees an over-deep document.
//! Invariants: `key_exists` never materializes.

use crate::core::cursor::Cursor;
use crate::core::document::Document;
use crate::core::error::{Error, ErrorKind};
use crate::core::materialize::{Policy, materialize};
use crate::core::path::{Path, resolve};
use crate::core::value::Value;
use crate::json::parse::to_document;

pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Tri-state existence result; codes are stable across the C ABI.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum KeyStatus {
    ParseFailure,
    Exists,
    NotExists,
}

impl KeyStatus {
    pub fn code(self) -> i32 {
        match self {
            KeyStatus::ParseFailure => 0,
            KeyStatus::Exists => 1,
            KeyStatus::NotExists => 2,
        }
    }

    pub fn exists(self) -> bool {
        self == KeyStatus::Exists
    }

    pub(crate) fn from_found(found: bool) -> Self {
        if found {
            KeyStatus::Exists
        } else {
            KeyStatus::NotExists
        }
    }
}

/// Parse once for callers that drive a `Cursor` themselves.
/// `max_depth` above `MAX_DEPTH_LIMIT` is clamped.
pub fn parse_document(input: &[u8], max_depth: usize) -> Result<Document, Error> {
    to_document(input, max_depth)
}

pub fn is_valid(input: &[u8]) -> bool {
    to_document(input, DEFAULT_MAX_DEPTH).is_ok()
}

pub fn parse_to_value(input: &[u8], policy: Policy, max_depth: usize) -> Result<Value, Error> {
    let doc = to_document(input, max_depth)?;
    let mut cursor = Cursor::new(&doc);
    Ok(materialize(&mut cursor, policy))
}

/// `Ok(None)` when the path does not exist in an otherwise valid document.
pub fn lookup(
    input: &[u8],
    path: &Path,
    policy: Policy,
    max_depth: usize,
) -> Result<Option<Value>, Error> {
    let doc = to_document(input, max_depth)?;
    let mut cursor = Cursor::new(&doc);
    if !resolve(&mut cursor, path) {
        return Ok(None);
    }
    Ok(Some(materialize(&mut cursor, policy)))
}

pub fn key_exists(input: &[u8], path: &Path, max_depth: usize) -> KeyStatus {
    let doc = match to_document(input, max_depth) {
        Ok(doc) => doc,
        Err(err) => {
            if err.kind() == ErrorKind::Alloc {
                tracing::error!(error = %err, "key_exists could not parse input");
            }
            return KeyStatus::ParseFailure;
        }
    };
    let mut cursor = Cursor::new(&doc);
    KeyStatus::from_found(resolve(&mut cursor, path))
}
