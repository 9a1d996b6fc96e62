//! Purpose: Define the stable public Rust API boundary for jsonprobe.
//! Exports: Query operations, `Handle`, and the value/path/policy types they use.
//! Role: Public, additive-only surface consumed by the CLI, the C ABI, and host bindings.
//! Invariants: Every entry point reports failure as a value, never by panicking.
//! Invariants: Parsing internals stay private behind this module.

mod handle;
mod query;

pub use crate::core::cursor::Cursor;
pub use crate::core::document::{Document, MAX_DEPTH_LIMIT, NodeId, NodeType};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::materialize::{Policy, ValueBuilder, materialize, materialize_with};
pub use crate::core::path::{DEFAULT_DELIMITER, Miss, MissReason, Path, locate, resolve};
pub use crate::core::value::{Mapping, MappingKind, Value};
pub use handle::Handle;
pub use query::{
    DEFAULT_MAX_DEPTH, KeyStatus, is_valid, key_exists, lookup, parse_document, parse_to_value,
};
