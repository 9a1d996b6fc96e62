//! Purpose: Shared library crate behind the `jsonprobe` CLI, the C ABI, and tests.
//! Exports: `api` (query facade and handles), `abi` (C bindings), `core` (arena, cursor, lookup).
//! Role: Materializes parsed JSON into host values and answers path lookups without full decoding.
//! Invariants: Parsing goes through the internal `json` boundary only.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod abi;
pub mod api;
pub mod core;
mod json;
