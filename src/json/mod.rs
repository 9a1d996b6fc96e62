//! Purpose: JSON parsing boundary shared by the query facade and the CLI.
//! Exports: `parse` module with document construction and failure classification.
//! Role: Single seam for the parser implementation so callsites never touch simd-json.
//! Invariants: Documents are only built through this module.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub(crate) mod parse;
