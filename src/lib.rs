//! Purpose: Lazy, path-based access to already-serialized JSON text.
//! Exports: `api` (node, shape, options, errors) re-exported at the crate root.
//! Role: Library backing the `lazyjson` binary and application callers.
//! Invariants: Nodes classify their span on demand and memoize the outcome.
//! Invariants: All decoding goes through the internal `json` seam (serde_json).
pub mod api;
pub mod core;
mod json;

pub use api::{Error, ErrorKind, Node, Options, Result, Shape};
