//! Purpose: Internal JSON decoding boundary used by the lazy node core.
//! Exports: `parse` module with the span-level decode operations.
//! Role: Single seam for the decoder so node code never calls serde_json ad hoc.
//! Invariants: Every decode of source bytes into spans or typed values goes through here.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub(crate) mod parse;
