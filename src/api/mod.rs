//! Purpose: Define the stable public Rust API boundary for lazyjson.
//! Exports: Node, classification shape, construction options, and error types.
//! Role: Public, additive-only surface; hides the decoder seam.
//! Invariants: The serde_json span representation never appears in public signatures.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::node::{Node, Shape};
pub use crate::core::options::Options;
