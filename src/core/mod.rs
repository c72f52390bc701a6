// Core modules implementing lazy nodes, scalar extraction, options, and error modeling.
pub mod error;
pub mod node;
pub mod options;
mod scalar;
