//! High-level interface for tangle runs.

mod context;
mod tangle;

pub use context::Context;
pub use tangle::{tangle_document, tangle_file, tangle_source};
