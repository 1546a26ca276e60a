//! Command implementations.

pub mod list;
pub mod tangle;

pub use list::{list, list_to, ChunkSummary, ListOptions, Listing};
pub use tangle::{tangle, tangle_to, TangleOptions};
