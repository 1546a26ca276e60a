//! Core model types: chunks, documents, the merged table and the tangle engine.

mod chunk;
mod chunk_name;
mod chunk_table;
mod document;
mod properties;
mod segment;
mod select;
mod tangle;

pub use chunk::{Chunk, ChunkKind};
pub use chunk_name::{ChunkName, ROOT_CHUNK};
pub use chunk_table::ChunkTable;
pub use document::Document;
pub use properties::{Properties, OUT_KEY};
pub use segment::{ChunkRef, Segment};
pub use select::{select_chunks, select_outputs, OutputTarget, SelectionRule, TangledOutput};
pub use tangle::{render_chunk, render_named, CycleDetector, Resolver};
