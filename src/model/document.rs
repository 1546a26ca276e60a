//! Parsed literate documents.

use std::path::{Path, PathBuf};

use super::chunk::{Chunk, ChunkKind};
use super::chunk_name::ChunkName;
use super::chunk_table::ChunkTable;

/// All top-level chunks of one source document, in source order.
///
/// Same-named chunks are kept as separate entries here; merging happens
/// only in [`Document::build_outputs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    chunks: Vec<Chunk>,
    /// Source file path, if loaded from disk.
    pub source_path: Option<PathBuf>,
}

impl Document {
    pub fn from_chunks(chunks: Vec<Chunk>) -> Self {
        Self {
            chunks,
            source_path: None,
        }
    }

    pub fn with_source_path(mut self, path: &Path) -> Self {
        self.source_path = Some(path.to_path_buf());
        self
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Returns the first chunk named `name`, of either kind.
    ///
    /// Anonymous wrapper chunks are never returned.
    pub fn find_first(&self, name: &ChunkName) -> Option<&Chunk> {
        if name.is_anonymous() {
            return None;
        }
        self.chunks.iter().find(|chunk| &chunk.name == name)
    }

    /// Builds the merged table of code chunks used for output selection.
    pub fn build_outputs(&self) -> ChunkTable {
        ChunkTable::from_chunks(&self.chunks)
    }

    /// Returns the names of named doc chunks, without duplicates.
    pub fn doc_chunk_names(&self) -> Vec<&ChunkName> {
        let mut names: Vec<&ChunkName> = Vec::new();
        for chunk in &self.chunks {
            if chunk.kind == ChunkKind::Doc && !chunk.is_anonymous() && !names.contains(&&chunk.name) {
                names.push(&chunk.name);
            }
        }
        names
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
