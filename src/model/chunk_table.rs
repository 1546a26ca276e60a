//! Merged table of code chunks, keyed by name.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::chunk::Chunk;
use super::chunk_name::ChunkName;

/// Code chunks merged by name.
///
/// Every code chunk sharing a name is folded into one entry whose content is
/// the concatenation of all definitions in document order and whose options
/// are overlaid with later definitions winning. Entries keep the order in
/// which each name first appeared.
#[derive(Debug, Clone, Default)]
pub struct ChunkTable {
    /// Merged chunks, in first-occurrence order.
    chunks: IndexMap<ChunkName, Chunk>,

    /// Number of definitions folded into each entry.
    definitions: HashMap<ChunkName, usize>,
}

impl ChunkTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table from chunks in document order. Doc chunks and
    /// anonymous chunks are skipped.
    pub fn from_chunks<'a>(chunks: impl IntoIterator<Item = &'a Chunk>) -> Self {
        chunks
            .into_iter()
            .filter(|chunk| chunk.is_code() && !chunk.is_anonymous())
            .fold(ChunkTable::new(), |table, chunk| table.with_definition(chunk))
    }

    /// Returns the table with one more definition folded in.
    fn with_definition(mut self, chunk: &Chunk) -> Self {
        let merged = match self.chunks.get(&chunk.name) {
            Some(existing) => {
                let conflicts: Vec<_> = existing.options.conflicts(&chunk.options).collect();
                if !conflicts.is_empty() {
                    tracing::warn!(
                        "Chunk '{}' redefined at {} overrides options: {}",
                        chunk.name,
                        chunk.location,
                        conflicts.join(", ")
                    );
                }
                existing.merged_with(chunk)
            }
            None => chunk.clone(),
        };
        *self.definitions.entry(chunk.name.clone()).or_insert(0) += 1;
        self.chunks.insert(chunk.name.clone(), merged);
        self
    }

    pub fn get(&self, name: &ChunkName) -> Option<&Chunk> {
        self.chunks.get(name)
    }

    pub fn contains(&self, name: &ChunkName) -> bool {
        self.chunks.contains_key(name)
    }

    /// Returns the number of definitions merged under `name`.
    pub fn definition_count(&self, name: &ChunkName) -> usize {
        self.definitions.get(name).copied().unwrap_or(0)
    }

    /// Returns merged chunks declaring an `out` path, in first-occurrence order.
    pub fn terminal_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values().filter(|chunk| chunk.is_terminal())
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
