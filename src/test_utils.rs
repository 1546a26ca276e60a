//! Shared test utilities.

use crate::model::{Chunk, ChunkKind, Document};
use crate::readers::parse_document;
use crate::text_location::TextLocation;

/// Creates a code chunk holding a single literal text segment.
pub fn code_chunk(name: &str, text: &str) -> Chunk {
    let chunk = Chunk::new(ChunkKind::Code, name, TextLocation::default());
    if text.is_empty() {
        chunk
    } else {
        chunk.with_text(text)
    }
}

/// Creates a doc chunk holding a single literal text segment.
pub fn doc_chunk(name: &str, text: &str) -> Chunk {
    Chunk::new(ChunkKind::Doc, name, TextLocation::default()).with_text(text)
}

/// Parses a document from source text, panicking on syntax errors.
pub fn parse(input: &str) -> Document {
    parse_document(input, None).unwrap()
}
