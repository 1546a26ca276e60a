//! Chunk content segments.

use super::chunk_name::ChunkName;
use crate::text_location::TextLocation;

/// A reference to another chunk, resolved by name at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRef {
    /// The referenced chunk.
    pub name: ChunkName,
    /// Whitespace that preceded the reference marker, copied verbatim.
    pub indent: String,
    /// Where the reference appeared.
    pub location: TextLocation,
}

/// One piece of a chunk's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, emitted as-is.
    Text(String),
    /// A reference to be expanded.
    Reference(ChunkRef),
}

impl Segment {
    pub fn text(s: impl Into<String>) -> Self {
        Segment::Text(s.into())
    }

    pub fn reference(name: impl Into<ChunkName>, indent: impl Into<String>) -> Self {
        Segment::Reference(ChunkRef {
            name: name.into(),
            indent: indent.into(),
            location: TextLocation::default(),
        })
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Segment::Reference(_))
    }

    pub fn as_reference(&self) -> Option<&ChunkRef> {
        match self {
            Segment::Reference(r) => Some(r),
            Segment::Text(_) => None,
        }
    }
}

/// Appends a segment, coalescing adjacent literal text.
pub fn push_segment(content: &mut Vec<Segment>, segment: Segment) {
    if let (Some(Segment::Text(last)), Segment::Text(next)) = (content.last_mut(), &segment) {
        last.push_str(next);
        return;
    }
    content.push(segment);
}
