//! Chunk representation.

use std::path::PathBuf;

use serde::Serialize;

use super::chunk_name::ChunkName;
use super::properties::Properties;
use super::segment::{push_segment, ChunkRef, Segment};
use crate::text_location::TextLocation;

/// Whether a chunk is prose or tangle-eligible source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    Doc,
    Code,
}

/// A chunk of a literate document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub kind: ChunkKind,
    pub name: ChunkName,
    /// Options from the header's property list.
    pub options: Properties,
    /// Literal text and references, in source order.
    pub content: Vec<Segment>,
    /// Location of the opening directive (or of the wrapped token).
    pub location: TextLocation,
}

impl Chunk {
    pub fn new(kind: ChunkKind, name: impl Into<ChunkName>, location: TextLocation) -> Self {
        Self {
            kind,
            name: name.into(),
            options: Properties::new(),
            content: Vec::new(),
            location,
        }
    }

    /// Creates an anonymous single-segment doc chunk for loose top-level input.
    pub fn wrapper(segment: Segment, location: TextLocation) -> Self {
        Self {
            kind: ChunkKind::Doc,
            name: ChunkName::anonymous(),
            options: Properties::new(),
            content: vec![segment],
            location,
        }
    }

    pub fn with_options(mut self, options: Properties) -> Self {
        self.options = options;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push(Segment::Text(text.into()));
        self
    }

    pub fn with_reference(mut self, name: impl Into<ChunkName>, indent: impl Into<String>) -> Self {
        self.push(Segment::reference(name, indent));
        self
    }

    /// Appends a segment to the content.
    pub fn push(&mut self, segment: Segment) {
        push_segment(&mut self.content, segment);
    }

    pub fn is_code(&self) -> bool {
        self.kind == ChunkKind::Code
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_anonymous()
    }

    /// Returns the `out` path, if this is a terminal chunk.
    pub fn out_path(&self) -> Option<PathBuf> {
        self.options.out()
    }

    pub fn is_terminal(&self) -> bool {
        self.out_path().is_some()
    }

    /// Returns the references in this chunk, in order.
    pub fn references(&self) -> impl Iterator<Item = &ChunkRef> {
        self.content.iter().filter_map(Segment::as_reference)
    }

    /// Returns a new chunk holding this chunk's content followed by `later`'s,
    /// with `later`'s options overlaid on this chunk's.
    ///
    /// A body ends before the line break of its `@end` line, so one line
    /// break is put back between two non-empty bodies.
    pub fn merged_with(&self, later: &Chunk) -> Chunk {
        let mut merged = self.clone();
        if !merged.content.is_empty() && !later.content.is_empty() {
            merged.push(Segment::text("\n"));
        }
        for segment in &later.content {
            merged.push(segment.clone());
        }
        merged.options.overlay(&later.options);
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_chunk() {
        let chunk = Chunk::new(ChunkKind::Code, "main", TextLocation::line_only(4))
            .with_text("print('hello')");

        assert!(chunk.is_code());
        assert_eq!(chunk.name.as_str(), "main");
        assert_eq!(chunk.content, vec![Segment::text("print('hello')")]);
        assert_eq!(chunk.location.line, 4);
    }

    #[test]
    fn test_wrapper_is_anonymous_doc() {
        let chunk = Chunk::wrapper(Segment::text("\n"), TextLocation::default());
        assert_eq!(chunk.kind, ChunkKind::Doc);
        assert!(chunk.is_anonymous());
    }

    #[test]
    fn test_terminal() {
        let chunk = Chunk::new(ChunkKind::Code, "main", TextLocation::default())
            .with_options(Properties::new().with("out", "main.py"));
        assert!(chunk.is_terminal());
        assert_eq!(chunk.out_path(), Some(PathBuf::from("main.py")));
    }

    #[test]
    fn test_merged_with() {
        let a = Chunk::new(ChunkKind::Code, "x", TextLocation::default())
            .with_text("a")
            .with_options(Properties::new().with("out", "a.py").with("lang", "py"));
        let b = Chunk::new(ChunkKind::Code, "x", TextLocation::default())
            .with_reference("y", "  ")
            .with_options(Properties::new().with("out", "b.py"));

        let merged = a.merged_with(&b);
        assert_eq!(
            merged.content,
            vec![Segment::text("a\n"), Segment::reference("y", "  ")]
        );
        assert_eq!(merged.options.get("out"), Some("b.py"));
        assert_eq!(merged.options.get("lang"), Some("py"));
        // the originals are untouched
        assert_eq!(a.content.len(), 1);
    }

    #[test]
    fn test_merged_with_empty_body_adds_no_line() {
        let a = Chunk::new(ChunkKind::Code, "x", TextLocation::default()).with_text("a");
        let empty = Chunk::new(ChunkKind::Code, "x", TextLocation::default());

        assert_eq!(a.merged_with(&empty).content, vec![Segment::text("a")]);
        assert_eq!(empty.merged_with(&a).content, vec![Segment::text("a")]);
    }

    #[test]
    fn test_references() {
        let chunk = Chunk::new(ChunkKind::Code, "main", TextLocation::default())
            .with_reference("a", "")
            .with_text("\n")
            .with_reference("b", "    ");
        let names: Vec<_> = chunk.references().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
