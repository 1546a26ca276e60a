//! Tangle algorithm for expanding chunk references.

use std::collections::HashSet;

use crate::config::ResolutionPolicy;
use crate::errors::{Result, TangleError};

use super::chunk::Chunk;
use super::chunk_name::ChunkName;
use super::chunk_table::ChunkTable;
use super::document::Document;
use super::segment::Segment;

/// Cycle detector for preventing infinite recursion during tangling.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    /// Names currently being expanded, outermost first (for error reporting).
    stack: Vec<ChunkName>,
    /// Set for O(1) membership checks.
    seen: HashSet<ChunkName>,
}

impl CycleDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a chunk, failing if it is already on the current path.
    pub fn enter(&mut self, name: &ChunkName) -> Result<()> {
        if self.seen.contains(name) {
            let start = self.stack.iter().position(|n| n == name).unwrap_or(0);
            let mut cycle = self.stack[start..].to_vec();
            cycle.push(name.clone());
            return Err(TangleError::CyclicReference(cycle));
        }
        self.seen.insert(name.clone());
        self.stack.push(name.clone());
        Ok(())
    }

    /// Leaves the innermost chunk.
    pub fn exit(&mut self) {
        if let Some(name) = self.stack.pop() {
            self.seen.remove(&name);
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Resolves reference names to chunks according to a [`ResolutionPolicy`].
///
/// The document and its merged table are passed in explicitly; chunks hold
/// no link back to the document that owns them.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    document: &'a Document,
    table: &'a ChunkTable,
    policy: ResolutionPolicy,
}

impl<'a> Resolver<'a> {
    pub fn new(document: &'a Document, table: &'a ChunkTable, policy: ResolutionPolicy) -> Self {
        Self {
            document,
            table,
            policy,
        }
    }

    /// Looks up the chunk a reference to `name` denotes.
    ///
    /// With [`ResolutionPolicy::Merged`] a code name denotes all of its
    /// definitions; names only defined by doc chunks fall back to the first
    /// such chunk. With [`ResolutionPolicy::FirstDefinition`] the first chunk
    /// of that name in the document is used, whatever its kind.
    pub fn resolve(&self, name: &ChunkName) -> Result<&'a Chunk> {
        let found = match self.policy {
            ResolutionPolicy::Merged => self
                .table
                .get(name)
                .or_else(|| self.document.find_first(name)),
            ResolutionPolicy::FirstDefinition => self.document.find_first(name),
        };
        found.ok_or_else(|| TangleError::UnresolvedReference(name.clone()))
    }
}

/// Renders a chunk to its final text with every reference expanded.
///
/// Each line of a reference's expansion is prefixed by the indents of all
/// enclosing references, outermost first.
pub fn render_chunk(resolver: &Resolver<'_>, chunk: &Chunk) -> Result<String> {
    let mut detector = CycleDetector::new();
    let mut output = String::new();

    detector.enter(&chunk.name)?;
    render_content(resolver, chunk, "", &mut detector, &mut output)?;
    detector.exit();

    Ok(output)
}

/// Resolves `name` and renders it.
pub fn render_named(resolver: &Resolver<'_>, name: &ChunkName) -> Result<String> {
    let chunk = resolver.resolve(name)?;
    render_chunk(resolver, chunk)
}

fn render_content(
    resolver: &Resolver<'_>,
    chunk: &Chunk,
    indent: &str,
    detector: &mut CycleDetector,
    output: &mut String,
) -> Result<()> {
    for segment in &chunk.content {
        match segment {
            Segment::Text(text) => push_indented(output, text, indent),
            Segment::Reference(reference) => {
                let target = resolver.resolve(&reference.name)?;
                detector.enter(&reference.name)?;

                let nested = format!("{}{}", indent, reference.indent);
                tracing::debug!(
                    "Expanding '{}' at {} (depth {})",
                    reference.name,
                    reference.location,
                    detector.depth()
                );

                output.push_str(&reference.indent);
                render_content(resolver, target, &nested, detector, output)?;
                detector.exit();
            }
        }
    }
    Ok(())
}

/// Appends `text`, re-emitting `indent` after every line break.
fn push_indented(output: &mut String, text: &str, indent: &str) {
    if indent.is_empty() {
        output.push_str(text);
        return;
    }
    let mut lines = text.split('\n');
    if let Some(first) = lines.next() {
        output.push_str(first);
    }
    for line in lines {
        output.push('\n');
        output.push_str(indent);
        output.push_str(line);
    }
}
