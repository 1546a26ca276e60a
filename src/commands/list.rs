//! List command implementation.
//!
//! Shows what a document defines, so that chunk names can be requested by
//! the tangle command.

use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;

use crate::errors::{Result, TangleError};
use crate::interface::Context;
use crate::model::{ChunkName, Document};
use crate::readers::parse_document;

/// Options for the list command.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Source document to inspect.
    pub file: PathBuf,
    /// Emit JSON instead of a table.
    pub json: bool,
}

/// One merged code chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkSummary {
    pub name: ChunkName,
    pub definitions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<PathBuf>,
    pub references: Vec<ChunkName>,
}

/// Everything a document defines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub code: Vec<ChunkSummary>,
    pub doc: Vec<ChunkName>,
}

impl Listing {
    pub fn from_document(doc: &Document) -> Self {
        let table = doc.build_outputs();
        let code = table
            .chunks()
            .map(|chunk| {
                let mut references: Vec<ChunkName> = Vec::new();
                for reference in chunk.references() {
                    if !references.contains(&reference.name) {
                        references.push(reference.name.clone());
                    }
                }
                ChunkSummary {
                    name: chunk.name.clone(),
                    definitions: table.definition_count(&chunk.name),
                    out: chunk.out_path(),
                    references,
                }
            })
            .collect();

        Self {
            code,
            doc: doc.doc_chunk_names().into_iter().cloned().collect(),
        }
    }
}

/// Executes the list command, printing to standard output.
pub fn list(ctx: &Context, options: ListOptions) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    list_to(ctx, options, &mut out)
}

/// Executes the list command, writing the listing to `out`.
pub fn list_to(ctx: &Context, options: ListOptions, out: &mut dyn Write) -> Result<()> {
    let path = ctx.resolve_path(&options.file);
    let input = std::fs::read_to_string(&path)
        .map_err(|e| TangleError::Other(format!("cannot read {}: {}", path.display(), e)))?;
    let doc = parse_document(&input, Some(&options.file))?;
    let listing = Listing::from_document(&doc);

    if options.json {
        serde_json::to_writer_pretty(&mut *out, &listing)?;
        writeln!(out)?;
        return Ok(());
    }

    if listing.code.is_empty() {
        writeln!(out, "No code chunks.")?;
    } else {
        writeln!(out, "Code chunks:")?;
        for summary in &listing.code {
            let mut line = format!("  {}", summary.name);
            if summary.definitions > 1 {
                line.push_str(&format!(" ({} definitions)", summary.definitions));
            }
            if let Some(path) = &summary.out {
                line.push_str(&format!(" -> {}", path.display()));
            }
            writeln!(out, "{}", line)?;
            if !summary.references.is_empty() {
                let names: Vec<&str> = summary.references.iter().map(ChunkName::as_str).collect();
                writeln!(out, "      uses: {}", names.join(", "))?;
            }
        }
    }

    if !listing.doc.is_empty() {
        writeln!(out, "Doc chunks:")?;
        for name in &listing.doc {
            writeln!(out, "  {}", name)?;
        }
    }

    Ok(())
}
