//! Tangle command implementation.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::errors::Result;
use crate::interface::{tangle_file, Context};
use crate::model::ChunkName;

/// Options for the tangle command.
#[derive(Debug, Clone, Default)]
pub struct TangleOptions {
    /// Source document to tangle.
    pub file: PathBuf,
    /// Chunks to emit, in order. Empty means the default selection.
    pub chunks: Vec<String>,
    /// Dry run - show what would be done without doing it.
    pub dry_run: bool,
}

/// Executes the tangle command, printing to standard output.
pub fn tangle(ctx: &Context, options: TangleOptions) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    tangle_to(ctx, options, &mut out)
}

/// Executes the tangle command, sending printed chunks and the dry-run
/// report to `out`.
pub fn tangle_to(ctx: &Context, options: TangleOptions, out: &mut dyn Write) -> Result<()> {
    let requested: Vec<ChunkName> = options.chunks.iter().map(ChunkName::new).collect();
    let transaction = tangle_file(ctx, &options.file, &requested)?;

    if options.dry_run {
        writeln!(out, "Would perform {} actions:", transaction.len())?;
        for desc in transaction.describe() {
            writeln!(out, "  {}", desc)?;
        }
        return Ok(());
    }

    transaction.execute(out)?;
    tracing::info!("Tangled {} output(s)", transaction.len());
    Ok(())
}
