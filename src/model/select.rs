//! Output selection: which chunks a run materializes, and where.

use std::fmt;
use std::path::PathBuf;

use crate::errors::{Result, TangleError};

use super::chunk::Chunk;
use super::chunk_name::ChunkName;
use super::chunk_table::ChunkTable;
use super::tangle::{render_chunk, Resolver};

/// Where a rendered chunk goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// The chunk's `out` path, as written in the document.
    File(PathBuf),
    /// Standard output.
    Stdout,
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::File(path) => write!(f, "{}", path.display()),
            OutputTarget::Stdout => write!(f, "<stdout>"),
        }
    }
}

/// A fully rendered output, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TangledOutput {
    pub name: ChunkName,
    pub target: OutputTarget,
    pub content: String,
}

/// Which rule of the selection policy picked the outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRule {
    /// Chunks were requested by name.
    Requested,
    /// The root chunk exists.
    Root,
    /// Every chunk that declares an `out` path.
    Terminals,
}

/// Picks the chunks to emit.
///
/// 1. explicitly requested names, each of which must exist in the table;
/// 2. otherwise the root chunk, if defined;
/// 3. otherwise every terminal chunk, in first-occurrence order;
/// 4. otherwise nothing can be emitted and the run fails.
pub fn select_chunks<'t>(
    table: &'t ChunkTable,
    requested: &[ChunkName],
    root: &ChunkName,
) -> Result<(SelectionRule, Vec<&'t Chunk>)> {
    if !requested.is_empty() {
        let chunks = requested
            .iter()
            .map(|name| {
                table
                    .get(name)
                    .ok_or_else(|| TangleError::MissingRequestedChunk(name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        return Ok((SelectionRule::Requested, chunks));
    }

    if let Some(chunk) = table.get(root) {
        return Ok((SelectionRule::Root, vec![chunk]));
    }

    let terminals: Vec<_> = table.terminal_chunks().collect();
    if terminals.is_empty() {
        return Err(TangleError::NoOutputTarget);
    }
    Ok((SelectionRule::Terminals, terminals))
}

/// Selects and renders every output of a run.
///
/// All outputs are rendered before any is returned, so a failure in any one
/// of them leaves nothing to write.
pub fn select_outputs(
    resolver: &Resolver<'_>,
    table: &ChunkTable,
    requested: &[ChunkName],
    root: &ChunkName,
) -> Result<Vec<TangledOutput>> {
    let (rule, chunks) = select_chunks(table, requested, root)?;
    tracing::debug!("Selected {} chunk(s) by {:?} rule", chunks.len(), rule);

    chunks
        .into_iter()
        .map(|chunk| {
            let content = render_chunk(resolver, chunk)?;
            let target = match chunk.out_path() {
                Some(path) => OutputTarget::File(path),
                None => OutputTarget::Stdout,
            };
            Ok(TangledOutput {
                name: chunk.name.clone(),
                target,
                content,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolutionPolicy;
    use crate::model::{Document, ROOT_CHUNK};
    use crate::test_utils::parse;
    use pretty_assertions::assert_eq;

    const MIXED: &str = "\
@code * [out=all.txt]
@<a>
@<b>
@end
@code a [out=a.txt]
alpha
@end
@code b [out=b.txt]
beta
@end
@code y
why
@end
";

    fn outputs(doc: &Document, requested: &[&str]) -> Result<Vec<TangledOutput>> {
        let table = doc.build_outputs();
        let resolver = Resolver::new(doc, &table, ResolutionPolicy::Merged);
        let requested: Vec<_> = requested.iter().map(|n| ChunkName::new(*n)).collect();
        select_outputs(&resolver, &table, &requested, &ChunkName::new(ROOT_CHUNK))
    }

    #[test]
    fn test_root_wins_over_terminals() {
        let doc = parse(MIXED);
        let result = outputs(&doc, &[]).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name.as_str(), "*");
        assert_eq!(result[0].target, OutputTarget::File(PathBuf::from("all.txt")));
        assert_eq!(result[0].content, "alpha\nbeta");
    }

    #[test]
    fn test_requested_wins_over_root_and_terminals() {
        let doc = parse(MIXED);
        let result = outputs(&doc, &["y"]).unwrap();

        assert_eq!(
            result,
            vec![TangledOutput {
                name: ChunkName::new("y"),
                target: OutputTarget::Stdout,
                content: "why".to_string(),
            }]
        );
    }

    #[test]
    fn test_requested_terminal_goes_to_its_file() {
        let doc = parse(MIXED);
        let result = outputs(&doc, &["b", "a"]).unwrap();
        let targets: Vec<_> = result.iter().map(|o| o.target.to_string()).collect();
        assert_eq!(targets, vec!["b.txt", "a.txt"]);
    }

    #[test]
    fn test_root_without_out_prints() {
        let doc = parse("@code *\nhello\n@end\n");
        let result = outputs(&doc, &[]).unwrap();
        assert_eq!(result[0].target, OutputTarget::Stdout);
        assert_eq!(result[0].content, "hello");
    }

    #[test]
    fn test_terminals_in_first_occurrence_order() {
        let doc = parse(
            "@code z [out=z.txt]\nz1\n@end\n@code m [out=m.txt]\nm\n@end\n@code z\nz2\n@end\n",
        );
        let result = outputs(&doc, &[]).unwrap();

        let names: Vec<_> = result.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["z", "m"]);
        assert_eq!(result[0].content, "z1\nz2");
    }

    #[test]
    fn test_missing_requested_chunk() {
        let doc = parse(MIXED);
        match outputs(&doc, &["a", "nope"]) {
            Err(TangleError::MissingRequestedChunk(name)) => assert_eq!(name.as_str(), "nope"),
            other => panic!("expected MissingRequestedChunk, got {:?}", other),
        }
    }

    #[test]
    fn test_requested_doc_chunk_is_missing() {
        let doc = parse("@doc intro\nprose\n@end\n");
        assert!(matches!(
            outputs(&doc, &["intro"]),
            Err(TangleError::MissingRequestedChunk(_))
        ));
    }

    #[test]
    fn test_empty_document_has_no_target() {
        let doc = parse("");
        assert!(matches!(outputs(&doc, &[]), Err(TangleError::NoOutputTarget)));
    }

    #[test]
    fn test_no_root_no_terminal() {
        let doc = parse("just prose\n@code helper\nx\n@end\n");
        assert!(matches!(outputs(&doc, &[]), Err(TangleError::NoOutputTarget)));
    }

    #[test]
    fn test_unresolved_reference_aborts_all_outputs() {
        let doc = parse("@code a [out=a.txt]\nfine\n@end\n@code b [out=b.txt]\n@<ghost>\n@end\n");
        assert!(matches!(
            outputs(&doc, &[]),
            Err(TangleError::UnresolvedReference(_))
        ));
    }
}
