//! The tangle pipeline: document in, transaction out.

use std::fs;
use std::path::Path;

use crate::errors::{Result, TangleError};
use crate::interface::Context;
use crate::io::{Transaction, WriteFile};
use crate::model::{select_outputs, ChunkName, Document, OutputTarget, Resolver};
use crate::readers::parse_document;

/// Renders the selected outputs of `doc` into a transaction.
///
/// Nothing is written here. Every output is rendered first, so a failure in
/// any of them yields an error and no transaction.
pub fn tangle_document(
    ctx: &Context,
    doc: &Document,
    requested: &[ChunkName],
) -> Result<Transaction> {
    let table = doc.build_outputs();
    let resolver = Resolver::new(doc, &table, ctx.config.resolution);
    let root = ChunkName::new(ctx.config.root_chunk.as_str());

    let outputs = select_outputs(&resolver, &table, requested, &root)?;

    let mut transaction = Transaction::new();
    for output in outputs {
        let content = ctx.config.finish_output(output.content);
        match output.target {
            OutputTarget::File(path) => {
                let path = ctx.resolve_output_path(&path);
                tracing::debug!("Tangled '{}' for {}", output.name, path.display());
                transaction.write(
                    WriteFile::new(output.name, path, content)
                        .with_create_dirs(ctx.config.create_dirs),
                );
            }
            OutputTarget::Stdout => {
                tracing::debug!("Tangled '{}' for stdout", output.name);
                transaction.print(output.name, content);
            }
        }
    }

    tracing::info!("Prepared {} output(s)", transaction.len());
    Ok(transaction)
}

/// Parses `input` and tangles it.
pub fn tangle_source(
    ctx: &Context,
    input: &str,
    source_path: Option<&Path>,
    requested: &[ChunkName],
) -> Result<Transaction> {
    let doc = parse_document(input, source_path)?;
    tangle_document(ctx, &doc, requested)
}

/// Reads, parses and tangles a source file, resolved against the base dir.
pub fn tangle_file(ctx: &Context, path: &Path, requested: &[ChunkName]) -> Result<Transaction> {
    let resolved = ctx.resolve_path(path);
    let input = fs::read_to_string(&resolved).map_err(|e| {
        TangleError::Other(format!("cannot read {}: {}", resolved.display(), e))
    })?;
    tracing::info!("Tangling {}", resolved.display());
    tangle_source(ctx, &input, Some(path), requested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ResolutionPolicy};
    use pretty_assertions::assert_eq;
    use std::io;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const PROGRAM: &str = "\
Some prose.
@code main [out=hello.py]
def main():
    @<body>
@end
@code body
print(\"hi\")
return 0
@end
";

    #[test]
    fn test_tangle_writes_terminal_chunk() {
        let dir = tempdir().unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());

        let transaction = tangle_source(&ctx, PROGRAM, None, &[]).unwrap();
        assert_eq!(transaction.len(), 1);
        transaction.execute(&mut io::sink()).unwrap();

        let written = fs::read_to_string(dir.path().join("hello.py")).unwrap();
        assert_eq!(written, "def main():\n    print(\"hi\")\n    return 0\n");
    }

    #[test]
    fn test_tangle_requested_chunk_prints() {
        let dir = tempdir().unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());

        let transaction =
            tangle_source(&ctx, PROGRAM, None, &[ChunkName::new("body")]).unwrap();
        let mut out = Vec::new();
        transaction.execute(&mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "print(\"hi\")\nreturn 0\n");
        assert!(!dir.path().join("hello.py").exists());
    }

    #[test]
    fn test_tangle_honors_output_dir_and_trailing_newline() {
        let dir = tempdir().unwrap();
        let config = Config {
            output_dir: Some(PathBuf::from("gen")),
            trailing_newline: false,
            ..Config::default()
        };
        let ctx = Context::new(config, dir.path().to_path_buf());

        tangle_source(&ctx, PROGRAM, None, &[])
            .unwrap()
            .execute(&mut io::sink())
            .unwrap();

        let written = fs::read_to_string(dir.path().join("gen/hello.py")).unwrap();
        assert_eq!(written, "def main():\n    print(\"hi\")\n    return 0");
    }

    #[test]
    fn test_tangle_custom_root_chunk() {
        let dir = tempdir().unwrap();
        let config = Config {
            root_chunk: "body".to_string(),
            ..Config::default()
        };
        let ctx = Context::new(config, dir.path().to_path_buf());

        let transaction = tangle_source(&ctx, PROGRAM, None, &[]).unwrap();
        assert_eq!(transaction.describe(), vec!["print 'body' to stdout"]);
    }

    #[test]
    fn test_tangle_first_definition_policy() {
        let source = "\
@code *
@<x>
@end
@code x
one
@end
@code x
two
@end
";
        let dir = tempdir().unwrap();
        let merged = Context::default_for_dir(dir.path().to_path_buf());
        let first = Context::new(
            Config {
                resolution: ResolutionPolicy::FirstDefinition,
                ..Config::default()
            },
            dir.path().to_path_buf(),
        );

        let render = |ctx: &Context| {
            let transaction = tangle_source(ctx, source, None, &[]).unwrap();
            let mut out = Vec::new();
            transaction.execute(&mut out).unwrap();
            String::from_utf8(out).unwrap()
        };

        assert_eq!(render(&merged), "one\ntwo\n");
        assert_eq!(render(&first), "one\n");
    }

    #[test]
    fn test_tangle_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());
        let source = "@code a [out=a.txt]\nok\n@end\n@code b [out=b.txt]\n@<a>\n@<b>\n@end\n";

        let result = tangle_source(&ctx, source, None, &[]);
        assert!(matches!(result, Err(TangleError::CyclicReference(_))));
        assert!(!dir.path().join("a.txt").exists());
    }

    #[test]
    fn test_tangle_file_reads_relative_to_base_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("prog.lit"), PROGRAM).unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());

        let transaction = tangle_file(&ctx, Path::new("prog.lit"), &[]).unwrap();
        assert_eq!(transaction.len(), 1);
    }

    #[test]
    fn test_tangle_file_syntax_error_names_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.lit"), "@code x\nunterminated\n").unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());

        let err = tangle_file(&ctx, Path::new("bad.lit"), &[]).unwrap_err();
        assert!(matches!(err, TangleError::Syntax { .. }));
        assert!(err.to_string().contains("bad.lit"));
    }

    #[test]
    fn test_tangle_file_missing() {
        let dir = tempdir().unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());
        assert!(tangle_file(&ctx, Path::new("nope.lit"), &[]).is_err());
    }
}
