//! Deferred output actions, executed only after every output rendered.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::Result;
use crate::model::ChunkName;

/// An output action that can be executed as part of a transaction.
pub trait Action: std::fmt::Debug + Send + Sync {
    /// Executes the action. Printing actions write to `stdout`.
    fn execute(&self, stdout: &mut dyn Write) -> Result<()>;

    /// Returns a description of this action.
    fn describe(&self) -> String;
}

/// Write a chunk's content to a file.
#[derive(Debug)]
pub struct WriteFile {
    pub chunk: ChunkName,
    pub path: PathBuf,
    pub content: String,
    /// Create missing parent directories.
    pub create_dirs: bool,
}

impl WriteFile {
    pub fn new(chunk: ChunkName, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            chunk,
            path: path.into(),
            content: content.into(),
            create_dirs: true,
        }
    }

    pub fn with_create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }
}

impl Action for WriteFile {
    fn execute(&self, _stdout: &mut dyn Write) -> Result<()> {
        if self.create_dirs {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
        }

        atomic_write(&self.path, &self.content)?;
        tracing::info!("Wrote '{}' to {}", self.chunk, self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("write '{}' to {}", self.chunk, self.path.display())
    }
}

/// Print a chunk's content to standard output.
#[derive(Debug)]
pub struct Print {
    pub chunk: ChunkName,
    pub content: String,
}

impl Print {
    pub fn new(chunk: ChunkName, content: impl Into<String>) -> Self {
        Self {
            chunk,
            content: content.into(),
        }
    }
}

impl Action for Print {
    fn execute(&self, stdout: &mut dyn Write) -> Result<()> {
        stdout.write_all(self.content.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("print '{}' to stdout", self.chunk)
    }
}

/// A sequence of output actions, executed one target at a time.
#[derive(Debug, Default)]
pub struct Transaction {
    actions: Vec<Box<dyn Action>>,
}

impl Transaction {
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    pub fn add(&mut self, action: impl Action + 'static) {
        self.actions.push(Box::new(action));
    }

    /// Adds a file write.
    pub fn write(&mut self, action: WriteFile) {
        self.add(action);
    }

    /// Adds a print to standard output.
    pub fn print(&mut self, chunk: ChunkName, content: impl Into<String>) {
        self.add(Print::new(chunk, content));
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns descriptions of all actions.
    pub fn describe(&self) -> Vec<String> {
        self.actions.iter().map(|a| a.describe()).collect()
    }

    /// Executes all actions in order, stopping at the first failure.
    pub fn execute(&self, stdout: &mut dyn Write) -> Result<()> {
        for action in &self.actions {
            action.execute(stdout)?;
        }
        Ok(())
    }
}

/// Counter for unique temp file names within a process.
static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Writes content via a temp file in the same directory, then renames it
/// over the target.
fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let temp_path = parent.join(format!(".tangler-tmp-{}-{}", std::process::id(), counter));

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_write_file_creates_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.txt");

        let action = WriteFile::new(ChunkName::new("main"), &path, "hello\n");
        action.execute(&mut io::sink()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_write_file_without_create_dirs_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing/out.txt");

        let action =
            WriteFile::new(ChunkName::new("main"), &path, "x").with_create_dirs(false);
        assert!(action.execute(&mut io::sink()).is_err());
    }

    #[test]
    fn test_write_file_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old").unwrap();

        WriteFile::new(ChunkName::new("main"), &path, "new")
            .execute(&mut io::sink())
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".tangler-tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_print_writes_to_stdout() {
        let mut out = Vec::new();
        Print::new(ChunkName::new("*"), "a\nb\n")
            .execute(&mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_transaction_describe_and_execute() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");

        let mut transaction = Transaction::new();
        transaction.write(WriteFile::new(ChunkName::new("a"), &path, "A\n"));
        transaction.print(ChunkName::new("b"), "B\n");

        assert_eq!(transaction.len(), 2);
        assert_eq!(
            transaction.describe(),
            vec![
                format!("write 'a' to {}", path.display()),
                "print 'b' to stdout".to_string(),
            ]
        );

        let mut out = Vec::new();
        transaction.execute(&mut out).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "A\n");
        assert_eq!(String::from_utf8(out).unwrap(), "B\n");
    }
}
