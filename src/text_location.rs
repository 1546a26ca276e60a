//! Source positions for syntax errors and chunk origins.

use std::fmt;
use std::path::PathBuf;

/// A position within a source document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextLocation {
    /// The document path, when known.
    pub filename: Option<PathBuf>,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number in characters (1-indexed).
    pub column: usize,
}

impl TextLocation {
    pub fn new(filename: Option<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            filename,
            line,
            column,
        }
    }

    /// Creates a location at the start of a line.
    pub fn line_only(line: usize) -> Self {
        Self {
            filename: None,
            line,
            column: 1,
        }
    }

    /// Advances the position over `text`, counting line breaks.
    pub fn advance(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}

impl Default for TextLocation {
    fn default() -> Self {
        Self {
            filename: None,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filename {
            Some(path) => write!(f, "{}:{}:{}", path.display(), self.line, self.column),
            None => write!(f, "line {}:{}", self.line, self.column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_filename() {
        let loc = TextLocation::new(Some(PathBuf::from("notes.lit")), 10, 5);
        assert_eq!(format!("{}", loc), "notes.lit:10:5");
    }

    #[test]
    fn test_display_without_filename() {
        let loc = TextLocation::new(None, 10, 5);
        assert_eq!(format!("{}", loc), "line 10:5");
    }

    #[test]
    fn test_advance() {
        let mut loc = TextLocation::default();
        loc.advance("ab");
        assert_eq!((loc.line, loc.column), (1, 3));
        loc.advance("\n\nxyz");
        assert_eq!((loc.line, loc.column), (3, 4));
    }
}
