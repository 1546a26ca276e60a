//! Grammar turning a token stream into a [`Document`].
//!
//! ```text
//! document := (chunk | loose-token)*
//! chunk    := ("@doc" | "@code") name properties? LINE-END body "@end" LINE-END?
//! body     := (text | reference)*
//! props    := "[" (key "=" value ("," key "=" value)*)? "]"
//! ```
//!
//! Loose tokens outside any chunk each become an anonymous doc chunk.
//! CRLF line endings are read as LF.

use std::borrow::Cow;
use std::path::Path;

use crate::errors::{Result, TangleError};
use crate::model::{Chunk, ChunkKind, ChunkName, ChunkRef, Document, Properties, Segment};
use crate::text_location::TextLocation;

use super::lexer::{tokenize, Token, TokenKind};

/// Parses a complete document.
pub fn parse_document(input: &str, source_path: Option<&Path>) -> Result<Document> {
    let input = normalize_line_endings(input);
    let tokens = tokenize(&input, source_path)?;

    let mut eof = TextLocation::new(source_path.map(Path::to_path_buf), 1, 1);
    eof.advance(&input);

    let chunks = Parser::new(tokens, eof).parse_chunks()?;
    tracing::debug!("Parsed {} top-level chunks", chunks.len());

    let document = Document::from_chunks(chunks);
    Ok(match source_path {
        Some(path) => document.with_source_path(path),
        None => document,
    })
}

fn normalize_line_endings(input: &str) -> Cow<'_, str> {
    if input.contains("\r\n") {
        Cow::Owned(input.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(input)
    }
}

/// Reads and parses a document from disk.
pub fn read_document_file(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path)?;
    parse_document(&content, Some(path))
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    /// Location just past the last character, for end-of-input errors.
    eof: TextLocation,
}

impl<'a> Parser<'a> {
    fn new(tokens: Vec<Token<'a>>, eof: TextLocation) -> Self {
        Self {
            tokens,
            pos: 0,
            eof,
        }
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Returns true if the token just returned by `next` began a line.
    fn previous_at_line_start(&self) -> bool {
        self.pos < 2 || matches!(self.tokens[self.pos - 2].kind, TokenKind::Newline(_))
    }

    fn parse_chunks(&mut self) -> Result<Vec<Chunk>> {
        let mut chunks = Vec::new();

        while let Some(token) = self.next() {
            let chunk = match token.kind {
                TokenKind::Doc | TokenKind::Code => {
                    if !self.previous_at_line_start() {
                        return Err(TangleError::syntax(
                            token.location,
                            format!("{} must start a line", token.kind.describe()),
                        ));
                    }
                    let kind = if token.kind == TokenKind::Doc {
                        ChunkKind::Doc
                    } else {
                        ChunkKind::Code
                    };
                    self.parse_chunk(kind, token.location)?
                }
                TokenKind::End => {
                    return Err(TangleError::syntax(
                        token.location,
                        "'@end' without an open chunk",
                    ));
                }
                TokenKind::Reference { indent, name } => {
                    let reference = chunk_ref(indent, name, &token.location)?;
                    Chunk::wrapper(Segment::Reference(reference), token.location)
                }
                kind => {
                    let text = kind.literal().unwrap_or_default().into_owned();
                    Chunk::wrapper(Segment::Text(text), token.location)
                }
            };
            chunks.push(chunk);
        }

        Ok(chunks)
    }

    fn parse_chunk(&mut self, kind: ChunkKind, location: TextLocation) -> Result<Chunk> {
        let name = self.parse_chunk_name(&location)?;

        let has_properties = self.peek().is_some_and(|t| t.kind == TokenKind::LBracket);
        let options = if has_properties {
            self.parse_properties()?
        } else {
            Properties::new()
        };

        self.skip_blank_text();
        self.expect_line_end(&name, "chunk header")?;

        let mut chunk = Chunk::new(kind, name, location).with_options(options);
        self.parse_body(&mut chunk)?;
        tracing::debug!(
            "Parsed {:?} chunk '{}' at {} ({} segments)",
            chunk.kind,
            chunk.name,
            chunk.location,
            chunk.content.len()
        );
        Ok(chunk)
    }

    fn parse_chunk_name(&mut self, directive: &TextLocation) -> Result<ChunkName> {
        match self.next() {
            Some(Token {
                kind: TokenKind::Text(text),
                location,
            }) => {
                let name = text.trim();
                if !text.starts_with([' ', '\t']) || name.is_empty() {
                    return Err(TangleError::syntax(
                        location,
                        "expected whitespace and a chunk name after the directive",
                    ));
                }
                Ok(ChunkName::new(name))
            }
            Some(token) => Err(TangleError::syntax(
                token.location,
                format!("expected a chunk name, found {}", token.kind.describe()),
            )),
            None => Err(TangleError::syntax(
                directive.clone(),
                "expected a chunk name, found end of input",
            )),
        }
    }

    fn parse_properties(&mut self) -> Result<Properties> {
        let mut properties = Properties::new();
        self.next(); // '['

        if self.eat(TokenKind::RBracket) {
            return Ok(properties);
        }

        loop {
            let key = match self.next() {
                Some(Token {
                    kind: TokenKind::Text(text),
                    location,
                }) => {
                    let key = text.trim();
                    if key.is_empty() {
                        return Err(TangleError::syntax(location, "empty property key"));
                    }
                    key
                }
                other => return Err(self.unexpected(other, "a property key")),
            };

            if !self.eat(TokenKind::Equals) {
                let found = self.next();
                return Err(self.unexpected(found, &format!("'=' after property key '{}'", key)));
            }

            let value = match self.peek().map(|t| t.kind) {
                Some(TokenKind::Text(text)) => {
                    self.pos += 1;
                    text.trim()
                }
                _ => "",
            };
            properties.insert(key, value);

            match self.next() {
                Some(Token {
                    kind: TokenKind::Comma,
                    ..
                }) => continue,
                Some(Token {
                    kind: TokenKind::RBracket,
                    ..
                }) => break,
                other => return Err(self.unexpected(other, "',' or ']' in property list")),
            }
        }

        Ok(properties)
    }

    fn parse_body(&mut self, chunk: &mut Chunk) -> Result<()> {
        loop {
            let Some(token) = self.next() else {
                return Err(TangleError::syntax(
                    chunk.location.clone(),
                    format!("unterminated chunk '{}': missing '@end'", chunk.name),
                ));
            };

            match token.kind {
                TokenKind::End => {
                    if !self.previous_at_line_start() {
                        return Err(TangleError::syntax(
                            token.location,
                            "'@end' must be alone on its line",
                        ));
                    }
                    self.skip_blank_text();
                    if self.peek().is_some() {
                        self.expect_line_end(&chunk.name, "'@end'")?;
                    }
                    strip_terminator(&mut chunk.content);
                    return Ok(());
                }
                TokenKind::Doc | TokenKind::Code => {
                    return Err(TangleError::syntax(
                        token.location,
                        format!(
                            "{} inside chunk '{}' (missing '@end'?)",
                            token.kind.describe(),
                            chunk.name
                        ),
                    ));
                }
                TokenKind::Reference { indent, name } => {
                    let reference = chunk_ref(indent, name, &token.location)?;
                    chunk.push(Segment::Reference(reference));
                }
                kind => {
                    let text = kind.literal().unwrap_or_default().into_owned();
                    chunk.push(Segment::Text(text));
                }
            }
        }
    }

    /// Consumes the token if it has the given kind.
    fn eat(&mut self, kind: TokenKind<'a>) -> bool {
        if self.peek().is_some_and(|t| t.kind == kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skips a text token made only of whitespace.
    fn skip_blank_text(&mut self) {
        if let Some(TokenKind::Text(text)) = self.peek().map(|t| t.kind) {
            if text.trim().is_empty() {
                self.pos += 1;
            }
        }
    }

    /// Consumes exactly one line break. Any further line breaks of the same
    /// run are left in place as a shorter run.
    fn expect_line_end(&mut self, name: &ChunkName, after: &str) -> Result<()> {
        let Some(token) = self.tokens.get_mut(self.pos) else {
            return Err(TangleError::syntax(
                self.eof.clone(),
                format!("unterminated chunk '{}': missing '@end'", name),
            ));
        };

        match token.kind {
            TokenKind::Newline(1) => {
                self.pos += 1;
                Ok(())
            }
            TokenKind::Newline(n) => {
                token.kind = TokenKind::Newline(n - 1);
                token.location.advance("\n");
                Ok(())
            }
            kind => Err(TangleError::syntax(
                token.location.clone(),
                format!("unexpected {} after {}", kind.describe(), after),
            )),
        }
    }

    fn unexpected(&self, found: Option<Token<'_>>, expected: &str) -> TangleError {
        match found {
            Some(token) => TangleError::syntax(
                token.location,
                format!("expected {}, found {}", expected, token.kind.describe()),
            ),
            None => TangleError::syntax(
                self.eof.clone(),
                format!("expected {}, found end of input", expected),
            ),
        }
    }
}

fn chunk_ref(indent: &str, name: &str, location: &TextLocation) -> Result<ChunkRef> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TangleError::syntax(location.clone(), "empty chunk reference '@<>'"));
    }
    Ok(ChunkRef {
        name: ChunkName::new(name),
        indent: indent.to_string(),
        location: location.clone(),
    })
}

/// Drops the line break that belongs to the `@end` line.
fn strip_terminator(content: &mut Vec<Segment>) {
    if let Some(Segment::Text(text)) = content.last_mut() {
        if text.ends_with('\n') {
            text.pop();
            if text.is_empty() {
                content.pop();
            }
        }
    }
}
