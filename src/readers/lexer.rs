//! Tokenizer for literate source documents.
//!
//! The token set is small: the `@doc`/`@code`/`@end` directives, the
//! property-list punctuation `[ ] = ,`, chunk references `@<name>` (with
//! the horizontal whitespace around them), the `@@` escape, newline runs and
//! everything else as literal text. Tokens borrow their lexeme from the input.

use std::borrow::Cow;
use std::path::Path;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_while1},
    character::complete::{char, space0},
    combinator::{eof, map, peek, success, value},
    sequence::terminated,
    IResult, Parser,
};

use crate::errors::{Result, TangleError};
use crate::text_location::TextLocation;

/// The kind of a token, borrowing from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// `@doc`
    Doc,
    /// `@code`
    Code,
    /// `@end`
    End,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `=`
    Equals,
    /// `,`
    Comma,
    /// `@<name>`, with the whitespace that preceded it.
    Reference { indent: &'a str, name: &'a str },
    /// `@@`
    EscapedAt,
    /// A run of ordinary characters.
    Text(&'a str),
    /// A run of line breaks.
    Newline(usize),
}

impl<'a> TokenKind<'a> {
    /// Returns the literal text this token stands for, or `None` for
    /// directives and references.
    pub fn literal(&self) -> Option<Cow<'a, str>> {
        match *self {
            TokenKind::Text(s) => Some(Cow::Borrowed(s)),
            TokenKind::EscapedAt => Some(Cow::Borrowed("@")),
            TokenKind::LBracket => Some(Cow::Borrowed("[")),
            TokenKind::RBracket => Some(Cow::Borrowed("]")),
            TokenKind::Equals => Some(Cow::Borrowed("=")),
            TokenKind::Comma => Some(Cow::Borrowed(",")),
            TokenKind::Newline(n) => Some(Cow::Owned("\n".repeat(n))),
            TokenKind::Doc | TokenKind::Code | TokenKind::End | TokenKind::Reference { .. } => None,
        }
    }

    /// Short human-readable description, for error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Doc => "'@doc'".to_string(),
            TokenKind::Code => "'@code'".to_string(),
            TokenKind::End => "'@end'".to_string(),
            TokenKind::Reference { name, .. } => format!("reference '@<{}>'", name),
            TokenKind::Newline(_) => "line break".to_string(),
            TokenKind::Text(s) => format!("text '{}'", s.trim()),
            other => format!("'{}'", other.literal().unwrap_or_default()),
        }
    }
}

/// A token with the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub location: TextLocation,
}

fn escaped_at(input: &str) -> IResult<&str, TokenKind<'_>> {
    value(TokenKind::EscapedAt, tag("@@")).parse(input)
}

fn directive(input: &str) -> IResult<&str, TokenKind<'_>> {
    alt((
        value(TokenKind::Code, tag("@code")),
        value(TokenKind::Doc, tag("@doc")),
        value(TokenKind::End, tag("@end")),
    ))
    .parse(input)
}

/// Blanks after a reference, consumed only when they run to the end of
/// the line.
fn trailing_blanks(input: &str) -> IResult<&str, &str> {
    alt((terminated(space0, peek(alt((tag("\n"), eof)))), success(""))).parse(input)
}

/// Parse a reference: `[ \t]*@<name>`, plus blanks up to the line end.
fn reference(input: &str) -> IResult<&str, TokenKind<'_>> {
    map(
        (
            space0,
            tag("@<"),
            take_till(|c: char| c == '>' || c == ']' || c == '\n'),
            char('>'),
            trailing_blanks,
        ),
        |(indent, _, name, _, _)| TokenKind::Reference { indent, name },
    )
    .parse(input)
}

fn punctuation(input: &str) -> IResult<&str, TokenKind<'_>> {
    alt((
        value(TokenKind::LBracket, char('[')),
        value(TokenKind::RBracket, char(']')),
        value(TokenKind::Equals, char('=')),
        value(TokenKind::Comma, char(',')),
    ))
    .parse(input)
}

fn newlines(input: &str) -> IResult<&str, TokenKind<'_>> {
    map(take_while1(|c: char| c == '\n'), |s: &str| TokenKind::Newline(s.len())).parse(input)
}

fn is_text_char(c: char) -> bool {
    !matches!(c, '@' | '[' | ']' | '=' | ',' | '\n')
}

fn text(input: &str) -> IResult<&str, TokenKind<'_>> {
    map(take_while1(is_text_char), TokenKind::Text).parse(input)
}

/// Parse one token. References are tried before text so that a run of
/// whitespace directly in front of `@<` becomes the reference's indent.
fn token(input: &str) -> IResult<&str, TokenKind<'_>> {
    alt((escaped_at, directive, reference, punctuation, newlines, text)).parse(input)
}

/// Splits `input` into tokens.
///
/// Fails with a syntax error on a `@` that starts no known construct, such as
/// an unterminated `@<name` or a lone `@`.
pub fn tokenize<'a>(input: &'a str, filename: Option<&Path>) -> Result<Vec<Token<'a>>> {
    let mut tokens = Vec::new();
    let mut location = TextLocation::new(filename.map(Path::to_path_buf), 1, 1);
    let mut rest = input;

    while !rest.is_empty() {
        let Ok((remaining, kind)) = token(rest) else {
            return Err(lex_error(rest, location));
        };
        let consumed = &rest[..rest.len() - remaining.len()];
        let at_line_start = tokens
            .last()
            .map_or(true, |t: &Token<'_>| matches!(t.kind, TokenKind::Newline(_)));

        match kind {
            // Only a reference that starts its line has an indent.
            TokenKind::Reference { indent, name } if !indent.is_empty() && !at_line_start => {
                tokens.push(Token {
                    kind: TokenKind::Text(indent),
                    location: location.clone(),
                });
                location.advance(indent);
                tokens.push(Token {
                    kind: TokenKind::Reference { indent: "", name },
                    location: location.clone(),
                });
                location.advance(&consumed[indent.len()..]);
            }
            kind => {
                tokens.push(Token {
                    kind,
                    location: location.clone(),
                });
                location.advance(consumed);
            }
        }
        rest = remaining;
    }

    tracing::debug!("Lexed {} tokens", tokens.len());
    Ok(tokens)
}

fn lex_error(rest: &str, location: TextLocation) -> TangleError {
    if rest.starts_with("@<") {
        let line = rest.lines().next().unwrap_or(rest);
        TangleError::syntax(
            location,
            format!("malformed chunk reference '{}': expected '>' before ']' or end of line", line),
        )
    } else {
        TangleError::syntax(location, "unexpected '@' (write '@@' for a literal '@')")
    }
}
