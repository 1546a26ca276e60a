//! Readers turning literate source text into chunk documents.

mod lexer;
mod parser;

pub use lexer::{tokenize, Token, TokenKind};
pub use parser::{parse_document, read_document_file};
