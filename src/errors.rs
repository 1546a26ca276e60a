//! Error types for the tangler.

use thiserror::Error;

use crate::model::ChunkName;
use crate::text_location::TextLocation;

/// Main error type for tangle operations.
///
/// Every variant is fatal for the run: nothing is retried and no partial
/// output is produced once one of these is returned.
#[derive(Error, Debug)]
pub enum TangleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Syntax error at {location}: {message}")]
    Syntax { location: TextLocation, message: String },

    #[error("Unresolved reference: no chunk named '{0}'")]
    UnresolvedReference(ChunkName),

    #[error("Cyclic reference: {}", format_cycle(.0))]
    CyclicReference(Vec<ChunkName>),

    #[error("No output target: no chunk was requested, no '*' chunk exists and no chunk declares 'out'")]
    NoOutputTarget,

    #[error("Requested chunk not found: '{0}'")]
    MissingRequestedChunk(ChunkName),

    #[error("{0}")]
    Other(String),
}

impl TangleError {
    /// Creates a syntax error at the given location.
    pub fn syntax(location: TextLocation, message: impl Into<String>) -> Self {
        TangleError::Syntax {
            location,
            message: message.into(),
        }
    }
}

fn format_cycle(names: &[ChunkName]) -> String {
    names
        .iter()
        .map(ChunkName::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Result type alias for tangle operations.
pub type Result<T> = std::result::Result<T, TangleError>;
