//! Chunk names.

use std::fmt;

use serde::Serialize;

/// The reserved name of the default chunk emitted when nothing is requested.
pub const ROOT_CHUNK: &str = "*";

/// The name of a chunk.
///
/// Anonymous wrapper chunks (loose top-level text) carry the empty name,
/// which no reference can ever resolve to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct ChunkName(String);

impl ChunkName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The empty name used by anonymous wrapper chunks.
    pub fn anonymous() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the empty name.
    pub fn is_anonymous(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if this is the reserved root chunk name `*`.
    pub fn is_root(&self) -> bool {
        self.0 == ROOT_CHUNK
    }
}

impl fmt::Display for ChunkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChunkName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChunkName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ChunkName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
