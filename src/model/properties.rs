//! Chunk property lists (`[key=value, ...]`).

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

/// The option naming the file a chunk's rendered content is written to.
pub const OUT_KEY: &str = "out";

/// An ordered mapping of chunk options.
///
/// Keys are unique; inserting an existing key replaces its value in place so
/// the first-seen key order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Properties(IndexMap<String, String>);

impl Properties {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a key/value pair; a repeated key keeps the last value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder form of [`Properties::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the `out` path, if declared.
    pub fn out(&self) -> Option<PathBuf> {
        self.get(OUT_KEY).map(PathBuf::from)
    }

    /// Overlays `other` on top of `self`: keys in `other` win, all other
    /// keys of `self` survive.
    pub fn overlay(&mut self, other: &Properties) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Returns the keys whose values differ between `self` and `other`.
    pub fn conflicts<'a>(&'a self, other: &'a Properties) -> impl Iterator<Item = &'a str> {
        other
            .0
            .iter()
            .filter(|(k, v)| self.0.get(*k).is_some_and(|mine| mine != *v))
            .map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Properties::new();
        for (k, v) in iter {
            props.insert(k, v);
        }
        props
    }
}
