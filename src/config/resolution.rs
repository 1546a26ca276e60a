//! Reference resolution policy.

use serde::{Deserialize, Serialize};

/// How an in-place reference to a multiply-defined name is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionPolicy {
    /// A name denotes all of its code definitions, concatenated in document
    /// order, exactly as it would be written to its `out` file.
    #[default]
    Merged,

    /// A name denotes only the first chunk defined under it.
    FirstDefinition,
}
