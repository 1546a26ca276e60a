//! Tangler - Literate Programming Tangler
//!
//! Extracts source code from literate documents made of `@doc` and `@code`
//! chunks. Code chunks refer to each other with `@<name>` references; tangling
//! expands those references recursively, preserving the indentation at which
//! each reference appears, and writes the result to the files named by the
//! chunks' `out` properties.
//!
//! ```text
//! @code main [out=hello.py]
//! def main():
//!     @<body>
//! @end
//!
//! @code body
//! print("hello")
//! @end
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use tangler::interface::Context;
//! use tangler::commands::{tangle, TangleOptions};
//!
//! let ctx = Context::from_current_dir().unwrap();
//! let options = TangleOptions {
//!     file: PathBuf::from("program.lit"),
//!     ..Default::default()
//! };
//! tangle(&ctx, options).unwrap();
//! ```

pub mod commands;
pub mod config;
pub mod errors;
pub mod interface;
pub mod io;
pub mod model;
pub mod readers;
pub mod text_location;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::{Config, ResolutionPolicy};
pub use errors::{Result, TangleError};
pub use interface::Context;
pub use model::{Chunk, ChunkKind, ChunkName, ChunkTable, Document, Segment};

// Re-export command options
pub use commands::{ListOptions, TangleOptions};
