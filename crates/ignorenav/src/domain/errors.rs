//! Domain-specific errors.
//!
//! Resolution itself never fails: uncompilable patterns, missing context
//! directories, and entries vanishing mid-walk all degrade to fewer
//! results. These variants cover the surfaces that can genuinely refuse.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The ignore file itself could not be read.
    #[error("failed to read ignore file {}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A request for an entry index the document does not have.
    #[error("ignore file has no entry #{0}")]
    NoSuchEntry(usize),
}
