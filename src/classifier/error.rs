//! Error type for the classifier pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading mail from disk.
///
/// Both variants are fatal for the directory or file they name; the caller
/// decides whether that ends the whole run.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// A directory could not be listed.
    #[error("cannot list directory {}: {source}", .path.display())]
    FileSystem {
        /// The directory being listed.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A mail file could not be inspected, opened or read.
    #[error("cannot read file {}: {source}", .path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl ClassifierError {
    /// Returns the path the failed operation was working on.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::FileSystem { path, .. } | Self::Io { path, .. } => path,
        }
    }
}
