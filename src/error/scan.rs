//! Scan error module.
//!
//! This module defines error types that may occur while walking on-disk
//! directories into the index.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning a directory into the index.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Error when the scan target does not exist.
    #[error("Path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    /// Error when the scan target is not a directory.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Error when the walk exceeds the configured depth limit.
    #[error("Scan of {} exceeds maximum depth of {max_depth}", .path.display())]
    TooDeep {
        /// The path that went over the limit
        path: PathBuf,
        /// The configured depth limit
        max_depth: usize,
    },

    /// Error when the walk exceeds the configured entry budget.
    #[error("Scan aborted after indexing {max_entries} entries")]
    TooManyEntries {
        /// The configured entry budget
        max_entries: usize,
    },

    /// Error reading a directory or file metadata.
    #[error("IO error while scanning {}: {source}", .path.display())]
    Io {
        /// The path being read when the error occurred
        path: PathBuf,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },
}
