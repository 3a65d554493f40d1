//! Error types for Pycompat.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for Pycompat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during analysis.
///
/// There is deliberately no variant for a detector failing to classify a
/// node: that case is defined as a non-match, not a failure.
#[derive(Debug, Error)]
pub enum Error {
    /// The target version string is not a dotted sequence of integers.
    #[error("Malformed version string: {input:?}")]
    MalformedVersion {
        /// The string that failed to parse.
        input: String,
    },

    /// The source file could not be read.
    #[error("Failed to read {path}: {source}")]
    SourceRead {
        /// Path to the unreadable file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The source text is not valid Python.
    #[error("Failed to parse source: {message}")]
    SourceParse {
        /// Parser error message, including the offending location.
        message: String,
    },
}
