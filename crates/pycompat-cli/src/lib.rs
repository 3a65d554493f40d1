//! Pycompat CLI library components.
//!
//! This crate provides the command-line interface for the compatibility
//! checker. The main binary is in `main.rs`.

pub mod formatters;

use pycompat_core::{Error, Issue, Result, Version};
use std::path::Path;

/// Reads `path` and analyzes it against `target`.
///
/// File reading happens here, outside the engine; an unreadable file is an
/// [`Error::SourceRead`], an unparsable one an [`Error::SourceParse`], both
/// propagated unchanged.
pub fn check_file(path: &Path, target: &Version) -> Result<Vec<Issue>> {
    let source = std::fs::read_to_string(path).map_err(|source| Error::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "read source file");
    pycompat_engine::analyze_source(&source, target)
}
