//! Pycompat Core - Value types for Python version compatibility analysis.
//!
//! This crate provides the foundational types shared by the analysis engine
//! and the CLI:
//!
//! - [`Version`]: an ordered Python version tuple parsed from a dotted string
//! - [`Issue`]: one reported occurrence of a too-new syntax feature
//! - [`Error`] and [`Result`]: the error surface of an analysis run
//!
//! # Architecture
//!
//! Pycompat is composed linearly: the CLI reads a source file, the engine
//! parses it and walks the resulting tree, and issues flow back out:
//!
//! ```text
//! ┌──────────────────┐
//! │   pycompat-cli   │  (User interface, file I/O, formatting)
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │ pycompat-engine  │  (Feature catalog, tree walker)
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │  pycompat-core   │  (This crate - versions, issues, errors)
//! └──────────────────┘
//! ```
//!
//! No I/O happens in this crate; everything here is an immutable value type.

pub mod error;
pub mod types;
pub mod version;

// Re-export core types for convenience
pub use error::{Error, Result};
pub use types::Issue;
pub use version::Version;
