//! Pycompat Engine - Version-gated syntax feature detection for Python.
//!
//! The engine answers one question: which syntactic constructs does a piece
//! of Python source use that were introduced after a given target version?
//! It is static and single-pass; analyzed code is never executed or mutated.
//!
//! Three parts compose linearly:
//!
//! - the version gate ([`pycompat_core::Version::supports`]) decides which
//!   [`catalog`] entries a target version still lacks;
//! - the [`bridge`] parses source text (via Ruff) and lowers it into the
//!   closed [`node`] model;
//! - the [`walker`] visits every node once, applying the pending catalog
//!   entries and collecting [`Issue`]s in source order.
//!
//! # Example
//!
//! ```no_run
//! use pycompat_core::Version;
//!
//! let target = Version::parse("3.7")?;
//! let issues = pycompat_engine::analyze_source("print(f\"{x}\")\n", &target)?;
//! for issue in &issues {
//!     println!("Line {}: {}", issue.line, issue.message);
//! }
//! # Ok::<(), pycompat_core::Error>(())
//! ```

pub mod bridge;
pub mod catalog;
pub mod node;
pub mod walker;

pub use catalog::{Catalog, FeatureDescriptor, FeatureMatch};
pub use node::{AnnotationTarget, Node, NodeKind};

use pycompat_core::{Issue, Result, Version};

/// Parses `source` and reports every feature it uses that `target` predates.
///
/// Convenience composition of [`bridge::lower_source`] and
/// [`walker::analyze`] with the built-in catalog. Fails only on unparsable
/// source; an analysis over a well-formed tree cannot fail.
pub fn analyze_source(source: &str, target: &Version) -> Result<Vec<Issue>> {
    let tree = bridge::lower_source(source)?;
    let catalog = Catalog::builtin();
    Ok(walker::analyze(&tree, &catalog, target))
}
