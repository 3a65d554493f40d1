//! Python version tuples and the version gate.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// An ordered Python version, e.g. `3.10`.
///
/// Versions compare lexicographically by component, with missing trailing
/// components treated as zero: `3 == 3.0 < 3.1 < 3.10`. A `Version` is
/// immutable once parsed; a malformed dotted string fails with
/// [`Error::MalformedVersion`] and never produces a partial tuple.
#[derive(Debug, Clone)]
pub struct Version(Vec<u32>);

impl Version {
    /// Creates a version from explicit components.
    pub fn new(components: impl Into<Vec<u32>>) -> Self {
        Self(components.into())
    }

    /// Parses a dotted numeric string such as `"3.7"`.
    ///
    /// Each component must be plain ASCII digits; signed forms like `"+3"`
    /// (which `u32::from_str` would accept) are rejected.
    pub fn parse(text: &str) -> Result<Self> {
        let malformed = || Error::MalformedVersion {
            input: text.to_string(),
        };
        let components = text
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(malformed());
                }
                part.parse::<u32>().map_err(|_| malformed())
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self(components))
    }

    /// The parsed components, as written (trailing zeros are preserved).
    pub fn components(&self) -> &[u32] {
        &self.0
    }

    /// Whether an interpreter of this version supports a feature introduced
    /// in `introduced_in`.
    ///
    /// This is the version gate: monotone in `self`, so the supported
    /// feature set only ever grows as the target version rises.
    pub fn supports(&self, introduced_in: &Version) -> bool {
        self >= introduced_in
    }

    /// Component at `index`, with missing trailing components reading as zero.
    fn component(&self, index: usize) -> u32 {
        self.0.get(index).copied().unwrap_or(0)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.0.len().max(other.0.len());
        for index in 0..len {
            match self.component(index).cmp(&other.component(index)) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash must agree with Eq: ignore trailing zeros.
        let trimmed = self.0.iter().rposition(|&c| c != 0).map_or(0, |i| i + 1);
        self.0[..trimmed].hash(state);
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, component) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", component)?;
        }
        Ok(())
    }
}
