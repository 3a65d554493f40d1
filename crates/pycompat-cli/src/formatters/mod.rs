//! Output formatters for analysis results.

pub mod human;
pub mod json;
