//! JSON formatter for compatibility issues.

use pycompat_core::{Issue, Version};
use serde_json::json;
use std::path::Path;

/// Prints the analysis result as pretty JSON.
pub fn print_json(file: &Path, target: &Version, issues: &[Issue]) {
    let payload = json!({
        "file": file,
        "target": target.to_string(),
        "issues": issues,
    });

    match serde_json::to_string_pretty(&payload) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing results: {}", e),
    }
}
