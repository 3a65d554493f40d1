//! Human-readable formatter for compatibility issues.

use pycompat_core::Issue;

/// Renders issues as line/suggestion blocks separated by blank lines.
pub fn render(issues: &[Issue]) -> String {
    let mut output = String::new();
    for issue in issues {
        output.push_str(&format!("Line {}: {}\n", issue.line, issue.message));
        output.push_str(&format!("Suggestion: {}\n\n", issue.suggestion));
    }
    output
}

/// Prints issues to stdout, one block per issue.
pub fn print_issues(issues: &[Issue]) {
    print!("{}", render(issues));
}
