//! Core data types for compatibility findings.

use serde::{Deserialize, Serialize};

/// One occurrence of a syntax feature newer than the target version.
///
/// Issues are value objects: they carry no identity beyond their fields and
/// hold no reference into the syntax tree they were produced from. The
/// engine returns them as a finished, ordered sequence (source order, with
/// catalog order breaking ties at a single node) and retains nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// 1-based source line of the matched construct.
    ///
    /// For composite constructs this is the line of the most relevant
    /// sub-node, e.g. the exception handler's type expression rather than
    /// the `try` line.
    pub line: u32,

    /// Human-readable description of the feature use.
    pub message: String,

    /// Suggested rewrite for the stated target version.
    pub suggestion: String,

    /// Stable identifier of the detecting feature, for grouping/filtering.
    pub feature_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_serialization() {
        let issue = Issue {
            line: 12,
            message: "Use of the walrus operator ':=' detected. Introduced in Python 3.8."
                .to_string(),
            suggestion: "Refactor to avoid using the walrus operator ':='.".to_string(),
            feature_id: "named-expression".to_string(),
        };

        let json = serde_json::to_string(&issue).unwrap();
        let deserialized: Issue = serde_json::from_str(&json).unwrap();
        assert_eq!(issue, deserialized);
    }

    #[test]
    fn test_issues_compare_by_value() {
        let a = Issue {
            line: 1,
            message: "m".to_string(),
            suggestion: "s".to_string(),
            feature_id: "f".to_string(),
        };
        assert_eq!(a, a.clone());
    }
}
