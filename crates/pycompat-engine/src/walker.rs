//! Generic tree walk applying the feature catalog.

use crate::catalog::{render, Catalog, FeatureDescriptor};
use crate::node::Node;
use pycompat_core::{Issue, Version};

/// Walks `tree` once and reports every use of a feature newer than `target`.
///
/// The catalog is filtered up front to the descriptors the target does not
/// support yet, turning the per-node check from O(catalog) into O(pending).
/// Traversal is a single pre-order, depth-first walk; every node is visited
/// exactly once, and every pending descriptor is evaluated at every node in
/// catalog order. Issues therefore come out in source order, outer
/// constructs before nested ones, with catalog order breaking ties at a
/// single node. Callers may rely on that ordering.
///
/// Never fails on a well-formed tree: an unrecognized shape is a non-match.
pub fn analyze(tree: &Node, catalog: &Catalog, target: &Version) -> Vec<Issue> {
    let pending = catalog.pending_for(target);
    tracing::debug!(
        target_version = %target,
        pending = pending.len(),
        catalog = catalog.len(),
        "catalog filtered for traversal"
    );

    let mut issues = Vec::new();
    visit(tree, &pending, &mut issues);
    issues
}

fn visit(node: &Node, pending: &[&FeatureDescriptor], issues: &mut Vec<Issue>) {
    for descriptor in pending {
        for found in descriptor.matches(node) {
            issues.push(Issue {
                line: found.line,
                message: render(descriptor.message, &found.args),
                suggestion: render(descriptor.suggestion, &found.args),
                feature_id: descriptor.id.to_string(),
            });
        }
    }
    for child in &node.children {
        visit(child, pending, issues);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    fn tree_with_walrus_and_match() -> Node {
        // module
        // ├── match statement (line 2)
        // └── statement
        //     └── walrus (line 5)
        let mut root = Node::new(NodeKind::Module, 1);
        root.children.push(Node::new(NodeKind::MatchStmt, 2));
        let mut stmt = Node::new(NodeKind::Statement, 5);
        stmt.children.push(Node::new(
            NodeKind::NamedExpr {
                target: Some("x".into()),
                in_comprehension: false,
            },
            5,
        ));
        root.children.push(stmt);
        root
    }

    #[test]
    fn test_issues_come_out_in_visit_order() {
        let catalog = Catalog::builtin();
        let target = Version::parse("3.7").unwrap();
        let issues = analyze(&tree_with_walrus_and_match(), &catalog, &target);
        let ids: Vec<&str> = issues.iter().map(|i| i.feature_id.as_str()).collect();
        assert_eq!(ids, ["structural-pattern-match", "named-expression"]);
        assert_eq!(issues[0].line, 2);
        assert_eq!(issues[1].line, 5);
    }

    #[test]
    fn test_supported_features_are_not_reported() {
        let catalog = Catalog::builtin();
        let target = Version::parse("3.12").unwrap();
        let issues = analyze(&tree_with_walrus_and_match(), &catalog, &target);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_same_node_reports_in_catalog_order() {
        let catalog = Catalog::builtin();
        let target = Version::parse("3.7").unwrap();
        let mut root = Node::new(NodeKind::Module, 1);
        root.children.push(Node::new(
            NodeKind::NamedExpr {
                target: None,
                in_comprehension: true,
            },
            3,
        ));
        let issues = analyze(&root, &catalog, &target);
        let ids: Vec<&str> = issues.iter().map(|i| i.feature_id.as_str()).collect();
        assert_eq!(
            ids,
            ["named-expression", "comprehension-assignment-expression"]
        );
        assert_eq!(issues[0].line, 3);
        assert_eq!(issues[1].line, 3);
    }

    #[test]
    fn test_empty_tree_yields_no_issues() {
        let catalog = Catalog::builtin();
        let target = Version::parse("3.0").unwrap();
        let issues = analyze(&Node::new(NodeKind::Module, 1), &catalog, &target);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let catalog = Catalog::builtin();
        let target = Version::parse("3.6").unwrap();
        let tree = tree_with_walrus_and_match();
        let first = analyze(&tree, &catalog, &target);
        let second = analyze(&tree, &catalog, &target);
        assert_eq!(first, second);
    }
}
