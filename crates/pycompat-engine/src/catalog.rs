//! The built-in catalog of version-gated syntax features.
//!
//! Each catalog entry binds a stable feature id, the Python version that
//! introduced the syntax, a predicate over one lowered node, and message
//! templates rendered at report time. Detection logic lives entirely in this
//! table; the walker applies it generically. Adding a language feature means
//! adding one descriptor here, never touching traversal.

use crate::node::{AnnotationTarget, Node, NodeKind};
use pycompat_core::Version;

/// Builtin container names usable as generics since Python 3.9 (PEP 585).
const BUILTIN_GENERICS: &[&str] = &["list", "dict", "set", "tuple", "frozenset", "type"];

/// One sub-match produced by a descriptor predicate.
///
/// Predicates may yield several matches from one node, e.g. one per
/// positional-only parameter on a single parameter list. `line` is the line
/// to report, which for composite shapes may come from a sub-node rather
/// than the node itself.
#[derive(Debug, Clone)]
pub struct FeatureMatch {
    /// 1-based line to report.
    pub line: u32,
    /// Arguments substituted into the message and suggestion templates.
    pub args: Vec<String>,
}

impl FeatureMatch {
    fn at(line: u32) -> Self {
        Self {
            line,
            args: Vec::new(),
        }
    }

    fn with_args(line: u32, args: Vec<String>) -> Self {
        Self { line, args }
    }
}

/// A static catalog entry for one version-gated syntax feature.
pub struct FeatureDescriptor {
    /// Unique stable identifier, e.g. `"named-expression"`.
    pub id: &'static str,
    /// Minimum Python version exposing this syntax.
    pub introduced_in: Version,
    /// Message template; `{}` placeholders are filled from match args.
    pub message: &'static str,
    /// Suggestion template; `{}` placeholders are filled from match args.
    pub suggestion: &'static str,
    matches: fn(&Node) -> Vec<FeatureMatch>,
}

impl FeatureDescriptor {
    /// Evaluates the predicate against one node.
    ///
    /// Pure: never mutates the tree, and a node the predicate cannot
    /// classify is a non-match, never an error.
    pub fn matches(&self, node: &Node) -> Vec<FeatureMatch> {
        (self.matches)(node)
    }

    /// Whether a `target` interpreter already supports this feature.
    pub fn is_supported_by(&self, target: &Version) -> bool {
        target.supports(&self.introduced_in)
    }
}

/// The ordered feature catalog.
///
/// Declaration order is canonical: it decides the report order for issues
/// produced at the same node, and callers may rely on it. Reordering the
/// table is a breaking change.
pub struct Catalog {
    descriptors: Vec<FeatureDescriptor>,
}

impl Catalog {
    /// Builds the built-in catalog.
    pub fn builtin() -> Self {
        let descriptors = vec![
            FeatureDescriptor {
                id: "subscripted-builtin-generic",
                introduced_in: Version::new([3, 9]),
                message: "Use of {}[T] syntax detected. Introduced in Python 3.9.",
                suggestion: "Replace '{}[T]' with the equivalent generic from the 'typing' \
                             module.",
                matches: match_builtin_generic,
            },
            FeatureDescriptor {
                id: "union-type-operator",
                introduced_in: Version::new([3, 10]),
                message: "Use of the type union operator '|' detected. Introduced in Python \
                          3.10.",
                suggestion: "Replace 'X | Y' with 'Union[X, Y]' (or 'Optional[X]' for 'X | \
                             None') from the 'typing' module.",
                matches: match_union_operator,
            },
            FeatureDescriptor {
                id: "named-expression",
                introduced_in: Version::new([3, 8]),
                message: "Use of the walrus operator ':=' detected. Introduced in Python 3.8.",
                suggestion: "Refactor to avoid using the walrus operator ':='.",
                matches: match_named_expression,
            },
            FeatureDescriptor {
                id: "comprehension-assignment-expression",
                introduced_in: Version::new([3, 8]),
                message: "Use of an assignment expression inside a comprehension detected. \
                          Introduced in Python 3.8.",
                suggestion: "Refactor to avoid assignment expressions in comprehensions.",
                matches: match_comprehension_assignment,
            },
            FeatureDescriptor {
                id: "positional-only-parameters",
                introduced_in: Version::new([3, 8]),
                message: "Use of positional-only parameter '{}' detected. Introduced in \
                          Python 3.8.",
                suggestion: "Remove the '/' marker and treat '{}' as a regular parameter.",
                matches: match_positional_only,
            },
            FeatureDescriptor {
                id: "interpolated-string-field",
                introduced_in: Version::new([3, 6]),
                message: "Use of f-strings detected. Introduced in Python 3.6.",
                suggestion: "Consider refactoring f-strings if targeting an older version of \
                             Python.",
                matches: match_fstring_field,
            },
            FeatureDescriptor {
                id: "structural-pattern-match",
                introduced_in: Version::new([3, 10]),
                message: "Use of structural pattern matching (match-case) detected. \
                          Introduced in Python 3.10.",
                suggestion: "Refactor to avoid using structural pattern matching.",
                matches: match_pattern_matching,
            },
            FeatureDescriptor {
                id: "self-referential-type-annotation",
                introduced_in: Version::new([3, 11]),
                message: "Use of the 'Self' type detected. Introduced in Python 3.11.",
                suggestion: "Replace 'Self' with the name of the enclosing class.",
                matches: match_self_type,
            },
            FeatureDescriptor {
                id: "multi-exception-group-handler",
                introduced_in: Version::new([3, 11]),
                message: "Use of the 'except*' clause detected. Introduced in Python 3.11.",
                suggestion: "Refactor to avoid using 'except*' clauses.",
                matches: match_grouped_handler,
            },
        ];
        Self { descriptors }
    }

    /// All descriptors, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &FeatureDescriptor> {
        self.descriptors.iter()
    }

    /// Number of descriptors in the catalog.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptors not yet supported at `target`, in canonical order.
    ///
    /// These are exactly the features to warn about: a feature is reported
    /// iff the target version predates its introduction.
    pub fn pending_for(&self, target: &Version) -> Vec<&FeatureDescriptor> {
        self.descriptors
            .iter()
            .filter(|descriptor| !descriptor.is_supported_by(target))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Renders a template, substituting each `{}` with the next argument.
pub(crate) fn render(template: &str, args: &[String]) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut remaining = template;
    let mut next = args.iter();
    while let Some(position) = remaining.find("{}") {
        rendered.push_str(&remaining[..position]);
        if let Some(arg) = next.next() {
            rendered.push_str(arg);
        }
        remaining = &remaining[position + 2..];
    }
    rendered.push_str(remaining);
    rendered
}

fn match_builtin_generic(node: &Node) -> Vec<FeatureMatch> {
    match &node.kind {
        NodeKind::TypeSubscript { base: Some(base) }
            if BUILTIN_GENERICS.contains(&base.as_str()) =>
        {
            vec![FeatureMatch::with_args(node.line, vec![base.clone()])]
        }
        _ => Vec::new(),
    }
}

fn match_union_operator(node: &Node) -> Vec<FeatureMatch> {
    match node.kind {
        NodeKind::TypeUnion => vec![FeatureMatch::at(node.line)],
        _ => Vec::new(),
    }
}

fn match_named_expression(node: &Node) -> Vec<FeatureMatch> {
    match node.kind {
        NodeKind::NamedExpr { .. } => vec![FeatureMatch::at(node.line)],
        _ => Vec::new(),
    }
}

fn match_comprehension_assignment(node: &Node) -> Vec<FeatureMatch> {
    match node.kind {
        NodeKind::NamedExpr {
            in_comprehension: true,
            ..
        } => vec![FeatureMatch::at(node.line)],
        _ => Vec::new(),
    }
}

fn match_positional_only(node: &Node) -> Vec<FeatureMatch> {
    if node.kind != NodeKind::Parameters {
        return Vec::new();
    }
    node.children
        .iter()
        .filter_map(|child| match &child.kind {
            NodeKind::PositionalOnlyParameter { name } => {
                Some(FeatureMatch::with_args(child.line, vec![name.clone()]))
            }
            _ => None,
        })
        .collect()
}

fn match_fstring_field(node: &Node) -> Vec<FeatureMatch> {
    match node.kind {
        NodeKind::FStringInterpolation => vec![FeatureMatch::at(node.line)],
        _ => Vec::new(),
    }
}

fn match_pattern_matching(node: &Node) -> Vec<FeatureMatch> {
    match node.kind {
        NodeKind::MatchStmt => vec![FeatureMatch::at(node.line)],
        _ => Vec::new(),
    }
}

fn match_self_type(node: &Node) -> Vec<FeatureMatch> {
    match &node.kind {
        NodeKind::TypeName { id, target }
            if id == "Self"
                && matches!(
                    target,
                    AnnotationTarget::Parameter | AnnotationTarget::Return
                ) =>
        {
            vec![FeatureMatch::at(node.line)]
        }
        _ => Vec::new(),
    }
}

fn match_grouped_handler(node: &Node) -> Vec<FeatureMatch> {
    match node.kind {
        NodeKind::ExceptClause { grouped: true } => vec![FeatureMatch::at(node.line)],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_feature_ids_are_unique() {
        let catalog = Catalog::builtin();
        let ids: HashSet<&str> = catalog.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_supported_set_is_monotone() {
        let catalog = Catalog::builtin();
        let targets = ["3.0", "3.6", "3.7", "3.8", "3.9", "3.10", "3.11", "3.12"];
        let mut previous: HashSet<&str> = HashSet::new();
        for target in targets {
            let target = Version::parse(target).unwrap();
            let supported: HashSet<&str> = catalog
                .iter()
                .filter(|d| d.is_supported_by(&target))
                .map(|d| d.id)
                .collect();
            assert!(
                previous.is_subset(&supported),
                "supported set shrank at {}",
                target
            );
            previous = supported;
        }
    }

    #[test]
    fn test_pending_for_is_complement_of_supported() {
        let catalog = Catalog::builtin();
        let target = Version::parse("3.9").unwrap();
        for descriptor in catalog.pending_for(&target) {
            assert!(!descriptor.is_supported_by(&target));
        }
        let pending = catalog.pending_for(&target).len();
        let supported = catalog
            .iter()
            .filter(|d| d.is_supported_by(&target))
            .count();
        assert_eq!(pending + supported, catalog.len());
    }

    #[test]
    fn test_everything_pending_below_oldest_feature() {
        let catalog = Catalog::builtin();
        let target = Version::parse("3.5").unwrap();
        assert_eq!(catalog.pending_for(&target).len(), catalog.len());
    }

    #[test]
    fn test_nothing_pending_at_newest_feature() {
        let catalog = Catalog::builtin();
        let target = Version::parse("3.12").unwrap();
        assert!(catalog.pending_for(&target).is_empty());
    }

    #[test]
    fn test_render_substitutes_in_order() {
        assert_eq!(
            render("Use of {}[T]; replace {}.", &["list".into(), "list".into()]),
            "Use of list[T]; replace list."
        );
        assert_eq!(render("no placeholders", &[]), "no placeholders");
        assert_eq!(render("dangling {}", &[]), "dangling ");
    }

    #[test]
    fn test_positional_only_matches_each_parameter() {
        let mut parameters = Node::new(NodeKind::Parameters, 4);
        parameters.children.push(Node::new(
            NodeKind::PositionalOnlyParameter { name: "a".into() },
            4,
        ));
        parameters.children.push(Node::new(
            NodeKind::PositionalOnlyParameter { name: "b".into() },
            5,
        ));
        let matches = match_positional_only(&parameters);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].line, 4);
        assert_eq!(matches[1].line, 5);
        assert_eq!(matches[1].args[0], "b");
    }

    #[test]
    fn test_self_type_ignores_variable_annotations() {
        let node = Node::new(
            NodeKind::TypeName {
                id: "Self".into(),
                target: AnnotationTarget::Variable,
            },
            3,
        );
        assert!(match_self_type(&node).is_empty());
    }
}
