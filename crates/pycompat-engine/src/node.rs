//! The syntax-tree shape the detection engine consumes.
//!
//! The engine does not walk the parser's AST directly. The bridge lowers it
//! into this closed node model, which carries exactly what detectors need:
//! a structural kind tag, a 1-based line number, and ordered children.
//! Context that a detector cannot see from a single node (annotation target,
//! comprehension enclosure, the star form of an enclosing `try`) is encoded
//! onto the kind during lowering, so predicates never reach past a node and
//! its direct children.
//!
//! `NodeKind` is a closed enum on purpose: a new node kind surfaces as a
//! compile-time exhaustiveness failure in the detectors that care, not as a
//! silently ignored shape.

/// Where an annotation expression is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationTarget {
    /// A function parameter annotation.
    Parameter,
    /// A function return annotation.
    Return,
    /// An annotated assignment (`x: list[int] = ...`).
    Variable,
}

/// Structural kind tag of a lowered node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of a lowered module.
    Module,
    /// A `def` or `async def` statement.
    FunctionDef {
        /// The declared function name.
        name: String,
    },
    /// A `class` statement.
    ClassDef {
        /// The declared class name.
        name: String,
    },
    /// A parameter list (of a named function or a lambda).
    Parameters,
    /// One parameter declared before a `/` marker.
    PositionalOnlyParameter {
        /// The parameter name.
        name: String,
    },
    /// An annotation attached to a parameter, return, or assignment.
    Annotation {
        /// What the annotation is attached to.
        target: AnnotationTarget,
    },
    /// A bare name inside annotation context.
    TypeName {
        /// The referenced name, e.g. `int` or `Self`.
        id: String,
        /// The annotation target this name ultimately belongs to.
        target: AnnotationTarget,
    },
    /// A subscript inside annotation context, e.g. `list[int]`.
    TypeSubscript {
        /// The subscripted base when it is a plain name.
        base: Option<String>,
    },
    /// A binary `|` inside annotation context, e.g. `int | None`.
    TypeUnion,
    /// An assignment expression (`:=`).
    NamedExpr {
        /// The bound name when the target is a plain name.
        target: Option<String>,
        /// Whether the expression sits inside a comprehension scope.
        in_comprehension: bool,
    },
    /// A list/set/dict comprehension or generator expression.
    Comprehension,
    /// A formatted string literal.
    FStringLiteral,
    /// One interpolated field of a formatted string literal.
    FStringInterpolation,
    /// A `match` statement.
    MatchStmt,
    /// One `except` clause.
    ExceptClause {
        /// Whether the clause uses the `except*`/grouped form.
        grouped: bool,
    },
    /// Any other statement.
    Statement,
    /// Any other expression.
    Expression,
}

/// One node of the lowered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Structural kind tag.
    pub kind: NodeKind,
    /// 1-based source line.
    pub line: u32,
    /// Children, in source order.
    pub children: Vec<Node>,
}

impl Node {
    /// Creates a leaf node.
    pub fn new(kind: NodeKind, line: u32) -> Self {
        Self {
            kind,
            line,
            children: Vec::new(),
        }
    }

    /// Total node count of this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Node::size).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_counts_every_node() {
        let mut root = Node::new(NodeKind::Module, 1);
        let mut stmt = Node::new(NodeKind::Statement, 1);
        stmt.children.push(Node::new(NodeKind::Expression, 1));
        root.children.push(stmt);
        assert_eq!(root.size(), 3);
    }
}
