//! Lowering from the Ruff AST into the engine's node model.
//!
//! This is the only module that touches the external parser. It parses
//! source text with `ruff_python_parser` and folds the resulting AST into
//! the closed [`Node`] tree in source order, attaching the context the
//! detectors need while it still has it: annotation targets, comprehension
//! depth, the star form of the enclosing `try`, and 1-based line numbers
//! resolved through a [`LineIndex`].
//!
//! A parse failure surfaces as [`Error::SourceParse`] and is propagated
//! unchanged; the engine performs no recovery of its own.

use crate::node::{AnnotationTarget, Node, NodeKind};
use pycompat_core::{Error, Result};
use ruff_python_ast::visitor::source_order::{walk_expr, walk_stmt, SourceOrderVisitor};
use ruff_python_ast::{self as ast, Expr, Stmt};
use ruff_python_parser::parse_module;
use ruff_source_file::LineIndex;
use ruff_text_size::{Ranged, TextSize};

/// Parses `source` and lowers it into a tree the walker can consume.
pub fn lower_source(source: &str) -> Result<Node> {
    let module = parse_module(source)
        .map_err(|err| Error::SourceParse {
            message: err.to_string(),
        })?
        .into_syntax();

    let index = LineIndex::from_source_text(source);
    let mut lowering = Lowering {
        index: &index,
        stack: vec![Node::new(NodeKind::Module, 1)],
        annotation: None,
        comprehension_depth: 0,
        star_try: false,
    };
    for stmt in &module.body {
        lowering.visit_stmt(stmt);
    }

    let root = lowering
        .stack
        .pop()
        .unwrap_or_else(|| Node::new(NodeKind::Module, 1));
    tracing::debug!(nodes = root.size(), "lowered module");
    Ok(root)
}

struct Lowering<'src> {
    index: &'src LineIndex,
    /// Node under construction at each nesting level; the root stays at the
    /// bottom until lowering finishes.
    stack: Vec<Node>,
    /// Annotation target currently being lowered, if any.
    annotation: Option<AnnotationTarget>,
    /// How many comprehension scopes enclose the current position.
    comprehension_depth: u32,
    /// Whether the nearest enclosing `try` uses the `except*` form.
    star_try: bool,
}

impl Lowering<'_> {
    fn line(&self, offset: TextSize) -> u32 {
        self.index.line_index(offset).get() as u32
    }

    fn enter(&mut self, kind: NodeKind, line: u32) {
        self.stack.push(Node::new(kind, line));
    }

    fn exit(&mut self) {
        debug_assert!(self.stack.len() > 1, "exit without matching enter");
        if let Some(node) = self.stack.pop() {
            if let Some(parent) = self.stack.last_mut() {
                parent.children.push(node);
            }
        }
    }

    fn lower_annotation<'ast>(&mut self, expr: &'ast Expr, target: AnnotationTarget) {
        self.enter(NodeKind::Annotation { target }, self.line(expr.start()));
        let previous = self.annotation.replace(target);
        self.visit_expr(expr);
        self.annotation = previous;
        self.exit();
    }

    fn lower_parameter<'ast>(&mut self, parameter: &'ast ast::Parameter) {
        if let Some(annotation) = &parameter.annotation {
            self.lower_annotation(annotation, AnnotationTarget::Parameter);
        }
    }

    /// Emits one node per interpolation field, descending into format specs
    /// so nested fields like `f"{x:{width}}"` are lowered too.
    fn lower_interpolations<'ast>(
        &mut self,
        elements: impl Iterator<Item = &'ast ast::InterpolatedStringElement>,
    ) {
        for element in elements {
            if let ast::InterpolatedStringElement::Interpolation(field) = element {
                self.enter(NodeKind::FStringInterpolation, self.line(field.start()));
                self.visit_expr(&field.expression);
                if let Some(spec) = &field.format_spec {
                    self.lower_interpolations(spec.elements.iter());
                }
                self.exit();
            }
        }
    }
}

impl<'ast> SourceOrderVisitor<'ast> for Lowering<'_> {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        let line = self.line(stmt.start());
        match stmt {
            Stmt::FunctionDef(node) => {
                self.enter(
                    NodeKind::FunctionDef {
                        name: node.name.as_str().to_string(),
                    },
                    line,
                );
                for decorator in &node.decorator_list {
                    self.visit_expr(&decorator.expression);
                }
                self.visit_parameters(&node.parameters);
                if let Some(returns) = &node.returns {
                    self.lower_annotation(returns, AnnotationTarget::Return);
                }
                for stmt in &node.body {
                    self.visit_stmt(stmt);
                }
                self.exit();
            }
            Stmt::ClassDef(node) => {
                self.enter(
                    NodeKind::ClassDef {
                        name: node.name.as_str().to_string(),
                    },
                    line,
                );
                walk_stmt(self, stmt);
                self.exit();
            }
            Stmt::AnnAssign(node) => {
                self.enter(NodeKind::Statement, line);
                self.visit_expr(&node.target);
                self.lower_annotation(&node.annotation, AnnotationTarget::Variable);
                if let Some(value) = &node.value {
                    self.visit_expr(value);
                }
                self.exit();
            }
            Stmt::Match(_) => {
                self.enter(NodeKind::MatchStmt, line);
                walk_stmt(self, stmt);
                self.exit();
            }
            Stmt::Try(node) => {
                self.enter(NodeKind::Statement, line);
                let previous = self.star_try;
                self.star_try = node.is_star;
                walk_stmt(self, stmt);
                self.star_try = previous;
                self.exit();
            }
            _ => {
                self.enter(NodeKind::Statement, line);
                walk_stmt(self, stmt);
                self.exit();
            }
        }
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        let line = self.line(expr.start());
        match expr {
            Expr::Named(node) => {
                let target = match node.target.as_ref() {
                    Expr::Name(name) => Some(name.id.as_str().to_string()),
                    _ => None,
                };
                self.enter(
                    NodeKind::NamedExpr {
                        target,
                        in_comprehension: self.comprehension_depth > 0,
                    },
                    line,
                );
                walk_expr(self, expr);
                self.exit();
            }
            Expr::ListComp(_) | Expr::SetComp(_) | Expr::DictComp(_) | Expr::Generator(_) => {
                self.enter(NodeKind::Comprehension, line);
                self.comprehension_depth += 1;
                walk_expr(self, expr);
                self.comprehension_depth -= 1;
                self.exit();
            }
            Expr::FString(node) => {
                self.enter(NodeKind::FStringLiteral, line);
                self.lower_interpolations(node.value.elements());
                self.exit();
            }
            Expr::BinOp(node)
                if self.annotation.is_some() && matches!(node.op, ast::Operator::BitOr) =>
            {
                self.enter(NodeKind::TypeUnion, line);
                walk_expr(self, expr);
                self.exit();
            }
            Expr::Subscript(node) if self.annotation.is_some() => {
                let base = match node.value.as_ref() {
                    Expr::Name(name) => Some(name.id.as_str().to_string()),
                    _ => None,
                };
                self.enter(NodeKind::TypeSubscript { base }, line);
                walk_expr(self, expr);
                self.exit();
            }
            Expr::Name(node) => {
                match self.annotation {
                    Some(target) => self.enter(
                        NodeKind::TypeName {
                            id: node.id.as_str().to_string(),
                            target,
                        },
                        line,
                    ),
                    None => self.enter(NodeKind::Expression, line),
                }
                walk_expr(self, expr);
                self.exit();
            }
            Expr::Lambda(_) => {
                // A lambda body is never annotation context, even when the
                // lambda itself appears inside one.
                let previous = self.annotation.take();
                self.enter(NodeKind::Expression, line);
                walk_expr(self, expr);
                self.annotation = previous;
                self.exit();
            }
            _ => {
                self.enter(NodeKind::Expression, line);
                walk_expr(self, expr);
                self.exit();
            }
        }
    }

    fn visit_parameters(&mut self, parameters: &'ast ast::Parameters) {
        self.enter(NodeKind::Parameters, self.line(parameters.start()));
        for param in &parameters.posonlyargs {
            self.enter(
                NodeKind::PositionalOnlyParameter {
                    name: param.parameter.name.as_str().to_string(),
                },
                self.line(param.parameter.start()),
            );
            self.lower_parameter(&param.parameter);
            self.exit();
            if let Some(default) = &param.default {
                self.visit_expr(default);
            }
        }
        for param in &parameters.args {
            self.lower_parameter(&param.parameter);
            if let Some(default) = &param.default {
                self.visit_expr(default);
            }
        }
        if let Some(vararg) = &parameters.vararg {
            self.lower_parameter(vararg);
        }
        for param in &parameters.kwonlyargs {
            self.lower_parameter(&param.parameter);
            if let Some(default) = &param.default {
                self.visit_expr(default);
            }
        }
        if let Some(kwarg) = &parameters.kwarg {
            self.lower_parameter(kwarg);
        }
        self.exit();
    }

    fn visit_except_handler(&mut self, except_handler: &'ast ast::ExceptHandler) {
        let ast::ExceptHandler::ExceptHandler(handler) = except_handler;
        let grouped = self.star_try
            || matches!(
                handler.type_.as_deref(),
                Some(Expr::BinOp(op)) if matches!(op.op, ast::Operator::BitOr)
            );
        // Report the handler at its type expression, not the `try` line.
        let line = match &handler.type_ {
            Some(type_) => self.line(type_.start()),
            None => self.line(handler.start()),
        };
        self.enter(NodeKind::ExceptClause { grouped }, line);
        if let Some(type_) = &handler.type_ {
            self.visit_expr(type_);
        }
        for stmt in &handler.body {
            self.visit_stmt(stmt);
        }
        self.exit();
    }
}
