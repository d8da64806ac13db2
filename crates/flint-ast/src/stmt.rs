// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement AST nodes.

use crate::expr::Expr;
use crate::ty::TypeExpr;
use crate::{NodeId, Span, Transfer};

/// A statement in the AST.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub id: NodeId,
    pub kind: StmtKind,
    pub span: Span,
}

/// `let` declares a constant binding, `var` a variable one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Constant,
    Variable,
}

impl VariableKind {
    pub fn keyword(self) -> &'static str {
        match self {
            VariableKind::Constant => "let",
            VariableKind::Variable => "var",
        }
    }
}

/// The kind of statement.
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// Expression statement
    Expr(Expr),
    /// `let x: T <- init` / `var x = init`
    Let {
        kind: VariableKind,
        name: String,
        name_span: Span,
        ty: Option<TypeExpr>,
        transfer: Transfer,
        init: Expr,
    },
    /// `target = value` / `target <- value`
    Assign {
        target: Expr,
        transfer: Transfer,
        value: Expr,
    },
    /// `left <-> right`
    Swap {
        left: Expr,
        right: Expr,
    },
    /// `destroy expr`
    Destroy(Expr),
    /// `return` / `return expr`
    Return(Option<Expr>),
    /// `if cond { } else { }`; `else if` nests another `If` in the else branch.
    If {
        cond: Condition,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    /// `while cond { }`
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    Break,
    Continue,
}

/// The test of an `if` statement.
#[derive(Debug, Clone)]
pub enum Condition {
    /// A boolean expression.
    Expr(Expr),
    /// Optional binding: `if let y <- x { }`. The binding is keyed by the
    /// enclosing statement's id.
    Let {
        kind: VariableKind,
        name: String,
        name_span: Span,
        ty: Option<TypeExpr>,
        transfer: Transfer,
        value: Expr,
    },
}
