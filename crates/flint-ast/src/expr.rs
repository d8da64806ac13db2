// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression AST nodes.

use num_bigint::BigInt;

use crate::ty::TypeExpr;
use crate::{NodeId, Span};

/// An expression in the AST.
#[derive(Debug, Clone)]
pub struct Expr {
    pub id: NodeId,
    pub kind: ExprKind,
    pub span: Span,
}

/// The kind of expression.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Integer literal. Negative literals are folded by the parser.
    Int(BigInt),
    /// Boolean literal
    Bool(bool),
    /// String literal
    String(String),
    /// `nil`
    Nil,
    /// Identifier
    Ident(String),
    /// `self` inside composite members
    SelfRef,
    /// Binary operation
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Unary operation
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// Function call, struct construction, or integer conversion
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
    },
    /// Method call `object.method(args)`
    MethodCall {
        object: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    /// Field access
    Field {
        object: Box<Expr>,
        field: String,
    },
    /// Index access `object[index]`
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    /// `create R(args)`
    Create {
        name: String,
        args: Vec<Expr>,
    },
    /// `<-expr`: explicit move of a resource
    Move(Box<Expr>),
    /// `&expr as T`
    Reference {
        expr: Box<Expr>,
        ty: TypeExpr,
    },
    /// `storage[T]`
    StorageIndex(TypeExpr),
    /// Array literal `[a, b, c]`
    Array(Vec<Expr>),
    /// `expr as T`
    Cast {
        expr: Box<Expr>,
        ty: TypeExpr,
    },
}

impl Expr {
    /// The innermost expression under any number of `<-` markers.
    pub fn strip_move(&self) -> &Expr {
        match &self.kind {
            ExprKind::Move(inner) => inner.strip_move(),
            _ => self,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self.kind, ExprKind::Move(_))
    }

    /// Whether the expression denotes a storage location rather than a
    /// freshly computed value.
    pub fn is_place(&self) -> bool {
        match &self.kind {
            ExprKind::Ident(_) | ExprKind::SelfRef | ExprKind::StorageIndex(_) => true,
            ExprKind::Field { object, .. } => object.is_place(),
            ExprKind::Index { object, .. } => object.is_place(),
            _ => false,
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::BitXor => "^",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod
                | BinOp::BitAnd | BinOp::BitOr | BinOp::BitXor
        )
    }

    pub fn is_comparison(self) -> bool {
        matches!(self, BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge)
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `!x`
    Not,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}
