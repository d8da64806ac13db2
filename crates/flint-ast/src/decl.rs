// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Declaration AST nodes.

use crate::expr::Expr;
use crate::stmt::{Stmt, VariableKind};
use crate::ty::TypeExpr;
use crate::{NodeId, Span, Transfer};

/// A top-level declaration.
#[derive(Debug, Clone)]
pub struct Decl {
    pub id: NodeId,
    pub kind: DeclKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum DeclKind {
    Composite(CompositeDecl),
    Interface(InterfaceDecl),
    Fun(FunDecl),
    /// Program-level `let`/`var`. The binding is keyed by the declaration id.
    Global(GlobalDecl),
}

/// Whether a composite or interface declares resources or plain structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompositeKind {
    Resource,
    Structure,
}

impl CompositeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            CompositeKind::Resource => "resource",
            CompositeKind::Structure => "struct",
        }
    }
}

/// `resource R: I { ... }` or `struct S { ... }`
#[derive(Debug, Clone)]
pub struct CompositeDecl {
    pub kind: CompositeKind,
    pub name: String,
    pub name_span: Span,
    pub conformances: Vec<(String, Span)>,
    pub fields: Vec<FieldDecl>,
    pub init: Option<FunDecl>,
    pub methods: Vec<FunDecl>,
}

/// `resource interface I { ... }`
#[derive(Debug, Clone)]
pub struct InterfaceDecl {
    pub kind: CompositeKind,
    pub name: String,
    pub name_span: Span,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<FunSig>,
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub kind: VariableKind,
    pub name: String,
    pub ty: TypeExpr,
    pub span: Span,
}

/// A function parameter. An argument label, if written, is ignored.
#[derive(Debug, Clone)]
pub struct Param {
    pub id: NodeId,
    pub label: Option<String>,
    pub name: String,
    pub ty: TypeExpr,
    pub span: Span,
}

/// A function signature without a body (interface members).
#[derive(Debug, Clone)]
pub struct FunSig {
    pub name: String,
    pub name_span: Span,
    pub params: Vec<Param>,
    pub ret: Option<TypeExpr>,
    pub span: Span,
}

/// A function, method, or initializer.
#[derive(Debug, Clone)]
pub struct FunDecl {
    pub name: String,
    pub name_span: Span,
    pub params: Vec<Param>,
    pub ret: Option<TypeExpr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct GlobalDecl {
    pub kind: VariableKind,
    pub name: String,
    pub name_span: Span,
    pub ty: Option<TypeExpr>,
    pub transfer: Transfer,
    pub init: Expr,
}
