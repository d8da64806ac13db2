// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type annotations as written in source.

use std::fmt;

use crate::Span;

/// A type annotation, e.g. `@[R]?` or `&RI`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExprKind {
    /// `Int8`, `R`, `Bool`
    Named(String),
    /// `T?`
    Optional(Box<TypeExpr>),
    /// `[T]`
    Array(Box<TypeExpr>),
    /// `&T`
    Reference(Box<TypeExpr>),
    /// `@T`, the resource annotation
    Resource(Box<TypeExpr>),
}

impl TypeExpr {
    /// Whether the outermost annotation is `@`.
    pub fn is_resource_annotated(&self) -> bool {
        matches!(self.kind, TypeExprKind::Resource(_))
    }

    /// The annotation with a leading `@` removed.
    pub fn without_annotation(&self) -> &TypeExpr {
        match &self.kind {
            TypeExprKind::Resource(inner) => inner,
            _ => self,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeExprKind::Named(name) => write!(f, "{}", name),
            TypeExprKind::Optional(inner) => write!(f, "{}?", inner),
            TypeExprKind::Array(inner) => write!(f, "[{}]", inner),
            TypeExprKind::Reference(inner) => write!(f, "&{}", inner),
            TypeExprKind::Resource(inner) => write!(f, "@{}", inner),
        }
    }
}
