// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type checker error types.

use flint_ast::Span;
use flint_numeric::IntegerKind;

/// A type error. Types are rendered with their declared names.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
    #[error("type mismatch: expected {expected}, found {found}")]
    Mismatch {
        expected: String,
        found: String,
        span: Span,
    },
    #[error("cannot find `{name}` in this scope")]
    NotDeclared { name: String, span: Span },
    #[error("no member `{member}` on type {ty}")]
    NotDeclaredMember {
        ty: String,
        member: String,
        span: Span,
    },
    #[error("type {ty} cannot be indexed")]
    NotIndexable { ty: String, span: Span },
    #[error("type {ty} is not callable")]
    NotCallable { ty: String, span: Span },
    #[error("arity mismatch: expected {expected} arguments, found {found}")]
    ArityMismatch {
        expected: usize,
        found: usize,
        span: Span,
    },
    #[error("literal {value} is out of range for {kind}")]
    LiteralOutOfRange {
        value: String,
        kind: IntegerKind,
        span: Span,
    },
    #[error("`{name}` is already declared")]
    Redeclaration { name: String, span: Span },
    #[error("cannot assign to constant `{name}`")]
    AssignmentToConstant { name: String, span: Span },
    #[error("invalid assignment target")]
    InvalidAssignmentTarget { span: Span },
    #[error("both sides of a swap must be assignable")]
    InvalidSwap { span: Span },
    #[error("resource `{name}` must be created with `create`")]
    MissingCreate { name: String, span: Span },
    #[error("`create` requires a resource, found `{name}`")]
    InvalidCreate { name: String, span: Span },
    #[error("cannot destroy non-resource type {ty}")]
    InvalidDestroy { ty: String, span: Span },
    #[error("resource type {ty} must be annotated with `@`")]
    MissingResourceAnnotation { ty: String, span: Span },
    #[error("`@` on non-resource type {ty}")]
    InvalidResourceAnnotation { ty: String, span: Span },
    #[error("struct `{composite}` cannot have resource field `{field}`")]
    ResourceFieldInStruct {
        composite: String,
        field: String,
        span: Span,
    },
    #[error("`{composite}` does not conform to `{interface}`: {reason}")]
    ConformanceMismatch {
        composite: String,
        interface: String,
        reason: String,
        span: Span,
    },
    #[error("`{keyword}` outside of a loop")]
    ControlFlowOutsideLoop { keyword: &'static str, span: Span },
    #[error("missing return statement in `{function}`")]
    MissingReturn { function: String, span: Span },
    #[error("cannot apply `{op}` to {left} and {right}")]
    InvalidOperands {
        op: &'static str,
        left: String,
        right: String,
        span: Span,
    },
}

impl TypeError {
    pub fn span(&self) -> Span {
        match self {
            TypeError::Mismatch { span, .. }
            | TypeError::NotDeclared { span, .. }
            | TypeError::NotDeclaredMember { span, .. }
            | TypeError::NotIndexable { span, .. }
            | TypeError::NotCallable { span, .. }
            | TypeError::ArityMismatch { span, .. }
            | TypeError::LiteralOutOfRange { span, .. }
            | TypeError::Redeclaration { span, .. }
            | TypeError::AssignmentToConstant { span, .. }
            | TypeError::InvalidAssignmentTarget { span }
            | TypeError::InvalidSwap { span }
            | TypeError::MissingCreate { span, .. }
            | TypeError::InvalidCreate { span, .. }
            | TypeError::InvalidDestroy { span, .. }
            | TypeError::MissingResourceAnnotation { span, .. }
            | TypeError::InvalidResourceAnnotation { span, .. }
            | TypeError::ResourceFieldInStruct { span, .. }
            | TypeError::ConformanceMismatch { span, .. }
            | TypeError::ControlFlowOutsideLoop { span, .. }
            | TypeError::MissingReturn { span, .. }
            | TypeError::InvalidOperands { span, .. } => *span,
        }
    }
}
