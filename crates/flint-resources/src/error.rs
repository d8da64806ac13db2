// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Resource linearity errors.

use flint_ast::Span;
use thiserror::Error;

/// A resource linearity error.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceError {
    pub kind: ResourceErrorKind,
    pub span: Span,
    /// The binding, global or field chain involved (`h.inner`, `self.items`).
    pub entity: Option<String>,
    /// Where the entity was last moved or destroyed, for uses of an
    /// invalidated resource.
    pub invalidated_at: Option<Span>,
}

impl ResourceError {
    pub fn new(kind: ResourceErrorKind, span: Span) -> Self {
        let entity = match &kind {
            ResourceErrorKind::UseOfInvalidatedResource { name, .. } => Some(name.clone()),
            ResourceErrorKind::ResourceLoss { name, .. } => name.clone(),
            _ => None,
        };
        Self {
            kind,
            span,
            entity,
            invalidated_at: None,
        }
    }

    /// Name the entity when the kind carries no name of its own.
    pub fn on(mut self, entity: Option<String>) -> Self {
        if self.entity.is_none() {
            self.entity = entity;
        }
        self
    }

    pub fn invalidated_at(mut self, span: Option<Span>) -> Self {
        self.invalidated_at = span;
        self
    }

    /// The binding or field chain the error is about, if it has a name.
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }
}

/// The kind of resource error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResourceErrorKind {
    /// The resource was moved or destroyed on some or all paths here.
    #[error("{}use of invalidated resource `{name}`", qualifier(.potentially))]
    UseOfInvalidatedResource { name: String, potentially: bool },

    /// A resource is dropped without being moved or destroyed. Temporaries
    /// have no name.
    #[error("{}loss of resource{}", qualifier(.potentially), named(.name))]
    ResourceLoss {
        name: Option<String>,
        potentially: bool,
    },

    /// `&e as T` where `e` is not a storage slot.
    #[error("cannot reference a resource that is not in storage")]
    InvalidResourceReference,

    #[error("cannot reference non-resource type {ty}")]
    NonResourceReference { ty: String },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("resource must be transferred with `<-`")]
    MissingMoveOperation,

    #[error("non-resource values are transferred with `=`, not `<-`")]
    IncorrectTransferOperation,

    #[error("`<-` can only move resources")]
    InvalidMoveOperation,

    /// Moving out of `self`, a reference, an array element, storage, or a
    /// global from within a function.
    #[error("cannot move a nested resource out of its container")]
    InvalidNestedResourceMove,
}

fn qualifier(potentially: &bool) -> &'static str {
    if *potentially {
        "potential "
    } else {
        ""
    }
}

fn named(name: &Option<String>) -> String {
    name.as_ref().map(|n| format!(" `{}`", n)).unwrap_or_default()
}

impl std::fmt::Display for ResourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for ResourceError {}
