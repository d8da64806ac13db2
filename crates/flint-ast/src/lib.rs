// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract Syntax Tree types for the Flint language.
//!
//! This crate defines the AST nodes shared between the lexer, parser,
//! elaborator, resource checker, and interpreter.

pub mod span;
pub mod token;
pub mod ty;
pub mod expr;
pub mod stmt;
pub mod decl;

pub use span::{Span, LineMap};

/// Unique identifier for AST nodes.
///
/// The elaborator keys its per-node types on these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const DUMMY: NodeId = NodeId(u32::MAX);
}

/// How a value is handed to a binding or slot: `=` copies, `<-` moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    /// `=`
    Copy,
    /// `<-`
    Move,
}

impl Transfer {
    pub fn symbol(self) -> &'static str {
        match self {
            Transfer::Copy => "=",
            Transfer::Move => "<-",
        }
    }
}
