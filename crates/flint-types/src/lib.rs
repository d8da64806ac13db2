// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type system and elaborator for the Flint language.
//!
//! Resolves names, records a static type for every expression node and
//! binding, and answers the resource-kind and subtyping queries the
//! resource checker and evaluator build on.

mod types;
mod checker;

pub use types::{Type, TypeId};
pub use checker::{
    typecheck, TypeChecker, TypedProgram, TypeTable, TypeDef, CompositeDef,
    InterfaceDef, FieldDef, FunctionType, GlobalInfo, Resolution, TypeError,
};
