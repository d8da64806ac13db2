// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type checker implementation.

use std::collections::HashMap;

use flint_ast::decl::Decl;
use flint_ast::stmt::VariableKind;
use flint_ast::{NodeId, Span};
use indexmap::IndexMap;

use crate::types::{Type, TypeId};

mod type_defs;
mod type_table;
mod errors;
mod resolve_type;
mod declarations;
mod check_fn;
mod check_stmt;
mod check_expr;

pub use type_defs::{
    CompositeDef, FieldDef, FunctionType, GlobalInfo, InterfaceDef, Resolution, TypeDef,
    TypedProgram,
};
pub use type_table::TypeTable;
pub use errors::TypeError;

/// A local binding in scope.
#[derive(Debug, Clone)]
pub(super) struct LocalBinding {
    /// Declaring statement or parameter.
    pub(super) id: NodeId,
    pub(super) kind: VariableKind,
    pub(super) ty: Type,
}

pub struct TypeChecker {
    /// Type registry.
    pub(super) types: TypeTable,
    /// Types assigned to expression nodes.
    pub(super) node_types: HashMap<NodeId, Type>,
    /// Types of bindings, keyed by their declaring node.
    pub(super) binding_types: HashMap<NodeId, Type>,
    /// What each identifier expression refers to.
    pub(super) resolutions: HashMap<NodeId, Resolution>,
    /// Global function signatures.
    pub(super) functions: IndexMap<String, FunctionType>,
    /// Program-level bindings checked so far.
    pub(super) globals: IndexMap<String, GlobalInfo>,
    /// Collected errors.
    pub(super) errors: Vec<TypeError>,
    /// Scope stack for local bindings (innermost scope last).
    pub(super) local_types: Vec<HashMap<String, LocalBinding>>,
    /// Current function's return type (for checking return statements).
    pub(super) current_return_type: Option<Type>,
    /// Composite whose members are being checked.
    pub(super) current_self_type: Option<TypeId>,
    /// Inside `init`, where constant fields of `self` may be assigned.
    pub(super) in_initializer: bool,
    pub(super) loop_depth: usize,
}

impl TypeChecker {
    pub fn new() -> Self {
        Self {
            types: TypeTable::new(),
            node_types: HashMap::new(),
            binding_types: HashMap::new(),
            resolutions: HashMap::new(),
            functions: IndexMap::new(),
            globals: IndexMap::new(),
            errors: Vec::new(),
            local_types: Vec::new(),
            current_return_type: None,
            current_self_type: None,
            in_initializer: false,
            loop_depth: 0,
        }
    }

    pub fn check(mut self, decls: &[Decl]) -> Result<TypedProgram, Vec<TypeError>> {
        self.collect_type_declarations(decls);

        // Globals are initialized in order, before any function runs.
        for decl in decls {
            if let flint_ast::decl::DeclKind::Global(global) = &decl.kind {
                self.check_global(decl.id, global);
            }
        }
        for decl in decls {
            self.check_decl(decl);
        }

        tracing::debug!(
            nodes = self.node_types.len(),
            errors = self.errors.len(),
            "type checking finished"
        );

        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        Ok(TypedProgram {
            types: self.types,
            node_types: self.node_types,
            binding_types: self.binding_types,
            resolutions: self.resolutions,
            functions: self.functions,
            globals: self.globals,
        })
    }

    pub(super) fn push_scope(&mut self) {
        self.local_types.push(HashMap::new());
    }

    pub(super) fn pop_scope(&mut self) {
        self.local_types.pop();
    }

    pub(super) fn lookup_local(&self, name: &str) -> Option<&LocalBinding> {
        self.local_types.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Bind a name in the innermost scope. Shadowing an outer binding is
    /// allowed, redeclaring within one scope is not.
    pub(super) fn declare_local(&mut self, name: &str, span: Span, id: NodeId, kind: VariableKind, ty: Type) {
        self.binding_types.insert(id, ty.clone());
        let Some(scope) = self.local_types.last_mut() else {
            return;
        };
        if scope.contains_key(name) {
            self.errors.push(TypeError::Redeclaration {
                name: name.to_string(),
                span,
            });
            return;
        }
        scope.insert(name.to_string(), LocalBinding { id, kind, ty });
    }

    pub(super) fn mismatch(&mut self, expected: &Type, found: &Type, span: Span) {
        self.errors.push(TypeError::Mismatch {
            expected: self.types.display(expected),
            found: self.types.display(found),
            span,
        });
    }

    /// Report a mismatch unless `found` may be used as `expected`.
    pub(super) fn expect_subtype(&mut self, found: &Type, expected: &Type, span: Span) -> bool {
        if self.types.is_subtype(found, expected) {
            return true;
        }
        self.mismatch(expected, found, span);
        false
    }
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Public API
// ============================================================================

pub fn typecheck(decls: &[Decl]) -> Result<TypedProgram, Vec<TypeError>> {
    TypeChecker::new().check(decls)
}
