// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Function, member and global checking.

use flint_ast::decl::{CompositeDecl, Decl, DeclKind, FunDecl, GlobalDecl};
use flint_ast::stmt::{Stmt, StmtKind, VariableKind};
use flint_ast::NodeId;

use super::errors::TypeError;
use super::type_defs::{FunctionType, GlobalInfo, TypeDef};
use super::type_table::TypeTable;
use super::TypeChecker;

use crate::types::{Type, TypeId};

impl TypeChecker {
    pub(super) fn check_decl(&mut self, decl: &Decl) {
        match &decl.kind {
            DeclKind::Fun(f) => {
                // Redeclared functions have no signature of their own.
                let Some(sig) = self.functions.get(&f.name).cloned() else { return };
                self.check_fn(f, &sig, None, false);
            }
            DeclKind::Composite(c) => self.check_composite(c),
            DeclKind::Interface(_) | DeclKind::Global(_) => {}
        }
    }

    fn check_composite(&mut self, decl: &CompositeDecl) {
        let Some(id) = self.types.lookup(&decl.name) else { return };
        let TypeDef::Composite(def) = self.types.get(id).clone() else { return };

        if let Some(init) = &decl.init {
            let sig = FunctionType {
                params: def.init.clone(),
                ret: Type::Void,
            };
            self.check_fn(init, &sig, Some(id), true);
        }
        for method in &decl.methods {
            if let Some(sig) = def.methods.get(&method.name) {
                self.check_fn(method, sig, Some(id), false);
            }
        }
    }

    pub(super) fn check_fn(&mut self, f: &FunDecl, sig: &FunctionType, self_type: Option<TypeId>, is_init: bool) {
        let _span = tracing::debug_span!("check_fn", name = %f.name).entered();

        let saved_return = self.current_return_type.replace(sig.ret.clone());
        let saved_self = std::mem::replace(&mut self.current_self_type, self_type);
        let saved_init = std::mem::replace(&mut self.in_initializer, is_init);
        let saved_loops = std::mem::take(&mut self.loop_depth);

        self.push_scope();
        for (param, ty) in f.params.iter().zip(&sig.params) {
            self.declare_local(&param.name, param.span, param.id, VariableKind::Constant, ty.clone());
        }
        for stmt in &f.body {
            self.check_stmt(stmt);
        }
        self.pop_scope();

        if sig.ret != Type::Void && !sig.ret.is_error() && !definitely_returns(&f.body) {
            self.errors.push(TypeError::MissingReturn {
                function: f.name.clone(),
                span: f.name_span,
            });
        }

        self.current_return_type = saved_return;
        self.current_self_type = saved_self;
        self.in_initializer = saved_init;
        self.loop_depth = saved_loops;
    }

    pub(super) fn check_global(&mut self, id: NodeId, global: &GlobalDecl) {
        let declared = global.ty.as_ref().map(|t| self.resolve_declared_type(t));
        let ty = self.check_binding_init(declared, &global.init);
        if self.globals.contains_key(&global.name)
            || self.functions.contains_key(&global.name)
            || self.types.lookup(&global.name).is_some()
            || TypeTable::builtin(&global.name).is_some()
        {
            self.errors.push(TypeError::Redeclaration {
                name: global.name.clone(),
                span: global.name_span,
            });
            return;
        }
        self.binding_types.insert(id, ty.clone());
        self.globals.insert(
            global.name.clone(),
            GlobalInfo {
                id,
                kind: global.kind,
                ty,
            },
        );
    }
}

/// Whether every path through `stmts` ends in `return`.
fn definitely_returns(stmts: &[Stmt]) -> bool {
    stmts.iter().any(|stmt| match &stmt.kind {
        StmtKind::Return(_) => true,
        StmtKind::If {
            then_branch,
            else_branch: Some(else_branch),
            ..
        } => definitely_returns(then_branch) && definitely_returns(else_branch),
        _ => false,
    })
}
