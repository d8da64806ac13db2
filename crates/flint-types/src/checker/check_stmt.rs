// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement type checking.

use flint_ast::expr::{Expr, ExprKind};
use flint_ast::stmt::{Condition, Stmt, StmtKind, VariableKind};

use super::errors::TypeError;
use super::TypeChecker;

use crate::types::Type;

impl TypeChecker {
    pub(super) fn check_block(&mut self, stmts: &[Stmt]) {
        self.push_scope();
        for stmt in stmts {
            self.check_stmt(stmt);
        }
        self.pop_scope();
    }

    pub(super) fn check_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.check_expr(expr, None);
            }
            StmtKind::Let {
                kind,
                name,
                name_span,
                ty,
                init,
                ..
            } => {
                let declared = ty.as_ref().map(|t| self.resolve_declared_type(t));
                let bound = self.check_binding_init(declared, init);
                self.declare_local(name, *name_span, stmt.id, *kind, bound);
            }
            StmtKind::Assign { target, value, .. } => {
                let target_ty = self.check_assign_target(target);
                let found = self.check_expr(value, Some(&target_ty));
                self.expect_subtype(&found, &target_ty, value.span);
            }
            StmtKind::Swap { left, right } => {
                let left_ty = self.check_swap_side(left);
                let right_ty = self.check_swap_side(right);
                if !self.types.is_equivalent(&left_ty, &right_ty) {
                    self.mismatch(&left_ty, &right_ty, right.span);
                }
            }
            StmtKind::Destroy(expr) => {
                let ty = self.check_expr(expr, None);
                if !ty.is_error() && !self.types.is_resource(&ty) {
                    self.errors.push(TypeError::InvalidDestroy {
                        ty: self.types.display(&ty),
                        span: expr.span,
                    });
                }
            }
            StmtKind::Return(value) => {
                let expected = self.current_return_type.clone().unwrap_or(Type::Void);
                match value {
                    Some(value) => {
                        let found = self.check_expr(value, Some(&expected));
                        if expected == Type::Void {
                            self.mismatch(&expected, &found, value.span);
                        } else {
                            self.expect_subtype(&found, &expected, value.span);
                        }
                    }
                    None if expected != Type::Void && !expected.is_error() => {
                        self.mismatch(&expected, &Type::Void, stmt.span);
                    }
                    None => {}
                }
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                match cond {
                    Condition::Expr(expr) => {
                        self.check_condition(expr);
                        self.check_block(then_branch);
                    }
                    Condition::Let {
                        kind,
                        name,
                        name_span,
                        ty,
                        value,
                        ..
                    } => {
                        let bound = self.check_optional_binding(ty.as_ref(), value);
                        // The binding is visible in the then-branch only.
                        self.push_scope();
                        self.declare_local(name, *name_span, stmt.id, *kind, bound);
                        for stmt in then_branch {
                            self.check_stmt(stmt);
                        }
                        self.pop_scope();
                    }
                }
                if let Some(else_branch) = else_branch {
                    self.check_block(else_branch);
                }
            }
            StmtKind::While { cond, body } => {
                self.check_condition(cond);
                self.loop_depth += 1;
                self.check_block(body);
                self.loop_depth -= 1;
            }
            StmtKind::Break | StmtKind::Continue => {
                if self.loop_depth == 0 {
                    let keyword = if matches!(stmt.kind, StmtKind::Break) { "break" } else { "continue" };
                    self.errors.push(TypeError::ControlFlowOutsideLoop {
                        keyword,
                        span: stmt.span,
                    });
                }
            }
        }
    }

    fn check_condition(&mut self, expr: &Expr) {
        let found = self.check_expr(expr, Some(&Type::Bool));
        self.expect_subtype(&found, &Type::Bool, expr.span);
    }

    /// Type of a `let`/`var` binding: the annotation if present, otherwise
    /// the initializer's type.
    pub(super) fn check_binding_init(&mut self, declared: Option<Type>, init: &Expr) -> Type {
        let found = self.check_expr(init, declared.as_ref());
        match declared {
            Some(declared) => {
                self.expect_subtype(&found, &declared, init.span);
                declared
            }
            None => found,
        }
    }

    /// `if let y = x` binds the value inside `x: T?` as `T`. An annotation
    /// must match `T` without optional lifting.
    fn check_optional_binding(&mut self, annotation: Option<&flint_ast::ty::TypeExpr>, value: &Expr) -> Type {
        let declared = annotation.map(|t| self.resolve_declared_type(t));
        let expected = declared.clone().map(Type::optional);
        let found = self.check_expr(value, expected.as_ref());
        match found {
            Type::Optional(inner) => match declared {
                Some(declared) => {
                    if !self.types.is_subtype_exact(&inner, &declared) {
                        self.mismatch(&declared, &inner, value.span);
                    }
                    declared
                }
                None => *inner,
            },
            Type::Error => declared.unwrap_or(Type::Error),
            other => {
                self.mismatch(&Type::optional(other.clone()), &other, value.span);
                declared.unwrap_or(Type::Error)
            }
        }
    }

    /// Check the left side of an assignment and return the type it accepts.
    pub(super) fn check_assign_target(&mut self, target: &Expr) -> Type {
        match &target.kind {
            ExprKind::Ident(name) => {
                let constant = if let Some(local) = self.lookup_local(name) {
                    Some(local.kind == VariableKind::Constant)
                } else if let Some(global) = self.globals.get(name) {
                    Some(global.kind == VariableKind::Constant)
                } else {
                    None
                };
                let ty = self.check_expr(target, None);
                match constant {
                    Some(true) => self.errors.push(TypeError::AssignmentToConstant {
                        name: name.clone(),
                        span: target.span,
                    }),
                    None if !ty.is_error() => {
                        self.errors.push(TypeError::InvalidAssignmentTarget { span: target.span });
                        return Type::Error;
                    }
                    _ => {}
                }
                ty
            }
            ExprKind::Field { object, field } => {
                let ty = self.check_expr(target, None);
                let object_ty = self.node_types.get(&object.id).cloned().unwrap_or(Type::Error);
                if let Some(def) = self.types.field(&object_ty, field) {
                    let initializing = self.in_initializer && matches!(object.kind, ExprKind::SelfRef);
                    if def.kind == VariableKind::Constant && !initializing {
                        self.errors.push(TypeError::AssignmentToConstant {
                            name: field.clone(),
                            span: target.span,
                        });
                    }
                } else if !ty.is_error() {
                    // Built-in members such as `length`.
                    self.errors.push(TypeError::InvalidAssignmentTarget { span: target.span });
                    return Type::Error;
                }
                ty
            }
            ExprKind::Index { .. } | ExprKind::StorageIndex(_) => self.check_expr(target, None),
            _ => {
                self.check_expr(target, None);
                self.errors.push(TypeError::InvalidAssignmentTarget { span: target.span });
                Type::Error
            }
        }
    }

    fn check_swap_side(&mut self, side: &Expr) -> Type {
        match side.kind {
            ExprKind::Ident(_) | ExprKind::Field { .. } | ExprKind::Index { .. } | ExprKind::StorageIndex(_) => {
                self.check_assign_target(side)
            }
            _ => {
                self.check_expr(side, None);
                self.errors.push(TypeError::InvalidSwap { span: side.span });
                Type::Error
            }
        }
    }
}
