// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement execution.

use flint_ast::stmt::{Condition, Stmt, StmtKind};
use flint_ast::NodeId;

use crate::value::Value;

use super::{Interpreter, RuntimeDiagnostic, RuntimeError};

impl<'p> Interpreter<'p> {
    pub(super) fn exec_stmts(&mut self, stmts: &[Stmt]) -> Result<(), RuntimeDiagnostic> {
        for stmt in stmts {
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    fn exec_block(&mut self, stmts: &[Stmt]) -> Result<(), RuntimeDiagnostic> {
        self.push_scope();
        let result = self.exec_stmts(stmts);
        self.pop_scope();
        result
    }

    fn push_scope(&mut self) {
        if let Some(frame) = self.frame_mut() {
            frame.env.push_scope();
        }
    }

    fn pop_scope(&mut self) {
        if let Some(frame) = self.frame_mut() {
            frame.env.pop_scope();
        }
    }

    fn define(&mut self, id: NodeId, value: Value) {
        if let Some(frame) = self.frame_mut() {
            frame.env.define(id, value);
        }
    }

    pub(super) fn exec_stmt(&mut self, stmt: &Stmt) -> Result<(), RuntimeDiagnostic> {
        let at = |e: RuntimeError| RuntimeDiagnostic::new(e, stmt.span);
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.eval_expr(expr)?;
                Ok(())
            }

            StmtKind::Let { transfer, init, .. } => {
                let value = self.eval_transfer(*transfer, init)?;
                self.define(stmt.id, value);
                Ok(())
            }

            StmtKind::Assign { target, transfer, value } => {
                let value = self.eval_transfer(*transfer, value)?;
                match self.place(target)? {
                    Some(place) => self
                        .write_place(&place, value)
                        .map_err(|e| RuntimeDiagnostic::new(e, target.span)),
                    // Writing into a temporary has no effect.
                    None => Ok(()),
                }
            }

            StmtKind::Swap { left, right } => {
                let (Some(l), Some(r)) = (self.place(left)?, self.place(right)?) else {
                    return Err(at(RuntimeError::TypeError("swap needs two places".into())));
                };
                self.swap_places(&l, &r).map_err(at)
            }

            StmtKind::Destroy(expr) => {
                let value = self.take(expr)?;
                self.destroy_value(value);
                Ok(())
            }

            StmtKind::Return(expr) => {
                let value = match expr {
                    Some(e) => self.eval_expr(e)?,
                    None => Value::Void,
                };
                Err(at(RuntimeError::Return(value)))
            }

            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let taken = match cond {
                    Condition::Expr(expr) => self.eval_bool(expr)?,
                    Condition::Let { transfer, value, .. } => match self.eval_transfer(*transfer, value)? {
                        Value::Nil => false,
                        bound => {
                            self.push_scope();
                            self.define(stmt.id, bound);
                            let result = self.exec_stmts(then_branch);
                            self.pop_scope();
                            return result;
                        }
                    },
                };
                if taken {
                    self.exec_block(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_block(else_branch)
                } else {
                    Ok(())
                }
            }

            StmtKind::While { cond, body } => {
                while self.eval_bool(cond)? {
                    match self.exec_block(body) {
                        Ok(()) => {}
                        Err(diag) if matches!(diag.error, RuntimeError::Break) => break,
                        Err(diag) if matches!(diag.error, RuntimeError::Continue) => continue,
                        Err(e) => return Err(e),
                    }
                }
                Ok(())
            }

            StmtKind::Break => Err(at(RuntimeError::Break)),
            StmtKind::Continue => Err(at(RuntimeError::Continue)),
        }
    }

    fn destroy_value(&self, value: Value) {
        match value {
            Value::Composite { ty, resource, fields } => {
                if let Some(id) = resource {
                    tracing::trace!(resource = id, ty = %ty, "resource destroyed");
                }
                for field in fields.into_values() {
                    self.destroy_value(field);
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.destroy_value(item);
                }
            }
            _ => {}
        }
    }
}
