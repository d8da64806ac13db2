// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression evaluation.

use flint_ast::expr::{BinOp, Expr, ExprKind};
use flint_ast::Transfer;
use flint_numeric::{IntegerKind, IntegerValue};
use flint_types::{Resolution, Type};

use crate::value::Value;

use super::place::to_index;
use super::{Interpreter, RuntimeDiagnostic, RuntimeError};

impl<'p> Interpreter<'p> {
    pub(super) fn eval_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeDiagnostic> {
        let at = |e: RuntimeError| RuntimeDiagnostic::new(e, expr.span);
        match &expr.kind {
            ExprKind::Int(n) => {
                let kind = self
                    .typed()
                    .type_of(expr.id)
                    .integer_kind()
                    .unwrap_or(IntegerKind::Int);
                let value = IntegerValue::from_bigint(kind, n).map_err(|e| at(e.into()))?;
                Ok(Value::Integer(value))
            }
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::String(s) => Ok(Value::String(s.clone())),
            ExprKind::Nil => Ok(Value::Nil),

            ExprKind::Ident(name) => match self.typed().resolutions.get(&expr.id) {
                Some(Resolution::Local(_)) | Some(Resolution::Global(_)) => self.eval_place_expr(expr),
                _ => Err(at(RuntimeError::UndefinedFunction(name.clone()))),
            },

            ExprKind::SelfRef | ExprKind::StorageIndex(_) | ExprKind::Index { .. } => self.eval_place_expr(expr),

            ExprKind::Field { object, field } => {
                if self.is_array(object) && field == "length" {
                    let array = self.eval_expr(object)?;
                    let len = match self.deref(array).map_err(at)? {
                        Value::Array(items) => items.len(),
                        other => return Err(at(RuntimeError::TypeError(format!("no length on {}", other.type_name())))),
                    };
                    let len = i64::try_from(len).map_err(|_| at(RuntimeError::TypeError("array too long".into())))?;
                    return Ok(Value::Integer(IntegerValue::from_i64(IntegerKind::Int, len).map_err(|e| at(e.into()))?));
                }
                self.eval_place_expr(expr)
            }

            ExprKind::Binary { op, left, right } => {
                // Short-circuit logical operators
                match op {
                    BinOp::And | BinOp::Or => {
                        let l = self.eval_bool(left)?;
                        if (*op == BinOp::And && !l) || (*op == BinOp::Or && l) {
                            return Ok(Value::Bool(l));
                        }
                        Ok(Value::Bool(self.eval_bool(right)?))
                    }
                    _ => {
                        let l = self.eval_expr(left)?;
                        let r = self.eval_expr(right)?;
                        self.eval_binop(*op, l, r).map_err(at)
                    }
                }
            }
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                self.eval_unop(*op, value).map_err(at)
            }

            ExprKind::Call { func, args } => self.eval_call(expr, func, args),
            ExprKind::MethodCall { object, method, args } => self.eval_method_call(expr, object, method, args),
            ExprKind::Create { name, args } => self.construct(name, args, expr.span),

            ExprKind::Move(inner) => self.take(inner),
            ExprKind::Reference { expr: target, .. } => match &target.kind {
                ExprKind::StorageIndex(_) => Ok(Value::Reference(self.storage_key(target))),
                _ => Err(at(RuntimeError::TypeError("only storage slots can be referenced".into()))),
            },
            ExprKind::Array(elements) => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.eval_expr(element)?);
                }
                Ok(Value::Array(items))
            }
            // Casts are checked statically and never change the value.
            ExprKind::Cast { expr: inner, .. } => self.eval_expr(inner),
        }
    }

    /// Evaluate a field, index or binding by reading its place. Members of
    /// temporaries are projected out of the evaluated value.
    fn eval_place_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeDiagnostic> {
        let at = |e: RuntimeError| RuntimeDiagnostic::new(e, expr.span);
        if let Some(place) = self.place(expr)? {
            return self.read_place(&place).map_err(at);
        }
        match &expr.kind {
            ExprKind::Field { object, field } => {
                let value = self.eval_expr(object)?;
                match self.deref(value).map_err(at)? {
                    Value::Composite { mut fields, .. } => fields
                        .swap_remove(field)
                        .ok_or_else(|| at(RuntimeError::UninitializedField { field: field.clone() })),
                    other => Err(at(RuntimeError::TypeError(format!(
                        "no field `{}` on {}",
                        field,
                        other.type_name()
                    )))),
                }
            }
            ExprKind::Index { object, index } => {
                let value = self.eval_expr(object)?;
                let mut items = match self.deref(value).map_err(at)? {
                    Value::Array(items) => items,
                    other => return Err(at(RuntimeError::TypeError(format!("cannot index {}", other.type_name())))),
                };
                let i = to_index(&self.eval_expr(index)?, items.len()).map_err(at)?;
                Ok(items.swap_remove(i))
            }
            _ => Err(at(RuntimeError::InvalidatedValue)),
        }
    }

    /// Evaluate a moved operand: places give up their value.
    pub(super) fn take(&mut self, expr: &Expr) -> Result<Value, RuntimeDiagnostic> {
        let inner = expr.strip_move();
        if let ExprKind::Cast { expr: cast, .. } = &inner.kind {
            return self.take(cast);
        }
        match self.place(inner)? {
            Some(place) => self
                .take_place(&place)
                .map_err(|e| RuntimeDiagnostic::new(e, inner.span)),
            None => self.eval_expr(inner),
        }
    }

    /// A value handed to a binding or slot with `=` or `<-`.
    pub(super) fn eval_transfer(&mut self, transfer: Transfer, expr: &Expr) -> Result<Value, RuntimeDiagnostic> {
        match transfer {
            Transfer::Move => self.take(expr),
            Transfer::Copy => self.eval_expr(expr),
        }
    }

    pub(super) fn eval_bool(&mut self, expr: &Expr) -> Result<bool, RuntimeDiagnostic> {
        match self.eval_expr(expr)? {
            Value::Bool(b) => Ok(b),
            other => Err(RuntimeDiagnostic::new(
                RuntimeError::TypeError(format!("expected Bool, found {}", other.type_name())),
                expr.span,
            )),
        }
    }

    /// The storage value a reference refers to; other values as they are.
    pub(super) fn deref(&self, value: Value) -> Result<Value, RuntimeError> {
        match value {
            Value::Reference(slot) => match self.storage.get(&slot) {
                Some(target) => Ok(target.clone()),
                None => Err(RuntimeError::DanglingReference { slot }),
            },
            Value::Invalidated => Err(RuntimeError::InvalidatedValue),
            value => Ok(value),
        }
    }

    fn is_array(&self, expr: &Expr) -> bool {
        matches!(self.typed().type_of(expr.id).strip_reference(), Type::Array(_))
    }
}
