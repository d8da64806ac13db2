// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Function calls, method dispatch and construction.

use flint_ast::decl::{CompositeKind, FunDecl};
use flint_ast::expr::Expr;
use flint_ast::Span;
use flint_types::{Resolution, Type};
use indexmap::IndexMap;

use crate::env::Environment;
use crate::value::Value;

use super::place::{to_index, Place, Root};
use super::{Frame, Interpreter, RuntimeDiagnostic, RuntimeError};

impl<'p> Interpreter<'p> {
    /// Run a function body in a new frame. Returns the result and the
    /// receiver as the body left it.
    pub(super) fn call_function(
        &mut self,
        func: &FunDecl,
        args: Vec<Value>,
        receiver: Option<Value>,
        span: Span,
    ) -> Result<(Value, Option<Value>), RuntimeDiagnostic> {
        if args.len() != func.params.len() {
            return Err(RuntimeDiagnostic::new(
                RuntimeError::ArityMismatch {
                    expected: func.params.len(),
                    got: args.len(),
                },
                span,
            ));
        }
        if self.frames.len() > self.config.max_call_depth {
            return Err(RuntimeDiagnostic::new(
                RuntimeError::CallDepthExceeded {
                    limit: self.config.max_call_depth,
                },
                span,
            ));
        }

        let mut env = Environment::new();
        for (param, arg) in func.params.iter().zip(args) {
            env.define(param.id, arg);
        }
        self.frames.push(Frame { env, receiver });
        let result = self.exec_stmts(&func.body);
        let receiver = self.frames.pop().and_then(|frame| frame.receiver);

        match result {
            Ok(()) => Ok((Value::Void, receiver)),
            Err(RuntimeDiagnostic {
                error: RuntimeError::Return(value),
                ..
            }) => Ok((value, receiver)),
            Err(e) => Err(e),
        }
    }

    fn eval_args(&mut self, args: &[Expr]) -> Result<Vec<Value>, RuntimeDiagnostic> {
        args.iter().map(|arg| self.eval_expr(arg)).collect()
    }

    pub(super) fn eval_call(&mut self, expr: &Expr, func: &Expr, args: &[Expr]) -> Result<Value, RuntimeDiagnostic> {
        let at = |e: RuntimeError| RuntimeDiagnostic::new(e, expr.span);
        let typed = self.typed();
        match typed.resolutions.get(&func.id) {
            Some(Resolution::Function(name)) => {
                let Some(decl) = self.functions.get(name.as_str()).copied() else {
                    return Err(at(RuntimeError::UndefinedFunction(name.clone())));
                };
                let args = self.eval_args(args)?;
                Ok(self.call_function(decl, args, None, expr.span)?.0)
            }
            Some(Resolution::Constructor(id)) => self.construct(typed.types.name(*id), args, expr.span),
            Some(Resolution::Conversion(kind)) => {
                let [arg] = args else {
                    return Err(at(RuntimeError::ArityMismatch {
                        expected: 1,
                        got: args.len(),
                    }));
                };
                match self.eval_expr(arg)? {
                    Value::Integer(v) => Ok(Value::Integer(v.convert(*kind).map_err(|e| at(e.into()))?)),
                    other => Err(at(RuntimeError::TypeError(format!(
                        "cannot convert {} to {}",
                        other.type_name(),
                        kind
                    )))),
                }
            }
            _ => Err(at(RuntimeError::TypeError("expression is not callable".into()))),
        }
    }

    /// `create R(args)` and struct constructors: run `init` on a fresh
    /// instance.
    pub(super) fn construct(&mut self, name: &str, args: &[Expr], span: Span) -> Result<Value, RuntimeDiagnostic> {
        let Some(decl) = self.composites.get(name).copied() else {
            return Err(RuntimeDiagnostic::new(RuntimeError::UndefinedFunction(name.to_string()), span));
        };
        let args = self.eval_args(args)?;

        let resource = match decl.kind {
            CompositeKind::Resource => {
                let id = self.alloc_resource();
                tracing::trace!(resource = id, ty = name, "resource created");
                Some(id)
            }
            CompositeKind::Structure => None,
        };
        let instance = Value::Composite {
            ty: decl.name.clone(),
            resource,
            fields: IndexMap::new(),
        };

        match &decl.init {
            Some(init) => {
                let (_, receiver) = self.call_function(init, args, Some(instance), span)?;
                receiver.ok_or_else(|| RuntimeDiagnostic::new(RuntimeError::InvalidatedValue, span))
            }
            None if args.is_empty() => Ok(instance),
            None => Err(RuntimeDiagnostic::new(
                RuntimeError::ArityMismatch {
                    expected: 0,
                    got: args.len(),
                },
                span,
            )),
        }
    }

    /// The place a method receiver lives in. References stand for their
    /// storage slot; other temporaries have no place.
    fn receiver_place(&mut self, object: &Expr) -> Result<(Option<Place>, Option<Value>), RuntimeDiagnostic> {
        let at = |e: RuntimeError| RuntimeDiagnostic::new(e, object.span);
        match self.place(object)? {
            Some(place) => Ok((Some(self.follow_reference(place).map_err(at)?), None)),
            None => match self.eval_expr(object)? {
                Value::Reference(slot) => Ok((Some(Place::new(Root::Storage(slot))), None)),
                value => Ok((None, Some(value))),
            },
        }
    }

    pub(super) fn eval_method_call(
        &mut self,
        expr: &Expr,
        object: &Expr,
        method: &str,
        args: &[Expr],
    ) -> Result<Value, RuntimeDiagnostic> {
        let at = |e: RuntimeError| RuntimeDiagnostic::new(e, expr.span);
        let is_array = matches!(self.typed().type_of(object.id).strip_reference(), Type::Array(_));

        let (place, temporary) = self.receiver_place(object)?;
        let args = self.eval_args(args)?;
        let receiver = match (&place, temporary) {
            (Some(place), _) => self.take_place(place).map_err(at)?,
            (None, Some(value)) => value,
            (None, None) => return Err(at(RuntimeError::InvalidatedValue)),
        };

        if let (Value::Nil, Some(Place { root: Root::Storage(slot), .. })) = (&receiver, &place) {
            let slot = slot.clone();
            if let Some(place) = &place {
                self.write_place(place, Value::Nil).map_err(at)?;
            }
            return Err(at(RuntimeError::DanglingReference { slot }));
        }

        let result = if is_array {
            self.array_method(receiver, method, args, expr.span)
        } else {
            self.composite_method(receiver, method, args, expr.span)
        };

        let (value, receiver) = match result {
            Ok(pair) => pair,
            Err((error, receiver)) => {
                // Leave the receiver where it was before reporting.
                if let Some(place) = &place {
                    self.write_place(place, receiver).map_err(at)?;
                }
                return Err(error);
            }
        };
        if let Some(place) = &place {
            self.write_place(place, receiver).map_err(at)?;
        }
        Ok(value)
    }

    fn array_method(
        &mut self,
        receiver: Value,
        method: &str,
        mut args: Vec<Value>,
        span: Span,
    ) -> Result<(Value, Value), (RuntimeDiagnostic, Value)> {
        let mut items = match receiver {
            Value::Array(items) => items,
            other => {
                let error = RuntimeError::TypeError(format!("no method `{}` on {}", method, other.type_name()));
                return Err((RuntimeDiagnostic::new(error, span), other));
            }
        };
        match (method, args.pop()) {
            ("append", Some(value)) => {
                items.push(value);
                Ok((Value::Void, Value::Array(items)))
            }
            ("remove", Some(index)) => match to_index(&index, items.len()) {
                Ok(i) => {
                    let removed = items.remove(i);
                    Ok((removed, Value::Array(items)))
                }
                Err(e) => Err((RuntimeDiagnostic::new(e, span), Value::Array(items))),
            },
            _ => Err((
                RuntimeDiagnostic::new(RuntimeError::UndefinedFunction(format!("[].{}", method)), span),
                Value::Array(items),
            )),
        }
    }

    /// Dispatch on the receiver's runtime type, so interface references
    /// reach the implementing composite's method.
    fn composite_method(
        &mut self,
        receiver: Value,
        method: &str,
        args: Vec<Value>,
        span: Span,
    ) -> Result<(Value, Value), (RuntimeDiagnostic, Value)> {
        let decl = match &receiver {
            Value::Composite { ty, .. } => self.composites.get(ty.as_str()).copied(),
            _ => None,
        };
        let Some(func) = decl.and_then(|d| d.methods.iter().find(|m| m.name == method)) else {
            let error = match &receiver {
                Value::Invalidated => RuntimeError::InvalidatedValue,
                other => RuntimeError::UndefinedFunction(format!("{}.{}", other.type_name(), method)),
            };
            return Err((RuntimeDiagnostic::new(error, span), receiver));
        };

        match self.call_function(func, args, Some(receiver), span) {
            Ok((value, Some(receiver))) => Ok((value, receiver)),
            Ok((value, None)) => Ok((value, Value::Invalidated)),
            Err(e) => Err((e, Value::Invalidated)),
        }
    }
}
