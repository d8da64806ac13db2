// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression type checking.

use flint_ast::decl::CompositeKind;
use flint_ast::expr::{BinOp, Expr, ExprKind, UnaryOp};
use flint_ast::{NodeId, Span};
use flint_numeric::IntegerKind;
use num_bigint::BigInt;

use super::errors::TypeError;
use super::type_defs::{Resolution, TypeDef};
use super::TypeChecker;

use crate::types::Type;

/// Array members that are not declared anywhere.
const ARRAY_LENGTH: &str = "length";
const ARRAY_APPEND: &str = "append";
const ARRAY_REMOVE: &str = "remove";

impl TypeChecker {
    /// Check an expression and record its type. `expected` only guides
    /// literals; callers compare the result themselves.
    pub(super) fn check_expr(&mut self, expr: &Expr, expected: Option<&Type>) -> Type {
        let ty = self.infer_expr(expr, expected);
        self.node_types.insert(expr.id, ty.clone());
        ty
    }

    fn infer_expr(&mut self, expr: &Expr, expected: Option<&Type>) -> Type {
        match &expr.kind {
            ExprKind::Int(value) => self.check_int_literal(value, expected, expr.span),
            ExprKind::Bool(_) => Type::Bool,
            ExprKind::String(_) => Type::String,
            ExprKind::Nil => Type::optional(Type::Never),
            ExprKind::Ident(name) => self.check_ident(expr.id, name, expr.span),
            ExprKind::SelfRef => match self.current_self_type {
                Some(id) => Type::Composite(id),
                None => {
                    self.errors.push(TypeError::NotDeclared {
                        name: "self".to_string(),
                        span: expr.span,
                    });
                    Type::Error
                }
            },
            ExprKind::Binary { op, left, right } => self.check_binary(*op, left, right, expected, expr.span),
            ExprKind::Unary { op, operand } => self.check_unary(*op, operand, expected),
            ExprKind::Call { func, args } => self.check_call(func, args, expr.span),
            ExprKind::MethodCall { object, method, args } => {
                self.check_method_call(object, method, args, expr.span)
            }
            ExprKind::Field { object, field } => self.check_field(object, field, expr.span),
            ExprKind::Index { object, index } => self.check_index(object, index),
            ExprKind::Create { name, args } => self.check_create(name, args, expr.span),
            ExprKind::Move(inner) => self.check_expr(inner, expected),
            ExprKind::Reference { expr: inner, ty } => {
                self.check_expr(inner, None);
                match self.resolve_type_operand(ty) {
                    Type::Error => Type::Error,
                    target => Type::reference(target),
                }
            }
            ExprKind::StorageIndex(ty) => match self.resolve_type_operand(ty) {
                Type::Error => Type::Error,
                slot => Type::optional(slot),
            },
            ExprKind::Array(elements) => self.check_array_literal(elements, expected),
            ExprKind::Cast { expr: inner, ty } => {
                let target = self.resolve_type_operand(ty);
                let found = self.check_expr(inner, Some(&target));
                self.expect_subtype(&found, &target, inner.span);
                target
            }
        }
    }

    /// Integer literals take their kind from context, `Int` otherwise.
    fn check_int_literal(&mut self, value: &BigInt, expected: Option<&Type>, span: Span) -> Type {
        let kind = expected.and_then(Type::integer_kind).unwrap_or(IntegerKind::Int);
        if !kind.contains(value) {
            self.errors.push(TypeError::LiteralOutOfRange {
                value: value.to_string(),
                kind,
                span,
            });
        }
        Type::Integer(kind)
    }

    fn check_ident(&mut self, id: NodeId, name: &str, span: Span) -> Type {
        if let Some(local) = self.lookup_local(name) {
            let (binding, ty) = (local.id, local.ty.clone());
            self.resolutions.insert(id, Resolution::Local(binding));
            return ty;
        }
        if let Some(global) = self.globals.get(name) {
            let ty = global.ty.clone();
            self.resolutions.insert(id, Resolution::Global(name.to_string()));
            return ty;
        }
        if let Some(sig) = self.functions.get(name) {
            let ty = sig.as_type();
            self.resolutions.insert(id, Resolution::Function(name.to_string()));
            return ty;
        }
        self.errors.push(TypeError::NotDeclared {
            name: name.to_string(),
            span,
        });
        Type::Error
    }

    fn check_binary(&mut self, op: BinOp, left: &Expr, right: &Expr, expected: Option<&Type>, span: Span) -> Type {
        if op.is_logical() {
            let l = self.check_expr(left, Some(&Type::Bool));
            let r = self.check_expr(right, Some(&Type::Bool));
            let ok = |t: &Type| matches!(t, Type::Bool | Type::Error);
            if !ok(&l) || !ok(&r) {
                self.invalid_operands(op, &l, &r, span);
            }
            return Type::Bool;
        }

        let hint = if op.is_arithmetic() {
            expected.filter(|t| t.integer_kind().is_some()).cloned()
        } else {
            None
        };
        // A literal on the left takes its kind from the right operand.
        let (l, r) = if is_literal(left) && !is_literal(right) {
            let r = self.check_expr(right, hint.as_ref());
            let l = self.check_expr(left, Some(&r));
            (l, r)
        } else {
            let l = self.check_expr(left, hint.as_ref());
            let r = self.check_expr(right, Some(&l));
            (l, r)
        };
        if l.is_error() || r.is_error() {
            return if op.is_comparison() { Type::Bool } else { Type::Error };
        }

        match op {
            BinOp::Eq | BinOp::Ne => {
                let comparable = !self.types.is_resource(&l)
                    && !self.types.is_resource(&r)
                    && (self.types.is_subtype(&l, &r) || self.types.is_subtype(&r, &l));
                if !comparable {
                    self.invalid_operands(op, &l, &r, span);
                }
                Type::Bool
            }
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                if !same_integer_kind(&l, &r) {
                    self.invalid_operands(op, &l, &r, span);
                }
                Type::Bool
            }
            _ => {
                if same_integer_kind(&l, &r) {
                    l
                } else {
                    self.invalid_operands(op, &l, &r, span);
                    Type::Error
                }
            }
        }
    }

    fn invalid_operands(&mut self, op: BinOp, left: &Type, right: &Type, span: Span) {
        self.errors.push(TypeError::InvalidOperands {
            op: op.symbol(),
            left: self.types.display(left),
            right: self.types.display(right),
            span,
        });
    }

    fn check_unary(&mut self, op: UnaryOp, operand: &Expr, expected: Option<&Type>) -> Type {
        match op {
            UnaryOp::Neg => {
                let hint = expected.filter(|t| t.integer_kind().is_some());
                match self.check_expr(operand, hint) {
                    Type::Integer(kind) if kind.is_signed() => Type::Integer(kind),
                    Type::Error => Type::Error,
                    found => {
                        self.errors.push(TypeError::Mismatch {
                            expected: "signed integer".to_string(),
                            found: self.types.display(&found),
                            span: operand.span,
                        });
                        Type::Error
                    }
                }
            }
            UnaryOp::Not => {
                let found = self.check_expr(operand, Some(&Type::Bool));
                self.expect_subtype(&found, &Type::Bool, operand.span);
                Type::Bool
            }
        }
    }

    fn check_args(&mut self, params: &[Type], args: &[Expr], span: Span) {
        if params.len() != args.len() {
            self.errors.push(TypeError::ArityMismatch {
                expected: params.len(),
                found: args.len(),
                span,
            });
        }
        for (i, arg) in args.iter().enumerate() {
            match params.get(i) {
                Some(param) => {
                    let found = self.check_expr(arg, Some(param));
                    self.expect_subtype(&found, param, arg.span);
                }
                None => {
                    self.check_expr(arg, None);
                }
            }
        }
    }

    fn check_call(&mut self, func: &Expr, args: &[Expr], span: Span) -> Type {
        if let ExprKind::Ident(name) = &func.kind {
            let is_value = self.lookup_local(name).is_some() || self.globals.contains_key(name);
            if !is_value {
                if let Some(ty) = self.check_named_call(func, name, args, span) {
                    return ty;
                }
            }
        }

        let callee = self.check_expr(func, None);
        for arg in args {
            self.check_expr(arg, None);
        }
        if !callee.is_error() {
            self.errors.push(TypeError::NotCallable {
                ty: self.types.display(&callee),
                span: func.span,
            });
        }
        Type::Error
    }

    /// Calls of global functions, struct constructors and integer
    /// conversions. `None` when `name` is none of these.
    fn check_named_call(&mut self, func: &Expr, name: &str, args: &[Expr], span: Span) -> Option<Type> {
        if let Some(sig) = self.functions.get(name).cloned() {
            self.resolutions.insert(func.id, Resolution::Function(name.to_string()));
            self.node_types.insert(func.id, sig.as_type());
            self.check_args(&sig.params, args, span);
            return Some(sig.ret);
        }

        if let Some(kind) = IntegerKind::from_name(name) {
            let target = Type::Integer(kind);
            self.resolutions.insert(func.id, Resolution::Conversion(kind));
            self.node_types.insert(
                func.id,
                Type::Function {
                    params: vec![Type::Any],
                    ret: Box::new(target.clone()),
                },
            );
            if args.len() != 1 {
                self.check_args(&[Type::Any], args, span);
                return Some(target);
            }
            let found = self.check_expr(&args[0], Some(&target));
            if !found.is_integer() && !found.is_error() {
                self.errors.push(TypeError::Mismatch {
                    expected: "integer".to_string(),
                    found: self.types.display(&found),
                    span: args[0].span,
                });
            }
            return Some(target);
        }

        let id = self.types.lookup(name)?;
        match self.types.get(id).clone() {
            TypeDef::Composite(def) => {
                self.resolutions.insert(func.id, Resolution::Constructor(id));
                self.node_types.insert(
                    func.id,
                    Type::Function {
                        params: def.init.clone(),
                        ret: Box::new(Type::Composite(id)),
                    },
                );
                if def.kind == CompositeKind::Resource {
                    self.errors.push(TypeError::MissingCreate {
                        name: name.to_string(),
                        span,
                    });
                }
                self.check_args(&def.init, args, span);
                Some(Type::Composite(id))
            }
            TypeDef::Interface(_) => {
                for arg in args {
                    self.check_expr(arg, None);
                }
                self.errors.push(TypeError::NotCallable {
                    ty: name.to_string(),
                    span: func.span,
                });
                Some(Type::Error)
            }
        }
    }

    fn check_create(&mut self, name: &str, args: &[Expr], span: Span) -> Type {
        let Some(id) = self.types.lookup(name) else {
            for arg in args {
                self.check_expr(arg, None);
            }
            self.errors.push(TypeError::NotDeclared {
                name: name.to_string(),
                span,
            });
            return Type::Error;
        };
        match self.types.get(id).clone() {
            TypeDef::Composite(def) => {
                if def.kind != CompositeKind::Resource {
                    self.errors.push(TypeError::InvalidCreate {
                        name: name.to_string(),
                        span,
                    });
                }
                self.check_args(&def.init, args, span);
                Type::Composite(id)
            }
            TypeDef::Interface(_) => {
                for arg in args {
                    self.check_expr(arg, None);
                }
                self.errors.push(TypeError::InvalidCreate {
                    name: name.to_string(),
                    span,
                });
                Type::Error
            }
        }
    }

    fn check_method_call(&mut self, object: &Expr, method: &str, args: &[Expr], span: Span) -> Type {
        let object_ty = self.check_expr(object, None);
        if object_ty.is_error() {
            for arg in args {
                self.check_expr(arg, None);
            }
            return Type::Error;
        }

        if let Type::Array(elem) = object_ty.strip_reference() {
            let elem = (**elem).clone();
            match method {
                ARRAY_APPEND => {
                    self.check_args(&[elem], args, span);
                    return Type::Void;
                }
                ARRAY_REMOVE => {
                    if args.len() != 1 {
                        self.check_args(&[Type::Integer(IntegerKind::Int)], args, span);
                    } else {
                        self.check_index_operand(&args[0]);
                    }
                    return elem;
                }
                _ => {}
            }
        }

        match self.types.method(&object_ty, method).cloned() {
            Some(sig) => {
                self.check_args(&sig.params, args, span);
                sig.ret
            }
            None => {
                for arg in args {
                    self.check_expr(arg, None);
                }
                self.errors.push(TypeError::NotDeclaredMember {
                    ty: self.types.display(&object_ty),
                    member: method.to_string(),
                    span,
                });
                Type::Error
            }
        }
    }

    fn check_field(&mut self, object: &Expr, field: &str, span: Span) -> Type {
        let object_ty = self.check_expr(object, None);
        if object_ty.is_error() {
            return Type::Error;
        }
        if matches!(object_ty.strip_reference(), Type::Array(_)) && field == ARRAY_LENGTH {
            return Type::Integer(IntegerKind::Int);
        }
        match self.types.field(&object_ty, field) {
            Some(def) => def.ty.clone(),
            None => {
                self.errors.push(TypeError::NotDeclaredMember {
                    ty: self.types.display(&object_ty),
                    member: field.to_string(),
                    span,
                });
                Type::Error
            }
        }
    }

    fn check_index(&mut self, object: &Expr, index: &Expr) -> Type {
        let object_ty = self.check_expr(object, None);
        self.check_index_operand(index);
        match object_ty.strip_reference() {
            Type::Array(elem) => (**elem).clone(),
            Type::Error => Type::Error,
            _ => {
                self.errors.push(TypeError::NotIndexable {
                    ty: self.types.display(&object_ty),
                    span: object.span,
                });
                Type::Error
            }
        }
    }

    /// Indices may have any integer kind.
    fn check_index_operand(&mut self, index: &Expr) {
        let found = self.check_expr(index, Some(&Type::Integer(IntegerKind::Int)));
        if !found.is_integer() && !found.is_error() {
            self.errors.push(TypeError::Mismatch {
                expected: "integer".to_string(),
                found: self.types.display(&found),
                span: index.span,
            });
        }
    }

    fn check_array_literal(&mut self, elements: &[Expr], expected: Option<&Type>) -> Type {
        if let Some(elem) = expected.and_then(Type::array_element).cloned() {
            for element in elements {
                let found = self.check_expr(element, Some(&elem));
                self.expect_subtype(&found, &elem, element.span);
            }
            return Type::array(elem);
        }

        let mut elem = Type::Never;
        for element in elements {
            let hint = (elem != Type::Never).then(|| elem.clone());
            let found = self.check_expr(element, hint.as_ref());
            if self.types.is_subtype(&found, &elem) {
                continue;
            }
            if self.types.is_subtype(&elem, &found) {
                elem = found;
            } else {
                self.mismatch(&elem, &found, element.span);
            }
        }
        Type::array(elem)
    }
}

fn is_literal(expr: &Expr) -> bool {
    matches!(expr.kind, ExprKind::Int(_))
}

fn same_integer_kind(a: &Type, b: &Type) -> bool {
    matches!((a, b), (Type::Integer(x), Type::Integer(y)) if x == y)
}
