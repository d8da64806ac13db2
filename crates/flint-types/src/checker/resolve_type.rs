// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Resolution of written type annotations.

use flint_ast::ty::{TypeExpr, TypeExprKind};

use super::errors::TypeError;
use super::type_table::TypeTable;
use super::TypeChecker;

use crate::types::Type;

impl TypeChecker {
    /// Resolve the type of a field, parameter, return value or binding.
    /// Resource types must carry `@` here, and nothing else may.
    pub(super) fn resolve_declared_type(&mut self, te: &TypeExpr) -> Type {
        let ty = self.resolve_type(te.without_annotation());
        if ty.is_error() {
            return ty;
        }
        let is_resource = self.types.is_resource(&ty);
        if is_resource && !te.is_resource_annotated() {
            self.errors.push(TypeError::MissingResourceAnnotation {
                ty: self.types.display(&ty),
                span: te.span,
            });
        } else if !is_resource && te.is_resource_annotated() {
            self.errors.push(TypeError::InvalidResourceAnnotation {
                ty: self.types.display(&ty),
                span: te.span,
            });
        }
        ty
    }

    /// Resolve the type operand of `as`, `&e as` or `storage[..]`, where a
    /// leading `@` is optional.
    pub(super) fn resolve_type_operand(&mut self, te: &TypeExpr) -> Type {
        let ty = self.resolve_type(te.without_annotation());
        if te.is_resource_annotated() && !ty.is_error() && !self.types.is_resource(&ty) {
            self.errors.push(TypeError::InvalidResourceAnnotation {
                ty: self.types.display(&ty),
                span: te.span,
            });
        }
        ty
    }

    pub(super) fn resolve_type(&mut self, te: &TypeExpr) -> Type {
        match &te.kind {
            TypeExprKind::Named(name) => {
                if let Some(ty) = TypeTable::builtin(name) {
                    return ty;
                }
                match self.types.lookup(name) {
                    Some(id) => self.types.named_type(id),
                    None => {
                        self.errors.push(TypeError::NotDeclared {
                            name: name.clone(),
                            span: te.span,
                        });
                        Type::Error
                    }
                }
            }
            TypeExprKind::Optional(inner) => self.wrap(inner, Type::optional),
            TypeExprKind::Array(inner) => self.wrap(inner, Type::array),
            TypeExprKind::Reference(inner) => self.wrap(inner, Type::reference),
            // Nested `@` is redundant but harmless on resources.
            TypeExprKind::Resource(_) => self.resolve_type_operand(te),
        }
    }

    fn wrap(&mut self, inner: &TypeExpr, make: fn(Type) -> Type) -> Type {
        match self.resolve_type(inner) {
            Type::Error => Type::Error,
            ty => make(ty),
        }
    }
}
