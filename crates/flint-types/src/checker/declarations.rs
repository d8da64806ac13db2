// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Declaration collection: types, members, function signatures and
//! interface conformance.

use flint_ast::decl::{CompositeDecl, CompositeKind, Decl, DeclKind, FieldDecl, InterfaceDecl, Param};
use flint_ast::stmt::VariableKind;
use flint_ast::ty::TypeExpr;
use flint_ast::Span;
use indexmap::IndexMap;

use super::errors::TypeError;
use super::type_defs::{CompositeDef, FieldDef, FunctionType, InterfaceDef, TypeDef};
use super::type_table::TypeTable;
use super::TypeChecker;

use crate::types::{Type, TypeId};

impl TypeChecker {
    pub(super) fn collect_type_declarations(&mut self, decls: &[Decl]) {
        // First pass: register names so members may refer to any type.
        let mut declared = Vec::new();
        for decl in decls {
            let (name, kind, name_span, is_interface) = match &decl.kind {
                DeclKind::Composite(c) => (&c.name, c.kind, c.name_span, false),
                DeclKind::Interface(i) => (&i.name, i.kind, i.name_span, true),
                _ => continue,
            };
            if TypeTable::builtin(name).is_some() || self.types.lookup(name).is_some() {
                self.errors.push(TypeError::Redeclaration {
                    name: name.clone(),
                    span: name_span,
                });
                continue;
            }
            let def = if is_interface {
                TypeDef::Interface(InterfaceDef {
                    name: name.clone(),
                    kind,
                    fields: IndexMap::new(),
                    methods: IndexMap::new(),
                })
            } else {
                TypeDef::Composite(CompositeDef {
                    name: name.clone(),
                    kind,
                    conformances: Vec::new(),
                    fields: IndexMap::new(),
                    init: Vec::new(),
                    methods: IndexMap::new(),
                })
            };
            declared.push((self.types.register(def), decl));
        }

        // Second pass: global function signatures.
        for decl in decls {
            let DeclKind::Fun(f) = &decl.kind else { continue };
            let sig = self.resolve_signature(&f.params, f.ret.as_ref());
            if self.functions.contains_key(&f.name)
                || self.types.lookup(&f.name).is_some()
                || TypeTable::builtin(&f.name).is_some()
            {
                self.errors.push(TypeError::Redeclaration {
                    name: f.name.clone(),
                    span: f.name_span,
                });
                continue;
            }
            self.functions.insert(f.name.clone(), sig);
        }

        // Third pass: members.
        for (id, decl) in &declared {
            match &decl.kind {
                DeclKind::Composite(c) => self.collect_composite_members(*id, c),
                DeclKind::Interface(i) => self.collect_interface_members(*id, i),
                _ => {}
            }
        }

        // Conformances last: every member type is known by now.
        for (id, decl) in &declared {
            if let DeclKind::Composite(c) = &decl.kind {
                self.collect_conformances(*id, c);
            }
        }
    }

    pub(super) fn resolve_signature(&mut self, params: &[Param], ret: Option<&TypeExpr>) -> FunctionType {
        let mut seen: Vec<&str> = Vec::new();
        let mut types = Vec::with_capacity(params.len());
        for param in params {
            if seen.contains(&param.name.as_str()) {
                self.errors.push(TypeError::Redeclaration {
                    name: param.name.clone(),
                    span: param.span,
                });
            }
            seen.push(&param.name);
            types.push(self.resolve_declared_type(&param.ty));
        }
        FunctionType {
            params: types,
            ret: ret.map_or(Type::Void, |t| self.resolve_declared_type(t)),
        }
    }

    fn collect_fields(&mut self, owner: &str, kind: CompositeKind, decls: &[FieldDecl]) -> IndexMap<String, FieldDef> {
        let mut fields = IndexMap::new();
        for field in decls {
            let ty = self.resolve_declared_type(&field.ty);
            if kind == CompositeKind::Structure && self.types.is_resource(&ty) {
                self.errors.push(TypeError::ResourceFieldInStruct {
                    composite: owner.to_string(),
                    field: field.name.clone(),
                    span: field.span,
                });
            }
            if fields.contains_key(&field.name) {
                self.errors.push(TypeError::Redeclaration {
                    name: field.name.clone(),
                    span: field.span,
                });
                continue;
            }
            fields.insert(field.name.clone(), FieldDef { kind: field.kind, ty });
        }
        fields
    }

    fn insert_method(
        &mut self,
        methods: &mut IndexMap<String, FunctionType>,
        fields: &IndexMap<String, FieldDef>,
        name: &str,
        span: Span,
        sig: FunctionType,
    ) {
        if methods.contains_key(name) || fields.contains_key(name) {
            self.errors.push(TypeError::Redeclaration {
                name: name.to_string(),
                span,
            });
            return;
        }
        methods.insert(name.to_string(), sig);
    }

    fn collect_composite_members(&mut self, id: TypeId, decl: &CompositeDecl) {
        let fields = self.collect_fields(&decl.name, decl.kind, &decl.fields);
        let init = match &decl.init {
            Some(init) => self.resolve_signature(&init.params, None).params,
            None => Vec::new(),
        };
        let mut methods = IndexMap::new();
        for method in &decl.methods {
            let sig = self.resolve_signature(&method.params, method.ret.as_ref());
            self.insert_method(&mut methods, &fields, &method.name, method.name_span, sig);
        }
        if let TypeDef::Composite(def) = self.types.get_mut(id) {
            def.fields = fields;
            def.init = init;
            def.methods = methods;
        }
    }

    fn collect_interface_members(&mut self, id: TypeId, decl: &InterfaceDecl) {
        let fields = self.collect_fields(&decl.name, decl.kind, &decl.fields);
        let mut methods = IndexMap::new();
        for method in &decl.methods {
            let sig = self.resolve_signature(&method.params, method.ret.as_ref());
            self.insert_method(&mut methods, &fields, &method.name, method.name_span, sig);
        }
        if let TypeDef::Interface(def) = self.types.get_mut(id) {
            def.fields = fields;
            def.methods = methods;
        }
    }

    fn collect_conformances(&mut self, id: TypeId, decl: &CompositeDecl) {
        let mut conformances = Vec::new();
        for (name, span) in &decl.conformances {
            let Some(interface_id) = self.types.lookup(name) else {
                self.errors.push(TypeError::NotDeclared {
                    name: name.clone(),
                    span: *span,
                });
                continue;
            };
            let reason = match self.types.get(interface_id) {
                TypeDef::Composite(_) => Some(format!("`{}` is not an interface", name)),
                TypeDef::Interface(i) if i.kind != decl.kind => Some(format!(
                    "a {} cannot conform to a {} interface",
                    decl.kind.keyword(),
                    i.kind.keyword()
                )),
                TypeDef::Interface(i) => self.missing_requirement(id, i),
            };
            match reason {
                Some(reason) => self.errors.push(TypeError::ConformanceMismatch {
                    composite: decl.name.clone(),
                    interface: name.clone(),
                    reason,
                    span: *span,
                }),
                None if !conformances.contains(&interface_id) => conformances.push(interface_id),
                None => {}
            }
        }
        if let TypeDef::Composite(def) = self.types.get_mut(id) {
            def.conformances = conformances;
        }
    }

    /// The first interface requirement the composite fails to meet.
    fn missing_requirement(&self, composite: TypeId, interface: &InterfaceDef) -> Option<String> {
        let def = self.types.get(composite);
        for (name, required) in &interface.fields {
            let Some(field) = def.fields().get(name) else {
                return Some(format!("missing field `{}`", name));
            };
            if !self.types.is_equivalent(&field.ty, &required.ty) {
                return Some(format!(
                    "field `{}` has type {}, expected {}",
                    name,
                    self.types.display(&field.ty),
                    self.types.display(&required.ty)
                ));
            }
            if required.kind == VariableKind::Variable && field.kind == VariableKind::Constant {
                return Some(format!("field `{}` must be declared with `var`", name));
            }
        }
        for (name, required) in &interface.methods {
            let Some(method) = def.methods().get(name) else {
                return Some(format!("missing function `{}`", name));
            };
            let same = method.params.len() == required.params.len()
                && method
                    .params
                    .iter()
                    .zip(&required.params)
                    .all(|(a, b)| self.types.is_equivalent(a, b))
                && self.types.is_equivalent(&method.ret, &required.ret);
            if !same {
                return Some(format!("function `{}` has a different signature", name));
            }
        }
        None
    }
}
