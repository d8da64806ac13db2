// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Central type registry.

use std::collections::HashMap;

use flint_ast::decl::CompositeKind;
use flint_numeric::IntegerKind;

use super::type_defs::{FieldDef, FunctionType, TypeDef};

use crate::types::{Type, TypeId};

/// Central registry of all declared types in the program.
#[derive(Debug, Default, Clone)]
pub struct TypeTable {
    /// Declared types indexed by TypeId.
    pub(super) types: Vec<TypeDef>,
    /// Name to TypeId mapping.
    pub(super) type_names: HashMap<String, TypeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in type names. Integer kinds are handled separately.
    pub fn builtin(name: &str) -> Option<Type> {
        match name {
            "Void" => Some(Type::Void),
            "Never" => Some(Type::Never),
            "Bool" => Some(Type::Bool),
            "String" => Some(Type::String),
            "Any" => Some(Type::Any),
            _ => IntegerKind::from_name(name).map(Type::Integer),
        }
    }

    pub(super) fn register(&mut self, def: TypeDef) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.type_names.insert(def.name().to_string(), id);
        self.types.push(def);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(name).copied()
    }

    pub fn get(&self, id: TypeId) -> &TypeDef {
        &self.types[id.0 as usize]
    }

    pub(super) fn get_mut(&mut self, id: TypeId) -> &mut TypeDef {
        &mut self.types[id.0 as usize]
    }

    pub fn name(&self, id: TypeId) -> &str {
        self.get(id).name()
    }

    /// The type a declared name denotes.
    pub fn named_type(&self, id: TypeId) -> Type {
        match self.get(id) {
            TypeDef::Composite(_) => Type::Composite(id),
            TypeDef::Interface(_) => Type::Interface(id),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, def)| (TypeId(i as u32), def))
    }

    /// Whether values of `ty` are resources: resource composites and
    /// interfaces, and optionals or arrays of them. References are not.
    pub fn is_resource(&self, ty: &Type) -> bool {
        match ty {
            Type::Composite(id) | Type::Interface(id) => {
                self.get(*id).kind() == CompositeKind::Resource
            }
            Type::Optional(inner) | Type::Array(inner) => self.is_resource(inner),
            _ => false,
        }
    }

    pub fn conforms(&self, composite: TypeId, interface: TypeId) -> bool {
        match self.get(composite) {
            TypeDef::Composite(def) => def.conformances.contains(&interface),
            TypeDef::Interface(_) => false,
        }
    }

    /// Whether a value of type `sub` can be used where `sup` is expected.
    pub fn is_subtype(&self, sub: &Type, sup: &Type) -> bool {
        if sub == sup || sub.is_error() || sup.is_error() {
            return true;
        }
        match (sub, sup) {
            (Type::Never, _) => true,
            (_, Type::Any) => !self.is_resource(sub) && !matches!(sub, Type::Void),
            (Type::Optional(a), Type::Optional(b)) => self.is_subtype(a, b),
            (_, Type::Optional(b)) => self.is_subtype(sub, b),
            (Type::Array(a), Type::Array(b)) => self.is_subtype(a, b),
            (Type::Reference(a), Type::Reference(b)) => self.is_subtype(a, b),
            (Type::Composite(c), Type::Interface(i)) => self.conforms(*c, *i),
            _ => false,
        }
    }

    /// Subtyping without lifting a plain value into an optional at the top
    /// level: `Int` is not accepted where `Int?` is expected.
    pub fn is_subtype_exact(&self, sub: &Type, sup: &Type) -> bool {
        if let (Type::Optional(_), false) = (sup, matches!(sub, Type::Optional(_))) {
            if !matches!(sub, Type::Never | Type::Error) {
                return false;
            }
        }
        self.is_subtype(sub, sup)
    }

    /// Two types accepted interchangeably, e.g. the sides of a swap.
    pub fn is_equivalent(&self, a: &Type, b: &Type) -> bool {
        self.is_subtype(a, b) && self.is_subtype(b, a)
    }

    pub fn field(&self, ty: &Type, name: &str) -> Option<&FieldDef> {
        match ty.strip_reference() {
            Type::Composite(id) | Type::Interface(id) => self.get(*id).fields().get(name),
            _ => None,
        }
    }

    pub fn method(&self, ty: &Type, name: &str) -> Option<&FunctionType> {
        match ty.strip_reference() {
            Type::Composite(id) | Type::Interface(id) => self.get(*id).methods().get(name),
            _ => None,
        }
    }

    /// Render a type for messages and storage keys.
    pub fn display(&self, ty: &Type) -> String {
        match ty {
            Type::Void => "Void".to_string(),
            Type::Never => "Never".to_string(),
            Type::Bool => "Bool".to_string(),
            Type::String => "String".to_string(),
            Type::Any => "Any".to_string(),
            Type::Integer(kind) => kind.name().to_string(),
            Type::Optional(inner) => format!("{}?", self.display(inner)),
            Type::Array(inner) => format!("[{}]", self.display(inner)),
            Type::Reference(inner) => format!("&{}", self.display(inner)),
            Type::Composite(id) | Type::Interface(id) => self.name(*id).to_string(),
            Type::Function { params, ret } => {
                let params: Vec<_> = params.iter().map(|p| self.display(p)).collect();
                format!("(({}): {})", params.join(", "), self.display(ret))
            }
            Type::Error => "<error>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::type_defs::{CompositeDef, InterfaceDef};
    use indexmap::IndexMap;

    fn table() -> (TypeTable, TypeId, TypeId, TypeId) {
        let mut table = TypeTable::new();
        let ri = table.register(TypeDef::Interface(InterfaceDef {
            name: "RI".into(),
            kind: CompositeKind::Resource,
            fields: IndexMap::new(),
            methods: IndexMap::new(),
        }));
        let r = table.register(TypeDef::Composite(CompositeDef {
            name: "R".into(),
            kind: CompositeKind::Resource,
            conformances: vec![ri],
            fields: IndexMap::new(),
            init: Vec::new(),
            methods: IndexMap::new(),
        }));
        let s = table.register(TypeDef::Composite(CompositeDef {
            name: "S".into(),
            kind: CompositeKind::Structure,
            conformances: Vec::new(),
            fields: IndexMap::new(),
            init: Vec::new(),
            methods: IndexMap::new(),
        }));
        (table, ri, r, s)
    }

    #[test]
    fn resource_kind_propagates_through_containers() {
        let (table, _, r, s) = table();
        let r = Type::Composite(r);
        assert!(table.is_resource(&r));
        assert!(table.is_resource(&Type::optional(Type::array(r.clone()))));
        assert!(!table.is_resource(&Type::reference(r)));
        assert!(!table.is_resource(&Type::Composite(s)));
    }

    #[test]
    fn subtyping() {
        let (table, ri, r, s) = table();
        let int = Type::Integer(IntegerKind::Int);
        assert!(table.is_subtype(&int, &Type::optional(int.clone())));
        assert!(table.is_subtype(&Type::optional(Type::Never), &Type::optional(int.clone())));
        assert!(!table.is_subtype(&Type::optional(int.clone()), &int));
        assert!(table.is_subtype(&Type::Composite(r), &Type::Interface(ri)));
        assert!(table.is_subtype(
            &Type::reference(Type::Composite(r)),
            &Type::reference(Type::Interface(ri))
        ));
        assert!(table.is_subtype(&Type::Composite(s), &Type::Any));
        assert!(!table.is_subtype(&Type::Composite(r), &Type::Any));
        assert!(!table.is_subtype(&Type::Integer(IntegerKind::Int8), &int));
    }

    #[test]
    fn exact_subtyping_does_not_lift() {
        let (table, ..) = table();
        let int = Type::Integer(IntegerKind::Int);
        assert!(!table.is_subtype_exact(&int, &Type::optional(int.clone())));
        assert!(table.is_subtype_exact(&Type::optional(int.clone()), &Type::optional(int.clone())));
        assert!(table.is_subtype_exact(&int, &int));
    }

    #[test]
    fn display_uses_declared_names() {
        let (table, _, r, _) = table();
        let ty = Type::reference(Type::array(Type::optional(Type::Composite(r))));
        assert_eq!(table.display(&ty), "&[R?]");
    }
}
