// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type definitions used throughout the checker.

use std::collections::HashMap;

use flint_ast::decl::CompositeKind;
use flint_ast::stmt::VariableKind;
use flint_ast::NodeId;
use flint_numeric::IntegerKind;
use indexmap::IndexMap;

use super::type_table::TypeTable;

use crate::types::{Type, TypeId};

/// Information about a declared type.
#[derive(Debug, Clone)]
pub enum TypeDef {
    Composite(CompositeDef),
    Interface(InterfaceDef),
}

impl TypeDef {
    pub fn name(&self) -> &str {
        match self {
            TypeDef::Composite(def) => &def.name,
            TypeDef::Interface(def) => &def.name,
        }
    }

    pub fn kind(&self) -> CompositeKind {
        match self {
            TypeDef::Composite(def) => def.kind,
            TypeDef::Interface(def) => def.kind,
        }
    }

    pub fn fields(&self) -> &IndexMap<String, FieldDef> {
        match self {
            TypeDef::Composite(def) => &def.fields,
            TypeDef::Interface(def) => &def.fields,
        }
    }

    pub fn methods(&self) -> &IndexMap<String, FunctionType> {
        match self {
            TypeDef::Composite(def) => &def.methods,
            TypeDef::Interface(def) => &def.methods,
        }
    }
}

/// A `resource` or `struct`.
#[derive(Debug, Clone)]
pub struct CompositeDef {
    pub name: String,
    pub kind: CompositeKind,
    pub conformances: Vec<TypeId>,
    /// Fields in declaration order.
    pub fields: IndexMap<String, FieldDef>,
    /// Parameters of `init`; empty when there is none.
    pub init: Vec<Type>,
    pub methods: IndexMap<String, FunctionType>,
}

/// A `resource interface` or `struct interface`.
#[derive(Debug, Clone)]
pub struct InterfaceDef {
    pub name: String,
    pub kind: CompositeKind,
    pub fields: IndexMap<String, FieldDef>,
    pub methods: IndexMap<String, FunctionType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub kind: VariableKind,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub params: Vec<Type>,
    pub ret: Type,
}

impl FunctionType {
    pub fn as_type(&self) -> Type {
        Type::Function {
            params: self.params.clone(),
            ret: Box::new(self.ret.clone()),
        }
    }
}

/// What an identifier expression refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A `let`/`var`/`if let` binding or parameter, keyed by the id of the
    /// declaring statement or parameter.
    Local(NodeId),
    /// A program-level binding.
    Global(String),
    Function(String),
    /// A struct name called as its constructor.
    Constructor(TypeId),
    /// An integer kind name called as a conversion.
    Conversion(IntegerKind),
}

/// A program-level `let`/`var`.
#[derive(Debug, Clone)]
pub struct GlobalInfo {
    pub id: NodeId,
    pub kind: VariableKind,
    pub ty: Type,
}

/// Result of type checking.
#[derive(Debug)]
pub struct TypedProgram {
    pub types: TypeTable,
    /// Static type of every expression node.
    pub node_types: HashMap<NodeId, Type>,
    /// Declared type of every binding, keyed like [`Resolution::Local`];
    /// globals are keyed by their declaration id.
    pub binding_types: HashMap<NodeId, Type>,
    /// Targets of identifier expressions and callees.
    pub resolutions: HashMap<NodeId, Resolution>,
    pub functions: IndexMap<String, FunctionType>,
    /// Globals in declaration order.
    pub globals: IndexMap<String, GlobalInfo>,
}

impl TypedProgram {
    /// The recorded type of an expression, `Type::Error` if none.
    pub fn type_of(&self, id: NodeId) -> &Type {
        self.node_types.get(&id).unwrap_or(&Type::Error)
    }

    pub fn binding_type(&self, id: NodeId) -> &Type {
        self.binding_types.get(&id).unwrap_or(&Type::Error)
    }

    pub fn is_resource_expr(&self, id: NodeId) -> bool {
        self.types.is_resource(self.type_of(id))
    }
}
