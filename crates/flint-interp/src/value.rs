// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Runtime values.

use std::fmt;

use flint_numeric::IntegerValue;
use indexmap::IndexMap;

/// A runtime value in the interpreter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Result of a function without a return type
    Void,
    Bool(bool),
    Integer(IntegerValue),
    String(String),
    /// The empty optional. A present optional is the value itself.
    Nil,
    Array(Vec<Value>),
    /// Struct or resource instance. Fields not yet assigned by `init` are
    /// absent.
    Composite {
        ty: String,
        /// Identity of a resource instance, for tracing.
        resource: Option<u64>,
        fields: IndexMap<String, Value>,
    },
    /// `&storage[T] as U`: a handle on the storage slot keyed by `T`.
    Reference(String),
    /// Left behind in a binding or field whose resource was moved out.
    Invalidated,
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&IntegerValue> {
        match self {
            Value::Integer(v) => Some(v),
            _ => None,
        }
    }

    /// Whether this value owns a resource anywhere inside it.
    pub fn holds_resource(&self) -> bool {
        match self {
            Value::Composite { resource: Some(_), .. } => true,
            Value::Composite { fields, .. } => fields.values().any(Value::holds_resource),
            Value::Array(items) => items.iter().any(Value::holds_resource),
            _ => false,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Value::Void => "Void",
            Value::Bool(_) => "Bool",
            Value::Integer(v) => v.kind().name(),
            Value::String(_) => "String",
            Value::Nil => "nil",
            Value::Array(_) => "array",
            Value::Composite { ty, .. } => ty,
            Value::Reference(_) => "reference",
            Value::Invalidated => "invalidated value",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => write!(f, "()"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Nil => write!(f, "nil"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Composite { ty, fields, .. } => {
                write!(f, "{}(", ty)?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                write!(f, ")")
            }
            Value::Reference(slot) => write!(f, "&storage[{}]", slot),
            Value::Invalidated => write!(f, "<invalidated>"),
        }
    }
}
