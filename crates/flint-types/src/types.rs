// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type definitions for the type system.

use flint_numeric::IntegerKind;

/// Unique identifier for declared composites and interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

/// A static type.
///
/// Names of composites and interfaces live in the [`TypeTable`]; render a
/// type with [`TypeTable::display`].
///
/// [`TypeTable`]: crate::TypeTable
/// [`TypeTable::display`]: crate::TypeTable::display
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Result of functions without a return type
    Void,
    /// Bottom type; `nil` is `Never?`
    Never,
    Bool,
    String,
    /// Supertype of every non-resource type
    Any,
    Integer(IntegerKind),
    /// `T?`
    Optional(Box<Type>),
    /// `[T]`
    Array(Box<Type>),
    /// `&T`
    Reference(Box<Type>),
    /// Declared `resource` or `struct`
    Composite(TypeId),
    /// Declared `resource interface` or `struct interface`
    Interface(TypeId),
    /// A global function named as a value. Only valid in call position.
    Function {
        params: Vec<Type>,
        ret: Box<Type>,
    },
    /// Placeholder after an error; compatible with everything so one
    /// mistake is reported once.
    Error,
}

impl Type {
    pub fn optional(inner: Type) -> Type {
        Type::Optional(Box::new(inner))
    }

    pub fn array(elem: Type) -> Type {
        Type::Array(Box::new(elem))
    }

    pub fn reference(inner: Type) -> Type {
        Type::Reference(Box::new(inner))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Type::Integer(_))
    }

    /// The integer kind of `Int8` or of `Int8??`.
    pub fn integer_kind(&self) -> Option<IntegerKind> {
        match self {
            Type::Integer(kind) => Some(*kind),
            Type::Optional(inner) => inner.integer_kind(),
            _ => None,
        }
    }

    /// The element type when `self` is an array, looking through one
    /// optional layer so `[T]?` still informs literals.
    pub fn array_element(&self) -> Option<&Type> {
        match self {
            Type::Array(elem) => Some(elem),
            Type::Optional(inner) => inner.array_element(),
            _ => None,
        }
    }

    /// `T` for `&T`, otherwise `self`.
    pub fn strip_reference(&self) -> &Type {
        match self {
            Type::Reference(inner) => inner,
            other => other,
        }
    }

    /// `T` for `T?`.
    pub fn unwrap_optional(&self) -> Option<&Type> {
        match self {
            Type::Optional(inner) => Some(inner),
            _ => None,
        }
    }
}
