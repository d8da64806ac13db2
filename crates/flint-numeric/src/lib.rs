// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Exact integer arithmetic for Flint.
//!
//! Every integer kind of the language has a variant in [`IntegerValue`].
//! Fixed-width kinds never wrap: an operation whose mathematical result
//! does not fit the kind fails with an [`ArithmeticError`] instead.

mod error;
mod fixed;
mod kind;
mod value;

pub use error::ArithmeticError;
pub use kind::IntegerKind;
pub use value::IntegerValue;
