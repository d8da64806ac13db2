// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Tree-walk interpreter for the Flint language.
//!
//! Executes checked programs directly from the AST. Resources move between
//! bindings, fields, arrays and storage slots; an invocation that faults is
//! rolled back completely.

mod config;
mod env;
mod interp;
mod storage;
mod value;

pub use config::EvalConfig;
pub use interp::{Interpreter, Program, RuntimeDiagnostic, RuntimeError};
pub use storage::Storage;
pub use value::Value;
