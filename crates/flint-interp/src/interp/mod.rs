// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The interpreter implementation.
//!
//! A tree-walk interpreter over the elaborated AST. Integer arithmetic goes
//! through `flint-numeric`, so every overflow is a fault rather than a wrap.
//! An invocation either completes or leaves storage and globals exactly as
//! they were before it started.

mod call;
mod eval_expr;
mod exec_stmt;
mod operators;
mod place;

use std::collections::HashMap;

use flint_ast::decl::{CompositeDecl, Decl, DeclKind, FunDecl};
use flint_ast::Span;
use flint_numeric::ArithmeticError;
use flint_types::TypedProgram;
use indexmap::IndexMap;

use crate::config::EvalConfig;
use crate::env::Environment;
use crate::storage::Storage;
use crate::value::Value;

/// A program that passed elaboration and resource checking.
#[derive(Debug)]
pub struct Program {
    pub decls: Vec<Decl>,
    pub typed: TypedProgram,
}

/// One activation: its locals and the receiver of a method or `init`.
#[derive(Debug, Default)]
struct Frame {
    env: Environment,
    receiver: Option<Value>,
}

/// The tree-walk interpreter.
pub struct Interpreter<'p> {
    program: &'p Program,
    config: EvalConfig,
    /// Top-level functions by name.
    functions: HashMap<&'p str, &'p FunDecl>,
    /// Struct and resource declarations by name.
    composites: HashMap<&'p str, &'p CompositeDecl>,
    globals: IndexMap<String, Value>,
    storage: Storage,
    /// Call stack. The bottom frame evaluates global initializers.
    frames: Vec<Frame>,
    next_resource: u64,
}

impl<'p> Interpreter<'p> {
    /// Create an interpreter and evaluate the program's globals in order.
    pub fn new(program: &'p Program, config: EvalConfig) -> Result<Self, RuntimeDiagnostic> {
        let mut functions = HashMap::new();
        let mut composites = HashMap::new();
        for decl in &program.decls {
            match &decl.kind {
                DeclKind::Fun(f) => {
                    functions.entry(f.name.as_str()).or_insert(f);
                }
                DeclKind::Composite(c) => {
                    composites.entry(c.name.as_str()).or_insert(c);
                }
                DeclKind::Interface(_) | DeclKind::Global(_) => {}
            }
        }

        let mut interp = Self {
            program,
            config,
            functions,
            composites,
            globals: IndexMap::new(),
            storage: Storage::new(),
            frames: vec![Frame::default()],
            next_resource: 1,
        };

        for decl in &program.decls {
            if let DeclKind::Global(global) = &decl.kind {
                let value = interp.eval_transfer(global.transfer, &global.init)?;
                interp.globals.insert(global.name.clone(), value);
            }
        }
        tracing::debug!(globals = interp.globals.len(), "globals initialized");
        Ok(interp)
    }

    /// Call a top-level function.
    ///
    /// On any fault, storage and globals are restored to their state before
    /// the call.
    pub fn invoke(&mut self, name: &str, args: Vec<Value>) -> Result<Value, RuntimeDiagnostic> {
        let _span = tracing::debug_span!("invoke", function = name).entered();

        let Some(func) = self.functions.get(name).copied() else {
            return Err(RuntimeDiagnostic::new(
                RuntimeError::UndefinedFunction(name.to_string()),
                Span::new(0, 0),
            ));
        };

        let storage = self.storage.clone();
        let globals = self.globals.clone();
        let result = self.call_function(func, args, None, func.span);
        match result {
            Ok((value, _)) => Ok(value),
            Err(diag) => {
                tracing::debug!(error = %diag.error, "invocation failed, rolling back");
                self.storage = storage;
                self.globals = globals;
                self.frames.truncate(1);
                Err(diag)
            }
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    /// Elaboration results, borrowed for the life of the program rather
    /// than of `self`.
    fn typed(&self) -> &'p TypedProgram {
        let program: &'p Program = self.program;
        &program.typed
    }

    fn frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    fn frame_mut(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    fn alloc_resource(&mut self) -> u64 {
        let id = self.next_resource;
        self.next_resource += 1;
        id
    }
}

/// A runtime error.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    #[error("index {index} out of bounds (length is {len})")]
    IndexOutOfBounds { index: String, len: usize },

    #[error("reference to empty storage slot `{slot}`")]
    DanglingReference { slot: String },

    #[error("field `{field}` read before initialization")]
    UninitializedField { field: String },

    #[error("use of a moved or destroyed value")]
    InvalidatedValue,

    #[error("storage slot `{slot}` already holds a resource")]
    DuplicateResource { slot: String },

    #[error("call depth limit of {limit} exceeded")]
    CallDepthExceeded { limit: usize },

    #[error("undefined function `{0}`")]
    UndefinedFunction(String),

    #[error("expected {expected} argument{}, got {got}", plural(.expected))]
    ArityMismatch { expected: usize, got: usize },

    /// Operands the elaborator would have rejected.
    #[error("{0}")]
    TypeError(String),

    // Control flow (not actual errors)
    #[error("return")]
    Return(Value),

    #[error("break")]
    Break,

    #[error("continue")]
    Continue,
}

fn plural(n: &usize) -> &'static str {
    if *n == 1 {
        ""
    } else {
        "s"
    }
}

/// Runtime error with source location for diagnostic display.
#[derive(Debug)]
pub struct RuntimeDiagnostic {
    pub error: RuntimeError,
    pub span: Span,
}

impl RuntimeDiagnostic {
    pub fn new(error: RuntimeError, span: Span) -> Self {
        Self { error, span }
    }
}

impl std::fmt::Display for RuntimeDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for RuntimeDiagnostic {}
