// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The Flint pipeline: lex, parse, elaborate, check resources, evaluate.
//!
//! Each phase runs only when the previous one produced no errors. A failure
//! names the phase and carries its diagnostics.

mod config;

pub use config::{CompilerConfig, ConfigError};

use flint_diagnostics::json::{to_json_report, DiagnosticReport};
use flint_diagnostics::{to_diagnostics, Diagnostic, ToDiagnostic};
use flint_interp::{Interpreter, Program, Value};

/// A pipeline phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lex,
    Parse,
    Typecheck,
    Resources,
    Runtime,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Lex => "lex",
            Phase::Parse => "parse",
            Phase::Typecheck => "typecheck",
            Phase::Resources => "resources",
            Phase::Runtime => "runtime",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The diagnostics of the phase that stopped the pipeline.
#[derive(Debug, thiserror::Error)]
#[error("{phase} failed with {}", count(.diagnostics))]
pub struct Failure {
    pub phase: Phase,
    pub diagnostics: Vec<Diagnostic>,
}

fn count(diagnostics: &[Diagnostic]) -> String {
    match diagnostics.len() {
        1 => "1 error".to_string(),
        n => format!("{} errors", n),
    }
}

impl Failure {
    fn new(phase: Phase, diagnostics: Vec<Diagnostic>) -> Self {
        tracing::info!(phase = phase.as_str(), errors = diagnostics.len(), "phase failed");
        Self { phase, diagnostics }
    }

    /// Resolve the diagnostics against the source they came from.
    pub fn report(&self, source: &str, file: &str) -> DiagnosticReport {
        to_json_report(&self.diagnostics, source, file, self.phase.as_str())
    }
}

/// Run the front end. A program that comes back is accepted by both
/// elaboration and the resource checker.
pub fn check(source: &str, config: &CompilerConfig) -> Result<Program, Failure> {
    let _span = tracing::debug_span!("check").entered();

    let lexed = flint_lexer::Lexer::new(source).tokenize();
    if !lexed.is_ok() {
        return Err(Failure::new(Phase::Lex, to_diagnostics(&lexed.errors)));
    }
    tracing::info!(tokens = lexed.tokens.len(), "lexed");

    let parsed = flint_parser::Parser::new(lexed.tokens).parse();
    if !parsed.is_ok() {
        return Err(Failure::new(Phase::Parse, to_diagnostics(&parsed.errors)));
    }
    tracing::info!(decls = parsed.decls.len(), "parsed");

    let typed = match flint_types::typecheck(&parsed.decls) {
        Ok(typed) => typed,
        Err(errors) => return Err(Failure::new(Phase::Typecheck, to_diagnostics(&errors))),
    };
    tracing::info!(functions = typed.functions.len(), globals = typed.globals.len(), "elaborated");

    let resources = flint_resources::check_resources(&typed, &parsed.decls, &config.checker);
    if !resources.is_ok() {
        return Err(Failure::new(Phase::Resources, to_diagnostics(&resources.errors)));
    }
    tracing::info!("resource check passed");

    Ok(Program {
        decls: parsed.decls,
        typed,
    })
}

/// Create an interpreter for a checked program, evaluating its globals.
pub fn instantiate<'p>(program: &'p Program, config: &CompilerConfig) -> Result<Interpreter<'p>, Failure> {
    Interpreter::new(program, config.eval.clone())
        .map_err(|diag| Failure::new(Phase::Runtime, vec![diag.to_diagnostic()]))
}

/// Check `source`, then call `function` on a fresh instance.
pub fn run(source: &str, config: &CompilerConfig, function: &str, args: Vec<Value>) -> Result<Value, Failure> {
    let program = check(source, config)?;
    let mut interp = instantiate(&program, config)?;
    let value = interp
        .invoke(function, args)
        .map_err(|diag| Failure::new(Phase::Runtime, vec![diag.to_diagnostic()]))?;
    tracing::info!(function, result = %value, "invocation finished");
    Ok(value)
}
