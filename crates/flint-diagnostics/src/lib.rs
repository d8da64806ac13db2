// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Flint diagnostics.
//!
//! Every phase of the pipeline reports errors only; a program either passes
//! a phase or it does not. Each phase's error type converts to `Diagnostic`
//! through `ToDiagnostic`, so the phase crates stay free of presentation
//! concerns.

pub mod codes;
pub mod convert;
pub mod json;

use flint_ast::Span;
use serde::Serialize;

/// One error, pointing at the source that caused it.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Registry code, e.g. `E0801`.
    pub code: Option<&'static str>,
    pub message: String,
    /// The offending source, with a short label.
    pub span: Option<Span>,
    pub label: Option<String>,
    /// The binding, global, field chain or function the error is about.
    pub entity: Option<String>,
    /// Earlier source that explains the error, such as where a resource was
    /// moved.
    pub related: Vec<Related>,
    pub notes: Vec<String>,
    pub help: Option<Help>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Related {
    pub span: Span,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Help {
    pub message: String,
    pub fix: Option<Fix>,
}

/// Replace the text at `span` with `replacement`. An empty span inserts.
#[derive(Debug, Clone, Serialize)]
pub struct Fix {
    pub span: Span,
    pub replacement: String,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            span: None,
            label: None,
            entity: None,
            related: Vec::new(),
            notes: Vec::new(),
            help: None,
        }
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    pub fn at(mut self, span: Span, label: impl Into<String>) -> Self {
        self.span = Some(span);
        self.label = Some(label.into());
        self
    }

    pub fn about(mut self, entity: Option<String>) -> Self {
        self.entity = entity;
        self
    }

    pub fn with_related(mut self, span: Span, message: impl Into<String>) -> Self {
        self.related.push(Related {
            span,
            message: message.into(),
        });
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, message: impl Into<String>) -> Self {
        self.help = Some(Help {
            message: message.into(),
            fix: None,
        });
        self
    }

    /// Attach a fix to the help message. Has no effect without one.
    pub fn with_fix(mut self, span: Span, replacement: impl Into<String>) -> Self {
        if let Some(help) = &mut self.help {
            help.fix = Some(Fix {
                span,
                replacement: replacement.into(),
            });
        }
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "error[{}]: {}", code, self.message),
            None => write!(f, "error: {}", self.message),
        }
    }
}

/// Convert a phase error into a diagnostic.
pub trait ToDiagnostic {
    fn to_diagnostic(&self) -> Diagnostic;
}

/// Convert every error of a phase.
pub fn to_diagnostics<'a, E: ToDiagnostic + 'a>(errors: impl IntoIterator<Item = &'a E>) -> Vec<Diagnostic> {
    errors.into_iter().map(ToDiagnostic::to_diagnostic).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fix_needs_help() {
        let diag = Diagnostic::error("missing `@`").with_fix(Span::new(3, 3), "@");
        assert!(diag.help.is_none());
        let diag = Diagnostic::error("missing `@`")
            .with_help("prefix the type with `@`")
            .with_fix(Span::new(3, 3), "@");
        assert_eq!(diag.help.and_then(|h| h.fix).map(|f| f.replacement), Some("@".to_string()));
    }

    #[test]
    fn display_with_and_without_code() {
        let diag = Diagnostic::error("loss of resource `r`");
        assert_eq!(diag.to_string(), "error: loss of resource `r`");
        assert_eq!(diag.with_code("E0801").to_string(), "error[E0801]: loss of resource `r`");
    }
}
