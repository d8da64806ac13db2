// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from phase error types to `Diagnostic`.

use flint_ast::Span;
use flint_interp::{RuntimeDiagnostic, RuntimeError};
use flint_numeric::ArithmeticError;
use flint_resources::{ResourceError, ResourceErrorKind};
use flint_types::TypeError;

use crate::{Diagnostic, ToDiagnostic};

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

// ============================================================================
// Lex Errors
// ============================================================================

impl ToDiagnostic for flint_lexer::LexError {
    fn to_diagnostic(&self) -> Diagnostic {
        let (code, label) = if self.message.starts_with("invalid escape") {
            ("E0003", "invalid escape")
        } else if self.message.starts_with("invalid number") {
            ("E0004", "invalid number")
        } else {
            ("E0001", "unexpected character")
        };
        let mut diag = Diagnostic::error(&self.message)
            .with_code(code)
            .at(self.span, label);

        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }

        diag
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

impl ToDiagnostic for flint_parser::ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(&self.message)
            .with_code("E0100")
            .at(self.span, "here");

        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }

        diag
    }
}

// ============================================================================
// Type Errors
// ============================================================================

impl ToDiagnostic for TypeError {
    fn to_diagnostic(&self) -> Diagnostic {
        use TypeError::*;

        let message = self.to_string();
        match self {
            Mismatch { expected, found, span } => Diagnostic::error("mismatched types")
                .with_code("E0300")
                .at(*span, format!("expected `{}`, found `{}`", expected, found)),

            NotDeclared { span, .. } => Diagnostic::error(message)
                .with_code("E0301")
                .at(*span, "not found in this scope"),

            NotDeclaredMember { span, .. } => Diagnostic::error(message)
                .with_code("E0302")
                .at(*span, "unknown member"),

            NotIndexable { span, .. } => Diagnostic::error(message)
                .with_code("E0303")
                .at(*span, "not an array"),

            NotCallable { span, .. } => Diagnostic::error(message)
                .with_code("E0304")
                .at(*span, "not a function"),

            ArityMismatch { expected, found, span } => Diagnostic::error(format!(
                "expected {} argument{}, found {}",
                expected,
                plural(*expected),
                found
            ))
            .with_code("E0305")
            .at(*span, format!("takes {} argument{}", expected, plural(*expected))),

            LiteralOutOfRange { kind, span, .. } => Diagnostic::error(message)
                .with_code("E0306")
                .at(*span, format!("does not fit in {}", kind)),

            Redeclaration { span, .. } => Diagnostic::error(message)
                .with_code("E0307")
                .at(*span, "declared again here"),

            AssignmentToConstant { name, span } => Diagnostic::error(message)
                .with_code("E0308")
                .at(*span, "cannot assign twice")
                .with_help(format!("declare `{}` with `var` to make it mutable", name)),

            InvalidAssignmentTarget { span } => Diagnostic::error(message)
                .with_code("E0309")
                .at(*span, "cannot be assigned to"),

            InvalidSwap { span } => Diagnostic::error(message)
                .with_code("E0310")
                .at(*span, "not a variable, field, element or storage slot"),

            MissingCreate { name, span } => Diagnostic::error(message)
                .with_code("E0311")
                .at(*span, "resource constructed here")
                .with_help(format!("write `create {}(...)`", name))
                .with_fix(Span::new(span.start, span.start), "create "),

            InvalidCreate { span, .. } => Diagnostic::error(message)
                .with_code("E0312")
                .at(*span, "not a resource"),

            InvalidDestroy { span, .. } => Diagnostic::error(message)
                .with_code("E0313")
                .at(*span, "only resources are destroyed"),

            MissingResourceAnnotation { span, .. } => Diagnostic::error(message)
                .with_code("E0314")
                .at(*span, "resource type")
                .with_help("prefix the type with `@`")
                .with_fix(Span::new(span.start, span.start), "@"),

            InvalidResourceAnnotation { span, .. } => Diagnostic::error(message)
                .with_code("E0315")
                .at(*span, "not a resource type"),

            ResourceFieldInStruct { span, .. } => Diagnostic::error(message)
                .with_code("E0316")
                .at(*span, "resource field")
                .with_help("declare the enclosing type as a `resource`"),

            ConformanceMismatch { span, .. } => Diagnostic::error(message)
                .with_code("E0317")
                .at(*span, "conformance declared here"),

            ControlFlowOutsideLoop { span, .. } => Diagnostic::error(message)
                .with_code("E0318")
                .at(*span, "not inside `while`"),

            MissingReturn { span, .. } => Diagnostic::error(message)
                .with_code("E0319")
                .at(*span, "function can end without returning"),

            InvalidOperands { span, .. } => Diagnostic::error(message)
                .with_code("E0320")
                .at(*span, "invalid operands"),
        }
    }
}

// ============================================================================
// Resource Errors
// ============================================================================

impl ToDiagnostic for ResourceError {
    fn to_diagnostic(&self) -> Diagnostic {
        use ResourceErrorKind::*;

        let message = self.kind.to_string();
        let diag = match &self.kind {
            UseOfInvalidatedResource { potentially, .. } => {
                let mut diag = Diagnostic::error(message)
                    .with_code("E0800")
                    .at(self.span, "used here");
                if let Some(moved_at) = self.invalidated_at {
                    let label = if *potentially {
                        "moved or destroyed here on some paths"
                    } else {
                        "moved or destroyed here"
                    };
                    diag = diag.with_related(moved_at, label);
                }
                if *potentially {
                    diag.with_note("the resource is moved or destroyed on some paths reaching this point")
                } else {
                    diag
                }
            }

            ResourceLoss { name, .. } => {
                let diag = Diagnostic::error(message)
                    .with_code("E0801")
                    .at(self.span, "resource dropped here");
                match name {
                    Some(name) => diag.with_help(format!("move `{}` somewhere or `destroy` it", name)),
                    None => diag.with_help("bind the resource or `destroy` it"),
                }
            }

            InvalidResourceReference => Diagnostic::error(message)
                .with_code("E0802")
                .at(self.span, "not a storage slot")
                .with_help("only `&storage[T]` can be referenced"),

            NonResourceReference { .. } => Diagnostic::error(message)
                .with_code("E0803")
                .at(self.span, "references are to resources"),

            TypeMismatch { expected, found } => Diagnostic::error(message)
                .with_code("E0804")
                .at(self.span, format!("`{}` does not implement `{}`", found, expected)),

            MissingMoveOperation => Diagnostic::error(message)
                .with_code("E0805")
                .at(self.span, "resource transferred here")
                .with_help("mark the transfer with `<-`"),

            IncorrectTransferOperation => Diagnostic::error(message)
                .with_code("E0806")
                .at(self.span, "not a resource")
                .with_help("use `=`"),

            InvalidMoveOperation => Diagnostic::error(message)
                .with_code("E0807")
                .at(self.span, "not a resource")
                .with_help("remove the `<-`"),

            InvalidNestedResourceMove => Diagnostic::error(message)
                .with_code("E0808")
                .at(self.span, "moved out of its container")
                .with_help("swap the resource out with `<->` instead"),
        };
        diag.about(self.entity.clone())
    }
}

// ============================================================================
// Runtime Errors
// ============================================================================

impl ToDiagnostic for RuntimeDiagnostic {
    fn to_diagnostic(&self) -> Diagnostic {
        let (code, label) = match &self.error {
            RuntimeError::Arithmetic(e) => match e {
                ArithmeticError::Overflow { .. } => ("E0900", "overflows here"),
                ArithmeticError::Underflow { .. } => ("E0901", "underflows here"),
                ArithmeticError::DivisionByZero => ("E0902", "divisor is zero"),
                ArithmeticError::KindMismatch { .. } => ("E0903", "operands differ in kind"),
            },
            RuntimeError::IndexOutOfBounds { .. } => ("E0904", "index out of bounds"),
            RuntimeError::DanglingReference { .. } => ("E0905", "slot is empty"),
            RuntimeError::UninitializedField { .. } => ("E0906", "field read here"),
            RuntimeError::InvalidatedValue => ("E0907", "value already moved"),
            RuntimeError::DuplicateResource { .. } => ("E0908", "would overwrite a resource"),
            RuntimeError::CallDepthExceeded { .. } => ("E0909", "called here"),
            RuntimeError::UndefinedFunction(_) => ("E0910", "no such function"),
            RuntimeError::ArityMismatch { .. } => ("E0911", "called here"),
            RuntimeError::TypeError(_) => ("E0912", "here"),
            RuntimeError::Return(_) | RuntimeError::Break | RuntimeError::Continue => ("E0913", "here"),
        };
        let entity = match &self.error {
            RuntimeError::DanglingReference { slot } | RuntimeError::DuplicateResource { slot } => Some(slot.clone()),
            RuntimeError::UninitializedField { field } => Some(field.clone()),
            RuntimeError::UndefinedFunction(name) => Some(name.clone()),
            _ => None,
        };
        Diagnostic::error(self.error.to_string())
            .with_code(code)
            .at(self.span, label)
            .about(entity)
    }
}
