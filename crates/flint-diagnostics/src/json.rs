// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! JSON reports for tools.
//!
//! A report covers the phase that stopped the pipeline. Byte spans are
//! resolved to 1-based lines and columns, and a fix carries the line as it
//! reads once applied.

use flint_ast::Span;
use serde::Serialize;

use crate::codes::ErrorCodeRegistry;
use crate::Diagnostic;

#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    pub file: String,
    /// `lex`, `parse`, `typecheck`, `resources` or `runtime`.
    pub phase: String,
    pub success: bool,
    pub diagnostics: Vec<JsonDiagnostic>,
}

#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    /// Registry category, e.g. "Resource".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message: String,
    /// The resource, binding or function at fault.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at: Option<Located>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<Located>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<JsonFix>,
}

/// A span with the source around it.
#[derive(Debug, Serialize)]
pub struct Located {
    pub start: Position,
    pub end: Position,
    /// The line `start` lies on.
    pub source_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

#[derive(Debug, Serialize)]
pub struct JsonFix {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
    pub fixed_line: String,
}

/// Line starts of a source text.
struct LineIndex<'a> {
    source: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(source: &'a str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { source, starts }
    }

    /// Columns count characters, not bytes.
    fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = self.starts.partition_point(|&start| start <= offset).max(1);
        let start = self.starts[line - 1];
        let column = self.source.get(start..offset).map_or(offset - start, |s| s.chars().count()) + 1;
        Position { line, column, offset }
    }

    /// Text of a 1-based line, without its newline.
    fn line(&self, line: usize) -> &'a str {
        let Some(&start) = self.starts.get(line.wrapping_sub(1)) else {
            return "";
        };
        let end = self.starts.get(line).map_or(self.source.len(), |next| next - 1);
        self.source.get(start..end).unwrap_or("").trim_end_matches('\r')
    }

    fn locate(&self, span: Span, label: Option<String>) -> Located {
        let start = self.position(span.start);
        Located {
            start,
            end: self.position(span.end),
            source_line: self.line(start.line).to_string(),
            label,
        }
    }

    /// The line holding `span.start` with `replacement` spliced in.
    fn fixed_line(&self, span: Span, replacement: &str) -> String {
        let line = self.position(span.start).line;
        let text = self.line(line);
        let start = self.starts[line - 1];
        let from = span.start.saturating_sub(start).min(text.len());
        let to = span.end.saturating_sub(start).clamp(from, text.len());
        match (text.get(..from), text.get(to..)) {
            (Some(before), Some(after)) => format!("{}{}{}", before, replacement, after),
            _ => text.to_string(),
        }
    }
}

/// Resolve a phase's diagnostics against the source they came from.
pub fn to_json_report(diagnostics: &[Diagnostic], source: &str, file: &str, phase: &str) -> DiagnosticReport {
    let registry = ErrorCodeRegistry::default();
    let index = LineIndex::new(source);

    DiagnosticReport {
        file: file.to_string(),
        phase: phase.to_string(),
        success: diagnostics.is_empty(),
        diagnostics: diagnostics
            .iter()
            .map(|diag| JsonDiagnostic {
                code: diag.code,
                category: diag
                    .code
                    .and_then(|code| registry.get(code))
                    .map(|info| info.category.to_string()),
                message: diag.message.clone(),
                entity: diag.entity.clone(),
                at: diag.span.map(|span| index.locate(span, diag.label.clone())),
                related: diag
                    .related
                    .iter()
                    .map(|r| index.locate(r.span, Some(r.message.clone())))
                    .collect(),
                notes: diag.notes.clone(),
                help: diag.help.as_ref().map(|h| h.message.clone()),
                fix: diag.help.as_ref().and_then(|h| h.fix.as_ref()).map(|fix| JsonFix {
                    start: fix.span.start,
                    end: fix.span.end,
                    replacement: fix.replacement.clone(),
                    fixed_line: index.fixed_line(fix.span, &fix.replacement),
                }),
            })
            .collect(),
    }
}

/// Serialize a report to pretty JSON.
pub fn to_json_string(report: &DiagnosticReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}
