// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error hints - suggestions for fixing common mistakes.
//!
//! Kept separate from the main parser to avoid clutter.

use flint_ast::token::TokenKind;

/// Get a hint for an "expected X" error based on context.
pub fn for_expected(expected: &str, found: &TokenKind) -> Option<&'static str> {
    match (expected, found) {
        // Colon hints
        ("':'", TokenKind::Eq) => Some("use ':' for types, '=' for values"),
        ("':'", _) => Some("syntax: name: Type"),

        // Block hints
        ("'{'", _) => Some("blocks start with '{'"),
        ("'}'", _) => Some("every '{' needs a matching '}'"),

        // Parentheses hints
        ("'('", _) => Some("calls and initializers need parentheses"),
        ("')'", TokenKind::Eof) => Some("add ')' to close the parenthesis"),
        ("']'", TokenKind::Eof) => Some("add ']' to close the bracket"),

        // Transfer hints
        ("'=' or '<-'", TokenKind::Colon) => Some("a type annotation is written once: name: Type = value"),
        ("'=' or '<-'", _) => Some("resources are transferred with '<-', other values with '='"),
        ("'as'", _) => Some("references name their type: &storage[R] as &R"),

        // Expression hints
        ("expression", TokenKind::Eq) => Some("put the value after '='"),
        ("expression", TokenKind::Semi) => Some("statement is incomplete"),
        ("expression", TokenKind::Newline) => Some("statement is incomplete"),
        ("expression", _) => Some("try a value, variable, or function call"),

        // Name/identifier hints
        ("a name", TokenKind::Int(_)) => Some("names can't start with a number"),
        ("a name", _) => Some("names start with a letter or '_'"),

        // Type hints
        ("type", TokenKind::Resource) => Some("resource types are annotated with '@', e.g. @R"),
        ("type", _) => Some("try a type like 'Int', 'Bool', '@R' or '[Int]'"),

        // Declaration hints
        (s, _) if s.starts_with("declaration (") => {
            Some("start with 'fun', 'resource', 'struct', 'let' or 'var'")
        }
        (s, _) if s.starts_with("member (") => {
            Some("composites contain fields, an 'init' and 'fun' methods")
        }

        // Statement terminator
        ("newline or ';'", _) => Some("end statements with a newline or ';'"),

        _ => None,
    }
}
