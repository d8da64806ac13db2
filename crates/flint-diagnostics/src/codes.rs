// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error code registry.
//!
//! Maps error codes to titles and categories. Codes are grouped by phase:
//! E00xx lexer, E01xx parser, E03xx types, E08xx resources, E09xx runtime.

use std::collections::HashMap;

/// Registry of all known error codes.
pub struct ErrorCodeRegistry {
    codes: HashMap<&'static str, ErrorCodeInfo>,
}

/// Information about a single error code.
pub struct ErrorCodeInfo {
    pub code: &'static str,
    pub title: &'static str,
    pub category: ErrorCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Syntax,
    Type,
    Resource,
    Runtime,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Syntax => write!(f, "Syntax"),
            ErrorCategory::Type => write!(f, "Type"),
            ErrorCategory::Resource => write!(f, "Resource"),
            ErrorCategory::Runtime => write!(f, "Runtime"),
        }
    }
}

macro_rules! register_codes {
    ($($code:literal => ($title:literal, $cat:expr)),* $(,)?) => {{
        let mut map = HashMap::new();
        $(
            map.insert($code, ErrorCodeInfo {
                code: $code,
                title: $title,
                category: $cat,
            });
        )*
        map
    }};
}

impl Default for ErrorCodeRegistry {
    fn default() -> Self {
        use ErrorCategory::*;

        Self {
            codes: register_codes! {
                // Lexer errors (E00xx)
                "E0001" => ("unexpected character", Syntax),
                "E0003" => ("invalid escape sequence", Syntax),
                "E0004" => ("invalid number format", Syntax),

                // Parser errors (E01xx)
                "E0100" => ("unexpected token", Syntax),

                // Type errors (E03xx)
                "E0300" => ("mismatched types", Type),
                "E0301" => ("undeclared name", Type),
                "E0302" => ("no such member", Type),
                "E0303" => ("type cannot be indexed", Type),
                "E0304" => ("type is not callable", Type),
                "E0305" => ("arity mismatch", Type),
                "E0306" => ("literal out of range", Type),
                "E0307" => ("duplicate declaration", Type),
                "E0308" => ("assignment to constant", Type),
                "E0309" => ("invalid assignment target", Type),
                "E0310" => ("invalid swap", Type),
                "E0311" => ("resource constructed without `create`", Type),
                "E0312" => ("`create` on a non-resource", Type),
                "E0313" => ("destroy of a non-resource", Type),
                "E0314" => ("missing `@` annotation", Type),
                "E0315" => ("`@` on a non-resource", Type),
                "E0316" => ("resource field in struct", Type),
                "E0317" => ("interface not satisfied", Type),
                "E0318" => ("loop control outside of a loop", Type),
                "E0319" => ("missing return statement", Type),
                "E0320" => ("invalid operands", Type),

                // Resource errors (E08xx)
                "E0800" => ("use of invalidated resource", Resource),
                "E0801" => ("resource loss", Resource),
                "E0802" => ("reference to a resource outside storage", Resource),
                "E0803" => ("reference to a non-resource", Resource),
                "E0804" => ("reference type mismatch", Resource),
                "E0805" => ("missing move operator", Resource),
                "E0806" => ("move of a non-resource", Resource),
                "E0807" => ("`<-` on a non-resource", Resource),
                "E0808" => ("move out of a container", Resource),

                // Runtime errors (E09xx)
                "E0900" => ("arithmetic overflow", Runtime),
                "E0901" => ("arithmetic underflow", Runtime),
                "E0902" => ("division by zero", Runtime),
                "E0903" => ("mismatched integer kinds", Runtime),
                "E0904" => ("index out of bounds", Runtime),
                "E0905" => ("dangling storage reference", Runtime),
                "E0906" => ("uninitialized field", Runtime),
                "E0907" => ("use of moved value", Runtime),
                "E0908" => ("storage slot already occupied", Runtime),
                "E0909" => ("call depth exceeded", Runtime),
                "E0910" => ("undefined function", Runtime),
                "E0911" => ("arity mismatch", Runtime),
                "E0912" => ("ill-typed operands", Runtime),
                "E0913" => ("control flow escaped its function", Runtime),
            },
        }
    }
}

impl ErrorCodeRegistry {
    pub fn get(&self, code: &str) -> Option<&ErrorCodeInfo> {
        self.codes.get(code)
    }

    pub fn all(&self) -> impl Iterator<Item = &ErrorCodeInfo> {
        self.codes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_prefix_matches_category() {
        let registry = ErrorCodeRegistry::default();
        for info in registry.all() {
            let expected = match &info.code[..3] {
                "E00" | "E01" => ErrorCategory::Syntax,
                "E03" => ErrorCategory::Type,
                "E08" => ErrorCategory::Resource,
                "E09" => ErrorCategory::Runtime,
                other => panic!("unexpected code group {}", other),
            };
            assert_eq!(info.category, expected, "{}", info.code);
        }
    }

    #[test]
    fn lookup() {
        let registry = ErrorCodeRegistry::default();
        assert_eq!(registry.get("E0801").map(|i| i.title), Some("resource loss"));
        assert!(registry.get("E9999").is_none());
    }
}
