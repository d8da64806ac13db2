// SPDX-License-Identifier: (MIT OR Apache-2.0)

use flint_types::{typecheck, TypeError, TypedProgram};

pub fn check(src: &str) -> Result<TypedProgram, Vec<TypeError>> {
    let lexed = flint_lexer::Lexer::new(src).tokenize();
    assert!(lexed.is_ok(), "Lex errors: {:?}", lexed.errors);
    let parsed = flint_parser::Parser::new(lexed.tokens).parse();
    assert!(parsed.is_ok(), "Parse errors: {:?}", parsed.errors);
    typecheck(&parsed.decls)
}

pub fn check_ok(src: &str) -> TypedProgram {
    match check(src) {
        Ok(program) => program,
        Err(errors) => panic!("Type errors: {:#?}", errors),
    }
}

/// Type-check `src`, expecting exactly `count` errors.
pub fn check_errors(src: &str, count: usize) -> Vec<TypeError> {
    match check(src) {
        Ok(_) => panic!("Expected {} type errors, found none", count),
        Err(errors) => {
            assert_eq!(errors.len(), count, "Unexpected errors: {:#?}", errors);
            errors
        }
    }
}
