// SPDX-License-Identifier: (MIT OR Apache-2.0)
#![allow(dead_code)]

use flint_interp::{Program, Value};
use flint_numeric::{IntegerKind, IntegerValue};
use flint_resources::{check_resources, CheckerConfig};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}

/// Front end for test programs; the source must be free of errors.
pub fn program(src: &str) -> Program {
    init_tracing();
    let lexed = flint_lexer::Lexer::new(src).tokenize();
    assert!(lexed.is_ok(), "Lex errors: {:?}", lexed.errors);
    let parsed = flint_parser::Parser::new(lexed.tokens).parse();
    assert!(parsed.is_ok(), "Parse errors: {:?}", parsed.errors);
    let typed = match flint_types::typecheck(&parsed.decls) {
        Ok(typed) => typed,
        Err(errors) => panic!("Type errors: {:#?}", errors),
    };
    let resources = check_resources(&typed, &parsed.decls, &CheckerConfig::default());
    assert!(resources.is_ok(), "Resource errors: {:#?}", resources.errors);
    Program {
        decls: parsed.decls,
        typed,
    }
}

pub fn int(n: i64) -> Value {
    integer(IntegerKind::Int, n)
}

pub fn integer(kind: IntegerKind, n: i64) -> Value {
    Value::Integer(IntegerValue::from_i64(kind, n).unwrap())
}
