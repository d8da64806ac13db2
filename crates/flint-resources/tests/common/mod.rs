// SPDX-License-Identifier: (MIT OR Apache-2.0)

use flint_resources::{check_resources, CheckerConfig, ResourceCheckResult, ResourceError};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}

pub fn check_with(src: &str, config: &CheckerConfig) -> ResourceCheckResult {
    init_tracing();
    let lexed = flint_lexer::Lexer::new(src).tokenize();
    assert!(lexed.is_ok(), "Lex errors: {:?}", lexed.errors);
    let parsed = flint_parser::Parser::new(lexed.tokens).parse();
    assert!(parsed.is_ok(), "Parse errors: {:?}", parsed.errors);
    let program = match flint_types::typecheck(&parsed.decls) {
        Ok(program) => program,
        Err(errors) => panic!("Type errors: {:#?}", errors),
    };
    check_resources(&program, &parsed.decls, config)
}

pub fn check(src: &str) -> ResourceCheckResult {
    check_with(src, &CheckerConfig::default())
}

pub fn check_ok(src: &str) {
    let result = check(src);
    assert!(result.is_ok(), "Resource errors: {:#?}", result.errors);
}

/// Check `src`, expecting exactly `count` resource errors.
pub fn check_errors(src: &str, count: usize) -> Vec<ResourceError> {
    let result = check(src);
    assert_eq!(result.errors.len(), count, "Unexpected errors: {:#?}", result.errors);
    result.errors
}
