// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Integer evaluation and arithmetic faults.

mod common;

use common::{int, integer, program};
use flint_interp::{EvalConfig, Interpreter, RuntimeError, Value};
use flint_numeric::{ArithmeticError, IntegerKind};

#[test]
fn function_results() {
    let program = program("fun add(a: Int, b: Int): Int {\n    return a * 10 + b\n}");
    let mut interp = Interpreter::new(&program, EvalConfig::default()).unwrap();
    assert_eq!(interp.invoke("add", vec![int(4), int(2)]).unwrap(), int(42));
}

#[test]
fn unbounded_integers_do_not_overflow() {
    let program = program("fun square(x: Int): Int {\n    return x * x\n}");
    let mut interp = Interpreter::new(&program, EvalConfig::default()).unwrap();
    let big = interp.invoke("square", vec![int(i64::MAX)]).unwrap();
    assert_eq!(big.to_string(), "85070591730234615847396907784232501249");
}

#[test]
fn fixed_width_overflow_faults() {
    let program = program("fun inc(x: UInt8): UInt8 {\n    return x + 1\n}");
    let mut interp = Interpreter::new(&program, EvalConfig::default()).unwrap();
    assert_eq!(
        interp.invoke("inc", vec![integer(IntegerKind::UInt8, 254)]).unwrap(),
        integer(IntegerKind::UInt8, 255)
    );
    let err = interp.invoke("inc", vec![integer(IntegerKind::UInt8, 255)]).unwrap_err();
    assert!(matches!(
        err.error,
        RuntimeError::Arithmetic(ArithmeticError::Overflow { kind: IntegerKind::UInt8 })
    ));
}

#[test]
fn unsigned_subtraction_underflows() {
    let program = program("fun dec(x: UInt): UInt {\n    return x - 1\n}");
    let mut interp = Interpreter::new(&program, EvalConfig::default()).unwrap();
    let err = interp.invoke("dec", vec![integer(IntegerKind::UInt, 0)]).unwrap_err();
    assert!(matches!(err.error, RuntimeError::Arithmetic(ArithmeticError::Underflow { .. })));
}

#[test]
fn signed_division_edge_cases() {
    let program = program(
        r#"
        fun div(a: Int8, b: Int8): Int8 {
            return a / b
        }

        fun rem(a: Int8, b: Int8): Int8 {
            return a % b
        }
        "#,
    );
    let mut interp = Interpreter::new(&program, EvalConfig::default()).unwrap();
    let min = || integer(IntegerKind::Int8, -128);
    let minus_one = || integer(IntegerKind::Int8, -1);

    let err = interp.invoke("div", vec![min(), minus_one()]).unwrap_err();
    assert!(matches!(err.error, RuntimeError::Arithmetic(ArithmeticError::Overflow { .. })));
    assert_eq!(
        interp.invoke("rem", vec![min(), minus_one()]).unwrap(),
        integer(IntegerKind::Int8, 0)
    );
    let err = interp
        .invoke("div", vec![min(), integer(IntegerKind::Int8, 0)])
        .unwrap_err();
    assert!(matches!(err.error, RuntimeError::Arithmetic(ArithmeticError::DivisionByZero)));
}

#[test]
fn conversions_check_range() {
    let program = program("fun narrow(x: Int): UInt8 {\n    return UInt8(x)\n}");
    let mut interp = Interpreter::new(&program, EvalConfig::default()).unwrap();
    assert_eq!(
        interp.invoke("narrow", vec![int(200)]).unwrap(),
        integer(IntegerKind::UInt8, 200)
    );
    let err = interp.invoke("narrow", vec![int(300)]).unwrap_err();
    assert!(matches!(err.error, RuntimeError::Arithmetic(ArithmeticError::Overflow { .. })));
    assert!(interp.invoke("narrow", vec![int(-1)]).is_err());
}

#[test]
fn comparisons_and_logic() {
    let program = program(
        r#"
        fun between(x: Int, lo: Int, hi: Int): Bool {
            return lo <= x && x < hi
        }
        "#,
    );
    let mut interp = Interpreter::new(&program, EvalConfig::default()).unwrap();
    assert_eq!(interp.invoke("between", vec![int(3), int(1), int(5)]).unwrap(), Value::Bool(true));
    assert_eq!(interp.invoke("between", vec![int(5), int(1), int(5)]).unwrap(), Value::Bool(false));
}

#[test]
fn globals_are_evaluated_in_order() {
    let program = program("let a: UInt8 = 200\nlet b = a + 55\nvar total = 0");
    let interp = Interpreter::new(&program, EvalConfig::default()).unwrap();
    assert_eq!(interp.global("b"), Some(&integer(IntegerKind::UInt8, 255)));
    assert_eq!(interp.global("total"), Some(&int(0)));
}

#[test]
fn faulting_global_initializer() {
    let program = program("let a: UInt8 = 200\nlet b = a + 56");
    let err = Interpreter::new(&program, EvalConfig::default()).err().unwrap();
    assert!(matches!(err.error, RuntimeError::Arithmetic(ArithmeticError::Overflow { .. })));
}
