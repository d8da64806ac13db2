// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! `if`, `if let` and `while`.

mod common;

use common::{check_errors, check_ok};
use flint_numeric::IntegerKind;
use flint_types::{Type, TypeError};

#[test]
fn if_block_introduces_a_scope() {
    let errors = check_errors(
        r#"
        fun test() {
            if true {
                let x = 1
            }
            x
        }
        "#,
        1,
    );
    assert!(matches!(errors[0], TypeError::NotDeclared { ref name, .. } if name == "x"));
}

#[test]
fn if_condition_must_be_bool() {
    let errors = check_errors("fun test() {\n    if 1 {}\n}", 1);
    assert!(matches!(errors[0], TypeError::Mismatch { .. }));
}

#[test]
fn else_branch_is_checked() {
    let errors = check_errors("fun test() {\n    if true {} else {\n        x\n    }\n}", 1);
    assert!(matches!(errors[0], TypeError::NotDeclared { .. }));
}

#[test]
fn if_let_unwraps_one_optional_layer() {
    let program = check_ok(
        r#"
        fun test(): Int {
            let x: Int? = 1
            if var y = x {
                return y
            } else {
                return 0
            }
        }
        "#,
    );
    let bound: Vec<_> = program
        .binding_types
        .values()
        .filter(|ty| **ty == Type::Integer(IntegerKind::Int))
        .collect();
    assert_eq!(bound.len(), 1);
}

#[test]
fn if_let_binding_is_not_visible_in_else() {
    let errors = check_errors(
        r#"
        fun test() {
            let x: Int? = 1
            if var y = x {
            } else {
                y
            }
        }
        "#,
        1,
    );
    assert!(matches!(errors[0], TypeError::NotDeclared { ref name, .. } if name == "y"));
}

#[test]
fn if_let_on_nested_optional() {
    check_ok(
        r#"
        fun test(): Int? {
            let x: Int?? = 1
            if var y = x {
                return y
            }
            return nil
        }
        "#,
    );
    check_ok(
        r#"
        fun test() {
            let x: Int?? = 1
            if var y: Int? = x {
            }
        }
        "#,
    );
}

#[test]
fn if_let_requires_an_optional() {
    let errors = check_errors("fun test() {\n    let x: Int = 1\n    if var y = x {}\n}", 1);
    assert!(matches!(errors[0], TypeError::Mismatch { .. }));
}

#[test]
fn if_let_annotation_is_not_lifted() {
    let errors = check_errors("fun test() {\n    let x: Int? = 1\n    if var y: Int? = x {}\n}", 1);
    assert!(matches!(errors[0], TypeError::Mismatch { .. }));
}

#[test]
fn while_condition_and_loop_control() {
    check_ok(
        r#"
        fun count(): Int {
            var i = 0
            while i < 10 {
                if i == 5 {
                    break
                }
                i = i + 1
                continue
            }
            return i
        }
        "#,
    );
    let errors = check_errors("fun test() {\n    break\n}\nfun other() {\n    continue\n}", 2);
    assert!(errors
        .iter()
        .all(|e| matches!(e, TypeError::ControlFlowOutsideLoop { .. })));
}

#[test]
fn missing_return_on_some_path() {
    let errors = check_errors("fun test(): Int {\n    if true {\n        return 1\n    }\n}", 1);
    assert!(matches!(errors[0], TypeError::MissingReturn { ref function, .. } if function == "test"));
    check_ok("fun test(): Int {\n    if true {\n        return 1\n    } else {\n        return 2\n    }\n}");
}
