// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Storage indexing and reference expressions.

mod common;

use common::{check_errors, check_ok};
use flint_types::{Type, TypeError};

#[test]
fn storage_index_is_optional() {
    let program = check_ok("resource R {}\nlet x = storage[R]");
    let r = program.types.lookup("R").unwrap();
    assert_eq!(program.globals["x"].ty, Type::optional(Type::Composite(r)));
}

#[test]
fn reference_has_the_target_type() {
    let program = check_ok(
        r#"
        resource interface RI {}
        resource R: RI {}
        let ref = &storage[R] as RI
        let ref2: &RI = ref
        "#,
    );
    let ri = program.types.lookup("RI").unwrap();
    assert_eq!(program.globals["ref"].ty, Type::reference(Type::Interface(ri)));
    assert!(!program.types.is_resource(&program.globals["ref"].ty));
}

#[test]
fn reference_types_need_no_annotation() {
    check_ok("resource R {}\nfun test(r: &[R], s: [&R], t: &[&R]) {}");
}

#[test]
fn undeclared_referenced_type() {
    let errors = check_errors("fun test(r: &R) {}", 1);
    assert!(matches!(errors[0], TypeError::NotDeclared { ref name, .. } if name == "R"));
}

#[test]
fn undeclared_reference_target_is_reported_once() {
    let errors = check_errors("resource R {}\nlet ref = &storage[R] as X", 1);
    assert!(matches!(errors[0], TypeError::NotDeclared { ref name, .. } if name == "X"));
    let errors = check_errors("resource R {}\nlet ref = &storage[X] as R", 1);
    assert!(matches!(errors[0], TypeError::NotDeclared { ref name, .. } if name == "X"));
}

#[test]
fn members_through_references() {
    check_ok(
        r#"
        resource R {
            var x: Int

            init() {
                self.x = 0
            }

            fun setX(_ newX: Int) {
                self.x = newX
            }
        }

        fun test(): [Int] {
            var r: @R? <- create R()
            storage[R] <-> r
            destroy r

            let ref = &storage[R] as R
            let x1 = ref.x
            ref.x = 1
            let x2 = ref.x
            ref.setX(2)
            return [x1, x2]
        }
        "#,
    );
}

#[test]
fn indexing_through_references() {
    check_ok(
        r#"
        resource R {}

        fun test() {
            var rs: @[R]? <- [<-create R()]
            storage[[R]] <-> rs
            destroy rs

            let ref = &storage[[R]] as [R]
            var other <- create R()
            ref[0] <-> other
            destroy other
        }
        "#,
    );
    let errors = check_errors(
        r#"
        resource R {}

        fun test() {
            let ref = &storage[R] as R
            ref[0]
        }
        "#,
        1,
    );
    assert!(matches!(errors[0], TypeError::NotIndexable { .. }));
}

#[test]
fn interface_reference_exposes_only_interface_members() {
    check_ok(
        r#"
        resource interface I {
            fun foo()
        }

        resource R: I {
            fun foo() {}
        }

        fun test() {
            let ref = &storage[R] as I
            ref.foo()
        }
        "#,
    );
    let errors = check_errors(
        r#"
        resource interface I {}

        resource R: I {
            fun foo() {}
        }

        fun test() {
            let ref = &storage[R] as I
            ref.foo()
        }
        "#,
        1,
    );
    assert!(matches!(errors[0], TypeError::NotDeclaredMember { ref member, .. } if member == "foo"));
}

#[test]
fn swap_sides_must_agree() {
    let errors = check_errors(
        "resource R {}\nresource T {}\nfun f() {\n    var a <- create R()\n    var b <- create T()\n    a <-> b\n    destroy a\n    destroy b\n}",
        1,
    );
    assert!(matches!(errors[0], TypeError::Mismatch { .. }));
    let errors = check_errors("resource R {}\nfun f() {\n    var a <- create R()\n    a <-> create R()\n    destroy a\n}", 1);
    assert!(matches!(errors[0], TypeError::InvalidSwap { .. }));
}
