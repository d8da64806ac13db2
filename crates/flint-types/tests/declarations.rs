// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Composites, interfaces and resource annotations.

mod common;

use common::{check_errors, check_ok};
use flint_types::{Type, TypeDef, TypeError};

#[test]
fn composite_members_are_recorded_in_order() {
    let program = check_ok(
        r#"
        resource R {
            let id: Int
            var balance: UInt64

            init(id: Int) {
                self.id = id
                self.balance = 0
            }

            fun deposit(amount: UInt64) {
                self.balance = self.balance + amount
            }
        }
        "#,
    );
    let id = program.types.lookup("R").expect("R is declared");
    let TypeDef::Composite(def) = program.types.get(id) else {
        panic!("Expected composite");
    };
    let fields: Vec<_> = def.fields.keys().map(String::as_str).collect();
    assert_eq!(fields, vec!["id", "balance"]);
    assert_eq!(def.init.len(), 1);
    assert!(def.methods.contains_key("deposit"));
    assert!(program.types.is_resource(&Type::Composite(id)));
}

#[test]
fn constant_fields_are_assignable_only_in_init() {
    let errors = check_errors(
        r#"
        struct S {
            let x: Int

            init() {
                self.x = 1
            }

            fun reset() {
                self.x = 0
            }
        }
        "#,
        1,
    );
    assert!(matches!(errors[0], TypeError::AssignmentToConstant { ref name, .. } if name == "x"));
}

#[test]
fn resources_need_create() {
    let errors = check_errors("resource R {}\nfun f() {\n    let r <- R()\n    destroy r\n}", 1);
    assert!(matches!(errors[0], TypeError::MissingCreate { .. }));
    let errors = check_errors("struct S {}\nfun f() {\n    let s = create S()\n}", 1);
    assert!(matches!(errors[0], TypeError::InvalidCreate { .. }));
    check_ok("struct S {}\nfun f() {\n    let s = S()\n}");
}

#[test]
fn only_resources_can_be_destroyed() {
    let errors = check_errors("fun f() {\n    destroy 1\n}", 1);
    assert!(matches!(errors[0], TypeError::InvalidDestroy { .. }));
}

#[test]
fn resource_annotation_is_required_and_exclusive() {
    let errors = check_errors("resource R {}\nfun f(r: R) {\n    destroy r\n}", 1);
    assert!(matches!(errors[0], TypeError::MissingResourceAnnotation { .. }));
    let errors = check_errors("struct S {}\nfun f(s: @S) {}", 1);
    assert!(matches!(errors[0], TypeError::InvalidResourceAnnotation { .. }));
    check_ok("resource R {}\nfun f(rs: @[R]?) {\n    destroy rs\n}");
}

#[test]
fn structs_cannot_hold_resources() {
    let errors = check_errors("resource R {}\nstruct S {\n    let r: @R\n}", 1);
    assert!(matches!(
        errors[0],
        TypeError::ResourceFieldInStruct { ref composite, ref field, .. } if composite == "S" && field == "r"
    ));
}

#[test]
fn conformance_to_interfaces() {
    let program = check_ok(
        r#"
        resource interface RI {
            let x: Int
            fun get(): Int
        }

        resource R: RI {
            let x: Int

            init() {
                self.x = 1
            }

            fun get(): Int {
                return self.x
            }
        }
        "#,
    );
    let r = program.types.lookup("R").unwrap();
    let ri = program.types.lookup("RI").unwrap();
    assert!(program.types.conforms(r, ri));
    assert!(program
        .types
        .is_subtype(&Type::Composite(r), &Type::Interface(ri)));
}

#[test]
fn conformance_mismatches() {
    let errors = check_errors("resource interface I {\n    fun foo()\n}\nresource R: I {}", 1);
    assert!(matches!(errors[0], TypeError::ConformanceMismatch { ref reason, .. } if reason.contains("foo")));

    let errors = check_errors("resource interface I {}\nstruct S: I {}", 1);
    assert!(matches!(errors[0], TypeError::ConformanceMismatch { .. }));

    let errors = check_errors(
        "struct interface I {\n    var x: Int\n}\nstruct S: I {\n    let x: Int\n}",
        1,
    );
    assert!(matches!(errors[0], TypeError::ConformanceMismatch { ref reason, .. } if reason.contains("var")));

    let errors = check_errors("struct S: Missing {}", 1);
    assert!(matches!(errors[0], TypeError::NotDeclared { .. }));
}

#[test]
fn duplicate_declarations() {
    let errors = check_errors("struct S {}\nresource S {}\nfun f() {}\nfun f() {}", 2);
    assert!(errors
        .iter()
        .all(|e| matches!(e, TypeError::Redeclaration { .. })));
}
