// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Reference expressions `&e as T`.

mod common;

use common::{check_errors, check_ok};
use flint_resources::ResourceErrorKind;

fn kinds(src: &str, count: usize) -> Vec<ResourceErrorKind> {
    check_errors(src, count).into_iter().map(|e| e.kind).collect()
}

#[test]
fn reference_to_conforming_resource() {
    check_ok(
        r#"
        resource interface RI {}
        resource R: RI {}
        let ref = &storage[R] as RI
        "#,
    );
}

#[test]
fn reference_from_struct_to_resource() {
    let errors = kinds("struct R {}\nresource T {}\nlet ref = &storage[R] as T", 2);
    assert!(matches!(errors[0], ResourceErrorKind::NonResourceReference { ref ty } if ty == "R"));
    assert!(matches!(errors[1], ResourceErrorKind::TypeMismatch { .. }));
}

#[test]
fn reference_from_resource_to_struct() {
    let errors = kinds("resource R {}\nstruct T {}\nlet ref = &storage[R] as T", 2);
    assert!(matches!(errors[0], ResourceErrorKind::NonResourceReference { ref ty } if ty == "T"));
    assert_eq!(
        errors[1],
        ResourceErrorKind::TypeMismatch {
            expected: "T".to_string(),
            found: "R".to_string()
        }
    );
}

#[test]
fn reference_between_structs() {
    let errors = kinds("struct R {}\nstruct T {}\nlet ref = &storage[R] as T", 3);
    assert!(matches!(errors[0], ResourceErrorKind::NonResourceReference { .. }));
    assert!(matches!(errors[1], ResourceErrorKind::NonResourceReference { .. }));
    assert!(matches!(errors[2], ResourceErrorKind::TypeMismatch { .. }));
}

#[test]
fn reference_between_unrelated_resources() {
    let errors = kinds("resource R {}\nresource T {}\nlet ref = &storage[R] as T", 1);
    assert!(matches!(errors[0], ResourceErrorKind::TypeMismatch { .. }));
}

#[test]
fn reference_to_a_binding() {
    let errors = kinds("resource R {}\nlet r <- create R()\nlet ref = &r as R", 1);
    assert_eq!(errors[0], ResourceErrorKind::InvalidResourceReference);
}

#[test]
fn reference_to_an_array_element() {
    let errors = kinds(
        r#"
        resource R {}

        fun test() {
            let rs <- [<-create R()]
            let ref = &rs[0] as R
            destroy rs
        }
        "#,
        1,
    );
    assert_eq!(errors[0], ResourceErrorKind::InvalidResourceReference);
}

#[test]
fn indexing_a_reference_without_using_the_value() {
    let errors = kinds(
        r#"
        resource R {}

        fun test() {
            let ref = &storage[[R]] as [R]
            ref[0]
        }
        "#,
        1,
    );
    assert!(matches!(errors[0], ResourceErrorKind::ResourceLoss { name: None, .. }));
}

#[test]
fn swapping_through_a_reference() {
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
}

#[test]
fn moving_out_of_a_reference() {
    let errors = kinds(
        r#"
        resource R {}

        fun test() {
            let ref = &storage[[R]] as [R]
            let r <- ref[0]
            destroy r
        }
        "#,
        1,
    );
    assert_eq!(errors[0], ResourceErrorKind::InvalidNestedResourceMove);
}

#[test]
fn invalid_reference_names_the_binding() {
    let errors = check_errors("resource R {}\nlet r <- create R()\nlet ref = &r as R", 1);
    assert_eq!(errors[0].entity(), Some("r"));
}
