// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Resources, storage references and rollback.

mod common;

use common::{int, program};
use flint_interp::{EvalConfig, Interpreter, RuntimeError, Value};
use flint_numeric::ArithmeticError;

const TOKEN: &str = r#"
resource Token {
    var amount: Int

    init(amount: Int) {
        self.amount = amount
    }

    fun add(_ n: Int) {
        self.amount = self.amount + n
    }
}

fun deposit(amount: Int) {
    var token: @Token? <- create Token(amount)
    storage[Token] <-> token
    destroy token
}

fun balance(): Int {
    let ref = &storage[Token] as Token
    return ref.amount
}

fun topUp(n: Int) {
    let ref = &storage[Token] as Token
    ref.add(n)
}
"#;

#[test]
fn storage_starts_empty() {
    let program = program(TOKEN);
    let mut interp = Interpreter::new(&program, EvalConfig::default()).unwrap();
    assert!(interp.storage().is_empty());
    let err = interp.invoke("balance", vec![]).unwrap_err();
    assert!(matches!(err.error, RuntimeError::DanglingReference { ref slot } if slot == "Token"));
}

#[test]
fn swapping_into_storage() {
    let program = program(TOKEN);
    let mut interp = Interpreter::new(&program, EvalConfig::default()).unwrap();
    interp.invoke("deposit", vec![int(5)]).unwrap();
    assert_eq!(interp.storage().len(), 1);
    assert_eq!(interp.invoke("balance", vec![]).unwrap(), int(5));

    // The previous token comes back out of the slot and is destroyed.
    interp.invoke("deposit", vec![int(9)]).unwrap();
    assert_eq!(interp.storage().len(), 1);
    assert_eq!(interp.invoke("balance", vec![]).unwrap(), int(9));
}

#[test]
fn methods_mutate_through_references() {
    let program = program(TOKEN);
    let mut interp = Interpreter::new(&program, EvalConfig::default()).unwrap();
    interp.invoke("deposit", vec![int(5)]).unwrap();
    interp.invoke("topUp", vec![int(3)]).unwrap();
    interp.invoke("topUp", vec![int(2)]).unwrap();
    assert_eq!(interp.invoke("balance", vec![]).unwrap(), int(10));
    assert!(matches!(
        interp.storage().get("Token"),
        Some(Value::Composite { resource: Some(_), .. })
    ));
}

#[test]
fn faults_roll_back_storage_and_globals() {
    let src = format!(
        "{}\n{}",
        TOKEN,
        r#"
        var calls = 0

        fun bump(fail: Bool) {
            calls = calls + 1
            topUp(1)
            if fail {
                let x: UInt8 = 255
                let y = x + 1
            }
        }
        "#
    );
    let program = program(&src);
    let mut interp = Interpreter::new(&program, EvalConfig::default()).unwrap();
    interp.invoke("deposit", vec![int(1)]).unwrap();
    interp.invoke("bump", vec![Value::Bool(false)]).unwrap();
    assert_eq!(interp.global("calls"), Some(&int(1)));
    let before = interp.storage().clone();

    let err = interp.invoke("bump", vec![Value::Bool(true)]).unwrap_err();
    assert!(matches!(err.error, RuntimeError::Arithmetic(ArithmeticError::Overflow { .. })));
    assert_eq!(interp.global("calls"), Some(&int(1)));
    assert_eq!(interp.storage(), &before);
    assert_eq!(interp.invoke("balance", vec![]).unwrap(), int(2));
}

#[test]
fn interface_references_dispatch_to_the_stored_resource() {
    let program = program(
        r#"
        resource interface Vault {
            fun balance(): Int
        }

        resource Safe: Vault {
            var amount: Int

            init(amount: Int) {
                self.amount = amount
            }

            fun balance(): Int {
                return self.amount
            }
        }

        fun setup() {
            var safe: @Safe? <- create Safe(10)
            storage[Safe] <-> safe
            destroy safe
        }

        fun read(): Int {
            let ref = &storage[Safe] as Vault
            return ref.balance()
        }
        "#,
    );
    let mut interp = Interpreter::new(&program, EvalConfig::default()).unwrap();
    interp.invoke("setup", vec![]).unwrap();
    assert_eq!(interp.invoke("read", vec![]).unwrap(), int(10));
}

#[test]
fn arrays_in_storage() {
    let program = program(
        r#"
        resource R {
            let id: Int

            init(id: Int) {
                self.id = id
            }
        }

        fun setup() {
            var rs: @[R]? <- [<-create R(1), <-create R(2)]
            storage[[R]] <-> rs
            destroy rs
        }

        fun replaceFirst(id: Int): Int {
            let ref = &storage[[R]] as [R]
            var other <- create R(id)
            ref[0] <-> other
            let old = other.id
            destroy other
            return old
        }

        fun first(): Int {
            let ref = &storage[[R]] as [R]
            return ref[0].id
        }
        "#,
    );
    let mut interp = Interpreter::new(&program, EvalConfig::default()).unwrap();
    interp.invoke("setup", vec![]).unwrap();
    assert_eq!(interp.invoke("replaceFirst", vec![int(7)]).unwrap(), int(1));
    assert_eq!(interp.invoke("first", vec![]).unwrap(), int(7));
}

#[test]
fn resources_get_distinct_identities() {
    let program = program(
        r#"
        resource R {}

        let a <- create R()
        let b <- create R()
        "#,
    );
    let interp = Interpreter::new(&program, EvalConfig::default()).unwrap();
    let id = |name: &str| match interp.global(name) {
        Some(Value::Composite { resource, .. }) => *resource,
        other => panic!("expected a resource, found {:?}", other),
    };
    assert!(id("a").is_some());
    assert_ne!(id("a"), id("b"));
}
