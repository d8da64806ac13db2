// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Property tests: checked operations agree with exact arithmetic.

use flint_numeric::{ArithmeticError, IntegerKind, IntegerValue};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use proptest::prelude::*;

/// Kinds small enough to be exercised through `i64` operands.
fn small_kind() -> impl Strategy<Value = IntegerKind> {
    prop_oneof![
        Just(IntegerKind::Int8),
        Just(IntegerKind::Int16),
        Just(IntegerKind::Int32),
        Just(IntegerKind::UInt8),
        Just(IntegerKind::UInt16),
        Just(IntegerKind::UInt32),
    ]
}

/// A kind together with two in-range operands.
fn operands() -> impl Strategy<Value = (IntegerKind, i64, i64)> {
    small_kind().prop_flat_map(|kind| {
        let lo: i64 = kind.min().and_then(|m| m.to_i64()).unwrap_or(0);
        let hi: i64 = kind.max().and_then(|m| m.to_i64()).unwrap_or(i64::MAX);
        (Just(kind), lo..=hi, lo..=hi)
    })
}

fn check(
    kind: IntegerKind,
    result: Result<IntegerValue, ArithmeticError>,
    exact: BigInt,
) -> Result<(), TestCaseError> {
    match result {
        Ok(v) => {
            prop_assert!(kind.contains(&exact));
            prop_assert_eq!(v.kind(), kind);
            prop_assert_eq!(v.to_bigint(), exact);
        }
        Err(ArithmeticError::Overflow { .. }) => {
            prop_assert!(!kind.contains(&exact));
            prop_assert!(kind.is_signed() || exact > BigInt::from(0));
        }
        Err(ArithmeticError::Underflow { .. }) => {
            prop_assert!(!kind.is_signed());
            prop_assert!(exact < BigInt::from(0));
        }
        Err(e) => prop_assert!(false, "unexpected error {}", e),
    }
    Ok(())
}

proptest! {
    #[test]
    fn add_sub_mul_succeed_iff_in_range((kind, a, b) in operands()) {
        let va = IntegerValue::from_i64(kind, a).unwrap();
        let vb = IntegerValue::from_i64(kind, b).unwrap();
        let (a, b) = (BigInt::from(a), BigInt::from(b));

        check(kind, va.add(&vb), &a + &b)?;
        check(kind, va.sub(&vb), &a - &b)?;
        check(kind, va.mul(&vb), &a * &b)?;
    }

    #[test]
    fn literal_round_trip_is_exact((kind, a, _b) in operands()) {
        let v = IntegerValue::from_i64(kind, a).unwrap();
        prop_assert_eq!(v.to_bigint(), BigInt::from(a));
        prop_assert_eq!(IntegerValue::from_bigint(kind, &v.to_bigint()), Ok(v));
    }

    #[test]
    fn modulo_never_overflows((kind, a, b) in operands()) {
        prop_assume!(b != 0);
        let va = IntegerValue::from_i64(kind, a).unwrap();
        let vb = IntegerValue::from_i64(kind, b).unwrap();
        let r = va.rem(&vb).unwrap();
        prop_assert_eq!(r.to_bigint(), BigInt::from(a % b));
    }

    #[test]
    fn wide_kinds_agree_with_bigint(a in any::<i128>(), b in any::<i128>()) {
        for kind in [IntegerKind::Int256, IntegerKind::Int] {
            let va = IntegerValue::from_bigint(kind, &BigInt::from(a)).unwrap();
            let vb = IntegerValue::from_bigint(kind, &BigInt::from(b)).unwrap();
            // Products of two i128 values always fit in 256 bits.
            prop_assert_eq!(va.mul(&vb).unwrap().to_bigint(), BigInt::from(a) * BigInt::from(b));
            prop_assert_eq!(va.add(&vb).unwrap().to_bigint(), BigInt::from(a) + BigInt::from(b));
        }
    }
}
