// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Checked arithmetic shared by every fixed-width kind.
//!
//! Each Rust integer type backing a kind implements [`Fixed`]; the generic
//! operations below classify a failed checked operation into the
//! [`ArithmeticError`] the language reports.

use std::ops::{BitAnd, BitOr, BitXor};

use ethnum::{I256, U256};
use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;

use crate::{ArithmeticError, IntegerKind};

pub(crate) trait Fixed:
    Copy + Ord + BitAnd<Output = Self> + BitOr<Output = Self> + BitXor<Output = Self>
{
    const KIND: IntegerKind;
    const ZERO: Self;

    fn add_checked(self, rhs: Self) -> Option<Self>;
    fn sub_checked(self, rhs: Self) -> Option<Self>;
    fn mul_checked(self, rhs: Self) -> Option<Self>;
    fn div_checked(self, rhs: Self) -> Option<Self>;
    fn rem_checked(self, rhs: Self) -> Option<Self>;
    fn neg_checked(self) -> Option<Self>;
    fn is_minus_one(self) -> bool;

    fn to_bigint(self) -> BigInt;
    fn from_bigint(n: &BigInt) -> Option<Self>;
}

macro_rules! impl_fixed_primitive {
    ($($ty:ty => $kind:ident, $to:ident;)*) => {$(
        impl Fixed for $ty {
            const KIND: IntegerKind = IntegerKind::$kind;
            const ZERO: Self = 0;

            fn add_checked(self, rhs: Self) -> Option<Self> { self.checked_add(rhs) }
            fn sub_checked(self, rhs: Self) -> Option<Self> { self.checked_sub(rhs) }
            fn mul_checked(self, rhs: Self) -> Option<Self> { self.checked_mul(rhs) }
            fn div_checked(self, rhs: Self) -> Option<Self> { self.checked_div(rhs) }
            fn rem_checked(self, rhs: Self) -> Option<Self> { self.checked_rem(rhs) }
            fn neg_checked(self) -> Option<Self> { self.checked_neg() }

            fn is_minus_one(self) -> bool {
                self.checked_add(1) == Some(0)
            }

            fn to_bigint(self) -> BigInt {
                BigInt::from(self)
            }

            fn from_bigint(n: &BigInt) -> Option<Self> {
                n.$to()
            }
        }
    )*};
}

impl_fixed_primitive! {
    i8 => Int8, to_i8;
    i16 => Int16, to_i16;
    i32 => Int32, to_i32;
    i64 => Int64, to_i64;
    i128 => Int128, to_i128;
    u8 => UInt8, to_u8;
    u16 => UInt16, to_u16;
    u32 => UInt32, to_u32;
    u64 => UInt64, to_u64;
    u128 => UInt128, to_u128;
}

impl Fixed for I256 {
    const KIND: IntegerKind = IntegerKind::Int256;
    const ZERO: Self = I256::new(0);

    fn add_checked(self, rhs: Self) -> Option<Self> { self.checked_add(rhs) }
    fn sub_checked(self, rhs: Self) -> Option<Self> { self.checked_sub(rhs) }
    fn mul_checked(self, rhs: Self) -> Option<Self> { self.checked_mul(rhs) }
    fn div_checked(self, rhs: Self) -> Option<Self> { self.checked_div(rhs) }
    fn rem_checked(self, rhs: Self) -> Option<Self> { self.checked_rem(rhs) }
    fn neg_checked(self) -> Option<Self> { self.checked_neg() }

    fn is_minus_one(self) -> bool {
        self == I256::new(-1)
    }

    fn to_bigint(self) -> BigInt {
        BigInt::from_signed_bytes_be(&self.to_be_bytes())
    }

    fn from_bigint(n: &BigInt) -> Option<Self> {
        let bytes = n.to_signed_bytes_be();
        if bytes.len() > 32 {
            return None;
        }
        // Sign-extend into the full 32 bytes.
        let fill = if n.sign() == Sign::Minus { 0xff } else { 0x00 };
        let mut buf = [fill; 32];
        buf[32 - bytes.len()..].copy_from_slice(&bytes);
        Some(I256::from_be_bytes(buf))
    }
}

impl Fixed for U256 {
    const KIND: IntegerKind = IntegerKind::UInt256;
    const ZERO: Self = U256::new(0);

    fn add_checked(self, rhs: Self) -> Option<Self> { self.checked_add(rhs) }
    fn sub_checked(self, rhs: Self) -> Option<Self> { self.checked_sub(rhs) }
    fn mul_checked(self, rhs: Self) -> Option<Self> { self.checked_mul(rhs) }
    fn div_checked(self, rhs: Self) -> Option<Self> { self.checked_div(rhs) }
    fn rem_checked(self, rhs: Self) -> Option<Self> { self.checked_rem(rhs) }

    fn neg_checked(self) -> Option<Self> {
        (self == Self::ZERO).then_some(self)
    }

    fn is_minus_one(self) -> bool {
        false
    }

    fn to_bigint(self) -> BigInt {
        BigInt::from_bytes_be(Sign::Plus, &self.to_be_bytes())
    }

    fn from_bigint(n: &BigInt) -> Option<Self> {
        if n.sign() == Sign::Minus {
            return None;
        }
        let (_, bytes) = n.to_bytes_be();
        if bytes.len() > 32 {
            return None;
        }
        let mut buf = [0u8; 32];
        buf[32 - bytes.len()..].copy_from_slice(&bytes);
        Some(U256::from_be_bytes(buf))
    }
}

fn overflow<T: Fixed>() -> ArithmeticError {
    ArithmeticError::Overflow { kind: T::KIND }
}

/// Out of range below the minimum. Signed kinds report every range
/// violation as overflow.
fn below_min<T: Fixed>() -> ArithmeticError {
    if T::KIND.is_signed() {
        ArithmeticError::Overflow { kind: T::KIND }
    } else {
        ArithmeticError::Underflow { kind: T::KIND }
    }
}

pub(crate) fn add<T: Fixed>(a: T, b: T) -> Result<T, ArithmeticError> {
    a.add_checked(b).ok_or_else(overflow::<T>)
}

pub(crate) fn sub<T: Fixed>(a: T, b: T) -> Result<T, ArithmeticError> {
    a.sub_checked(b).ok_or_else(below_min::<T>)
}

pub(crate) fn mul<T: Fixed>(a: T, b: T) -> Result<T, ArithmeticError> {
    a.mul_checked(b).ok_or_else(overflow::<T>)
}

/// Truncating division. `MIN / -1` is the only overflowing case.
pub(crate) fn div<T: Fixed>(a: T, b: T) -> Result<T, ArithmeticError> {
    if b == T::ZERO {
        return Err(ArithmeticError::DivisionByZero);
    }
    a.div_checked(b).ok_or_else(overflow::<T>)
}

/// Remainder with the sign of the dividend. Never overflows: `MIN % -1`
/// is zero even though `MIN / -1` is not representable.
pub(crate) fn rem<T: Fixed>(a: T, b: T) -> Result<T, ArithmeticError> {
    if b == T::ZERO {
        return Err(ArithmeticError::DivisionByZero);
    }
    if b.is_minus_one() {
        return Ok(T::ZERO);
    }
    a.rem_checked(b).ok_or_else(overflow::<T>)
}

pub(crate) fn neg<T: Fixed>(a: T) -> Result<T, ArithmeticError> {
    a.neg_checked().ok_or_else(|| {
        if T::KIND.is_signed() {
            overflow::<T>()
        } else {
            ArithmeticError::Underflow { kind: T::KIND }
        }
    })
}

pub(crate) fn from_bigint<T: Fixed>(n: &BigInt) -> Result<T, ArithmeticError> {
    T::from_bigint(n).ok_or_else(|| {
        if n.sign() == Sign::Minus {
            below_min::<T>()
        } else {
            overflow::<T>()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i256_bigint_conversion_is_exact_at_the_edges() {
        for v in [I256::MIN, I256::MAX, I256::new(-1), I256::new(0), I256::new(1)] {
            let big = v.to_bigint();
            assert_eq!(<I256 as Fixed>::from_bigint(&big), Some(v));
        }
        let too_big = I256::MAX.to_bigint() + 1;
        assert_eq!(<I256 as Fixed>::from_bigint(&too_big), None);
        let too_small = I256::MIN.to_bigint() - 1;
        assert_eq!(<I256 as Fixed>::from_bigint(&too_small), None);
    }

    #[test]
    fn u256_bigint_conversion_is_exact_at_the_edges() {
        let max = U256::MAX.to_bigint();
        assert_eq!(max, (BigInt::from(1) << 256u32) - 1);
        assert_eq!(<U256 as Fixed>::from_bigint(&max), Some(U256::MAX));
        assert_eq!(<U256 as Fixed>::from_bigint(&(max + 1)), None);
        assert_eq!(<U256 as Fixed>::from_bigint(&BigInt::from(-1)), None);
    }

    #[test]
    fn failures_are_classified() {
        assert_eq!(add(i8::MAX, 1), Err(ArithmeticError::Overflow { kind: IntegerKind::Int8 }));
        assert_eq!(sub(i8::MIN, 1), Err(ArithmeticError::Overflow { kind: IntegerKind::Int8 }));
        assert_eq!(sub(0u8, 1), Err(ArithmeticError::Underflow { kind: IntegerKind::UInt8 }));
        assert_eq!(mul(i8::MIN, -1), Err(ArithmeticError::Overflow { kind: IntegerKind::Int8 }));
        assert_eq!(neg(i8::MIN), Err(ArithmeticError::Overflow { kind: IntegerKind::Int8 }));
        assert_eq!(neg(3u16), Err(ArithmeticError::Underflow { kind: IntegerKind::UInt16 }));
        assert_eq!(neg(0u16), Ok(0));
    }
}
