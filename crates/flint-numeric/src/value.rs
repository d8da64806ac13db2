// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Integer values tagged with their kind.

use std::cmp::Ordering;
use std::fmt;

use ethnum::{I256, U256};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

use crate::fixed;
use crate::{ArithmeticError, IntegerKind};

/// An integer of one of the language's kinds.
///
/// Fixed-width variants are always in range: every constructor and
/// operation checks, none wraps.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IntegerValue {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Int128(i128),
    Int256(I256),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    UInt128(u128),
    UInt256(U256),
    Int(BigInt),
    UInt(BigUint),
}

/// Apply a fixed-width operation to two operands of the same kind, or the
/// given unbounded operations to `Int`/`UInt` operands.
macro_rules! binary {
    ($lhs:expr, $rhs:expr, $fixed:path, $int:expr, $uint:expr) => {{
        use IntegerValue as V;
        match ($lhs, $rhs) {
            (V::Int8(a), V::Int8(b)) => $fixed(*a, *b).map(V::Int8),
            (V::Int16(a), V::Int16(b)) => $fixed(*a, *b).map(V::Int16),
            (V::Int32(a), V::Int32(b)) => $fixed(*a, *b).map(V::Int32),
            (V::Int64(a), V::Int64(b)) => $fixed(*a, *b).map(V::Int64),
            (V::Int128(a), V::Int128(b)) => $fixed(*a, *b).map(V::Int128),
            (V::Int256(a), V::Int256(b)) => $fixed(*a, *b).map(V::Int256),
            (V::UInt8(a), V::UInt8(b)) => $fixed(*a, *b).map(V::UInt8),
            (V::UInt16(a), V::UInt16(b)) => $fixed(*a, *b).map(V::UInt16),
            (V::UInt32(a), V::UInt32(b)) => $fixed(*a, *b).map(V::UInt32),
            (V::UInt64(a), V::UInt64(b)) => $fixed(*a, *b).map(V::UInt64),
            (V::UInt128(a), V::UInt128(b)) => $fixed(*a, *b).map(V::UInt128),
            (V::UInt256(a), V::UInt256(b)) => $fixed(*a, *b).map(V::UInt256),
            (V::Int(a), V::Int(b)) => ($int)(a, b).map(V::Int),
            (V::UInt(a), V::UInt(b)) => ($uint)(a, b).map(V::UInt),
            (a, b) => Err(ArithmeticError::KindMismatch { left: a.kind(), right: b.kind() }),
        }
    }};
}

/// Apply a bitwise operator to two operands of the same kind.
macro_rules! bitwise {
    ($lhs:expr, $rhs:expr, $op:tt) => {{
        use IntegerValue as V;
        match ($lhs, $rhs) {
            (V::Int8(a), V::Int8(b)) => Ok(V::Int8(*a $op *b)),
            (V::Int16(a), V::Int16(b)) => Ok(V::Int16(*a $op *b)),
            (V::Int32(a), V::Int32(b)) => Ok(V::Int32(*a $op *b)),
            (V::Int64(a), V::Int64(b)) => Ok(V::Int64(*a $op *b)),
            (V::Int128(a), V::Int128(b)) => Ok(V::Int128(*a $op *b)),
            (V::Int256(a), V::Int256(b)) => Ok(V::Int256(*a $op *b)),
            (V::UInt8(a), V::UInt8(b)) => Ok(V::UInt8(*a $op *b)),
            (V::UInt16(a), V::UInt16(b)) => Ok(V::UInt16(*a $op *b)),
            (V::UInt32(a), V::UInt32(b)) => Ok(V::UInt32(*a $op *b)),
            (V::UInt64(a), V::UInt64(b)) => Ok(V::UInt64(*a $op *b)),
            (V::UInt128(a), V::UInt128(b)) => Ok(V::UInt128(*a $op *b)),
            (V::UInt256(a), V::UInt256(b)) => Ok(V::UInt256(*a $op *b)),
            (V::Int(a), V::Int(b)) => Ok(V::Int(a $op b)),
            (V::UInt(a), V::UInt(b)) => Ok(V::UInt(a $op b)),
            (a, b) => Err(ArithmeticError::KindMismatch { left: a.kind(), right: b.kind() }),
        }
    }};
}

fn big_div(a: &BigInt, b: &BigInt) -> Result<BigInt, ArithmeticError> {
    if b.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    Ok(a / b)
}

fn big_rem(a: &BigInt, b: &BigInt) -> Result<BigInt, ArithmeticError> {
    if b.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    Ok(a % b)
}

fn biguint_div(a: &BigUint, b: &BigUint) -> Result<BigUint, ArithmeticError> {
    if b.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    Ok(a / b)
}

fn biguint_rem(a: &BigUint, b: &BigUint) -> Result<BigUint, ArithmeticError> {
    if b.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    Ok(a % b)
}

impl IntegerValue {
    pub fn kind(&self) -> IntegerKind {
        match self {
            IntegerValue::Int8(_) => IntegerKind::Int8,
            IntegerValue::Int16(_) => IntegerKind::Int16,
            IntegerValue::Int32(_) => IntegerKind::Int32,
            IntegerValue::Int64(_) => IntegerKind::Int64,
            IntegerValue::Int128(_) => IntegerKind::Int128,
            IntegerValue::Int256(_) => IntegerKind::Int256,
            IntegerValue::UInt8(_) => IntegerKind::UInt8,
            IntegerValue::UInt16(_) => IntegerKind::UInt16,
            IntegerValue::UInt32(_) => IntegerKind::UInt32,
            IntegerValue::UInt64(_) => IntegerKind::UInt64,
            IntegerValue::UInt128(_) => IntegerKind::UInt128,
            IntegerValue::UInt256(_) => IntegerKind::UInt256,
            IntegerValue::Int(_) => IntegerKind::Int,
            IntegerValue::UInt(_) => IntegerKind::UInt,
        }
    }

    /// Construct a value of `kind` from an exact integer, failing when it
    /// does not fit.
    pub fn from_bigint(kind: IntegerKind, n: &BigInt) -> Result<IntegerValue, ArithmeticError> {
        Ok(match kind {
            IntegerKind::Int8 => IntegerValue::Int8(fixed::from_bigint(n)?),
            IntegerKind::Int16 => IntegerValue::Int16(fixed::from_bigint(n)?),
            IntegerKind::Int32 => IntegerValue::Int32(fixed::from_bigint(n)?),
            IntegerKind::Int64 => IntegerValue::Int64(fixed::from_bigint(n)?),
            IntegerKind::Int128 => IntegerValue::Int128(fixed::from_bigint(n)?),
            IntegerKind::Int256 => IntegerValue::Int256(fixed::from_bigint(n)?),
            IntegerKind::UInt8 => IntegerValue::UInt8(fixed::from_bigint(n)?),
            IntegerKind::UInt16 => IntegerValue::UInt16(fixed::from_bigint(n)?),
            IntegerKind::UInt32 => IntegerValue::UInt32(fixed::from_bigint(n)?),
            IntegerKind::UInt64 => IntegerValue::UInt64(fixed::from_bigint(n)?),
            IntegerKind::UInt128 => IntegerValue::UInt128(fixed::from_bigint(n)?),
            IntegerKind::UInt256 => IntegerValue::UInt256(fixed::from_bigint(n)?),
            IntegerKind::Int => IntegerValue::Int(n.clone()),
            IntegerKind::UInt => match n.to_biguint() {
                Some(u) => IntegerValue::UInt(u),
                None => return Err(ArithmeticError::Underflow { kind: IntegerKind::UInt }),
            },
        })
    }

    /// Shorthand for small constants such as array lengths.
    pub fn from_i64(kind: IntegerKind, n: i64) -> Result<IntegerValue, ArithmeticError> {
        IntegerValue::from_bigint(kind, &BigInt::from(n))
    }

    pub fn zero(kind: IntegerKind) -> IntegerValue {
        match kind {
            IntegerKind::Int8 => IntegerValue::Int8(0),
            IntegerKind::Int16 => IntegerValue::Int16(0),
            IntegerKind::Int32 => IntegerValue::Int32(0),
            IntegerKind::Int64 => IntegerValue::Int64(0),
            IntegerKind::Int128 => IntegerValue::Int128(0),
            IntegerKind::Int256 => IntegerValue::Int256(I256::new(0)),
            IntegerKind::UInt8 => IntegerValue::UInt8(0),
            IntegerKind::UInt16 => IntegerValue::UInt16(0),
            IntegerKind::UInt32 => IntegerValue::UInt32(0),
            IntegerKind::UInt64 => IntegerValue::UInt64(0),
            IntegerKind::UInt128 => IntegerValue::UInt128(0),
            IntegerKind::UInt256 => IntegerValue::UInt256(U256::new(0)),
            IntegerKind::Int => IntegerValue::Int(BigInt::zero()),
            IntegerKind::UInt => IntegerValue::UInt(BigUint::zero()),
        }
    }

    /// The exact mathematical value.
    pub fn to_bigint(&self) -> BigInt {
        use fixed::Fixed;
        match self {
            IntegerValue::Int8(v) => v.to_bigint(),
            IntegerValue::Int16(v) => v.to_bigint(),
            IntegerValue::Int32(v) => v.to_bigint(),
            IntegerValue::Int64(v) => v.to_bigint(),
            IntegerValue::Int128(v) => v.to_bigint(),
            IntegerValue::Int256(v) => v.to_bigint(),
            IntegerValue::UInt8(v) => v.to_bigint(),
            IntegerValue::UInt16(v) => v.to_bigint(),
            IntegerValue::UInt32(v) => v.to_bigint(),
            IntegerValue::UInt64(v) => v.to_bigint(),
            IntegerValue::UInt128(v) => v.to_bigint(),
            IntegerValue::UInt256(v) => v.to_bigint(),
            IntegerValue::Int(v) => v.clone(),
            IntegerValue::UInt(v) => BigInt::from_biguint(Sign::Plus, v.clone()),
        }
    }

    /// Re-construct the value in another kind, with the same range checks
    /// as construction from a literal.
    pub fn convert(&self, kind: IntegerKind) -> Result<IntegerValue, ArithmeticError> {
        if self.kind() == kind {
            return Ok(self.clone());
        }
        IntegerValue::from_bigint(kind, &self.to_bigint())
    }

    pub fn is_zero(&self) -> bool {
        self.to_bigint().is_zero()
    }

    pub fn add(&self, other: &IntegerValue) -> Result<IntegerValue, ArithmeticError> {
        binary!(
            self,
            other,
            fixed::add,
            |a: &BigInt, b: &BigInt| Ok::<_, ArithmeticError>(a + b),
            |a: &BigUint, b: &BigUint| Ok::<_, ArithmeticError>(a + b)
        )
    }

    pub fn sub(&self, other: &IntegerValue) -> Result<IntegerValue, ArithmeticError> {
        binary!(
            self,
            other,
            fixed::sub,
            |a: &BigInt, b: &BigInt| Ok::<_, ArithmeticError>(a - b),
            |a: &BigUint, b: &BigUint| {
                if b > a {
                    Err(ArithmeticError::Underflow { kind: IntegerKind::UInt })
                } else {
                    Ok(a - b)
                }
            }
        )
    }

    pub fn mul(&self, other: &IntegerValue) -> Result<IntegerValue, ArithmeticError> {
        binary!(
            self,
            other,
            fixed::mul,
            |a: &BigInt, b: &BigInt| Ok::<_, ArithmeticError>(a * b),
            |a: &BigUint, b: &BigUint| Ok::<_, ArithmeticError>(a * b)
        )
    }

    pub fn div(&self, other: &IntegerValue) -> Result<IntegerValue, ArithmeticError> {
        binary!(self, other, fixed::div, big_div, biguint_div)
    }

    pub fn rem(&self, other: &IntegerValue) -> Result<IntegerValue, ArithmeticError> {
        binary!(self, other, fixed::rem, big_rem, biguint_rem)
    }

    pub fn neg(&self) -> Result<IntegerValue, ArithmeticError> {
        Ok(match self {
            IntegerValue::Int8(v) => IntegerValue::Int8(fixed::neg(*v)?),
            IntegerValue::Int16(v) => IntegerValue::Int16(fixed::neg(*v)?),
            IntegerValue::Int32(v) => IntegerValue::Int32(fixed::neg(*v)?),
            IntegerValue::Int64(v) => IntegerValue::Int64(fixed::neg(*v)?),
            IntegerValue::Int128(v) => IntegerValue::Int128(fixed::neg(*v)?),
            IntegerValue::Int256(v) => IntegerValue::Int256(fixed::neg(*v)?),
            IntegerValue::UInt8(v) => IntegerValue::UInt8(fixed::neg(*v)?),
            IntegerValue::UInt16(v) => IntegerValue::UInt16(fixed::neg(*v)?),
            IntegerValue::UInt32(v) => IntegerValue::UInt32(fixed::neg(*v)?),
            IntegerValue::UInt64(v) => IntegerValue::UInt64(fixed::neg(*v)?),
            IntegerValue::UInt128(v) => IntegerValue::UInt128(fixed::neg(*v)?),
            IntegerValue::UInt256(v) => IntegerValue::UInt256(fixed::neg(*v)?),
            IntegerValue::Int(v) => IntegerValue::Int(-v),
            IntegerValue::UInt(v) if v.is_zero() => IntegerValue::UInt(v.clone()),
            IntegerValue::UInt(_) => return Err(ArithmeticError::Underflow { kind: IntegerKind::UInt }),
        })
    }

    pub fn bit_and(&self, other: &IntegerValue) -> Result<IntegerValue, ArithmeticError> {
        bitwise!(self, other, &)
    }

    pub fn bit_or(&self, other: &IntegerValue) -> Result<IntegerValue, ArithmeticError> {
        bitwise!(self, other, |)
    }

    pub fn bit_xor(&self, other: &IntegerValue) -> Result<IntegerValue, ArithmeticError> {
        bitwise!(self, other, ^)
    }

    /// Order two values of the same kind.
    pub fn compare(&self, other: &IntegerValue) -> Result<Ordering, ArithmeticError> {
        use IntegerValue as V;
        Ok(match (self, other) {
            (V::Int8(a), V::Int8(b)) => a.cmp(b),
            (V::Int16(a), V::Int16(b)) => a.cmp(b),
            (V::Int32(a), V::Int32(b)) => a.cmp(b),
            (V::Int64(a), V::Int64(b)) => a.cmp(b),
            (V::Int128(a), V::Int128(b)) => a.cmp(b),
            (V::Int256(a), V::Int256(b)) => a.cmp(b),
            (V::UInt8(a), V::UInt8(b)) => a.cmp(b),
            (V::UInt16(a), V::UInt16(b)) => a.cmp(b),
            (V::UInt32(a), V::UInt32(b)) => a.cmp(b),
            (V::UInt64(a), V::UInt64(b)) => a.cmp(b),
            (V::UInt128(a), V::UInt128(b)) => a.cmp(b),
            (V::UInt256(a), V::UInt256(b)) => a.cmp(b),
            (V::Int(a), V::Int(b)) => a.cmp(b),
            (V::UInt(a), V::UInt(b)) => a.cmp(b),
            (a, b) => return Err(ArithmeticError::KindMismatch { left: a.kind(), right: b.kind() }),
        })
    }
}

impl fmt::Display for IntegerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegerValue::Int8(v) => write!(f, "{}", v),
            IntegerValue::Int16(v) => write!(f, "{}", v),
            IntegerValue::Int32(v) => write!(f, "{}", v),
            IntegerValue::Int64(v) => write!(f, "{}", v),
            IntegerValue::Int128(v) => write!(f, "{}", v),
            IntegerValue::Int256(v) => write!(f, "{}", v),
            IntegerValue::UInt8(v) => write!(f, "{}", v),
            IntegerValue::UInt16(v) => write!(f, "{}", v),
            IntegerValue::UInt32(v) => write!(f, "{}", v),
            IntegerValue::UInt64(v) => write!(f, "{}", v),
            IntegerValue::UInt128(v) => write!(f, "{}", v),
            IntegerValue::UInt256(v) => write!(f, "{}", v),
            IntegerValue::Int(v) => write!(f, "{}", v),
            IntegerValue::UInt(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(kind: IntegerKind, n: i64) -> IntegerValue {
        IntegerValue::from_i64(kind, n).unwrap()
    }

    #[test]
    fn construction_checks_range() {
        assert_eq!(
            IntegerValue::from_i64(IntegerKind::UInt8, 256),
            Err(ArithmeticError::Overflow { kind: IntegerKind::UInt8 })
        );
        assert_eq!(
            IntegerValue::from_i64(IntegerKind::UInt8, -1),
            Err(ArithmeticError::Underflow { kind: IntegerKind::UInt8 })
        );
        assert_eq!(
            IntegerValue::from_i64(IntegerKind::Int8, -129),
            Err(ArithmeticError::Overflow { kind: IntegerKind::Int8 })
        );
        assert_eq!(
            IntegerValue::from_i64(IntegerKind::UInt, -1),
            Err(ArithmeticError::Underflow { kind: IntegerKind::UInt })
        );
        assert_eq!(int(IntegerKind::Int8, -128), IntegerValue::Int8(-128));
    }

    #[test]
    fn eight_bit_boundaries() {
        let u = |n| int(IntegerKind::UInt8, n);
        let i = |n| int(IntegerKind::Int8, n);

        assert!(u(255).add(&u(1)).is_err());
        assert_eq!(u(255).add(&u(0)), Ok(u(255)));
        assert_eq!(
            u(0).sub(&u(1)),
            Err(ArithmeticError::Underflow { kind: IntegerKind::UInt8 })
        );
        assert!(i(-128).sub(&i(1)).is_err());
        assert!(i(127).add(&i(1)).is_err());
        assert!(i(-128).mul(&i(-1)).is_err());
        assert_eq!(i(-128).div(&i(1)), Ok(i(-128)));
    }

    #[test]
    fn unbounded_uint_underflows() {
        let u = |n| int(IntegerKind::UInt, n);
        assert_eq!(
            u(1).sub(&u(2)),
            Err(ArithmeticError::Underflow { kind: IntegerKind::UInt })
        );
        assert_eq!(u(2).sub(&u(2)), Ok(u(0)));
    }

    #[test]
    fn unbounded_int_never_overflows() {
        let big = IntegerValue::Int(BigInt::from(1) << 300u32);
        let product = big.mul(&big).unwrap();
        assert_eq!(product.to_bigint(), BigInt::from(1) << 600u32);
        assert_eq!(
            big.div(&IntegerValue::zero(IntegerKind::Int)),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn kind_mismatch() {
        assert_eq!(
            int(IntegerKind::Int8, 1).add(&int(IntegerKind::Int16, 1)),
            Err(ArithmeticError::KindMismatch { left: IntegerKind::Int8, right: IntegerKind::Int16 })
        );
    }

    #[test]
    fn bitwise_uses_twos_complement() {
        let i = |n| int(IntegerKind::Int8, n);
        assert_eq!(i(-1).bit_and(&i(0x0f)), Ok(i(0x0f)));
        assert_eq!(i(-128).bit_xor(&i(-1)), Ok(i(127)));
        let big = |n| int(IntegerKind::Int, n);
        assert_eq!(big(-1).bit_and(&big(0x0f)), Ok(big(0x0f)));
    }

    #[test]
    fn conversion() {
        let v = int(IntegerKind::Int, 200);
        assert_eq!(v.convert(IntegerKind::UInt8), Ok(IntegerValue::UInt8(200)));
        assert_eq!(
            v.convert(IntegerKind::Int8),
            Err(ArithmeticError::Overflow { kind: IntegerKind::Int8 })
        );
        assert_eq!(
            int(IntegerKind::Int, -5).convert(IntegerKind::UInt64),
            Err(ArithmeticError::Underflow { kind: IntegerKind::UInt64 })
        );
    }

    #[test]
    fn negate() {
        assert_eq!(int(IntegerKind::Int8, 5).neg(), Ok(int(IntegerKind::Int8, -5)));
        assert!(int(IntegerKind::Int8, -128).neg().is_err());
        assert_eq!(int(IntegerKind::Int, -5).neg(), Ok(int(IntegerKind::Int, 5)));
    }

    #[test]
    fn compare() {
        assert_eq!(
            int(IntegerKind::Int256, -1).compare(&int(IntegerKind::Int256, 1)),
            Ok(Ordering::Less)
        );
        assert!(int(IntegerKind::Int8, 1).compare(&int(IntegerKind::UInt8, 1)).is_err());
    }
}
