// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Arithmetic faults.

use thiserror::Error;

use crate::IntegerKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("arithmetic overflow: result does not fit in {kind}")]
    Overflow { kind: IntegerKind },

    #[error("arithmetic underflow: result does not fit in {kind}")]
    Underflow { kind: IntegerKind },

    #[error("division by zero")]
    DivisionByZero,

    /// Operands of different kinds. Elaborated programs never reach this.
    #[error("mismatched integer kinds: {left} and {right}")]
    KindMismatch { left: IntegerKind, right: IntegerKind },
}
