// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Binary and unary operators.

use std::cmp::Ordering;

use flint_ast::expr::{BinOp, UnaryOp};
use flint_numeric::IntegerValue;

use crate::value::Value;

use super::{Interpreter, RuntimeError};

fn integers<'v>(op: BinOp, l: &'v Value, r: &'v Value) -> Result<(&'v IntegerValue, &'v IntegerValue), RuntimeError> {
    match (l, r) {
        (Value::Integer(a), Value::Integer(b)) => Ok((a, b)),
        _ => Err(RuntimeError::TypeError(format!(
            "cannot apply `{}` to {} and {}",
            op.symbol(),
            l.type_name(),
            r.type_name()
        ))),
    }
}

impl<'p> Interpreter<'p> {
    /// Evaluate a non-logical binary operation on evaluated operands.
    pub(super) fn eval_binop(&self, op: BinOp, l: Value, r: Value) -> Result<Value, RuntimeError> {
        match op {
            BinOp::Eq => return Ok(Value::Bool(l == r)),
            BinOp::Ne => return Ok(Value::Bool(l != r)),
            _ => {}
        }

        let (a, b) = integers(op, &l, &r)?;
        let value = match op {
            BinOp::Add => a.add(b)?,
            BinOp::Sub => a.sub(b)?,
            BinOp::Mul => a.mul(b)?,
            BinOp::Div => a.div(b)?,
            BinOp::Mod => a.rem(b)?,
            BinOp::BitAnd => a.bit_and(b)?,
            BinOp::BitOr => a.bit_or(b)?,
            BinOp::BitXor => a.bit_xor(b)?,
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                let ordering = a.compare(b)?;
                let result = match op {
                    BinOp::Lt => ordering == Ordering::Less,
                    BinOp::Le => ordering != Ordering::Greater,
                    BinOp::Gt => ordering == Ordering::Greater,
                    _ => ordering != Ordering::Less,
                };
                return Ok(Value::Bool(result));
            }
            BinOp::Eq | BinOp::Ne | BinOp::And | BinOp::Or => {
                return Err(RuntimeError::TypeError(format!("`{}` is not an arithmetic operator", op.symbol())));
            }
        };
        Ok(Value::Integer(value))
    }

    pub(super) fn eval_unop(&self, op: UnaryOp, value: Value) -> Result<Value, RuntimeError> {
        match (op, value) {
            (UnaryOp::Neg, Value::Integer(v)) => Ok(Value::Integer(v.neg()?)),
            (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
            (_, other) => Err(RuntimeError::TypeError(format!(
                "invalid operand {} for unary operator",
                other.type_name()
            ))),
        }
    }
}
