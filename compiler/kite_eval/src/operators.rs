//! Binary and unary operator semantics.
//!
//! Comparisons promote one operand to the other's type (see [`Promote`]).
//! Arithmetic works in Float when either side is a Float and in wrapping
//! Int otherwise. A String left operand turns `+` into concatenation and
//! makes the other arithmetic operators yield `Void`.

use kite_ir::ast::{BinaryOp, UnaryOp, UpdateOp};
use kite_value::{division_by_zero, modulo_by_zero, Comparison, EvalError, Value};
use std::borrow::Cow;

/// Which operand a comparison converts to the other's type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Promote {
    /// Cast the left operand; used when only the left side is a literal.
    Left,
    Right,
}

impl Promote {
    /// Promote away from constant literals.
    pub fn for_operands(left_is_literal: bool, right_is_literal: bool) -> Promote {
        if left_is_literal && !right_is_literal {
            Promote::Left
        } else {
            Promote::Right
        }
    }
}

/// Evaluate a binary operator on two evaluated operands.
///
/// `&&` and `||` are accepted for completeness; the evaluator
/// short-circuits them before reaching here.
pub fn evaluate_binary(
    op: BinaryOp,
    left: Value,
    right: Value,
    promote: Promote,
) -> Result<Value, EvalError> {
    if op.is_comparison() {
        let ordering = compare_values(&left, &right, promote);
        return Ok(Value::Bool(comparison_holds(op, ordering)));
    }
    match op {
        BinaryOp::And => Ok(Value::Bool(left.to_bool() && right.to_bool())),
        BinaryOp::Or => Ok(Value::Bool(left.to_bool() || right.to_bool())),
        BinaryOp::BitAnd
        | BinaryOp::BitOr
        | BinaryOp::BitXor
        | BinaryOp::Shl
        | BinaryOp::Shr => Ok(Value::Int(bitwise(op, left.to_int(), right.to_int()))),
        _ => arithmetic(op, left, right),
    }
}

/// Compare after promoting one side. A promotion that cannot be performed
/// (toward a function or resource) compares as unknown.
pub fn compare_values(left: &Value, right: &Value, promote: Promote) -> Comparison {
    if left.type_tag() == right.type_tag() {
        return left.compare(right);
    }
    let (left, right): (Cow<'_, Value>, Cow<'_, Value>) = match promote {
        Promote::Left => match left.cast(right.type_tag()) {
            Ok(cast) => (Cow::Owned(cast), Cow::Borrowed(right)),
            Err(_) => return Comparison::Unknown,
        },
        Promote::Right => match right.cast(left.type_tag()) {
            Ok(cast) => (Cow::Borrowed(left), Cow::Owned(cast)),
            Err(_) => return Comparison::Unknown,
        },
    };
    left.compare(&right)
}

/// Map an ordering to the truth of a comparison operator. Unknown orderings
/// make every operator false except `!=`.
pub(crate) fn comparison_holds(op: BinaryOp, ordering: Comparison) -> bool {
    use Comparison::{Equal, Larger, Smaller, Unknown};
    match op {
        BinaryOp::Eq => ordering == Equal,
        BinaryOp::NotEq => ordering != Equal,
        BinaryOp::Lt => ordering == Smaller,
        BinaryOp::LtEq => matches!(ordering, Smaller | Equal),
        BinaryOp::Gt => ordering == Larger,
        BinaryOp::GtEq => matches!(ordering, Larger | Equal),
        _ => ordering != Unknown,
    }
}

fn arithmetic(op: BinaryOp, left: Value, right: Value) -> Result<Value, EvalError> {
    if let Value::Str(mut bytes) = left {
        if op != BinaryOp::Add {
            tracing::debug!(op = op.as_symbol(), "string operand, result is void");
            return Ok(Value::Void);
        }
        right.write_bytes(&mut bytes);
        return Ok(Value::Str(bytes));
    }
    if matches!(left, Value::Float(_)) || matches!(right, Value::Float(_)) {
        float_arithmetic(op, left.to_float(), right.to_float()).map(Value::Float)
    } else {
        int_arithmetic(op, left.to_int(), right.to_int()).map(Value::Int)
    }
}

fn int_arithmetic(op: BinaryOp, a: i64, b: i64) -> Result<i64, EvalError> {
    Ok(match op {
        BinaryOp::Add => a.wrapping_add(b),
        BinaryOp::Sub => a.wrapping_sub(b),
        BinaryOp::Mul => a.wrapping_mul(b),
        BinaryOp::Div => {
            if b == 0 {
                return Err(division_by_zero());
            }
            a.wrapping_div(b)
        }
        BinaryOp::Mod => {
            if b == 0 {
                return Err(modulo_by_zero());
            }
            a.wrapping_rem(b)
        }
        _ => 0,
    })
}

fn float_arithmetic(op: BinaryOp, a: f64, b: f64) -> Result<f64, EvalError> {
    Ok(match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(division_by_zero());
            }
            a / b
        }
        BinaryOp::Mod => {
            if b == 0.0 {
                return Err(modulo_by_zero());
            }
            a % b
        }
        _ => 0.0,
    })
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "shift amounts wrap"
)]
fn bitwise(op: BinaryOp, a: i64, b: i64) -> i64 {
    match op {
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::Shl => a.wrapping_shl(b as u32),
        BinaryOp::Shr => a.wrapping_shr(b as u32),
        _ => 0,
    }
}

pub fn evaluate_unary(op: UnaryOp, value: &Value) -> Value {
    match op {
        UnaryOp::Neg => match value {
            Value::Float(f) => Value::Float(-f),
            other => Value::Int(other.to_int().wrapping_neg()),
        },
        UnaryOp::Plus => match value {
            Value::Float(f) => Value::Float(*f),
            other => Value::Int(other.to_int()),
        },
        UnaryOp::Not => Value::Bool(!value.to_bool()),
        UnaryOp::BitNot => Value::Int(!value.to_int()),
    }
}

/// `++`/`--` on a current value: returns `(result, stored)`.
///
/// Prefix forms work in Int and yield the stepped value. Postfix forms keep
/// a Float a Float and yield the old (promoted) value.
pub(crate) fn step(op: UpdateOp, prefix: bool, current: &Value) -> (Value, Value) {
    let delta: i32 = match op {
        UpdateOp::Increment => 1,
        UpdateOp::Decrement => -1,
    };
    if prefix {
        let stepped = Value::Int(current.to_int().wrapping_add(i64::from(delta)));
        return (stepped.clone(), stepped);
    }
    let old = match current {
        Value::Float(f) => Value::Float(*f),
        other => Value::Int(other.to_int()),
    };
    let stepped = match &old {
        Value::Float(f) => Value::Float(f + f64::from(delta)),
        other => Value::Int(other.to_int().wrapping_add(i64::from(delta))),
    };
    (old, stepped)
}

#[cfg(test)]
mod tests;
