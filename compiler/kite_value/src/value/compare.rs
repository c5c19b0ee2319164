//! Language-level ordering of two values.

use super::Value;
use std::cmp::Ordering;

/// Outcome of comparing two values of the same variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Comparison {
    Smaller,
    Equal,
    Larger,
    /// The values have no defined order (mixed variants, NaN, containers).
    Unknown,
}

impl From<Option<Ordering>> for Comparison {
    fn from(ordering: Option<Ordering>) -> Self {
        match ordering {
            Some(Ordering::Less) => Comparison::Smaller,
            Some(Ordering::Equal) => Comparison::Equal,
            Some(Ordering::Greater) => Comparison::Larger,
            None => Comparison::Unknown,
        }
    }
}

impl Value {
    /// Compare two values. Callers promote operands to a common variant
    /// first; mixed variants compare as [`Comparison::Unknown`].
    pub fn compare(&self, other: &Value) -> Comparison {
        match (self, other) {
            (Value::Void, Value::Void) => Comparison::Equal,
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)).into(),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)).into(),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b).into(),
            (Value::Str(a), Value::Str(b)) => Some(a.as_slice().cmp(b.as_slice())).into(),
            (Value::Function(a), Value::Function(b)) if a == b => Comparison::Equal,
            _ => Comparison::Unknown,
        }
    }
}
