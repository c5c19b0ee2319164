#![allow(clippy::unwrap_used, reason = "tests unwrap known-good operations")]

use super::*;
use kite_value::EvalErrorKind;
use pretty_assertions::assert_eq;

fn binary(op: BinaryOp, left: Value, right: Value) -> Value {
    evaluate_binary(op, left, right, Promote::Right).unwrap()
}

#[test]
fn int_arithmetic_wraps() {
    assert_eq!(binary(BinaryOp::Add, Value::Int(i64::MAX), Value::Int(1)), Value::Int(i64::MIN));
    assert_eq!(binary(BinaryOp::Div, Value::Int(7), Value::Int(2)), Value::Int(3));
    assert_eq!(binary(BinaryOp::Mod, Value::Int(-7), Value::Int(3)), Value::Int(-1));
}

#[test]
fn float_wins_either_side() {
    assert_eq!(binary(BinaryOp::Mul, Value::Int(2), Value::Float(1.5)), Value::Float(3.0));
    assert_eq!(binary(BinaryOp::Sub, Value::Float(1.5), Value::Bool(true)), Value::Float(0.5));
}

#[test]
fn string_plus_concatenates_stringified_right() {
    assert_eq!(
        binary(BinaryOp::Add, Value::string("n="), Value::Int(4)),
        Value::string("n=4")
    );
}

#[test]
fn other_string_arithmetic_is_void() {
    for op in [BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div, BinaryOp::Mod] {
        assert_eq!(binary(op, Value::string("6"), Value::Int(0)), Value::Void, "{op:?}");
    }
}

#[test]
fn division_by_zero_is_fatal_for_ints_and_floats() {
    let int = evaluate_binary(BinaryOp::Div, Value::Int(1), Value::Int(0), Promote::Right);
    assert_eq!(int.unwrap_err().kind, EvalErrorKind::DivisionByZero);
    let float = evaluate_binary(BinaryOp::Mod, Value::Float(1.0), Value::Float(0.0), Promote::Right);
    assert_eq!(float.unwrap_err().kind, EvalErrorKind::ModuloByZero);
}

#[test]
fn bitwise_casts_to_int() {
    assert_eq!(binary(BinaryOp::BitOr, Value::string("4"), Value::Float(1.9)), Value::Int(5));
    assert_eq!(binary(BinaryOp::Shl, Value::Int(1), Value::Int(65)), Value::Int(2));
    assert_eq!(binary(BinaryOp::Shr, Value::Int(-8), Value::Int(1)), Value::Int(-4));
}

#[test]
fn comparison_promotes_toward_non_literal() {
    // "10" < 9: left literal cast to int -> 10 < 9 is false.
    let promote = Promote::for_operands(true, false);
    assert_eq!(promote, Promote::Left);
    assert_eq!(
        evaluate_binary(BinaryOp::Lt, Value::string("10"), Value::Int(9), promote).unwrap(),
        Value::Bool(false)
    );
    // Same operands, right promoted to string: "10" < "9" bytewise is true.
    assert_eq!(
        evaluate_binary(BinaryOp::Lt, Value::string("10"), Value::Int(9), Promote::Right).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn unknown_ordering_is_false_except_not_equal() {
    let a = Value::array([]);
    for op in [BinaryOp::Eq, BinaryOp::Lt, BinaryOp::LtEq, BinaryOp::Gt, BinaryOp::GtEq] {
        assert_eq!(binary(op, a.clone(), a.clone()), Value::Bool(false), "{op:?}");
    }
    assert_eq!(binary(BinaryOp::NotEq, a.clone(), a), Value::Bool(true));
}

#[test]
fn impossible_promotion_compares_unknown() {
    let r = Value::resource(kite_value::Resource::new("h", ()));
    assert_eq!(compare_values(&r, &Value::Void, Promote::Right), Comparison::Unknown);
}

#[test]
fn unary_operators() {
    assert_eq!(evaluate_unary(UnaryOp::Neg, &Value::Float(2.5)), Value::Float(-2.5));
    assert_eq!(evaluate_unary(UnaryOp::Neg, &Value::string("3")), Value::Int(-3));
    assert_eq!(evaluate_unary(UnaryOp::Plus, &Value::Bool(true)), Value::Int(1));
    assert_eq!(evaluate_unary(UnaryOp::Not, &Value::string("")), Value::Bool(true));
    assert_eq!(evaluate_unary(UnaryOp::BitNot, &Value::Int(0)), Value::Int(-1));
}

#[test]
fn prefix_step_forces_int() {
    let (result, stored) = step(UpdateOp::Increment, true, &Value::Float(1.5));
    assert_eq!(result, Value::Int(2));
    assert_eq!(stored, Value::Int(2));
}

#[test]
fn postfix_step_keeps_float_and_yields_old() {
    let (result, stored) = step(UpdateOp::Decrement, false, &Value::Float(1.5));
    assert_eq!(result, Value::Float(1.5));
    assert_eq!(stored, Value::Float(0.5));
    let (result, stored) = step(UpdateOp::Increment, false, &Value::string("7"));
    assert_eq!(result, Value::Int(7));
    assert_eq!(stored, Value::Int(8));
}
