//! String round trips of scalar casts.

#![allow(clippy::unwrap_used, reason = "scalar casts never fail")]

use kite_ir::TypeTag;
use kite_value::Value;
use proptest::prelude::*;

fn round_trip(value: &Value) -> Value {
    value
        .cast(TypeTag::String)
        .unwrap()
        .cast(value.type_tag())
        .unwrap()
}

proptest! {
    #[test]
    fn bool_survives_string_round_trip(b in any::<bool>()) {
        let value = Value::Bool(b);
        prop_assert_eq!(round_trip(&value), value);
    }

    #[test]
    fn int_survives_string_round_trip(n in any::<i64>()) {
        let value = Value::Int(n);
        prop_assert_eq!(round_trip(&value), value);
    }

    #[test]
    fn finite_float_survives_string_round_trip(f in proptest::num::f64::NORMAL | proptest::num::f64::ZERO | proptest::num::f64::SUBNORMAL) {
        let value = Value::Float(f);
        prop_assert_eq!(round_trip(&value), value);
    }

    #[test]
    fn string_to_int_never_panics(s in ".*") {
        let _ = Value::string(s.as_str()).to_int();
        let _ = Value::string(s.as_str()).to_float();
        let _ = Value::string(s).to_bool();
    }
}
