#![allow(clippy::unwrap_used, reason = "tests unwrap known-good prototypes")]

use super::*;
use pretty_assertions::assert_eq;

fn noop(_: &mut dyn CallHost, _: &mut [Value]) -> EvalResult {
    Ok(Value::Void)
}

#[test]
fn parses_exact_coercing_and_any() {
    let proto = Prototype::parse("iS?").unwrap();
    assert_eq!(
        proto.params(),
        &[
            ParamSpec::Exact(TypeTag::Int),
            ParamSpec::Coerce(TypeTag::String),
            ParamSpec::Any,
        ]
    );
    assert!(!proto.repeats());
    assert_eq!(proto.to_string(), "iS?");
}

#[test]
fn trailing_star_repeats_last_spec() {
    let proto = Prototype::parse("sA*").unwrap();
    assert_eq!(proto.len(), 2);
    assert_eq!(proto.spec_for(0), Some(ParamSpec::Exact(TypeTag::String)));
    assert_eq!(proto.spec_for(5), Some(ParamSpec::Coerce(TypeTag::Array)));
    assert_eq!(Prototype::parse("i").unwrap().spec_for(1), None);
}

#[test]
fn struct_and_callable_letters() {
    let proto = Prototype::parse("tcr").unwrap();
    assert_eq!(
        proto.params(),
        &[
            ParamSpec::Exact(TypeTag::Struct),
            ParamSpec::Exact(TypeTag::Function),
            ParamSpec::Exact(TypeTag::Resource),
        ]
    );
}

#[test]
fn rejects_malformed_prototypes() {
    assert_eq!(Prototype::parse("x"), Err(PrototypeError::UnknownLetter('x')));
    assert_eq!(Prototype::parse("*"), Err(PrototypeError::MisplacedRepeat));
    assert_eq!(Prototype::parse("i*s"), Err(PrototypeError::MisplacedRepeat));
}

#[test]
fn native_signature_checks_arity_against_prototype() {
    let err = Signature::native("f", noop, 3, "ii", '?').unwrap_err();
    assert_eq!(
        err,
        PrototypeError::ArityExceedsPrototype {
            min_arity: 3,
            len: 2
        }
    );
    assert!(Signature::native("g", noop, 3, "i*", '?').is_ok());
    assert!(Signature::native("h", noop, 0, "", 'q').is_err());
}

#[test]
fn declared_types_coerce() {
    assert_eq!(ParamSpec::declared(None), ParamSpec::Any);
    assert_eq!(
        ParamSpec::declared(Some(TypeTag::Float)),
        ParamSpec::Coerce(TypeTag::Float)
    );
    assert_eq!(ParamSpec::Coerce(TypeTag::Float).letter(), 'F');
}

#[test]
fn debug_shows_contract() {
    let sig = Signature::native("push", noop, 2, "a?*", 'i').unwrap();
    assert_eq!(format!("{sig:?}"), "Signature(native push(a?*) -> i, min 2)");
}
