use super::*;
use pretty_assertions::assert_eq;

#[test]
fn top_level_writes_go_to_globals() {
    let mut env = Environment::new();
    assert!(env.is_top_level());
    env.current_mut().add_variable("x", Value::Int(1));
    assert_eq!(env.global().variable("x"), Some(&Value::Int(1)));
}

#[test]
fn local_shadows_global() {
    let mut env = Environment::new();
    env.global_mut().add_variable("x", Value::Int(1));
    let mut local = SymbolTable::new();
    local.add_variable("x", Value::Int(2));
    env.push_scope(local);
    assert_eq!(env.read("x"), Value::Int(2));
    env.pop_scope();
    assert_eq!(env.read("x"), Value::Int(1));
}

#[test]
fn outer_locals_are_invisible() {
    let mut env = Environment::new();
    let mut caller = SymbolTable::new();
    caller.add_variable("secret", Value::Int(7));
    env.push_scope(caller);
    env.push_scope(SymbolTable::new());
    assert_eq!(env.read("secret"), Value::Void);
    assert_eq!(env.depth(), 2);
}

#[test]
fn pop_returns_the_table() {
    let mut env = Environment::new();
    env.push_scope(SymbolTable::new());
    env.current_mut().add_variable("a", Value::Bool(true));
    let table = env.pop_scope().unwrap_or_default();
    assert_eq!(table.variable("a"), Some(&Value::Bool(true)));
    assert!(env.pop_scope().is_none());
}

#[test]
fn classes_read_as_void() {
    use kite_value::{ClassDef, ClassKind, Signature};
    fn ctor(_: &mut dyn kite_value::CallHost, _: &mut [Value]) -> kite_value::EvalResult {
        Ok(Value::Void)
    }
    let mut env = Environment::new();
    let Ok(sig) = Signature::native("C", ctor, 0, "", '?') else {
        panic!("valid prototype");
    };
    env.global_mut().add_class(
        "C",
        ClassDef {
            name: "C".to_owned(),
            parent: None,
            kind: ClassKind::Native(sig),
        },
    );
    assert_eq!(env.read("C"), Value::Void);
    assert!(matches!(env.lookup("C"), Some(Symbol::Class(_))));
}
