//! Core builtins registered on every interpreter unless the builder turns
//! them off. They go through the same registration API a host uses.

use crate::diagnostics::FATAL_STATUS;
use crate::interpreter::Interpreter;
use kite_value::{
    ArrayValue, CallHost, ControlAction, EvalResult, ExitReason, NativeFn, Value,
};

/// `(name, function, min_arity, prototype, returns)`
const BUILTINS: &[(&str, NativeFn, usize, &str, char)] = &[
    ("print", print, 0, "?*", '?'),
    ("println", println, 0, "?*", '?'),
    ("eprint", eprint, 0, "?*", '?'),
    ("exit", exit, 0, "I", '?'),
    ("count", count, 1, "?", 'i'),
    ("typeof", type_of, 1, "?", 's'),
    ("readline", readline, 0, "", '?'),
    ("push", push, 2, "a?*", 'i'),
    ("keys", keys, 1, "?", 'a'),
    ("call", call, 1, "c?*", '?'),
];

pub(crate) fn register(interpreter: &mut Interpreter) {
    for &(name, function, min_arity, prototype, returns) in BUILTINS {
        if let Err(err) = interpreter.register_function(name, function, min_arity, prototype, returns)
        {
            tracing::error!(name, %err, "failed to register builtin");
        }
    }
}

fn stringify(args: &[Value]) -> Vec<u8> {
    let mut out = Vec::new();
    for arg in args {
        arg.write_bytes(&mut out);
    }
    out
}

fn print(host: &mut dyn CallHost, args: &mut [Value]) -> EvalResult {
    host.write_output(&stringify(args));
    Ok(Value::Void)
}

fn println(host: &mut dyn CallHost, args: &mut [Value]) -> EvalResult {
    let mut out = stringify(args);
    out.push(b'\n');
    host.write_output(&out);
    Ok(Value::Void)
}

fn eprint(host: &mut dyn CallHost, args: &mut [Value]) -> EvalResult {
    host.write_error(&stringify(args));
    Ok(Value::Void)
}

fn exit(_host: &mut dyn CallHost, args: &mut [Value]) -> EvalResult {
    let status = args.first().map_or(0, Value::to_int);
    let status = i32::try_from(status).unwrap_or(FATAL_STATUS);
    Err(ControlAction::Exit(ExitReason::Requested(status)))
}

fn count(_host: &mut dyn CallHost, args: &mut [Value]) -> EvalResult {
    let len = match args.first() {
        Some(Value::Array(array)) => array.len(),
        Some(Value::Struct(object)) => object.field_count(),
        Some(Value::Str(bytes)) => bytes.len(),
        _ => 0,
    };
    Ok(Value::Int(i64::try_from(len).unwrap_or(i64::MAX)))
}

fn type_of(_host: &mut dyn CallHost, args: &mut [Value]) -> EvalResult {
    let name = args.first().map_or("void", Value::type_name);
    Ok(Value::string(name))
}

fn readline(host: &mut dyn CallHost, _args: &mut [Value]) -> EvalResult {
    Ok(host.read_line().map_or(Value::Bool(false), Value::Str))
}

/// `push(&array, values...)`: the array argument is written back by the
/// caller when passed by reference.
fn push(_host: &mut dyn CallHost, args: &mut [Value]) -> EvalResult {
    let Some((Value::Array(array), values)) = args.split_first_mut() else {
        return Ok(Value::Int(0));
    };
    for value in values.iter() {
        array.push(value.clone());
    }
    Ok(Value::Int(i64::try_from(array.len()).unwrap_or(i64::MAX)))
}

fn keys(_host: &mut dyn CallHost, args: &mut [Value]) -> EvalResult {
    let keys = match args.first() {
        Some(Value::Array(array)) => array.keys(),
        Some(Value::Struct(object)) => object
            .fields()
            .map(|(name, _)| Value::string(name))
            .collect(),
        _ => ArrayValue::new(),
    };
    Ok(Value::Array(keys))
}

fn call(host: &mut dyn CallHost, args: &mut [Value]) -> EvalResult {
    let Some((callee, rest)) = args.split_first() else {
        return Ok(Value::Void);
    };
    host.call_value(callee, rest.to_vec())
}
