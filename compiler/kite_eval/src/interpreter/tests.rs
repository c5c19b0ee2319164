#![allow(
    clippy::unwrap_used,
    clippy::panic,
    reason = "tests unwrap known-good results"
)]

use super::*;
use kite_value::SymbolTable;
use pretty_assertions::assert_eq;

fn captured() -> Interpreter {
    let (output, _) = Output::buffer();
    let (error_output, _) = Output::buffer();
    Interpreter::builder()
        .output(output)
        .error_output(error_output)
        .build()
}

fn assert_balanced(interp: &Interpreter) {
    assert_eq!(interp.call_depth, 0);
    assert_eq!(interp.try_depth, 0);
    assert_eq!(interp.frame.loops, 0);
    assert_eq!(interp.frame.switches, 0);
    assert_eq!(interp.env.depth(), 0);
}

#[test]
fn builder_defaults() {
    let interp = Interpreter::new();
    assert_eq!(interp.limits(), EvalLimits::default());
    assert!(!interp.is_safe_mode());
    assert_eq!(interp.file_name(), "<script>");
    assert!(interp.exit_outcome().is_none());
    assert!(matches!(interp.global("println"), Some(Value::Function(_))));
}

#[test]
fn prelude_can_be_left_out() {
    let interp = Interpreter::builder().with_prelude(false).build();
    assert_eq!(interp.global("print"), None);
    assert_eq!(interp.global("count"), None);
}

#[test]
fn max_call_depth_overrides_only_calls() {
    let interp = Interpreter::builder().max_call_depth(7).build();
    assert_eq!(interp.limits().max_call_depth, 7);
    assert_eq!(
        interp.limits().max_loop_depth,
        EvalLimits::DEFAULT_LOOP_DEPTH
    );
}

#[test]
fn counters_are_balanced_after_a_caught_throw() {
    let mut interp = captured();
    let outcome = interp
        .run_str(
            "function f(n) { while (true) { switch (n) { case 1: throw n; } } }
             try { f(1); } catch (e) { }",
        )
        .unwrap();
    assert!(outcome.is_success());
    assert_balanced(&interp);
}

#[test]
fn counters_are_balanced_after_a_fatal_error() {
    let mut interp = captured();
    let outcome = interp
        .run_str("function f() { for (;;) { try { var x = 1 % 0; } catch (e) {} } } f();")
        .unwrap();
    assert_eq!(outcome.status, crate::FATAL_STATUS);
    assert_balanced(&interp);
}

#[test]
fn scope_guard_pops_on_drop() {
    let mut interp = captured();
    {
        let mut scoped = interp.scoped(SymbolTable::new());
        scoped.env.current_mut().add_variable("x", Value::Int(1));
        assert_eq!(scoped.env.depth(), 1);
        assert_eq!(scoped.env.read("x"), Value::Int(1));
    }
    assert_eq!(interp.env.depth(), 0);
    assert_eq!(interp.env.read("x"), Value::Void);

    let table = interp.scoped(SymbolTable::new()).finish();
    assert!(table.is_empty());
    assert_eq!(interp.env.depth(), 0);
}

#[test]
fn lambda_names_count_up_per_interpreter() {
    let mut interp = captured();
    interp
        .run_str("var a = function () {}; var b = function () {};")
        .unwrap();
    assert_eq!(interp.lambda_count, 2);
    let Some(Value::Function(sig)) = interp.global("b") else {
        panic!("expected a function");
    };
    assert_eq!(sig.name(), "{lambda#2}");
    assert_eq!(captured().lambda_count, 0);
}

#[test]
fn reset_keeps_globals() {
    let mut interp = captured();
    interp.run_str("var kept = 1; exit(2);").unwrap();
    interp.reset();
    assert_eq!(interp.global("kept"), Some(Value::Int(1)));
    assert!(interp.run_str("kept++;").unwrap().is_success());
    assert_eq!(interp.global("kept"), Some(Value::Int(2)));
}

#[test]
fn location_uses_the_current_source() {
    let mut interp = captured();
    let err = {
        let (error_output, stderr) = Output::buffer();
        interp.error_output = error_output;
        interp.run_source("lib.kite", "\n\n  1 / 0;").unwrap();
        stderr.text()
    };
    assert_eq!(err, "lib.kite:3: division by zero\n");
}
