//! The embedding surface: registering natives and classes, calling into
//! scripts, globals, resources and the exit state.

#![allow(clippy::unwrap_used, reason = "tests unwrap known-good results")]

use super::FILE;
use crate::{
    CallHost, EvalResult, Input, Interpreter, Output, PrototypeError, Resource, StructValue, Value,
};
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::rc::Rc;

fn quiet() -> Interpreter {
    let (output, _) = Output::buffer();
    let (error_output, _) = Output::buffer();
    Interpreter::builder()
        .output(output)
        .error_output(error_output)
        .file_name(FILE)
        .build()
}

fn double(_host: &mut dyn CallHost, args: &mut [Value]) -> EvalResult {
    Ok(Value::Int(args.first().map_or(0, Value::to_int) * 2))
}

fn in_safe_mode(host: &mut dyn CallHost, _args: &mut [Value]) -> EvalResult {
    Ok(Value::Bool(host.safe_mode()))
}

fn raise(host: &mut dyn CallHost, args: &mut [Value]) -> EvalResult {
    Err(host.throw(args.first().cloned().unwrap_or_default()))
}

fn wrong_return(_host: &mut dyn CallHost, _args: &mut [Value]) -> EvalResult {
    Ok(Value::string("not a number"))
}

fn point(_host: &mut dyn CallHost, args: &mut [Value]) -> EvalResult {
    let mut fields = StructValue::new();
    fields.set_field("x", args.first().cloned().unwrap_or_default());
    fields.set_field("y", args.get(1).cloned().unwrap_or_default());
    Ok(Value::Struct(fields))
}

fn tick(_host: &mut dyn CallHost, args: &mut [Value]) -> EvalResult {
    let ticks = args
        .first()
        .and_then(Value::as_resource)
        .and_then(|handle| {
            handle.with_payload(|count: &mut i64| {
                *count += 1;
                *count
            })
        });
    Ok(ticks.map_or(Value::Bool(false), Value::Int))
}

mod registration {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn native_functions_check_and_coerce_arguments() {
        let (output, stdout) = Output::buffer();
        let mut interp = Interpreter::builder().output(output).file_name(FILE).build();
        interp.register_function("double", double, 1, "I", 'i').unwrap();
        interp.run_str("println(double(\"21 apples\"));").unwrap();
        assert_eq!(stdout.text(), "42\n");
    }

    #[test]
    fn bad_prototypes_are_rejected() {
        let mut interp = quiet();
        assert_eq!(
            interp.register_function("f", double, 0, "ix", 'i'),
            Err(PrototypeError::UnknownLetter('x'))
        );
        assert_eq!(
            interp.register_function("f", double, 0, "*i", 'i'),
            Err(PrototypeError::MisplacedRepeat)
        );
        assert_eq!(interp.global("f"), None);
    }

    #[test]
    fn natives_see_safe_mode() {
        for enabled in [false, true] {
            let mut interp = Interpreter::builder().safe_mode(enabled).build();
            interp
                .register_function("in_safe_mode", in_safe_mode, 0, "", 'b')
                .unwrap();
            assert_eq!(
                interp.call_function("in_safe_mode", vec![]).unwrap().unwrap(),
                Value::Bool(enabled)
            );
        }
    }

    #[test]
    fn natives_can_throw() {
        let (output, stdout) = Output::buffer();
        let (error_output, stderr) = Output::buffer();
        let mut interp = Interpreter::builder()
            .output(output)
            .error_output(error_output)
            .file_name(FILE)
            .build();
        interp.register_function("raise", raise, 1, "?", '?').unwrap();
        let outcome = interp
            .run_str("try { raise(\"bad\"); } catch (e) { println(\"caught \", e); }\nraise(\"again\");")
            .unwrap();
        assert_eq!(stdout.text(), "caught bad\n");
        assert_eq!(stderr.text(), "test.kite:2: uncaught exception: again\n");
        assert_eq!(outcome.status, crate::FATAL_STATUS);
    }

    #[test]
    fn native_return_spec_is_enforced() {
        let (error_output, stderr) = Output::buffer();
        let mut interp = Interpreter::builder()
            .error_output(error_output)
            .file_name(FILE)
            .build();
        interp.register_function("bad", wrong_return, 0, "", 'i').unwrap();
        let outcome = interp.run_str("bad();").unwrap();
        assert!(!outcome.is_success());
        assert_eq!(
            stderr.text(),
            "test.kite:1: bad() must return int, returned string\n"
        );
    }

    #[test]
    fn native_class_with_user_subclass() {
        let (output, stdout) = Output::buffer();
        let mut interp = Interpreter::builder().output(output).file_name(FILE).build();
        interp.register_class("Point", None, point, 2, "II", 't').unwrap();
        let outcome = interp
            .run_str(
                r#"
                class Point3 extends Point {
                    function Point3(x, y, z) { this.z = z; }
                    function sum() { return this.x + this.y + this.z; }
                }
                var p = new Point("1", 2.9);
                println(p.x, " ", p.y, " ", p.__class);
                var q = new Point3(1, 2, 3);
                println(q.x, q.y, q.z, " ", q.sum(), " ", q.__class);
                "#,
            )
            .unwrap();
        assert!(outcome.is_success());
        assert_eq!(stdout.text(), "1 2 Point\n123 6 Point3\n");
    }
}

mod calls {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn call_function_by_name() {
        let mut interp = quiet();
        interp
            .run_str("function add(int a, int b) { return a + b; }")
            .unwrap();
        assert_eq!(
            interp.call_function("add", vec![Value::Int(2), Value::string("3")]),
            Some(Ok(Value::Int(5)))
        );
        assert_eq!(interp.call_function("missing", vec![]), None);
    }

    #[test]
    fn call_function_reports_errors() {
        let mut interp = quiet();
        interp.run_str("function one(a) { return a; }").unwrap();
        let err = interp.call_function("one", vec![]).unwrap().unwrap_err();
        assert_eq!(err.message, "one() expects at least 1 argument, 0 given");
    }

    #[test]
    fn call_method_writes_this_back() {
        let mut interp = quiet();
        interp
            .run_str(
                "class Counter { var n = 0; function bump(k) { this.n += k; return this.n; } }
                 var c = new Counter();",
            )
            .unwrap();
        let mut counter = interp.global("c").unwrap();
        assert_eq!(
            interp.call_method(&mut counter, "bump", vec![Value::Int(5)]),
            Ok(Value::Int(5))
        );
        assert_eq!(
            interp.call_method(&mut counter, "bump", vec![Value::Int(2)]),
            Ok(Value::Int(7))
        );
        assert_eq!(
            counter.as_struct().unwrap().field("n"),
            Some(&Value::Int(7))
        );
        // The global itself was copied out and is unchanged.
        let global = interp.global("c").unwrap();
        assert_eq!(global.as_struct().unwrap().field("n"), Some(&Value::Int(0)));
    }

    #[test]
    fn call_method_on_a_non_struct() {
        let mut interp = quiet();
        let err = interp
            .call_method(&mut Value::Int(1), "len", vec![])
            .unwrap_err();
        assert_eq!(err.message, "call to method len() on a int value");
    }

    #[test]
    fn call_value_runs_lambdas() {
        let mut interp = quiet();
        interp
            .run_str("var square = function (x) { return x * x; };")
            .unwrap();
        let square = interp.global("square").unwrap();
        assert_eq!(
            interp.call_value(&square, vec![Value::Int(9)]),
            Ok(Value::Int(81))
        );
        let err = interp.call_value(&Value::Int(3), vec![]).unwrap_err();
        assert_eq!(err.message, "value of type int is not callable");
    }

    #[test]
    fn globals_are_visible_to_scripts() {
        let (output, stdout) = Output::buffer();
        let mut interp = Interpreter::builder().output(output).build();
        interp.set_global("greeting", Value::string("hi"));
        interp.run_str("println(greeting); result = 40 + 2;").unwrap();
        assert_eq!(stdout.text(), "hi\n");
        assert_eq!(interp.global("result"), Some(Value::Int(42)));
        assert_eq!(interp.global("nothing"), None);
    }

    #[test]
    fn exit_is_terminal_until_reset() {
        let mut interp = quiet();
        interp.run_str("function f() { return 1; }").unwrap();
        let outcome = interp.run_str("exit(4);").unwrap();
        assert_eq!(outcome.status, 4);
        assert_eq!(interp.exit_outcome().map(|outcome| outcome.status), Some(4));

        let err = interp.call_function("f", vec![]).unwrap().unwrap_err();
        assert_eq!(err.message, "script exited with status 4");
        assert_eq!(interp.run_str("f();").unwrap().status, 4);

        interp.reset();
        assert_eq!(interp.exit_outcome(), None);
        assert_eq!(interp.call_function("f", vec![]), Some(Ok(Value::Int(1))));
    }

    #[test]
    fn exit_from_a_host_call_is_recorded() {
        let mut interp = quiet();
        interp.run_str("function quit() { exit(9); }").unwrap();
        let err = interp.call_function("quit", vec![]).unwrap().unwrap_err();
        assert_eq!(err.message, "script exited with status 9");
        assert_eq!(interp.exit_outcome().map(|outcome| outcome.status), Some(9));
    }

    #[test]
    fn parse_errors_prevent_the_run() {
        let (output, stdout) = Output::buffer();
        let mut interp = Interpreter::builder().output(output).build();
        let errors = interp
            .run_source("broken.kite", "println(1);\nvar = ;")
            .unwrap_err();
        assert!(!errors.is_empty());
        assert_eq!(stdout.text(), "");
    }
}

mod resources {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn copies_share_the_payload() {
        let (output, stdout) = Output::buffer();
        let mut interp = Interpreter::builder().output(output).build();
        interp.register_function("tick", tick, 1, "r", '?').unwrap();
        interp.set_global("handle", Value::Resource(Resource::new("counter", 0_i64)));
        interp
            .run_str("var copy = handle; tick(copy); println(tick(handle), \" \", typeof(copy));")
            .unwrap();
        assert_eq!(stdout.text(), "2 resource\n");
        let handle = interp.global("handle").unwrap();
        let count = handle
            .as_resource()
            .unwrap()
            .with_payload(|count: &mut i64| *count);
        assert_eq!(count, Some(2));
    }

    #[test]
    fn release_runs_once_at_the_last_drop() {
        let released = Rc::new(Cell::new(0));
        let counter = Rc::clone(&released);
        let handle = Resource::with_release("file", 7_i64, move |payload: i64| {
            assert_eq!(payload, 7);
            counter.set(counter.get() + 1);
        });

        let mut interp = quiet();
        interp.set_global("h", Value::Resource(handle));
        interp
            .run_str("var a = h; var b = [a, a]; a = 0; b = 0;")
            .unwrap();
        assert_eq!(released.get(), 0);
        drop(interp);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn resources_do_not_cast_to_functions() {
        let (error_output, stderr) = Output::buffer();
        let mut interp = Interpreter::builder()
            .error_output(error_output)
            .file_name(FILE)
            .build();
        interp.set_global("h", Value::Resource(Resource::new("socket", ())));
        interp.run_str("var f = (function) h;").unwrap();
        assert_eq!(stderr.text(), "test.kite:1: cannot cast resource to function\n");
    }
}

#[test]
fn readline_reads_supplied_lines() {
    let (output, stdout) = Output::buffer();
    let mut interp = Interpreter::builder()
        .output(output)
        .input(Input::lines(["first", "second"]))
        .build();
    interp
        .run_str("println(readline()); println(readline()); println(readline());")
        .unwrap();
    assert_eq!(stdout.text(), "first\nsecond\nfalse\n");
}
