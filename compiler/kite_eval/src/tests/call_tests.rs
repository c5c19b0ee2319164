use super::{fatal, output, run, run_with};
use crate::Interpreter;

mod functions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn recursion() {
        let source = r#"
            function fact(n) { if (n <= 1) return 1; return n * fact(n - 1); }
            println(fact(10));
        "#;
        assert_eq!(output(source), "3628800\n");
    }

    #[test]
    fn deep_recursion_stays_on_the_host_stack() {
        let source = r#"
            function depth(n) { if (n == 0) return 0; return 1 + depth(n - 1); }
            println(depth(900));
        "#;
        assert_eq!(output(source), "900\n");
    }

    #[test]
    fn runaway_recursion_is_fatal() {
        let run = run_with(
            Interpreter::builder().max_call_depth(50),
            "function r(n) { return r(n + 1); }\nr(0);\nprintln(\"after\");",
        );
        assert_eq!(run.stdout, "");
        assert_eq!(run.outcome.status, 1);
        assert!(
            run.stderr.contains("maximum function nesting level of 50 reached"),
            "{}",
            run.stderr
        );
    }

    #[test]
    fn calls_before_the_declaration_runs_are_undefined() {
        // Declarations bind when executed.
        assert_eq!(
            fatal("early();\nfunction early() {}"),
            "test.kite:1: call to undefined function early()\n"
        );
    }

    #[test]
    fn no_return_yields_void() {
        assert_eq!(output("function f() { var x = 1; } println(typeof(f()));"), "void\n");
    }

    #[test]
    fn declared_return_type_coerces() {
        let source = r#"
            function int add(int a, int b) { return a + b; }
            function string tag() { return 5; }
            println(add("2", 3.9), " ", typeof(tag()));
        "#;
        assert_eq!(output(source), "5 string\n");
    }

    #[test]
    fn lambdas_run_like_named_functions() {
        let source = r#"
            var square = function(x) { return x * x; };
            println(square(4), " ", call(function(a, b) { return a - b; }, 10, 4));
        "#;
        assert_eq!(output(source), "16 6\n");
    }

    #[test]
    fn function_values_can_be_stored_and_called() {
        let source = r#"
            function twice(x) { return x * 2; }
            var ops = [twice];
            var f = ops[0];
            println(f(21));
        "#;
        assert_eq!(output(source), "42\n");
    }
}

mod scopes {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn assignment_in_a_function_shadows_the_global() {
        let source = r#"
            var x = "global";
            function f() { x = "local"; return x; }
            println(f(), " ", x);
        "#;
        assert_eq!(output(source), "local global\n");
    }

    #[test]
    fn globals_are_readable_from_functions() {
        assert_eq!(output("var g = 5; function r() { return g; } println(r());"), "5\n");
    }

    #[test]
    fn caller_locals_are_invisible() {
        let source = r#"
            function inner() { return typeof(secret); }
            function outer() { var secret = 1; return inner(); }
            println(outer());
        "#;
        assert_eq!(output(source), "void\n");
    }

    #[test]
    fn indexed_assignment_copies_the_global_first() {
        let source = r#"
            var arr = [1, 2];
            function m() { arr[0] = 99; return arr[0] + arr[1]; }
            println(m(), " ", arr[0]);
        "#;
        assert_eq!(output(source), "101 1\n");
    }

    #[test]
    fn values_are_copied_on_assignment() {
        let source = r#"
            var a = [1, [2]];
            var b = a;
            b[1][0] = 5;
            var s = {n: 1};
            var t = s;
            t.n = 2;
            println(a[1][0], b[1][0], s.n, t.n);
        "#;
        assert_eq!(output(source), "2512\n");
    }
}

mod arguments {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn too_few_arguments() {
        assert_eq!(
            fatal("function f(a, b) {}\nf(1);"),
            "test.kite:2: f() expects at least 2 arguments, 1 given\n"
        );
    }

    #[test]
    fn too_many_arguments() {
        let stderr = fatal("function f(a) {} f(1, 2);");
        assert!(stderr.contains("f() expects at most 1"), "{stderr}");
    }

    #[test]
    fn variadic_extras_land_in_argv() {
        let source = r#"
            function f(a, ...) { return a + ":" + argc + ":" + argv[0] + argv[1]; }
            println(f("x", 1, 2));
        "#;
        assert_eq!(output(source), "x:2:12\n");
    }

    #[test]
    fn argc_and_argv_are_always_bound() {
        assert_eq!(
            output("function g() { return argc + count(argv); } println(g(), typeof(argv));"),
            "0void\n"
        );
    }

    #[test]
    fn native_prototype_is_strict_for_lowercase() {
        assert_eq!(
            fatal("push(5, 1);"),
            "test.kite:1: push(): argument 1 must be array, int given\n"
        );
    }

    #[test]
    fn native_prototype_coerces_uppercase() {
        let run = run("exit(\"7 dwarves\");");
        assert_eq!(run.outcome.status, 7);
    }

    #[test]
    fn calling_a_non_function_name() {
        assert_eq!(
            fatal("var x = 5; x(1);"),
            "test.kite:1: call to undefined function x()\n"
        );
    }

    #[test]
    fn calling_a_computed_non_function() {
        assert_eq!(
            fatal("var a = [1]; a[0]();"),
            "test.kite:1: value of type int is not callable\n"
        );
    }
}

mod by_reference {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn user_function_writes_back_parameters() {
        let source = r#"
            function inc(n) { n++; }
            var x = 1;
            inc(&x);
            inc(x);
            println(x);
        "#;
        assert_eq!(output(source), "2\n");
    }

    #[test]
    fn write_back_into_an_element() {
        let source = r#"
            function inc(n) { n++; }
            var a = [1, {v: 10}];
            inc(&a[0]);
            inc(&a[1].v);
            println(a[0], " ", a[1].v);
        "#;
        assert_eq!(output(source), "2 11\n");
    }

    #[test]
    fn extra_arguments_write_back_through_argv() {
        let source = r#"
            function set_all(...) { argv[0] = "set"; }
            var v = 0;
            set_all(&v);
            println(v);
        "#;
        assert_eq!(output(source), "set\n");
    }

    #[test]
    fn native_function_writes_back_its_slice() {
        let source = r#"
            var a = [1];
            println(push(&a, 2, 3));
            push(a, 4);
            println(count(a));
        "#;
        assert_eq!(output(source), "3\n3\n");
    }

    #[test]
    fn reference_to_a_non_place_is_a_plain_value() {
        assert_eq!(output("function id(x) { x = 0; return x; } println(id(&5));"), "0\n");
    }
}

mod methods {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn this_is_written_back_to_the_receiver() {
        let source = r#"
            var counter = {n: 0};
            counter.bump = function() { this.n++; return this.n; };
            counter.bump();
            counter.bump();
            println(counter.n);
        "#;
        assert_eq!(output(source), "2\n");
    }

    #[test]
    fn receiver_inside_a_container() {
        let source = r#"
            var items = [{n: 1, twice: function() { this.n = this.n * 2; }}];
            items[0].twice();
            println(items[0].n);
        "#;
        assert_eq!(output(source), "2\n");
    }

    #[test]
    fn temporary_receiver() {
        let source = r#"
            function make() { return {n: 1, get: function() { return this.n; }}; }
            println(make().get());
        "#;
        assert_eq!(output(source), "1\n");
    }

    #[test]
    fn method_on_a_non_struct() {
        assert_eq!(
            fatal(r#"var s = "x"; s.len();"#),
            "test.kite:1: call to method len() on a string value\n"
        );
    }

    #[test]
    fn missing_method() {
        assert_eq!(
            fatal("var o = {a: 1}; o.nope();"),
            "test.kite:1: call to undefined method struct::nope()\n"
        );
    }
}
