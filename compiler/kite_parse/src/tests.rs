#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use kite_ir::ast::{Access, BinaryOp, ExprKind, StmtKind, UnaryOp, UpdateOp};
use kite_ir::{StmtId, TypeTag};
use pretty_assertions::assert_eq;

fn parse_ok(source: &str) -> (ParseOutput, StringInterner) {
    let interner = StringInterner::new();
    let output = parse_source(source, "test.kite", &interner);
    assert!(
        !output.has_errors(),
        "unexpected errors: {:?}",
        output.diagnostics(&interner)
    );
    (output, interner)
}

fn top(output: &ParseOutput) -> Vec<StmtId> {
    output.arena.stmt_list(output.module.body).to_vec()
}

fn expr_of(output: &ParseOutput, stmt: StmtId) -> ExprKind {
    match output.arena.stmt(stmt).kind {
        StmtKind::Expr(id) => output.arena.expr(id).kind,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn function_declaration_with_types() {
    let (output, interner) = parse_ok("function int add(int a, var b, ...) { return a + b; }");
    let stmts = top(&output);
    assert_eq!(stmts.len(), 1);
    let StmtKind::Function(id) = output.arena.stmt(stmts[0]).kind else {
        panic!("expected function");
    };
    let decl = *output.arena.function(id);
    assert_eq!(interner.lookup(decl.name.unwrap()), "add");
    assert_eq!(decl.return_ty, Some(TypeTag::Int));
    assert!(decl.variadic);
    let params = output.arena.params(decl.params);
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].ty, Some(TypeTag::Int));
    assert_eq!(params[1].ty, None);
    assert_eq!(interner.lookup(params[1].name), "b");
}

#[test]
fn class_with_parent() {
    let (output, interner) =
        parse_ok("class B extends A { x = 1; function B() { this.y = 2; } }");
    let StmtKind::Class(id) = output.arena.stmt(top(&output)[0]).kind else {
        panic!("expected class");
    };
    let decl = *output.arena.class(id);
    assert_eq!(interner.lookup(decl.name), "B");
    assert_eq!(decl.parent.map(|p| interner.lookup(p)), Some("A"));
    assert_eq!(output.arena.stmt_list(decl.body).len(), 2);
}

#[test]
fn switch_marks_fallthrough_cases() {
    let (output, _) = parse_ok(
        "switch (x) { default: y = 0; case 1: y = 1; case 2: y = 2; break; case 3: }",
    );
    let StmtKind::Switch { cases, default, .. } = output.arena.stmt(top(&output)[0]).kind else {
        panic!("expected switch");
    };
    let flags: Vec<bool> = output
        .arena
        .cases(cases)
        .iter()
        .map(|case| case.fallthrough)
        .collect();
    assert_eq!(flags, vec![true, false, true]);
    assert_eq!(output.arena.stmt_list(default.unwrap()).len(), 1);
}

#[test]
fn precedence_and_negative_literals() {
    let (output, _) = parse_ok("1 + 2 * -3;");
    let ExprKind::Binary { op, right, .. } = expr_of(&output, top(&output)[0]) else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::Add);
    let ExprKind::Binary { op, right, .. } = output.arena.expr(right).kind else {
        panic!("expected product");
    };
    assert_eq!(op, BinaryOp::Mul);
    assert_eq!(output.arena.expr(right).kind, ExprKind::Int(-3));
}

#[test]
fn negated_variable_is_unary() {
    let (output, _) = parse_ok("-x;");
    assert!(matches!(
        expr_of(&output, top(&output)[0]),
        ExprKind::Unary {
            op: UnaryOp::Neg,
            ..
        }
    ));
}

#[test]
fn postfix_chain() {
    let (output, interner) = parse_ok("a.b[1].run(2);");
    let ExprKind::MethodCall {
        receiver, method, ..
    } = expr_of(&output, top(&output)[0])
    else {
        panic!("expected method call");
    };
    assert_eq!(interner.lookup(method), "run");
    let ExprKind::Index { base, access, .. } = output.arena.expr(receiver).kind else {
        panic!("expected index");
    };
    assert_eq!(access, Access::Element);
    assert!(matches!(
        output.arena.expr(base).kind,
        ExprKind::Index {
            access: Access::Field,
            ..
        }
    ));
}

#[test]
fn casts_updates_and_references() {
    let (output, _) = parse_ok("(int) x; x++; --y; f(&z);");
    let stmts = top(&output);
    assert!(matches!(
        expr_of(&output, stmts[0]),
        ExprKind::Cast {
            ty: TypeTag::Int,
            ..
        }
    ));
    assert!(matches!(
        expr_of(&output, stmts[1]),
        ExprKind::Update {
            op: UpdateOp::Increment,
            prefix: false,
            ..
        }
    ));
    assert!(matches!(
        expr_of(&output, stmts[2]),
        ExprKind::Update {
            op: UpdateOp::Decrement,
            prefix: true,
            ..
        }
    ));
    let ExprKind::Call { args, .. } = expr_of(&output, stmts[3]) else {
        panic!("expected call");
    };
    let arg = output.arena.expr_list(args)[0];
    assert!(matches!(output.arena.expr(arg).kind, ExprKind::Reference(_)));
}

#[test]
fn static_access_and_new() {
    let (output, _) = parse_ok("A::make(1); A::limit; new A; new A(1, 2);");
    let stmts = top(&output);
    assert!(matches!(expr_of(&output, stmts[0]), ExprKind::StaticCall { .. }));
    assert!(matches!(expr_of(&output, stmts[1]), ExprKind::StaticField { .. }));
    let ExprKind::New { args, .. } = expr_of(&output, stmts[2]) else {
        panic!("expected new");
    };
    assert!(args.is_empty());
    let ExprKind::New { args, .. } = expr_of(&output, stmts[3]) else {
        panic!("expected new");
    };
    assert_eq!(args.len(), 2);
}

#[test]
fn literals_with_keys() {
    let (output, _) = parse_ok(r#"a = [1, "k": 2, x: 3]; s = { x: 1, "y": 2 };"#);
    let stmts = top(&output);
    let ExprKind::Assign { value, op: None, .. } = expr_of(&output, stmts[0]) else {
        panic!("expected assignment");
    };
    let ExprKind::ArrayLit(fields) = output.arena.expr(value).kind else {
        panic!("expected array literal");
    };
    let keyed: Vec<bool> = output
        .arena
        .fields(fields)
        .iter()
        .map(|f| f.key.is_some())
        .collect();
    assert_eq!(keyed, vec![false, true, true]);
}

#[test]
fn compound_assignment() {
    let (output, _) = parse_ok("x += 2;");
    assert!(matches!(
        expr_of(&output, top(&output)[0]),
        ExprKind::Assign {
            op: Some(BinaryOp::Add),
            ..
        }
    ));
}

#[test]
fn lambda_expression() {
    let (output, _) = parse_ok("f = function (a) { return a; };");
    let ExprKind::Assign { value, .. } = expr_of(&output, top(&output)[0]) else {
        panic!("expected assignment");
    };
    assert!(matches!(output.arena.expr(value).kind, ExprKind::Lambda(_)));
}

#[test]
fn declarations_and_loops() {
    let (output, _) = parse_ok(
        "int i = 0, j; for (var k = 0; k < 3; k++) { continue; } do { i++; } while (i < 3);",
    );
    let stmts = top(&output);
    let StmtKind::Declare { ty, decls } = output.arena.stmt(stmts[0]).kind else {
        panic!("expected declaration");
    };
    assert_eq!(ty, Some(TypeTag::Int));
    assert_eq!(decls.len(), 2);
    assert!(matches!(
        output.arena.stmt(stmts[1]).kind,
        StmtKind::For {
            init: Some(_),
            cond: Some(_),
            step: Some(_),
            ..
        }
    ));
    assert!(matches!(
        output.arena.stmt(stmts[2]).kind,
        StmtKind::DoWhile { .. }
    ));
}

#[test]
fn invalid_assignment_target() {
    let interner = StringInterner::new();
    let output = parse_source("1 = 2;", "t.kite", &interner);
    assert_eq!(output.errors.len(), 1);
    assert!(matches!(
        output.errors[0],
        ParseError::InvalidTarget { .. }
    ));
}

#[test]
fn recovers_and_reports_each_error_with_line() {
    let interner = StringInterner::new();
    let output = parse_source("x = ;\ny = 1;\nif x {}\n", "bad.kite", &interner);
    assert_eq!(
        output.diagnostics(&interner),
        vec![
            "bad.kite:1: expected expression, found `;`".to_owned(),
            "bad.kite:3: expected `(`, found identifier".to_owned(),
        ]
    );
    // The good statement in between still parsed.
    assert!(top(&output)
        .iter()
        .any(|&s| matches!(output.arena.stmt(s).kind, StmtKind::Expr(_))));
}

#[test]
fn lex_errors_are_reported_first() {
    let interner = StringInterner::new();
    let output = parse_source("x = 1 @ 2;", "t.kite", &interner);
    assert!(matches!(output.errors[0], ParseError::Lex(_)));
}

#[test]
fn deep_nesting_is_an_error_not_a_crash() {
    let interner = StringInterner::new();
    let source = format!("{}1{};", "(".repeat(10_000), ")".repeat(10_000));
    let output = parse_source(&source, "deep.kite", &interner);
    assert!(output
        .errors
        .iter()
        .any(|err| matches!(err, ParseError::TooDeep { .. })));
}
