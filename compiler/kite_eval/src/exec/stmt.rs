//! Statement execution and control flow.

use crate::interpreter::Interpreter;
use crate::operators::{compare_values, Promote};
use kite_ir::ast::{CaseRange, DeclRange, StmtKind, StmtRange};
use kite_ir::{ClassId, ExprId, FunctionId, Name, StmtId, TypeTag};
use kite_stack::ensure_sufficient_stack;
use kite_value::{
    loop_depth_exceeded, try_depth_exceeded, ClassDef, ClassKind, Comparison, ControlAction,
    ExecResult, Value,
};

/// How a loop body finished.
enum LoopStep {
    Next,
    Exit,
}

impl Interpreter {
    pub(crate) fn exec_stmt(&mut self, id: StmtId) -> ExecResult {
        ensure_sufficient_stack(|| self.exec_stmt_inner(id)).map_err(|action| {
            action.with_location_if_missing(|| self.location(self.arena.stmt(id).span))
        })
    }

    /// Run statements in order; the first control action stops the block.
    pub(crate) fn exec_block(&mut self, body: StmtRange) -> ExecResult {
        let arena = self.arena.clone();
        for &stmt in arena.stmt_list(body) {
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    fn exec_stmt_inner(&mut self, id: StmtId) -> ExecResult {
        let kind = self.arena.stmt(id).kind;
        match kind {
            StmtKind::Empty => Ok(()),
            StmtKind::Expr(expr) => self.eval_expr(expr).map(drop),
            StmtKind::Block(body) => self.exec_block(body),
            StmtKind::Declare { ty, decls } => self.exec_declare(ty, decls),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_expr(cond)?.to_bool() {
                    self.exec_stmt(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmt(else_branch)
                } else {
                    Ok(())
                }
            }
            StmtKind::While { cond, body } => self.exec_while(cond, body),
            StmtKind::DoWhile { body, cond } => self.exec_do_while(body, cond),
            StmtKind::For {
                init,
                cond,
                step,
                body,
            } => self.exec_for(init, cond, step, body),
            StmtKind::Switch {
                subject,
                cases,
                default,
            } => self.exec_switch(subject, cases, default),
            StmtKind::Break => {
                if self.frame.loops + self.frame.switches > 0 {
                    Err(ControlAction::Break)
                } else {
                    Ok(())
                }
            }
            StmtKind::Continue => {
                if self.frame.loops > 0 {
                    Err(ControlAction::Continue)
                } else {
                    Ok(())
                }
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::Void,
                };
                if self.call_depth > 0 {
                    Err(ControlAction::Return(value))
                } else {
                    Ok(())
                }
            }
            StmtKind::Try {
                body,
                binding,
                handler,
            } => self.exec_try(body, binding, handler),
            StmtKind::Throw(expr) => {
                let value = self.eval_expr(expr)?;
                Err(self.raise(value))
            }
            StmtKind::Function(function) => {
                self.declare_function(function);
                Ok(())
            }
            StmtKind::Class(class) => {
                self.declare_class(class);
                Ok(())
            }
        }
    }

    /// `var a = 1, b;` or `int a = 1, b;`
    fn exec_declare(&mut self, ty: Option<TypeTag>, decls: DeclRange) -> ExecResult {
        let arena = self.arena.clone();
        for decl in arena.decls(decls) {
            let value = match decl.init {
                Some(init) => self.eval_expr(init)?,
                None => Value::Void,
            };
            let value = match ty {
                Some(ty) if decl.init.is_some() => value.into_cast(ty)?,
                // A bare typed declaration defaults to the type's zero where
                // Void converts to it.
                Some(ty) => value.into_cast(ty).unwrap_or_default(),
                None => value,
            };
            let name = self.name(decl.name);
            self.bind_name(name, value);
        }
        Ok(())
    }

    fn declare_function(&mut self, function: FunctionId) {
        let decl = *self.arena.function(function);
        let name = decl.name.map_or("", |name| self.name(name));
        let sig = self.user_signature(name.to_owned(), function);
        self.env.current_mut().add_function(name, sig);
    }

    fn declare_class(&mut self, class: ClassId) {
        let decl = *self.arena.class(class);
        let name = self.name(decl.name);
        let def = ClassDef {
            name: name.to_owned(),
            parent: decl.parent.map(|parent| self.name(parent).to_owned()),
            kind: ClassKind::User {
                arena: self.arena.clone(),
                decl: class,
            },
        };
        self.env.current_mut().add_class(name, def);
    }

    // Loops

    /// Run `body` with the loop counter raised.
    fn with_loop(&mut self, body: impl FnOnce(&mut Self) -> ExecResult) -> ExecResult {
        let limit = self.limits.max_loop_depth;
        if self.frame.loops + self.frame.switches >= limit {
            return Err(loop_depth_exceeded(limit).into());
        }
        self.frame.loops += 1;
        let result = body(self);
        self.frame.loops -= 1;
        result
    }

    /// One iteration: `break` exits, `continue` moves on.
    fn loop_body(&mut self, body: StmtId) -> Result<LoopStep, ControlAction> {
        match self.exec_stmt(body) {
            Ok(()) | Err(ControlAction::Continue) => Ok(LoopStep::Next),
            Err(ControlAction::Break) => Ok(LoopStep::Exit),
            Err(other) => Err(other),
        }
    }

    fn exec_while(&mut self, cond: ExprId, body: StmtId) -> ExecResult {
        self.with_loop(|interp| {
            while interp.eval_expr(cond)?.to_bool() {
                if let LoopStep::Exit = interp.loop_body(body)? {
                    break;
                }
            }
            Ok(())
        })
    }

    fn exec_do_while(&mut self, body: StmtId, cond: ExprId) -> ExecResult {
        self.with_loop(|interp| {
            loop {
                if let LoopStep::Exit = interp.loop_body(body)? {
                    break;
                }
                if !interp.eval_expr(cond)?.to_bool() {
                    break;
                }
            }
            Ok(())
        })
    }

    fn exec_for(
        &mut self,
        init: Option<StmtId>,
        cond: Option<ExprId>,
        step: Option<ExprId>,
        body: StmtId,
    ) -> ExecResult {
        if let Some(init) = init {
            self.exec_stmt(init)?;
        }
        self.with_loop(|interp| {
            loop {
                if let Some(cond) = cond {
                    if !interp.eval_expr(cond)?.to_bool() {
                        break;
                    }
                }
                if let LoopStep::Exit = interp.loop_body(body)? {
                    break;
                }
                if let Some(step) = step {
                    interp.eval_expr(step)?;
                }
            }
            Ok(())
        })
    }

    // Switch

    fn exec_switch(
        &mut self,
        subject: ExprId,
        cases: CaseRange,
        default: Option<StmtRange>,
    ) -> ExecResult {
        let subject_is_literal = self.arena.expr(subject).kind.is_literal();
        let value = self.eval_expr(subject)?;
        let arena = self.arena.clone();
        let cases = arena.cases(cases);

        let mut matched = None;
        for (index, case) in cases.iter().enumerate() {
            let label_is_literal = arena.expr(case.label).kind.is_literal();
            let label = self.eval_expr(case.label)?;
            let promote = Promote::for_operands(subject_is_literal, label_is_literal);
            if compare_values(&value, &label, promote) == Comparison::Equal {
                matched = Some(index);
                break;
            }
        }

        let limit = self.limits.max_loop_depth;
        if self.frame.loops + self.frame.switches >= limit {
            return Err(loop_depth_exceeded(limit).into());
        }
        self.frame.switches += 1;
        let result = match matched {
            Some(start) => {
                let mut result = Ok(());
                for case in &cases[start..] {
                    result = self.exec_block(case.body);
                    if result.is_err() || !case.fallthrough {
                        break;
                    }
                }
                result
            }
            None => default.map_or(Ok(()), |body| self.exec_block(body)),
        };
        self.frame.switches -= 1;

        match result {
            Err(ControlAction::Break) => Ok(()),
            other => other,
        }
    }

    // Exceptions

    fn exec_try(&mut self, body: StmtId, binding: Name, handler: StmtId) -> ExecResult {
        let limit = self.limits.max_try_depth;
        if self.try_depth >= limit {
            return Err(try_depth_exceeded(limit).into());
        }
        self.try_depth += 1;
        let result = self.exec_stmt(body);
        self.try_depth -= 1;

        match result {
            Err(ControlAction::Throw(value)) => {
                tracing::trace!(value = %value, "exception caught");
                let name = self.name(binding);
                self.env.current_mut().add_variable(name, value);
                self.exec_stmt(handler)
            }
            other => other,
        }
    }
}
