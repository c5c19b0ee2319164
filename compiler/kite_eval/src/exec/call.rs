//! Call dispatch.
//!
//! Every call, native or user, goes through [`Interpreter::invoke`]:
//! arguments are checked against the callee's prototype, the call depth is
//! guarded, and the return spec is applied. User calls run their body in a
//! fresh scope with the callee's arena swapped in, then hand back the final
//! parameter values so `&` arguments and `this` can be written back.

use super::assign::Place;
use super::{ARGC, ARGV, THIS};
use crate::interpreter::Interpreter;
use kite_ir::ast::{ExprKind, ExprRange};
use kite_ir::{ExprId, Name};
use kite_value::{
    argument_type_mismatch, call_depth_exceeded, not_a_struct, not_callable,
    return_type_mismatch, too_few_arguments, too_many_arguments, undefined_function,
    undefined_method, ArrayValue, ControlAction, EvalError, EvalResult, ExecResult, ParamSpec,
    Signature, SignatureKind, Symbol, SymbolTable, UserFunction, Value,
};

/// Result of a completed call.
pub(crate) struct CallOutput {
    pub(crate) value: Value,
    /// Final argument values by position, for `&` write-back.
    pub(crate) args: Vec<Value>,
    /// Final `this`, when the call had one.
    pub(crate) this: Option<Value>,
}

/// `&` arguments: position in the argument list and the place to update.
type RefArgs = Vec<(usize, Place)>;

impl Interpreter {
    /// `callee(args)`
    pub(crate) fn eval_call(&mut self, callee: ExprId, args: ExprRange) -> EvalResult {
        let kind = self.arena.expr(callee).kind;
        let sig = match kind {
            ExprKind::Ident(name) => self.function_named(name)?,
            _ => match self.eval_expr(callee)? {
                Value::Function(sig) => sig,
                other => return Err(not_callable(other.type_name()).into()),
            },
        };
        let (values, refs) = self.eval_args(args)?;
        let out = self.invoke(&sig, values, None)?;
        self.write_back(refs, out.args)?;
        Ok(out.value)
    }

    /// Function bound to `name`, as a function or as a variable holding one.
    fn function_named(&self, name: Name) -> Result<Signature, EvalError> {
        let name = self.name(name);
        match self.env.lookup(name) {
            Some(Symbol::Function(sig) | Symbol::Variable(Value::Function(sig))) => Ok(sig.clone()),
            _ => Err(undefined_function(name)),
        }
    }

    /// `receiver.method(args)`. An lvalue receiver gets the final `this`
    /// back.
    pub(crate) fn eval_method_call(
        &mut self,
        receiver: ExprId,
        method: Name,
        args: ExprRange,
    ) -> EvalResult {
        let method = self.name(method);
        let place = self.resolve_place(receiver)?;
        let object = match &place {
            Some(place) => self.read_place(place),
            None => self.eval_expr(receiver)?,
        };
        let sig = self.lookup_method(&object, method)?;
        let (values, refs) = self.eval_args(args)?;
        let out = self.invoke(&sig, values, Some(object))?;
        self.write_back(refs, out.args)?;
        if let (Some(place), Some(this)) = (place, out.this) {
            self.write_place(&place, this)?;
        }
        Ok(out.value)
    }

    /// Method `method` of a struct value.
    pub(crate) fn lookup_method(&self, value: &Value, method: &str) -> Result<Signature, EvalError> {
        let Value::Struct(object) = value else {
            return Err(not_a_struct(method, value.type_name()));
        };
        object.method(method).cloned().ok_or_else(|| {
            let class = object.class_name().unwrap_or_else(|| "struct".to_owned());
            undefined_method(&class, method)
        })
    }

    /// Evaluate arguments left to right, recording the place of each `&`
    /// argument.
    pub(crate) fn eval_args(&mut self, args: ExprRange) -> Result<(Vec<Value>, RefArgs), ControlAction> {
        let arena = self.arena.clone();
        let args = arena.expr_list(args);
        let mut values = Vec::with_capacity(args.len());
        let mut refs = RefArgs::new();
        for (position, &arg) in args.iter().enumerate() {
            if let ExprKind::Reference(inner) = arena.expr(arg).kind {
                if let Some(place) = self.resolve_place(inner)? {
                    values.push(self.read_place(&place));
                    refs.push((position, place));
                    continue;
                }
            }
            values.push(self.eval_expr(arg)?);
        }
        Ok((values, refs))
    }

    /// Store the final values of `&` arguments back into their places.
    pub(crate) fn write_back(&mut self, refs: RefArgs, mut finals: Vec<Value>) -> ExecResult {
        for (position, place) in refs {
            if let Some(value) = finals.get_mut(position) {
                let value = value.take();
                self.write_place(&place, value)?;
            }
        }
        Ok(())
    }

    /// Check the arguments, run the callee and apply its return spec.
    #[tracing::instrument(level = "debug", skip_all, fields(function = sig.name()))]
    pub(crate) fn invoke(
        &mut self,
        sig: &Signature,
        args: Vec<Value>,
        this: Option<Value>,
    ) -> Result<CallOutput, ControlAction> {
        let args = bind_arguments(sig, args)?;

        let limit = self.limits.max_call_depth;
        if self.call_depth >= limit {
            return Err(call_depth_exceeded(limit).into());
        }
        self.call_depth += 1;
        let frame = std::mem::take(&mut self.frame);

        let result = match sig.kind() {
            SignatureKind::Native(function) => {
                let function = *function;
                let mut args = args;
                match function(self, &mut args) {
                    Ok(value) | Err(ControlAction::Return(value)) => Ok(CallOutput { value, args, this }),
                    Err(ControlAction::Break | ControlAction::Continue) => Ok(CallOutput {
                        value: Value::Void,
                        args,
                        this,
                    }),
                    Err(other) => Err(other),
                }
            }
            SignatureKind::User(function) => self.call_user(function, args, this),
        };

        self.frame = frame;
        self.call_depth -= 1;

        let mut out = result?;
        out.value = apply_return(sig, out.value)?;
        Ok(out)
    }

    fn call_user(
        &mut self,
        function: &UserFunction,
        args: Vec<Value>,
        this: Option<Value>,
    ) -> Result<CallOutput, ControlAction> {
        let arena = function.arena.clone();
        let decl = *arena.function(function.decl);
        let params = arena.params(decl.params);
        let has_this = this.is_some();

        let mut scope = SymbolTable::new();
        let mut args = args.into_iter();
        for param in params {
            scope.add_variable(self.name(param.name), args.next().unwrap_or_default());
        }
        let extras: ArrayValue = args.collect();
        let argc = i64::try_from(extras.len()).unwrap_or(i64::MAX);
        scope.add_variable(ARGC, Value::Int(argc));
        scope.add_variable(ARGV, Value::Array(extras));
        if let Some(this) = this {
            scope.add_variable(THIS, this);
        }

        let caller_arena = std::mem::replace(&mut self.arena, arena.clone());
        let (result, mut scope) = {
            let mut scoped = self.scoped(scope);
            let result = scoped.exec_stmt(decl.body);
            (result, scoped.finish())
        };
        self.arena = caller_arena;

        let value = match result {
            Ok(()) | Err(ControlAction::Break | ControlAction::Continue) => Value::Void,
            Err(ControlAction::Return(value)) => value,
            Err(other) => return Err(other),
        };

        let mut finals: Vec<Value> = params
            .iter()
            .map(|param| take_symbol(&mut scope, self.name(param.name)))
            .collect();
        if let Value::Array(extras) = take_symbol(&mut scope, ARGV) {
            finals.extend(extras.values().cloned());
        }
        let this = has_this.then(|| take_symbol(&mut scope, THIS));

        Ok(CallOutput {
            value,
            args: finals,
            this,
        })
    }
}

/// Check counts, then check or coerce each argument against its spec.
fn bind_arguments(sig: &Signature, args: Vec<Value>) -> Result<Vec<Value>, EvalError> {
    let prototype = sig.prototype();
    if args.len() < sig.min_arity() {
        return Err(too_few_arguments(sig.name(), sig.min_arity(), args.len()));
    }
    if !prototype.repeats() && args.len() > prototype.len() {
        return Err(too_many_arguments(sig.name(), prototype.len(), args.len()));
    }
    args.into_iter()
        .enumerate()
        .map(|(index, arg)| match prototype.spec_for(index) {
            Some(ParamSpec::Exact(tag)) if arg.type_tag() != tag => Err(argument_type_mismatch(
                sig.name(),
                index + 1,
                tag.name(),
                arg.type_name(),
            )),
            Some(ParamSpec::Coerce(tag)) => arg.into_cast(tag),
            _ => Ok(arg),
        })
        .collect()
}

fn apply_return(sig: &Signature, value: Value) -> Result<Value, EvalError> {
    match sig.returns() {
        ParamSpec::Any => Ok(value),
        ParamSpec::Exact(tag) if value.type_tag() != tag => {
            Err(return_type_mismatch(sig.name(), tag.name(), value.type_name()))
        }
        ParamSpec::Exact(_) => Ok(value),
        ParamSpec::Coerce(tag) => value.into_cast(tag),
    }
}

/// Remove `name` from a finished call scope and return what it read as.
fn take_symbol(scope: &mut SymbolTable, name: &str) -> Value {
    match scope.delete(name) {
        Some(Symbol::Variable(value)) => value,
        Some(Symbol::Function(sig)) => Value::Function(sig),
        Some(Symbol::Class(_)) | None => Value::Void,
    }
}
