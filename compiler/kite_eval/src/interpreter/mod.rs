//! The interpreter: the call context a host embeds.
//!
//! One `Interpreter` owns the global table, the scope stack, the streams and
//! every depth counter. It is single-threaded (values hold `Rc` handles) and
//! must be driven by one caller at a time.

mod builder;
mod scope_guard;

pub use builder::InterpreterBuilder;

use crate::diagnostics::Outcome;
use crate::environment::Environment;
use crate::io::{Input, Output};
use crate::limits::EvalLimits;
use kite_ir::{Name, SharedArena, SharedInterner, Span};
use kite_parse::{ParseError, ParseOutput};
use kite_value::{
    not_callable, uncaught_exception, ClassDef, ClassKind, ControlAction, EvalError, EvalResult,
    ExitReason, Location, NativeFn, PrototypeError, Signature, Symbol, Value,
};

/// Per-call-frame nesting state, saved and reset around every call.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Frame {
    pub(crate) loops: usize,
    pub(crate) switches: usize,
}

pub struct Interpreter {
    pub(crate) interner: SharedInterner,
    pub(crate) env: Environment,
    /// Arena of the code currently executing.
    pub(crate) arena: SharedArena,
    pub(crate) limits: EvalLimits,
    pub(crate) frame: Frame,
    pub(crate) call_depth: usize,
    pub(crate) try_depth: usize,
    pub(crate) lambda_count: u32,
    output: Output,
    error_output: Output,
    input: Input,
    safe_mode: bool,
    file_name: String,
    /// Set once the script has exited; the context stays terminal until
    /// [`Interpreter::reset`].
    exit: Option<Outcome>,
}

impl Interpreter {
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Interpreter with default limits, real streams and the prelude.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    /// Interner shared with the parser; programs passed to [`Interpreter::run`]
    /// must be parsed with it.
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn limits(&self) -> EvalLimits {
        self.limits
    }

    pub fn is_safe_mode(&self) -> bool {
        self.safe_mode
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The recorded exit, if the script has exited.
    pub fn exit_outcome(&self) -> Option<&Outcome> {
        self.exit.as_ref()
    }

    /// Clear the exit state and the per-run counters. Globals survive.
    pub fn reset(&mut self) {
        self.exit = None;
        self.frame = Frame::default();
        self.call_depth = 0;
        self.try_depth = 0;
        self.env.clear_locals();
    }

    /// Parse `source` with this interpreter's interner.
    pub fn parse(&self, file: &str, source: &str) -> ParseOutput {
        kite_parse::parse_source(source, file, &self.interner)
    }

    /// Parse and run a script. Parse errors prevent the run.
    pub fn run_source(&mut self, file: &str, source: &str) -> Result<Outcome, Vec<ParseError>> {
        let program = self.parse(file, source);
        if program.has_errors() {
            return Err(program.errors);
        }
        Ok(self.run(program))
    }

    /// Run `source` under the builder's file name.
    pub fn run_str(&mut self, source: &str) -> Result<Outcome, Vec<ParseError>> {
        let file = self.file_name.clone();
        self.run_source(&file, source)
    }

    /// Execute a parsed program in the global scope.
    ///
    /// A fatal error prints one `file:line: message` line to the error
    /// stream and ends the run with status 1.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, program: ParseOutput) -> Outcome {
        if let Some(outcome) = &self.exit {
            return outcome.clone();
        }
        let previous = std::mem::replace(&mut self.arena, SharedArena::new(program.arena));
        let result = self.exec_block(program.module.body);
        self.arena = previous;
        self.output.flush();

        match result {
            Ok(()) | Err(ControlAction::Break | ControlAction::Continue | ControlAction::Return(_)) => {
                Outcome::success()
            }
            Err(ControlAction::Throw(value)) => {
                self.record_exit(ExitReason::Fatal(uncaught_exception(&value)))
            }
            Err(ControlAction::Exit(reason)) => self.record_exit(reason),
        }
    }

    fn record_exit(&mut self, reason: ExitReason) -> Outcome {
        let outcome = match reason {
            ExitReason::Requested(status) => {
                tracing::debug!(status, "script exit");
                Outcome::exited(status)
            }
            ExitReason::Fatal(err) => {
                tracing::debug!(error = %err, "fatal error");
                self.error_output.write(format!("{err}\n").as_bytes());
                self.error_output.flush();
                Outcome::fatal(err)
            }
        };
        self.exit = Some(outcome.clone());
        outcome
    }

    // Registration

    /// Register a native function in the global scope.
    pub fn register_function(
        &mut self,
        name: &str,
        function: NativeFn,
        min_arity: usize,
        prototype: &str,
        returns: char,
    ) -> Result<(), PrototypeError> {
        let sig = Signature::native(name, function, min_arity, prototype, returns)?;
        self.env.global_mut().add_function(name, sig);
        Ok(())
    }

    /// Register a native class. Its constructor runs as a method named
    /// after the class and returns a struct whose fields are merged into the
    /// new instance.
    pub fn register_class(
        &mut self,
        name: &str,
        parent: Option<&str>,
        constructor: NativeFn,
        min_arity: usize,
        prototype: &str,
        returns: char,
    ) -> Result<(), PrototypeError> {
        let sig = Signature::native(name, constructor, min_arity, prototype, returns)?;
        self.env.global_mut().add_class(
            name,
            ClassDef {
                name: name.to_owned(),
                parent: parent.map(str::to_owned),
                kind: ClassKind::Native(sig),
            },
        );
        Ok(())
    }

    /// Bind a global; function values become function bindings.
    pub fn set_global(&mut self, name: &str, value: Value) {
        let globals = self.env.global_mut();
        match value {
            Value::Function(sig) => globals.add_function(name, sig),
            other => globals.add_variable(name, other),
        }
    }

    /// Copy of a global variable or function.
    pub fn global(&self, name: &str) -> Option<Value> {
        match self.env.global().lookup(name)? {
            Symbol::Variable(value) => Some(value.clone()),
            Symbol::Function(sig) => Some(Value::Function(sig.clone())),
            Symbol::Class(_) => None,
        }
    }

    // Invocation

    /// Call a global function by name; `None` if `name` is not a function.
    pub fn call_function(
        &mut self,
        name: &str,
        args: Vec<Value>,
    ) -> Option<Result<Value, EvalError>> {
        let sig = match self.env.global().lookup(name)? {
            Symbol::Function(sig) | Symbol::Variable(Value::Function(sig)) => sig.clone(),
            _ => return None,
        };
        Some(self.host_call(|interp| interp.invoke(&sig, args, None).map(|out| out.value)))
    }

    /// Call a method on a struct value, writing the final `this` back into
    /// `receiver`.
    pub fn call_method(
        &mut self,
        receiver: &mut Value,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, EvalError> {
        self.host_call(|interp| {
            let sig = interp.lookup_method(receiver, method)?;
            let out = interp.invoke(&sig, args, Some(receiver.take()))?;
            *receiver = out.this.unwrap_or_default();
            Ok(out.value)
        })
    }

    /// Call a function value.
    pub fn call_value(&mut self, callee: &Value, args: Vec<Value>) -> Result<Value, EvalError> {
        self.host_call(|interp| interp.call_callable(callee, args))
    }

    /// Run a host-initiated call and turn its control flow into a plain
    /// result. Exits are recorded as for a script run.
    fn host_call(
        &mut self,
        call: impl FnOnce(&mut Self) -> EvalResult,
    ) -> Result<Value, EvalError> {
        if let Some(outcome) = &self.exit {
            return Err(exit_error(outcome.clone()));
        }
        let result = call(self);
        self.output.flush();
        match result {
            Ok(value) | Err(ControlAction::Return(value)) => Ok(value),
            Err(ControlAction::Break | ControlAction::Continue) => Ok(Value::Void),
            Err(ControlAction::Throw(value)) => {
                let err = uncaught_exception(&value);
                self.record_exit(ExitReason::Fatal(err.clone()));
                Err(err)
            }
            Err(ControlAction::Exit(reason)) => Err(exit_error(self.record_exit(reason))),
        }
    }

    /// Invoke a callable value with evaluated arguments.
    pub(crate) fn call_callable(&mut self, callee: &Value, args: Vec<Value>) -> EvalResult {
        match callee {
            Value::Function(sig) => {
                let sig = sig.clone();
                Ok(self.invoke(&sig, args, None)?.value)
            }
            other => Err(not_callable(other.type_name()).into()),
        }
    }

    // Helpers shared by the exec modules

    /// Text of an interned name.
    #[inline]
    pub(crate) fn name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    /// Source location of `span` in the current arena.
    pub(crate) fn location(&self, span: Span) -> Location {
        let source = self.arena.source();
        Location {
            file: self.interner.lookup(source.file()).to_owned(),
            line: source.line(span),
        }
    }

    /// Raise a script exception: a `Throw` inside a `try`, fatal outside.
    pub(crate) fn raise(&self, value: Value) -> ControlAction {
        if self.try_depth > 0 {
            ControlAction::Throw(value)
        } else {
            uncaught_exception(&value).into()
        }
    }
}

/// Error reported to a host call on an exited context.
fn exit_error(outcome: Outcome) -> EvalError {
    match outcome.error {
        Some(err) => err,
        None => EvalError::new(format!("script exited with status {}", outcome.status)),
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl kite_value::CallHost for Interpreter {
    fn write_output(&mut self, bytes: &[u8]) {
        self.output.write(bytes);
    }

    fn write_error(&mut self, bytes: &[u8]) {
        self.error_output.write(bytes);
    }

    fn read_line(&mut self) -> Option<Vec<u8>> {
        self.output.flush();
        self.input.read_line()
    }

    fn call_value(&mut self, callee: &Value, args: Vec<Value>) -> EvalResult {
        self.call_callable(callee, args)
    }

    fn throw(&mut self, value: Value) -> ControlAction {
        self.raise(value)
    }

    fn safe_mode(&self) -> bool {
        self.safe_mode
    }
}

#[cfg(test)]
mod tests;
