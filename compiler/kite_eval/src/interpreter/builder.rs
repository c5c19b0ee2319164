//! `InterpreterBuilder` for configuring an [`Interpreter`].

use super::{Frame, Interpreter};
use crate::environment::Environment;
use crate::io::{Input, Output};
use crate::limits::EvalLimits;
use crate::prelude;
use kite_ir::{SharedArena, SharedInterner};

/// Builder for [`Interpreter`].
///
/// Defaults: [`EvalLimits::default`], stdout/stderr, no input, the core
/// prelude registered, safe mode off.
pub struct InterpreterBuilder {
    interner: Option<SharedInterner>,
    limits: EvalLimits,
    output: Output,
    error_output: Output,
    input: Input,
    safe_mode: bool,
    prelude: bool,
    file_name: String,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            interner: None,
            limits: EvalLimits::default(),
            output: Output::Stdout,
            error_output: Output::Stderr,
            input: Input::Empty,
            safe_mode: false,
            prelude: true,
            file_name: String::from("<script>"),
        }
    }

    /// Share an existing interner (e.g. one a host already parsed with).
    #[must_use]
    pub fn interner(mut self, interner: SharedInterner) -> Self {
        self.interner = Some(interner);
        self
    }

    #[must_use]
    pub fn limits(mut self, limits: EvalLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.limits.max_call_depth = depth;
        self
    }

    /// Stream for `print` and `println`.
    #[must_use]
    pub fn output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    /// Stream for `eprint` and fatal diagnostics.
    #[must_use]
    pub fn error_output(mut self, output: Output) -> Self {
        self.error_output = output;
        self
    }

    #[must_use]
    pub fn input(mut self, input: Input) -> Self {
        self.input = input;
        self
    }

    /// Flag readable by natives through `CallHost::safe_mode`.
    #[must_use]
    pub fn safe_mode(mut self, enabled: bool) -> Self {
        self.safe_mode = enabled;
        self
    }

    #[must_use]
    pub fn with_prelude(mut self, enabled: bool) -> Self {
        self.prelude = enabled;
        self
    }

    /// File name used by [`Interpreter::run_str`].
    #[must_use]
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    pub fn build(self) -> Interpreter {
        let mut interpreter = Interpreter {
            interner: self.interner.unwrap_or_default(),
            env: Environment::new(),
            arena: SharedArena::default(),
            limits: self.limits,
            frame: Frame::default(),
            call_depth: 0,
            try_depth: 0,
            lambda_count: 0,
            output: self.output,
            error_output: self.error_output,
            input: self.input,
            safe_mode: self.safe_mode,
            file_name: self.file_name,
            exit: None,
        };
        if self.prelude {
            prelude::register(&mut interpreter);
        }
        interpreter
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
