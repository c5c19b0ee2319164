//! Fatal evaluation errors and control-flow signals.
//!
//! Fatal errors are built through the `#[cold]` factory functions below, which
//! fill in both the structured [`EvalErrorKind`] and the rendered message. The
//! interpreter attaches a [`Location`] afterwards, from the node it was
//! evaluating when the error surfaced.

use crate::value::Value;
use std::fmt;

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, ControlAction>;

/// Result of executing a statement.
pub type ExecResult = Result<(), ControlAction>;

/// Non-local control flow.
///
/// Everything that unwinds evaluation travels as the `Err` side of
/// [`EvalResult`]/[`ExecResult`]: loops consume `Break`/`Continue`, the call
/// boundary consumes `Return`, `try` consumes `Throw`, and only the top-level
/// run consumes `Exit`.
#[derive(Clone, Debug)]
pub enum ControlAction {
    Break,
    Continue,
    Return(Value),
    Throw(Value),
    Exit(ExitReason),
}

/// Why a script run is ending early.
#[derive(Clone, Debug)]
pub enum ExitReason {
    /// `exit(status)` was called.
    Requested(i32),
    Fatal(EvalError),
}

impl ControlAction {
    #[inline]
    pub fn is_exit(&self) -> bool {
        matches!(self, ControlAction::Exit(_))
    }

    /// Attach a location to a fatal error that does not have one yet.
    #[must_use]
    pub fn with_location_if_missing(self, location: impl FnOnce() -> Location) -> Self {
        match self {
            ControlAction::Exit(ExitReason::Fatal(err)) if err.location.is_none() => {
                ControlAction::Exit(ExitReason::Fatal(err.with_location(location())))
            }
            other => other,
        }
    }
}

impl From<EvalError> for ControlAction {
    #[inline]
    fn from(err: EvalError) -> Self {
        ControlAction::Exit(ExitReason::Fatal(err))
    }
}

/// Source position of a fatal error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub file: String,
    pub line: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Category of a fatal error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Arithmetic
    DivisionByZero,
    ModuloByZero,

    // Conversion
    InvalidCast {
        from: &'static str,
        to: &'static str,
    },
    MalformedEscape {
        detail: String,
    },

    // Calls
    ArgumentTypeMismatch {
        function: String,
        position: usize,
        expected: &'static str,
        got: &'static str,
    },
    ReturnTypeMismatch {
        function: String,
        expected: &'static str,
        got: &'static str,
    },
    TooFewArguments {
        function: String,
        expected: usize,
        got: usize,
    },
    TooManyArguments {
        function: String,
        expected: usize,
        got: usize,
    },
    UndefinedFunction {
        name: String,
    },
    NotCallable {
        type_name: &'static str,
    },

    // Classes and methods
    UndefinedClass {
        name: String,
    },
    UndefinedMethod {
        class: String,
        method: String,
    },
    NotAStruct {
        method: String,
        type_name: &'static str,
    },
    CyclicInheritance {
        class: String,
    },

    // Exceptions
    UncaughtException {
        value: String,
    },

    // Limits
    CallDepthExceeded {
        limit: usize,
    },
    LoopDepthExceeded {
        limit: usize,
    },
    TryDepthExceeded {
        limit: usize,
    },
    OutOfMemory {
        slots: usize,
    },

    Custom {
        message: String,
    },
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        "argument"
    } else {
        "arguments"
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::InvalidCast { from, to } => write!(f, "cannot cast {from} to {to}"),
            Self::MalformedEscape { detail } => write!(f, "malformed escape sequence: {detail}"),
            Self::ArgumentTypeMismatch {
                function,
                position,
                expected,
                got,
            } => write!(
                f,
                "{function}(): argument {position} must be {expected}, {got} given"
            ),
            Self::ReturnTypeMismatch {
                function,
                expected,
                got,
            } => write!(f, "{function}() must return {expected}, returned {got}"),
            Self::TooFewArguments {
                function,
                expected,
                got,
            } => write!(
                f,
                "{function}() expects at least {expected} {}, {got} given",
                plural(*expected)
            ),
            Self::TooManyArguments {
                function,
                expected,
                got,
            } => write!(
                f,
                "{function}() expects at most {expected} {}, {got} given",
                plural(*expected)
            ),
            Self::UndefinedFunction { name } => write!(f, "call to undefined function {name}()"),
            Self::NotCallable { type_name } => write!(f, "value of type {type_name} is not callable"),
            Self::UndefinedClass { name } => write!(f, "class '{name}' not found"),
            Self::UndefinedMethod { class, method } => {
                write!(f, "call to undefined method {class}::{method}()")
            }
            Self::NotAStruct { method, type_name } => {
                write!(f, "call to method {method}() on a {type_name} value")
            }
            Self::CyclicInheritance { class } => {
                write!(f, "class '{class}' inherits from itself")
            }
            Self::UncaughtException { value } => write!(f, "uncaught exception: {value}"),
            Self::CallDepthExceeded { limit } => {
                write!(f, "maximum function nesting level of {limit} reached")
            }
            Self::LoopDepthExceeded { limit } => {
                write!(f, "maximum loop nesting level of {limit} reached")
            }
            Self::TryDepthExceeded { limit } => {
                write!(f, "maximum try nesting level of {limit} reached")
            }
            Self::OutOfMemory { slots } => {
                write!(f, "out of memory allocating {slots} array slots")
            }
            Self::Custom { message } => f.write_str(message),
        }
    }
}

/// Fatal evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Rendered `kind`, kept so hosts can read it without formatting.
    pub message: String,
    pub location: Option<Location>,
}

impl EvalError {
    /// Uncategorized error with a free-form message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        EvalError {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            location: None,
        }
    }

    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            location: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{location}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for EvalError {}

// Factories

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn invalid_cast(from: &'static str, to: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidCast { from, to })
}

#[cold]
pub fn malformed_escape(detail: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MalformedEscape {
        detail: detail.into(),
    })
}

#[cold]
pub fn argument_type_mismatch(
    function: &str,
    position: usize,
    expected: &'static str,
    got: &'static str,
) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentTypeMismatch {
        function: function.to_owned(),
        position,
        expected,
        got,
    })
}

#[cold]
pub fn return_type_mismatch(function: &str, expected: &'static str, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReturnTypeMismatch {
        function: function.to_owned(),
        expected,
        got,
    })
}

#[cold]
pub fn too_few_arguments(function: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TooFewArguments {
        function: function.to_owned(),
        expected,
        got,
    })
}

#[cold]
pub fn too_many_arguments(function: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TooManyArguments {
        function: function.to_owned(),
        expected,
        got,
    })
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_owned(),
    })
}

#[cold]
pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { type_name })
}

#[cold]
pub fn undefined_class(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedClass {
        name: name.to_owned(),
    })
}

#[cold]
pub fn undefined_method(class: &str, method: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedMethod {
        class: class.to_owned(),
        method: method.to_owned(),
    })
}

#[cold]
pub fn not_a_struct(method: &str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAStruct {
        method: method.to_owned(),
        type_name,
    })
}

#[cold]
pub fn cyclic_inheritance(class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CyclicInheritance {
        class: class.to_owned(),
    })
}

#[cold]
pub fn uncaught_exception(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UncaughtException {
        value: value.to_string(),
    })
}

#[cold]
pub fn call_depth_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CallDepthExceeded { limit })
}

#[cold]
pub fn loop_depth_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::LoopDepthExceeded { limit })
}

#[cold]
pub fn try_depth_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TryDepthExceeded { limit })
}

#[cold]
pub fn out_of_memory(slots: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::OutOfMemory { slots })
}
