//! Kite Eval - the tree-walking evaluator for Kite scripts.
//!
//! # Architecture
//!
//! - [`Interpreter`]: the call context. Owns the scope stack, the streams,
//!   the depth counters and the exit state. Built with
//!   [`InterpreterBuilder`].
//! - `exec`: expression and statement evaluation, assignment places, call
//!   dispatch and class instantiation, all as `impl Interpreter` blocks.
//! - [`Environment`]: the global table plus a stack of local tables.
//! - [`evaluate_binary`]/[`evaluate_unary`]: operator semantics on values.
//!
//! Non-local control flow (break, continue, return, throw, exit) travels as
//! the `Err` side of [`EvalResult`]/[`ExecResult`] and is consumed by the
//! construct that owns it.

mod diagnostics;
mod environment;
mod escape;
mod exec;
pub mod interpreter;
mod io;
mod limits;
mod operators;
mod prelude;

pub use diagnostics::{Outcome, FATAL_STATUS};
pub use environment::Environment;
pub use escape::decode_escapes;
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use io::{Input, Output, SharedBuffer};
pub use limits::EvalLimits;
pub use operators::{compare_values, evaluate_binary, evaluate_unary, Promote};

// Re-export the value model so hosts need only this crate.
pub use kite_value::{
    ArrayValue, CallHost, ClassDef, ClassKind, Comparison, ControlAction, EvalError,
    EvalErrorKind, EvalResult, ExecResult, ExitReason, Location, NativeFn, ParamSpec, Prototype,
    PrototypeError, Resource, Signature, StructValue, Symbol, SymbolTable, Value,
};

#[cfg(test)]
mod tests;
