//! The interpreter as seen from native functions.

use crate::errors::{ControlAction, EvalResult};
use crate::value::Value;

/// Services a native function may use while it runs.
///
/// Implemented by the interpreter; natives receive it as `&mut dyn CallHost`.
pub trait CallHost {
    /// Write raw bytes to the script's output stream.
    fn write_output(&mut self, bytes: &[u8]);

    fn write_error(&mut self, bytes: &[u8]);

    /// Next input line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> Option<Vec<u8>>;

    /// Invoke a function value with already-evaluated arguments.
    fn call_value(&mut self, callee: &Value, args: Vec<Value>) -> EvalResult;

    /// Raise `value` as a script exception.
    ///
    /// Inside a `try` this yields [`ControlAction::Throw`]; otherwise it is
    /// the fatal uncaught-exception error.
    fn throw(&mut self, value: Value) -> ControlAction;

    fn safe_mode(&self) -> bool;
}
