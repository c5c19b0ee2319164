//! Runtime value model for the Kite evaluator.
//!
//! - [`Value`]: the closed tagged union every expression evaluates to. All
//!   variants except [`Resource`] have deep-copy semantics; `Clone` *is* the
//!   language's copy operation.
//! - [`SymbolTable`]: FNV-1a bucketed name table used for scopes and as the
//!   member table of structs.
//! - [`Signature`] and [`Prototype`]: the uniform description of native and
//!   user callables.
//! - [`EvalError`] and [`ControlAction`]: fatal errors and the non-local
//!   control flow that travels on the `Err` side of evaluation.
//! - [`CallHost`]: what native functions may ask of the running interpreter.

mod errors;
mod host;
mod signature;
mod symbol_table;
mod value;

pub use errors::{
    argument_type_mismatch, call_depth_exceeded, cyclic_inheritance, division_by_zero,
    invalid_cast, loop_depth_exceeded, malformed_escape, modulo_by_zero, not_a_struct,
    not_callable, out_of_memory, return_type_mismatch, too_few_arguments, too_many_arguments,
    try_depth_exceeded, uncaught_exception, undefined_class, undefined_function,
    undefined_method, ControlAction, EvalError, EvalErrorKind,
    EvalResult, ExecResult, ExitReason, Location,
};
pub use host::CallHost;
pub use signature::{
    NativeFn, ParamSpec, Prototype, PrototypeError, Signature, SignatureKind, UserFunction,
};
pub use symbol_table::{ClassDef, ClassKind, Symbol, SymbolTable};
pub use value::{ArrayValue, Comparison, Resource, StructValue, Value, CLASS_FIELD};
