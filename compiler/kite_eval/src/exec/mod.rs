//! Evaluation of expressions and statements.
//!
//! Each submodule adds an `impl Interpreter` block:
//! - `expr`: expression evaluation and indexing
//! - `assign`: assignment places, auto-vivification and write-back
//! - `stmt`: statements and control flow
//! - `call`: argument binding and native/user dispatch
//! - `class`: class chains, namespaces, `new` and static access

mod assign;
mod call;
mod class;
mod expr;
mod stmt;

/// Bound in every user function frame: the extra arguments and their count.
pub(crate) const ARGC: &str = "argc";
pub(crate) const ARGV: &str = "argv";
/// Bound in method and constructor frames.
pub(crate) const THIS: &str = "this";
