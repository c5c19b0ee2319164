//! Flat AST node types.
//!
//! Nodes never box their children. Sub-expressions are [`ExprId`](crate::ExprId)s,
//! lists are typed ranges into side tables of the [`ExprArena`](crate::ExprArena),
//! and every node kind is `Copy` so the evaluator can read a node out of the
//! arena without keeping a borrow alive.

mod decl;
mod expr;
mod operators;
mod ranges;
mod stmt;

pub use decl::{ClassDecl, Declarator, FieldInit, FunctionDecl, Param, SwitchCase};
pub use expr::{Access, Expr, ExprKind};
pub use operators::{BinaryOp, UnaryOp, UpdateOp};
pub use ranges::{CaseRange, DeclRange, ExprRange, FieldRange, ParamRange, StmtRange};
pub use stmt::{Stmt, StmtKind};

#[cfg(test)]
mod tests;
