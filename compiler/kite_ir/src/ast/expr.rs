//! Expression nodes.

use super::operators::{BinaryOp, UnaryOp, UpdateOp};
use super::ranges::{ExprRange, FieldRange};
use crate::{ExprId, FunctionId, Name, Span, TypeTag};
use std::fmt;

/// Expression node.
#[derive(Copy, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// How an index segment was written: `a[k]` or `a.k`.
///
/// Both read the same way. They differ in which container an assignment
/// auto-vivifies into a slot that is not already an array or struct.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Access {
    Element,
    Field,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ExprKind {
    // Constants
    Void,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Raw literal text, escapes not yet decoded.
    Str(Name),

    /// `__FILE__`
    File,
    /// `__LINE__`
    Line,

    Ident(Name),

    /// `[a, b, "k": c]`
    ArrayLit(FieldRange),
    /// `{ x: 1, "y": 2 }`
    StructLit(FieldRange),

    /// `base[key]` or `base.key`
    Index {
        base: ExprId,
        key: ExprId,
        access: Access,
    },

    /// `target = value` or `target op= value`
    Assign {
        target: ExprId,
        op: Option<BinaryOp>,
        value: ExprId,
    },

    /// `(type) expr`
    Cast { ty: TypeTag, expr: ExprId },

    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    Unary { op: UnaryOp, operand: ExprId },

    /// `++x`, `x--`, ...
    Update {
        op: UpdateOp,
        prefix: bool,
        target: ExprId,
    },

    Ternary {
        cond: ExprId,
        then_expr: ExprId,
        else_expr: ExprId,
    },

    /// `&expr` in an argument list.
    Reference(ExprId),

    /// `function (params) { ... }`
    Lambda(FunctionId),

    /// `callee(args)`
    Call { callee: ExprId, args: ExprRange },

    /// `receiver.method(args)`
    MethodCall {
        receiver: ExprId,
        method: Name,
        args: ExprRange,
    },

    /// `new Class(args)`
    New { class: Name, args: ExprRange },

    /// `Class::member(args)`
    StaticCall {
        class: Name,
        member: Name,
        args: ExprRange,
    },

    /// `Class::member`
    StaticField { class: Name, member: Name },
}

impl ExprKind {
    /// Constant literal node. Order operators promote away from these.
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            ExprKind::Void
                | ExprKind::Bool(_)
                | ExprKind::Int(_)
                | ExprKind::Float(_)
                | ExprKind::Str(_)
        )
    }

    /// Node that can stand on the left of `=`.
    pub const fn is_place(&self) -> bool {
        matches!(self, ExprKind::Ident(_) | ExprKind::Index { .. })
    }
}
