//! Statement nodes.

use super::ranges::{CaseRange, DeclRange, StmtRange};
use crate::{ClassId, ExprId, FunctionId, Name, Span, StmtId, TypeTag};
use std::fmt;

/// Statement node.
#[derive(Copy, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    #[inline]
    pub const fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum StmtKind {
    /// `;`
    Empty,

    Expr(ExprId),

    /// `{ ... }`. Blocks do not open a scope.
    Block(StmtRange),

    /// `var a = 1, b;` or `int a = 1;`. `ty` is `None` for `var`.
    Declare {
        ty: Option<TypeTag>,
        decls: DeclRange,
    },

    If {
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },

    While { cond: ExprId, body: StmtId },

    DoWhile { body: StmtId, cond: ExprId },

    For {
        init: Option<StmtId>,
        cond: Option<ExprId>,
        step: Option<ExprId>,
        body: StmtId,
    },

    Switch {
        subject: ExprId,
        cases: CaseRange,
        default: Option<StmtRange>,
    },

    Break,
    Continue,
    Return(Option<ExprId>),

    Try {
        body: StmtId,
        binding: Name,
        handler: StmtId,
    },

    Throw(ExprId),

    Function(FunctionId),
    Class(ClassId),
}
