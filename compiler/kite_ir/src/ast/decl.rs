//! Declaration payloads stored in the arena's side tables.

use super::ranges::{ParamRange, StmtRange};
use crate::{ExprId, Name, Span, StmtId, TypeTag};

/// Function parameter. `ty == None` accepts any value.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Param {
    pub name: Name,
    pub ty: Option<TypeTag>,
    pub span: Span,
}

/// Named function or lambda.
///
/// Lambdas get their synthesized name at evaluation time, so `name` is
/// `None` for them.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct FunctionDecl {
    pub name: Option<Name>,
    pub params: ParamRange,
    /// Trailing `...`: extra arguments land in `argv`.
    pub variadic: bool,
    pub return_ty: Option<TypeTag>,
    pub body: StmtId,
    pub span: Span,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ClassDecl {
    pub name: Name,
    pub parent: Option<Name>,
    pub body: StmtRange,
    pub span: Span,
}

/// One `case label:` arm.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SwitchCase {
    pub label: ExprId,
    pub body: StmtRange,
    /// Execution continues into the next case's body.
    pub fallthrough: bool,
}

/// One `name = init` in a declaration.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Declarator {
    pub name: Name,
    pub init: Option<ExprId>,
    pub span: Span,
}

/// Array or struct literal entry. Positional array entries have no key.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct FieldInit {
    pub key: Option<ExprId>,
    pub value: ExprId,
}
