//! Arena storage for a parsed program.

use crate::ast::{
    CaseRange, ClassDecl, DeclRange, Declarator, Expr, ExprRange, FieldInit, FieldRange,
    FunctionDecl, Param, ParamRange, Stmt, StmtRange, SwitchCase,
};
use crate::{ClassId, ExprId, FunctionId, SourceMap, StmtId};
use std::ops::Deref;
use std::sync::Arc;

/// Converts a table length into the next `u32` index.
///
/// # Panics
/// Panics if a single program holds more than `u32::MAX` nodes of one kind.
#[inline]
fn next_index(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("arena overflow: {len} nodes"))
}

macro_rules! alloc_list {
    ($fn_name:ident, $field:ident, $item:ty, $range:ident) => {
        pub fn $fn_name(&mut self, items: impl IntoIterator<Item = $item>) -> $range {
            let start = next_index(self.$field.len());
            self.$field.extend(items);
            let len = next_index(self.$field.len()) - start;
            $range::new(start, len)
        }
    };
}

macro_rules! get_list {
    ($fn_name:ident, $field:ident, $item:ty, $range:ident) => {
        #[inline]
        pub fn $fn_name(&self, range: $range) -> &[$item] {
            &self.$field[range.indices()]
        }
    };
}

/// Flat storage for every node of one parsed source file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    expr_lists: Vec<ExprId>,
    stmt_lists: Vec<StmtId>,
    fields: Vec<FieldInit>,
    params: Vec<Param>,
    cases: Vec<SwitchCase>,
    decls: Vec<Declarator>,
    functions: Vec<FunctionDecl>,
    classes: Vec<ClassDecl>,
    source: SourceMap,
}

impl ExprArena {
    pub fn new(source: SourceMap) -> Self {
        ExprArena {
            source,
            ..ExprArena::default()
        }
    }

    #[inline]
    pub fn source(&self) -> &SourceMap {
        &self.source
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(next_index(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(next_index(self.stmts.len()));
        self.stmts.push(stmt);
        id
    }

    pub fn alloc_function(&mut self, decl: FunctionDecl) -> FunctionId {
        let id = FunctionId::new(next_index(self.functions.len()));
        self.functions.push(decl);
        id
    }

    pub fn alloc_class(&mut self, decl: ClassDecl) -> ClassId {
        let id = ClassId::new(next_index(self.classes.len()));
        self.classes.push(decl);
        id
    }

    alloc_list!(alloc_expr_list, expr_lists, ExprId, ExprRange);
    alloc_list!(alloc_stmt_list, stmt_lists, StmtId, StmtRange);
    alloc_list!(alloc_fields, fields, FieldInit, FieldRange);
    alloc_list!(alloc_params, params, Param, ParamRange);
    alloc_list!(alloc_cases, cases, SwitchCase, CaseRange);
    alloc_list!(alloc_decls, decls, Declarator, DeclRange);

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    #[inline]
    pub fn function(&self, id: FunctionId) -> &FunctionDecl {
        &self.functions[id.index()]
    }

    #[inline]
    pub fn class(&self, id: ClassId) -> &ClassDecl {
        &self.classes[id.index()]
    }

    get_list!(expr_list, expr_lists, ExprId, ExprRange);
    get_list!(stmt_list, stmt_lists, StmtId, StmtRange);
    get_list!(fields, fields, FieldInit, FieldRange);
    get_list!(params, params, Param, ParamRange);
    get_list!(cases, cases, SwitchCase, CaseRange);
    get_list!(decls, decls, Declarator, DeclRange);

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }
}

/// Immutable, shareable arena.
///
/// Function and class values keep one of these alive so their bodies stay
/// reachable after the program that declared them has finished running.
#[derive(Clone, Debug)]
pub struct SharedArena(Arc<ExprArena>);

impl SharedArena {
    pub fn new(arena: ExprArena) -> Self {
        SharedArena(Arc::new(arena))
    }

    /// Same underlying arena.
    #[inline]
    pub fn ptr_eq(&self, other: &SharedArena) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SharedArena {
    type Target = ExprArena;

    fn deref(&self) -> &ExprArena {
        &self.0
    }
}

impl Default for SharedArena {
    fn default() -> Self {
        SharedArena::new(ExprArena::default())
    }
}

/// Top-level statement list of a parsed file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Module {
    pub body: StmtRange,
}
