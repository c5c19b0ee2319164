//! RAII scope guard for the interpreter's scope stack.
//!
//! [`ScopedInterpreter`] pushes a table on creation and pops it when
//! dropped, so every exit path (including `?` on a control action) leaves
//! the stack balanced. [`ScopedInterpreter::finish`] pops early and hands
//! the table back, which calls use to read final parameter values.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use kite_value::SymbolTable;

pub(crate) struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
    finished: bool,
}

impl ScopedInterpreter<'_> {
    /// Pop the scope now and return its table.
    pub(crate) fn finish(mut self) -> SymbolTable {
        self.finished = true;
        self.interpreter.env.pop_scope().unwrap_or_default()
    }
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.interpreter.env.pop_scope();
        }
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Push `table` as the innermost scope until the guard is dropped.
    pub(crate) fn scoped(&mut self, table: SymbolTable) -> ScopedInterpreter<'_> {
        self.env.push_scope(table);
        ScopedInterpreter {
            interpreter: self,
            finished: false,
        }
    }
}
