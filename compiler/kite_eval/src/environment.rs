//! The scope stack: one global table plus a stack of local tables.
//!
//! Only the innermost local table is visible besides the globals. Each call
//! frame pushes a fresh table, so a callee never sees its caller's locals.

use kite_value::{Symbol, SymbolTable, Value};

/// Bucket order of the global table.
const GLOBAL_ORDER: u32 = 8;

pub struct Environment {
    global: SymbolTable,
    locals: Vec<SymbolTable>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            global: SymbolTable::with_order(GLOBAL_ORDER),
            locals: Vec::new(),
        }
    }

    #[inline]
    pub fn global(&self) -> &SymbolTable {
        &self.global
    }

    #[inline]
    pub fn global_mut(&mut self) -> &mut SymbolTable {
        &mut self.global
    }

    /// Table receiving writes: the innermost local, or the globals at top
    /// level.
    pub fn current(&self) -> &SymbolTable {
        self.locals.last().unwrap_or(&self.global)
    }

    pub fn current_mut(&mut self) -> &mut SymbolTable {
        match self.locals.last_mut() {
            Some(local) => local,
            None => &mut self.global,
        }
    }

    /// Innermost local first, then the globals.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.locals
            .last()
            .and_then(|local| local.lookup(name))
            .or_else(|| self.global.lookup(name))
    }

    /// Value of `name` as an expression reads it: functions become function
    /// values; unbound names and classes read as `Void`.
    pub fn read(&self, name: &str) -> Value {
        match self.lookup(name) {
            Some(Symbol::Variable(value)) => value.clone(),
            Some(Symbol::Function(sig)) => Value::Function(sig.clone()),
            Some(Symbol::Class(_)) | None => Value::Void,
        }
    }

    pub fn push_scope(&mut self, table: SymbolTable) {
        self.locals.push(table);
        tracing::trace!(depth = self.locals.len(), "push scope");
    }

    pub fn pop_scope(&mut self) -> Option<SymbolTable> {
        let table = self.locals.pop();
        tracing::trace!(depth = self.locals.len(), "pop scope");
        table
    }

    /// Number of local tables on the stack.
    #[inline]
    pub fn depth(&self) -> usize {
        self.locals.len()
    }

    #[inline]
    pub fn is_top_level(&self) -> bool {
        self.locals.is_empty()
    }

    /// Drop every local table. Globals are kept.
    pub(crate) fn clear_locals(&mut self) {
        self.locals.clear();
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
