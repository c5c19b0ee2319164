//! Struct values: a member table of fields and methods.

use super::Value;
use crate::signature::Signature;
use crate::symbol_table::{Symbol, SymbolTable};
use std::fmt;

/// Field holding the most-derived class name of an instance.
pub const CLASS_FIELD: &str = "__class";

/// Struct and class instance storage.
#[derive(Clone, Default, PartialEq)]
pub struct StructValue {
    members: SymbolTable,
}

impl StructValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(members: SymbolTable) -> Self {
        StructValue { members }
    }

    #[inline]
    pub fn members(&self) -> &SymbolTable {
        &self.members
    }

    #[inline]
    pub fn members_mut(&mut self) -> &mut SymbolTable {
        &mut self.members
    }

    pub fn into_table(self) -> SymbolTable {
        self.members
    }

    /// Number of live members, methods included.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of variable members.
    pub fn field_count(&self) -> usize {
        self.fields().count()
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.members.variable(name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.members.variable_mut(name)
    }

    pub fn set_field(&mut self, name: &str, value: Value) {
        self.members.add_variable(name, value);
    }

    pub fn remove_field(&mut self, name: &str) -> bool {
        self.members.delete(name).is_some()
    }

    pub fn set_method(&mut self, name: &str, signature: Signature) {
        self.members.add_function(name, signature);
    }

    /// A member function, or a field holding a function value.
    pub fn method(&self, name: &str) -> Option<&Signature> {
        match self.members.lookup(name)? {
            Symbol::Function(sig) | Symbol::Variable(Value::Function(sig)) => Some(sig),
            _ => None,
        }
    }

    /// The `__class` field of an instance.
    pub fn class_name(&self) -> Option<String> {
        self.field(CLASS_FIELD)
            .and_then(Value::as_str_lossy)
            .map(|name| name.into_owned())
    }

    /// Variable members in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.members.iter().filter_map(|(name, symbol)| match symbol {
            Symbol::Variable(value) => Some((name, value)),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.members.iter()
    }

    /// Copy every variable member of `other` into `self`.
    pub fn merge_fields(&mut self, other: &StructValue) {
        for (name, value) in other.fields() {
            self.members.add_variable_ref(name, value);
        }
    }
}

impl fmt::Debug for StructValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, symbol) in self.members.iter() {
            match symbol {
                Symbol::Variable(value) => map.entry(&name, value),
                Symbol::Function(sig) => map.entry(&name, &format_args!("fn {}", sig.name())),
                Symbol::Class(class) => map.entry(&name, &format_args!("class {}", class.name)),
            };
        }
        map.finish()
    }
}
