//! FNV-1a bucketed symbol tables.
//!
//! A table has a fixed number of buckets (`2^order`). Entries live in an
//! insertion-ordered slot vector and buckets hold slot indices, so iteration
//! order is deterministic. Deleting a name empties its slot without
//! rehashing; re-adding the name reuses it.

use crate::signature::Signature;
use crate::value::Value;
use kite_ir::{ClassId, SharedArena};
use std::fmt;

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the name bytes.
pub(crate) fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET, |hash, &b| {
        (hash ^ u32::from(b)).wrapping_mul(FNV_PRIME)
    })
}

/// A class binding.
#[derive(Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
    pub parent: Option<String>,
    pub kind: ClassKind,
}

#[derive(Clone)]
pub enum ClassKind {
    /// Host class: the constructor runs as a method named after the class.
    Native(Signature),
    /// Script class: the body is re-executed on every instantiation.
    User { arena: SharedArena, decl: ClassId },
}

impl PartialEq for ClassKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ClassKind::Native(a), ClassKind::Native(b)) => a == b,
            (
                ClassKind::User { arena: a, decl: x },
                ClassKind::User { arena: b, decl: y },
            ) => x == y && a.ptr_eq(b),
            _ => false,
        }
    }
}

/// What a name is bound to.
#[derive(Clone, PartialEq)]
pub enum Symbol {
    Variable(Value),
    Function(Signature),
    Class(ClassDef),
}

#[derive(Clone)]
struct Slot {
    name: Box<str>,
    symbol: Option<Symbol>,
}

/// Name table used for scopes and struct members.
#[derive(Clone)]
pub struct SymbolTable {
    buckets: Vec<Vec<u32>>,
    slots: Vec<Slot>,
    live: usize,
}

impl SymbolTable {
    /// Bucket order of tables created with [`SymbolTable::new`].
    pub const DEFAULT_ORDER: u32 = 4;

    pub fn new() -> Self {
        Self::with_order(Self::DEFAULT_ORDER)
    }

    /// Table with `2^order` buckets. Orders above 16 are clamped.
    pub fn with_order(order: u32) -> Self {
        SymbolTable {
            buckets: vec![Vec::new(); 1 << order.min(16)],
            slots: Vec::new(),
            live: 0,
        }
    }

    #[inline]
    fn bucket_of(&self, name: &str) -> usize {
        // Bucket count is a power of two.
        fnv1a(name.as_bytes()) as usize & (self.buckets.len() - 1)
    }

    /// Slot holding `name`, live or not.
    fn find(&self, name: &str) -> Option<usize> {
        self.buckets[self.bucket_of(name)]
            .iter()
            .map(|&slot| slot as usize)
            .find(|&slot| &*self.slots[slot].name == name)
    }

    /// Bind `name` to `symbol`, replacing whatever it held.
    pub fn insert(&mut self, name: &str, symbol: Symbol) {
        match self.find(name) {
            Some(slot) => {
                let previous = self.slots[slot].symbol.replace(symbol);
                if previous.is_none() {
                    self.live += 1;
                }
            }
            None => {
                let bucket = self.bucket_of(name);
                let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
                self.buckets[bucket].push(index);
                self.slots.push(Slot {
                    name: name.into(),
                    symbol: Some(symbol),
                });
                self.live += 1;
            }
        }
    }

    pub fn add_variable(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.variable_mut(name) {
            *slot = value;
            return;
        }
        self.insert(name, Symbol::Variable(value));
    }

    /// Copy `value` into `name`, reusing the existing buffers of a variable
    /// of the same type.
    pub fn add_variable_ref(&mut self, name: &str, value: &Value) {
        if let Some(slot) = self.variable_mut(name) {
            slot.clone_from(value);
            return;
        }
        self.insert(name, Symbol::Variable(value.clone()));
    }

    pub fn add_function(&mut self, name: &str, signature: Signature) {
        self.insert(name, Symbol::Function(signature));
    }

    pub fn add_class(&mut self, name: &str, class: ClassDef) {
        self.insert(name, Symbol::Class(class));
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.find(name)
            .and_then(|slot| self.slots[slot].symbol.as_ref())
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        let slot = self.find(name)?;
        self.slots[slot].symbol.as_mut()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        match self.lookup(name)? {
            Symbol::Variable(value) => Some(value),
            _ => None,
        }
    }

    pub fn variable_mut(&mut self, name: &str) -> Option<&mut Value> {
        match self.lookup_mut(name)? {
            Symbol::Variable(value) => Some(value),
            _ => None,
        }
    }

    /// Unbind `name`; the slot stays allocated for reuse.
    pub fn delete(&mut self, name: &str) -> Option<Symbol> {
        let slot = self.find(name)?;
        let removed = self.slots[slot].symbol.take();
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Live entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.slots
            .iter()
            .filter_map(|slot| Some((&*slot.name, slot.symbol.as_ref()?)))
    }

    /// Live entries in insertion order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Symbol)> {
        self.slots
            .iter_mut()
            .filter_map(|slot| Some((&*slot.name, slot.symbol.as_mut()?)))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Tables are equal when their live entries match in order; bucket layout
/// and dead slots are ignored.
impl PartialEq for SymbolTable {
    fn eq(&self, other: &Self) -> bool {
        self.live == other.live && self.iter().eq(other.iter())
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, symbol) in self.iter() {
            match symbol {
                Symbol::Variable(value) => map.entry(&name, value),
                Symbol::Function(sig) => map.entry(&name, sig),
                Symbol::Class(class) => map.entry(&name, &format_args!("class {}", class.name)),
            };
        }
        map.finish()
    }
}
