//! Ordered arrays with optional string keys.

use super::Value;
use crate::errors::{out_of_memory, EvalError};
use rustc_hash::FxHashMap;
use std::fmt;

/// Most `Void` padding slots one out-of-range write may add.
const MAX_PADDING: usize = 1 << 20;

#[derive(Clone, PartialEq)]
struct Entry {
    key: Option<Vec<u8>>,
    value: Value,
}

/// Insertion-ordered sequence of values, some of which carry a string key.
///
/// Positional indices address every entry, keyed or not. `keys` maps each
/// key to the position of its entry and is rebuilt after removals.
#[derive(Default)]
pub struct ArrayValue {
    entries: Vec<Entry>,
    keys: FxHashMap<Vec<u8>, usize>,
}

impl ArrayValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ArrayValue {
            entries: Vec::with_capacity(capacity),
            keys: FxHashMap::default(),
        }
    }

    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        ArrayValue {
            entries: values
                .into_iter()
                .map(|value| Entry { key: None, value })
                .collect(),
            keys: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a possibly negative index to a position.
    fn position(&self, index: i64) -> Option<usize> {
        let len = self.entries.len();
        if index < 0 {
            let back = usize::try_from(index.unsigned_abs()).ok()?;
            len.checked_sub(back)
        } else {
            usize::try_from(index).ok().filter(|&i| i < len)
        }
    }

    pub fn push(&mut self, value: Value) {
        self.entries.push(Entry { key: None, value });
    }

    /// Append under `key`, or replace the value already stored there.
    pub fn push_keyed(&mut self, key: impl Into<Vec<u8>>, value: Value) {
        let key = key.into();
        if let Some(&pos) = self.keys.get(&key) {
            self.entries[pos].value = value;
            return;
        }
        self.keys.insert(key.clone(), self.entries.len());
        self.entries.push(Entry {
            key: Some(key),
            value,
        });
    }

    /// Element at `index`; negative indices count from the end.
    pub fn get(&self, index: i64) -> Option<&Value> {
        self.position(index).map(|pos| &self.entries[pos].value)
    }

    pub fn get_mut(&mut self, index: i64) -> Option<&mut Value> {
        self.position(index).map(|pos| &mut self.entries[pos].value)
    }

    pub fn get_key(&self, key: &[u8]) -> Option<&Value> {
        self.keys.get(key).map(|&pos| &self.entries[pos].value)
    }

    pub fn get_key_mut(&mut self, key: &[u8]) -> Option<&mut Value> {
        self.keys.get(key).map(|&pos| &mut self.entries[pos].value)
    }

    /// Store `value` at `index`, padding with `Void` past the end.
    ///
    /// Returns `Ok(false)` if a negative index reaches before the first
    /// element.
    pub fn set(&mut self, index: i64, value: Value) -> Result<bool, EvalError> {
        Ok(match self.slot(index)? {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        })
    }

    #[inline]
    pub fn set_key(&mut self, key: impl Into<Vec<u8>>, value: Value) {
        self.push_keyed(key, value);
    }

    /// Mutable slot at `index`, created (with `Void` padding) if it lies
    /// past the end. Padding beyond [`MAX_PADDING`] or a failed allocation
    /// is an out-of-memory error.
    pub fn slot(&mut self, index: i64) -> Result<Option<&mut Value>, EvalError> {
        if index < 0 {
            return Ok(self.get_mut(index));
        }
        let Ok(pos) = usize::try_from(index) else {
            return Ok(None);
        };
        let len = self.entries.len();
        if pos >= len {
            let extra = pos - len + 1;
            if extra > MAX_PADDING {
                return Err(out_of_memory(extra));
            }
            self.entries
                .try_reserve(extra)
                .map_err(|_| out_of_memory(extra))?;
            self.entries.resize_with(pos + 1, || Entry {
                key: None,
                value: Value::Void,
            });
        }
        Ok(Some(&mut self.entries[pos].value))
    }

    /// Mutable slot under `key`, appended as `Void` if absent.
    pub fn key_slot(&mut self, key: &[u8]) -> &mut Value {
        let pos = match self.keys.get(key) {
            Some(&pos) => pos,
            None => {
                let pos = self.entries.len();
                self.keys.insert(key.to_vec(), pos);
                self.entries.push(Entry {
                    key: Some(key.to_vec()),
                    value: Value::Void,
                });
                pos
            }
        };
        &mut self.entries[pos].value
    }

    pub fn remove(&mut self, index: i64) -> Option<Value> {
        let pos = self.position(index)?;
        let entry = self.entries.remove(pos);
        if entry.key.is_some() || pos < self.entries.len() {
            self.reindex();
        }
        Some(entry.value)
    }

    pub fn remove_key(&mut self, key: &[u8]) -> Option<Value> {
        let pos = *self.keys.get(key)?;
        let entry = self.entries.remove(pos);
        self.reindex();
        Some(entry.value)
    }

    fn reindex(&mut self) {
        self.keys.clear();
        for (pos, entry) in self.entries.iter().enumerate() {
            if let Some(key) = &entry.key {
                self.keys.insert(key.clone(), pos);
            }
        }
    }

    /// Entries in order, with their key if they have one.
    pub fn iter(&self) -> impl Iterator<Item = (Option<&[u8]>, &Value)> {
        self.entries
            .iter()
            .map(|entry| (entry.key.as_deref(), &entry.value))
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|entry| &entry.value)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.entries.iter_mut().map(|entry| &mut entry.value)
    }

    /// Keys for the `keys` builtin: the string key of keyed entries, the
    /// position of the others.
    pub fn keys(&self) -> ArrayValue {
        let mut out = ArrayValue::with_capacity(self.entries.len());
        for (pos, entry) in self.entries.iter().enumerate() {
            out.push(match &entry.key {
                Some(key) => Value::Str(key.clone()),
                None => Value::Int(i64::try_from(pos).unwrap_or(i64::MAX)),
            });
        }
        out
    }
}

impl Clone for ArrayValue {
    fn clone(&self) -> Self {
        ArrayValue {
            entries: self.entries.clone(),
            keys: self.keys.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.entries.clone_from(&source.entries);
        self.keys.clone_from(&source.keys);
    }
}

impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl FromIterator<Value> for ArrayValue {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        ArrayValue::from_values(iter)
    }
}

impl fmt::Debug for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for entry in &self.entries {
            match &entry.key {
                Some(key) => list.entry(&format_args!(
                    "{:?}: {:?}",
                    String::from_utf8_lossy(key),
                    entry.value
                )),
                None => list.entry(&entry.value),
            };
        }
        list.finish()
    }
}
