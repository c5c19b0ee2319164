//! The runtime value type.

mod array;
mod cast;
mod compare;
mod resource;
mod structure;

pub use array::ArrayValue;
pub use compare::Comparison;
pub use resource::Resource;
pub use structure::{StructValue, CLASS_FIELD};

use crate::signature::Signature;
use kite_ir::TypeTag;
use std::borrow::Cow;
use std::fmt;

/// A Kite runtime value.
///
/// Every variant except `Resource` owns its contents outright, so `clone`
/// produces an independent deep copy. `Resource` clones share one handle.
#[derive(Default, PartialEq)]
pub enum Value {
    #[default]
    Void,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Byte string; may hold NULs and non-UTF-8 bytes.
    Str(Vec<u8>),
    Array(ArrayValue),
    Struct(StructValue),
    Function(Signature),
    Resource(Resource),
}

impl Value {
    #[inline]
    pub fn string(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Str(bytes.into())
    }

    pub fn array(values: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(ArrayValue::from_values(values))
    }

    #[inline]
    pub fn structure(value: StructValue) -> Self {
        Value::Struct(value)
    }

    #[inline]
    pub fn function(signature: Signature) -> Self {
        Value::Function(signature)
    }

    #[inline]
    pub fn resource(resource: Resource) -> Self {
        Value::Resource(resource)
    }

    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Void => TypeTag::Void,
            Value::Bool(_) => TypeTag::Bool,
            Value::Int(_) => TypeTag::Int,
            Value::Float(_) => TypeTag::Float,
            Value::Str(_) => TypeTag::String,
            Value::Array(_) => TypeTag::Array,
            Value::Struct(_) => TypeTag::Struct,
            Value::Function(_) => TypeTag::Function,
            Value::Resource(_) => TypeTag::Resource,
        }
    }

    /// Name reported by `typeof` and in diagnostics.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_tag().name()
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Str(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Lossy UTF-8 view of a string value.
    pub fn as_str_lossy(&self) -> Option<Cow<'_, str>> {
        self.as_bytes().map(String::from_utf8_lossy)
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut ArrayValue> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Value::Struct(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_struct_mut(&mut self) -> Option<&mut StructValue> {
        match self {
            Value::Struct(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Signature> {
        match self {
            Value::Function(sig) => Some(sig),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Value::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    /// Move the value out, leaving `Void` behind.
    #[inline]
    pub fn take(&mut self) -> Value {
        std::mem::replace(self, Value::Void)
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Void => Value::Void,
            Value::Bool(b) => Value::Bool(*b),
            Value::Int(n) => Value::Int(*n),
            Value::Float(f) => Value::Float(*f),
            Value::Str(bytes) => Value::Str(bytes.clone()),
            Value::Array(array) => Value::Array(array.clone()),
            Value::Struct(value) => Value::Struct(value.clone()),
            Value::Function(sig) => Value::Function(sig.clone()),
            Value::Resource(resource) => Value::Resource(resource.clone()),
        }
    }

    /// In-place copy: matching containers reuse their existing buffers.
    fn clone_from(&mut self, source: &Self) {
        match (self, source) {
            (Value::Str(dst), Value::Str(src)) => dst.clone_from(src),
            (Value::Array(dst), Value::Array(src)) => dst.clone_from(src),
            (Value::Struct(dst), Value::Struct(src)) => dst.clone_from(src),
            (dst, src) => *dst = src.clone(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<ArrayValue> for Value {
    fn from(array: ArrayValue) -> Self {
        Value::Array(array)
    }
}

impl From<StructValue> for Value {
    fn from(value: StructValue) -> Self {
        Value::Struct(value)
    }
}

/// Renders the String-cast of the value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_bytes()))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => f.write_str("Void"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x:?})"),
            Value::Str(bytes) => write!(f, "Str({:?})", String::from_utf8_lossy(bytes)),
            Value::Array(array) => fmt::Debug::fmt(array, f),
            Value::Struct(value) => fmt::Debug::fmt(value, f),
            Value::Function(sig) => write!(f, "Function({})", sig.name()),
            Value::Resource(resource) => fmt::Debug::fmt(resource, f),
        }
    }
}
