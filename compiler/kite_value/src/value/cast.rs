//! The cast matrix.
//!
//! Casts are total except toward `function` and `resource`, which only
//! accept a value that already has that type.

use super::{ArrayValue, StructValue, Value};
use crate::errors::{invalid_cast, EvalError};
use crate::symbol_table::SymbolTable;
use kite_ir::TypeTag;

impl Value {
    pub fn cast(&self, to: TypeTag) -> Result<Value, EvalError> {
        Ok(match to {
            TypeTag::Void => Value::Void,
            TypeTag::Bool => Value::Bool(self.to_bool()),
            TypeTag::Int => Value::Int(self.to_int()),
            TypeTag::Float => Value::Float(self.to_float()),
            TypeTag::String => Value::Str(self.to_bytes()),
            TypeTag::Array => Value::Array(self.to_array()),
            TypeTag::Struct => Value::Struct(self.to_struct()),
            TypeTag::Function | TypeTag::Resource => {
                if self.type_tag() == to {
                    self.clone()
                } else {
                    return Err(invalid_cast(self.type_name(), to.name()));
                }
            }
        })
    }

    /// Like [`Value::cast`], without copying when the type already matches.
    pub fn into_cast(self, to: TypeTag) -> Result<Value, EvalError> {
        if self.type_tag() == to {
            Ok(self)
        } else {
            self.cast(to)
        }
    }

    /// Truthiness; the Bool cast.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Void => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(bytes) => string_to_bool(bytes),
            Value::Array(array) => !array.is_empty(),
            Value::Struct(value) => value.field_count() != 0,
            Value::Function(_) | Value::Resource(_) => true,
        }
    }

    #[allow(clippy::cast_possible_truncation, reason = "float-to-int casts saturate")]
    pub fn to_int(&self) -> i64 {
        match self {
            Value::Void => 0,
            Value::Bool(b) => i64::from(*b),
            Value::Int(n) => *n,
            Value::Float(f) => *f as i64,
            Value::Str(bytes) => leading_int(bytes),
            Value::Array(array) => count(array.len()),
            Value::Struct(value) => count(value.field_count()),
            Value::Function(_) => 1,
            Value::Resource(resource) => i64::try_from(resource.id()).unwrap_or(i64::MAX),
        }
    }

    #[allow(clippy::cast_precision_loss, reason = "large ints round to the nearest float")]
    pub fn to_float(&self) -> f64 {
        match self {
            Value::Float(f) => *f,
            Value::Str(bytes) => leading_float(bytes),
            other => other.to_int() as f64,
        }
    }

    /// The String cast.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_bytes(&mut out);
        out
    }

    /// Append the String cast of `self` to `out`.
    pub fn write_bytes(&self, out: &mut Vec<u8>) {
        match self {
            Value::Void => {}
            Value::Bool(true) => out.extend_from_slice(b"true"),
            Value::Bool(false) => out.extend_from_slice(b"false"),
            Value::Int(n) => out.extend_from_slice(n.to_string().as_bytes()),
            Value::Float(f) => out.extend_from_slice(f.to_string().as_bytes()),
            Value::Str(bytes) => out.extend_from_slice(bytes),
            Value::Array(array) => {
                for value in array.values() {
                    value.write_bytes(out);
                }
            }
            Value::Struct(value) => {
                for (_, field) in value.fields() {
                    field.write_bytes(out);
                }
            }
            Value::Function(sig) => out.extend_from_slice(sig.name().as_bytes()),
            Value::Resource(resource) => out.extend_from_slice(resource.to_string().as_bytes()),
        }
    }

    pub fn to_array(&self) -> ArrayValue {
        match self {
            Value::Void => ArrayValue::new(),
            Value::Str(bytes) => bytes.iter().map(|&b| Value::Str(vec![b])).collect(),
            Value::Array(array) => array.clone(),
            Value::Struct(value) => {
                let mut array = ArrayValue::with_capacity(value.len());
                for (name, field) in value.fields() {
                    array.push_keyed(name, field.clone());
                }
                array
            }
            scalar => ArrayValue::from_values([scalar.clone()]),
        }
    }

    pub fn to_struct(&self) -> StructValue {
        match self {
            Value::Struct(value) => value.clone(),
            Value::Function(_) | Value::Resource(_) => StructValue::new(),
            Value::Array(array) => array_to_struct(array),
            other => array_to_struct(&other.to_array()),
        }
    }
}

fn count(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

fn array_to_struct(array: &ArrayValue) -> StructValue {
    let mut members = SymbolTable::new();
    for (pos, (key, value)) in array.iter().enumerate() {
        let name = match key {
            Some(key) => String::from_utf8_lossy(key).into_owned(),
            None => pos.to_string(),
        };
        members.add_variable(&name, value.clone());
    }
    StructValue::from_table(members)
}

fn string_to_bool(bytes: &[u8]) -> bool {
    if bytes.is_empty() || bytes == b"false" {
        return false;
    }
    match full_number(bytes) {
        Some(n) => n != 0.0,
        None => true,
    }
}

/// Parse the whole trimmed string as a number, if it is one.
#[allow(clippy::cast_precision_loss, reason = "only compared against zero")]
fn full_number(bytes: &[u8]) -> Option<f64> {
    let text = std::str::from_utf8(bytes).ok()?.trim();
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok().map(|n| n as f64);
    }
    let prefix = float_prefix(text.as_bytes());
    if prefix.is_empty() || prefix.len() != text.len() {
        return None;
    }
    prefix.parse().ok()
}

fn skip_space(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[start..]
}

/// Leading integer of a string: optional sign, then `0x` hex or decimal
/// digits. Saturates on overflow; no digits give 0.
pub(crate) fn leading_int(bytes: &[u8]) -> i64 {
    let mut rest = skip_space(bytes);
    let negative = match rest.first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };
    let radix: u32 = match rest {
        [b'0', b'x' | b'X', next, ..] if next.is_ascii_hexdigit() => {
            rest = &rest[2..];
            16
        }
        _ => 10,
    };
    let mut magnitude: i128 = 0;
    for &b in rest {
        let Some(digit) = char::from(b).to_digit(radix) else {
            break;
        };
        magnitude = (magnitude * i128::from(radix) + i128::from(digit)).min(i128::from(u64::MAX));
    }
    let signed = if negative { -magnitude } else { magnitude };
    i64::try_from(signed).unwrap_or(if negative { i64::MIN } else { i64::MAX })
}

/// Leading float of a string; 0.0 if there is none.
#[allow(clippy::cast_precision_loss, reason = "hex prefixes read as integers")]
pub(crate) fn leading_float(bytes: &[u8]) -> f64 {
    let rest = skip_space(bytes);
    if let [b'0', b'x' | b'X', ..] | [b'+' | b'-', b'0', b'x' | b'X', ..] = rest {
        return leading_int(rest) as f64;
    }
    let prefix = float_prefix(rest);
    prefix.parse().unwrap_or(0.0)
}

/// Split off the longest prefix that reads as a decimal float, including
/// the `inf`/`nan` spellings produced by float formatting.
fn float_prefix(bytes: &[u8]) -> &str {
    let len = bytes.len();
    let mut i = 0;
    if i < len && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    for word in ["infinity", "inf", "nan"] {
        let end = i + word.len();
        if end <= len && bytes[i..end].eq_ignore_ascii_case(word.as_bytes()) {
            return ascii(&bytes[..end]);
        }
    }
    let int_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < len && bytes[i] == b'.' {
        let mut j = i + 1;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > i + 1 {
            digits += j - i - 1;
            i = j;
        }
    }
    if digits == 0 {
        return "";
    }
    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < len && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    ascii(&bytes[..i])
}

fn ascii(bytes: &[u8]) -> &str {
    std::str::from_utf8(bytes).unwrap_or("")
}
