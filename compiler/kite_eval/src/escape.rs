//! Escape decoding for string literals.
//!
//! Literals are stored raw in the arena and decoded each time they are
//! evaluated.

use kite_value::{malformed_escape, EvalError};
use std::borrow::Cow;

/// Decode backslash escapes in a raw literal.
///
/// Supported: `\n \t \r \b \f \e`, octal `\NNN` and `\oNNN`, decimal
/// `\dNNN`, hex `\xHH`, and `\\ \" \'`. Any other escaped character stands
/// for itself.
pub fn decode_escapes(raw: &[u8]) -> Result<Cow<'_, [u8]>, EvalError> {
    if !raw.contains(&b'\\') {
        return Ok(Cow::Borrowed(raw));
    }

    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        let b = raw[i];
        i += 1;
        if b != b'\\' {
            out.push(b);
            continue;
        }
        let Some(&marker) = raw.get(i) else {
            return Err(malformed_escape("backslash at end of string"));
        };
        i += 1;
        let byte = match marker {
            b'n' => b'\n',
            b't' => b'\t',
            b'r' => b'\r',
            b'b' => 0x08,
            b'f' => 0x0c,
            b'e' => 0x1b,
            b'0'..=b'7' => {
                // The marker is the first octal digit.
                i -= 1;
                numeric(raw, &mut i, 8, 3, 'o')?
            }
            b'o' => numeric(raw, &mut i, 8, 3, 'o')?,
            b'd' => numeric(raw, &mut i, 10, 3, 'd')?,
            b'x' => numeric(raw, &mut i, 16, 2, 'x')?,
            other => other,
        };
        out.push(byte);
    }
    Ok(Cow::Owned(out))
}

/// Read up to `max_digits` digits in `radix` starting at `*pos`.
fn numeric(
    raw: &[u8],
    pos: &mut usize,
    radix: u32,
    max_digits: usize,
    marker: char,
) -> Result<u8, EvalError> {
    let mut value: u32 = 0;
    let mut digits = 0;
    while digits < max_digits {
        let Some(digit) = raw.get(*pos).and_then(|&b| char::from(b).to_digit(radix)) else {
            break;
        };
        value = value * radix + digit;
        digits += 1;
        *pos += 1;
    }
    if digits == 0 {
        return Err(malformed_escape(format!("\\{marker} without digits")));
    }
    u8::try_from(value)
        .map_err(|_| malformed_escape(format!("\\{marker} value {value} is above 255")))
}

#[cfg(test)]
mod tests;
