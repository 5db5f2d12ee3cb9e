//! Compact JSON encoder.
//!
//! Output is not pretty-printed, but small containers and large containers
//! are laid out differently:
//!
//! - Objects with at most 2 entries stay on one line: `{"a":1, "b":2}`
//! - Arrays with at most 4 elements stay on one line: `[1,2,3,4]`
//! - Larger containers put one entry per line, indented by one space per
//!   nesting level, with the closing bracket on its own line.
//!
//! Strings escape `"` `\` `/`, the short control escapes, other control bytes
//! as `\u00XX`, and every non-ASCII character as `\uXXXX` of the low 16 bits
//! of its code point (characters outside the BMP are not split into
//! surrogate pairs).
//!
//! # Example
//! ```
//! use jvalue::Value;
//! let doc = Value::new();
//! doc.field("name").set("Ada");
//! doc.field("tags").append("x");
//! assert_eq!(doc.to_string(), r#"{"name":"Ada", "tags":["x"]}"#);
//! ```

use std::fmt;
use std::io::Write;

use crate::error::Result;
use crate::types::{ArrayVec, Cell, ObjectMap, Value};

/// Objects with more entries than this are printed one entry per line.
pub const INLINE_OBJECT_MAX: usize = 2;

/// Arrays with more elements than this are printed one element per line.
pub const INLINE_ARRAY_MAX: usize = 4;

/// Encode a value tree as compact JSON text.
pub fn encode(value: &Value) -> String {
    let mut out = String::new();
    encode_value(value, 0, &mut out);
    out
}

/// Encode `value` and write it to `writer`.
pub fn write_to<W: Write>(value: &Value, mut writer: W) -> Result<()> {
    writer.write_all(encode(value).as_bytes())?;
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self))
    }
}

/// `level` is the nesting depth of the container holding this value
/// (0 for the root).
fn encode_value(value: &Value, level: usize, out: &mut String) {
    match &*value.cell() {
        Cell::Null => out.push_str("null"),
        Cell::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Cell::String(s) => encode_string(s, out),
        Cell::Integer(n) => out.push_str(&n.to_string()),
        Cell::Double(d) => out.push_str(&format_double(*d)),
        Cell::Object(map) => encode_object(map, level + 1, out),
        Cell::Array(items) => encode_array(items, level + 1, out),
    }
}

fn encode_object(map: &ObjectMap, level: usize, out: &mut String) {
    out.push('{');
    if map.len() <= INLINE_OBJECT_MAX {
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            encode_string(key, out);
            out.push(':');
            encode_value(value, level, out);
        }
    } else {
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            newline(level, out);
            encode_string(key, out);
            out.push(':');
            encode_value(value, level, out);
        }
        newline(level, out);
    }
    out.push('}');
}

fn encode_array(items: &ArrayVec, level: usize, out: &mut String) {
    out.push('[');
    if items.len() <= INLINE_ARRAY_MAX {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            encode_value(item, level, out);
        }
    } else {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            newline(level, out);
            encode_value(item, level, out);
        }
        newline(level, out);
    }
    out.push(']');
}

fn newline(level: usize, out: &mut String) {
    out.push('\n');
    out.extend(std::iter::repeat_n(' ', level));
}

/// Shortest text that reads back as the same double. Always carries a `.` or
/// an exponent so the decoder picks Double again. Non-finite values have no
/// JSON form and print as `null`.
fn format_double(d: f64) -> String {
    if !d.is_finite() {
        return "null".to_string();
    }
    format!("{d:?}")
}

fn encode_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '/' => out.push_str("\\/"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7F}' => push_unicode_escape(c as u32, out),
            c if !c.is_ascii() => push_unicode_escape(c as u32 & 0xFFFF, out),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn push_unicode_escape(code: u32, out: &mut String) {
    out.push_str(&format!("\\u{code:04x}"));
}
