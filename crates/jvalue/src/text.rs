//! Text helpers shared by the value model and the decoder.
//!
//! String payloads are NUL-free: `duplicate` stops at the first NUL the way a
//! C string copy would, and the numeric readers accept the longest valid
//! prefix of their input instead of failing.

/// Owned copy of `text`, truncated at the first NUL byte.
pub fn duplicate(text: &str) -> String {
    match text.find('\0') {
        Some(end) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// Whitespace as the C locale classifies it (includes vertical tab).
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Best-effort integer reading: optional leading whitespace and sign, then
/// decimal digits up to the first non-digit. No digits yields 0; values
/// outside the `i64` range saturate.
pub fn leading_integer(text: &str) -> i64 {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() && is_space(bytes[i]) {
        i += 1;
    }
    let negative = match bytes.get(i) {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    let mut acc: i64 = 0;
    while let Some(&b) = bytes.get(i) {
        if !b.is_ascii_digit() {
            break;
        }
        let digit = i64::from(b - b'0');
        acc = if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        };
        i += 1;
    }
    acc
}

/// Best-effort float reading: the longest prefix of the form
/// `[ws][sign]digits[.digits][(e|E)[sign]digits]` (at least one mantissa
/// digit). No valid prefix yields 0.0.
pub fn leading_double(text: &str) -> f64 {
    let bytes = text.as_bytes();
    let mut start = 0;
    while start < bytes.len() && is_space(bytes[start]) {
        start += 1;
    }

    let mut i = start;
    if matches!(bytes.get(i), Some(b'-') | Some(b'+')) {
        i += 1;
    }
    let mut mantissa_digits = 0;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
        mantissa_digits += 1;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    // Only take the exponent when it is complete.
    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'-') | Some(b'+')) {
            j += 1;
        }
        if bytes.get(j).is_some_and(u8::is_ascii_digit) {
            while bytes.get(j).is_some_and(u8::is_ascii_digit) {
                j += 1;
            }
            i = j;
        }
    }

    text[start..i].parse().unwrap_or(0.0)
}
