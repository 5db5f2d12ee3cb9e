//! Recursive-descent JSON decoder over a byte stream.
//!
//! The decoder reads from any [`BufRead`] and consumes only the bytes that
//! belong to the value it is parsing, so several values can be read from one
//! stream in turn.
//!
//! Dispatch is on the first non-whitespace byte:
//!
//! - digit, `.` or `-` → number (Double if it has a `.` or exponent, else Integer)
//! - `"` → string, `{` → object, `[` → array
//! - `n`/`t`/`f` (any case) → the `null`/`true`/`false` literal
//! - end of input → nothing parsed (`Ok(None)`), not an error
//! - anything else → fatal [`JsonError::Parse`]
//!
//! # Key design decisions
//!
//! - **Two outcomes for a parse step**: `Ok(None)` / `Ok(false)` means "nothing
//!   here" and lets the caller decide; `Err` aborts the whole top-level value.
//!   Inside containers a "nothing here" always becomes a fatal error.
//! - **In-place population**: [`Decoder::parse_into`] clears its target to Null
//!   and fills it as it goes. On error the target holds whatever was complete
//!   before the bad token.
//! - **Lenient number text**: out-of-range integers saturate and no overflow
//!   is reported.

use std::io::BufRead;

use log::{debug, trace};

use crate::error::{JsonError, Result};
use crate::limits::Limits;
use crate::text::{is_space, leading_double, leading_integer};
use crate::types::{ObjectMap, Value};

/// Streaming decoder state.
pub struct Decoder<R> {
    reader: R,
    limits: Limits,
    /// Bytes consumed so far.
    offset: usize,
    depth: usize,
    failed: bool,
}

impl<R: BufRead> Decoder<R> {
    /// Decoder with default [`Limits`].
    pub fn new(reader: R) -> Self {
        Self::with_limits(reader, Limits::default())
    }

    pub fn with_limits(reader: R, limits: Limits) -> Self {
        Self {
            reader,
            limits,
            offset: 0,
            depth: 0,
            failed: false,
        }
    }

    /// Bytes consumed from the reader so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Parse the next value into `target`.
    ///
    /// `target` is set to Null first. Returns `Ok(false)` if the stream held
    /// only whitespace.
    pub fn parse_into(&mut self, target: &Value) -> Result<bool> {
        self.depth = 0;
        trace!("decoding value at byte {}", self.offset);
        let result = self.parse_value(target);
        if let Err(err) = &result {
            self.failed = true;
            debug!("decode aborted: {err}");
        }
        result
    }

    /// Parse the next value into a fresh cell; `None` at end of input.
    pub fn next_value(&mut self) -> Result<Option<Value>> {
        let value = Value::new();
        Ok(self.parse_into(&value)?.then_some(value))
    }

    /// Skip whitespace and report whether anything but end of input remains.
    pub fn at_end(&mut self) -> Result<bool> {
        Ok(self.skip_space()?.is_none())
    }

    // ------------------------------------------------------------------
    // Byte-level reading
    // ------------------------------------------------------------------

    fn peek(&mut self) -> Result<Option<u8>> {
        Ok(self.reader.fill_buf()?.first().copied())
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.peek()?;
        if byte.is_some() {
            self.reader.consume(1);
            self.offset += 1;
        }
        Ok(byte)
    }

    /// Consume whitespace and return the next byte without consuming it.
    fn skip_space(&mut self) -> Result<Option<u8>> {
        loop {
            match self.peek()? {
                Some(b) if is_space(b) => {
                    self.reader.consume(1);
                    self.offset += 1;
                }
                other => return Ok(other),
            }
        }
    }

    fn fatal(&self, message: impl Into<String>) -> JsonError {
        JsonError::parse(self.offset, message)
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if !self.limits.allows_depth(self.depth) {
            return Err(JsonError::NestingTooDeep {
                depth: self.depth,
                max: self.limits.max_depth.unwrap_or(usize::MAX),
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // ------------------------------------------------------------------
    // Grammar
    // ------------------------------------------------------------------

    fn parse_value(&mut self, target: &Value) -> Result<bool> {
        target.set_null();
        let Some(first) = self.skip_space()? else {
            return Ok(false);
        };
        match first {
            b'0'..=b'9' | b'.' | b'-' => self.parse_number(target),
            b'"' => self.parse_string(target),
            b'{' => self.parse_object(target),
            b'[' => self.parse_array(target),
            b'n' | b'N' => {
                self.expect_literal(b"null")?;
                Ok(true)
            }
            b't' | b'T' => {
                self.expect_literal(b"true")?;
                target.set_bool(true);
                Ok(true)
            }
            b'f' | b'F' => {
                self.expect_literal(b"false")?;
                target.set_bool(false);
                Ok(true)
            }
            other => Err(self.fatal(format!(
                "could not determine json type from leading character: {:?} <{:02x}>",
                other as char, other
            ))),
        }
    }

    /// Read `word.len()` bytes and compare case-insensitively.
    fn expect_literal(&mut self, word: &[u8]) -> Result<()> {
        let mut read = Vec::with_capacity(word.len());
        for _ in 0..word.len() {
            match self.next_byte()? {
                Some(b) => read.push(b),
                None => break,
            }
        }
        if !read.eq_ignore_ascii_case(word) {
            return Err(self.fatal(format!(
                "expected '{}', found '{}'",
                String::from_utf8_lossy(word),
                String::from_utf8_lossy(&read)
            )));
        }
        Ok(())
    }

    fn parse_number(&mut self, target: &Value) -> Result<bool> {
        let mut text = String::new();
        let mut period = false;
        let mut exponent = false;

        if self.peek()? == Some(b'-') {
            self.next_byte()?;
            text.push('-');
        }

        while let Some(b) = self.peek()? {
            match b {
                b'0'..=b'9' => {
                    self.next_byte()?;
                    text.push(b as char);
                }
                b'.' if !period => {
                    self.next_byte()?;
                    text.push('.');
                    period = true;
                }
                b'e' | b'E' if !exponent => {
                    self.next_byte()?;
                    text.push('e');
                    self.parse_exponent(&mut text)?;
                    exponent = true;
                }
                _ => break,
            }
        }

        if period || exponent {
            target.set_double(leading_double(&text));
        } else {
            target.set_integer(leading_integer(&text));
        }
        Ok(true)
    }

    /// The part after `e`: a digit, or a sign followed by a digit. Further
    /// digits are picked up by the caller's loop.
    fn parse_exponent(&mut self, text: &mut String) -> Result<()> {
        match self.next_byte()? {
            Some(b) if b.is_ascii_digit() => text.push(b as char),
            Some(sign @ (b'+' | b'-')) => {
                text.push(sign as char);
                match self.next_byte()? {
                    Some(b) if b.is_ascii_digit() => text.push(b as char),
                    _ => return Err(self.fatal("missing digits in exponent")),
                }
            }
            _ => return Err(self.fatal("bad exponential format")),
        }
        Ok(())
    }

    fn parse_string(&mut self, target: &Value) -> Result<bool> {
        match self.raw_string()? {
            Some(s) => {
                target.set_string(&s);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// A quoted string with escapes resolved. `None` if the next token does
    /// not start with `"`.
    fn raw_string(&mut self) -> Result<Option<String>> {
        if self.skip_space()? != Some(b'"') {
            return Ok(None);
        }
        self.next_byte()?;

        let mut bytes = Vec::new();
        loop {
            let Some(b) = self.next_byte()? else {
                return Err(self.fatal("found end of input inside string"));
            };
            match b {
                b'"' => break,
                b'\\' => self.parse_escape(&mut bytes)?,
                _ => bytes.push(b),
            }
        }

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| self.fatal("invalid UTF-8 in string"))
    }

    fn parse_escape(&mut self, out: &mut Vec<u8>) -> Result<()> {
        let Some(b) = self.next_byte()? else {
            return Err(self.fatal("found end of input in escape sequence"));
        };
        match b {
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'u' => {
                let code = self.read_hex4()?;
                // Lone surrogate halves have no UTF-8 form.
                let ch = char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            // `"`, `\`, `/` and anything unrecognized stand for themselves.
            other => out.push(other),
        }
        Ok(())
    }

    fn read_hex4(&mut self) -> Result<u32> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .next_byte()?
                .and_then(|b| (b as char).to_digit(16))
                .ok_or_else(|| self.fatal("bad hex character"))?;
            code = (code << 4) | digit;
        }
        Ok(code)
    }

    fn parse_object(&mut self, target: &Value) -> Result<bool> {
        self.next_byte()?;
        self.enter()?;
        target.set_object(ObjectMap::new());

        if self.skip_space()? == Some(b'}') {
            self.next_byte()?;
            self.leave();
            return Ok(true);
        }

        loop {
            let Some((key, value)) = self.parse_pair()? else {
                return Err(self.fatal("bad pair in object"));
            };
            // Duplicate keys: the later value wins.
            target.bind_field(&key, value);

            self.skip_space()?;
            match self.next_byte()? {
                Some(b'}') => break,
                Some(b',') => continue,
                _ => return Err(self.fatal("missing comma in object")),
            }
        }

        self.leave();
        Ok(true)
    }

    /// `"key": value`. `None` when the next token is `}`, not a string, or
    /// the colon or value is missing.
    fn parse_pair(&mut self) -> Result<Option<(String, Value)>> {
        if self.skip_space()? == Some(b'}') {
            return Ok(None);
        }
        let Some(key) = self.raw_string()? else {
            return Ok(None);
        };
        self.skip_space()?;
        if self.next_byte()? != Some(b':') {
            return Ok(None);
        }
        let value = Value::new();
        if !self.parse_value(&value)? {
            return Ok(None);
        }
        Ok(Some((key, value)))
    }

    fn parse_array(&mut self, target: &Value) -> Result<bool> {
        self.next_byte()?;
        self.enter()?;
        target.set_array(Vec::new());

        if self.skip_space()? == Some(b']') {
            self.next_byte()?;
            self.leave();
            return Ok(true);
        }

        loop {
            let item = Value::new();
            if !self.parse_value(&item)? {
                return Err(self.fatal("issue parsing value in array"));
            }
            target.append(item);

            self.skip_space()?;
            match self.next_byte()? {
                Some(b']') => break,
                Some(b',') => continue,
                _ => return Err(self.fatal("missing comma between values in array")),
            }
        }

        self.leave();
        Ok(true)
    }
}

/// Successive top-level values until end of input. Stops after the first
/// error.
impl<R: BufRead> Iterator for Decoder<R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.next_value().transpose()
    }
}

/// Decode a complete document. Whitespace-only input yields Null; anything
/// but whitespace after the value is an error.
pub fn from_str(text: &str) -> Result<Value> {
    from_slice(text.as_bytes())
}

/// Byte-slice form of [`from_str`].
pub fn from_slice(bytes: &[u8]) -> Result<Value> {
    let mut decoder = Decoder::new(bytes);
    let value = decoder.next_value()?.unwrap_or_default();
    if !decoder.at_end()? {
        return Err(decoder.fatal("trailing characters after JSON value"));
    }
    Ok(value)
}

impl std::str::FromStr for Value {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self> {
        from_str(s)
    }
}

impl Value {
    /// Parse one value from `reader` into this cell, in place.
    ///
    /// The cell is cleared to Null first, so aliases see the new content.
    /// Returns `Ok(false)` when the stream held only whitespace.
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<bool> {
        Decoder::new(reader).parse_into(self)
    }
}
