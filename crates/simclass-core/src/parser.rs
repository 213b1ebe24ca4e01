//! Recursive-descent parser for class definition text.
//!
//! The grammar is small but full of lexical quirks inherited from the engine
//! format, and the parser reproduces them deliberately:
//!
//! - Comments (`//` and non-nesting `/* */`) may appear between any two
//!   tokens, not just at statement boundaries. Every cursor advance through
//!   [`Parser::next`] re-checks for a comment start, so `x/*asd*/=/**/2;`
//!   parses the same as `x=2;`.
//! - Unquoted value tokens are classified by sniffing, not by a typed
//!   grammar: `true`/`false` (case-insensitive) → boolean, `0x..` → base-16
//!   integer, contains `.` → float, otherwise integer, with a string fallback
//!   at each numeric step. Consumers depend on this exact precedence.
//! - Quoted strings escape a literal quote by doubling (`""`) and reassemble
//!   the format's multi-segment line-break convention (`" \n "`) into one
//!   string with embedded newlines.
//! - Property names are scanned leniently: the first character is consumed
//!   unconditionally, then the scan continues over `[A-Za-z0-9_.\]`. Dotted
//!   identifiers such as inheritance targets rely on this.
//!
//! # Key design decisions
//!
//! - **Pre-materialized input**: the input is collected into a `Vec<char>`
//!   up front so fixed-length lookahead (comment markers, the 6-scalar string
//!   line-break, the `STR` translation prefix) is O(1). Real-world files are
//!   multi-megabyte, and scanning must not re-decode UTF-8 at every peek.
//! - **Explicit cursor**: all state lives in the `Parser` value; parses are
//!   reentrant and independent.
//! - **`next` vs `next_raw`**: string bodies and name scans advance with
//!   `next_raw` so comment markers inside them are taken literally.

use std::collections::HashMap;

use crate::error::{Result, SimclassError};
use crate::types::{Document, Value};

/// How much trailing input an error message carries for diagnostics.
const ERROR_CONTEXT_LEN: usize = 50;

/// Characters allowed in a property name after the first.
fn is_valid_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '\\'
}

/// Parse class definition text into a [`Document`].
///
/// # Examples
///
/// ```
/// use simclass_core::{parse, Value};
///
/// let doc = parse("class Moo { value = 1; };").unwrap();
/// let moo = doc.get("Moo").and_then(Value::as_class).unwrap();
/// assert_eq!(moo.get("value"), Some(&Value::Integer(1)));
/// ```
pub fn parse(input: &str) -> Result<Document> {
    Parser::new(input, None).parse()
}

/// Parse with a translation table for `$STR...` references.
///
/// Keys are looked up with their `STR` prefix but without the `$` sigil,
/// e.g. `{"STR_TITLE": "Hello"}` resolves `$STR_TITLE`. Unknown keys pass
/// through as their literal key text.
pub fn parse_with_translations(
    input: &str,
    translations: &HashMap<String, String>,
) -> Result<Document> {
    Parser::new(input, Some(translations)).parse()
}

/// Parse raw bytes, decoding permissively.
///
/// Legacy files sometimes carry non-UTF-8 bytes inside string literals;
/// those decode to U+FFFD instead of failing the whole parse.
pub fn parse_bytes(input: &[u8]) -> Result<Document> {
    parse(&String::from_utf8_lossy(input))
}

/// Byte-input variant of [`parse_with_translations`].
pub fn parse_bytes_with_translations(
    input: &[u8],
    translations: &HashMap<String, String>,
) -> Result<Document> {
    parse_with_translations(&String::from_utf8_lossy(input), translations)
}

struct Parser<'a> {
    chars: Vec<char>,
    pos: usize,
    translations: Option<&'a HashMap<String, String>>,
}

impl<'a> Parser<'a> {
    fn new(input: &str, translations: Option<&'a HashMap<String, String>>) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            translations,
        }
    }

    fn parse(mut self) -> Result<Document> {
        let mut result = Document::new();

        self.detect_comment();
        self.skip_whitespace();
        while self.pos < self.chars.len() {
            self.parse_property(&mut result)?;
            self.skip_whitespace();
        }

        Ok(result)
    }

    // ------------------------------------------------------------------
    // Scanning primitives
    // ------------------------------------------------------------------

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Advance one scalar and transparently skip any comment that starts at
    /// the new position.
    fn next(&mut self) -> Option<char> {
        self.pos += 1;
        self.detect_comment();
        self.current()
    }

    /// Advance one scalar without comment detection. Used inside string
    /// bodies and name scans where `/` sequences are literal.
    fn next_raw(&mut self) {
        self.pos += 1;
    }

    /// If the cursor sits on a comment start, move past the comment.
    ///
    /// `//` leaves the cursor on the terminating newline (whitespace skipping
    /// consumes it next). An unterminated `/* ...` consumes to end of input
    /// rather than erroring.
    fn detect_comment(&mut self) {
        if self.chars.get(self.pos) != Some(&'/') {
            return;
        }
        match self.chars.get(self.pos + 1) {
            Some('/') => {
                self.pos = self.find_from(self.pos, |c| c == '\n').unwrap_or(self.chars.len());
            }
            Some('*') => {
                self.pos = self
                    .find_seq_from(self.pos, &['*', '/'])
                    .map(|idx| idx + 2)
                    .unwrap_or(self.chars.len());
            }
            _ => {}
        }
    }

    fn find_from(&self, start: usize, pred: impl Fn(char) -> bool) -> Option<usize> {
        self.chars[start.min(self.chars.len())..]
            .iter()
            .position(|&c| pred(c))
            .map(|offset| start + offset)
    }

    fn find_seq_from(&self, start: usize, needle: &[char]) -> Option<usize> {
        let start = start.min(self.chars.len());
        self.chars[start..]
            .windows(needle.len())
            .position(|window| window == needle)
            .map(|offset| start + offset)
    }

    fn is_whitespace(&self) -> bool {
        match self.current() {
            Some(c) => matches!(c, ' ' | '\t' | '\r' | '\n') || (c as u32) < 32,
            None => false,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.is_whitespace() {
            self.next();
        }
    }

    fn error(&self, message: impl Into<String>) -> SimclassError {
        let start = self.pos.min(self.chars.len());
        let end = (start + ERROR_CONTEXT_LEN).min(self.chars.len());
        SimclassError::Parse {
            message: message.into(),
            position: self.pos,
            context: self.chars[start..end].iter().collect(),
        }
    }

    fn ensure(&self, condition: bool, message: &str) -> Result<()> {
        if condition {
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    // ------------------------------------------------------------------
    // Strings
    // ------------------------------------------------------------------

    /// Literal quote escape: `""` inside a string body.
    fn at_doubled_quote(&self) -> bool {
        self.chars.get(self.pos) == Some(&'"') && self.chars.get(self.pos + 1) == Some(&'"')
    }

    /// The 6-scalar segment join `" \n "` (quote, space, backslash, `n`,
    /// space, quote) that encodes an embedded newline across two segments.
    fn at_string_line_break(&self) -> bool {
        self.chars.len() >= self.pos + 6
            && self.chars[self.pos] == '"'
            && self.chars[self.pos + 1] == ' '
            && self.chars[self.pos + 2] == '\\'
            && self.chars[self.pos + 3] == 'n'
            && self.chars[self.pos + 4] == ' '
            && self.chars[self.pos + 5] == '"'
    }

    fn forward_to_next_quote(&mut self) {
        self.pos = self
            .find_from(self.pos + 1, |c| c == '"')
            .unwrap_or(self.chars.len());
    }

    fn parse_string(&mut self) -> Result<String> {
        let mut result = String::new();

        self.ensure(self.current() == Some('"'), "Expected '\"'")?;
        self.next_raw();
        loop {
            if self.at_doubled_quote() {
                result.push('"');
                self.next_raw();
            } else if self.at_string_line_break() {
                result.push('\n');
                self.next();
                self.forward_to_next_quote();
            } else if self.current() == Some('"') {
                break;
            } else {
                match self.current() {
                    Some(c) => result.push(c),
                    None => return Err(self.error("Got EOF while parsing a string")),
                }
            }

            self.next_raw();
        }

        self.ensure(self.current() == Some('"'), "Expected '\"'")?;
        self.next_raw();
        Ok(result)
    }

    // ------------------------------------------------------------------
    // Unquoted expressions
    // ------------------------------------------------------------------

    /// Classify a trimmed unquoted token. The precedence order is contract:
    /// boolean, hex integer, float (if it contains `.`), integer, with the
    /// raw text as the fallback whenever a numeric parse fails.
    fn guess_expression(&self, raw: &str) -> Value {
        let s = raw.trim();

        if s.eq_ignore_ascii_case("true") {
            return Value::Boolean(true);
        }
        if s.eq_ignore_ascii_case("false") {
            return Value::Boolean(false);
        }
        if let Some(hex) = s.strip_prefix("0x") {
            return match i64::from_str_radix(hex, 16) {
                Ok(n) => Value::Integer(n),
                Err(_) => Value::String(s.to_string()),
            };
        }
        if s.contains('.') {
            return match s.parse::<f64>() {
                Ok(f) => Value::Float(f),
                Err(_) => Value::String(s.to_string()),
            };
        }
        match s.parse::<i64>() {
            Ok(n) => Value::Integer(n),
            Err(_) => Value::String(s.to_string()),
        }
    }

    /// Scan forward to the next `;`, `}` or `,` and classify whatever text
    /// was in between. This is how `foo`, `1.5e2`, `12`, `0x1F` and `true`
    /// are all accepted in the same grammar slot.
    fn parse_unknown_expression(&mut self) -> Result<Value> {
        let start = self.pos;
        let end = self
            .find_from(start, |c| matches!(c, ';' | '}' | ','))
            .ok_or_else(|| self.error("Unexpected end of input in expression"))?;

        let expression: String = self.chars[start..end].iter().collect();
        self.pos = end;

        Ok(self.guess_expression(&expression))
    }

    // ------------------------------------------------------------------
    // Translation references
    // ------------------------------------------------------------------

    fn translate(&self, key: String) -> String {
        if let Some(table) = self.translations {
            if let Some(translated) = table.get(&key) {
                return translated.clone();
            }
        }
        key
    }

    /// `$STR...` reference. The key runs from the scalar after `$` to the
    /// first of `;`, `,`, `}` or a whitespace run; after whitespace only one
    /// of those three terminators may follow.
    fn parse_translation_string(&mut self) -> Result<Value> {
        let mut key = String::new();

        self.ensure(self.current() == Some('$'), "Expected '$'")?;
        self.next();

        if self.chars.get(self.pos..self.pos + 3) != Some(['S', 'T', 'R'].as_slice()) {
            return Err(self.error("Invalid translation string beginning"));
        }

        while let Some(c) = self.current() {
            if matches!(c, ';' | ',' | '}') {
                break;
            }
            if self.is_whitespace() {
                self.skip_whitespace();
                break;
            }
            key.push(c);
            self.next_raw();
        }

        match self.current() {
            Some(';' | ',' | '}') => Ok(Value::String(self.translate(key))),
            _ => Err(self.error("Syntax error in translation string")),
        }
    }

    // ------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------

    /// Value dispatch on one scalar of lookahead: array, quoted string,
    /// translation reference, or sniffed unquoted expression.
    fn parse_non_array_value(&mut self) -> Result<Value> {
        match self.current() {
            Some('{') => Ok(Value::Array(self.parse_array()?)),
            Some('"') => Ok(Value::String(self.parse_string()?)),
            Some('$') => self.parse_translation_string(),
            _ => self.parse_unknown_expression(),
        }
    }

    fn parse_array(&mut self) -> Result<Vec<Value>> {
        let mut result = Vec::new();

        self.ensure(self.current() == Some('{'), "Expected '{'")?;
        self.next();
        self.skip_whitespace();

        while self.pos < self.chars.len() && self.current() != Some('}') {
            result.push(self.parse_non_array_value()?);
            self.skip_whitespace();

            if self.current() == Some(',') {
                self.next();
                self.skip_whitespace();
            } else {
                break;
            }
        }

        self.next();
        Ok(result)
    }

    fn parse_class_body(&mut self) -> Result<Document> {
        let mut result = Document::new();

        self.ensure(self.current() == Some('{'), "Expected '{'")?;
        self.next();
        self.skip_whitespace();

        while self.current() != Some('}') {
            self.parse_property(&mut result)?;
            self.skip_whitespace();
        }

        self.next();
        Ok(result)
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    /// Lenient name scan: the first scalar is consumed unconditionally, then
    /// the scan continues over valid name characters. Comment detection is
    /// suppressed during the scan and re-applied once after it.
    fn parse_property_name(&mut self) -> String {
        let start = self.pos;

        self.next_raw();
        while self.pos < self.chars.len() && self.current().is_some_and(is_valid_name_char) {
            self.next_raw();
        }

        let end = self.pos.min(self.chars.len());
        let name = self.chars[start.min(end)..end].iter().collect();

        self.detect_comment();
        name
    }

    fn parse_property(&mut self, context: &mut Document) -> Result<()> {
        let mut name = self.parse_property_name();

        self.skip_whitespace();

        if name == "class" {
            name = self.parse_property_name();
            self.skip_whitespace();

            // Inheritance marker: `class Child : Parent`. Recognized and
            // discarded; inheritance is not evaluated.
            if self.current() == Some(':') {
                self.next();
                self.skip_whitespace();
                self.parse_property_name();
                self.skip_whitespace();
            }
        } else if name == "delete" || name == "import" {
            // Recognized only enough to be skipped; produces no entry.
            self.parse_property_name();
            self.skip_whitespace();
            self.ensure(self.current() == Some(';'), "Expected ';'")?;
            self.next();
            return Ok(());
        }

        let value = match self.current() {
            Some('[') => {
                let closing = self.next();
                self.ensure(closing == Some(']'), "Expected ']'")?;
                self.next();
                self.skip_whitespace();

                self.ensure(
                    matches!(self.current(), Some('=') | Some('+')),
                    "Expected '=' or '+='",
                )?;
                // `+=` implies appending to an inherited array, but
                // inheritance is not evaluated; both spellings assign.
                if self.current() == Some('+') {
                    let equals = self.next();
                    self.ensure(equals == Some('='), "Expected '='")?;
                }

                self.next();
                self.skip_whitespace();

                Value::Array(self.parse_array()?)
            }
            Some('=') => {
                self.next();
                self.skip_whitespace();
                self.parse_non_array_value()?
            }
            Some('{') => Value::Class(self.parse_class_body()?),
            _ => return Err(self.error("Unexpected value")),
        };

        context.insert(name, value);

        self.skip_whitespace();
        self.ensure(self.current() == Some(';'), "Expected ';'")?;
        self.next();
        Ok(())
    }
}
