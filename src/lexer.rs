//! The context-sensitive scanner.
//!
//! The parser tells the scanner what it expects at each point (a key, a
//! value, a string form); the same characters scan differently in different
//! contexts: `1937-07-18` is a date at a value position but a bare key
//! fragment at a key position. Positions are 1-based line/column pairs, and
//! columns count Unicode scalar values.
//!
//! Two kinds of failure leave the scanner: hard syntax errors are returned
//! as `Err` and abort the surrounding statement, while value-conversion
//! problems (number ranges, date components, bad escapes) are pushed onto
//! [`Lexer::pending`] and only surface if the statement otherwise parses.

#[cfg(test)]
#[path = "./lexer_tests.rs"]
mod tests;

use crate::error::{Error, ErrorKind, Found};
use crate::position::Position;
use crate::span::Span;
use crate::time::{days_in_month, Date, LocalDateTime, Offset, OffsetDateTime, Time};
use crate::value::Value;
use crate::version::TomlVersion;

pub(crate) const EXPECTED_LINE_START: &str =
    "a-z, A-Z, 0-9, ', \", a table key, a newline, or end-of-input";
pub(crate) const EXPECTED_DOT_OR_EQUALS: &str = ". or =";
pub(crate) const EXPECTED_KEY_CHAR: &str = "a-z, A-Z, 0-9, ', or \"";
pub(crate) const EXPECTED_VALUE: &str =
    "', \", ''', \"\"\", a number, a boolean, a date/time, an array, or a table";
pub(crate) const EXPECTED_ARRAY_VALUE: &str =
    "], ', \", ''', \"\"\", a number, a boolean, a date/time, an array, a table, or a newline";
pub(crate) const EXPECTED_ARRAY_SEP: &str = "], a comma, or a newline";
pub(crate) const EXPECTED_INLINE_FIRST_KEY: &str = "a-z, A-Z, 0-9, }, ', or \"";
pub(crate) const EXPECTED_INLINE_SEP: &str = "} or a comma";
pub(crate) const EXPECTED_INLINE_CLOSE: &str = "}";
pub(crate) const EXPECTED_TABLE_CLOSE: &str = "] or .";
pub(crate) const EXPECTED_ARRAY_TABLE_CLOSE: &str = "]] or .";
pub(crate) const EXPECTED_NEWLINE_OR_EOF: &str = "a newline or end-of-input";
const EXPECTED_BASIC_CLOSE: &str = "\" or a character";
const EXPECTED_LITERAL_CLOSE: &str = "'";
const EXPECTED_ML_BASIC_CLOSE: &str = "\"\"\"";
const EXPECTED_ML_LITERAL_CLOSE: &str = "'''";
const EXPECTED_DATE_TIME: &str = "a date/time";

pub(crate) struct Lexer {
    chars: Vec<char>,
    /// Byte offset of each char in the source, plus one trailing entry for
    /// the end of input.
    offsets: Vec<u32>,
    pos: usize,
    line: u32,
    column: u32,
    version: TomlVersion,
    /// Deferred value-conversion errors for the current statement.
    pub(crate) pending: Vec<Error>,
}

impl Lexer {
    pub(crate) fn new(input: &str, version: TomlVersion) -> Self {
        let mut chars = Vec::with_capacity(input.len());
        let mut offsets = Vec::with_capacity(input.len() + 1);
        for (off, c) in input.char_indices() {
            chars.push(c);
            offsets.push(off as u32);
        }
        offsets.push(input.len() as u32);
        let mut lexer = Lexer {
            chars,
            offsets,
            pos: 0,
            line: 1,
            column: 1,
            version,
            pending: Vec::new(),
        };
        // Skip a leading UTF-8 BOM.
        if lexer.peek() == Some('\u{feff}') {
            lexer.pos += 1;
        }
        lexer
    }

    #[inline]
    pub(crate) fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    #[inline]
    pub(crate) fn byte_offset(&self) -> u32 {
        self.offsets[self.pos]
    }

    pub(crate) fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.byte_offset().max(start + 1))
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    #[inline]
    pub(crate) fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    #[inline]
    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    #[inline]
    pub(crate) fn at_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Consumes spaces and tabs.
    pub(crate) fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.bump();
        }
    }

    /// Consumes one LF or CRLF. A stray CR is not a newline.
    pub(crate) fn eat_newline(&mut self) -> bool {
        match self.peek() {
            Some('\n') => {
                self.bump();
                true
            }
            Some('\r') if self.peek_at(1) == Some('\n') => {
                self.bump();
                self.bump();
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub(crate) fn at_newline(&self) -> bool {
        matches!(self.peek(), Some('\n'))
            || (self.peek() == Some('\r') && self.peek_at(1) == Some('\n'))
    }

    fn unexpected(&self, found: Found, expected: &'static str, position: Position, start: u32) -> Error {
        Error::new(
            ErrorKind::Unexpected { found, expected },
            position,
            Span::new(start, self.byte_offset().max(start + 1)),
        )
    }

    fn unexpected_here(&self, expected: &'static str) -> Error {
        let position = self.position();
        let start = self.byte_offset();
        let found = match self.peek() {
            None => Found::Eof,
            Some(_) if self.at_newline() => Found::Eol,
            Some(c) => Found::Token(c.to_string()),
        };
        self.unexpected(found, expected, position, start)
    }

    fn push_pending(&mut self, kind: ErrorKind, position: Position, span: Span) {
        self.pending.push(Error::new(kind, position, span));
    }

    /// Scans the offending token for an error message: an alphanumeric-led
    /// run of bare-key characters, or a single character.
    pub(crate) fn take_junk(&mut self) -> (Found, Position, u32) {
        let position = self.position();
        let start = self.byte_offset();
        let found = match self.peek() {
            None => Found::Eof,
            Some(_) if self.at_newline() => Found::Eol,
            Some(c) if c.is_ascii_alphanumeric() => {
                let mut token = String::new();
                while let Some(c) = self.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                        token.push(c);
                        self.bump();
                    } else {
                        break;
                    }
                }
                Found::Token(token)
            }
            Some(c) => {
                self.bump();
                Found::Token(c.to_string())
            }
        };
        (found, position, start)
    }

    /// Builds an `Unexpected …` error at the current input, consuming the
    /// offending token.
    pub(crate) fn unexpected_junk(&mut self, expected: &'static str) -> Error {
        let (found, position, start) = self.take_junk();
        self.unexpected(found, expected, position, start)
    }

    #[inline]
    pub(crate) fn is_bare_key_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || c == '-'
    }

    /// Scans a bare key or bare-word run (`true`, `inf`, …).
    pub(crate) fn scan_bare(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if Self::is_bare_key_char(c) {
                out.push(c);
                self.bump();
            } else {
                break;
            }
        }
        out
    }

    /// Scans a comment from its `#` through the end of the line, leaving the
    /// newline in place. A CR that is not part of a CRLF pair is an error.
    pub(crate) fn scan_comment(&mut self) -> Result<(), Error> {
        debug_assert_eq!(self.peek(), Some('#'));
        self.bump();
        loop {
            match self.peek() {
                None | Some('\n') => return Ok(()),
                Some('\r') => {
                    if self.peek_at(1) == Some('\n') {
                        return Ok(());
                    }
                    return Err(self.unexpected_here(EXPECTED_NEWLINE_OR_EOF));
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    // ---- strings -------------------------------------------------------

    /// Scans a single-line basic string; the cursor is on the opening quote.
    pub(crate) fn scan_basic_string(&mut self) -> Result<String, Error> {
        debug_assert_eq!(self.peek(), Some('"'));
        self.bump();
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(self.unexpected_here(EXPECTED_BASIC_CLOSE)),
                Some('"') => {
                    self.bump();
                    return Ok(out);
                }
                Some('\\') => self.escape_into(&mut out, false)?,
                Some('\n') => {
                    let position = self.position();
                    let start = self.byte_offset();
                    return Err(self.unexpected(Found::Eol, EXPECTED_BASIC_CLOSE, position, start));
                }
                Some('\r') if self.peek_at(1) == Some('\n') => {
                    let position = self.position();
                    let start = self.byte_offset();
                    return Err(self.unexpected(Found::Eol, EXPECTED_BASIC_CLOSE, position, start));
                }
                Some('\t') => {
                    self.check_raw_tab();
                    out.push('\t');
                    self.bump();
                }
                Some(c) if c.is_control() => {
                    return Err(self.unexpected_here(EXPECTED_BASIC_CLOSE));
                }
                Some(c) => {
                    out.push(c);
                    self.bump();
                }
            }
        }
    }

    /// Scans a single-line literal string; no escape processing.
    pub(crate) fn scan_literal_string(&mut self) -> Result<String, Error> {
        debug_assert_eq!(self.peek(), Some('\''));
        self.bump();
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(self.unexpected_here(EXPECTED_LITERAL_CLOSE)),
                Some('\'') => {
                    self.bump();
                    return Ok(out);
                }
                Some('\n') => {
                    let position = self.position();
                    let start = self.byte_offset();
                    return Err(self.unexpected(
                        Found::Eol,
                        EXPECTED_LITERAL_CLOSE,
                        position,
                        start,
                    ));
                }
                Some('\r') if self.peek_at(1) == Some('\n') => {
                    let position = self.position();
                    let start = self.byte_offset();
                    return Err(self.unexpected(
                        Found::Eol,
                        EXPECTED_LITERAL_CLOSE,
                        position,
                        start,
                    ));
                }
                Some(c) if c.is_control() && c != '\t' => {
                    return Err(self.unexpected_here(EXPECTED_LITERAL_CLOSE));
                }
                Some(c) => {
                    out.push(c);
                    self.bump();
                }
            }
        }
    }

    /// Scans a multiline basic string; the cursor is on the first of the
    /// three opening quotes.
    ///
    /// Termination is greedy: a run of `q >= 3` quotes closes the string and
    /// contributes its first `q - 3` quotes to the content, so a value like
    /// `""""This," she said."""` keeps its leading quote.
    pub(crate) fn scan_ml_basic_string(&mut self) -> Result<String, Error> {
        self.bump();
        self.bump();
        self.bump();
        self.eat_newline();
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(self.unexpected_here(EXPECTED_ML_BASIC_CLOSE)),
                Some('"') => {
                    let mut quotes = 0usize;
                    while self.peek() == Some('"') {
                        quotes += 1;
                        self.bump();
                    }
                    if quotes >= 3 {
                        for _ in 0..quotes - 3 {
                            out.push('"');
                        }
                        return Ok(out);
                    }
                    for _ in 0..quotes {
                        out.push('"');
                    }
                }
                Some('\\') => self.escape_into(&mut out, true)?,
                Some('\n') => {
                    out.push('\n');
                    self.bump();
                }
                Some('\r') if self.peek_at(1) == Some('\n') => {
                    out.push('\n');
                    self.bump();
                    self.bump();
                }
                Some('\t') => {
                    self.check_raw_tab();
                    out.push('\t');
                    self.bump();
                }
                Some(c) if c.is_control() => {
                    return Err(self.unexpected_here(EXPECTED_ML_BASIC_CLOSE));
                }
                Some(c) => {
                    out.push(c);
                    self.bump();
                }
            }
        }
    }

    /// Scans a multiline literal string; closes at the *first* `'''`.
    pub(crate) fn scan_ml_literal_string(&mut self) -> Result<String, Error> {
        self.bump();
        self.bump();
        self.bump();
        self.eat_newline();
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(self.unexpected_here(EXPECTED_ML_LITERAL_CLOSE)),
                Some('\'') => {
                    if self.peek_at(1) == Some('\'') && self.peek_at(2) == Some('\'') {
                        self.bump();
                        self.bump();
                        self.bump();
                        return Ok(out);
                    }
                    out.push('\'');
                    self.bump();
                }
                Some('\n') => {
                    out.push('\n');
                    self.bump();
                }
                Some('\r') if self.peek_at(1) == Some('\n') => {
                    out.push('\n');
                    self.bump();
                    self.bump();
                }
                Some(c) if c.is_control() && c != '\t' => {
                    return Err(self.unexpected_here(EXPECTED_ML_LITERAL_CLOSE));
                }
                Some(c) => {
                    out.push(c);
                    self.bump();
                }
            }
        }
    }

    fn check_raw_tab(&mut self) {
        if !self.version.allows_raw_tab_in_basic_strings() {
            let position = self.position();
            let span = Span::new(self.byte_offset(), self.byte_offset() + 1);
            self.push_pending(ErrorKind::TabInString, position, span);
        }
    }

    /// Decodes one escape sequence; the cursor is on the backslash.
    ///
    /// Unknown escapes and bad unicode escapes are recorded as pending
    /// errors and scanning continues, matching the recovery behavior of the
    /// surrounding string scan.
    fn escape_into(&mut self, out: &mut String, multiline: bool) -> Result<(), Error> {
        let position = self.position();
        let start = self.byte_offset();
        self.bump();
        match self.peek() {
            None => Err(self.unexpected_here(if multiline {
                EXPECTED_ML_BASIC_CLOSE
            } else {
                EXPECTED_BASIC_CLOSE
            })),
            Some('b') => {
                self.bump();
                out.push('\u{8}');
                Ok(())
            }
            Some('t') => {
                self.bump();
                out.push('\t');
                Ok(())
            }
            Some('n') => {
                self.bump();
                out.push('\n');
                Ok(())
            }
            Some('f') => {
                self.bump();
                out.push('\u{c}');
                Ok(())
            }
            Some('r') => {
                self.bump();
                out.push('\r');
                Ok(())
            }
            Some('"') => {
                self.bump();
                out.push('"');
                Ok(())
            }
            Some('\\') => {
                self.bump();
                out.push('\\');
                Ok(())
            }
            Some('u') => {
                self.bump();
                self.unicode_escape_into(out, 4, position, start);
                Ok(())
            }
            Some('U') => {
                self.bump();
                self.unicode_escape_into(out, 8, position, start);
                Ok(())
            }
            Some(c) if multiline && (c == ' ' || c == '\t' || self.at_newline()) => {
                // Line continuation: whitespace through the newline and all
                // leading whitespace of the following lines.
                let mut saw_newline = false;
                loop {
                    if self.eat_newline() {
                        saw_newline = true;
                    } else if matches!(self.peek(), Some(' ' | '\t')) {
                        self.bump();
                    } else {
                        break;
                    }
                }
                if !saw_newline {
                    self.push_pending(
                        ErrorKind::InvalidEscape(c),
                        position,
                        Span::new(start, start + 2),
                    );
                }
                Ok(())
            }
            Some('\n') | Some('\r') if !multiline => {
                Err(self.unexpected_here(EXPECTED_BASIC_CLOSE))
            }
            Some(c) => {
                self.bump();
                self.push_pending(
                    ErrorKind::InvalidEscape(c),
                    position,
                    Span::new(start, start + 2),
                );
                Ok(())
            }
        }
    }

    fn unicode_escape_into(&mut self, out: &mut String, digits: u32, position: Position, start: u32) {
        let mut value: u32 = 0;
        for _ in 0..digits {
            match self.peek().and_then(|c| c.to_digit(16)) {
                Some(d) => {
                    value = value * 16 + d;
                    self.bump();
                }
                None => {
                    self.push_pending(
                        ErrorKind::InvalidUnicodeEscape,
                        position,
                        self.span_from(start),
                    );
                    return;
                }
            }
        }
        match char::from_u32(value) {
            Some(c) => out.push(c),
            // Surrogate halves and values beyond U+10FFFF; a lone high
            // surrogate stays invalid even if a low surrogate escape follows.
            None => {
                self.push_pending(
                    ErrorKind::InvalidUnicodeEscape,
                    position,
                    self.span_from(start),
                );
            }
        }
    }

    // ---- numbers and date/times ---------------------------------------

    /// Scans a value that starts with a digit: an integer, float, or any of
    /// the four date/time forms. The cursor is on the first digit.
    pub(crate) fn scan_number_or_datetime(&mut self) -> Result<Value, Error> {
        // Lookahead over the leading digit run decides between a number and
        // a date/time without consuming anything.
        let mut digits = 0usize;
        while matches!(self.peek_at(digits), Some(c) if c.is_ascii_digit()) {
            digits += 1;
        }
        match self.peek_at(digits) {
            Some('-') => self.scan_date_time(),
            Some(':') => {
                let time = self.scan_time()?;
                Ok(Value::LocalTime(time))
            }
            _ => self.scan_number(false),
        }
    }

    /// Scans a number after `+`/`-`, or a signed `inf`/`nan`. The cursor is
    /// on the sign. `expected` is the caller's alternative set, reported
    /// when no number follows the sign.
    pub(crate) fn scan_signed_number(&mut self, expected: &'static str) -> Result<Value, Error> {
        let position = self.position();
        let start = self.byte_offset();
        let negative = self.peek() == Some('-');
        match self.peek_at(1) {
            Some(c) if c.is_ascii_digit() => {
                self.bump();
                let value = self.scan_number(negative)?;
                // Rewrite the pending span/position to include the sign.
                if let Some(err) = self.pending.last_mut() {
                    if matches!(
                        err.kind,
                        ErrorKind::IntegerTooLarge
                            | ErrorKind::FloatTooLarge
                            | ErrorKind::FloatTooSmall
                    ) && err.span.start >= start
                    {
                        err.position = position;
                        err.span.start = start;
                    }
                }
                Ok(value)
            }
            Some('i') | Some('n') => {
                self.bump();
                let word = self.scan_bare();
                match word.as_str() {
                    "inf" => Ok(Value::Float(if negative {
                        f64::NEG_INFINITY
                    } else {
                        f64::INFINITY
                    })),
                    "nan" => Ok(Value::Float(if negative { -f64::NAN } else { f64::NAN })),
                    _ => {
                        let sign = if negative { '-' } else { '+' };
                        Err(self.unexpected(
                            Found::Token(sign.to_string()),
                            expected,
                            position,
                            start,
                        ))
                    }
                }
            }
            _ => {
                let sign = self.peek().unwrap();
                Err(self.unexpected(
                    Found::Token(sign.to_string()),
                    expected,
                    position,
                    start,
                ))
            }
        }
    }

    /// Scans an unsigned number; the sign, if any, was already consumed.
    fn scan_number(&mut self, negative: bool) -> Result<Value, Error> {
        let position = self.position();
        let start = self.byte_offset();

        if self.peek() == Some('0') {
            match self.peek_at(1) {
                Some('x') => {
                    if let Some(v) = self.scan_prefixed(16, position, start) {
                        return Ok(v);
                    }
                }
                Some('o') => {
                    if let Some(v) = self.scan_prefixed(8, position, start) {
                        return Ok(v);
                    }
                }
                Some('b') => {
                    if let Some(v) = self.scan_prefixed(2, position, start) {
                        return Ok(v);
                    }
                }
                _ => {}
            }
        }

        // A decimal integer may not have leading zeros; `0` followed by
        // another digit ends the token after the zero.
        if self.peek() == Some('0') && matches!(self.peek_at(1), Some(c) if c.is_ascii_digit()) {
            self.bump();
            return Ok(Value::Integer(0));
        }

        let mut text = String::new();
        if negative {
            text.push('-');
        }
        self.scan_digit_run(&mut text);

        let mut is_float = false;
        if self.peek() == Some('.') && matches!(self.peek_at(1), Some(c) if c.is_ascii_digit()) {
            is_float = true;
            text.push('.');
            self.bump();
            self.scan_digit_run(&mut text);
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let exponent_digit_at = match self.peek_at(1) {
                Some('+') | Some('-') => 2,
                _ => 1,
            };
            if matches!(self.peek_at(exponent_digit_at), Some(c) if c.is_ascii_digit()) {
                is_float = true;
                text.push('e');
                self.bump();
                if matches!(self.peek(), Some('+' | '-')) {
                    if self.peek() == Some('-') {
                        text.push('-');
                    }
                    self.bump();
                }
                self.scan_digit_run(&mut text);
            }
        }

        if is_float {
            return Ok(Value::Float(self.convert_float(&text, position, start)));
        }

        let mut value: i128 = 0;
        for c in text.bytes() {
            if c == b'-' {
                continue;
            }
            value = value * 10 + (c - b'0') as i128;
            if value > u64::MAX as i128 {
                break;
            }
        }
        if negative {
            value = -value;
        }
        if value < i64::MIN as i128 || value > i64::MAX as i128 {
            self.push_pending(ErrorKind::IntegerTooLarge, position, self.span_from(start));
            return Ok(Value::Integer(0));
        }
        Ok(Value::Integer(value as i64))
    }

    /// Consumes a run of digits with single embedded underscores, appending
    /// the digits (underscores stripped) to `text`. Stops before an
    /// underscore that is not followed by a digit.
    fn scan_digit_run(&mut self, text: &mut String) {
        loop {
            match self.peek() {
                Some(c) if c.is_ascii_digit() => {
                    text.push(c);
                    self.bump();
                }
                Some('_') if matches!(self.peek_at(1), Some(c) if c.is_ascii_digit()) => {
                    self.bump();
                }
                _ => break,
            }
        }
    }

    /// Scans `0x`/`0o`/`0b` integers. Returns `None` (without consuming)
    /// when no digit follows the prefix, in which case the caller scans a
    /// plain `0`.
    fn scan_prefixed(&mut self, radix: u32, position: Position, start: u32) -> Option<Value> {
        let digit = self.peek_at(2)?;
        digit.to_digit(radix)?;
        self.bump();
        self.bump();
        let mut value: u128 = 0;
        let mut overflow = false;
        loop {
            match self.peek() {
                Some(c) if c.to_digit(radix).is_some() => {
                    value = value * radix as u128 + c.to_digit(radix).unwrap() as u128;
                    if value > i64::MAX as u128 {
                        overflow = true;
                        value = 0;
                    }
                    self.bump();
                }
                Some('_')
                    if matches!(self.peek_at(1), Some(c) if c.to_digit(radix).is_some()) =>
                {
                    self.bump();
                }
                _ => break,
            }
        }
        if overflow {
            self.push_pending(ErrorKind::IntegerTooLarge, position, self.span_from(start));
        }
        Some(Value::Integer(value as i64))
    }

    fn convert_float(&mut self, text: &str, position: Position, start: u32) -> f64 {
        let value: f64 = text.parse().unwrap_or(f64::NAN);
        let has_nonzero_digit = text
            .bytes()
            .take_while(|&b| b != b'e')
            .any(|b| (b'1'..=b'9').contains(&b));
        if value.is_infinite() {
            self.push_pending(ErrorKind::FloatTooLarge, position, self.span_from(start));
            0.0
        } else if has_nonzero_digit && value.abs() < f64::MIN_POSITIVE {
            // Zero or subnormal result from a nonzero literal.
            self.push_pending(ErrorKind::FloatTooSmall, position, self.span_from(start));
            0.0
        } else {
            value
        }
    }

    /// Consumes a plain digit run, returning `(value, digit count, position)`.
    /// The value saturates; length checks catch over-long runs.
    fn component(&mut self) -> (u32, usize, Position) {
        let position = self.position();
        let mut value: u32 = 0;
        let mut len = 0usize;
        while let Some(c) = self.peek() {
            match c.to_digit(10) {
                Some(d) => {
                    if len < 9 {
                        value = value * 10 + d;
                    }
                    len += 1;
                    self.bump();
                }
                None => break,
            }
        }
        (value, len, position)
    }

    fn expect_date_time_char(&mut self, c: char) -> Result<(), Error> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.unexpected_here(EXPECTED_DATE_TIME))
        }
    }

    /// Scans a date, optionally followed by a time and offset. The cursor is
    /// on the first digit of the year.
    fn scan_date_time(&mut self) -> Result<Value, Error> {
        let start = self.byte_offset();
        let (year, year_len, year_pos) = self.component();
        self.expect_date_time_char('-')?;
        let (month, month_len, month_pos) = self.component();
        if month_len == 0 {
            return Err(self.unexpected_here(EXPECTED_DATE_TIME));
        }
        self.expect_date_time_char('-')?;
        let (day, day_len, day_pos) = self.component();
        if day_len == 0 {
            return Err(self.unexpected_here(EXPECTED_DATE_TIME));
        }

        let year_ok = year_len == 4;
        let month_ok = month_len == 2 && (1..=12).contains(&month);
        let day_ok = day_len == 2 && (1..=31).contains(&day);
        if !year_ok {
            self.push_pending(ErrorKind::InvalidYear, year_pos, self.span_from(start));
        }
        if !month_ok {
            self.push_pending(ErrorKind::InvalidMonth, month_pos, self.span_from(start));
        }
        if !day_ok {
            self.push_pending(ErrorKind::InvalidDay, day_pos, self.span_from(start));
        } else if year_ok && month_ok && day as u8 > days_in_month(year as u16, month as u8) {
            self.push_pending(
                ErrorKind::InvalidDate {
                    month: month as u8,
                    day: day as u8,
                },
                day_pos,
                self.span_from(start),
            );
        }
        let date = Date {
            year: year.min(9999) as u16,
            month: month.clamp(1, 12) as u8,
            day: day.clamp(1, 31) as u8,
        };

        let has_time = match self.peek() {
            Some('T') | Some('t') => {
                self.bump();
                true
            }
            Some(' ')
                if matches!(self.peek_at(1), Some(c) if c.is_ascii_digit())
                    && matches!(self.peek_at(2), Some(c) if c.is_ascii_digit())
                    && self.peek_at(3) == Some(':') =>
            {
                self.bump();
                true
            }
            _ => false,
        };
        if !has_time {
            return Ok(Value::LocalDate(date));
        }

        let time = self.scan_time()?;

        match self.peek() {
            Some('Z') | Some('z') => {
                self.bump();
                Ok(Value::OffsetDateTime(OffsetDateTime {
                    date,
                    time,
                    offset: Offset::Z,
                }))
            }
            Some('+') | Some('-') => {
                let offset = self.scan_offset()?;
                Ok(Value::OffsetDateTime(OffsetDateTime {
                    date,
                    time,
                    offset,
                }))
            }
            _ => Ok(Value::LocalDateTime(LocalDateTime { date, time })),
        }
    }

    /// Scans `HH:MM:SS[.fff…]`; the cursor is on the first hour digit.
    fn scan_time(&mut self) -> Result<Time, Error> {
        let start = self.byte_offset();
        let (hour, hour_len, hour_pos) = self.component();
        self.expect_date_time_char(':')?;
        let (minute, minute_len, minute_pos) = self.component();
        if minute_len == 0 {
            return Err(self.unexpected_here(EXPECTED_DATE_TIME));
        }
        self.expect_date_time_char(':')?;
        let (second, second_len, second_pos) = self.component();
        if second_len == 0 {
            return Err(self.unexpected_here(EXPECTED_DATE_TIME));
        }

        if hour_len != 2 || hour > 23 {
            self.push_pending(ErrorKind::InvalidHour, hour_pos, self.span_from(start));
        }
        if minute_len != 2 || minute > 59 {
            self.push_pending(ErrorKind::InvalidMinutes, minute_pos, self.span_from(start));
        }
        if second_len != 2 || second > 59 {
            self.push_pending(ErrorKind::InvalidSeconds, second_pos, self.span_from(start));
        }

        let mut nanosecond = 0u32;
        if self.peek() == Some('.') {
            self.bump();
            let frac_pos = self.position();
            let frac_start = self.byte_offset();
            let mut digits = 0usize;
            let mut value = 0u32;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                if digits < 9 {
                    value = value * 10 + self.peek().unwrap().to_digit(10).unwrap();
                }
                digits += 1;
                self.bump();
            }
            if digits == 0 {
                return Err(self.unexpected_here(EXPECTED_DATE_TIME));
            }
            if digits > 9 {
                self.push_pending(
                    ErrorKind::InvalidNanoseconds,
                    frac_pos,
                    self.span_from(frac_start),
                );
            }
            let mut scale = digits.min(9);
            while scale < 9 {
                value *= 10;
                scale += 1;
            }
            nanosecond = value;
        }

        Ok(Time {
            hour: hour.min(23) as u8,
            minute: minute.min(59) as u8,
            second: second.min(59) as u8,
            nanosecond,
        })
    }

    /// Scans a `+HH:MM`/`-HH:MM` offset; the cursor is on the sign.
    fn scan_offset(&mut self) -> Result<Offset, Error> {
        let sign_pos = self.position();
        let sign_start = self.byte_offset();
        let negative = self.peek() == Some('-');
        self.bump();
        if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            return Err(self.unexpected_here(EXPECTED_DATE_TIME));
        }
        let (hours, hours_len, _) = self.component();
        self.expect_date_time_char(':')?;
        if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            return Err(self.unexpected_here(EXPECTED_DATE_TIME));
        }
        let (minutes, minutes_len, minutes_pos) = self.component();

        let hours_ok = hours_len == 2 && hours <= 18;
        let minutes_ok = minutes_len == 2 && minutes <= 59;
        if !hours_ok {
            self.push_pending(
                ErrorKind::InvalidZoneOffsetHours,
                sign_pos,
                self.span_from(sign_start),
            );
        }
        if !minutes_ok {
            self.push_pending(
                ErrorKind::InvalidZoneOffsetMinutes,
                minutes_pos,
                self.span_from(sign_start),
            );
        }
        let total = hours * 60 + minutes;
        if hours_ok && minutes_ok && total > 18 * 60 {
            self.push_pending(
                ErrorKind::InvalidZoneOffset,
                sign_pos,
                self.span_from(sign_start),
            );
        }
        let mut minutes_total = total.min(18 * 60) as i16;
        if negative {
            minutes_total = -minutes_total;
        }
        Ok(Offset::Custom {
            minutes: minutes_total,
        })
    }
}
