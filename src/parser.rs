//! The document parser.
//!
//! Recursive descent over the [`Lexer`], with hand-rolled recovery: after an
//! error inside a statement the parser skips to the next newline and keeps
//! going, so one document can produce several diagnostics. Value-conversion
//! problems (number ranges, date components, escapes) are buffered by the
//! lexer per statement and only surface when the statement is otherwise
//! well-formed; a statement that reports conversion errors binds nothing.

#[cfg(test)]
#[path = "./parser_tests.rs"]
mod tests;

use crate::array::Array;
use crate::builder::{insert_dotted, TreeBuilder};
use crate::document::Document;
use crate::error::{Error, ErrorKind, Found};
use crate::lexer::{
    Lexer, EXPECTED_ARRAY_SEP, EXPECTED_ARRAY_TABLE_CLOSE, EXPECTED_ARRAY_VALUE,
    EXPECTED_DOT_OR_EQUALS, EXPECTED_INLINE_CLOSE, EXPECTED_INLINE_FIRST_KEY, EXPECTED_INLINE_SEP,
    EXPECTED_KEY_CHAR, EXPECTED_LINE_START, EXPECTED_NEWLINE_OR_EOF, EXPECTED_TABLE_CLOSE,
    EXPECTED_VALUE,
};
use crate::table::{Key, Table, TableState};
use crate::value::{Kind, Value};
use crate::version::TomlVersion;

const MAX_RECURSION_DEPTH: i16 = 256;

/// When a method returns `Err(ParseFail)`, the error has already been pushed
/// onto `Parser::errors` and the caller only needs to recover.
struct ParseFail;

type PResult<T> = Result<T, ParseFail>;

pub(crate) fn parse_document(input: &str, version: TomlVersion) -> Document {
    let mut parser = Parser {
        lexer: Lexer::new(input, version),
        builder: TreeBuilder::new(),
        errors: Vec::new(),
        version,
    };
    parser.run();
    let Parser {
        builder, errors, ..
    } = parser;
    Document::new(builder.into_root(), errors, version)
}

struct Parser {
    lexer: Lexer,
    builder: TreeBuilder,
    errors: Vec<Error>,
    version: TomlVersion,
}

impl Parser {
    fn record(&mut self, error: Error) -> ParseFail {
        self.errors.push(error);
        ParseFail
    }

    /// Skips to just past the next newline, dropping any buffered
    /// conversion errors from the failed statement.
    fn recover(&mut self) {
        self.lexer.pending.clear();
        while !self.lexer.at_eof() {
            if self.lexer.eat_newline() {
                return;
            }
            self.lexer.bump();
        }
    }

    fn run(&mut self) {
        loop {
            self.lexer.skip_whitespace();
            match self.lexer.peek() {
                None => return,
                Some(_) if self.lexer.at_newline() => {
                    self.lexer.eat_newline();
                }
                Some('#') => {
                    if let Err(e) = self.lexer.scan_comment() {
                        self.record(e);
                        self.recover();
                    }
                }
                Some('[') => {
                    if self.header_statement().is_err() {
                        self.recover();
                    }
                }
                Some(c) if Lexer::is_bare_key_char(c) || c == '"' || c == '\'' => {
                    if self.assignment_statement().is_err() {
                        self.recover();
                    }
                }
                Some(_) => {
                    let error = self.lexer.unexpected_junk(EXPECTED_LINE_START);
                    self.record(error);
                    self.recover();
                }
            }
        }
    }

    /// Whitespace, an optional comment, then a newline or the end of input.
    /// Leaves the newline for the statement loop.
    fn expect_line_end(&mut self) -> PResult<()> {
        self.lexer.skip_whitespace();
        if self.lexer.peek() == Some('#') {
            if let Err(e) = self.lexer.scan_comment() {
                return Err(self.record(e));
            }
        }
        if self.lexer.at_eof() || self.lexer.at_newline() {
            return Ok(());
        }
        let error = self.lexer.unexpected_junk(EXPECTED_NEWLINE_OR_EOF);
        Err(self.record(error))
    }

    /// Flushes buffered conversion errors after a well-formed statement.
    /// Returns `true` if there were any, in which case nothing is bound.
    fn flush_pending(&mut self) -> bool {
        if self.lexer.pending.is_empty() {
            return false;
        }
        self.errors.append(&mut self.lexer.pending);
        true
    }

    fn assignment_statement(&mut self) -> PResult<()> {
        let start = self.lexer.byte_offset();
        let path = self.parse_key(true)?;
        self.lexer.skip_whitespace();
        if !self.lexer.eat('=') {
            let error = self.lexer.unexpected_junk(EXPECTED_DOT_OR_EQUALS);
            return Err(self.record(error));
        }
        self.lexer.skip_whitespace();
        let value = self.parse_value(0, EXPECTED_VALUE)?;
        self.expect_line_end()?;
        if self.flush_pending() {
            return Ok(());
        }
        let span = self.lexer.span_from(start);
        if let Err(e) = self.builder.assign(&path, value, span) {
            self.record(e);
        }
        Ok(())
    }

    fn header_statement(&mut self) -> PResult<()> {
        let header_pos = self.lexer.position();
        let start = self.lexer.byte_offset();
        self.lexer.bump();
        let array = self.lexer.eat('[');
        self.lexer.skip_whitespace();
        if self.lexer.peek() == Some(']') {
            let span = self.lexer.span_from(start);
            let error = Error::new(ErrorKind::EmptyTableKey, header_pos, span);
            return Err(self.record(error));
        }
        let path = self.parse_key(false)?;
        self.lexer.skip_whitespace();
        if array {
            if !(self.lexer.eat(']') && self.lexer.eat(']')) {
                let error = self.lexer.unexpected_junk(EXPECTED_ARRAY_TABLE_CLOSE);
                return Err(self.record(error));
            }
        } else if !self.lexer.eat(']') {
            let error = self.lexer.unexpected_junk(EXPECTED_TABLE_CLOSE);
            return Err(self.record(error));
        }
        self.expect_line_end()?;
        if self.flush_pending() {
            return Ok(());
        }
        let span = self.lexer.span_from(start);
        let result = if array {
            self.builder.define_array_table(&path, header_pos, span)
        } else {
            self.builder.define_table(&path, header_pos, span)
        };
        if let Err(e) = result {
            self.record(e);
        }
        Ok(())
    }

    /// Parses a possibly dotted key. `gate_dotted` applies the pre-0.5.0
    /// restriction, which covers assignment and inline-table keys but not
    /// header paths.
    fn parse_key(&mut self, gate_dotted: bool) -> PResult<Vec<Key>> {
        let key_pos = self.lexer.position();
        let key_start = self.lexer.byte_offset();
        let mut segments = Vec::new();
        loop {
            self.lexer.skip_whitespace();
            let position = self.lexer.position();
            let segment = match self.lexer.peek() {
                Some('"') => match self.lexer.scan_basic_string() {
                    Ok(s) => s,
                    Err(e) => return Err(self.record(e)),
                },
                Some('\'') => match self.lexer.scan_literal_string() {
                    Ok(s) => s,
                    Err(e) => return Err(self.record(e)),
                },
                Some(c) if Lexer::is_bare_key_char(c) => self.lexer.scan_bare(),
                _ => {
                    let error = self.lexer.unexpected_junk(EXPECTED_KEY_CHAR);
                    return Err(self.record(error));
                }
            };
            segments.push(Key::new(segment, position));
            self.lexer.skip_whitespace();
            if self.lexer.peek() != Some('.') {
                return Ok(segments);
            }
            if gate_dotted && !self.version.allows_dotted_keys() {
                let span = self.lexer.span_from(key_start);
                let error = Error::new(ErrorKind::DottedKeysUnsupported, key_pos, span);
                return Err(self.record(error));
            }
            self.lexer.bump();
        }
    }

    fn parse_value(&mut self, depth: i16, expected: &'static str) -> PResult<Value> {
        if depth > MAX_RECURSION_DEPTH {
            let position = self.lexer.position();
            let span = self.lexer.span_from(self.lexer.byte_offset());
            let error = Error::new(ErrorKind::DepthLimitExceeded, position, span);
            return Err(self.record(error));
        }
        match self.lexer.peek() {
            Some('"') => {
                let result = if self.lexer.peek_at(1) == Some('"')
                    && self.lexer.peek_at(2) == Some('"')
                {
                    self.lexer.scan_ml_basic_string()
                } else {
                    self.lexer.scan_basic_string()
                };
                match result {
                    Ok(s) => Ok(Value::String(s)),
                    Err(e) => Err(self.record(e)),
                }
            }
            Some('\'') => {
                let result = if self.lexer.peek_at(1) == Some('\'')
                    && self.lexer.peek_at(2) == Some('\'')
                {
                    self.lexer.scan_ml_literal_string()
                } else {
                    self.lexer.scan_literal_string()
                };
                match result {
                    Ok(s) => Ok(Value::String(s)),
                    Err(e) => Err(self.record(e)),
                }
            }
            Some('[') => self.parse_array(depth),
            Some('{') => self.parse_inline_table(depth),
            Some('+') | Some('-') => match self.lexer.scan_signed_number(expected) {
                Ok(v) => Ok(v),
                Err(e) => Err(self.record(e)),
            },
            Some(c) if c.is_ascii_digit() => match self.lexer.scan_number_or_datetime() {
                Ok(v) => Ok(v),
                Err(e) => Err(self.record(e)),
            },
            Some(c) if c.is_ascii_alphabetic() => {
                let position = self.lexer.position();
                let start = self.lexer.byte_offset();
                let word = self.lexer.scan_bare();
                match word.as_str() {
                    "true" => Ok(Value::Boolean(true)),
                    "false" => Ok(Value::Boolean(false)),
                    "inf" => Ok(Value::Float(f64::INFINITY)),
                    "nan" => Ok(Value::Float(f64::NAN)),
                    _ => {
                        let span = self.lexer.span_from(start);
                        let error = Error::new(
                            ErrorKind::Unexpected {
                                found: Found::Token(word),
                                expected,
                            },
                            position,
                            span,
                        );
                        Err(self.record(error))
                    }
                }
            }
            _ => {
                let error = self.lexer.unexpected_junk(expected);
                Err(self.record(error))
            }
        }
    }

    fn parse_array(&mut self, depth: i16) -> PResult<Value> {
        self.lexer.bump();
        let mut values: Vec<Value> = Vec::new();
        let mut element_kind: Option<Kind> = None;
        loop {
            // Element position: whitespace, newlines and comments may
            // precede a value or the closing bracket.
            loop {
                self.lexer.skip_whitespace();
                if self.lexer.eat_newline() {
                    continue;
                }
                if self.lexer.peek() == Some('#') {
                    if let Err(e) = self.lexer.scan_comment() {
                        return Err(self.record(e));
                    }
                    continue;
                }
                break;
            }
            if self.lexer.eat(']') {
                return Ok(Value::Array(Array::from_values(values)));
            }
            let element_pos = self.lexer.position();
            let element_start = self.lexer.byte_offset();
            let value = self.parse_value(depth + 1, EXPECTED_ARRAY_VALUE)?;
            if !self.version.allows_heterogeneous_arrays() {
                match element_kind {
                    None => element_kind = Some(value.kind()),
                    Some(kind) if kind != value.kind() => {
                        let span = self.lexer.span_from(element_start);
                        self.lexer.pending.push(Error::new(
                            ErrorKind::HeterogeneousArray {
                                add: value.kind(),
                                contains: kind,
                            },
                            element_pos,
                            span,
                        ));
                    }
                    Some(_) => {}
                }
            }
            values.push(value);

            // Separator: whitespace, newlines and comments, then a comma or
            // the closing bracket.
            loop {
                self.lexer.skip_whitespace();
                if self.lexer.eat_newline() {
                    continue;
                }
                if self.lexer.peek() == Some('#') {
                    if let Err(e) = self.lexer.scan_comment() {
                        return Err(self.record(e));
                    }
                    continue;
                }
                break;
            }
            if self.lexer.eat(',') {
                continue;
            }
            if self.lexer.eat(']') {
                return Ok(Value::Array(Array::from_values(values)));
            }
            let error = self.lexer.unexpected_junk(EXPECTED_ARRAY_SEP);
            return Err(self.record(error));
        }
    }

    fn parse_inline_table(&mut self, depth: i16) -> PResult<Value> {
        let start = self.lexer.byte_offset();
        self.lexer.bump();
        let mut table = Table::new(TableState::InlineLiteral);
        self.lexer.skip_whitespace();
        if self.lexer.eat('}') {
            return Ok(Value::Table(table));
        }
        let mut first = true;
        loop {
            self.lexer.skip_whitespace();
            let key_start_ok = matches!(
                self.lexer.peek(),
                Some(c) if Lexer::is_bare_key_char(c) || c == '"' || c == '\''
            );
            if !key_start_ok {
                let expected = if first {
                    EXPECTED_INLINE_FIRST_KEY
                } else {
                    EXPECTED_KEY_CHAR
                };
                let error = self.lexer.unexpected_junk(expected);
                return Err(self.record(error));
            }
            first = false;
            let path = self.parse_key(true)?;
            self.lexer.skip_whitespace();
            if !self.lexer.eat('=') {
                let error = self.lexer.unexpected_junk(EXPECTED_DOT_OR_EQUALS);
                return Err(self.record(error));
            }
            self.lexer.skip_whitespace();
            let value = self.parse_value(depth + 1, EXPECTED_VALUE)?;
            let span = self.lexer.span_from(start);
            if let Err(e) = insert_dotted(&mut table, &path, value, span) {
                self.record(e);
            }
            self.lexer.skip_whitespace();
            if self.lexer.eat(',') {
                continue;
            }
            if self.lexer.eat('}') {
                return Ok(Value::Table(table));
            }
            if self.lexer.at_newline() {
                let error = self.lexer.unexpected_junk(EXPECTED_INLINE_CLOSE);
                return Err(self.record(error));
            }
            let error = self.lexer.unexpected_junk(EXPECTED_INLINE_SEP);
            return Err(self.record(error));
        }
    }
}
