//! The dotted-key micro-grammar used by lookup strings.
//!
//! Lookup keys follow TOML key syntax (bare segments, `"basic"` and
//! `'literal'` quoted segments, separated by dots) with two conveniences:
//! whitespace around dots is tolerated, and unquoted segments may contain
//! interior spaces (`pets.Dog 1.type`). Failures surface as a single
//! [`Error`] at the call site, never as a collected parse error.

#[cfg(test)]
#[path = "./key_tests.rs"]
mod tests;

use crate::error::{Error, ErrorKind, Found};
use crate::position::Position;
use crate::span::Span;

/// Splits a dotted key string into its unescaped segments.
pub fn parse_dotted_key(input: &str) -> Result<Vec<String>, Error> {
    KeyParser::new(input).run()
}

struct KeyParser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    column: u32,
}

impl<'a> KeyParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            column: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c.is_some() {
            self.column += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some(' ' | '\t')) {
            self.bump();
        }
    }

    fn fail(&self, found: Found) -> Error {
        Error::new(
            ErrorKind::InvalidKey { found },
            Position::new(1, self.column),
            Span::default(),
        )
    }

    fn fail_char(&self, c: char) -> Error {
        self.fail(Found::Token(c.to_string()))
    }

    fn run(mut self) -> Result<Vec<String>, Error> {
        let mut segments = Vec::new();
        loop {
            self.skip_whitespace();
            segments.push(self.segment()?);
            self.skip_whitespace();
            match self.bump() {
                None => return Ok(segments),
                Some('.') => continue,
                Some(c) => {
                    self.column -= 1;
                    return Err(self.fail_char(c));
                }
            }
        }
    }

    fn segment(&mut self) -> Result<String, Error> {
        match self.chars.peek() {
            Some('"') => {
                self.bump();
                self.basic_segment()
            }
            Some('\'') => {
                self.bump();
                self.literal_segment()
            }
            _ => self.bare_segment(),
        }
    }

    /// Bare-key characters plus interior blanks; surrounding whitespace is
    /// already consumed and trailing whitespace is trimmed off.
    fn bare_segment(&mut self) -> Result<String, Error> {
        let mut out = String::new();
        loop {
            match self.chars.peek() {
                Some(c) if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ' ' | '\t') => {
                    out.push(*c);
                    self.bump();
                }
                Some('.') | None => break,
                Some(&c) => return Err(self.fail_char(c)),
            }
        }
        let trimmed = out.trim_end_matches([' ', '\t']);
        if trimmed.is_empty() {
            return match self.chars.peek() {
                Some(&c) => Err(self.fail_char(c)),
                None => Err(self.fail(Found::Eof)),
            };
        }
        Ok(trimmed.to_string())
    }

    fn basic_segment(&mut self) -> Result<String, Error> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.fail(Found::Eof)),
                Some('"') => return Ok(out),
                Some('\\') => out.push(self.escape()?),
                Some(c) => out.push(c),
            }
        }
    }

    fn literal_segment(&mut self) -> Result<String, Error> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.fail(Found::Eof)),
                Some('\'') => return Ok(out),
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self) -> Result<char, Error> {
        match self.bump() {
            None => Err(self.fail(Found::Eof)),
            Some('b') => Ok('\u{8}'),
            Some('t') => Ok('\t'),
            Some('n') => Ok('\n'),
            Some('f') => Ok('\u{c}'),
            Some('r') => Ok('\r'),
            Some('"') => Ok('"'),
            Some('\\') => Ok('\\'),
            Some('u') => self.unicode_escape(4),
            Some('U') => self.unicode_escape(8),
            Some(c) => Err(self.fail_char(c)),
        }
    }

    fn unicode_escape(&mut self, digits: u32) -> Result<char, Error> {
        let mut value: u32 = 0;
        for _ in 0..digits {
            match self.bump() {
                None => return Err(self.fail(Found::Eof)),
                Some(c) => match c.to_digit(16) {
                    Some(d) => value = value * 16 + d,
                    None => {
                        self.column -= 1;
                        return Err(self.fail_char(c));
                    }
                },
            }
        }
        char::from_u32(value).ok_or_else(|| self.fail(Found::Token(format!("\\u{value:x}"))))
    }
}
