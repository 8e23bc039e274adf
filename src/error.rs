#[cfg(test)]
#[path = "./error_tests.rs"]
mod tests;

use crate::position::Position;
use crate::span::Span;
use crate::value::Kind;
use std::fmt::{self, Display, Write as _};

/// An error produced while parsing or querying a TOML document.
///
/// Parse errors are collected into [`Document::errors`](crate::Document::errors);
/// the key micro-parser and the typed getters return them directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// The error kind.
    pub kind: ErrorKind,
    /// Line and column of the offending input.
    pub position: Position,
    /// The byte-offset span of the offending input.
    ///
    /// Zero for errors that do not originate from parsing.
    pub span: Span,
}

impl std::error::Error for Error {}

impl Error {
    pub(crate) fn new(kind: ErrorKind, position: Position, span: Span) -> Self {
        Self {
            kind,
            position,
            span,
        }
    }

    /// The diagnostic message, without the position prefix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.kind)
    }
}

/// What the parser found where it expected something else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    /// An offending token, rendered with [`escape_token`] in messages.
    Token(String),
    /// End of the input.
    Eof,
    /// End of the current line.
    Eol,
}

/// The kinds of error this library reports.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// The grammar allowed none of what was found at this position.
    Unexpected {
        /// The offending token.
        found: Found,
        /// Rendered list of grammar-allowed alternatives.
        expected: &'static str,
    },

    /// A `[]` or `[[]]` header with no key.
    EmptyTableKey,

    /// A dotted key in an assignment or inline table before TOML v0.5.0.
    DottedKeysUnsupported,

    /// Arrays and inline tables nested beyond the supported depth.
    DepthLimitExceeded,

    /// The byte input was not valid UTF-8.
    InvalidUtf8,

    /// An integer literal outside the signed 64-bit range.
    IntegerTooLarge,

    /// A float literal that overflows an IEEE-754 double.
    FloatTooLarge,

    /// A nonzero float literal below the smallest normal double.
    FloatTooSmall,

    /// An unknown escape sequence in a basic string.
    InvalidEscape(char),

    /// A malformed `\uXXXX`/`\UXXXXXXXX` escape: wrong digit count, a
    /// surrogate half, or a value outside the Unicode scalar range.
    InvalidUnicodeEscape,

    /// A raw tab in a basic string (rejected at v0.5.0).
    TabInString,

    /// A date/time component out of range or malformed.
    InvalidYear,
    InvalidMonth,
    InvalidDay,
    /// A day that does not exist in its month, e.g. February 30.
    InvalidDate {
        month: u8,
        day: u8,
    },
    InvalidHour,
    InvalidMinutes,
    InvalidSeconds,
    InvalidNanoseconds,
    InvalidZoneOffsetHours,
    InvalidZoneOffsetMinutes,
    InvalidZoneOffset,

    /// A mixed-type array before TOML v1.0.0.
    HeterogeneousArray {
        /// Kind of the element being added.
        add: Kind,
        /// Kind of the elements already present.
        contains: Kind,
    },

    /// A key collided with an existing definition.
    PreviouslyDefined {
        /// The key path as written in the offending statement.
        path: String,
        /// Where the first definition was.
        first: Position,
    },

    /// An `[[array.header]]` addressed an array created by a `[ … ]` literal.
    DefinedAsLiteralArray {
        path: String,
        first: Position,
    },

    /// An `[[array.header]]` addressed an existing non-array value.
    NotAnArray {
        path: String,
        first: Position,
    },

    /// The dotted-key micro-parser rejected a lookup string.
    InvalidKey {
        found: Found,
    },

    /// A typed getter found a value of a different kind.
    TypeMismatch {
        path: String,
        found: Kind,
    },
}

impl Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The apostrophe is displayed bare.
            Found::Token(t) if t == "'" => f.write_str("'"),
            Found::Token(t) => {
                f.write_char('\'')?;
                f.write_str(&escape_token(t))?;
                f.write_char('\'')
            }
            Found::Eof => f.write_str("end of input"),
            Found::Eol => f.write_str("end of line"),
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unexpected { found, expected } => {
                write!(f, "Unexpected {found}, expected {expected}")
            }
            Self::EmptyTableKey => f.write_str("Empty table key"),
            Self::DottedKeysUnsupported => f.write_str("Dotted keys are not supported"),
            Self::DepthLimitExceeded => f.write_str("Document is nested too deeply"),
            Self::InvalidUtf8 => f.write_str("Invalid UTF-8 in input"),
            Self::IntegerTooLarge => f.write_str("Integer is too large"),
            Self::FloatTooLarge => f.write_str("Float is too large"),
            Self::FloatTooSmall => f.write_str("Float is too small"),
            Self::InvalidEscape(c) => {
                write!(f, "Invalid escape sequence '\\{c}'")
            }
            Self::InvalidUnicodeEscape => f.write_str("Invalid unicode escape sequence"),
            Self::TabInString => {
                f.write_str("Use \\t to represent a tab in a string (TOML versions before 1.0.0)")
            }
            Self::InvalidYear => f.write_str("Invalid year (valid range 0000..9999)"),
            Self::InvalidMonth => f.write_str("Invalid month (valid range 01..12)"),
            Self::InvalidDay => f.write_str("Invalid day (valid range 01..28/31)"),
            Self::InvalidDate { month, day } => {
                write!(f, "Invalid date '{} {}'", crate::time::month_name(*month), day)
            }
            Self::InvalidHour => f.write_str("Invalid hour (valid range 00..23)"),
            Self::InvalidMinutes => f.write_str("Invalid minutes (valid range 00..59)"),
            Self::InvalidSeconds => f.write_str("Invalid seconds (valid range 00..59)"),
            Self::InvalidNanoseconds => {
                f.write_str("Invalid nanoseconds (valid range 0..999999999)")
            }
            Self::InvalidZoneOffsetHours => {
                f.write_str("Invalid zone offset hours (valid range -18..+18)")
            }
            Self::InvalidZoneOffsetMinutes => {
                f.write_str("Invalid zone offset minutes (valid range 0..59)")
            }
            Self::InvalidZoneOffset => {
                f.write_str("Invalid zone offset (valid range -18:00..+18:00)")
            }
            Self::HeterogeneousArray { add, contains } => {
                write!(
                    f,
                    "Cannot add {} to an array containing {}s",
                    add.indefinite(),
                    contains.name()
                )
            }
            Self::PreviouslyDefined { path, first } => {
                write!(f, "{path} previously defined at {first}")
            }
            Self::DefinedAsLiteralArray { path, first } => {
                write!(f, "{path} previously defined as a literal array at {first}")
            }
            Self::NotAnArray { path, first } => {
                write!(f, "{path} is not an array (previously defined at {first})")
            }
            Self::InvalidKey { found } => {
                write!(f, "Invalid key: Unexpected {found}, expected . or end-of-input")
            }
            Self::TypeMismatch { path, found } => {
                write!(f, "Value of '{path}' is {}", found.indefinite())
            }
        }
    }
}

/// Renders a token for a diagnostic: printable characters stay literal,
/// common controls use two-character escapes, other control characters
/// become `\uXXXX`, and supplementary-plane characters become `\UXXXXXXXX`.
pub(crate) fn escape_token(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    for c in token.chars() {
        escape_char_into(&mut out, c);
    }
    out
}

pub(crate) fn escape_char_into(out: &mut String, c: char) {
    match c {
        '\t' => out.push_str("\\t"),
        '\r' => out.push_str("\\r"),
        '\n' => out.push_str("\\n"),
        '\u{8}' => out.push_str("\\b"),
        '\u{c}' => out.push_str("\\f"),
        c if (c as u32) > 0xFFFF => {
            let _ = write!(out, "\\U{:08x}", c as u32);
        }
        c if c.is_control() => {
            let _ = write!(out, "\\u{:04x}", c as u32);
        }
        c => out.push(c),
    }
}

#[cfg(feature = "reporting")]
#[cfg_attr(docsrs, doc(cfg(feature = "reporting")))]
impl Error {
    /// Converts this [`Error`] into a [`codespan_reporting::diagnostic::Diagnostic`].
    pub fn to_diagnostic<FileId: Copy + PartialEq>(
        &self,
        fid: FileId,
    ) -> codespan_reporting::diagnostic::Diagnostic<FileId> {
        use codespan_reporting::diagnostic::{Diagnostic, Label};

        let range = self.span.start as usize..self.span.end.max(self.span.start + 1) as usize;
        let label = match &self.kind {
            ErrorKind::PreviouslyDefined { first, .. }
            | ErrorKind::DefinedAsLiteralArray { first, .. }
            | ErrorKind::NotAnArray { first, .. } => {
                Label::primary(fid, range).with_message(format!("first defined at {first}"))
            }
            _ => Label::primary(fid, range),
        };
        Diagnostic::error()
            .with_message(self.kind.to_string())
            .with_labels(vec![label])
    }
}
