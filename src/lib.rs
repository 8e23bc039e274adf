//! A TOML parser that builds a position-annotated document tree and keeps
//! going after errors.
//!
//! Parsing never fails outright: it returns a [`Document`] holding the
//! (possibly partial) root [`Table`] together with every diagnostic found,
//! each carrying a 1-based line/column [`Position`]. The parser understands
//! TOML 0.4.0, 0.5.0 and 1.0.0; the version is a configuration option and
//! defaults to 1.0.0.
//!
//! # Quick start
//!
//! ```
//! let doc = toml_document::parse("key = 'value'");
//! assert!(!doc.has_errors());
//! assert_eq!(doc.get_string("key").unwrap(), Some("value"));
//! ```
//!
//! Diagnostics carry precise positions and cite first definitions:
//!
//! ```
//! let doc = toml_document::parse("foo = 1\nfoo = 2\n");
//! let err = &doc.errors()[0];
//! assert_eq!(err.to_string(), "line 2, column 1: foo previously defined at line 1, column 1");
//! ```
//!
//! The tree serializes back to TOML and to JSON, preserving insertion order:
//!
//! ```
//! let doc = toml_document::parse("[a]\nanswer = 42\n");
//! assert_eq!(doc.to_json(), "{\n  \"a\" : {\n    \"answer\" : 42\n  }\n}\n");
//! let reparsed = toml_document::parse(&doc.to_toml());
//! assert!(reparsed.root() == doc.root());
//! ```
//!
//! Earlier language versions gate features and diagnostics:
//!
//! ```
//! use toml_document::TomlVersion;
//! let doc = toml_document::parse_with_version("foo = [1, 'a']", TomlVersion::V0_5_0);
//! assert!(doc.has_errors());
//! ```

mod array;
mod builder;
mod document;
mod error;
mod key;
mod lexer;
mod parser;
mod position;
mod ser;
mod span;
mod table;
mod time;
mod value;
mod version;

pub use array::Array;
pub use document::Document;
pub use error::{Error, ErrorKind, Found};
pub use key::parse_dotted_key;
pub use position::Position;
pub use span::Span;
pub use table::{Key, Table};
pub use time::{Date, LocalDateTime, Offset, OffsetDateTime, Time};
pub use value::{Kind, Value};
pub use version::TomlVersion;

#[cfg(feature = "serde")]
pub mod impl_serde;

/// Parses a TOML 1.0.0 document.
pub fn parse(input: &str) -> Document {
    parser::parse_document(input, TomlVersion::default())
}

/// Parses a document against a specific TOML version.
pub fn parse_with_version(input: &str, version: TomlVersion) -> Document {
    parser::parse_document(input, version)
}

/// Parses a byte stream as UTF-8 TOML 1.0.0.
///
/// Invalid UTF-8 is reported as a diagnostic at the position where decoding
/// fails, and the valid prefix is parsed.
pub fn parse_bytes(input: &[u8]) -> Document {
    parse_bytes_with_version(input, TomlVersion::default())
}

/// Parses a byte stream as UTF-8 against a specific TOML version.
pub fn parse_bytes_with_version(input: &[u8], version: TomlVersion) -> Document {
    match std::str::from_utf8(input) {
        Ok(text) => parser::parse_document(text, version),
        Err(utf8_error) => {
            let valid = utf8_error.valid_up_to();
            // valid_up_to marks a UTF-8 boundary
            let text = std::str::from_utf8(&input[..valid]).unwrap_or("");
            let mut document = parser::parse_document(text, version);
            let mut line = 1u32;
            let mut column = 1u32;
            for c in text.chars() {
                if c == '\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
            }
            document.push_error(Error::new(
                ErrorKind::InvalidUtf8,
                Position::new(line, column),
                Span::new(valid as u32, valid as u32 + 1),
            ));
            document
        }
    }
}
