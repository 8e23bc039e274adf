//! The [`Value`] sum type: every kind of value a TOML document can hold.

#[cfg(test)]
#[path = "./value_tests.rs"]
mod tests;

use crate::array::Array;
use crate::table::Table;
use crate::time::{Date, LocalDateTime, OffsetDateTime, Time};
use std::fmt;

/// A parsed TOML value.
///
/// The variant set is closed: these ten kinds are everything TOML 1.0.0 can
/// express. Values are built by the parser and never mutated afterwards.
pub enum Value {
    /// A string (any of the four source forms).
    String(String),
    /// A 64-bit signed integer.
    Integer(i64),
    /// An IEEE-754 double.
    Float(f64),
    /// A boolean.
    Boolean(bool),
    /// A date-time with UTC offset.
    OffsetDateTime(OffsetDateTime),
    /// A date-time without offset.
    LocalDateTime(LocalDateTime),
    /// A date without time.
    LocalDate(Date),
    /// A time without date.
    LocalTime(Time),
    /// An array.
    Array(Array),
    /// A table.
    Table(Table),
}

/// The kind of a [`Value`], without its payload.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Kind {
    String,
    Integer,
    Float,
    Boolean,
    OffsetDateTime,
    LocalDateTime,
    LocalDate,
    LocalTime,
    Array,
    Table,
}

impl Kind {
    /// The kind's name as used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Boolean => "boolean",
            Kind::OffsetDateTime => "offset date-time",
            Kind::LocalDateTime => "local date-time",
            Kind::LocalDate => "local date",
            Kind::LocalTime => "local time",
            Kind::Array => "array",
            Kind::Table => "table",
        }
    }

    /// The kind's name with its indefinite article, for message grammar.
    pub(crate) fn indefinite(self) -> String {
        let name = self.name();
        match self {
            Kind::Integer | Kind::Array | Kind::OffsetDateTime => format!("an {name}"),
            _ => format!("a {name}"),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// The kind of this value.
    #[inline]
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(..) => Kind::String,
            Value::Integer(..) => Kind::Integer,
            Value::Float(..) => Kind::Float,
            Value::Boolean(..) => Kind::Boolean,
            Value::OffsetDateTime(..) => Kind::OffsetDateTime,
            Value::LocalDateTime(..) => Kind::LocalDateTime,
            Value::LocalDate(..) => Kind::LocalDate,
            Value::LocalTime(..) => Kind::LocalTime,
            Value::Array(..) => Kind::Array,
            Value::Table(..) => Kind::Table,
        }
    }

    /// Gets the type of the value as a string.
    #[inline]
    pub fn type_str(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns the string payload, if this is a string.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer.
    #[inline]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float payload, if this is a float.
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a boolean.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the offset date-time payload, if present.
    #[inline]
    pub fn as_offset_date_time(&self) -> Option<OffsetDateTime> {
        match self {
            Value::OffsetDateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Returns the local date-time payload, if present.
    #[inline]
    pub fn as_local_date_time(&self) -> Option<LocalDateTime> {
        match self {
            Value::LocalDateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Returns the local date payload, if present.
    #[inline]
    pub fn as_local_date(&self) -> Option<Date> {
        match self {
            Value::LocalDate(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the local time payload, if present.
    #[inline]
    pub fn as_local_time(&self) -> Option<Time> {
        match self {
            Value::LocalTime(t) => Some(*t),
            _ => None,
        }
    }

    /// Returns the array payload, if this is an array.
    #[inline]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the table payload, if this is a table.
    #[inline]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }
}

/// Structural equality.
///
/// Tables compare as unordered key→value maps, arrays compare elementwise,
/// and floats compare bitwise (so a value always equals itself, NaN
/// included).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::OffsetDateTime(a), Value::OffsetDateTime(b)) => a == b,
            (Value::LocalDateTime(a), Value::LocalDateTime(b)) => a == b,
            (Value::LocalDate(a), Value::LocalDate(b)) => a == b,
            (Value::LocalTime(a), Value::LocalTime(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => s.fmt(f),
            Value::Integer(i) => i.fmt(f),
            Value::Float(v) => v.fmt(f),
            Value::Boolean(b) => b.fmt(f),
            Value::OffsetDateTime(dt) => write!(f, "{dt}"),
            Value::LocalDateTime(dt) => write!(f, "{dt}"),
            Value::LocalDate(d) => write!(f, "{d}"),
            Value::LocalTime(t) => write!(f, "{t}"),
            Value::Array(a) => a.fmt(f),
            Value::Table(t) => t.fmt(f),
        }
    }
}
