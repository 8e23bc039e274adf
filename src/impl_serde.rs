#![cfg_attr(docsrs, doc(cfg(feature = "serde")))]

//! Serde serialization support for the document tree.
//!
//! Enabled by the `serde` feature flag. This provides [`serde::Serialize`]
//! implementations only; tables serialize as maps in insertion order,
//! date/time values as their RFC 3339 strings.

use crate::{Array, Document, Table, Value};
use serde::ser::{SerializeMap, SerializeSeq};

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::OffsetDateTime(dt) => serializer.collect_str(dt),
            Value::LocalDateTime(dt) => serializer.collect_str(dt),
            Value::LocalDate(d) => serializer.collect_str(d),
            Value::LocalTime(t) => serializer.collect_str(t),
            Value::Array(a) => a.serialize(serializer),
            Value::Table(t) => t.serialize(serializer),
        }
    }
}

impl serde::Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(&key.name, value)?;
        }
        map.end()
    }
}

impl serde::Serialize for Array {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl serde::Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.root().serialize(serializer)
    }
}
