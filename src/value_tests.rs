use crate::value::{Kind, Value};
use crate::{parse, Date};

#[test]
fn kinds_and_accessors() {
    let value = Value::String("x".into());
    assert_eq!(value.kind(), Kind::String);
    assert_eq!(value.type_str(), "string");
    assert_eq!(value.as_str(), Some("x"));
    assert_eq!(value.as_integer(), None);

    let value = Value::Integer(7);
    assert_eq!(value.type_str(), "integer");
    assert_eq!(value.as_integer(), Some(7));

    let value = Value::LocalDate(Date {
        year: 2000,
        month: 1,
        day: 2,
    });
    assert_eq!(value.type_str(), "local date");
    assert!(value.as_local_date().is_some());
    assert!(value.as_local_time().is_none());
}

#[test]
fn kind_names() {
    assert_eq!(Kind::OffsetDateTime.name(), "offset date-time");
    assert_eq!(Kind::LocalDateTime.name(), "local date-time");
    assert_eq!(Kind::LocalTime.name(), "local time");
    assert_eq!(Kind::Boolean.name(), "boolean");
    assert_eq!(Kind::Table.name(), "table");
}

#[test]
fn scalar_equality() {
    assert_eq!(Value::Integer(1), Value::Integer(1));
    assert_ne!(Value::Integer(1), Value::Float(1.0));
    assert_eq!(Value::Boolean(true), Value::Boolean(true));
    assert_ne!(Value::String("a".into()), Value::String("b".into()));
}

#[test]
fn float_equality_is_bitwise() {
    let nan = Value::Float(f64::NAN);
    assert_eq!(nan, Value::Float(f64::NAN));
    assert_ne!(Value::Float(0.0), Value::Float(-0.0));
    assert_eq!(Value::Float(1.5), Value::Float(1.5));
}

#[test]
fn equality_is_reflexive_over_parsed_trees() {
    let doc = parse(
        "a = nan\nb = [1, 'x', {inner = 1979-05-27}]\n[t]\nc = inf\n[[arr]]\nd = 1\n",
    );
    assert!(!doc.has_errors(), "{:?}", doc.errors());
    assert!(doc.root() == doc.root());
}
