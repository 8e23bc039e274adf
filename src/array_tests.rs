use crate::array::{Array, ArrayKind};
use crate::value::Value;

#[test]
fn indexing_and_typed_getters() {
    let array = Array::from_values(vec![
        Value::Integer(1),
        Value::String("two".into()),
        Value::Boolean(true),
        Value::Float(4.0),
    ]);
    assert_eq!(array.len(), 4);
    assert_eq!(array.get_integer(0), Some(1));
    assert_eq!(array.get_string(1), Some("two"));
    assert_eq!(array.get_boolean(2), Some(true));
    assert_eq!(array.get_float(3), Some(4.0));
    assert_eq!(array.get_string(0), None, "type mismatch");
    assert!(array.get(9).is_none());
}

#[test]
fn empty() {
    let array = Array::from_values(Vec::new());
    assert!(array.is_empty());
    assert_eq!(array.len(), 0);
}

#[test]
fn equality_is_elementwise_and_ignores_kind() {
    let a = Array::from_values(vec![Value::Integer(1), Value::Integer(2)]);
    let b = Array::from_values(vec![Value::Integer(1), Value::Integer(2)]);
    assert!(a == b);

    let mut c = Array::new(ArrayKind::Tables);
    c.push(Value::Integer(1));
    c.push(Value::Integer(2));
    assert!(a == c, "literal/table-array kinds do not affect equality");

    let d = Array::from_values(vec![Value::Integer(2), Value::Integer(1)]);
    assert!(a != d, "element order matters");
}

#[test]
fn iteration() {
    let array = Array::from_values(vec![Value::Integer(1), Value::Integer(2)]);
    let sum: i64 = array.iter().filter_map(Value::as_integer).sum();
    assert_eq!(sum, 3);
}
