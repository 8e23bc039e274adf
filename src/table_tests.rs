use crate::table::{Key, Table, TableState};
use crate::value::Value;
use crate::Position;

fn key(name: &str) -> Key {
    Key::new(name, Position::new(1, 1))
}

#[test]
fn insertion_order_is_preserved() {
    let mut table = Table::new(TableState::ExplicitHeader);
    for name in ["z", "a", "m"] {
        table.insert(key(name), Value::Integer(0));
    }
    let names: Vec<&str> = table.keys().collect();
    assert_eq!(names, ["z", "a", "m"]);
    assert_eq!(table.len(), 3);
    assert!(!table.is_empty());
}

#[test]
fn lookup_works_below_and_above_the_index_threshold() {
    let mut table = Table::new(TableState::ExplicitHeader);
    let names: Vec<String> = (0..20).map(|i| format!("key{i}")).collect();
    for (i, name) in names.iter().enumerate() {
        table.insert(key(name), Value::Integer(i as i64));
        // every key stays reachable as the table grows through the threshold
        for (j, earlier) in names.iter().take(i + 1).enumerate() {
            assert_eq!(
                table.get(earlier).and_then(Value::as_integer),
                Some(j as i64),
                "after {} inserts",
                i + 1
            );
        }
    }
    assert!(!table.contains_key("missing"));
    assert!(table.get_key_value("key7").is_some());
}

#[test]
fn path_lookup() {
    let mut inner = Table::new(TableState::ExplicitHeader);
    inner.insert(key("leaf"), Value::Integer(9));
    let mut table = Table::new(TableState::ExplicitHeader);
    table.insert(key("outer"), Value::Table(inner));

    assert_eq!(
        table.get_path(&["outer", "leaf"]).and_then(Value::as_integer),
        Some(9)
    );
    assert!(table.get_path(&["outer", "missing"]).is_none());
    assert!(table.get_path(&["outer", "leaf", "deeper"]).is_none());
    assert!(table.get_path(&[]).is_none());

    assert_eq!(table.get_integer("outer.leaf").unwrap(), Some(9));
    assert!(table.get_integer("outer.missing").unwrap().is_none());
    assert!(table.get_string("outer.leaf").is_err());
}

#[test]
fn unordered_equality() {
    let mut a = Table::new(TableState::ExplicitHeader);
    a.insert(key("x"), Value::Integer(1));
    a.insert(key("y"), Value::Integer(2));

    let mut b = Table::new(TableState::InlineLiteral);
    b.insert(key("y"), Value::Integer(2));
    b.insert(key("x"), Value::Integer(1));

    assert!(a == b, "order and definition state do not matter");

    let mut c = Table::new(TableState::ExplicitHeader);
    c.insert(key("x"), Value::Integer(1));
    assert!(a != c);
}

#[test]
fn sealed_states() {
    assert!(TableState::InlineLiteral.is_sealed());
    assert!(TableState::DottedIntermediate.is_sealed());
    assert!(!TableState::Implicit.is_sealed());
    assert!(!TableState::ExplicitHeader.is_sealed());
    assert!(!TableState::ArrayTableElement.is_sealed());
}
