#[cfg(test)]
#[path = "./table_tests.rs"]
mod tests;

use crate::error::{Error, ErrorKind};
use crate::position::Position;
use crate::span::Span;
use crate::value::Value;

/// Tables with at least this many entries use the hash index for lookups.
const INDEXED_TABLE_THRESHOLD: usize = 6;

/// A table key together with the position of its defining token.
#[derive(Clone, Debug)]
pub struct Key {
    /// The key segment, unescaped.
    pub name: String,
    /// Where the entry was defined: the key segment itself for assignments
    /// and dotted keys, the opening `[` for header-created tables.
    pub position: Position,
}

impl Key {
    pub(crate) fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// How a table came into existence, which governs what may still happen
/// to it.
///
/// The only permitted transition is `Implicit` → `ExplicitHeader`, applied
/// at most once when a `[header]` names an implicitly created table. Every
/// other state is terminal.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum TableState {
    /// Created as an intermediate of a `[header]` or `[[header]]` walk.
    Implicit,
    /// Introduced by its own `[header]`, or promoted from `Implicit`.
    ExplicitHeader,
    /// Created as an intermediate of a dotted key; sealed against headers.
    DottedIntermediate,
    /// Created by a `{ … }` literal; sealed against everything outside it.
    InlineLiteral,
    /// An element of an array-of-tables.
    ArrayTableElement,
}

impl TableState {
    /// Sealed tables reject any external header or dotted key that would
    /// define them or add entries beneath them.
    #[inline]
    pub(crate) fn is_sealed(self) -> bool {
        matches!(
            self,
            TableState::DottedIntermediate | TableState::InlineLiteral
        )
    }
}

/// A TOML table: key-value pairs in insertion order.
///
/// Lookup scans linearly for small tables and switches to a hash index once
/// the table grows past a threshold. Duplicate keys never occur; the tree
/// builder rejects them during parsing.
pub struct Table {
    entries: Vec<(Key, Value)>,
    index: Option<foldhash::HashMap<String, usize>>,
    pub(crate) state: TableState,
}

impl Table {
    pub(crate) fn new(state: TableState) -> Self {
        Self {
            entries: Vec::new(),
            index: None,
            state,
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a reference to the value for `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.find_index(name).map(|i| &self.entries[i].1)
    }

    /// Returns both key and value references for `name`.
    pub fn get_key_value(&self, name: &str) -> Option<(&Key, &Value)> {
        self.find_index(name).map(|i| {
            let entry = &self.entries[i];
            (&entry.0, &entry.1)
        })
    }

    /// Returns `true` if the table contains the key.
    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.find_index(name).is_some()
    }

    /// Returns a slice of all entries in insertion order.
    #[inline]
    pub fn entries(&self) -> &[(Key, Value)] {
        &self.entries
    }

    /// Returns an iterator over `(&Key, &Value)` pairs in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over the key names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.name.as_str())
    }

    pub(crate) fn find_index(&self, name: &str) -> Option<usize> {
        if let Some(index) = &self.index {
            return index.get(name).copied();
        }
        self.entries.iter().position(|(k, _)| k.name == name)
    }

    /// Appends an entry. The caller must have checked for duplicates.
    pub(crate) fn insert(&mut self, key: Key, value: Value) -> usize {
        let idx = self.entries.len();
        if let Some(index) = &mut self.index {
            index.insert(key.name.clone(), idx);
        } else if idx + 1 >= INDEXED_TABLE_THRESHOLD {
            let mut index = foldhash::HashMap::default();
            for (i, (k, _)) in self.entries.iter().enumerate() {
                index.insert(k.name.clone(), i);
            }
            index.insert(key.name.clone(), idx);
            self.index = Some(index);
        }
        self.entries.push((key, value));
        idx
    }

    pub(crate) fn entry_at(&self, idx: usize) -> (&Key, &Value) {
        let entry = &self.entries[idx];
        (&entry.0, &entry.1)
    }

    pub(crate) fn value_at_mut(&mut self, idx: usize) -> &mut Value {
        &mut self.entries[idx].1
    }

    /// Resolves a pre-split key path, descending through nested tables.
    ///
    /// Returns `None` if any segment is missing or an intermediate value is
    /// not a table.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        self.entry_for_path(path).map(|(_, v)| v)
    }

    /// Resolves a dotted key string (parsed with the key grammar) to a value.
    pub fn get_dotted(&self, dotted: &str) -> Result<Option<&Value>, Error> {
        let segments = crate::key::parse_dotted_key(dotted)?;
        let refs: Vec<&str> = segments.iter().map(|s| s.as_str()).collect();
        Ok(self.get_path(&refs))
    }

    fn entry_for_path(&self, path: &[&str]) -> Option<(&Key, &Value)> {
        let (first, rest) = path.split_first()?;
        let mut entry = self.get_key_value(first)?;
        for segment in rest {
            entry = entry.1.as_table()?.get_key_value(segment)?;
        }
        Some(entry)
    }

    fn typed<'a, T>(
        &'a self,
        dotted: &str,
        cast: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>, Error> {
        let segments = crate::key::parse_dotted_key(dotted)?;
        let refs: Vec<&str> = segments.iter().map(|s| s.as_str()).collect();
        let Some((key, value)) = self.entry_for_path(&refs) else {
            return Ok(None);
        };
        let kind = value.kind();
        match cast(value) {
            Some(v) => Ok(Some(v)),
            None => Err(Error::new(
                ErrorKind::TypeMismatch {
                    path: dotted.to_string(),
                    found: kind,
                },
                key.position,
                Span::default(),
            )),
        }
    }

    /// Looks up a string by dotted key.
    ///
    /// Returns `Ok(None)` if the path is absent and an error if the key
    /// string is malformed or the value has a different kind; the other
    /// typed getters behave the same way.
    pub fn get_string(&self, dotted: &str) -> Result<Option<&str>, Error> {
        self.typed(dotted, Value::as_str)
    }

    /// Looks up an integer by dotted key.
    pub fn get_integer(&self, dotted: &str) -> Result<Option<i64>, Error> {
        self.typed(dotted, Value::as_integer)
    }

    /// Looks up a float by dotted key.
    pub fn get_float(&self, dotted: &str) -> Result<Option<f64>, Error> {
        self.typed(dotted, Value::as_float)
    }

    /// Looks up a boolean by dotted key.
    pub fn get_boolean(&self, dotted: &str) -> Result<Option<bool>, Error> {
        self.typed(dotted, Value::as_bool)
    }

    /// Looks up an offset date-time by dotted key.
    pub fn get_offset_date_time(
        &self,
        dotted: &str,
    ) -> Result<Option<crate::OffsetDateTime>, Error> {
        self.typed(dotted, Value::as_offset_date_time)
    }

    /// Looks up a local date-time by dotted key.
    pub fn get_local_date_time(&self, dotted: &str) -> Result<Option<crate::LocalDateTime>, Error> {
        self.typed(dotted, Value::as_local_date_time)
    }

    /// Looks up a local date by dotted key.
    pub fn get_local_date(&self, dotted: &str) -> Result<Option<crate::Date>, Error> {
        self.typed(dotted, Value::as_local_date)
    }

    /// Looks up a local time by dotted key.
    pub fn get_local_time(&self, dotted: &str) -> Result<Option<crate::Time>, Error> {
        self.typed(dotted, Value::as_local_time)
    }

    /// Looks up an array by dotted key.
    pub fn get_array(&self, dotted: &str) -> Result<Option<&crate::Array>, Error> {
        self.typed(dotted, Value::as_array)
    }

    /// Looks up a table by dotted key.
    pub fn get_table(&self, dotted: &str) -> Result<Option<&Table>, Error> {
        self.typed(dotted, Value::as_table)
    }
}

/// Order-insensitive structural equality over key→value pairs.
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.entries
            .iter()
            .all(|(k, v)| other.get(&k.name) == Some(v))
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in &self.entries {
            map.entry(&k.name, v);
        }
        map.finish()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a [`Table`], yielding `(&Key, &Value)` pairs.
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (Key, Value)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Key, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}
