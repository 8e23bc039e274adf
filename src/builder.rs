//! The tree builder: grows the root table from parsed statements.
//!
//! The builder enforces TOML's table-definition rules (implicit vs explicit
//! creation, dotted-key intermediates, inline-table sealing and
//! arrays-of-tables) and reports collisions against the position where a
//! name was first defined.

#[cfg(test)]
#[path = "./builder_tests.rs"]
mod tests;

use crate::array::{Array, ArrayKind};
use crate::error::{Error, ErrorKind};
use crate::position::Position;
use crate::span::Span;
use crate::table::{Key, Table, TableState};
use crate::value::Value;

/// One step of the current header scope: a table entry index, plus the
/// element index when the entry is an array-of-tables.
#[derive(Copy, Clone)]
struct Step {
    entry: usize,
    element: Option<usize>,
}

pub(crate) struct TreeBuilder {
    root: Table,
    scope: Vec<Step>,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        Self {
            root: Table::new(TableState::ExplicitHeader),
            scope: Vec::new(),
        }
    }

    pub(crate) fn into_root(self) -> Table {
        self.root
    }

    fn table_at_mut(&mut self, steps: &[Step]) -> &mut Table {
        let mut table = &mut self.root;
        for step in steps {
            let value = table.value_at_mut(step.entry);
            table = match (value, step.element) {
                (Value::Table(t), None) => t,
                (Value::Array(a), Some(idx)) => match a.value_at_mut(idx) {
                    Value::Table(t) => t,
                    _ => unreachable!("array-of-tables elements are tables"),
                },
                _ => unreachable!("scope steps address tables"),
            };
        }
        table
    }

    /// Defines `[path]`, promoting an implicit table or creating an explicit
    /// one, and makes it the current assignment scope.
    pub(crate) fn define_table(
        &mut self,
        path: &[Key],
        header_pos: Position,
        span: Span,
    ) -> Result<(), Error> {
        let mut steps: Vec<Step> = Vec::new();
        let mut sealed: Option<(String, Position)> = None;

        for (i, segment) in path.iter().enumerate() {
            let last = i + 1 == path.len();
            let table = self.table_at_mut(&steps);
            let existing = table.find_index(&segment.name);

            if last {
                match existing {
                    None => {
                        if let Some((sealed_path, first)) = sealed {
                            return Err(previously_defined(sealed_path, first, header_pos, span));
                        }
                        let entry = table.insert(
                            Key::new(segment.name.clone(), header_pos),
                            Value::Table(Table::new(TableState::ExplicitHeader)),
                        );
                        steps.push(Step {
                            entry,
                            element: None,
                        });
                    }
                    Some(entry) => {
                        let (key, value) = table.entry_at(entry);
                        let first = key.position;
                        let promotable =
                            matches!(value, Value::Table(t) if t.state == TableState::Implicit);
                        if !promotable {
                            return Err(previously_defined(
                                join_path(&path[..=i]),
                                first,
                                header_pos,
                                span,
                            ));
                        }
                        match table.value_at_mut(entry) {
                            Value::Table(t) => t.state = TableState::ExplicitHeader,
                            _ => unreachable!(),
                        }
                        steps.push(Step {
                            entry,
                            element: None,
                        });
                    }
                }
            } else {
                self.descend(&mut steps, &mut sealed, path, i, segment, header_pos, span)?;
            }
        }

        self.scope = steps;
        Ok(())
    }

    /// Defines `[[path]]`, appending an element to an array-of-tables and
    /// making it the current assignment scope.
    pub(crate) fn define_array_table(
        &mut self,
        path: &[Key],
        header_pos: Position,
        span: Span,
    ) -> Result<(), Error> {
        let mut steps: Vec<Step> = Vec::new();
        let mut sealed: Option<(String, Position)> = None;

        for (i, segment) in path.iter().enumerate() {
            let last = i + 1 == path.len();
            if !last {
                self.descend(&mut steps, &mut sealed, path, i, segment, header_pos, span)?;
                continue;
            }

            let table = self.table_at_mut(&steps);
            match table.find_index(&segment.name) {
                None => {
                    if let Some((sealed_path, first)) = sealed {
                        return Err(previously_defined(sealed_path, first, header_pos, span));
                    }
                    let mut array = Array::new(ArrayKind::Tables);
                    array.push(Value::Table(Table::new(TableState::ArrayTableElement)));
                    let entry = table.insert(
                        Key::new(segment.name.clone(), header_pos),
                        Value::Array(array),
                    );
                    steps.push(Step {
                        entry,
                        element: Some(0),
                    });
                }
                Some(entry) => {
                    let (key, value) = table.entry_at(entry);
                    let first = key.position;
                    let array_kind = match value {
                        Value::Array(a) => Some(a.kind),
                        _ => None,
                    };
                    match array_kind {
                        Some(ArrayKind::Tables) => {
                            let element = match table.value_at_mut(entry) {
                                Value::Array(a) => {
                                    a.push(Value::Table(Table::new(
                                        TableState::ArrayTableElement,
                                    )));
                                    a.last_index()
                                }
                                _ => unreachable!(),
                            };
                            steps.push(Step {
                                entry,
                                element: Some(element),
                            });
                        }
                        Some(ArrayKind::Literal) => {
                            return Err(Error::new(
                                ErrorKind::DefinedAsLiteralArray {
                                    path: join_path(&path[..=i]),
                                    first,
                                },
                                header_pos,
                                span,
                            ));
                        }
                        None => {
                            return Err(Error::new(
                                ErrorKind::NotAnArray {
                                    path: join_path(&path[..=i]),
                                    first,
                                },
                                header_pos,
                                span,
                            ));
                        }
                    }
                }
            }
        }

        self.scope = steps;
        Ok(())
    }

    /// Resolves one intermediate segment of a header walk, creating an
    /// implicit table when the segment is absent and descending into the
    /// last element of an array-of-tables.
    #[allow(clippy::too_many_arguments)]
    fn descend(
        &mut self,
        steps: &mut Vec<Step>,
        sealed: &mut Option<(String, Position)>,
        path: &[Key],
        i: usize,
        segment: &Key,
        header_pos: Position,
        span: Span,
    ) -> Result<(), Error> {
        let table = self.table_at_mut(steps);
        match table.find_index(&segment.name) {
            None => {
                if let Some((sealed_path, first)) = sealed.clone() {
                    return Err(previously_defined(sealed_path, first, header_pos, span));
                }
                let entry = table.insert(
                    Key::new(segment.name.clone(), header_pos),
                    Value::Table(Table::new(TableState::Implicit)),
                );
                steps.push(Step {
                    entry,
                    element: None,
                });
                Ok(())
            }
            Some(entry) => {
                let (key, value) = table.entry_at(entry);
                let first = key.position;
                match value {
                    Value::Table(t) => {
                        if t.state.is_sealed() && sealed.is_none() {
                            *sealed = Some((join_path(&path[..=i]), first));
                        }
                        steps.push(Step {
                            entry,
                            element: None,
                        });
                        Ok(())
                    }
                    Value::Array(a) if a.kind == ArrayKind::Tables => {
                        steps.push(Step {
                            entry,
                            element: Some(a.len() - 1),
                        });
                        Ok(())
                    }
                    _ => Err(previously_defined(
                        join_path(&path[..=i]),
                        first,
                        header_pos,
                        span,
                    )),
                }
            }
        }
    }

    /// Binds `path = value` inside the current scope table.
    pub(crate) fn assign(
        &mut self,
        path: &[Key],
        value: Value,
        span: Span,
    ) -> Result<(), Error> {
        let scope = std::mem::take(&mut self.scope);
        let table = self.table_at_mut(&scope);
        let result = insert_dotted(table, path, value, span);
        self.scope = scope;
        result
    }
}

/// Walks a dotted key within `table`, creating sealed intermediates, and
/// binds the value at the final segment. Shared between scope assignments
/// and inline-table construction.
pub(crate) fn insert_dotted(
    table: &mut Table,
    path: &[Key],
    value: Value,
    span: Span,
) -> Result<(), Error> {
    let stmt_pos = path[0].position;
    let mut current = table;

    for (i, segment) in path.iter().enumerate() {
        let last = i + 1 == path.len();
        match current.find_index(&segment.name) {
            None if last => {
                current.insert(segment.clone(), value);
                return Ok(());
            }
            None => {
                let entry = current.insert(
                    segment.clone(),
                    Value::Table(Table::new(TableState::DottedIntermediate)),
                );
                current = match current.value_at_mut(entry) {
                    Value::Table(t) => t,
                    _ => unreachable!(),
                };
            }
            Some(entry) => {
                let (key, existing) = current.entry_at(entry);
                let first = key.position;
                let reusable = !last
                    && matches!(existing, Value::Table(t) if t.state == TableState::DottedIntermediate);
                if !reusable {
                    return Err(previously_defined(
                        join_path(&path[..=i]),
                        first,
                        stmt_pos,
                        span,
                    ));
                }
                current = match current.value_at_mut(entry) {
                    Value::Table(t) => t,
                    _ => unreachable!(),
                };
            }
        }
    }
    unreachable!("the final segment returns or errors")
}

fn previously_defined(path: String, first: Position, position: Position, span: Span) -> Error {
    Error::new(ErrorKind::PreviouslyDefined { path, first }, position, span)
}

/// Joins key segments the way they would be written: bare where possible,
/// basic-quoted otherwise.
pub(crate) fn join_path(segments: &[Key]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        crate::ser::write_key(&mut out, &segment.name);
    }
    out
}
