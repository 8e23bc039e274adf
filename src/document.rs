#[cfg(test)]
#[path = "./document_tests.rs"]
mod tests;

use crate::error::Error;
use crate::table::Table;
use crate::value::Value;
use crate::version::TomlVersion;

/// The result of parsing a TOML document.
///
/// A parse never fails outright: it always yields a (possibly partial) root
/// table and the list of diagnostics collected along the way, in source
/// order. The tree is immutable once returned, so a `Document` can be shared
/// read-only across threads.
pub struct Document {
    root: Table,
    errors: Vec<Error>,
    version: TomlVersion,
}

impl Document {
    pub(crate) fn new(root: Table, errors: Vec<Error>, version: TomlVersion) -> Self {
        Self {
            root,
            errors,
            version,
        }
    }

    pub(crate) fn push_error(&mut self, error: Error) {
        self.errors.push(error);
    }

    /// Returns `true` if any diagnostics were collected.
    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The collected diagnostics, ordered by appearance.
    #[inline]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// The root table. Partial when the document had errors.
    #[inline]
    pub fn root(&self) -> &Table {
        &self.root
    }

    /// The TOML version the document was parsed against.
    #[inline]
    pub fn version(&self) -> TomlVersion {
        self.version
    }

    /// Renders the tree as pretty-printed JSON, keys in insertion order.
    pub fn to_json(&self) -> String {
        crate::ser::to_json(&self.root)
    }

    /// Renders the tree as canonical TOML. Reparsing the output yields a
    /// structurally equal tree.
    pub fn to_toml(&self) -> String {
        crate::ser::to_toml(&self.root)
    }

    /// Resolves a dotted key to a value.
    pub fn get(&self, dotted: &str) -> Result<Option<&Value>, Error> {
        self.root.get_dotted(dotted)
    }

    /// Resolves a pre-split key path to a value.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        self.root.get_path(path)
    }

    /// Looks up a string by dotted key. See [`Table::get_string`].
    pub fn get_string(&self, dotted: &str) -> Result<Option<&str>, Error> {
        self.root.get_string(dotted)
    }

    /// Looks up an integer by dotted key.
    pub fn get_integer(&self, dotted: &str) -> Result<Option<i64>, Error> {
        self.root.get_integer(dotted)
    }

    /// Looks up a float by dotted key.
    pub fn get_float(&self, dotted: &str) -> Result<Option<f64>, Error> {
        self.root.get_float(dotted)
    }

    /// Looks up a boolean by dotted key.
    pub fn get_boolean(&self, dotted: &str) -> Result<Option<bool>, Error> {
        self.root.get_boolean(dotted)
    }

    /// Looks up an offset date-time by dotted key.
    pub fn get_offset_date_time(
        &self,
        dotted: &str,
    ) -> Result<Option<crate::OffsetDateTime>, Error> {
        self.root.get_offset_date_time(dotted)
    }

    /// Looks up a local date-time by dotted key.
    pub fn get_local_date_time(&self, dotted: &str) -> Result<Option<crate::LocalDateTime>, Error> {
        self.root.get_local_date_time(dotted)
    }

    /// Looks up a local date by dotted key.
    pub fn get_local_date(&self, dotted: &str) -> Result<Option<crate::Date>, Error> {
        self.root.get_local_date(dotted)
    }

    /// Looks up a local time by dotted key.
    pub fn get_local_time(&self, dotted: &str) -> Result<Option<crate::Time>, Error> {
        self.root.get_local_time(dotted)
    }

    /// Looks up an array by dotted key.
    pub fn get_array(&self, dotted: &str) -> Result<Option<&crate::Array>, Error> {
        self.root.get_array(dotted)
    }

    /// Looks up a table by dotted key.
    pub fn get_table(&self, dotted: &str) -> Result<Option<&Table>, Error> {
        self.root.get_table(dotted)
    }
}

/// Structural equality of the root tables; errors do not participate.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root)
            .field("errors", &self.errors)
            .finish()
    }
}
