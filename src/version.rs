//! TOML language version selection.

/// The TOML language version a document is parsed against.
///
/// The version gates a small set of language features and diagnostics;
/// everything else is common to all supported versions.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub enum TomlVersion {
    /// TOML v0.4.0
    V0_4_0,
    /// TOML v0.5.0
    V0_5_0,
    /// TOML v1.0.0
    #[default]
    V1_0_0,
}

impl TomlVersion {
    /// Dotted keys in assignments and inline tables require v0.5.0.
    /// Dotted `[table]` headers are valid in every version.
    #[inline]
    pub fn allows_dotted_keys(self) -> bool {
        self >= TomlVersion::V0_5_0
    }

    /// Arrays may mix element types starting with v1.0.0.
    #[inline]
    pub fn allows_heterogeneous_arrays(self) -> bool {
        self >= TomlVersion::V1_0_0
    }

    /// A raw tab character inside a basic string is rejected at v0.5.0
    /// and accepted otherwise.
    #[inline]
    pub fn allows_raw_tab_in_basic_strings(self) -> bool {
        self != TomlVersion::V0_5_0
    }
}
