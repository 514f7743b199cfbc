//! Mapping from camelCase criteria keys to backend column names.
//!
//! Criteria are keyed the way the generated client interfaces name their
//! properties (`projectCode`), while the backend expects its own
//! upper-snake-case columns (`PROJECT_CODE`). [`to_column_name`] performs the
//! default conversion; a [`ColumnMap`] adds per-entity overrides and, when
//! given a list of known columns, rejects anything else.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::error::{QueryError, Result};

/// Converts a camelCase key to an UPPER_SNAKE_CASE column name.
///
/// A word boundary is placed before an uppercase letter that follows a
/// lowercase letter, and before an uppercase letter that starts a new word
/// after a digit or an acronym run (`address2Line`, `HTMLBody`). Existing
/// underscores are kept and keys that are already upper case pass through
/// unchanged.
///
/// ```
/// use lobjects_query::to_column_name;
///
/// assert_eq!(to_column_name("projectCode"), "PROJECT_CODE");
/// assert_eq!(to_column_name("userID"), "USER_ID");
/// assert_eq!(to_column_name("FICHENO"), "FICHENO");
/// ```
pub fn to_column_name(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || (next_is_lower && (prev.is_uppercase() || prev.is_ascii_digit()))
            {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }

    out
}

/// Column naming rules for one entity.
///
/// Overrides are consulted first, then the default case conversion. When a
/// set of known columns is configured the map is *strict*: a key that does
/// not resolve to one of them is an error instead of being sent to the
/// backend.
///
/// The map deserializes from configuration such as:
///
/// ```yaml
/// overrides:
///   date: DATE_
///   ficheNo: FICHENO
/// known: [DATE_, FICHENO, CLIENTREF]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnMap {
    #[serde(default)]
    overrides: BTreeMap<String, String>,
    #[serde(default)]
    known: Option<BTreeSet<String>>,
}

impl ColumnMap {
    /// Creates a map that only applies the default case conversion.
    pub fn new() -> Self {
        ColumnMap::default()
    }

    /// Adds an explicit key-to-column override.
    pub fn with_override(mut self, key: impl Into<String>, column: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), column.into());
        self
    }

    /// Restricts resolution to the given columns.
    pub fn with_known<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known
            .get_or_insert_with(BTreeSet::new)
            .extend(columns.into_iter().map(Into::into));
        self
    }

    /// Returns `true` if a set of known columns is configured.
    pub fn is_strict(&self) -> bool {
        self.known.is_some()
    }

    /// Returns `true` if `column` may be sent to the backend.
    ///
    /// Always `true` for a non-strict map.
    pub fn is_known_column(&self, column: &str) -> bool {
        self.known.as_ref().map_or(true, |known| known.contains(column))
    }

    /// Resolves a criteria key to its backend column name.
    pub fn resolve(&self, key: &str) -> Result<String> {
        if key.is_empty() {
            return Err(QueryError::UnknownField(String::new()));
        }

        let column = match self.overrides.get(key) {
            Some(column) => column.clone(),
            None => to_column_name(key),
        };

        if !self.is_known_column(&column) {
            return Err(QueryError::UnknownField(key.to_string()));
        }

        Ok(column)
    }
}
