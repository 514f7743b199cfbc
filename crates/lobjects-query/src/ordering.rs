//! Sort specification for list requests.
//!
//! Provides [`Dir`] for sort direction and [`SortSpec`] for the `sort`
//! query parameter: one or more columns sharing a single direction.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::column::ColumnMap;
use crate::error::{QueryError, Result};

/// Column names as the backend accepts them in `sort`: word characters,
/// optionally dotted for related-entity columns.
static SORT_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+(\.[A-Za-z0-9_]+)*$").expect("sort field pattern is valid")
});

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (the backend default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Returns the grammar token of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which columns to sort by and in which direction.
///
/// Covers the four shapes list requests use: one field, one field with a
/// direction, several fields, several fields with a shared direction.
///
/// Renders as the comma-joined column list, followed by ` desc` only when the
/// direction is descending. Ascending is the backend default and is never
/// spelled out.
///
/// # Example
///
/// ```
/// use lobjects_query::{Dir, SortSpec};
///
/// assert_eq!(SortSpec::field("FICHENO").render(), "FICHENO");
/// assert_eq!(SortSpec::fields(["DATE_", "FICHENO"]).desc().render(), "DATE_,FICHENO desc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "SortShape")]
pub struct SortSpec {
    fields: Vec<String>,
    dir: Option<Dir>,
}

impl SortSpec {
    /// Sorts by a single field, ascending.
    pub fn field(field: impl Into<String>) -> Self {
        SortSpec {
            fields: vec![field.into()],
            dir: None,
        }
    }

    /// Sorts by a single field in the given direction.
    pub fn field_dir(field: impl Into<String>, dir: Dir) -> Self {
        SortSpec::field(field).dir(dir)
    }

    /// Sorts by several fields, ascending.
    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SortSpec {
            fields: fields.into_iter().map(Into::into).collect(),
            dir: None,
        }
    }

    /// Sorts by several fields sharing one direction.
    pub fn fields_dir<I, S>(fields: I, dir: Dir) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SortSpec::fields(fields).dir(dir)
    }

    /// Sets the direction for the whole field list.
    pub fn dir(mut self, dir: Dir) -> Self {
        self.dir = Some(dir);
        self
    }

    /// Sets the direction to descending.
    pub fn desc(self) -> Self {
        self.dir(Dir::Desc)
    }

    /// Sets the direction to ascending.
    pub fn asc(self) -> Self {
        self.dir(Dir::Asc)
    }

    /// Returns the sort fields in order.
    pub fn get_fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the effective direction.
    pub fn get_dir(&self) -> Dir {
        self.dir.unwrap_or_default()
    }

    /// Checks the shape of the sort and, for a strict column map, that every
    /// field is a known column.
    pub fn validate(&self, columns: &ColumnMap) -> Result<()> {
        if self.fields.is_empty() {
            return Err(QueryError::invalid_sort("no sort fields given"));
        }

        for field in &self.fields {
            if !SORT_FIELD.is_match(field) {
                return Err(QueryError::invalid_sort(format!(
                    "'{field}' is not a valid column name"
                )));
            }
            if !columns.is_known_column(field) {
                return Err(QueryError::invalid_sort(format!("unknown column '{field}'")));
            }
        }

        Ok(())
    }

    /// Renders the `sort` parameter value (before percent-encoding).
    pub fn render(&self) -> String {
        let fields = self.fields.join(",");
        match self.get_dir() {
            Dir::Asc => fields,
            Dir::Desc => format!("{fields} {}", Dir::Desc),
        }
    }
}

/// Accepted input shapes for a sort specification.
///
/// Object shapes reject unknown keys, so `{ field, fields }` or a misspelled
/// `direction` fails instead of silently dropping part of the sort.
#[derive(Deserialize)]
#[serde(untagged)]
enum SortShape {
    Field(String),
    Fields(Vec<String>),
    Single(SingleShape),
    Many(ManyShape),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SingleShape {
    field: String,
    #[serde(default)]
    dir: Option<Dir>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ManyShape {
    fields: Vec<String>,
    #[serde(default)]
    dir: Option<Dir>,
}

impl From<SortShape> for SortSpec {
    fn from(shape: SortShape) -> Self {
        match shape {
            SortShape::Field(field) => SortSpec::field(field),
            SortShape::Fields(fields) => SortSpec::fields(fields),
            SortShape::Single(SingleShape { field, dir }) => SortSpec {
                fields: vec![field],
                dir,
            },
            SortShape::Many(ManyShape { fields, dir }) => SortSpec { fields, dir },
        }
    }
}
