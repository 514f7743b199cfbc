//! List options and their query-string encoding.
//!
//! [`ListOptions`] collects pagination, sorting, projection, filtering and
//! expansion parameters for a list request and encodes them into a query
//! string. Keys are always emitted in the same order:
//!
//! ```text
//! limit, offset, sort, fields, q, count, expandLevel
//! ```
//!
//! Every value is percent-encoded, so splitting the result on `&` and `=` and
//! decoding each part gives back exactly what was set.

use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::column::ColumnMap;
use crate::compile::Compiler;
use crate::criteria::SearchCriteria;
use crate::error::{QueryError, Result};
use crate::ordering::SortSpec;

/// How deeply related entities are expanded in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ExpandLevel {
    /// Expand every related collection.
    Full,
    /// Return the bare entity.
    None,
}

impl ExpandLevel {
    /// Returns the query-string token of this level.
    pub fn as_str(self) -> &'static str {
        match self {
            ExpandLevel::Full => "full",
            ExpandLevel::None => "none",
        }
    }
}

impl std::fmt::Display for ExpandLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExpandLevel {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(ExpandLevel::Full),
            "none" => Ok(ExpandLevel::None),
            _ => Err(QueryError::InvalidExpandLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for ExpandLevel {
    type Error = QueryError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Parameters of a list request.
///
/// All fields are optional; options with nothing set encode to an empty
/// string.
///
/// # Example
///
/// ```
/// use lobjects_query::{ExpandLevel, ListOptions, SortSpec};
///
/// let options = ListOptions::new()
///     .limit(10)
///     .offset(0)
///     .sort(SortSpec::field("FICHENO"));
/// assert_eq!(options.encode().unwrap(), "limit=10&offset=0&sort=FICHENO");
///
/// let options = ListOptions::new().expand_level(ExpandLevel::Full);
/// assert_eq!(options.to_url("/salesOrders").unwrap(), "/salesOrders?expandLevel=full");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListOptions {
    #[serde(default)]
    limit: Option<u64>,
    #[serde(default)]
    offset: Option<u64>,
    #[serde(default)]
    sort: Option<SortSpec>,
    #[serde(default)]
    fields: Option<Vec<String>>,
    #[serde(default, rename = "q", alias = "filter")]
    filter: Option<String>,
    #[serde(default)]
    count: Option<bool>,
    #[serde(default)]
    expand_level: Option<ExpandLevel>,
}

impl ListOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        ListOptions::default()
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Sets the maximum number of items to return.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets the number of items to skip.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Sets the sort specification.
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets the projected fields. Duplicates collapse to their first occurrence.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(dedup(fields.into_iter().map(Into::into)));
        self
    }

    /// Sets a pre-rendered filter expression, sent as `q`.
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Requests a total count along with the items.
    pub fn count(mut self, count: bool) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets the related-entity expansion level.
    pub fn expand_level(mut self, level: ExpandLevel) -> Self {
        self.expand_level = Some(level);
        self
    }

    /// Compiles criteria into the filter slot with default column naming.
    ///
    /// An existing filter is kept and AND-ed with the compiled criteria;
    /// criteria that compile to no filter leave it unchanged.
    pub fn with_criteria(self, criteria: &SearchCriteria) -> Result<Self> {
        self.with_criteria_using(&Compiler::default(), criteria)
    }

    /// Compiles criteria into the filter slot with the given compiler.
    pub fn with_criteria_using(
        mut self,
        compiler: &Compiler,
        criteria: &SearchCriteria,
    ) -> Result<Self> {
        let Some(compiled) = compiler.compile(criteria)? else {
            return Ok(self);
        };

        self.filter = match self.filter.take().filter(|f| !f.is_empty()) {
            Some(existing) => Some(format!("({existing}) and {compiled}")),
            None => Some(compiled),
        };
        Ok(self)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the limit, if set.
    pub fn get_limit(&self) -> Option<u64> {
        self.limit
    }

    /// Returns the offset, if set.
    pub fn get_offset(&self) -> Option<u64> {
        self.offset
    }

    /// Returns the sort specification, if set.
    pub fn get_sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Returns the projected fields, if set.
    pub fn get_fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    /// Returns the filter expression, if set.
    pub fn get_filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Returns the count flag, if set.
    pub fn get_count(&self) -> Option<bool> {
        self.count
    }

    /// Returns the expansion level, if set.
    pub fn get_expand_level(&self) -> Option<ExpandLevel> {
        self.expand_level
    }

    // ========================================================================
    // Encoding
    // ========================================================================

    /// Encodes the options into a query string without a leading `?`.
    pub fn encode(&self) -> Result<String> {
        self.encode_with(&ColumnMap::default())
    }

    /// Encodes the options, checking sort fields against `columns`.
    pub fn encode_with(&self, columns: &ColumnMap) -> Result<String> {
        let mut pairs: Vec<(&'static str, String)> = Vec::new();

        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }

        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }

        if let Some(sort) = &self.sort {
            sort.validate(columns)?;
            pairs.push(("sort", sort.render()));
        }

        if let Some(fields) = &self.fields {
            let fields = dedup(fields.iter().cloned());
            if !fields.is_empty() {
                pairs.push(("fields", fields.join(",")));
            }
        }

        if let Some(filter) = self.filter.as_deref().filter(|f| !f.is_empty()) {
            pairs.push(("q", filter.to_string()));
        }

        if self.count == Some(true) {
            pairs.push(("count", "true".to_string()));
        }

        if let Some(level) = self.expand_level {
            pairs.push(("expandLevel", level.as_str().to_string()));
        }

        let query = pairs
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        debug!(params = pairs.len(), query = %query, "encoded list options");
        Ok(query)
    }

    /// Appends the encoded options to `path`, adding `?` only when there is
    /// something to append.
    pub fn to_url(&self, path: &str) -> Result<String> {
        let query = self.encode()?;
        if query.is_empty() {
            Ok(path.to_string())
        } else {
            Ok(format!("{path}?{query}"))
        }
    }
}

/// Encodes list options with default column naming.
pub fn encode(options: &ListOptions) -> Result<String> {
    options.encode()
}

fn dedup(fields: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for field in fields {
        if !out.contains(&field) {
            out.push(field);
        }
    }
    out
}
