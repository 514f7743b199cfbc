//! Error types for the query crate.

use thiserror::Error;

/// Errors that can occur when compiling criteria or encoding list options.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Operator key is not one of `eq`, `like`, `gte`, `lte`, `gt`, `lt`, `ne`, `in`.
    #[error("unrecognized operator '{op}' on field '{field}'")]
    InvalidOperator { field: String, op: String },

    /// A list was given to an operator that takes a single value.
    #[error("operator '{op}' on field '{field}' takes a single value, got a list")]
    InvalidOperand { field: String, op: &'static str },

    /// An OR-group with no values.
    #[error("empty value list for field '{field}'")]
    EmptyValueList { field: String },

    /// A literal that cannot be rendered into the filter grammar.
    #[error("invalid literal for field '{field}': {reason}")]
    InvalidLiteral { field: String, reason: String },

    /// Criteria input is not an object of field conditions.
    #[error("invalid criteria: {0}")]
    InvalidCriteria(String),

    /// Field key is empty or not a known column.
    #[error("unknown field: '{0}'")]
    UnknownField(String),

    /// Sort specification is malformed or names an unknown column.
    #[error("invalid sort specification: {0}")]
    InvalidSortSpec(String),

    /// Expansion level token is not recognized.
    #[error("invalid expand level '{0}' (expected 'full' or 'none')")]
    InvalidExpandLevel(String),

    /// Input text is not valid JSON, or has the wrong shape for list options.
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
}

impl QueryError {
    /// Create an invalid literal error.
    pub fn invalid_literal(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLiteral {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid sort specification error.
    pub fn invalid_sort(reason: impl Into<String>) -> Self {
        Self::InvalidSortSpec(reason.into())
    }
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
