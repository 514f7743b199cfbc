//! Query compiler for Logo Objects REST clients.
//!
//! Every generated per-entity client builds its list requests the same way:
//! search criteria are compiled into an OData-like filter expression, the
//! expression goes into the list options, and the options are encoded into
//! the URL query string. This crate is that shared piece:
//!
//! - [`SearchCriteria`] + [`compile`] produce the filter expression
//! - [`ListOptions`] + [`ListOptions::encode`] produce the query string
//!
//! Both are pure functions of their input: no I/O, no shared state, and
//! byte-identical output for equal input.
//!
//! # Quick Start
//!
//! ```rust
//! use lobjects_query::{compile, Condition, ListOptions, SearchCriteria, SortSpec};
//!
//! let criteria = SearchCriteria::new()
//!     .field("projectCode", Condition::starts_with("PRJ"))
//!     .field("status", vec![1, 2])
//!     .maybe("clientRef", None::<i64>);
//!
//! let filter = compile(&criteria).unwrap();
//! assert_eq!(
//!     filter.as_deref(),
//!     Some("PROJECT_CODE like 'PRJ*' and (STATUS eq 1 or STATUS eq 2)")
//! );
//!
//! let url = ListOptions::new()
//!     .limit(10)
//!     .sort(SortSpec::field("FICHENO").desc())
//!     .with_criteria(&criteria)
//!     .unwrap()
//!     .to_url("/salesOrders")
//!     .unwrap();
//! assert_eq!(
//!     url,
//!     "/salesOrders?limit=10&sort=FICHENO%20desc\
//!      &q=PROJECT_CODE%20like%20%27PRJ%2A%27%20and%20%28STATUS%20eq%201%20or%20STATUS%20eq%202%29"
//! );
//! ```
//!
//! # Filter Grammar
//!
//! | Criteria value | Rendered as |
//! |----------------|-------------|
//! | `"ABC"`, `1`, `true` | `COLUMN eq 'ABC'`, `COLUMN eq 1`, `COLUMN eq true` |
//! | `["A", "B"]` | `(COLUMN eq 'A' or COLUMN eq 'B')` |
//! | `{ gte: 1, lte: 9 }` | `COLUMN gte 1 and COLUMN lte 9` |
//! | `{ in: [1, 2] }` | `(COLUMN eq 1 or COLUMN eq 2)` |
//! | `null` / `None` | nothing |
//!
//! Field expressions are joined with `and` in insertion order. Keys are
//! mapped from camelCase to the backend's UPPER_SNAKE_CASE columns (see
//! [`to_column_name`] and [`ColumnMap`]).
//!
//! # Query String
//!
//! Keys are emitted in a fixed order, each at most once:
//!
//! ```text
//! limit, offset, sort, fields, q, count, expandLevel
//! ```

mod column;
mod compile;
mod criteria;
mod error;
mod json;
mod op;
mod options;
mod ordering;
mod value;

// Re-export public API
pub use column::{to_column_name, ColumnMap};
pub use compile::{compile, Compiler};
pub use criteria::{Comparison, Condition, Operand, SearchCriteria};
pub use error::{QueryError, Result};
pub use op::Op;
pub use options::{encode, ExpandLevel, ListOptions};
pub use ordering::{Dir, SortSpec};
pub use value::{Literal, Number};
