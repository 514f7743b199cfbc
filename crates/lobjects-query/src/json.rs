//! JSON input for criteria and list options.
//!
//! Generated clients accept criteria as loosely shaped objects. This module
//! reads that shape into the typed model, checking at runtime what the type
//! system cannot: operator keys, literal kinds, nesting.
//!
//! ```text
//! { "code": "ABC",                         scalar      -> eq
//!   "tags": ["A", "B"],                    array       -> OR-group
//!   "total": { "gte": 10, "lte": 20 },     operators   -> AND-ed
//!   "clientRef": null }                    null        -> skipped
//! ```
//!
//! Key order of the document is preserved, so output follows the order the
//! caller wrote.

use serde_json::{Map, Value};

use crate::criteria::{Comparison, Condition, Operand, SearchCriteria};
use crate::error::{QueryError, Result};
use crate::op::Op;
use crate::options::ListOptions;
use crate::ordering::SortSpec;
use crate::value::{Literal, Number};

impl SearchCriteria {
    /// Parses criteria from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        SearchCriteria::try_from(&value)
    }
}

impl TryFrom<&Value> for SearchCriteria {
    type Error = QueryError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => criteria_from_map(map),
            Value::Null => Ok(SearchCriteria::new()),
            other => Err(QueryError::InvalidCriteria(format!(
                "expected an object, got {}",
                kind(other)
            ))),
        }
    }
}

impl ListOptions {
    /// Parses list options from JSON text.
    ///
    /// Unknown keys are rejected rather than ignored. A `sort` value of the
    /// wrong shape is reported as [`QueryError::InvalidSortSpec`].
    pub fn from_json_str(s: &str) -> Result<Self> {
        let mut value: Value = serde_json::from_str(s)?;
        let sort = value.as_object_mut().and_then(|map| map.remove("sort"));

        let options: ListOptions = serde_json::from_value(value)?;
        match sort {
            None | Some(Value::Null) => Ok(options),
            Some(sort) => {
                let sort: SortSpec = serde_json::from_value(sort)
                    .map_err(|err| QueryError::invalid_sort(err.to_string()))?;
                Ok(options.sort(sort))
            }
        }
    }
}

fn criteria_from_map(map: &Map<String, Value>) -> Result<SearchCriteria> {
    let mut criteria = SearchCriteria::new();
    for (key, value) in map {
        criteria = criteria.insert(key.as_str(), condition(key, value)?);
    }
    Ok(criteria)
}

fn condition(field: &str, value: &Value) -> Result<Option<Condition>> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => Ok(Some(Condition::AnyOf(literals(field, items)?))),
        Value::Object(ops) => {
            let mut comparisons = Vec::with_capacity(ops.len());
            for (key, operand) in ops {
                let op = Op::parse(key).ok_or_else(|| QueryError::InvalidOperator {
                    field: field.to_string(),
                    op: key.clone(),
                })?;
                let operand = match operand {
                    Value::Null => continue,
                    Value::Array(items) => Operand::Many(literals(field, items)?),
                    scalar => Operand::One(literal(field, scalar)?),
                };
                comparisons.push(Comparison { op, value: operand });
            }
            Ok(Some(Condition::Ops(comparisons)))
        }
        scalar => Ok(Some(Condition::Scalar(literal(field, scalar)?))),
    }
}

/// Nulls inside a list are dropped; an all-null list stays empty and is
/// rejected when compiled.
fn literals(field: &str, items: &[Value]) -> Result<Vec<Literal>> {
    items
        .iter()
        .filter(|v| !v.is_null())
        .map(|v| literal(field, v))
        .collect()
}

fn literal(field: &str, value: &Value) -> Result<Literal> {
    match value {
        Value::String(s) => Ok(Literal::String(s.clone())),
        Value::Bool(b) => Ok(Literal::Bool(*b)),
        Value::Number(n) => {
            let number = if let Some(i) = n.as_i64() {
                Number::I64(i)
            } else if let Some(u) = n.as_u64() {
                Number::U64(u)
            } else if let Some(f) = n.as_f64() {
                Number::F64(f)
            } else {
                return Err(QueryError::invalid_literal(field, format!("unsupported number {n}")));
            };
            Ok(Literal::Number(number))
        }
        other => Err(QueryError::invalid_literal(
            field,
            format!("expected a string, number or boolean, got {}", kind(other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
