//! Criteria compiler: [`SearchCriteria`] to filter expression.
//!
//! Output grammar:
//!
//! ```text
//! expr   = field *( " and " field )
//! field  = atom *( " and " atom ) | group
//! group  = "(" atom *( " or " atom ) ")"
//! atom   = COLUMN " " op " " literal
//! ```

use tracing::{debug, trace};

use crate::column::ColumnMap;
use crate::criteria::{Comparison, Condition, Operand, SearchCriteria};
use crate::error::{QueryError, Result};
use crate::op::Op;
use crate::value::Literal;

/// Compiles criteria using the given column naming rules.
///
/// A compiler holds no state besides its [`ColumnMap`] and can be shared
/// freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    columns: ColumnMap,
}

impl Compiler {
    /// Creates a compiler with custom column naming.
    pub fn new(columns: ColumnMap) -> Self {
        Compiler { columns }
    }

    /// Returns the column naming rules.
    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    /// Renders criteria to a filter expression.
    ///
    /// Returns `Ok(None)` when no condition is present, so callers never send
    /// an empty filter. Any error aborts the whole compilation: a clause is
    /// never silently dropped.
    pub fn compile(&self, criteria: &SearchCriteria) -> Result<Option<String>> {
        let mut parts = Vec::new();

        for (key, condition) in criteria.iter() {
            let column = self.columns.resolve(key)?;
            if let Some(expr) = render_condition(key, &column, condition)? {
                trace!(field = key, column = %column, expr = %expr, "rendered criteria field");
                parts.push(expr);
            }
        }

        if parts.is_empty() {
            debug!("criteria empty, no filter emitted");
            return Ok(None);
        }

        let filter = parts.join(" and ");
        debug!(fields = parts.len(), filter = %filter, "compiled filter expression");
        Ok(Some(filter))
    }
}

/// Compiles criteria with the default column naming.
///
/// ```
/// use lobjects_query::{compile, SearchCriteria};
///
/// let criteria = SearchCriteria::new().field("tags", vec!["A", "B"]);
/// assert_eq!(
///     compile(&criteria).unwrap().as_deref(),
///     Some("(TAGS eq 'A' or TAGS eq 'B')")
/// );
/// ```
pub fn compile(criteria: &SearchCriteria) -> Result<Option<String>> {
    Compiler::default().compile(criteria)
}

fn render_condition(key: &str, column: &str, condition: &Condition) -> Result<Option<String>> {
    match condition {
        Condition::Scalar(literal) => Ok(Some(atom(key, column, Op::Eq, literal)?)),
        Condition::AnyOf(values) => Ok(Some(any_of(key, column, values)?)),
        Condition::Ops(comparisons) => {
            // An operator object with nothing in it constrains nothing.
            if comparisons.is_empty() {
                return Ok(None);
            }
            let atoms = comparisons
                .iter()
                .map(|c| render_comparison(key, column, c))
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(atoms.join(" and ")))
        }
    }
}

fn render_comparison(key: &str, column: &str, comparison: &Comparison) -> Result<String> {
    match (comparison.op, &comparison.value) {
        (Op::In, Operand::Many(values)) => any_of(key, column, values),
        (Op::In, Operand::One(value)) => any_of(key, column, std::slice::from_ref(value)),
        (Op::Like, Operand::One(value)) if value.as_str().is_none() => Err(
            QueryError::invalid_literal(key, "operator 'like' takes a string pattern"),
        ),
        (op, Operand::One(value)) => atom(key, column, op, value),
        (op, Operand::Many(_)) => Err(QueryError::InvalidOperand {
            field: key.to_string(),
            op: op.as_str(),
        }),
    }
}

fn atom(key: &str, column: &str, op: Op, value: &Literal) -> Result<String> {
    Ok(format!("{column} {op} {}", value.render(key)?))
}

fn any_of(key: &str, column: &str, values: &[Literal]) -> Result<String> {
    if values.is_empty() {
        return Err(QueryError::EmptyValueList {
            field: key.to_string(),
        });
    }

    let atoms = values
        .iter()
        .map(|v| atom(key, column, Op::Eq, v))
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("({})", atoms.join(" or ")))
}
