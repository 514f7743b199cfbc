//! Search criteria: field-keyed filter conditions before compilation.
//!
//! A [`SearchCriteria`] is an ordered list of `(key, condition)` entries.
//! Each [`Condition`] is one of three shapes:
//!
//! - [`Condition::Scalar`]: a single literal, compared with `eq`
//! - [`Condition::AnyOf`]: a list of literals, OR-ed `eq` comparisons
//! - [`Condition::Ops`]: explicit operator comparisons, AND-ed together
//!
//! Entries may be absent (`None`). Absent entries are kept so that assigning
//! a key twice keeps its original position, but they never render.

use crate::op::Op;
use crate::value::Literal;

/// Right-hand side of an operator comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A single literal.
    One(Literal),
    /// A list of literals; only valid for [`Op::In`].
    Many(Vec<Literal>),
}

impl From<Literal> for Operand {
    fn from(l: Literal) -> Self {
        Operand::One(l)
    }
}

impl From<Vec<Literal>> for Operand {
    fn from(v: Vec<Literal>) -> Self {
        Operand::Many(v)
    }
}

/// One `op value` pair inside an operator condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// The comparison operator.
    pub op: Op,
    /// The value to compare against.
    pub value: Operand,
}

impl Comparison {
    /// Creates a new comparison.
    pub fn new(op: Op, value: impl Into<Operand>) -> Self {
        Comparison {
            op,
            value: value.into(),
        }
    }
}

/// Condition on a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `COLUMN eq literal`.
    Scalar(Literal),
    /// `(COLUMN eq a or COLUMN eq b ...)`.
    AnyOf(Vec<Literal>),
    /// `COLUMN op1 v1 and COLUMN op2 v2 ...`, in the given order.
    Ops(Vec<Comparison>),
}

impl Condition {
    /// A single operator comparison.
    pub fn op(op: Op, value: impl Into<Operand>) -> Self {
        Condition::Ops(vec![Comparison::new(op, value)])
    }

    /// Equality with a single literal.
    pub fn eq(value: impl Into<Literal>) -> Self {
        Condition::Scalar(value.into())
    }

    /// Inequality.
    pub fn ne(value: impl Into<Literal>) -> Self {
        Condition::op(Op::Ne, value.into())
    }

    /// Pattern match. The pattern is sent verbatim, wildcards included.
    pub fn like(pattern: impl Into<String>) -> Self {
        Condition::op(Op::Like, Literal::String(pattern.into()))
    }

    /// Prefix match: `like 'prefix*'`.
    ///
    /// The compiler never adds wildcards itself; this helper is where the
    /// trailing `*` of a "starts with" search comes from.
    pub fn starts_with(prefix: &str) -> Self {
        Condition::like(format!("{prefix}*"))
    }

    /// Greater than.
    pub fn gt(value: impl Into<Literal>) -> Self {
        Condition::op(Op::Gt, value.into())
    }

    /// Greater than or equal.
    pub fn gte(value: impl Into<Literal>) -> Self {
        Condition::op(Op::Gte, value.into())
    }

    /// Less than.
    pub fn lt(value: impl Into<Literal>) -> Self {
        Condition::op(Op::Lt, value.into())
    }

    /// Less than or equal.
    pub fn lte(value: impl Into<Literal>) -> Self {
        Condition::op(Op::Lte, value.into())
    }

    /// Inclusive range: `gte low and lte high`.
    pub fn between(low: impl Into<Literal>, high: impl Into<Literal>) -> Self {
        Condition::Ops(vec![
            Comparison::new(Op::Gte, low.into()),
            Comparison::new(Op::Lte, high.into()),
        ])
    }

    /// Any of the given values (array shorthand).
    pub fn any_of<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Literal>,
    {
        Condition::AnyOf(values.into_iter().map(Into::into).collect())
    }

    /// Membership through the explicit `in` operator.
    pub fn is_in<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Literal>,
    {
        Condition::op(Op::In, values.into_iter().map(Into::into).collect::<Vec<_>>())
    }

    /// Adds another comparison on the same field.
    ///
    /// A scalar becomes an `eq` comparison and an any-of list becomes an `in`
    /// comparison, so nothing already in the condition is lost.
    pub fn and(self, op: Op, value: impl Into<Operand>) -> Self {
        let mut comparisons = match self {
            Condition::Scalar(l) => vec![Comparison::new(Op::Eq, l)],
            Condition::AnyOf(v) => vec![Comparison::new(Op::In, v)],
            Condition::Ops(c) => c,
        };
        comparisons.push(Comparison::new(op, value));
        Condition::Ops(comparisons)
    }
}

impl From<Literal> for Condition {
    fn from(l: Literal) -> Self {
        Condition::Scalar(l)
    }
}

impl From<Vec<Literal>> for Condition {
    fn from(v: Vec<Literal>) -> Self {
        Condition::AnyOf(v)
    }
}

macro_rules! condition_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Condition {
                fn from(v: $t) -> Self {
                    Condition::Scalar(Literal::from(v))
                }
            }

            impl From<Vec<$t>> for Condition {
                fn from(v: Vec<$t>) -> Self {
                    Condition::any_of(v)
                }
            }

            impl From<$t> for Operand {
                fn from(v: $t) -> Self {
                    Operand::One(Literal::from(v))
                }
            }

            impl From<Vec<$t>> for Operand {
                fn from(v: Vec<$t>) -> Self {
                    Operand::Many(v.into_iter().map(Literal::from).collect())
                }
            }
        )*
    };
}

condition_from_scalar!(
    &str, String, bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, usize, isize
);

/// Ordered, field-keyed filter conditions.
///
/// # Example
///
/// ```
/// use lobjects_query::{compile, Condition, SearchCriteria};
///
/// let criteria = SearchCriteria::new()
///     .field("code", "ABC")
///     .field("status", 1)
///     .maybe("clientRef", None::<i64>);
///
/// assert_eq!(
///     compile(&criteria).unwrap().as_deref(),
///     Some("CODE eq 'ABC' and STATUS eq 1")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    entries: Vec<(String, Option<Condition>)>,
}

impl SearchCriteria {
    /// Creates empty criteria. Empty criteria compile to no filter at all.
    pub fn new() -> Self {
        SearchCriteria::default()
    }

    /// Sets a condition on a field.
    pub fn field(self, key: impl Into<String>, condition: impl Into<Condition>) -> Self {
        self.insert(key, Some(condition.into()))
    }

    /// Sets a condition on a field only if one is given.
    ///
    /// `None` records the key as absent, mirroring an `undefined` property.
    pub fn maybe<C>(self, key: impl Into<String>, condition: Option<C>) -> Self
    where
        C: Into<Condition>,
    {
        self.insert(key, condition.map(Into::into))
    }

    /// Sets or clears the condition on a field.
    ///
    /// Re-assigning an existing key replaces its condition in place, so the
    /// key keeps its original position in the rendered expression.
    pub fn insert(mut self, key: impl Into<String>, condition: Option<Condition>) -> Self {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = condition,
            None => self.entries.push((key, condition)),
        }
        self
    }

    /// Returns the condition on a field, if present.
    pub fn get(&self, key: &str) -> Option<&Condition> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, c)| c.as_ref())
    }

    /// Iterates over the present conditions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.entries
            .iter()
            .filter_map(|(k, c)| c.as_ref().map(|c| (k.as_str(), c)))
    }

    /// Number of present conditions.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if no condition is present.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_entries_are_not_iterated() {
        let criteria = SearchCriteria::new()
            .field("code", "A")
            .maybe("name", None::<&str>)
            .field("status", 2);

        let keys: Vec<&str> = criteria.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["code", "status"]);
        assert_eq!(criteria.len(), 2);
    }

    #[test]
    fn all_absent_is_empty() {
        let criteria = SearchCriteria::new()
            .maybe("code", None::<&str>)
            .maybe("status", None::<i32>);
        assert!(criteria.is_empty());
        assert!(SearchCriteria::new().is_empty());
    }

    #[test]
    fn reassigning_keeps_position() {
        let criteria = SearchCriteria::new()
            .field("a", 1)
            .field("b", 2)
            .field("a", 3);

        let entries: Vec<(&str, &Condition)> = criteria.iter().collect();
        assert_eq!(entries[0], ("a", &Condition::eq(3)));
        assert_eq!(entries[1], ("b", &Condition::eq(2)));
    }

    #[test]
    fn clearing_a_key_makes_it_absent() {
        let criteria = SearchCriteria::new()
            .field("a", 1)
            .insert("a", None);
        assert!(criteria.get("a").is_none());
        assert!(criteria.is_empty());
    }

    #[test]
    fn conversions_pick_the_right_shape() {
        assert_eq!(Condition::from("x"), Condition::Scalar(Literal::from("x")));
        assert_eq!(
            Condition::from(vec!["A", "B"]),
            Condition::AnyOf(vec![Literal::from("A"), Literal::from("B")])
        );
        assert_eq!(
            Condition::from(vec![1i64, 2]),
            Condition::AnyOf(vec![Literal::from(1i64), Literal::from(2i64)])
        );
    }

    #[test]
    fn starts_with_appends_wildcard() {
        assert_eq!(
            Condition::starts_with("test"),
            Condition::op(Op::Like, Literal::from("test*"))
        );
    }

    #[test]
    fn between_is_gte_then_lte() {
        assert_eq!(
            Condition::between(1, 5),
            Condition::Ops(vec![
                Comparison::new(Op::Gte, Literal::from(1)),
                Comparison::new(Op::Lte, Literal::from(5)),
            ])
        );
    }

    #[test]
    fn and_preserves_existing_shape() {
        assert_eq!(
            Condition::eq("A").and(Op::Ne, "B"),
            Condition::Ops(vec![
                Comparison::new(Op::Eq, "A"),
                Comparison::new(Op::Ne, "B"),
            ])
        );
        assert_eq!(
            Condition::any_of([1, 2]).and(Op::Lt, 10),
            Condition::Ops(vec![
                Comparison::new(Op::In, vec![1, 2]),
                Comparison::new(Op::Lt, 10),
            ])
        );
        assert_eq!(
            Condition::gte(1).and(Op::Lte, 9),
            Condition::between(1, 9)
        );
    }
}
