//! Comparison operators of the filter grammar.
//!
//! The [`Op`] enum is closed: criteria can only name operators the backend
//! understands, and string input is checked through [`Op::parse`].

/// Comparison operator for a criteria clause.
///
/// - **Equality**: `Eq`, `Ne`
/// - **Pattern**: `Like` (value is passed through verbatim, wildcards included)
/// - **Range**: `Gt`, `Gte`, `Lt`, `Lte`
/// - **Membership**: `In`, expanded into an OR-group of `eq` comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Pattern match in the backend's `*` wildcard syntax.
    Like,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Value is one of the given set.
    In,
}

impl Op {
    /// Every operator, in the order criteria objects conventionally list them.
    pub const ALL: [Op; 8] = [
        Op::Eq,
        Op::Like,
        Op::Gte,
        Op::Lte,
        Op::Gt,
        Op::Lt,
        Op::Ne,
        Op::In,
    ];

    /// Parses an operator key as it appears in a criteria object.
    ///
    /// Keys are matched exactly (lowercase). Returns `None` for anything else.
    pub fn parse(key: &str) -> Option<Op> {
        Op::ALL.into_iter().find(|op| op.as_str() == key)
    }

    /// Returns `true` if this operator takes a list of values.
    pub fn takes_list(self) -> bool {
        matches!(self, Op::In)
    }

    /// Returns the grammar token of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::Like => "like",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::In => "in",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
