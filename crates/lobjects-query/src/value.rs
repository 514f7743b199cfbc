//! Literal values and their rendering in the filter grammar.
//!
//! A [`Literal`] is what sits on the right-hand side of a comparison:
//! strings are single-quoted, numbers and booleans are emitted bare.

use crate::error::{QueryError, Result};

/// Numeric literal.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Renders the number as an unquoted grammar literal.
    ///
    /// Fails for NaN and infinities, which the backend cannot parse.
    pub fn render(self, field: &str) -> Result<String> {
        match self {
            Number::I64(n) => Ok(n.to_string()),
            Number::U64(n) => Ok(n.to_string()),
            Number::F64(n) if n.is_finite() => Ok(n.to_string()),
            Number::F64(n) => Err(QueryError::invalid_literal(
                field,
                format!("non-finite number {n}"),
            )),
        }
    }
}

impl From<i8> for Number {
    fn from(n: i8) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i16> for Number {
    fn from(n: i16) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u8> for Number {
    fn from(n: u8) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u16> for Number {
    fn from(n: u16) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::U64(n)
    }
}

impl From<f32> for Number {
    /// Widens through the shortest decimal form, so `0.1f32` stays `0.1`
    /// instead of picking up the binary widening error.
    fn from(n: f32) -> Self {
        let widened = if n.is_finite() {
            n.to_string().parse::<f64>().unwrap_or(n as f64)
        } else {
            n as f64
        };
        Number::F64(widened)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::U64(n as u64)
    }
}

impl From<isize> for Number {
    fn from(n: isize) -> Self {
        Number::I64(n as i64)
    }
}

/// Scalar value on the right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// String value, rendered single-quoted.
    String(String),
    /// Numeric value, rendered bare.
    Number(Number),
    /// Boolean value, rendered as `true` / `false`.
    Bool(bool),
}

impl Literal {
    /// Renders this literal in the filter grammar.
    ///
    /// Embedded single quotes are doubled (`O'Brien` becomes `'O''Brien'`).
    /// `field` is only used to label errors.
    pub fn render(&self, field: &str) -> Result<String> {
        match self {
            Literal::String(s) => Ok(quote(s)),
            Literal::Number(n) => n.render(field),
            Literal::Bool(b) => Ok(b.to_string()),
        }
    }

    /// Returns the string value, if this is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<&String> for Literal {
    fn from(s: &String) -> Self {
        Literal::String(s.clone())
    }
}

impl From<Number> for Literal {
    fn from(n: Number) -> Self {
        Literal::Number(n)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

macro_rules! literal_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Literal {
                fn from(n: $t) -> Self {
                    Literal::Number(Number::from(n))
                }
            }
        )*
    };
}

literal_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, usize, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_are_single_quoted() {
        assert_eq!(Literal::from("ABC").render("code").unwrap(), "'ABC'");
        assert_eq!(Literal::from("").render("code").unwrap(), "''");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(
            Literal::from("O'Brien").render("name").unwrap(),
            "'O''Brien'"
        );
        assert_eq!(Literal::from("''").render("name").unwrap(), "''''''");
    }

    #[test]
    fn like_wildcards_pass_through() {
        assert_eq!(Literal::from("test*").render("code").unwrap(), "'test*'");
    }

    #[test]
    fn numbers_are_bare() {
        assert_eq!(Literal::from(1i32).render("status").unwrap(), "1");
        assert_eq!(Literal::from(-7i64).render("delta").unwrap(), "-7");
        assert_eq!(Literal::from(42u64).render("qty").unwrap(), "42");
        assert_eq!(Literal::from(2.5f64).render("price").unwrap(), "2.5");
    }

    #[test]
    fn booleans_are_bare() {
        assert_eq!(Literal::from(true).render("active").unwrap(), "true");
        assert_eq!(Literal::from(false).render("active").unwrap(), "false");
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let err = Literal::from(f64::NAN).render("price").unwrap_err();
        assert!(matches!(err, QueryError::InvalidLiteral { ref field, .. } if field == "price"));

        assert!(Literal::from(f64::INFINITY).render("price").is_err());
        assert!(Literal::from(f64::NEG_INFINITY).render("price").is_err());
    }

    #[test]
    fn number_conversions() {
        assert_eq!(Number::from(42i32), Number::I64(42));
        assert_eq!(Number::from(42u32), Number::U64(42));
        assert_eq!(Number::from(42.5f64), Number::F64(42.5));
        assert_eq!(Number::from(3usize), Number::U64(3));
    }

    #[test]
    fn f32_keeps_its_decimal_form() {
        assert_eq!(Number::from(0.1f32), Number::F64(0.1));
        assert_eq!(Literal::from(0.1f32).render("price").unwrap(), "0.1");
        assert_eq!(Literal::from(19.99f32).render("price").unwrap(), "19.99");
        assert!(Literal::from(f32::NAN).render("price").is_err());
    }

    #[test]
    fn as_str_extracts_strings_only() {
        assert_eq!(Literal::from("x").as_str(), Some("x"));
        assert_eq!(Literal::from(1i32).as_str(), None);
        assert_eq!(Literal::from(true).as_str(), None);
    }
}
