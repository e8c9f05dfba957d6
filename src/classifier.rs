//! String classification for the typecast filter.
//!
//! Decides whether a piece of text looks like a number, a boolean or a null
//! marker and produces the typed replacement. Every function here is pure.

use crate::value::Value;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Plain decimal grammar: optional sign, digits, optional fraction and
/// optional exponent. Digit runs may be grouped with single underscores.
const NUMERIC_PATTERN: &str =
    r"^[+-]?[0-9]+(?:_[0-9]+)*(?:\.[0-9]+(?:_[0-9]+)*)?(?:[eE][+-]?[0-9]+(?:_[0-9]+)*)?$";

fn numeric_regex() -> &'static Regex {
    static NUMERIC: OnceLock<Regex> = OnceLock::new();
    NUMERIC.get_or_init(|| Regex::new(NUMERIC_PATTERN).expect("numeric pattern is valid"))
}

/// A converted numeric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        match number {
            Number::Int(i) => Value::Int(i),
            Number::Float(f) => Value::Float(f),
        }
    }
}

/// Outcome of classifying a piece of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    Numeric(Number),
    Boolean(bool),
    Null,
    NoMatch,
}

impl Classification {
    /// The typed replacement, or `None` when the text matched nothing.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Classification::Numeric(n) => Some(n.into()),
            Classification::Boolean(b) => Some(Value::Bool(b)),
            Classification::Null => Some(Value::Null),
            Classification::NoMatch => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Numeric(Number::Int(i)) => write!(f, "integer({})", i),
            Classification::Numeric(Number::Float(fl)) => write!(f, "float({:?})", fl),
            Classification::Boolean(b) => write!(f, "boolean({})", b),
            Classification::Null => write!(f, "null"),
            Classification::NoMatch => write!(f, "no match"),
        }
    }
}

/// Returns true if `raw` is a finite number in the plain decimal grammar.
pub fn is_numeric(raw: &str) -> bool {
    numeric_regex().is_match(raw)
        && strip_separators(raw)
            .parse::<f64>()
            .map(f64::is_finite)
            .unwrap_or(false)
}

/// Returns true for exactly `true`, `false`, `TRUE` or `FALSE`.
pub fn is_boolean(raw: &str) -> bool {
    matches!(raw, "true" | "false" | "TRUE" | "FALSE")
}

/// Returns true for exactly `null`, `nil`, `NULL` or `NIL`.
pub fn is_null(raw: &str) -> bool {
    matches!(raw, "null" | "nil" | "NULL" | "NIL")
}

/// Converts numeric text.
///
/// Text containing a `.` becomes a float. Anything else takes the integer
/// path, which reads only the leading signed digit run, so an exponent
/// without a `.` is ignored (`1e5` is `1`). A digit run beyond `i64`
/// becomes a float. Text that is not numeric at all converts to integer
/// zero.
pub fn to_numeric(raw: &str) -> Number {
    if !is_numeric(raw) {
        return Number::Int(0);
    }

    let digits = strip_separators(raw);

    if raw.contains('.') {
        return digits
            .parse::<f64>()
            .map(Number::Float)
            .unwrap_or(Number::Int(0));
    }

    let leading = leading_integer(&digits);

    if let Ok(i) = leading.parse::<i64>() {
        return Number::Int(i);
    }

    leading
        .parse::<f64>()
        .map(Number::Float)
        .unwrap_or(Number::Int(0))
}

/// Converts boolean text; anything outside the `true` family is `false`.
pub fn to_boolean(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

/// Classifies `raw` and produces its typed replacement.
///
/// The numeric, boolean and null tests run in that order and each one that
/// matches overwrites the previous outcome.
pub fn classify(raw: &str) -> Classification {
    let mut result = Classification::NoMatch;

    if is_numeric(raw) {
        result = Classification::Numeric(to_numeric(raw));
    }

    if is_boolean(raw) {
        result = Classification::Boolean(to_boolean(raw));
    }

    if is_null(raw) {
        result = Classification::Null;
    }

    result
}

fn strip_separators(raw: &str) -> String {
    raw.chars().filter(|c| *c != '_').collect()
}

/// Optional sign followed by the digits up to the first non-digit.
fn leading_integer(digits: &str) -> &str {
    let sign = usize::from(digits.starts_with(['+', '-']));
    let end = digits[sign..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(digits.len(), |pos| sign + pos);
    &digits[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_grammar() {
        for text in ["0", "-1", "+1", "0.1", "1.0e+18", "1E5", "1_000", "1_000.000_1", "007"] {
            assert!(is_numeric(text), "{} should be numeric", text);
        }

        for text in [
            "", " 1", "1 ", ".5", "1.", "1e", "1_", "_1", "1__0", "0x1A", "1,000", "inf", "NaN",
            "1true", "true1", "1e400", "١٢",
        ] {
            assert!(!is_numeric(text), "{:?} should not be numeric", text);
        }
    }

    #[test]
    fn test_integer_path() {
        assert_eq!(to_numeric("0"), Number::Int(0));
        assert_eq!(to_numeric("1"), Number::Int(1));
        assert_eq!(to_numeric("-42"), Number::Int(-42));
        assert_eq!(to_numeric("1000000000000000000"), Number::Int(1_000_000_000_000_000_000));
        assert_eq!(to_numeric("1_000_000_000_000_000_000"), Number::Int(1_000_000_000_000_000_000));
        assert_eq!(to_numeric("+7"), Number::Int(7));
    }

    #[test]
    fn test_integer_path_ignores_exponent() {
        assert_eq!(to_numeric("1e5"), Number::Int(1));
        assert_eq!(to_numeric("15e-1"), Number::Int(15));
        assert_eq!(to_numeric("-1e3"), Number::Int(-1));
        assert_eq!(to_numeric("1_000E2"), Number::Int(1000));
        assert_eq!(classify("1e5"), Classification::Numeric(Number::Int(1)));
    }

    #[test]
    fn test_integer_beyond_i64_becomes_float() {
        assert_eq!(to_numeric("9223372036854775807"), Number::Int(i64::MAX));
        assert_eq!(to_numeric("9223372036854775808"), Number::Float(9.223372036854776e18));
        assert_eq!(to_numeric("-9223372036854775809"), Number::Float(-9.223372036854776e18));
        assert_eq!(to_numeric("1_000_000_000_000_000_000_000"), Number::Float(1.0e21));
        assert_eq!(to_numeric("99999999999999999999e-5"), Number::Float(1.0e20));
    }

    #[test]
    fn test_float_path() {
        assert_eq!(to_numeric("0.1"), Number::Float(0.1));
        assert_eq!(to_numeric("1.0"), Number::Float(1.0));
        assert_eq!(to_numeric("1.0e+18"), Number::Float(1.0e18));
        assert_eq!(to_numeric("1000000000000000000.0"), Number::Float(1.0e18));
    }

    #[test]
    fn test_non_numeric_converts_to_zero() {
        assert_eq!(to_numeric("abc"), Number::Int(0));
    }

    #[test]
    fn test_boolean_literals() {
        assert_eq!(classify("true"), Classification::Boolean(true));
        assert_eq!(classify("TRUE"), Classification::Boolean(true));
        assert_eq!(classify("false"), Classification::Boolean(false));
        assert_eq!(classify("FALSE"), Classification::Boolean(false));

        for text in ["True", "truE", "False", "falsE", "yes", "1true", "true?"] {
            assert_eq!(classify(text), Classification::NoMatch, "{}", text);
        }
    }

    #[test]
    fn test_null_literals() {
        for text in ["null", "nil", "NULL", "NIL"] {
            assert_eq!(classify(text), Classification::Null, "{}", text);
        }

        for text in ["Null", "nulL", "Nil", "niL", "?nil", "null?", "none"] {
            assert_eq!(classify(text), Classification::NoMatch, "{}", text);
        }
    }

    #[test]
    fn test_unicode_text_is_no_match() {
        for text in ["世界", "🐶", "世界🌏", "string"] {
            assert_eq!(classify(text), Classification::NoMatch);
        }
    }

    #[test]
    fn test_into_value() {
        assert_eq!(classify("2").into_value(), Some(Value::Int(2)));
        assert_eq!(classify("nil").into_value(), Some(Value::Null));
        assert_eq!(classify("x").into_value(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(classify("3").to_string(), "integer(3)");
        assert_eq!(classify("3.0").to_string(), "float(3.0)");
        assert_eq!(classify("TRUE").to_string(), "boolean(true)");
        assert_eq!(classify("Null").to_string(), "no match");
    }
}
