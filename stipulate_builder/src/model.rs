use std::cmp::Ordering;

use crate::error::TypeParseError;

/// The closed set of types a declared element may take on.
///
/// Every constraint decides whether it applies to a `ValueType` via [`Constraint::type_check`](./prelude/trait.Constraint.html#tymethod.type_check).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// A signed 64 bit integer.
    Integer,
    /// A 64 bit floating point number, compared under a total order.
    Decimal,
    /// A unicode string.
    Text,
    /// A single unicode scalar value.
    Character,
    /// `true` or `false`.
    Boolean,
}

impl ValueType {
    /// Whether values of this type are comparable under a total order.
    pub fn is_orderable(&self) -> bool {
        !matches!(self, ValueType::Boolean)
    }

    /// Whether values of this type have a length.
    pub fn is_textual(&self) -> bool {
        matches!(self, ValueType::Text)
    }

    /// Whether a literal of type `literal` may stand in for a value of this type.
    ///
    /// Integer literals widen to decimals; every other pairing must match exactly.
    ///
    /// ### Example
    /// ```
    /// # use stipulate_builder as stipulate;
    /// use stipulate::ValueType;
    ///
    /// assert!(ValueType::Decimal.accepts(ValueType::Integer));
    /// assert!(!ValueType::Integer.accepts(ValueType::Decimal));
    /// ```
    pub fn accepts(&self, literal: ValueType) -> bool {
        *self == literal || (*self == ValueType::Decimal && literal == ValueType::Integer)
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueType::Integer => "integer",
            ValueType::Decimal => "decimal",
            ValueType::Text => "text",
            ValueType::Character => "character",
            ValueType::Boolean => "boolean",
        };
        write!(f, "{name}")
    }
}

/// A typed value, either parsed from a Cli token or supplied during configuration (defaults, bounds, enumerations).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// See [`ValueType::Integer`].
    Integer(i64),
    /// See [`ValueType::Decimal`].
    Decimal(f64),
    /// See [`ValueType::Text`].
    Text(String),
    /// See [`ValueType::Character`].
    Character(char),
    /// See [`ValueType::Boolean`].
    Boolean(bool),
}

impl Value {
    /// Parse a raw token into a value of the declared type.
    ///
    /// ### Example
    /// ```
    /// # use stipulate_builder as stipulate;
    /// use stipulate::{Value, ValueType};
    ///
    /// assert_eq!(Value::parse(ValueType::Integer, "01").unwrap(), Value::Integer(1));
    /// assert!(Value::parse(ValueType::Integer, "blah").is_err());
    /// ```
    pub fn parse(value_type: ValueType, token: &str) -> Result<Self, TypeParseError> {
        let invalid = || TypeParseError {
            token: token.to_string(),
            value_type,
        };

        match value_type {
            ValueType::Integer => token
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| invalid()),
            ValueType::Decimal => token
                .parse::<f64>()
                .map(Value::Decimal)
                .map_err(|_| invalid()),
            ValueType::Text => Ok(Value::Text(token.to_string())),
            ValueType::Character => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Value::Character(c)),
                    _ => Err(invalid()),
                }
            }
            ValueType::Boolean => token
                .parse::<bool>()
                .map(Value::Boolean)
                .map_err(|_| invalid()),
        }
    }

    /// The type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Integer(_) => ValueType::Integer,
            Value::Decimal(_) => ValueType::Decimal,
            Value::Text(_) => ValueType::Text,
            Value::Character(_) => ValueType::Character,
            Value::Boolean(_) => ValueType::Boolean,
        }
    }

    /// Convert this value into the declared type, if `value_type` accepts it.
    pub fn coerce(self, value_type: ValueType) -> Option<Self> {
        match (self, value_type) {
            (Value::Integer(i), ValueType::Decimal) => Some(Value::Decimal(i as f64)),
            (value, value_type) if value.value_type() == value_type => Some(value),
            _ => None,
        }
    }

    /// Compare two values under the total order of their (common) type.
    /// Returns `None` when the values are not mutually orderable.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Decimal(a), Value::Decimal(b)) => Some(order_decimal(*a, *b)),
            (Value::Integer(a), Value::Decimal(b)) => Some(order_decimal(*a as f64, *b)),
            (Value::Decimal(a), Value::Integer(b)) => Some(order_decimal(*a, *b as f64)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Character(a), Value::Character(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Literal equality, optionally ignoring case (text only).
    pub fn matches(&self, other: &Value, ignore_case: bool) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) if ignore_case => a.to_lowercase() == b.to_lowercase(),
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            _ => self.compare(other) == Some(Ordering::Equal),
        }
    }
}

// `-0.0` and `0.0` are equal; everything else (NaN included) falls back to the total order.
fn order_decimal(a: f64, b: f64) -> Ordering {
    if a == b {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Character(c) => write!(f, "{c}"),
            Value::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Decimal(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Character(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    #[rstest]
    #[case(ValueType::Integer, "1", Value::Integer(1))]
    #[case(ValueType::Integer, "-01", Value::Integer(-1))]
    #[case(ValueType::Decimal, "1.5", Value::Decimal(1.5))]
    #[case(ValueType::Decimal, "2", Value::Decimal(2.0))]
    #[case(ValueType::Text, "", Value::Text("".to_string()))]
    #[case(ValueType::Text, "Morop", Value::Text("Morop".to_string()))]
    #[case(ValueType::Character, "ß", Value::Character('ß'))]
    #[case(ValueType::Boolean, "true", Value::Boolean(true))]
    fn parse(#[case] value_type: ValueType, #[case] token: &str, #[case] expected: Value) {
        let value = Value::parse(value_type, token).unwrap();
        assert_eq!(value, expected);
        assert_eq!(value.value_type(), value_type);
    }

    #[rstest]
    #[case(ValueType::Integer, "1.5")]
    #[case(ValueType::Integer, "")]
    #[case(ValueType::Decimal, "abc")]
    #[case(ValueType::Character, "ab")]
    #[case(ValueType::Character, "")]
    #[case(ValueType::Boolean, "yes")]
    fn parse_invalid(#[case] value_type: ValueType, #[case] token: &str) {
        let error = Value::parse(value_type, token).unwrap_err();
        assert_eq!(
            error.to_string(),
            format!("'{token}' cannot convert to {value_type}.")
        );
    }

    #[test]
    fn orderable() {
        assert!(ValueType::Integer.is_orderable());
        assert!(ValueType::Decimal.is_orderable());
        assert!(ValueType::Text.is_orderable());
        assert!(ValueType::Character.is_orderable());
        assert!(!ValueType::Boolean.is_orderable());
        assert!(ValueType::Text.is_textual());
        assert!(!ValueType::Character.is_textual());
    }

    #[test]
    fn compare_mixed_numbers() {
        for _ in 0..100 {
            let i: i32 = thread_rng().gen_range(-1000..1000);
            let d: f64 = thread_rng().gen_range(-1000.0..1000.0);
            let expected = (i as f64).total_cmp(&d);
            assert_eq!(Value::from(i).compare(&Value::from(d)), Some(expected));
            assert_eq!(
                Value::from(d).compare(&Value::from(i)),
                Some(expected.reverse())
            );
        }
    }

    #[test]
    fn compare_signed_zero() {
        let negative_zero = Value::parse(ValueType::Decimal, "-0").unwrap();
        assert_eq!(
            negative_zero.compare(&Value::from(0.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(negative_zero.compare(&Value::from(0)), Some(Ordering::Equal));
        assert_eq!(Value::from(0).compare(&negative_zero), Some(Ordering::Equal));
        assert!(negative_zero.matches(&Value::from(0), false));
        assert_eq!(
            negative_zero.compare(&Value::from(-0.5)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn compare_nan() {
        let nan = Value::from(f64::NAN);
        assert_eq!(nan.compare(&Value::from(1.0)), Some(Ordering::Greater));
        assert!(!nan.matches(&Value::from(1.0), false));
    }

    #[test]
    fn compare_incompatible() {
        assert_eq!(Value::from(1).compare(&Value::from("1")), None);
        assert_eq!(Value::from(true).compare(&Value::from(false)), None);
        assert_eq!(Value::from('a').compare(&Value::from("a")), None);
    }

    #[test]
    fn matches() {
        assert!(Value::from("Abc").matches(&Value::from("aBC"), true));
        assert!(!Value::from("Abc").matches(&Value::from("aBC"), false));
        assert!(Value::from(3).matches(&Value::from(3.0), false));
        assert!(Value::from(true).matches(&Value::from(true), false));
        assert!(!Value::from(true).matches(&Value::from(false), false));
    }

    #[test]
    fn coerce() {
        assert_eq!(
            Value::from(5).coerce(ValueType::Decimal),
            Some(Value::Decimal(5.0))
        );
        assert_eq!(
            Value::from(5).coerce(ValueType::Integer),
            Some(Value::Integer(5))
        );
        assert_eq!(Value::from(5.5).coerce(ValueType::Integer), None);
        assert_eq!(Value::from("5").coerce(ValueType::Integer), None);
    }
}
