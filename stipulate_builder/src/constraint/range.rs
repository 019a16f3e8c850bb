use std::cmp::Ordering;

use crate::constraint::Constraint;
use crate::description::Description;
use crate::error::ConstraintViolation;
use crate::model::{Value, ValueType};

/// Constrain an orderable value to be at least `bound` (inclusive).
///
/// ### Example
/// ```
/// # use stipulate_builder as stipulate;
/// use stipulate::{prelude::*, MinValue, Value};
///
/// let minimum = MinValue::new(1);
/// assert!(minimum.evaluate("level", &Value::Integer(1)).is_ok());
/// assert!(minimum.evaluate("level", &Value::Integer(0)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MinValue {
    bound: Value,
}

impl MinValue {
    /// Create a minimum value constraint.
    pub fn new(bound: impl Into<Value>) -> Self {
        Self {
            bound: bound.into(),
        }
    }

    /// The configured bound.
    pub fn bound(&self) -> &Value {
        &self.bound
    }
}

impl Constraint for MinValue {
    fn name(&self) -> &'static str {
        "minimum value"
    }

    fn type_check(&self, value_type: ValueType) -> bool {
        orderable_against(&self.bound, value_type)
    }

    fn evaluate(&self, name: &str, value: &Value) -> Result<(), ConstraintViolation> {
        match self.bound.compare(value) {
            Some(Ordering::Greater) => Err(ConstraintViolation::new(
                name,
                value,
                format!(
                    "value for '{name}' was '{value}' but it must be at least {b}.",
                    b = self.bound
                ),
            )),
            Some(_) => Ok(()),
            None => Err(incomparable(name, value, &self.bound)),
        }
    }

    fn describe(&self) -> Description {
        Description::new()
            .text("Minimum value: ")
            .emphasis(self.bound.to_string())
            .text(".")
    }
}

/// Constrain an orderable value to be at most `bound` (inclusive).
///
/// ### Example
/// ```
/// # use stipulate_builder as stipulate;
/// use stipulate::{prelude::*, MaxValue, Value};
///
/// let maximum = MaxValue::new(1000);
/// assert!(maximum.evaluate("level", &Value::Integer(1000)).is_ok());
/// assert!(maximum.evaluate("level", &Value::Integer(1001)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MaxValue {
    bound: Value,
}

impl MaxValue {
    /// Create a maximum value constraint.
    pub fn new(bound: impl Into<Value>) -> Self {
        Self {
            bound: bound.into(),
        }
    }

    /// The configured bound.
    pub fn bound(&self) -> &Value {
        &self.bound
    }
}

impl Constraint for MaxValue {
    fn name(&self) -> &'static str {
        "maximum value"
    }

    fn type_check(&self, value_type: ValueType) -> bool {
        orderable_against(&self.bound, value_type)
    }

    fn evaluate(&self, name: &str, value: &Value) -> Result<(), ConstraintViolation> {
        match self.bound.compare(value) {
            Some(Ordering::Less) => Err(ConstraintViolation::new(
                name,
                value,
                format!(
                    "value for '{name}' was '{value}' but it must be at most {b}.",
                    b = self.bound
                ),
            )),
            Some(_) => Ok(()),
            None => Err(incomparable(name, value, &self.bound)),
        }
    }

    fn describe(&self) -> Description {
        Description::new()
            .text("Maximum value: ")
            .emphasis(self.bound.to_string())
            .text(".")
    }
}

pub(super) fn orderable_against(bound: &Value, value_type: ValueType) -> bool {
    value_type.is_orderable() && value_type.accepts(bound.value_type())
}

pub(super) fn incomparable(name: &str, value: &Value, bound: &Value) -> ConstraintViolation {
    ConstraintViolation::new(
        name,
        value,
        format!("value for '{name}' was '{value}' but it cannot be compared against {bound}."),
    )
}
