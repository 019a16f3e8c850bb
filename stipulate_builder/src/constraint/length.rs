use crate::constraint::Constraint;
use crate::description::Description;
use crate::error::ConstraintViolation;
use crate::model::{Value, ValueType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Measure {
    Minimum,
    Maximum,
    Exact,
}

impl Measure {
    fn permits(&self, length: usize, bound: usize) -> bool {
        match self {
            Measure::Minimum => length >= bound,
            Measure::Maximum => length <= bound,
            Measure::Exact => length == bound,
        }
    }

    fn requirement(&self) -> &'static str {
        match self {
            Measure::Minimum => "at least",
            Measure::Maximum => "at most",
            Measure::Exact => "exactly",
        }
    }
}

fn measure(
    measure: Measure,
    bound: usize,
    name: &str,
    value: &Value,
) -> Result<(), ConstraintViolation> {
    let text = match value {
        Value::Text(text) => text,
        _ => {
            return Err(ConstraintViolation::new(
                name,
                value,
                format!("value for '{name}' was '{value}' but it has no length."),
            ));
        }
    };
    let length = text.chars().count();

    if measure.permits(length, bound) {
        Ok(())
    } else {
        Err(ConstraintViolation::new(
            name,
            value,
            format!(
                "value for '{name}' was '{value}' (length {length}) but its length must be {r} {bound}.",
                r = measure.requirement(),
            ),
        ))
    }
}

fn describe(label: &str, bound: usize) -> Description {
    Description::new()
        .text(format!("{label}: "))
        .emphasis(bound.to_string())
        .text(".")
}

/// Constrain a textual value to have at least `bound` characters.
#[derive(Debug, Clone, Copy)]
pub struct MinLength {
    bound: usize,
}

impl MinLength {
    /// Create a minimum length constraint.
    pub fn new(bound: usize) -> Self {
        Self { bound }
    }
}

impl Constraint for MinLength {
    fn name(&self) -> &'static str {
        "minimum length"
    }

    fn type_check(&self, value_type: ValueType) -> bool {
        value_type.is_textual()
    }

    fn evaluate(&self, name: &str, value: &Value) -> Result<(), ConstraintViolation> {
        measure(Measure::Minimum, self.bound, name, value)
    }

    fn describe(&self) -> Description {
        describe("Minimum length", self.bound)
    }
}

/// Constrain a textual value to have at most `bound` characters.
///
/// ### Example
/// ```
/// # use stipulate_builder as stipulate;
/// use stipulate::{prelude::*, MaxLength, Value};
///
/// let maximum = MaxLength::new(5);
/// assert!(maximum.evaluate("name", &Value::from("Morop")).is_ok());
/// assert_eq!(
///     maximum.evaluate("name", &Value::from("Moropp")).unwrap_err().message(),
///     "value for 'name' was 'Moropp' (length 6) but its length must be at most 5.",
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MaxLength {
    bound: usize,
}

impl MaxLength {
    /// Create a maximum length constraint.
    pub fn new(bound: usize) -> Self {
        Self { bound }
    }
}

impl Constraint for MaxLength {
    fn name(&self) -> &'static str {
        "maximum length"
    }

    fn type_check(&self, value_type: ValueType) -> bool {
        value_type.is_textual()
    }

    fn evaluate(&self, name: &str, value: &Value) -> Result<(), ConstraintViolation> {
        measure(Measure::Maximum, self.bound, name, value)
    }

    fn describe(&self) -> Description {
        describe("Maximum length", self.bound)
    }
}

/// Constrain a textual value to have precisely `bound` characters.
#[derive(Debug, Clone, Copy)]
pub struct ExactLength {
    bound: usize,
}

impl ExactLength {
    /// Create an exact length constraint.
    pub fn new(bound: usize) -> Self {
        Self { bound }
    }
}

impl Constraint for ExactLength {
    fn name(&self) -> &'static str {
        "exact length"
    }

    fn type_check(&self, value_type: ValueType) -> bool {
        value_type.is_textual()
    }

    fn evaluate(&self, name: &str, value: &Value) -> Result<(), ConstraintViolation> {
        measure(Measure::Exact, self.bound, name, value)
    }

    fn describe(&self) -> Description {
        describe("Length", self.bound)
    }
}
