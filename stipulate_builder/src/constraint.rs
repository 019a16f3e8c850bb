mod enumeration;
mod length;
mod range;

pub use enumeration::*;
pub use length::*;
pub use range::*;

use crate::description::Description;
use crate::error::{ConfigError, ConstraintViolation};
use crate::model::{Value, ValueType};

/// Behaviour of a validation rule attachable to an argument/option.
///
/// Constraints are configured once, and are immutable thereafter.
/// The command line parser checks [`Constraint::type_check`] against the declared type when the constraint is attached; only compatible values are ever given to [`Constraint::evaluate`].
///
/// ### Example
/// ```
/// # use stipulate_builder as stipulate;
/// use stipulate::{prelude::*, ConstraintViolation, Description, Value, ValueType};
///
/// struct Even;
///
/// impl Constraint for Even {
///     fn name(&self) -> &'static str {
///         "even"
///     }
///
///     fn type_check(&self, value_type: ValueType) -> bool {
///         value_type == ValueType::Integer
///     }
///
///     fn evaluate(&self, name: &str, value: &Value) -> Result<(), ConstraintViolation> {
///         match value {
///             Value::Integer(i) if i % 2 == 0 => Ok(()),
///             _ => Err(ConstraintViolation::new(
///                 name,
///                 value,
///                 format!("value for '{name}' was '{value}' but it must be even."),
///             )),
///         }
///     }
///
///     fn describe(&self) -> Description {
///         Description::new().text("Must be even.")
///     }
/// }
///
/// assert!(Even.evaluate("x", &Value::Integer(2)).is_ok());
/// assert!(Even.evaluate("x", &Value::Integer(3)).is_err());
/// ```
pub trait Constraint: Send + Sync {
    /// A short name for the kind of constraint, used in configuration error messages.
    fn name(&self) -> &'static str;

    /// Whether this constraint can meaningfully evaluate values of `value_type`.
    /// Must be pure, and must not panic.
    fn type_check(&self, value_type: ValueType) -> bool;

    /// Evaluate `value`, received by the parameter `name`.
    fn evaluate(&self, name: &str, value: &Value) -> Result<(), ConstraintViolation>;

    /// Document this constraint.
    /// Paragraphs of the returned description are rendered as list items when embedded in a parameter's help.
    fn describe(&self) -> Description;
}

pub(crate) fn check_type(
    constraint: &dyn Constraint,
    name: &str,
    value_type: ValueType,
) -> Result<(), ConfigError> {
    if constraint.type_check(value_type) {
        Ok(())
    } else {
        Err(ConfigError(format!(
            "constraint '{c}' cannot apply to parameter '{name}' of type {value_type}.",
            c = constraint.name(),
        )))
    }
}

pub(crate) fn require_description(subject: &str, description: &str) -> Result<(), ConfigError> {
    if description.trim().is_empty() {
        Err(ConfigError(format!(
            "{subject} requires a non-blank description."
        )))
    } else {
        Ok(())
    }
}
