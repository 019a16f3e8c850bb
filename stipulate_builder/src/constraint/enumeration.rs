use std::cmp::Ordering;

use crate::constraint::{require_description, Constraint};
use crate::description::Description;
use crate::error::{ConfigError, ConstraintViolation};
use crate::model::{Value, ValueType};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Clone)]
struct Literal {
    value: Value,
    ignore_case: bool,
    description: String,
}

impl Literal {
    fn matches(&self, value: &Value) -> bool {
        self.value.matches(value, self.ignore_case)
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.ignore_case {
            write!(f, "~{}", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

#[derive(Debug, Clone)]
struct Interval {
    lower: Value,
    upper: Value,
    description: String,
}

impl Interval {
    fn contains(&self, value: &Value) -> bool {
        matches!(
            self.lower.compare(value),
            Some(Ordering::Less | Ordering::Equal)
        ) && matches!(
            self.upper.compare(value),
            Some(Ordering::Greater | Ordering::Equal)
        )
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}..{}]", self.lower, self.upper)
    }
}

/// Constrain a value to a set of literal values and (closed) ranges.
///
/// An enumeration is configured with three lists, and evaluates a value by the following precedence:
/// 1. A value equal to any `value` literal is accepted.
/// 2. Otherwise, a value within any `exclude` range is rejected.
/// 3. Otherwise, a value within any `include` range is accepted.
/// 4. Otherwise, the value is rejected.
///
/// Configure via [`Enumeration::builder`].
///
/// ### Example
/// ```
/// # use stipulate_builder as stipulate;
/// use stipulate::{prelude::*, Enumeration, Value};
///
/// let enumeration = Enumeration::builder()
///     .value(3, "three")
///     .include(1, 18, "range")
///     .exclude(2, 5, "gap")
///     .build()
///     .unwrap();
///
/// assert!(enumeration.evaluate("age", &Value::from(3)).is_ok());
/// assert!(enumeration.evaluate("age", &Value::from(4)).is_err());
/// assert!(enumeration.evaluate("age", &Value::from(10)).is_ok());
/// assert!(enumeration.evaluate("age", &Value::from(20)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Enumeration {
    values: Vec<Literal>,
    include_ranges: Vec<Interval>,
    exclude_ranges: Vec<Interval>,
}

impl Enumeration {
    /// Start configuring an enumeration.
    pub fn builder() -> EnumerationBuilder {
        EnumerationBuilder::default()
    }

    fn expectation(&self) -> String {
        let mut parts = Vec::default();

        if !self.include_ranges.is_empty() {
            parts.push(
                self.include_ranges
                    .iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<String>>()
                    .join(", "),
            );
        }

        if !self.exclude_ranges.is_empty() {
            parts.push(
                self.exclude_ranges
                    .iter()
                    .map(|i| format!("!{i}"))
                    .collect::<Vec<String>>()
                    .join(", "),
            );
        }

        if !self.values.is_empty() {
            parts.push(
                self.values
                    .iter()
                    .map(|l| l.to_string())
                    .collect::<Vec<String>>()
                    .join(", "),
            );
        }

        parts.join(" ")
    }
}

impl Constraint for Enumeration {
    fn name(&self) -> &'static str {
        "enumeration"
    }

    fn type_check(&self, value_type: ValueType) -> bool {
        let values_ok = self.values.iter().all(|literal| {
            value_type.accepts(literal.value.value_type())
                && (!literal.ignore_case || value_type.is_textual())
        });
        let ranges_ok = self
            .include_ranges
            .iter()
            .chain(self.exclude_ranges.iter())
            .all(|interval| {
                value_type.is_orderable()
                    && value_type.accepts(interval.lower.value_type())
                    && value_type.accepts(interval.upper.value_type())
            });

        values_ok && ranges_ok
    }

    fn evaluate(&self, name: &str, value: &Value) -> Result<(), ConstraintViolation> {
        // Single values always win.
        if self.values.iter().any(|literal| literal.matches(value)) {
            return Ok(());
        }

        // Excludes carve exceptions out of the includes.
        let accepted = !self.exclude_ranges.iter().any(|i| i.contains(value))
            && self.include_ranges.iter().any(|i| i.contains(value));

        if accepted {
            Ok(())
        } else {
            Err(ConstraintViolation::new(
                name,
                value,
                format!(
                    "value for '{name}' was '{value}' but it must be one of these: {e}.",
                    e = self.expectation(),
                ),
            ))
        }
    }

    fn describe(&self) -> Description {
        let mut description = Description::new();

        for literal in &self.values {
            description = description
                .paragraph()
                .emphasis(literal.to_string())
                .text(format!(": {}", literal.description));
        }

        for interval in &self.exclude_ranges {
            description = description
                .paragraph()
                .text("not ")
                .emphasis(interval.to_string())
                .text(format!(": {}", interval.description));
        }

        for interval in &self.include_ranges {
            description = description
                .paragraph()
                .emphasis(interval.to_string())
                .text(format!(": {}", interval.description));
        }

        description
    }
}

/// The builder for an [`Enumeration`].
///
/// Every entry requires a non-blank description.
/// Configuration problems are reported by [`EnumerationBuilder::build`].
#[derive(Debug, Default)]
pub struct EnumerationBuilder {
    values: Vec<Literal>,
    include_ranges: Vec<Interval>,
    exclude_ranges: Vec<Interval>,
    deferred_error: Option<ConfigError>,
}

impl EnumerationBuilder {
    /// Accept the literal `value`.
    pub fn value(self, value: impl Into<Value>, description: impl Into<String>) -> Self {
        self.literal(value.into(), false, description.into())
    }

    /// Accept the text literal `value`, ignoring case.
    pub fn value_ignore_case(
        self,
        value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.literal(Value::Text(value.into()), true, description.into())
    }

    /// Accept values in the closed range `[lower, upper]`, unless excluded.
    pub fn include(
        mut self,
        lower: impl Into<Value>,
        upper: impl Into<Value>,
        description: impl Into<String>,
    ) -> Self {
        if let Some(interval) = self.interval(lower.into(), upper.into(), description.into()) {
            self.include_ranges.push(interval);
        }

        self
    }

    /// Reject values in the closed range `[lower, upper]`, unless listed as a `value`.
    pub fn exclude(
        mut self,
        lower: impl Into<Value>,
        upper: impl Into<Value>,
        description: impl Into<String>,
    ) -> Self {
        if let Some(interval) = self.interval(lower.into(), upper.into(), description.into()) {
            self.exclude_ranges.push(interval);
        }

        self
    }

    /// Finalize the configuration.
    pub fn build(self) -> Result<Enumeration, ConfigError> {
        if let Some(error) = self.deferred_error {
            return Err(error);
        }

        if self.values.is_empty()
            && self.include_ranges.is_empty()
            && self.exclude_ranges.is_empty()
        {
            return Err(ConfigError(
                "enumeration must configure at least one value or range.".to_string(),
            ));
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Built enumeration: values={}, includes={}, excludes={}.",
                self.values.len(),
                self.include_ranges.len(),
                self.exclude_ranges.len()
            );
        }

        Ok(Enumeration {
            values: self.values,
            include_ranges: self.include_ranges,
            exclude_ranges: self.exclude_ranges,
        })
    }

    fn literal(mut self, value: Value, ignore_case: bool, description: String) -> Self {
        let literal = Literal {
            value,
            ignore_case,
            description,
        };

        match require_description(&format!("enumeration value '{literal}'"), &literal.description)
        {
            Ok(()) => self.values.push(literal),
            Err(error) => self.defer(error),
        }

        self
    }

    fn interval(&mut self, lower: Value, upper: Value, description: String) -> Option<Interval> {
        let interval = Interval {
            lower,
            upper,
            description,
        };
        let subject = format!("enumeration range '{interval}'");

        if let Err(error) = require_description(&subject, &interval.description) {
            self.defer(error);
            return None;
        }

        match interval.lower.compare(&interval.upper) {
            Some(Ordering::Greater) => {
                self.defer(ConfigError(format!(
                    "{subject} must not have its lower bound greater than its upper bound."
                )));
                None
            }
            Some(_) => Some(interval),
            None => {
                self.defer(ConfigError(format!(
                    "{subject} must have mutually orderable bounds."
                )));
                None
            }
        }
    }

    fn defer(&mut self, error: ConfigError) {
        // Only the first error is reported.
        if self.deferred_error.is_none() {
            self.deferred_error.replace(error);
        }
    }
}
