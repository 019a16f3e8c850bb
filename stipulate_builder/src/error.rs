use thiserror::Error;

use crate::model::{Value, ValueType};

/// A programming error in the configuration of the command line.
///
/// Raised while configuring (never while parsing), for example when a constraint cannot apply to the declared type, or a parameter name is repeated within a command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

impl ConfigError {
    /// The detail message of this error.
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// A well-typed value which does not satisfy a constraint.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct ConstraintViolation {
    name: String,
    value: Value,
    message: String,
}

impl ConstraintViolation {
    /// Create a constraint violation for the parameter `name`.
    pub fn new(name: impl Into<String>, value: &Value, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.clone(),
            message: message.into(),
        }
    }

    /// The name of the parameter which received the value.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rejected value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The human readable description of the violated rule.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A raw token which cannot be converted to the declared type at all.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{token}' cannot convert to {value_type}.")]
pub struct TypeParseError {
    pub(crate) token: String,
    pub(crate) value_type: ValueType,
}

impl TypeParseError {
    /// The raw token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The declared type the token could not convert to.
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }
}

/// The ways in which a raw token may fail validation against a declared element.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    /// The token is malformed for the declared type.
    #[error(transparent)]
    Parse(#[from] TypeParseError),
    /// The token converted, but the value violates a constraint.
    #[error(transparent)]
    Violation(#[from] ConstraintViolation),
}
