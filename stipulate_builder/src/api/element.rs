use crate::api::parameter::ValueDeclaration;
use crate::constraint::{check_type, Constraint};
use crate::description::Description;
use crate::error::{ConfigError, ValidationError};
use crate::model::{Value, ValueType};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The sealed, typed value of an option or argument.
pub struct ValueSpec {
    value_type: ValueType,
    constraints: Vec<Box<dyn Constraint>>,
    default: Option<Value>,
    description: Description,
}

impl std::fmt::Debug for ValueSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueSpec")
            .field("value_type", &self.value_type)
            .field(
                "constraints",
                &self.constraints.iter().map(|c| c.name()).collect::<Vec<&str>>(),
            )
            .field("default", &self.default)
            .finish()
    }
}

impl ValueSpec {
    pub(crate) fn seal(name: &str, declaration: ValueDeclaration) -> Result<Self, ConfigError> {
        let ValueDeclaration {
            value_type,
            constraints,
            default,
            description,
        } = declaration;

        for constraint in &constraints {
            check_type(constraint.as_ref(), name, value_type)?;
        }

        let default = match default {
            Some(value) => {
                let value = match value.clone().coerce(value_type) {
                    Some(v) => v,
                    None => {
                        return Err(ConfigError(format!(
                            "default '{value}' for parameter '{name}' is not of type {value_type}."
                        )));
                    }
                };

                for constraint in &constraints {
                    constraint.evaluate(name, &value).map_err(|violation| {
                        ConfigError(format!(
                            "default for parameter '{name}' is invalid: {violation}"
                        ))
                    })?;
                }

                Some(value)
            }
            None => None,
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Sealed '{name}': type={value_type}, constraints={}, default={default:?}.",
                constraints.len()
            );
        }

        Ok(Self {
            value_type,
            constraints,
            default,
            description,
        })
    }

    /// The declared type.
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// The attached constraints, in evaluation order.
    pub fn constraints(&self) -> impl Iterator<Item = &dyn Constraint> {
        self.constraints.iter().map(|c| c.as_ref())
    }

    /// The default value, which satisfies every attached constraint.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The description of the value itself (ex: of an option argument).
    pub fn description(&self) -> &Description {
        &self.description
    }

    /// Convert the raw `token` into a value of the declared type, and evaluate it against every constraint.
    ///
    /// ### Example
    /// ```
    /// # use stipulate_builder as stipulate;
    /// use stipulate::{Command, MaxLength, Parameter, ValidationError, Value, ValueType};
    ///
    /// let command = Command::new("program")
    ///     .add(Parameter::argument("name", ValueType::Text).constraint(MaxLength::new(5)))
    ///     .unwrap();
    /// let name = command.argument("name").unwrap().value();
    ///
    /// assert_eq!(name.validate("name", "Morop").unwrap(), Value::from("Morop"));
    /// assert!(matches!(name.validate("name", "Moropp"), Err(ValidationError::Violation(_))));
    /// ```
    pub fn validate(&self, name: &str, token: &str) -> Result<Value, ValidationError> {
        let value = Value::parse(self.value_type, token)?;

        for constraint in &self.constraints {
            constraint.evaluate(name, &value)?;
        }

        Ok(value)
    }
}

/// A sealed option.
#[derive(Debug)]
pub struct OptionElement {
    name: String,
    aliases: Vec<String>,
    short: Option<char>,
    id: String,
    value: Option<(String, ValueSpec)>,
    repeated: bool,
    description: Description,
}

impl OptionElement {
    pub(crate) fn new(
        name: String,
        aliases: Vec<String>,
        short: Option<char>,
        id: String,
        value: Option<(String, ValueSpec)>,
        repeated: bool,
        description: Description,
    ) -> Self {
        Self {
            name,
            aliases,
            short,
            id,
            value,
            repeated,
            description,
        }
    }

    /// The primary (long) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The alternative long names.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The short name.
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// The identifier under which parsed values are reported.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the option takes no value.
    pub fn is_flag(&self) -> bool {
        self.value.is_none()
    }

    /// The placeholder name of the option's value.
    pub fn meta(&self) -> Option<&str> {
        self.value.as_ref().map(|(meta, _)| meta.as_str())
    }

    /// The option's value, unless it is a flag.
    pub fn value(&self) -> Option<&ValueSpec> {
        self.value.as_ref().map(|(_, value)| value)
    }

    /// Whether the option may occur more than once.
    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    /// The option's description.
    pub fn description(&self) -> &Description {
        &self.description
    }

    pub(crate) fn long_names(&self) -> impl Iterator<Item = &String> {
        std::iter::once(&self.name).chain(self.aliases.iter())
    }
}

/// A sealed positional argument.
#[derive(Debug)]
pub struct ArgumentElement {
    name: String,
    id: String,
    value: ValueSpec,
    repeated: bool,
    description: Description,
}

impl ArgumentElement {
    pub(crate) fn new(
        name: String,
        id: String,
        value: ValueSpec,
        repeated: bool,
        description: Description,
    ) -> Self {
        Self {
            name,
            id,
            value,
            repeated,
            description,
        }
    }

    /// The name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The identifier under which parsed values are reported.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The argument's value.
    pub fn value(&self) -> &ValueSpec {
        &self.value
    }

    /// Whether the argument has a default, and so may be omitted.
    /// Independent of [`ArgumentElement::is_repeated`].
    pub fn is_optional(&self) -> bool {
        self.value.default.is_some()
    }

    /// Whether the argument takes all the remaining positional tokens.
    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    /// The argument's description.
    pub fn description(&self) -> &Description {
        &self.description
    }
}
