use crate::api::element::{ArgumentElement, OptionElement, ValueSpec};
use crate::constraint::Constraint;
use crate::description::Description;
use crate::error::ConfigError;
use crate::model::{Value, ValueType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ParameterClass {
    Opt,
    Arg,
}

#[derive(Debug)]
pub(crate) enum Element {
    Opt(OptionElement),
    Arg(ArgumentElement),
}

/// The typed value of a parameter, while it is still being configured.
pub(crate) struct ValueDeclaration {
    pub(crate) value_type: ValueType,
    pub(crate) constraints: Vec<Box<dyn Constraint>>,
    pub(crate) default: Option<Value>,
    pub(crate) description: Description,
}

impl ValueDeclaration {
    fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            constraints: Vec::default(),
            default: None,
            description: Description::default(),
        }
    }
}

/// The value taken by an option parameter.
/// An option without an `OptionArgument` is a flag.
///
/// Constraints and defaults configured here apply to the option's value.
///
/// ### Example
/// ```
/// # use stipulate_builder as stipulate;
/// use stipulate::{MaxValue, MinValue, OptionArgument, Parameter, ValueType};
///
/// Parameter::option("level", Some('l')).value(
///     OptionArgument::new("LEVEL", ValueType::Integer)
///         .constraint(MinValue::new(1))
///         .constraint(MaxValue::new(1000))
///         .default(5),
/// );
/// ```
pub struct OptionArgument {
    meta: String,
    declaration: ValueDeclaration,
    deferred_error: Option<ConfigError>,
}

impl OptionArgument {
    /// Create an option argument of `value_type`, documented by the placeholder `meta`.
    pub fn new(meta: impl Into<String>, value_type: ValueType) -> Self {
        let meta = meta.into();
        let deferred_error = if meta.trim().is_empty() {
            Some(ConfigError(
                "option argument requires a non-blank meta name.".to_string(),
            ))
        } else {
            None
        };

        Self {
            meta,
            declaration: ValueDeclaration::new(value_type),
            deferred_error,
        }
    }

    /// Attach a constraint.
    /// Constraints are evaluated in the order they are attached.
    pub fn constraint(mut self, constraint: impl Constraint + 'static) -> Self {
        self.declaration.constraints.push(Box::new(constraint));
        self
    }

    /// Set the default value.
    /// If repeated, only the final default will apply.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.declaration.default.replace(value.into());
        self
    }

    /// Document the option argument.
    pub fn description(mut self, description: impl Into<Description>) -> Self {
        self.declaration.description = description.into();
        self
    }
}

struct ParameterInner {
    class: ParameterClass,
    name: String,
    aliases: Vec<String>,
    short: Option<char>,
    id: Option<String>,
    meta: Option<String>,
    declaration: Option<ValueDeclaration>,
    repeated: bool,
    description: Description,
    deferred_error: Option<ConfigError>,
}

impl ParameterInner {
    fn defer(&mut self, error: ConfigError) {
        // Only the first error is reported.
        if self.deferred_error.is_none() {
            self.deferred_error.replace(error);
        }
    }
}

impl std::fmt::Debug for ParameterInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match &self.class {
            ParameterClass::Opt => format!("--{n}", n = self.name),
            ParameterClass::Arg => self.name.clone(),
        };
        let short = match &self.short {
            Some(s) => format!(" -{s},"),
            None => "".to_string(),
        };
        let value_type = match &self.declaration {
            Some(declaration) => declaration.value_type.to_string(),
            None => "flag".to_string(),
        };

        write!(
            f,
            "{class:?}[{value_type}, {name},{short} repeated={r}]",
            class = self.class,
            r = self.repeated,
        )
    }
}

/// An option or positional argument, while it is being configured.
/// Used with [`Command::add`](./struct.Command.html#method.add), which seals it.
///
/// Configuration mistakes made while chaining (ex: a blank alias) are recorded, and reported by `Command::add`.
/// Only the first such mistake is reported.
#[derive(Debug)]
pub struct Parameter(ParameterInner);

impl Parameter {
    /// Create an option parameter.
    /// Without a [`Parameter::value`], the option is a flag.
    ///
    /// ### Example
    /// ```
    /// # use stipulate_builder as stipulate;
    /// use stipulate::Parameter;
    ///
    /// Parameter::option("verbose", Some('v'));
    /// ```
    pub fn option(name: impl Into<String>, short: Option<char>) -> Self {
        let mut inner = ParameterInner {
            class: ParameterClass::Opt,
            name: name.into(),
            aliases: Vec::default(),
            short,
            id: None,
            meta: None,
            declaration: None,
            repeated: false,
            description: Description::default(),
            deferred_error: None,
        };

        if let Err(error) = check_option_name(&inner.name) {
            inner.defer(error);
        }

        if let Some(s) = short {
            if s == '-' || s == '=' || s.is_whitespace() {
                inner.defer(ConfigError(format!(
                    "option '{n}' cannot use the short name '{s}'.",
                    n = inner.name
                )));
            }
        }

        Self(inner)
    }

    /// Create a positional argument parameter.
    ///
    /// ### Example
    /// ```
    /// # use stipulate_builder as stipulate;
    /// use stipulate::{Parameter, ValueType};
    ///
    /// Parameter::argument("item", ValueType::Integer);
    /// ```
    pub fn argument(name: impl Into<String>, value_type: ValueType) -> Self {
        let mut inner = ParameterInner {
            class: ParameterClass::Arg,
            name: name.into(),
            aliases: Vec::default(),
            short: None,
            id: None,
            meta: None,
            declaration: Some(ValueDeclaration::new(value_type)),
            repeated: false,
            description: Description::default(),
            deferred_error: None,
        };

        if inner.name.trim().is_empty() {
            inner.defer(ConfigError(
                "argument requires a non-blank name.".to_string(),
            ));
        }

        Self(inner)
    }

    /// Give the option a value.
    /// An option takes at most one option argument; giving a second is a configuration error.
    pub fn value(self, option_argument: OptionArgument) -> Self {
        let mut inner = self.0;

        if inner.class == ParameterClass::Arg {
            inner.defer(ConfigError(format!(
                "argument '{n}' cannot take an option argument.",
                n = inner.name
            )));
        } else if inner.declaration.is_some() {
            inner.defer(ConfigError(format!(
                "option '{n}' already has an option argument.",
                n = inner.name
            )));
        } else {
            let OptionArgument {
                meta,
                declaration,
                deferred_error,
            } = option_argument;

            if let Some(error) = deferred_error {
                inner.defer(error);
            }

            inner.meta.replace(meta);
            inner.declaration.replace(declaration);
        }

        Self(inner)
    }

    /// Add an alternative long name for the option.
    ///
    /// ### Example
    /// ```
    /// # use stipulate_builder as stipulate;
    /// use stipulate::Parameter;
    ///
    /// Parameter::option("verbose", Some('v')).alias("chatty");
    /// ```
    pub fn alias(self, name: impl Into<String>) -> Self {
        let mut inner = self.0;
        let alias = name.into();

        if inner.class == ParameterClass::Arg {
            inner.defer(ConfigError(format!(
                "argument '{n}' cannot have alternative names.",
                n = inner.name
            )));
        } else if let Err(error) = check_option_name(&alias) {
            inner.defer(error);
        } else {
            inner.aliases.push(alias);
        }

        Self(inner)
    }

    /// Set the identifier under which parsed values are reported.
    /// Defaults to the primary name.
    pub fn id(self, id: impl Into<String>) -> Self {
        let mut inner = self.0;
        let id = id.into();

        if id.trim().is_empty() {
            inner.defer(ConfigError(format!(
                "parameter '{n}' requires a non-blank id.",
                n = inner.name
            )));
        } else {
            inner.id.replace(id);
        }

        Self(inner)
    }

    /// Attach a constraint to the parameter's value.
    /// For an option, this is the value of its [`OptionArgument`].
    /// Constraints are evaluated in the order they are attached.
    ///
    /// ### Example
    /// ```
    /// # use stipulate_builder as stipulate;
    /// use stipulate::{MaxLength, Parameter, ValueType};
    ///
    /// Parameter::argument("name", ValueType::Text).constraint(MaxLength::new(5));
    /// ```
    pub fn constraint(self, constraint: impl Constraint + 'static) -> Self {
        let mut inner = self.0;

        match inner.declaration.as_mut() {
            Some(declaration) => declaration.constraints.push(Box::new(constraint)),
            None => inner.defer(ConfigError(format!(
                "flag '{n}' has no value to constrain.",
                n = inner.name
            ))),
        }

        Self(inner)
    }

    /// Set the default value, marking the parameter optional.
    /// For an option, this is the default of its [`OptionArgument`].
    /// If repeated, only the final default will apply.
    pub fn default(self, value: impl Into<Value>) -> Self {
        let mut inner = self.0;

        match inner.declaration.as_mut() {
            Some(declaration) => {
                declaration.default.replace(value.into());
            }
            None => inner.defer(ConfigError(format!(
                "flag '{n}' has no value to default.",
                n = inner.name
            ))),
        }

        Self(inner)
    }

    /// Allow the parameter to receive multiple values.
    ///
    /// A repeated option may occur several times.
    /// A repeated argument consumes all the remaining positional tokens.
    pub fn repeated(self) -> Self {
        let mut inner = self.0;
        inner.repeated = true;
        Self(inner)
    }

    /// Document the parameter.
    /// If repeated, only the final description will apply.
    ///
    /// ### Example
    /// ```
    /// # use stipulate_builder as stipulate;
    /// use stipulate::{Description, Parameter};
    ///
    /// Parameter::option("verbose", None)
    ///     .description("--this will get discarded--")
    ///     .description(Description::new().text("Make the program ").emphasis("loud").text("."));
    /// ```
    pub fn description(self, description: impl Into<Description>) -> Self {
        let mut inner = self.0;
        inner.description = description.into();
        Self(inner)
    }

    pub(super) fn name(&self) -> &str {
        &self.0.name
    }

    pub(super) fn class(&self) -> ParameterClass {
        self.0.class
    }

    /// Finalize the configuration, checking every attached constraint and default.
    pub(crate) fn seal(self) -> Result<Element, ConfigError> {
        let ParameterInner {
            class,
            name,
            aliases,
            short,
            id,
            meta,
            declaration,
            repeated,
            description,
            deferred_error,
        } = self.0;

        if let Some(error) = deferred_error {
            return Err(error);
        }

        let id = id.unwrap_or_else(|| name.clone());

        match class {
            ParameterClass::Opt => {
                let value = match declaration {
                    Some(declaration) => Some(ValueSpec::seal(&name, declaration)?),
                    None => None,
                };
                let meta = meta.unwrap_or_else(|| name.to_ascii_uppercase().replace('-', "_"));

                Ok(Element::Opt(OptionElement::new(
                    name,
                    aliases,
                    short,
                    id,
                    value.map(|v| (meta, v)),
                    repeated,
                    description,
                )))
            }
            ParameterClass::Arg => {
                let declaration = match declaration {
                    Some(declaration) => declaration,
                    None => unreachable!("internal error - arguments always declare a value"),
                };
                let value = ValueSpec::seal(&name, declaration)?;

                Ok(Element::Arg(ArgumentElement::new(
                    name,
                    id,
                    value,
                    repeated,
                    description,
                )))
            }
        }
    }
}

fn check_option_name(name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        Err(ConfigError("option requires a non-blank name.".to_string()))
    } else if name.starts_with('-') || name.contains('=') || name.contains(char::is_whitespace) {
        Err(ConfigError(format!(
            "option name '{name}' must not start with '-', nor contain '=' or whitespace."
        )))
    } else {
        Ok(())
    }
}
