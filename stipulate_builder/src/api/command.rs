use crate::api::parameter::{Element, Parameter, ParameterClass};
use crate::api::{ArgumentElement, OptionElement};
use crate::constant::*;
use crate::description::Description;
use crate::document::DocumentWriter;
use crate::error::ConfigError;
use crate::parser::{document, ConsoleInterface, GeneralParser, UserInterface};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A command: the scope of some options, positional arguments and sub-commands.
///
/// The root command names the program.
/// Every element is sealed and checked as it is added, so configuration mistakes (ex: a repeated parameter name) surface before any token is parsed.
///
/// ### Example
/// ```
/// # use stipulate_builder as stipulate;
/// use stipulate::{Command, MaxValue, MinValue, OptionArgument, Parameter, Value, ValueType};
///
/// let parser = Command::new("program")
///     .summary("Does awesome things.")
///     .add(Parameter::option("verbose", Some('v')))?
///     .add(
///         Parameter::option("level", Some('l')).value(
///             OptionArgument::new("LEVEL", ValueType::Integer)
///                 .constraint(MinValue::new(1))
///                 .constraint(MaxValue::new(1000))
///                 .default(5),
///         ),
///     )?
///     .add(Parameter::argument("item", ValueType::Text).repeated())?
///     .build_parser()?;
///
/// let matches = parser.parse_tokens(vec!["-v", "a", "b"].as_slice()).unwrap();
/// assert!(matches.contains("verbose"));
/// assert_eq!(matches.get("level"), Some(&Value::Integer(5)));
/// assert_eq!(matches.get_all("item"), &[Value::from("a"), Value::from("b")]);
/// # Ok::<(), stipulate::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct Command {
    name: String,
    summary: Option<String>,
    description: Description,
    options: Vec<OptionElement>,
    arguments: Vec<ArgumentElement>,
    commands: Vec<Command>,
    deferred_error: Option<ConfigError>,
}

impl Command {
    /// Create a command.
    /// For the root command, `name` is the program name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let deferred_error = if name.trim().is_empty() {
            Some(ConfigError("command requires a non-blank name.".to_string()))
        } else if name.starts_with('-') {
            Some(ConfigError(format!(
                "command name '{name}' must not start with '-'."
            )))
        } else {
            None
        };

        Self {
            name,
            summary: None,
            description: Description::default(),
            options: Vec::default(),
            arguments: Vec::default(),
            commands: Vec::default(),
            deferred_error,
        }
    }

    /// Document the one-line summary of this command.
    /// If repeated, only the final summary will apply.
    ///
    /// The summary is shown in the help of the parent command, as well as atop this command's own help.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        let summary = summary.into();

        if summary.trim().is_empty() {
            self.defer(ConfigError(format!(
                "command '{n}' requires a non-blank summary.",
                n = self.name
            )));
        } else {
            self.summary.replace(summary);
        }

        self
    }

    /// Document this command in full.
    /// If repeated, only the final description will apply.
    pub fn description(mut self, description: impl Into<Description>) -> Self {
        self.description = description.into();
        self
    }

    /// Seal and add an option/argument to the command.
    ///
    /// The order of arguments corresponds to their positional order during parsing.
    /// The order of options does not affect the parser semantics.
    ///
    /// Fails if:
    /// * the parameter is misconfigured (ex: an incompatible constraint, or an invalid default),
    /// * a name, short name, or id is already used within this command (`help` and `h` are reserved),
    /// * an argument would follow a repeated argument, or a required argument would follow an optional one,
    /// * an optional or repeated argument is added to a command with sub-commands.
    ///
    /// ### Example
    /// ```
    /// # use stipulate_builder as stipulate;
    /// use stipulate::{Command, Parameter, ValueType};
    ///
    /// let command = Command::new("program")
    ///     .add(Parameter::argument("TYPE", ValueType::Text))
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     command.add(Parameter::argument("TYPE", ValueType::Text)).unwrap_err().to_string(),
    ///     "Config error: Cannot duplicate the parameter 'TYPE'.",
    /// );
    /// ```
    pub fn add(mut self, parameter: Parameter) -> Result<Self, ConfigError> {
        if let Some(error) = self.deferred_error.take() {
            return Err(error);
        }

        if parameter.class() == ParameterClass::Arg {
            self.check_argument_position(parameter.name())?;
        }

        match parameter.seal()? {
            Element::Opt(option) => {
                for name in option.long_names() {
                    self.check_name(name)?;
                }

                let mut seen = std::collections::HashSet::new();

                for name in option.long_names() {
                    if !seen.insert(name) {
                        return Err(duplicate(name));
                    }
                }

                if let Some(short) = option.short() {
                    if short == HELP_SHORT || self.options.iter().any(|o| o.short() == Some(short)) {
                        return Err(ConfigError(format!(
                            "Cannot duplicate the short option '{short}'."
                        )));
                    }
                }

                self.check_id(option.id())?;

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Command '{n}' adding option: {option:?}.", n = self.name);
                }

                self.options.push(option);
            }
            Element::Arg(argument) => {
                self.check_name(argument.name())?;
                self.check_id(argument.id())?;

                if let Some(previous) = self.arguments.last() {
                    if !previous.is_repeated() && previous.is_optional() && !argument.is_optional()
                    {
                        return Err(ConfigError(format!(
                            "required argument '{a}' cannot follow the optional argument '{p}'.",
                            a = argument.name(),
                            p = previous.name(),
                        )));
                    }
                }

                if !self.commands.is_empty() && (argument.is_optional() || argument.is_repeated())
                {
                    return Err(ConfigError(format!(
                        "command '{n}' has sub-commands, so argument '{a}' cannot be optional or repeated.",
                        n = self.name,
                        a = argument.name(),
                    )));
                }

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Command '{n}' adding argument: {argument:?}.", n = self.name);
                }

                self.arguments.push(argument);
            }
        }

        Ok(self)
    }

    /// Add a sub-command.
    ///
    /// The first positional token after this command's own arguments selects the sub-command; the remaining tokens are parsed by it.
    ///
    /// ### Example
    /// ```
    /// # use stipulate_builder as stipulate;
    /// use stipulate::{Command, Parameter, Value, ValueType};
    ///
    /// let parser = Command::new("program")
    ///     .command(
    ///         Command::new("get")
    ///             .summary("Get an item.")
    ///             .add(Parameter::argument("key", ValueType::Text))?,
    ///     )?
    ///     .command(Command::new("list").summary("List the items."))?
    ///     .build_parser()?;
    ///
    /// let matches = parser.parse_tokens(vec!["get", "abc"].as_slice()).unwrap();
    /// let (name, sub_matches) = matches.sub_command().unwrap();
    /// assert_eq!(name, "get");
    /// assert_eq!(sub_matches.get("key"), Some(&Value::from("abc")));
    /// # Ok::<(), stipulate::ConfigError>(())
    /// ```
    pub fn command(mut self, mut command: Command) -> Result<Self, ConfigError> {
        if let Some(error) = self.deferred_error.take() {
            return Err(error);
        }

        if let Some(error) = command.deferred_error.take() {
            return Err(error);
        }

        if self.find_command(&command.name).is_some() {
            return Err(ConfigError(format!(
                "Cannot duplicate the command '{n}'.",
                n = command.name
            )));
        }

        self.check_name(&command.name)?;

        if let Some(argument) = self
            .arguments
            .iter()
            .find(|a| a.is_optional() || a.is_repeated())
        {
            return Err(ConfigError(format!(
                "command '{n}' has the optional or repeated argument '{a}', so cannot have sub-commands.",
                n = self.name,
                a = argument.name(),
            )));
        }

        self.commands.push(command);
        Ok(self)
    }

    /// The command's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The one-line summary.
    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// The full description.
    pub fn description_text(&self) -> &Description {
        &self.description
    }

    /// The options, in the order they were added.
    pub fn options(&self) -> &[OptionElement] {
        &self.options
    }

    /// The positional arguments, in positional order.
    pub fn arguments(&self) -> &[ArgumentElement] {
        &self.arguments
    }

    /// The sub-commands, in the order they were added.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Find an option by its primary or alternative name.
    pub fn option(&self, name: &str) -> Option<&OptionElement> {
        self.options
            .iter()
            .find(|o| o.long_names().any(|n| n == name))
    }

    /// Find an argument by its name.
    pub fn argument(&self, name: &str) -> Option<&ArgumentElement> {
        self.arguments.iter().find(|a| a.name() == name)
    }

    /// Find a sub-command by its name.
    pub fn find_command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Write the help documentation of this command via `writer`.
    ///
    /// ### Example
    /// ```
    /// # use stipulate_builder as stipulate;
    /// use stipulate::{Command, Parameter, TextWriter, ValueType};
    ///
    /// let command = Command::new("program")
    ///     .add(Parameter::argument("item", ValueType::Integer).description("The item."))
    ///     .unwrap();
    /// let mut writer = TextWriter::new(80);
    /// command.document(&mut writer);
    ///
    /// assert_eq!(writer.into_lines()[0], "usage: program [-h] ITEM");
    /// ```
    pub fn document(&self, writer: &mut dyn DocumentWriter) {
        document(self, &self.name, writer);
    }

    pub(crate) fn build_with_interface(
        mut self,
        user_interface: Box<dyn UserInterface>,
        help_width: Option<usize>,
    ) -> Result<GeneralParser, ConfigError> {
        if let Some(error) = self.deferred_error.take() {
            return Err(error);
        }

        Ok(GeneralParser::new(self, user_interface, help_width))
    }

    /// Build the command line parser as a Result.
    /// This finalizes the configuration and checks for errors (ex: a blank summary).
    pub fn build_parser(self) -> Result<GeneralParser, ConfigError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()), None)
    }

    /// Build the command line parser.
    /// This finalizes the configuration and checks for errors (ex: a blank summary).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> GeneralParser {
        match self.build_parser() {
            Ok(gp) => gp,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }

    fn defer(&mut self, error: ConfigError) {
        // Only the first error is reported.
        if self.deferred_error.is_none() {
            self.deferred_error.replace(error);
        }
    }

    fn check_name(&self, name: &str) -> Result<(), ConfigError> {
        let taken = name == HELP_NAME
            || self.options.iter().any(|o| o.long_names().any(|n| n == name))
            || self.arguments.iter().any(|a| a.name() == name)
            || self.commands.iter().any(|c| c.name == name);

        if taken {
            Err(duplicate(name))
        } else {
            Ok(())
        }
    }

    fn check_id(&self, id: &str) -> Result<(), ConfigError> {
        let taken = id == HELP_NAME
            || self.options.iter().any(|o| o.id() == id)
            || self.arguments.iter().any(|a| a.id() == id);

        if taken {
            Err(ConfigError(format!(
                "Cannot duplicate the parameter id '{id}'."
            )))
        } else {
            Ok(())
        }
    }

    fn check_argument_position(&self, name: &str) -> Result<(), ConfigError> {
        match self.arguments.last() {
            Some(previous) if previous.is_repeated() => Err(ConfigError(format!(
                "argument '{name}' cannot follow the repeated argument '{p}'.",
                p = previous.name(),
            ))),
            _ => Ok(()),
        }
    }
}

fn duplicate(name: &str) -> ConfigError {
    ConfigError(format!("Cannot duplicate the parameter '{name}'."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{MaxValue, MinValue};
    use crate::model::ValueType;
    use crate::test::assert_contains;
    use crate::OptionArgument;
    use rstest::rstest;

    #[test]
    fn empty() {
        let command = Command::new("program");

        assert_eq!(command.name(), "program");
        assert_eq!(command.summary_text(), None);
        assert!(command.description_text().is_empty());
        assert!(command.options().is_empty());
        assert!(command.arguments().is_empty());
        assert!(command.commands().is_empty());
        command.build_parser().unwrap();
    }

    #[test]
    fn add() {
        let command = Command::new("program")
            .summary("abc def")
            .add(Parameter::option("flag", Some('f')).alias("flg"))
            .unwrap()
            .add(Parameter::argument("item", ValueType::Integer))
            .unwrap();

        assert_eq!(command.summary_text(), Some("abc def"));
        assert_eq!(command.option("flag").unwrap().name(), "flag");
        assert_eq!(command.option("flg").unwrap().name(), "flag");
        assert!(command.option("item").is_none());
        assert_eq!(command.argument("item").unwrap().name(), "item");
        assert!(command.argument("flag").is_none());
    }

    #[test]
    fn add_duplicate_argument() {
        let command = Command::new("program")
            .add(Parameter::argument("TYPE", ValueType::Text))
            .unwrap();

        assert_matches!(command.add(Parameter::argument("TYPE", ValueType::Text)), Err(ConfigError(message)) => {
            assert_eq!(message, "Cannot duplicate the parameter 'TYPE'.");
        });
    }

    #[rstest]
    #[case(Parameter::option("abc", None))]
    #[case(Parameter::option("xyz", None).alias("abc"))]
    #[case(Parameter::argument("abc", ValueType::Integer))]
    fn add_duplicate_name(#[case] parameter: Parameter) {
        let command = Command::new("program")
            .add(Parameter::option("abc", None))
            .unwrap();

        assert_matches!(command.add(parameter), Err(ConfigError(message)) => {
            assert_eq!(message, "Cannot duplicate the parameter 'abc'.");
        });
    }

    #[test]
    fn add_duplicate_alias() {
        let result = Command::new("program").add(Parameter::option("abc", None).alias("xyz").alias("xyz"));

        assert_matches!(result, Err(ConfigError(message)) => {
            assert_eq!(message, "Cannot duplicate the parameter 'xyz'.");
        });
    }

    #[rstest]
    #[case(Parameter::option("help", None))]
    #[case(Parameter::option("abc", None).alias("help"))]
    #[case(Parameter::argument("help", ValueType::Integer))]
    fn add_reserved_help(#[case] parameter: Parameter) {
        assert_matches!(Command::new("program").add(parameter), Err(ConfigError(message)) => {
            assert_eq!(message, "Cannot duplicate the parameter 'help'.");
        });
    }

    #[rstest]
    #[case(None, 'h')]
    #[case(Some('x'), 'x')]
    fn add_duplicate_short(#[case] existing: Option<char>, #[case] short: char) {
        let command = Command::new("program")
            .add(Parameter::option("abc", existing))
            .unwrap();

        assert_matches!(command.add(Parameter::option("xyz", Some(short))), Err(ConfigError(message)) => {
            assert_eq!(message, format!("Cannot duplicate the short option '{short}'."));
        });
    }

    #[test]
    fn add_duplicate_id() {
        let command = Command::new("program")
            .add(Parameter::option("abc", None))
            .unwrap();

        assert_matches!(command.add(Parameter::argument("xyz", ValueType::Integer).id("abc")), Err(ConfigError(message)) => {
            assert_eq!(message, "Cannot duplicate the parameter id 'abc'.");
        });
    }

    #[test]
    fn add_misconfigured() {
        let result = Command::new("program").add(
            Parameter::option("level", None).value(
                OptionArgument::new("LEVEL", ValueType::Integer)
                    .constraint(MinValue::new(1))
                    .constraint(MaxValue::new(1000))
                    .default(2000),
            ),
        );

        assert_matches!(result, Err(ConfigError(message)) => {
            assert_contains!(message, "default for parameter 'level' is invalid");
        });
    }

    #[test]
    fn add_after_repeated() {
        let command = Command::new("program")
            .add(Parameter::argument("a", ValueType::Integer).repeated())
            .unwrap();

        assert_matches!(command.add(Parameter::argument("b", ValueType::Integer).default(1)), Err(ConfigError(message)) => {
            assert_eq!(message, "argument 'b' cannot follow the repeated argument 'a'.");
        });
    }

    #[test]
    fn add_required_after_optional() {
        let command = Command::new("program")
            .add(Parameter::argument("a", ValueType::Integer).default(1))
            .unwrap()
            .add(Parameter::argument("b", ValueType::Integer).default(2))
            .unwrap();

        assert_matches!(command.add(Parameter::argument("c", ValueType::Integer)), Err(ConfigError(message)) => {
            assert_eq!(message, "required argument 'c' cannot follow the optional argument 'b'.");
        });
    }

    #[rstest]
    #[case(Parameter::argument("a", ValueType::Integer).default(1))]
    #[case(Parameter::argument("a", ValueType::Integer).repeated())]
    fn add_optional_with_commands(#[case] parameter: Parameter) {
        let command = Command::new("program")
            .command(Command::new("sub"))
            .unwrap();

        assert_matches!(command.add(parameter), Err(ConfigError(_)));
    }

    #[rstest]
    #[case(Parameter::argument("a", ValueType::Integer).default(1))]
    #[case(Parameter::argument("a", ValueType::Integer).repeated())]
    fn command_after_optional(#[case] parameter: Parameter) {
        let command = Command::new("program").add(parameter).unwrap();

        assert_matches!(command.command(Command::new("sub")), Err(ConfigError(message)) => {
            assert_contains!(message, "so cannot have sub-commands");
        });
    }

    #[test]
    fn command() {
        let command = Command::new("program")
            .add(Parameter::argument("a", ValueType::Integer))
            .unwrap()
            .command(Command::new("sub").summary("A sub-command."))
            .unwrap();

        assert_eq!(
            command.find_command("sub").unwrap().summary_text(),
            Some("A sub-command.")
        );
        assert!(command.find_command("a").is_none());
    }

    #[rstest]
    #[case(Command::new("sub"), "Cannot duplicate the command 'sub'.")]
    #[case(Command::new("abc"), "Cannot duplicate the parameter 'abc'.")]
    #[case(Command::new("help"), "Cannot duplicate the parameter 'help'.")]
    #[case(Command::new(""), "command requires a non-blank name.")]
    #[case(Command::new("-x"), "command name '-x' must not start with '-'.")]
    #[case(Command::new("x").summary(" "), "command 'x' requires a non-blank summary.")]
    fn command_invalid(#[case] sub_command: Command, #[case] expected: &str) {
        let command = Command::new("program")
            .add(Parameter::option("abc", None))
            .unwrap()
            .command(Command::new("sub"))
            .unwrap();

        assert_matches!(command.command(sub_command), Err(ConfigError(message)) => {
            assert_eq!(message, expected);
        });
    }

    #[test]
    fn deferred_summary() {
        let result = Command::new("program")
            .summary("")
            .summary("Recovered.")
            .add(Parameter::option("abc", None));

        assert_matches!(result, Err(ConfigError(message)) => {
            assert_eq!(message, "command 'program' requires a non-blank summary.");
        });

        assert_matches!(Command::new("program").summary(" ").build_parser(), Err(ConfigError(_)));
    }
}
