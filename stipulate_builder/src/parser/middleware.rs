use std::collections::HashMap;
use std::env;

use crate::api::Command;
use crate::document::{DocumentWriter, TextWriter};
use crate::model::Value;
use crate::parser::base::*;
use crate::parser::interface::UserInterface;
use crate::parser::printer::{document, ErrorContext};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The configured command line parser.
/// Built via [`Command::build_parser`](./struct.Command.html#method.build_parser) or [`Command::build`](./struct.Command.html#method.build).
pub struct GeneralParser {
    command: Command,
    user_interface: Box<dyn UserInterface>,
    help_width: Option<usize>,
}

impl std::fmt::Debug for GeneralParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneralParser")
            .field("command", &self.command.name())
            .field("help_width", &self.help_width)
            .finish()
    }
}

impl GeneralParser {
    pub(crate) fn new(
        command: Command,
        user_interface: Box<dyn UserInterface>,
        help_width: Option<usize>,
    ) -> Self {
        Self {
            command,
            user_interface,
            help_width,
        }
    }

    /// Run the command line parser against the input tokens.
    ///
    /// Parsing happens in two phases:
    /// 1. Token matching aligns the tokens to arguments and options.
    /// All tokens must be matched successfully in order to proceed to the next phase.
    /// 2. Validation converts each matched token to its declared type, and evaluates it against the attached constraints.
    /// Parameters which were not given take their defaults.
    ///
    /// If at any point the parser encounters an error (ex: un-matched token, constraint violation, etc), it will return with `Err(1)`.
    ///
    /// If the help switch (`-h` or `--help`) is encountered, the parser will display the help message and return with `Err(0)`.
    /// This skips the validation phase.
    ///
    /// In the case of sub-commands, this process repeats for the selected sub-command over the tokens following it.
    ///
    /// ### Example
    /// ```
    /// # use stipulate_builder as stipulate;
    /// use stipulate::{Command, MaxLength, Parameter, Value, ValueType};
    ///
    /// let parser = Command::new("program")
    ///     .add(Parameter::argument("name", ValueType::Text).constraint(MaxLength::new(5)))?
    ///     .build_parser()?;
    ///
    /// let matches = parser.parse_tokens(&["Morop"]).unwrap();
    /// assert_eq!(matches.get("name"), Some(&Value::from("Morop")));
    /// assert_eq!(parser.parse_tokens(&["Moropp"]).unwrap_err(), 1);
    /// # Ok::<(), stipulate::ConfigError>(())
    /// ```
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<Matches, i32> {
        self.invoke(&self.command, self.command.name().to_string(), tokens)
    }

    /// Run the command line parser against the Cli [`env::args`].
    ///
    /// Behaves as [`GeneralParser::parse_tokens`], except that instead of returning an error code it exits with it (via [`std::process::exit`]).
    pub fn parse(&self) -> Matches {
        let command_input: Vec<String> = env::args().skip(1).collect();

        match self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(matches) => matches,
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        }
    }

    /// Write the help documentation of the (root) command via `writer`.
    /// This is the same documentation displayed by the help switch.
    pub fn write_help(&self, writer: &mut dyn DocumentWriter) {
        document(&self.command, self.command.name(), writer);
    }

    fn invoke(&self, command: &Command, program: String, tokens: &[&str]) -> Result<Matches, i32> {
        match Parser::new(command).consume(tokens) {
            Ok(Action::Complete(values)) => Ok(Matches {
                values,
                sub_command: None,
            }),
            Ok(Action::Continue {
                values,
                sub_command,
                remaining,
            }) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Continuing into sub-command '{}'.", sub_command.name());
                }

                let name = sub_command.name().to_string();
                let sub_matches = self.invoke(
                    sub_command,
                    format!("{program} {name}"),
                    &tokens[remaining..],
                )?;

                Ok(Matches {
                    values,
                    sub_command: Some((name, Box::new(sub_matches))),
                })
            }
            Ok(Action::PrintHelp) => {
                let mut writer = match self.help_width {
                    Some(width) => TextWriter::new(width),
                    None => TextWriter::terminal(),
                };
                document(command, &program, &mut writer);

                for line in writer.into_lines() {
                    self.user_interface.print(line);
                }

                Err(0)
            }
            Err((offset, parse_error)) => {
                self.user_interface.print_error(parse_error);
                self.user_interface
                    .print_error_context(ErrorContext::new(offset, tokens));
                Err(1)
            }
        }
    }
}

/// The validated values of a successful parse, keyed by parameter id.
///
/// Flags report a single `Value::Boolean(true)` per occurrence.
/// Parameters which were neither given nor have a default are absent.
#[derive(Debug, Default, PartialEq)]
pub struct Matches {
    values: HashMap<String, Vec<Value>>,
    sub_command: Option<(String, Box<Matches>)>,
}

impl Matches {
    /// The first value for `id`.
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.values.get(id).and_then(|values| values.first())
    }

    /// All the values for `id`, in the order given (empty when absent).
    pub fn get_all(&self, id: &str) -> &[Value] {
        self.values.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `id` has any value (given or defaulted).
    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    /// The selected sub-command, with its own matches.
    ///
    /// ### Example
    /// ```
    /// # use stipulate_builder as stipulate;
    /// use stipulate::{Command, Parameter, Value, ValueType};
    ///
    /// let parser = Command::new("git")
    ///     .command(Command::new("add").add(Parameter::argument("path", ValueType::Text))?)?
    ///     .build_parser()?;
    ///
    /// let matches = parser.parse_tokens(&["add", "README.md"]).unwrap();
    /// let (name, add) = matches.sub_command().unwrap();
    /// assert_eq!(name, "add");
    /// assert_eq!(add.get("path"), Some(&Value::from("README.md")));
    /// # Ok::<(), stipulate::ConfigError>(())
    /// ```
    pub fn sub_command(&self) -> Option<(&str, &Matches)> {
        self.sub_command
            .as_ref()
            .map(|(name, matches)| (name.as_str(), matches.as_ref()))
    }
}
