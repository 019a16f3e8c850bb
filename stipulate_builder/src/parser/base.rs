use std::collections::{HashMap, VecDeque};
use thiserror::Error;

use crate::api::{Command, ValueSpec};
use crate::constant::*;
use crate::error::ValidationError;
use crate::matcher::*;
use crate::model::Value;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Parse error: {0}")]
pub(crate) struct ParseError(pub(crate) String);

impl From<MatchError> for ParseError {
    fn from(error: MatchError) -> Self {
        ParseError(error.to_string())
    }
}

impl ParseError {
    fn invalid(name: &str, error: ValidationError) -> Self {
        match error {
            ValidationError::Parse(error) => ParseError(format!(
                "value for '{name}' was '{t}' but it cannot convert to {vt}.",
                t = error.token(),
                vt = error.value_type(),
            )),
            ValidationError::Violation(violation) => ParseError(violation.message().to_string()),
        }
    }
}

/// Validated values, keyed by element id.
pub(crate) type Values = HashMap<String, Vec<Value>>;

#[derive(Debug)]
pub(crate) enum Action<'c> {
    Complete(Values),
    Continue {
        values: Values,
        sub_command: &'c Command,
        // The index of the first token belonging to the sub-command.
        remaining: usize,
    },
    PrintHelp,
}

/// Parses the tokens of a single command (up to and excluding its sub-command's tokens).
pub(crate) struct Parser<'c> {
    command: &'c Command,
}

impl<'c> Parser<'c> {
    pub(crate) fn new(command: &'c Command) -> Self {
        Self { command }
    }

    pub(crate) fn consume(&self, tokens: &[&str]) -> Result<Action<'c>, (usize, ParseError)> {
        let command = self.command;
        let help_config = OptionConfig::new(HELP_NAME, Some(HELP_SHORT), Bound::Range(0, 0), true);
        let option_configs = std::iter::once(help_config)
            .chain(command.options().iter().map(OptionConfig::from))
            .collect();
        let argument_configs = command
            .arguments()
            .iter()
            .map(ArgumentConfig::from)
            .collect::<VecDeque<ArgumentConfig>>();
        let mut token_matcher = TokenMatcher::new(option_configs, argument_configs);
        let select_command = !command.commands().is_empty();
        let mut selector: Option<(usize, usize, &str)> = None;

        // 1. Feed the raw token strings to the matcher, stopping at the sub-command (if any).
        for (index, token) in tokens.iter().enumerate() {
            if select_command && token_matcher.ready_for_command() && token_matcher.is_positional(token)
            {
                selector.replace((index, token_matcher.fed(), *token));
                break;
            }

            let offset = token_matcher.fed();

            if let Err(error) = token_matcher.feed(token) {
                if token_matcher.has_matched(HELP_NAME) {
                    return Ok(Action::PrintHelp);
                }

                return Err((offset, ParseError::from(error)));
            }
        }

        let fed = token_matcher.fed();

        // 2. Close the matcher; asking for help trumps any other problem.
        let matched = match token_matcher.close() {
            Ok(matched) | Err((_, _, matched)) if matched.contains(HELP_NAME) => {
                return Ok(Action::PrintHelp);
            }
            Ok(matched) => matched,
            Err((offset, error, _)) => return Err((offset, ParseError::from(error))),
        };

        // 3. Convert and constrain each of the raw values.
        let mut values = Values::default();

        for match_tokens in matched.values {
            let (id, value_spec) = self.element(&match_tokens.name);

            match value_spec {
                None => {
                    values
                        .entry(id.to_string())
                        .or_default()
                        .push(Value::Boolean(true));
                }
                Some(value_spec) => {
                    for (offset, token) in &match_tokens.values {
                        let value = value_spec.validate(&match_tokens.name, token).map_err(
                            |error| (*offset, ParseError::invalid(&match_tokens.name, error)),
                        )?;
                        values.entry(id.to_string()).or_default().push(value);
                    }
                }
            }
        }

        // 4. Fill in the defaults of anything not given.
        let option_defaults = command
            .options()
            .iter()
            .filter_map(|o| o.value().and_then(|v| v.default()).map(|d| (o.id(), d)));
        let argument_defaults = command
            .arguments()
            .iter()
            .filter_map(|a| a.value().default().map(|d| (a.id(), d)));

        for (id, default) in option_defaults.chain(argument_defaults) {
            values
                .entry(id.to_string())
                .or_insert_with(|| vec![default.clone()]);
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Parsed '{c}': {n} value(s), selector={selector:?}.",
                c = command.name(),
                n = values.len()
            );
        }

        // 5. Hand the remaining tokens over to the sub-command.
        match selector {
            Some((index, offset, name)) => match command.find_command(name) {
                Some(sub_command) => Ok(Action::Continue {
                    values,
                    sub_command,
                    remaining: index + 1,
                }),
                None => Err((
                    offset,
                    ParseError(format!("Unknown sub-command '{name}'.")),
                )),
            },
            None if select_command => Err((
                fed,
                ParseError(format!(
                    "A sub-command is required; choose one of: {}.",
                    command
                        .commands()
                        .iter()
                        .map(|c| c.name())
                        .collect::<Vec<&str>>()
                        .join(", ")
                )),
            )),
            None => Ok(Action::Complete(values)),
        }
    }

    fn element(&self, name: &str) -> (&'c str, Option<&'c ValueSpec>) {
        let command = self.command;

        if let Some(option) = command.options().iter().find(|o| o.name() == name) {
            return (option.id(), option.value());
        }

        match command.argument(name) {
            Some(argument) => (argument.id(), Some(argument.value())),
            None => unreachable!("internal error - mismatch between matches and elements '{name}'"),
        }
    }
}
