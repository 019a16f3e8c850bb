use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;

use crate::matcher::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MatchError {
    #[error("Not enough tokens provided to parameter '{0}'.")]
    Undercomplete(String),

    #[error("Too many tokens provided to parameter '{0}'.")]
    Overcomplete(String),

    #[error("No more arguments to match against.")]
    ArgumentsExhausted,

    #[error("Option '{0}' does not exist.")]
    InvalidOption(String),

    #[error("Short option '{0}' does not exist.")]
    InvalidShortOption(char),

    #[error("Option '{0}' cannot be repeated.")]
    Repeated(String),
}

impl From<CloseError> for MatchError {
    fn from(error: CloseError) -> Self {
        match error {
            CloseError::TooFewValues { name, .. } => MatchError::Undercomplete(name),
            CloseError::TooManyValues { name, .. } => MatchError::Overcomplete(name),
        }
    }
}

/// Aligns raw tokens to the options and arguments of a single command.
///
/// Grammar:
/// * `--name`, `--name=value`: a long option (by primary or alternative name).
/// * `-s`, `-s=value`, `-abc`: short options; only the final short option in a group may take a value.
/// * `--`: every subsequent token is positional.
/// * Anything else (including `-` and negative numbers) is positional.
///
/// An option taking a value always takes the next token, whatever it looks like.
#[derive(Debug)]
pub(crate) struct TokenMatcher {
    option_bounds: HashMap<String, Bound>,
    long_options: HashMap<String, String>,
    short_options: HashMap<char, String>,
    repeatable: HashSet<String>,
    occurred: HashSet<String>,
    arguments: VecDeque<ArgumentConfig>,
    fed: usize,
    matches: Vec<MatchTokens>,
    option_buffer: Option<MatchBuffer>,
    argument_buffer: Option<MatchBuffer>,
    options_ended: bool,
}

impl TokenMatcher {
    pub(crate) fn new(options: Vec<OptionConfig>, arguments: VecDeque<ArgumentConfig>) -> Self {
        let mut option_bounds = HashMap::default();
        let mut long_options = HashMap::default();
        let mut short_options = HashMap::default();
        let mut repeatable = HashSet::default();

        for option_config in options.into_iter() {
            let name = option_config.name().to_string();
            long_options.insert(name.clone(), name.clone());

            for alias in option_config.aliases() {
                long_options.insert(alias.clone(), name.clone());
            }

            if let Some(short) = option_config.short() {
                short_options.insert(short, name.clone());
            }

            if option_config.repeated() {
                repeatable.insert(name.clone());
            }

            option_bounds.insert(name, option_config.bound());
        }

        Self {
            option_bounds,
            long_options,
            short_options,
            repeatable,
            occurred: HashSet::default(),
            arguments,
            fed: 0,
            matches: Vec::default(),
            option_buffer: None,
            argument_buffer: None,
            options_ended: false,
        }
    }

    pub(crate) fn feed(&mut self, token: &str) -> Result<(), MatchError> {
        let token_length = token.len();

        let result = if self.option_buffer.is_some() {
            self.match_option_value(token)
        } else if !self.options_ended && token == "--" {
            self.options_ended = true;
            Ok(())
        } else if self.is_positional(token) {
            self.match_argument(token)
        } else if token.starts_with("-=") || token.starts_with("--=") {
            // The option specifier must name at least one option.
            Err(MatchError::InvalidOption(token.to_string()))
        } else if let Some(token) = token.strip_prefix("--") {
            self.match_option(split_equals_delimiter(token))
        } else if let Some(token) = token.strip_prefix('-') {
            self.match_option_short(split_equals_delimiter(token))
        } else {
            unreachable!("internal error - non-positional tokens must start with '-'")
        };

        self.fed += token_length;
        result
    }

    /// Whether `token`, if fed next, would be treated as a positional token.
    pub(crate) fn is_positional(&self, token: &str) -> bool {
        if self.options_ended || token == "-" || !token.starts_with('-') {
            return true;
        }

        // Negative numbers, unless they collide with a short option.
        match token.chars().nth(1) {
            Some(c) if c.is_ascii_digit() && !self.short_options.contains_key(&c) => {
                token[1..].parse::<f64>().is_ok()
            }
            _ => false,
        }
    }

    /// Whether every argument is matched, so that the next positional token may select a sub-command.
    pub(crate) fn ready_for_command(&self) -> bool {
        self.option_buffer.is_none()
            && self.arguments.is_empty()
            && self
                .argument_buffer
                .as_ref()
                .map_or(true, |buffer| !buffer.is_open())
    }

    /// The total length of the tokens fed so far.
    pub(crate) fn fed(&self) -> usize {
        self.fed
    }

    /// Whether the option or argument `name` has been (completely) matched so far.
    pub(crate) fn has_matched(&self, name: &str) -> bool {
        self.matches.iter().any(|mt| mt.name == name)
    }

    fn match_option_value(&mut self, token: &str) -> Result<(), MatchError> {
        let mut option_buffer = self
            .option_buffer
            .take()
            .expect("internal error - must have an option buffer");
        option_buffer.push(self.fed, token);

        if option_buffer.is_open() {
            self.option_buffer.replace(option_buffer);
        } else {
            self.matches.push(option_buffer.close()?);
        }

        Ok(())
    }

    fn match_argument(&mut self, token: &str) -> Result<(), MatchError> {
        let mut match_buffer = match self.argument_buffer.take() {
            Some(match_buffer) => {
                if match_buffer.is_open() {
                    match_buffer
                } else {
                    // Flip to the next argument.
                    self.matches.push(match_buffer.close()?);
                    self.next_argument()?
                }
            }
            None => self.next_argument()?,
        };

        match_buffer.push(self.fed, token);
        self.argument_buffer.replace(match_buffer);
        Ok(())
    }

    fn next_argument(&mut self) -> Result<MatchBuffer, MatchError> {
        match self.arguments.pop_front() {
            Some(argument_config) => Ok(MatchBuffer::new(
                argument_config.name(),
                argument_config.bound(),
            )),
            None => Err(MatchError::ArgumentsExhausted),
        }
    }

    fn occur(&mut self, name: &str) -> Result<Bound, MatchError> {
        if !self.occurred.insert(name.to_string()) && !self.repeatable.contains(name) {
            return Err(MatchError::Repeated(name.to_string()));
        }

        match self.option_bounds.get(name) {
            Some(bound) => Ok(*bound),
            None => unreachable!("internal error - mis-aligned option '{name}'"),
        }
    }

    fn match_option(
        &mut self,
        (option_name, single_argument): (&str, Option<&str>),
    ) -> Result<(), MatchError> {
        let name = match self.long_options.get(option_name) {
            Some(name) => name.clone(),
            None => return Err(MatchError::InvalidOption(option_name.to_string())),
        };
        let bound = self.occur(&name)?;
        let mut match_buffer = MatchBuffer::new(name, bound);

        match single_argument {
            Some(value) => {
                // The 3 comes from the option specifier '--' and argument specifier '='.
                match_buffer.push(self.fed + option_name.len() + 3, value);
                // Options using k=v syntax cannot follow up with more values afterwards.
                self.matches.push(match_buffer.close()?);
            }
            None => self.open_option(match_buffer)?,
        }

        Ok(())
    }

    fn match_option_short(
        &mut self,
        (short_option_names, single_argument): (&str, Option<&str>),
    ) -> Result<(), MatchError> {
        let count = short_option_names.chars().count();

        for (index, single) in short_option_names.chars().enumerate() {
            let name = match self.short_options.get(&single) {
                Some(name) => name.clone(),
                None => return Err(MatchError::InvalidShortOption(single)),
            };
            let bound = self.occur(&name)?;
            let mut match_buffer = MatchBuffer::new(name, bound);

            if index + 1 == count {
                // Only the final short option may take values.
                match single_argument {
                    Some(value) => {
                        // The 2 comes from the short option specifier '-' and argument specifier '='.
                        match_buffer.push(self.fed + short_option_names.len() + 2, value);
                        self.matches.push(match_buffer.close()?);
                    }
                    None => self.open_option(match_buffer)?,
                }
            } else {
                // The leading short options must all be flags.
                self.matches.push(match_buffer.close()?);
            }
        }

        Ok(())
    }

    fn open_option(&mut self, match_buffer: MatchBuffer) -> Result<(), MatchError> {
        if match_buffer.is_open() {
            self.option_buffer.replace(match_buffer);
        } else {
            self.matches.push(match_buffer.close()?);
        }

        Ok(())
    }

    pub(crate) fn close(mut self) -> Result<Matched, (usize, MatchError, Matched)> {
        let mut close_error: Option<CloseError> = None;
        let buffers = self
            .option_buffer
            .take()
            .into_iter()
            .chain(self.argument_buffer.take())
            .chain(
                self.arguments
                    .drain(..)
                    .map(|config| MatchBuffer::new(config.name(), config.bound())),
            )
            .collect::<Vec<MatchBuffer>>();

        for match_buffer in buffers {
            match match_buffer.close() {
                Ok(match_tokens) => self.matches.push(match_tokens),
                Err(error) => {
                    // Only track the first error.
                    if close_error.is_none() {
                        close_error.replace(error);
                    }
                }
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Matched {} parameter(s) from {} byte(s) of tokens.",
                self.matches.len(),
                self.fed
            );
        }

        let matched = Matched {
            values: self.matches,
        };

        match close_error {
            Some(error) => Err((self.fed, MatchError::from(error), matched)),
            None => Ok(matched),
        }
    }
}

fn split_equals_delimiter(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((n, v)) => (n, Some(v)),
        None => (token, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn matcher(options: Vec<OptionConfig>, arguments: Vec<ArgumentConfig>) -> TokenMatcher {
        TokenMatcher::new(options, VecDeque::from(arguments))
    }

    fn feed_all(matcher: &mut TokenMatcher, tokens: &[&str]) -> Result<(), MatchError> {
        for token in tokens {
            matcher.feed(token)?;
        }

        Ok(())
    }

    fn flag(name: &str, short: Option<char>) -> OptionConfig {
        OptionConfig::new(name, short, Bound::Range(0, 0), false)
    }

    fn valued(name: &str, short: Option<char>) -> OptionConfig {
        OptionConfig::new(name, short, Bound::Range(1, 1), false)
    }

    fn tokens(name: &str, values: Vec<(usize, &str)>) -> MatchTokens {
        MatchTokens {
            name: name.to_string(),
            values: values
                .into_iter()
                .map(|(o, v)| (o, v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn empty() {
        let matcher = matcher(vec![], vec![]);
        assert_eq!(matcher.close().unwrap(), Matched { values: vec![] });
    }

    #[rstest]
    #[case(vec!["--flag"])]
    #[case(vec!["-f"])]
    #[case(vec!["--flg"])]
    fn option_flag(#[case] input: Vec<&str>) {
        let mut matcher = matcher(
            vec![flag("flag", Some('f')).with_aliases(vec!["flg".to_string()])],
            vec![],
        );
        feed_all(&mut matcher, &input).unwrap();

        assert_eq!(
            matcher.close().unwrap(),
            Matched {
                values: vec![tokens("flag", vec![])]
            }
        );
    }

    #[rstest]
    #[case(vec!["--value", "1"], 7)]
    #[case(vec!["-v", "1"], 2)]
    #[case(vec!["--value=1"], 8)]
    #[case(vec!["-v=1"], 3)]
    fn option_value(#[case] input: Vec<&str>, #[case] offset: usize) {
        let mut matcher = matcher(vec![valued("value", Some('v'))], vec![]);
        feed_all(&mut matcher, &input).unwrap();

        assert_eq!(
            matcher.close().unwrap(),
            Matched {
                values: vec![tokens("value", vec![(offset, "1")])]
            }
        );
    }

    #[rstest]
    #[case(vec!["--value", "-1"], "-1")]
    #[case(vec!["--value", "--"], "--")]
    #[case(vec!["--value", "--value"], "--value")]
    #[case(vec!["-v", "-x"], "-x")]
    fn option_value_takes_next(#[case] input: Vec<&str>, #[case] expected: &str) {
        let mut matcher = matcher(vec![valued("value", Some('v'))], vec![]);
        feed_all(&mut matcher, &input).unwrap();

        let matched = matcher.close().unwrap();
        assert_eq!(matched.values[0].values[0].1, expected);
    }

    #[rstest]
    #[case(vec!["--value"])]
    #[case(vec!["-v"])]
    #[case(vec!["-vf"])]
    fn option_value_missing(#[case] input: Vec<&str>) {
        let mut matcher = matcher(vec![valued("value", Some('v')), flag("flag", Some('f'))], vec![]);
        let result = feed_all(&mut matcher, &input).and_then(|_| {
            matcher
                .close()
                .map(|_| ())
                .map_err(|(_, error, _)| error)
        });

        assert_eq!(
            result.unwrap_err(),
            MatchError::Undercomplete("value".to_string())
        );
    }

    #[test]
    fn option_flag_with_value() {
        let mut matcher = matcher(vec![flag("flag", None)], vec![]);
        assert_eq!(
            matcher.feed("--flag=1").unwrap_err(),
            MatchError::Overcomplete("flag".to_string())
        );
    }

    #[rstest]
    #[case(vec!["--flag", "--flag"])]
    #[case(vec!["-f", "--flag"])]
    #[case(vec!["-ff"])]
    fn option_repeat(#[case] input: Vec<&str>) {
        let mut matcher = matcher(vec![flag("flag", Some('f'))], vec![]);
        assert_eq!(
            feed_all(&mut matcher, &input).unwrap_err(),
            MatchError::Repeated("flag".to_string())
        );
    }

    #[test]
    fn option_repeated() {
        let mut matcher = matcher(
            vec![OptionConfig::new("value", Some('v'), Bound::Range(1, 1), true)],
            vec![],
        );
        feed_all(&mut matcher, &["-v", "1", "--value=2", "-v=3"]).unwrap();

        assert_eq!(
            matcher.close().unwrap(),
            Matched {
                values: vec![
                    tokens("value", vec![(2, "1")]),
                    tokens("value", vec![(11, "2")]),
                    tokens("value", vec![(15, "3")]),
                ]
            }
        );
    }

    #[test]
    fn option_short_combined() {
        let mut matcher = matcher(
            vec![
                flag("apple", Some('a')),
                flag("banana", Some('b')),
                valued("cherry", Some('c')),
            ],
            vec![],
        );
        feed_all(&mut matcher, &["-abc", "1"]).unwrap();

        assert_eq!(
            matcher.close().unwrap(),
            Matched {
                values: vec![
                    tokens("apple", vec![]),
                    tokens("banana", vec![]),
                    tokens("cherry", vec![(4, "1")]),
                ]
            }
        );
    }

    #[test]
    fn option_short_leading_value() {
        let mut matcher = matcher(vec![valued("cherry", Some('c')), flag("apple", Some('a'))], vec![]);
        assert_eq!(
            matcher.feed("-ca").unwrap_err(),
            MatchError::Undercomplete("cherry".to_string())
        );
    }

    #[test]
    fn option_unmatched() {
        let mut matcher = matcher(vec![flag("flag", Some('f'))], vec![]);
        assert_eq!(
            matcher.feed("--moot").unwrap_err(),
            MatchError::InvalidOption("moot".to_string())
        );
        assert_eq!(
            matcher.feed("-m").unwrap_err(),
            MatchError::InvalidShortOption('m')
        );
    }

    #[rstest]
    #[case("-=junk")]
    #[case("--=junk")]
    #[case("-=")]
    #[case("--=")]
    fn option_unnamed(#[case] token: &str) {
        let mut matcher = matcher(vec![flag("flag", Some('f'))], vec![]);
        assert_eq!(
            matcher.feed(token).unwrap_err(),
            MatchError::InvalidOption(token.to_string())
        );
        assert_eq!(matcher.fed(), token.len());
        assert!(matcher.close().unwrap().values.is_empty());
    }

    #[rstest]
    #[case(Bound::Range(1, 1), vec!["1"], true)]
    #[case(Bound::Range(1, 1), vec![], false)]
    #[case(Bound::Range(0, 1), vec![], true)]
    #[case(Bound::Range(0, 1), vec!["1"], true)]
    #[case(Bound::Lower(0), vec![], true)]
    #[case(Bound::Lower(1), vec![], false)]
    #[case(Bound::Lower(1), vec!["1", "2", "3"], true)]
    fn argument(#[case] bound: Bound, #[case] input: Vec<&str>, #[case] expected_ok: bool) {
        let mut matcher = matcher(vec![], vec![ArgumentConfig::new("item", bound)]);
        feed_all(&mut matcher, &input).unwrap();

        match matcher.close() {
            Ok(matched) => {
                assert!(expected_ok);
                assert_eq!(matched.values.len(), 1);
                assert_eq!(matched.values[0].values.len(), input.len());
            }
            Err((_, error, _)) => {
                assert!(!expected_ok);
                assert_eq!(error, MatchError::Undercomplete("item".to_string()));
            }
        }
    }

    #[test]
    fn argument_exhausted() {
        let mut matcher = matcher(vec![], vec![ArgumentConfig::new("item", Bound::Range(1, 1))]);
        matcher.feed("1").unwrap();
        assert_eq!(
            matcher.feed("2").unwrap_err(),
            MatchError::ArgumentsExhausted
        );
    }

    #[test]
    fn arguments_option_mix() {
        let mut matcher = matcher(
            vec![flag("flag", Some('f'))],
            vec![
                ArgumentConfig::new("a", Bound::Range(1, 1)),
                ArgumentConfig::new("b", Bound::Lower(0)),
            ],
        );
        feed_all(&mut matcher, &["x", "y", "-f", "z"]).unwrap();

        assert_eq!(
            matcher.close().unwrap(),
            Matched {
                values: vec![
                    tokens("a", vec![(0, "x")]),
                    tokens("flag", vec![]),
                    tokens("b", vec![(1, "y"), (4, "z")]),
                ]
            }
        );
    }

    #[rstest]
    #[case(vec!["--", "-f"], "-f")]
    #[case(vec!["--", "--"], "--")]
    #[case(vec!["-"], "-")]
    #[case(vec!["-1"], "-1")]
    #[case(vec!["-2.5"], "-2.5")]
    fn argument_dashes(#[case] input: Vec<&str>, #[case] expected: &str) {
        let mut matcher = matcher(
            vec![flag("flag", Some('f'))],
            vec![ArgumentConfig::new("item", Bound::Range(1, 1))],
        );
        feed_all(&mut matcher, &input).unwrap();

        let matched = matcher.close().unwrap();
        assert_eq!(matched.values[0].values[0].1, expected);
    }

    #[test]
    fn digit_short_option() {
        let mut matcher = matcher(
            vec![flag("one", Some('1'))],
            vec![ArgumentConfig::new("item", Bound::Range(0, 1))],
        );
        matcher.feed("-1").unwrap();

        let matched = matcher.close().unwrap();
        assert!(matched.contains("one"));
    }

    #[test]
    fn ready_for_command() {
        let mut matcher = matcher(
            vec![valued("value", Some('v'))],
            vec![ArgumentConfig::new("a", Bound::Range(1, 1))],
        );
        assert!(!matcher.ready_for_command());
        matcher.feed("x").unwrap();
        assert!(matcher.ready_for_command());
        matcher.feed("-v").unwrap();
        assert!(!matcher.ready_for_command());
        matcher.feed("1").unwrap();
        assert!(matcher.ready_for_command());
        assert_eq!(matcher.fed(), 4);
        assert!(matcher.has_matched("value"));
        // Arguments are only recorded once their buffer flips or closes.
        assert!(!matcher.has_matched("a"));
    }

    #[test]
    fn close_reports_first_error() {
        let matcher = matcher(
            vec![],
            vec![
                ArgumentConfig::new("a", Bound::Range(1, 1)),
                ArgumentConfig::new("b", Bound::Range(1, 1)),
            ],
        );
        let (offset, error, _) = matcher.close().unwrap_err();
        assert_eq!(offset, 0);
        assert_eq!(error, MatchError::Undercomplete("a".to_string()));
    }
}
