mod core;
mod model;

pub(crate) use self::core::*;
pub(crate) use self::model::*;

use crate::api::{ArgumentElement, OptionElement};

pub(crate) type OffsetValue = (usize, String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Bound {
    Range(u8, u8),
    Lower(u8),
}

#[cfg(test)]
impl rand::distributions::Distribution<Bound> for rand::distributions::Standard {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Bound {
        match rng.gen_range(0..2) {
            0 => {
                let upper: u8 = rng.gen();

                if upper == 0 {
                    Bound::Range(0, upper)
                } else {
                    Bound::Range(rng.gen_range(0..upper), upper)
                }
            }
            1 => Bound::Lower(rng.gen()),
            _ => unreachable!("internal error - impossible gen_range()"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ArgumentConfig {
    name: String,
    bound: Bound,
}

impl ArgumentConfig {
    pub(crate) fn new(name: impl Into<String>, bound: Bound) -> Self {
        Self {
            name: name.into(),
            bound,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn bound(&self) -> Bound {
        self.bound
    }
}

impl From<&ArgumentElement> for ArgumentConfig {
    fn from(value: &ArgumentElement) -> Self {
        let bound = match (value.is_repeated(), value.is_optional()) {
            (false, false) => Bound::Range(1, 1),
            (false, true) => Bound::Range(0, 1),
            (true, false) => Bound::Lower(1),
            (true, true) => Bound::Lower(0),
        };

        ArgumentConfig::new(value.name(), bound)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptionConfig {
    name: String,
    aliases: Vec<String>,
    short: Option<char>,
    bound: Bound,
    repeated: bool,
}

impl OptionConfig {
    pub(crate) fn new(
        name: impl Into<String>,
        short: Option<char>,
        bound: Bound,
        repeated: bool,
    ) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::default(),
            short,
            bound,
            repeated,
        }
    }

    pub(crate) fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub(crate) fn short(&self) -> Option<char> {
        self.short
    }

    pub(crate) fn bound(&self) -> Bound {
        self.bound
    }

    pub(crate) fn repeated(&self) -> bool {
        self.repeated
    }
}

impl From<&OptionElement> for OptionConfig {
    fn from(value: &OptionElement) -> Self {
        // Each occurrence of an option takes precisely 0 (flag) or 1 value.
        let bound = if value.is_flag() {
            Bound::Range(0, 0)
        } else {
            Bound::Range(1, 1)
        };

        OptionConfig::new(value.name(), value.short(), bound, value.is_repeated())
            .with_aliases(value.aliases().to_vec())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Matched {
    pub values: Vec<MatchTokens>,
}

impl Matched {
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.values.iter().any(|mt| mt.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Parameter;
    use crate::model::ValueType;
    use crate::{Command, OptionArgument};
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    #[test]
    fn argument_config() {
        let name = "name";

        for _ in 0..100 {
            let bound: Bound = thread_rng().gen();
            let config = ArgumentConfig::new(name, bound);
            assert_eq!(config.name(), name);
            assert_eq!(config.bound(), bound);
        }
    }

    #[rstest]
    #[case(None)]
    #[case(Some('n'))]
    fn option_config(#[case] short: Option<char>) {
        let name = "name";

        for _ in 0..100 {
            let bound: Bound = thread_rng().gen();
            let repeated: bool = thread_rng().gen();
            let config = OptionConfig::new(name, short, bound, repeated);
            assert_eq!(config.name(), name);
            assert_eq!(config.short(), short);
            assert_eq!(config.bound(), bound);
            assert_eq!(config.repeated(), repeated);
            assert!(config.aliases().is_empty());
        }
    }

    #[rstest]
    #[case(Parameter::argument("a", ValueType::Integer), Bound::Range(1, 1))]
    #[case(Parameter::argument("a", ValueType::Integer).default(1), Bound::Range(0, 1))]
    #[case(Parameter::argument("a", ValueType::Integer).repeated(), Bound::Lower(1))]
    #[case(Parameter::argument("a", ValueType::Integer).repeated().default(1), Bound::Lower(0))]
    fn from_argument(#[case] parameter: Parameter, #[case] expected: Bound) {
        let command = Command::new("program").add(parameter).unwrap();
        let config = ArgumentConfig::from(&command.arguments()[0]);
        assert_eq!(config, ArgumentConfig::new("a", expected));
    }

    #[test]
    fn from_option() {
        let command = Command::new("program")
            .add(Parameter::option("flag", Some('f')).alias("flg"))
            .unwrap()
            .add(
                Parameter::option("level", None)
                    .value(OptionArgument::new("LEVEL", ValueType::Integer))
                    .repeated(),
            )
            .unwrap();

        assert_eq!(
            OptionConfig::from(&command.options()[0]),
            OptionConfig::new("flag", Some('f'), Bound::Range(0, 0), false)
                .with_aliases(vec!["flg".to_string()])
        );
        assert_eq!(
            OptionConfig::from(&command.options()[1]),
            OptionConfig::new("level", None, Bound::Range(1, 1), true)
        );
    }
}
