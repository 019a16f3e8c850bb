use thiserror::Error;

use crate::matcher::{Bound, OffsetValue};

impl Bound {
    pub(crate) fn lower(&self) -> u8 {
        match self {
            Bound::Range(lower, _) | Bound::Lower(lower) => *lower,
        }
    }

    pub(crate) fn upper(&self) -> Option<u8> {
        match self {
            Bound::Range(_, upper) => Some(*upper),
            Bound::Lower(_) => None,
        }
    }
}

/// The raw tokens matched to a single parameter (or to a single occurrence of an option).
#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) struct MatchTokens {
    pub name: String,
    pub values: Vec<OffsetValue>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum CloseError {
    #[error("too few values provided for '{name}' (provided={provided}, expected={expected}).")]
    TooFewValues {
        name: String,
        provided: usize,
        expected: u8,
    },

    #[error("too many values provided for '{name}' (provided={provided}, expected={expected}).")]
    TooManyValues {
        name: String,
        provided: usize,
        expected: u8,
    },
}

#[derive(Debug)]
pub(crate) struct MatchBuffer {
    name: String,
    bound: Bound,
    values: Vec<OffsetValue>,
}

impl MatchBuffer {
    pub(crate) fn new(name: impl Into<String>, bound: Bound) -> Self {
        Self {
            name: name.into(),
            bound,
            values: Vec::default(),
        }
    }

    pub(crate) fn push(&mut self, offset: usize, value: impl Into<String>) {
        self.values.push((offset, value.into()));
    }

    /// Whether the buffer may take another value.
    pub(crate) fn is_open(&self) -> bool {
        match self.bound.upper() {
            Some(upper) => self.values.len() < upper as usize,
            None => true,
        }
    }

    /// Whether the buffer has taken enough values.
    pub(crate) fn can_close(&self) -> bool {
        self.values.len() >= self.bound.lower() as usize
    }

    pub(crate) fn close(self) -> Result<MatchTokens, CloseError> {
        let provided = self.values.len();

        if !self.can_close() {
            return Err(CloseError::TooFewValues {
                name: self.name,
                provided,
                expected: self.bound.lower(),
            });
        }

        if let Some(upper) = self.bound.upper() {
            if provided > upper as usize {
                return Err(CloseError::TooManyValues {
                    name: self.name,
                    provided,
                    expected: upper,
                });
            }
        }

        Ok(MatchTokens {
            name: self.name,
            values: self.values,
        })
    }
}
