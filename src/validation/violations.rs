//! Configuration violations.

use std::fmt;
use thiserror::Error;

/// Errors detected while configuring an automaton.
///
/// These are collected rather than reported one at a time, so a single
/// failed registration lists every problem it found.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("No stop condition configured: set either max_count or max_duration")]
    MissingStopCondition,

    #[error("Both max_count and max_duration configured: set exactly one")]
    ConflictingStopConditions,

    #[error("max_count must be positive")]
    ZeroMaxCount,

    #[error("max_duration must be a positive, finite number of seconds (got {seconds})")]
    InvalidDuration { seconds: f64 },

    #[error("State and command names must not be empty")]
    EmptyName,

    #[error("State '{0}' is already registered")]
    DuplicateState(String),

    #[error("Command '{command}' is imported more than once into state '{state}'")]
    DuplicateCommand { state: String, command: String },

    #[error("State '{requested}' cannot be the start state: '{existing}' already is")]
    MultipleStartStates { existing: String, requested: String },

    #[error("Weighted command '{command}' not found in state '{state}'")]
    CommandNotFound { state: String, command: String },

    #[error("Weight {weight} for command '{command}' in state '{state}' must be finite and non-negative")]
    InvalidWeight {
        state: String,
        command: String,
        weight: f64,
    },

    #[error("Total weight of state '{state}' overflows")]
    TotalWeightOverflow { state: String },
}

/// Every violation found by one validation pass, in detection order.
#[derive(Debug, Clone, PartialEq)]
pub struct Violations(Vec<ConfigError>);

impl Violations {
    pub(crate) fn new(errors: Vec<ConfigError>) -> Self {
        Self(errors)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, error: &ConfigError) -> bool {
        self.0.contains(error)
    }

    pub fn into_vec(self) -> Vec<ConfigError> {
        self.0
    }
}

impl From<ConfigError> for Violations {
    fn from(error: ConfigError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_all_violations() {
        let violations = Violations::new(vec![
            ConfigError::ZeroMaxCount,
            ConfigError::DuplicateState("s1".to_string()),
        ]);

        assert_eq!(
            violations.to_string(),
            "max_count must be positive; State 's1' is already registered"
        );
    }

    #[test]
    fn single_error_converts() {
        let violations = Violations::from(ConfigError::EmptyName);
        assert_eq!(violations.len(), 1);
        assert!(violations.contains(&ConfigError::EmptyName));
    }
}
