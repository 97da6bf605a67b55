//! Errors surfaced by the automaton and its driver.

use crate::core::{CollaboratorError, SelectionError};
use crate::validation::{ConfigError, Violations};
use thiserror::Error;

/// Errors that can occur while configuring or running an automaton
#[derive(Debug, Error)]
pub enum DfaError {
    #[error("Invalid configuration: {0}")]
    Config(Violations),

    #[error("No start state assigned. Register a state with .start() before driving")]
    NotInitialized,

    #[error("State '{0}' not found")]
    StateNotFound(String),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// A command, hook or factory failed. The original error is passed
    /// through untouched.
    #[error(transparent)]
    Collaborator(CollaboratorError),

    #[error("Failed to spawn driver thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Driver thread panicked")]
    WorkerPanicked,
}

impl DfaError {
    /// Configuration violations carried by this error, if any.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Config(violations) => Some(violations),
            _ => None,
        }
    }

    /// Whether this is a configuration error containing `error`.
    pub fn has_violation(&self, error: &ConfigError) -> bool {
        self.violations().is_some_and(|v| v.contains(error))
    }
}

impl From<Violations> for DfaError {
    fn from(violations: Violations) -> Self {
        Self::Config(violations)
    }
}

impl From<ConfigError> for DfaError {
    fn from(error: ConfigError) -> Self {
        Self::Config(Violations::from(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaborator_errors_are_transparent() {
        let err = DfaError::Collaborator("socket closed".into());
        assert_eq!(err.to_string(), "socket closed");
    }

    #[test]
    fn config_error_lists_violations() {
        let err = DfaError::from(ConfigError::ZeroMaxCount);
        assert!(err.has_violation(&ConfigError::ZeroMaxCount));
        assert_eq!(
            err.to_string(),
            "Invalid configuration: max_count must be positive"
        );
    }

    #[test]
    fn selection_errors_convert() {
        let err: DfaError = SelectionError::ZeroTotalWeight.into();
        assert!(matches!(
            err,
            DfaError::Selection(SelectionError::ZeroTotalWeight)
        ));
    }
}
