//! Configuration checks, accumulated with `Validation`.

use crate::core::WeightTable;
use crate::engine::StopCondition;
use crate::validation::violations::{ConfigError, Violations};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of a single configuration check
pub type Check = Validation<(), NonEmptyVec<ConfigError>>;

fn pass() -> Check {
    Validation::success(())
}

fn violation(error: ConfigError) -> Check {
    Validation::fail(error)
}

/// Combine checks, reporting ALL violations if any fail.
pub fn collect(checks: Vec<Check>) -> Result<(), Violations> {
    match Validation::all_vec(checks).map(|_| ()) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(Violations::new(errors.iter().cloned().collect())),
    }
}

/// Exactly one stop condition, and it must be usable.
pub fn check_stop_condition(max_count: Option<u64>, max_duration_secs: Option<f64>) -> Vec<Check> {
    let mut checks = Vec::new();

    match (max_count, max_duration_secs) {
        (None, None) => checks.push(violation(ConfigError::MissingStopCondition)),
        (Some(_), Some(_)) => checks.push(violation(ConfigError::ConflictingStopConditions)),
        _ => checks.push(pass()),
    }

    if max_count == Some(0) {
        checks.push(violation(ConfigError::ZeroMaxCount));
    }

    if let Some(seconds) = max_duration_secs {
        let check = if seconds.is_finite() && seconds > 0.0 {
            pass()
        } else {
            violation(ConfigError::InvalidDuration { seconds })
        };
        checks.push(check);
    }

    checks
}

/// An already-built stop condition must be positive.
pub fn check_stop(stop: StopCondition) -> Vec<Check> {
    let check = match stop {
        StopCondition::MaxCount(0) => violation(ConfigError::ZeroMaxCount),
        StopCondition::MaxDuration(d) if d.is_zero() => {
            violation(ConfigError::InvalidDuration { seconds: 0.0 })
        }
        _ => pass(),
    };
    vec![check]
}

/// Names must be non-empty after normalisation.
pub fn check_name(name: &str) -> Check {
    if name.is_empty() {
        violation(ConfigError::EmptyName)
    } else {
        pass()
    }
}

/// Command names must be distinct within a state.
pub fn check_unique_commands(state: &str, commands: &[String]) -> Vec<Check> {
    commands
        .iter()
        .enumerate()
        .filter(|(i, name)| commands[..*i].contains(*name))
        .map(|(_, name)| {
            violation(ConfigError::DuplicateCommand {
                state: state.to_string(),
                command: name.clone(),
            })
        })
        .collect()
}

/// Every weighted command must be imported, every weight finite and
/// non-negative, and their sum finite.
pub fn check_weights(state: &str, weights: &WeightTable, imported: &[String]) -> Vec<Check> {
    let mut checks = Vec::with_capacity(weights.len());

    for (command, weight) in weights.iter() {
        if !imported.iter().any(|name| name == command) {
            checks.push(violation(ConfigError::CommandNotFound {
                state: state.to_string(),
                command: command.to_string(),
            }));
        }
        if !weight.is_finite() || weight < 0.0 {
            checks.push(violation(ConfigError::InvalidWeight {
                state: state.to_string(),
                command: command.to_string(),
                weight,
            }));
        }
    }

    if weights.iter().all(|(_, w)| w.is_finite()) && !weights.total().is_finite() {
        checks.push(violation(ConfigError::TotalWeightOverflow {
            state: state.to_string(),
        }));
    }

    checks
}
