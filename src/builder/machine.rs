//! Builder for constructing automata.

use crate::builder::registration::StateRegistration;
use crate::core::Params;
use crate::engine::{Dfa, DfaError, StopCondition};
use crate::validation::{rules, ConfigError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use std::time::Duration;

/// Builder for constructing automata with a fluent API.
///
/// Exactly one of [`max_count`](Self::max_count) and
/// [`max_duration`](Self::max_duration) must be set.
pub struct DfaBuilder<A> {
    max_count: Option<u64>,
    max_duration_secs: Option<f64>,
    params: Params,
    seed: Option<u64>,
    states: Vec<StateRegistration<A>>,
}

impl<A: Default + 'static> DfaBuilder<A> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            max_count: None,
            max_duration_secs: None,
            params: Params::new(),
            seed: None,
            states: Vec::new(),
        }
    }

    /// Stop after exactly `n` steps.
    pub fn max_count(mut self, n: u64) -> Self {
        self.max_count = Some(n);
        self
    }

    /// Stop once `duration` has elapsed, checked between steps.
    pub fn max_duration(mut self, duration: Duration) -> Self {
        self.max_duration_secs = Some(duration.as_secs_f64());
        self
    }

    /// Stop once `seconds` have elapsed, checked between steps.
    pub fn max_duration_secs(mut self, seconds: f64) -> Self {
        self.max_duration_secs = Some(seconds);
        self
    }

    /// Add a state parameter, passed to every state factory and used as the
    /// base of every command's parameters.
    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Add several state parameters.
    pub fn params(mut self, params: Params) -> Self {
        self.params.extend(params);
        self
    }

    /// Seed the random source so runs are reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Register a state when the automaton is built.
    pub fn state(mut self, registration: StateRegistration<A>) -> Self {
        self.states.push(registration);
        self
    }

    /// Build the automaton.
    ///
    /// All stop condition violations are reported together. States are then
    /// registered in the order they were added.
    pub fn build(self) -> Result<Dfa<A>, DfaError> {
        rules::collect(rules::check_stop_condition(
            self.max_count,
            self.max_duration_secs,
        ))?;

        let stop = match (self.max_count, self.max_duration_secs) {
            (Some(n), None) => StopCondition::MaxCount(n),
            (None, Some(seconds)) => Duration::try_from_secs_f64(seconds)
                .map(StopCondition::MaxDuration)
                .map_err(|_| ConfigError::InvalidDuration { seconds })?,
            (None, None) => return Err(ConfigError::MissingStopCondition.into()),
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingStopConditions.into()),
        };

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut dfa = Dfa::from_parts(stop, self.params, rng);
        for registration in self.states {
            dfa.add_state(registration)?;
        }
        Ok(dfa)
    }
}

impl<A: Default + 'static> Default for DfaBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CollaboratorError, State, WeightTable};

    struct Coin;

    impl State for Coin {
        fn weights(&self) -> WeightTable {
            WeightTable::new().with("heads", 1.0).with("tails", 1.0)
        }
    }

    fn record(side: &'static str) -> impl FnMut(Vec<&'static str>) -> Result<Vec<&'static str>, CollaboratorError> + Send {
        move |mut seen| {
            seen.push(side);
            Ok(seen)
        }
    }

    fn coin() -> StateRegistration<Vec<&'static str>> {
        StateRegistration::new("coin", |_| Ok(Coin))
            .command("heads", |_| Ok(record("heads")))
            .command("tails", |_| Ok(record("tails")))
            .start()
    }

    #[test]
    fn builder_requires_stop_condition() {
        let result = DfaBuilder::<()>::new().build();
        assert!(result
            .unwrap_err()
            .has_violation(&ConfigError::MissingStopCondition));
    }

    #[test]
    fn builder_rejects_both_stop_conditions() {
        let result = DfaBuilder::<()>::new()
            .max_count(10)
            .max_duration(Duration::from_secs(1))
            .build();

        assert!(result
            .unwrap_err()
            .has_violation(&ConfigError::ConflictingStopConditions));
    }

    #[test]
    fn builder_rejects_zero_duration() {
        let result = DfaBuilder::<()>::new().max_duration(Duration::ZERO).build();
        assert!(result
            .unwrap_err()
            .has_violation(&ConfigError::InvalidDuration { seconds: 0.0 }));
    }

    #[test]
    fn builder_sets_stop_condition() {
        let dfa = DfaBuilder::<()>::new().max_duration_secs(0.25).build().unwrap();
        assert_eq!(
            dfa.stop_condition(),
            StopCondition::MaxDuration(Duration::from_millis(250))
        );
    }

    #[test]
    fn builder_registers_states() {
        let dfa = DfaBuilder::new().max_count(3).state(coin()).build().unwrap();

        assert_eq!(dfa.current_state(), Some("coin"));
        assert_eq!(dfa.state("coin").unwrap().total_weight(), 2.0);
    }

    #[test]
    fn seeded_builds_are_reproducible() {
        let run = || {
            let mut dfa = DfaBuilder::new()
                .max_count(50)
                .seed(1234)
                .state(coin())
                .build()
                .unwrap();
            dfa.drive().unwrap();
            dfa.into_accumulator()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn state_params_are_forwarded() {
        let dfa = DfaBuilder::<u64>::new()
            .max_count(1)
            .param("mode", "fast")
            .state(
                StateRegistration::new("only", |p: &Params| {
                    if p.get("mode") == Some(&Value::from("fast")) {
                        Ok(Coin)
                    } else {
                        Err("missing mode".into())
                    }
                })
                .command_default::<Noop>("heads")
                .command_default::<Noop>("tails")
                .start(),
            )
            .build();

        assert!(dfa.is_ok());
    }

    #[derive(Default)]
    struct Noop;

    impl crate::core::Command<u64> for Noop {
        fn execute(&mut self, input: u64) -> Result<u64, CollaboratorError> {
            Ok(input)
        }
    }
}
