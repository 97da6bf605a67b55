//! The automaton: state registry, step protocol and run loop.

use crate::builder::StateRegistration;
use crate::core::{normalize_name, Params, StateSwitch, SwitchHistory, Transition};
use crate::engine::error::DfaError;
use crate::engine::slot::StateSlot;
use crate::engine::stop::StopCondition;
use crate::report::RunSummary;
use crate::validation::rules;
use crate::validation::ConfigError;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// What a single step did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepRecord {
    /// Steps completed so far, including this one
    pub step: u64,
    /// State that was current when the step began
    pub state: String,
    /// Command that was selected and executed
    pub command: String,
    /// State switched to by the post-hook, if any
    pub switched_to: Option<String>,
}

/// Weighted, command-executing finite automaton.
///
/// Holds the registered states, the current-state slot, the stop condition
/// and the accumulator threaded between command executions. Exactly one
/// state is current once a start state has been registered.
pub struct Dfa<A> {
    states: Vec<StateSlot<A>>,
    index: HashMap<String, usize>,
    current: Option<usize>,
    stop: StopCondition,
    params: Params,
    accumulator: A,
    rng: StdRng,
    history: SwitchHistory,
    steps: u64,
}

impl<A: Default + 'static> Dfa<A> {
    /// Create an automaton with an entropy-seeded random source and no
    /// state parameters.
    ///
    /// Fails if the stop condition is a zero count or a zero duration.
    pub fn new(stop: StopCondition) -> Result<Self, DfaError> {
        rules::collect(rules::check_stop(stop))?;
        Ok(Self::from_parts(stop, Params::new(), StdRng::from_entropy()))
    }

    /// Callers must have validated `stop`.
    pub(crate) fn from_parts(stop: StopCondition, params: Params, rng: StdRng) -> Self {
        Self {
            states: Vec::new(),
            index: HashMap::new(),
            current: None,
            stop,
            params,
            accumulator: A::default(),
            rng,
            history: SwitchHistory::new(),
            steps: 0,
        }
    }

    /// Register a state and import its commands.
    ///
    /// Registration is all-or-nothing: on error the registry is unchanged.
    /// Names are checked before any factory runs, and the weight table is
    /// checked before any command is instantiated.
    pub fn add_state(&mut self, registration: StateRegistration<A>) -> Result<(), DfaError> {
        let parts = registration.into_parts();
        let name = normalize_name(&parts.name);
        let command_names: Vec<String> = parts
            .commands
            .iter()
            .map(|(command, _)| normalize_name(command))
            .collect();

        let mut checks = vec![rules::check_name(&name)];
        checks.extend(command_names.iter().map(|c| rules::check_name(c)));
        checks.extend(rules::check_unique_commands(&name, &command_names));
        rules::collect(checks)?;

        if self.index.contains_key(&name) {
            return Err(ConfigError::DuplicateState(name).into());
        }
        if parts.is_start {
            if let Some(existing) = self.current_state() {
                return Err(ConfigError::MultipleStartStates {
                    existing: existing.to_string(),
                    requested: name,
                }
                .into());
            }
        }

        let state = (parts.factory)(&self.params).map_err(DfaError::Collaborator)?;
        let weights = state.weights();
        rules::collect(rules::check_weights(&name, &weights, &command_names))?;

        let mut command_params = self.params.clone();
        command_params.extend(parts.params);
        let mut commands = Vec::with_capacity(command_names.len());
        for (command_name, (_, factory)) in command_names.into_iter().zip(parts.commands) {
            let command = factory(&command_params).map_err(DfaError::Collaborator)?;
            commands.push((command_name, command));
        }

        debug!(
            state = %name,
            commands = commands.len(),
            total_weight = weights.total(),
            start = parts.is_start,
            "registered state"
        );

        let slot = StateSlot::assemble(name.clone(), state, weights, commands);
        let position = self.states.len();
        self.states.push(slot);
        self.index.insert(name, position);
        if parts.is_start {
            self.current = Some(position);
        }
        Ok(())
    }

    /// Make `name` the current state.
    ///
    /// Fails with [`DfaError::StateNotFound`] if no such state is registered,
    /// leaving the current state unchanged.
    pub fn switch_to(&mut self, name: &str) -> Result<(), DfaError> {
        let from = self.current.ok_or(DfaError::NotInitialized)?;
        let name = normalize_name(name);
        let target = *self
            .index
            .get(&name)
            .ok_or_else(|| DfaError::StateNotFound(name.clone()))?;

        let from = self.states[from].name().to_string();
        debug!(from = %from, to = %name, step = self.steps, "switching state");
        self.current = Some(target);
        self.history.record(StateSwitch {
            from,
            to: name,
            step: self.steps,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Execute one step: choose, pre-hook, execute, post-hook.
    ///
    /// The post-hook runs on the state that was current when the step began.
    /// A switch it requests is applied after it returns.
    pub fn next_step(&mut self) -> Result<StepRecord, DfaError> {
        let index = self.current.ok_or(DfaError::NotInitialized)?;
        let slot = &mut self.states[index];

        let command = slot.choose(&mut self.rng)?.to_string();
        trace!(state = slot.name(), command = %command, step = self.steps + 1, "step");

        slot.run_pre(&command)?;
        let input = std::mem::take(&mut self.accumulator);
        self.accumulator = slot.execute(&command, input)?;
        let transition = slot.run_post(&command)?;
        let state = slot.name().to_string();

        self.steps += 1;
        let switched_to = match transition {
            Transition::Stay => None,
            Transition::SwitchTo(target) => {
                self.switch_to(&target)?;
                Some(normalize_name(&target))
            }
        };

        Ok(StepRecord {
            step: self.steps,
            state,
            command,
            switched_to,
        })
    }

    /// Run until the stop condition is met.
    ///
    /// Fails with [`DfaError::NotInitialized`] before any step if no start
    /// state was registered. Any collaborator fault aborts the run and is
    /// returned as-is.
    pub fn drive(&mut self) -> Result<RunSummary, DfaError> {
        if self.current.is_none() {
            return Err(DfaError::NotInitialized);
        }

        let switches_before = self.history.len();
        let mut summary = RunSummary::begin(self.stop);
        info!(run_id = %summary.id, stop = %self.stop, "run started");

        match self.stop {
            StopCondition::MaxCount(max) => {
                for _ in 0..max {
                    let record = self.logged_step(&summary)?;
                    summary.observe(&record);
                }
            }
            StopCondition::MaxDuration(max) => {
                let started = Instant::now();
                while started.elapsed() < max {
                    let record = self.logged_step(&summary)?;
                    summary.observe(&record);
                }
            }
        }

        let final_state = self.current_state().unwrap_or_default().to_string();
        let summary = summary.finish(final_state, self.history.since(switches_before));
        info!(
            run_id = %summary.id,
            steps = summary.steps,
            switches = summary.switches.len(),
            final_state = %summary.final_state,
            "run finished"
        );
        Ok(summary)
    }

    fn logged_step(&mut self, summary: &RunSummary) -> Result<StepRecord, DfaError> {
        self.next_step().inspect_err(|err| {
            warn!(
                run_id = %summary.id,
                step = self.steps + 1,
                error = %err,
                "run aborted"
            );
        })
    }
}

impl<A> Dfa<A> {
    /// Name of the current state, if a start state has been registered.
    pub fn current_state(&self) -> Option<&str> {
        self.current.map(|i| self.states[i].name())
    }

    /// Names of all registered states, in registration order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(StateSlot::name)
    }

    /// Read-only view of a registered state.
    pub fn state(&self, name: &str) -> Option<&StateSlot<A>> {
        self.index
            .get(&normalize_name(name))
            .map(|&i| &self.states[i])
    }

    pub fn stop_condition(&self) -> StopCondition {
        self.stop
    }

    /// The value returned by the most recently executed command.
    pub fn accumulator(&self) -> &A {
        &self.accumulator
    }

    pub fn into_accumulator(self) -> A {
        self.accumulator
    }

    /// Every switch applied since the automaton was created.
    pub fn history(&self) -> &SwitchHistory {
        &self.history
    }

    /// Steps completed since the automaton was created.
    pub fn steps_executed(&self) -> u64 {
        self.steps
    }
}

impl<A> fmt::Debug for Dfa<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dfa")
            .field("states", &self.states)
            .field("current", &self.current_state())
            .field("stop", &self.stop)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}
