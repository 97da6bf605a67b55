//! Registered states: imported commands, weights and bound hooks.

use crate::core::{normalize_name, CollaboratorError, Command, Hooks, SelectionError, State, Transition, WeightTable};
use crate::engine::error::DfaError;
use crate::validation::ConfigError;
use rand::Rng;
use std::collections::HashMap;
use std::fmt;

/// Type-erased collaborator state together with its hooks.
pub(crate) trait StateObject: Send {
    fn weights(&self) -> WeightTable;
    fn has_pre(&self, command: &str) -> bool;
    fn has_post(&self, command: &str) -> bool;
    fn run_pre(&mut self, command: &str) -> Option<Result<(), CollaboratorError>>;
    fn run_post(&mut self, command: &str) -> Option<Result<Transition, CollaboratorError>>;
}

struct Bound<S: State> {
    state: S,
    hooks: Hooks<S>,
}

impl<S: State> StateObject for Bound<S> {
    fn weights(&self) -> WeightTable {
        self.state.weights()
    }

    fn has_pre(&self, command: &str) -> bool {
        self.hooks.pre(command).is_some()
    }

    fn has_post(&self, command: &str) -> bool {
        self.hooks.post(command).is_some()
    }

    fn run_pre(&mut self, command: &str) -> Option<Result<(), CollaboratorError>> {
        self.hooks.pre(command).map(|hook| hook(&mut self.state))
    }

    fn run_post(&mut self, command: &str) -> Option<Result<Transition, CollaboratorError>> {
        self.hooks.post(command).map(|hook| hook(&mut self.state))
    }
}

/// Bind a state to the hooks it declares.
pub(crate) fn bind<S: State>(state: S) -> Box<dyn StateObject> {
    let hooks = state.hooks();
    Box::new(Bound { state, hooks })
}

struct CommandEntry<A> {
    command: Box<dyn Command<A>>,
    weight: f64,
}

/// A state registered with an automaton.
///
/// Holds the imported commands, the validated weight table and the
/// collaborator's state object. Read-only once registered; only the
/// automaton drives it.
pub struct StateSlot<A> {
    name: String,
    weights: WeightTable,
    total_weight: f64,
    order: Vec<String>,
    commands: HashMap<String, CommandEntry<A>>,
    state: Box<dyn StateObject>,
}

impl<A> StateSlot<A> {
    /// Assemble a slot from already validated parts.
    ///
    /// Each weight is copied onto its command exactly once; commands absent
    /// from the table keep weight zero.
    pub(crate) fn assemble(
        name: String,
        state: Box<dyn StateObject>,
        weights: WeightTable,
        commands: Vec<(String, Box<dyn Command<A>>)>,
    ) -> Self {
        let mut order = Vec::with_capacity(commands.len());
        let mut entries = HashMap::with_capacity(commands.len());
        for (command_name, command) in commands {
            let weight = weights.get(&command_name).unwrap_or(0.0);
            order.push(command_name.clone());
            entries.insert(command_name, CommandEntry { command, weight });
        }

        Self {
            name,
            total_weight: weights.total(),
            weights,
            order,
            commands: entries,
            state,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The weight table, in declaration order.
    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Imported command names, in import order.
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Weight assigned to an imported command.
    pub fn command_weight(&self, command: &str) -> Option<f64> {
        self.commands
            .get(&normalize_name(command))
            .map(|entry| entry.weight)
    }

    /// Whether `command` was imported into this state.
    pub fn has_command(&self, command: &str) -> bool {
        self.commands.contains_key(&normalize_name(command))
    }

    pub fn has_pre_hook(&self, command: &str) -> bool {
        self.state.has_pre(command)
    }

    pub fn has_post_hook(&self, command: &str) -> bool {
        self.state.has_post(command)
    }

    pub(crate) fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&str, SelectionError> {
        self.weights.choose(rng)
    }

    pub(crate) fn run_pre(&mut self, command: &str) -> Result<(), DfaError> {
        match self.state.run_pre(command) {
            Some(result) => result.map_err(DfaError::Collaborator),
            None => Ok(()),
        }
    }

    pub(crate) fn execute(&mut self, command: &str, input: A) -> Result<A, DfaError> {
        let entry = self
            .commands
            .get_mut(command)
            .ok_or_else(|| ConfigError::CommandNotFound {
                state: self.name.clone(),
                command: command.to_string(),
            })?;
        entry.command.execute(input).map_err(DfaError::Collaborator)
    }

    pub(crate) fn run_post(&mut self, command: &str) -> Result<Transition, DfaError> {
        match self.state.run_post(command) {
            Some(result) => result.map_err(DfaError::Collaborator),
            None => Ok(Transition::Stay),
        }
    }
}

impl<A> fmt::Debug for StateSlot<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSlot")
            .field("name", &self.name)
            .field("weights", &self.weights)
            .field("total_weight", &self.total_weight)
            .field("commands", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<String>>>;

    struct Watched {
        log: Log,
    }

    impl State for Watched {
        fn weights(&self) -> WeightTable {
            WeightTable::new().with("go", 1.0)
        }

        fn hooks(&self) -> Hooks<Self> {
            Hooks::new()
                .before("go", |s: &mut Watched| {
                    s.log.lock().unwrap().push("before".to_string());
                    Ok(())
                })
                .after("go", |s: &mut Watched| {
                    s.log.lock().unwrap().push("after".to_string());
                    Ok(Transition::to("elsewhere"))
                })
        }
    }

    fn slot(log: &Log) -> StateSlot<u32> {
        let command_log = Arc::clone(log);
        let go = move |n: u32| -> Result<u32, CollaboratorError> {
            command_log.lock().unwrap().push("execute".to_string());
            Ok(n + 1)
        };
        let idle = |n: u32| -> Result<u32, CollaboratorError> { Ok(n) };

        let state = bind(Watched {
            log: Arc::clone(log),
        });
        let weights = state.weights();
        StateSlot::assemble(
            "watched".to_string(),
            state,
            weights,
            vec![
                ("go".to_string(), Box::new(go) as Box<dyn Command<u32>>),
                ("idle".to_string(), Box::new(idle) as Box<dyn Command<u32>>),
            ],
        )
    }

    #[test]
    fn weights_are_copied_onto_commands() {
        let log = Log::default();
        let slot = slot(&log);

        assert_eq!(slot.command_weight("go"), Some(1.0));
        assert_eq!(slot.command_weight("idle"), Some(0.0));
        assert_eq!(slot.command_weight("missing"), None);
        assert_eq!(slot.total_weight(), 1.0);
        assert_eq!(slot.command_names().collect::<Vec<_>>(), vec!["go", "idle"]);
    }

    #[test]
    fn command_lookup_by_name() {
        let log = Log::default();
        let slot = slot(&log);

        assert!(slot.has_command("go"));
        assert!(slot.has_command(" IDLE "));
        assert!(!slot.has_command("missing"));
        assert_eq!(slot.command_weight("Go"), Some(1.0));
    }

    #[test]
    fn unweighted_command_is_never_chosen() {
        let log = Log::default();
        let slot = slot(&log);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..100 {
            assert_eq!(slot.choose(&mut rng), Ok("go"));
        }
    }

    #[test]
    fn hooks_and_command_run_through_slot() {
        let log = Log::default();
        let mut slot = slot(&log);

        slot.run_pre("go").unwrap();
        let out = slot.execute("go", 1).unwrap();
        let transition = slot.run_post("go").unwrap();

        assert_eq!(out, 2);
        assert_eq!(transition, Transition::to("elsewhere"));
        assert_eq!(*log.lock().unwrap(), vec!["before", "execute", "after"]);
    }

    #[test]
    fn missing_hooks_are_not_errors() {
        let log = Log::default();
        let mut slot = slot(&log);

        assert!(!slot.has_pre_hook("idle"));
        slot.run_pre("idle").unwrap();
        assert_eq!(slot.run_post("idle").unwrap(), Transition::Stay);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn unknown_command_is_reported() {
        let log = Log::default();
        let mut slot = slot(&log);

        let err = slot.execute("nope", 0).unwrap_err();
        assert!(err.has_violation(&ConfigError::CommandNotFound {
            state: "watched".to_string(),
            command: "nope".to_string(),
        }));
    }
}
