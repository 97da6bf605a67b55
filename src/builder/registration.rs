//! Builder for registering a state and its commands.

use crate::core::{CollaboratorError, Command, Params, State};
use crate::engine::{bind, StateObject};
use serde_json::Value;

/// Factory producing a state from the automaton's state parameters.
pub(crate) type StateFactory =
    Box<dyn FnOnce(&Params) -> Result<Box<dyn StateObject>, CollaboratorError>>;

/// Factory producing a command from the merged command parameters.
pub(crate) type CommandFactory<A> =
    Box<dyn FnOnce(&Params) -> Result<Box<dyn Command<A>>, CollaboratorError>>;

pub(crate) struct RegistrationParts<A> {
    pub name: String,
    pub factory: StateFactory,
    pub commands: Vec<(String, CommandFactory<A>)>,
    pub params: Params,
    pub is_start: bool,
}

/// Describes a state to register with a [`Dfa`](crate::engine::Dfa): its
/// name, how to construct it, which commands to import and whether it is
/// the start state.
///
/// Nothing is constructed until the registration is handed to
/// `Dfa::add_state`.
///
/// # Example
///
/// ```rust
/// use stochastic_fsm::builder::StateRegistration;
/// use stochastic_fsm::core::{CollaboratorError, State, WeightTable};
///
/// struct Idle;
///
/// impl State for Idle {
///     fn weights(&self) -> WeightTable {
///         WeightTable::new().with("tick", 1.0)
///     }
/// }
///
/// let registration: StateRegistration<u64> = StateRegistration::new("idle", |_| Ok(Idle))
///     .command("tick", |_| Ok(|n: u64| -> Result<u64, CollaboratorError> { Ok(n + 1) }))
///     .param("verbose", true)
///     .start();
///
/// assert_eq!(registration.name(), "idle");
/// assert!(registration.is_start());
/// ```
pub struct StateRegistration<A> {
    name: String,
    factory: StateFactory,
    commands: Vec<(String, CommandFactory<A>)>,
    params: Params,
    is_start: bool,
}

impl<A: 'static> StateRegistration<A> {
    /// Register state `name`, built by `factory` from the automaton's state
    /// parameters.
    pub fn new<S, F>(name: &str, factory: F) -> Self
    where
        S: State,
        F: FnOnce(&Params) -> Result<S, CollaboratorError> + 'static,
    {
        Self {
            name: name.to_string(),
            factory: Box::new(move |params: &Params| factory(params).map(bind)),
            commands: Vec::new(),
            params: Params::new(),
            is_start: false,
        }
    }

    /// Register a state built with `Default`.
    pub fn of<S: State + Default>(name: &str) -> Self {
        Self::new(name, |_| Ok(S::default()))
    }

    /// Import command `name`, built by `factory` from the command parameters.
    pub fn command<C, F>(mut self, name: &str, factory: F) -> Self
    where
        C: Command<A> + 'static,
        F: FnOnce(&Params) -> Result<C, CollaboratorError> + 'static,
    {
        let factory: CommandFactory<A> = Box::new(move |params: &Params| {
            factory(params).map(|command| Box::new(command) as Box<dyn Command<A>>)
        });
        self.commands.push((name.to_string(), factory));
        self
    }

    /// Import a command built with `Default`.
    pub fn command_default<C>(self, name: &str) -> Self
    where
        C: Command<A> + Default + 'static,
    {
        self.command(name, |_| Ok(C::default()))
    }

    /// Add a command parameter. Command parameters are laid over the
    /// automaton's state parameters.
    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Add several command parameters.
    pub fn params(mut self, params: Params) -> Self {
        self.params.extend(params);
        self
    }

    /// Make this the start state.
    pub fn start(mut self) -> Self {
        self.is_start = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_start(&self) -> bool {
        self.is_start
    }

    /// Names of the commands to import, in import order.
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|(name, _)| name.as_str())
    }

    pub(crate) fn into_parts(self) -> RegistrationParts<A> {
        RegistrationParts {
            name: self.name,
            factory: self.factory,
            commands: self.commands,
            params: self.params,
            is_start: self.is_start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WeightTable;

    #[derive(Default)]
    struct Idle;

    impl State for Idle {
        fn weights(&self) -> WeightTable {
            WeightTable::new().with("tick", 1.0)
        }
    }

    #[derive(Default)]
    struct Tick;

    impl Command<u64> for Tick {
        fn execute(&mut self, input: u64) -> Result<u64, CollaboratorError> {
            Ok(input + 1)
        }
    }

    #[test]
    fn registration_is_not_start_by_default() {
        let registration = StateRegistration::<u64>::of::<Idle>("idle");
        assert!(!registration.is_start());
        assert_eq!(registration.command_names().count(), 0);
    }

    #[test]
    fn commands_keep_import_order() {
        let registration = StateRegistration::<u64>::of::<Idle>("idle")
            .command_default::<Tick>("tick")
            .command("tock", |_| Ok(Tick));

        assert_eq!(
            registration.command_names().collect::<Vec<_>>(),
            vec!["tick", "tock"]
        );
    }

    #[test]
    fn params_accumulate() {
        let mut extra = Params::new();
        extra.insert("b".to_string(), Value::from(2));

        let parts = StateRegistration::<u64>::of::<Idle>("idle")
            .param("a", 1)
            .params(extra)
            .into_parts();

        assert_eq!(parts.params.get("a"), Some(&Value::from(1)));
        assert_eq!(parts.params.get("b"), Some(&Value::from(2)));
    }

    #[test]
    fn factories_run_only_when_invoked() {
        let parts = StateRegistration::<u64>::new("failing", |_| -> Result<Idle, CollaboratorError> {
            Err("not now".into())
        })
        .into_parts();

        let err = (parts.factory)(&Params::new()).err().unwrap();
        assert_eq!(err.to_string(), "not now");
    }

    #[test]
    fn command_factory_receives_params() {
        let parts = StateRegistration::<u64>::of::<Idle>("idle")
            .command("add", |p: &Params| {
                let amount = p.get("amount").and_then(Value::as_u64).unwrap_or(0);
                Ok(move |n: u64| -> Result<u64, CollaboratorError> { Ok(n + amount) })
            })
            .into_parts();

        let mut params = Params::new();
        params.insert("amount".to_string(), Value::from(7));
        let (_, factory) = parts.commands.into_iter().next().unwrap();
        let mut command = factory(&params).unwrap();

        assert_eq!(command.execute(1).unwrap(), 8);
    }
}
