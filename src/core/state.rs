//! Collaborator-facing State trait and per-command hooks.
//!
//! A state declares the weights of its commands and, optionally, a set of
//! hooks bound to command names. Hooks are registered explicitly in a
//! [`Hooks`] map; the engine never probes for methods by name.

use crate::core::command::{normalize_name, CollaboratorError};
use crate::core::weights::WeightTable;
use std::collections::HashMap;
use std::fmt;

/// Outcome of a post-hook.
///
/// Post-hooks are the only place a state switch can be requested. The
/// automaton applies the request after the hook returns, so it only affects
/// subsequent steps.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Transition {
    /// Remain in the current state
    #[default]
    Stay,

    /// Switch to the named state before the next step
    SwitchTo(String),
}

impl Transition {
    /// Request a switch to `name`.
    pub fn to(name: impl Into<String>) -> Self {
        Transition::SwitchTo(name.into())
    }
}

/// Hook run before a command executes.
pub type PreHook<S> = Box<dyn Fn(&mut S) -> Result<(), CollaboratorError> + Send>;

/// Hook run after a command executes; may request a state switch.
pub type PostHook<S> = Box<dyn Fn(&mut S) -> Result<Transition, CollaboratorError> + Send>;

/// Explicit mapping from command name to pre/post hooks for a state type.
///
/// # Example
///
/// ```rust
/// use stochastic_fsm::core::{Hooks, Transition};
///
/// struct Idle {
///     visits: u32,
/// }
///
/// let hooks = Hooks::<Idle>::new()
///     .before("poll", |s| {
///         s.visits += 1;
///         Ok(())
///     })
///     .after("poll", |s| {
///         Ok(if s.visits > 3 { Transition::to("busy") } else { Transition::Stay })
///     });
///
/// assert!(hooks.pre("poll").is_some());
/// assert!(hooks.post("sleep").is_none());
/// ```
pub struct Hooks<S> {
    pre: HashMap<String, PreHook<S>>,
    post: HashMap<String, PostHook<S>>,
}

impl<S> Hooks<S> {
    pub fn new() -> Self {
        Self {
            pre: HashMap::new(),
            post: HashMap::new(),
        }
    }

    /// Register a pre-hook for `command`, replacing any existing one.
    pub fn before<F>(mut self, command: &str, hook: F) -> Self
    where
        F: Fn(&mut S) -> Result<(), CollaboratorError> + Send + 'static,
    {
        self.pre.insert(normalize_name(command), Box::new(hook));
        self
    }

    /// Register a post-hook for `command`, replacing any existing one.
    pub fn after<F>(mut self, command: &str, hook: F) -> Self
    where
        F: Fn(&mut S) -> Result<Transition, CollaboratorError> + Send + 'static,
    {
        self.post.insert(normalize_name(command), Box::new(hook));
        self
    }

    /// Pre-hook bound to `command`, if any.
    pub fn pre(&self, command: &str) -> Option<&PreHook<S>> {
        self.pre.get(command)
    }

    /// Post-hook bound to `command`, if any.
    pub fn post(&self, command: &str) -> Option<&PostHook<S>> {
        self.post.get(command)
    }
}

impl<S> Default for Hooks<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Hooks<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pre: Vec<&str> = self.pre.keys().map(String::as_str).collect();
        let mut post: Vec<&str> = self.post.keys().map(String::as_str).collect();
        pre.sort_unstable();
        post.sort_unstable();
        f.debug_struct("Hooks")
            .field("pre", &pre)
            .field("post", &post)
            .finish()
    }
}

/// Trait for automaton states supplied by collaborators.
///
/// A state owns whatever data its hooks need. The weight table is read once
/// when the state is registered; its keys must name commands imported into
/// the state.
///
/// # Example
///
/// ```rust
/// use stochastic_fsm::core::{Hooks, State, Transition, WeightTable};
///
/// struct Browsing;
///
/// impl State for Browsing {
///     fn weights(&self) -> WeightTable {
///         WeightTable::new().with("view", 3.0).with("checkout", 1.0)
///     }
///
///     fn hooks(&self) -> Hooks<Self> {
///         Hooks::new().after("checkout", |_| Ok(Transition::to("paying")))
///     }
/// }
///
/// assert_eq!(Browsing.weights().total(), 4.0);
/// ```
pub trait State: Send + 'static {
    /// Selection weights for this state's commands.
    fn weights(&self) -> WeightTable;

    /// Hooks bound to this state's commands.
    ///
    /// Default implementation registers no hooks.
    fn hooks(&self) -> Hooks<Self>
    where
        Self: Sized,
    {
        Hooks::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        before: u32,
        after: u32,
    }

    impl State for Counter {
        fn weights(&self) -> WeightTable {
            WeightTable::new().with("tick", 1.0)
        }

        fn hooks(&self) -> Hooks<Self> {
            Hooks::new()
                .before("tick", |s: &mut Counter| {
                    s.before += 1;
                    Ok(())
                })
                .after("Tick", |s: &mut Counter| {
                    s.after += 1;
                    Ok(Transition::to("done"))
                })
        }
    }

    struct Bare;

    impl State for Bare {
        fn weights(&self) -> WeightTable {
            WeightTable::new()
        }
    }

    #[test]
    fn hooks_are_looked_up_by_normalized_name() {
        let state = Counter {
            before: 0,
            after: 0,
        };
        let hooks = state.hooks();

        assert!(hooks.pre("tick").is_some());
        assert!(hooks.post("tick").is_some());
        assert!(hooks.pre("tock").is_none());
    }

    #[test]
    fn hooks_mutate_state() {
        let mut state = Counter {
            before: 0,
            after: 0,
        };
        let hooks = state.hooks();

        let pre = hooks.pre("tick").unwrap();
        pre(&mut state).unwrap();
        let post = hooks.post("tick").unwrap();
        let transition = post(&mut state).unwrap();

        assert_eq!(state.before, 1);
        assert_eq!(state.after, 1);
        assert_eq!(transition, Transition::SwitchTo("done".to_string()));
    }

    #[test]
    fn default_hooks_are_empty() {
        let hooks = Bare.hooks();
        assert!(hooks.pre("anything").is_none());
        assert!(hooks.post("anything").is_none());
    }

    #[test]
    fn transition_defaults_to_stay() {
        assert_eq!(Transition::default(), Transition::Stay);
    }

    #[test]
    fn debug_lists_hooked_commands() {
        let hooks = Hooks::<Bare>::new()
            .before("b", |_| Ok(()))
            .before("a", |_| Ok(()));
        assert_eq!(format!("{hooks:?}"), r#"Hooks { pre: ["a", "b"], post: [] }"#);
    }
}
