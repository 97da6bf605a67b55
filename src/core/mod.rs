//! Core automaton types.
//!
//! This module contains the collaborator-facing building blocks:
//! - Commands via the `Command` trait
//! - States via the `State` trait, with explicit `Hooks`
//! - Ordered weight tables and weighted selection
//! - State switch history
//!
//! Nothing here drives a run; the engine module owns the run loop.

mod command;
mod history;
mod state;
mod weights;

pub use command::{CollaboratorError, Command, Params};
pub(crate) use command::normalize_name;
pub use history::{StateSwitch, SwitchHistory};
pub use state::{Hooks, PostHook, PreHook, State, Transition};
pub use weights::{SelectionError, WeightTable};
