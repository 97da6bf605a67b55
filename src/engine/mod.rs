//! The automaton engine.
//!
//! This module drives registered states:
//!
//! - **Dfa**: state registry, current-state slot and the step protocol
//!   (choose, pre-hook, execute, post-hook)
//! - **Stop conditions**: count-bounded or duration-bounded runs
//! - **Driver**: runs a `Dfa` on the caller's thread or a dedicated one
//!
//! Steps within one automaton are strictly sequential. Independent
//! automata share nothing and may run concurrently.

mod driver;
mod error;
mod machine;
mod slot;
mod stop;

pub use driver::{Completed, Driver, RunHandle};
pub use error::DfaError;
pub use machine::{Dfa, StepRecord};
pub(crate) use slot::{bind, StateObject};
pub use slot::StateSlot;
pub use stop::StopCondition;
