//! Stochastic FSM: a weighted, command-executing finite automaton driver
//!
//! An automaton holds a set of named states. Each state offers a pool of
//! commands chosen at random by weight, with optional hooks around each
//! command. Every step threads an accumulator from one command's output to
//! the next command's input, and the run ends after a fixed number of steps
//! or once a wall-clock duration has elapsed.
//!
//! # Core Concepts
//!
//! - **Command**: a named unit of work transforming the accumulator
//! - **State**: a weight table over its commands, plus explicit `Hooks`
//! - **Dfa**: the state registry, the current state and the run loop
//! - **Driver**: runs a `Dfa` on the caller's thread or its own
//!
//! # Example
//!
//! ```rust
//! use stochastic_fsm::core::{CollaboratorError, Hooks, State, Transition, WeightTable};
//! use stochastic_fsm::{weights, DfaBuilder, StateRegistration};
//!
//! struct S1;
//!
//! impl State for S1 {
//!     fn weights(&self) -> WeightTable {
//!         weights! { c2: 1, c3: 1 }
//!     }
//!
//!     fn hooks(&self) -> Hooks<Self> {
//!         Hooks::new().after("c2", |_| Ok(Transition::to("s2")))
//!     }
//! }
//!
//! struct S2;
//!
//! impl State for S2 {
//!     fn weights(&self) -> WeightTable {
//!         weights! { c1: 1, c3: 1 }
//!     }
//! }
//!
//! fn tally(acc: u64) -> Result<u64, CollaboratorError> {
//!     Ok(acc + 1)
//! }
//!
//! let mut dfa = DfaBuilder::<u64>::new()
//!     .max_count(1000)
//!     .seed(7)
//!     .state(
//!         StateRegistration::new("S1", |_| Ok(S1))
//!             .command("c2", |_| Ok(tally))
//!             .command("c3", |_| Ok(tally))
//!             .start(),
//!     )
//!     .state(
//!         StateRegistration::new("S2", |_| Ok(S2))
//!             .command("c1", |_| Ok(tally))
//!             .command("c3", |_| Ok(tally)),
//!     )
//!     .build()?;
//!
//! let summary = dfa.drive()?;
//!
//! assert_eq!(summary.steps, 1000);
//! assert_eq!(*dfa.accumulator(), 1000);
//! assert_eq!(summary.executions_of("s2", "c2"), 0);
//! assert_eq!(summary.executions_of("s1", "c1"), 0);
//! # Ok::<(), stochastic_fsm::DfaError>(())
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod report;
pub mod validation;

// Re-export commonly used types
pub use builder::{DfaBuilder, StateRegistration};
pub use core::{Command, Hooks, State, Transition, WeightTable};
pub use engine::{Dfa, DfaError, Driver, StopCondition};
pub use report::RunSummary;
