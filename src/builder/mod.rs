//! Builder API for ergonomic automaton construction.
//!
//! This module provides fluent builders and macros for describing states,
//! their commands and the automaton's stop condition with minimal
//! boilerplate. Nothing is instantiated until the automaton is built.

pub mod machine;
pub mod macros;
pub mod registration;

pub use machine::DfaBuilder;
pub use registration::StateRegistration;
