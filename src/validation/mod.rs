//! Validation of automaton configuration.
//!
//! Configuration checks use Stillwater's `Validation` type so that every
//! problem with a builder or a state registration is reported at once,
//! instead of failing on the first one.
//!
//! # Example
//!
//! ```rust
//! use stochastic_fsm::builder::DfaBuilder;
//! use stochastic_fsm::engine::DfaError;
//! use stochastic_fsm::validation::ConfigError;
//!
//! let result = DfaBuilder::<()>::new()
//!     .max_count(0)
//!     .max_duration_secs(-1.0)
//!     .build();
//!
//! match result {
//!     Err(DfaError::Config(violations)) => {
//!         assert!(violations.contains(&ConfigError::ConflictingStopConditions));
//!         assert!(violations.contains(&ConfigError::ZeroMaxCount));
//!     }
//!     _ => panic!("expected configuration errors"),
//! }
//! ```

pub mod rules;
pub mod violations;

pub use violations::{ConfigError, Violations};
