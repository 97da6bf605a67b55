//! Commands: the units of work a state selects between.
//!
//! A command receives the accumulator produced by the previous command and
//! returns the accumulator for the next one. The engine never inspects the
//! value; it only threads it through.

use serde_json::{Map, Value};
use std::error::Error;

/// Error type for faults raised by collaborator code (commands, hooks,
/// state and command factories).
///
/// The engine propagates these unmodified out of the run loop.
pub type CollaboratorError = Box<dyn Error + Send + Sync>;

/// Opaque construction parameters forwarded to state and command factories.
pub type Params = Map<String, Value>;

/// A named unit of work transforming an accumulator value.
///
/// # Example
///
/// ```rust
/// use stochastic_fsm::core::{CollaboratorError, Command};
///
/// struct Increment;
///
/// impl Command<u64> for Increment {
///     fn execute(&mut self, input: u64) -> Result<u64, CollaboratorError> {
///         Ok(input + 1)
///     }
/// }
///
/// let mut cmd = Increment;
/// assert_eq!(cmd.execute(41).unwrap(), 42);
/// ```
pub trait Command<A>: Send {
    /// Run the command with the previous accumulator, producing the next one.
    fn execute(&mut self, input: A) -> Result<A, CollaboratorError>;
}

impl<A, F> Command<A> for F
where
    F: FnMut(A) -> Result<A, CollaboratorError> + Send,
{
    fn execute(&mut self, input: A) -> Result<A, CollaboratorError> {
        self(input)
    }
}

/// Normalise a state or command name: trimmed and ASCII-lowercased.
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}
