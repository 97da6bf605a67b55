//! Background execution of an automaton on its own thread.

use crate::builder::StateRegistration;
use crate::engine::error::DfaError;
use crate::engine::machine::Dfa;
use crate::report::RunSummary;
use std::thread::{self, JoinHandle};
use tracing::debug;

/// A finished run: the automaton, handed back, and what the run did.
#[derive(Debug)]
pub struct Completed<A> {
    pub machine: Dfa<A>,
    pub summary: RunSummary,
}

/// Runs one automaton either on the caller's thread or on a dedicated one.
#[derive(Debug)]
pub struct Driver<A> {
    dfa: Dfa<A>,
}

impl<A: Default + Send + 'static> Driver<A> {
    pub fn new(dfa: Dfa<A>) -> Self {
        Self { dfa }
    }

    /// Register a state on the wrapped automaton.
    pub fn add_state(&mut self, registration: StateRegistration<A>) -> Result<(), DfaError> {
        self.dfa.add_state(registration)
    }

    pub fn machine(&self) -> &Dfa<A> {
        &self.dfa
    }

    /// Drive to completion on the current thread.
    pub fn run(mut self) -> Result<Completed<A>, DfaError> {
        let summary = self.dfa.drive()?;
        Ok(Completed {
            machine: self.dfa,
            summary,
        })
    }

    /// Drive on a new thread.
    ///
    /// Fails before spawning if no start state has been registered.
    pub fn start(self) -> Result<RunHandle<A>, DfaError> {
        if self.dfa.current_state().is_none() {
            return Err(DfaError::NotInitialized);
        }

        let handle = thread::Builder::new()
            .name("stochastic-fsm-driver".to_string())
            .spawn(move || self.run())?;
        debug!("driver thread started");
        Ok(RunHandle { handle })
    }
}

/// Handle to an automaton running on its own thread.
#[derive(Debug)]
pub struct RunHandle<A> {
    handle: JoinHandle<Result<Completed<A>, DfaError>>,
}

impl<A> RunHandle<A> {
    /// Whether the run has finished, successfully or not.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the run to finish.
    pub fn join(self) -> Result<Completed<A>, DfaError> {
        self.handle.join().map_err(|_| DfaError::WorkerPanicked)?
    }
}
