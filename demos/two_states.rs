//! Two-State Automaton
//!
//! This example demonstrates a weighted automaton that hops between two
//! states from inside its post-hooks.
//!
//! Key concepts:
//! - Weight tables declared with `weights!`
//! - Pre/post hooks bound to command names
//! - Switching state from a post-hook
//! - Count-bounded and time-bounded runs
//! - Running on a background thread with `Driver`
//!
//! Run with: cargo run --example two_states
//! Set RUST_LOG=stochastic_fsm=debug to see every switch.

use std::time::Duration;
use stochastic_fsm::core::{CollaboratorError, Command, Params};
use stochastic_fsm::{weights, DfaBuilder, Driver, Hooks, State, StateRegistration, Transition, WeightTable};

/// Prints its label and counts how many commands have run.
struct Announce {
    label: String,
    delay: Duration,
}

impl Announce {
    fn from_params(name: &str, params: &Params) -> Result<Self, CollaboratorError> {
        let prefix = params
            .get("prefix")
            .and_then(|v| v.as_str())
            .unwrap_or("Execute");
        let delay = params.get("delay_ms").and_then(|v| v.as_u64()).unwrap_or(0);
        Ok(Self {
            label: format!("{prefix} {name}"),
            delay: Duration::from_millis(delay),
        })
    }
}

impl Command<u64> for Announce {
    fn execute(&mut self, input: u64) -> Result<u64, CollaboratorError> {
        std::thread::sleep(self.delay);
        println!("  {}", self.label);
        Ok(input + 1)
    }
}

struct S1;

impl State for S1 {
    fn weights(&self) -> WeightTable {
        weights! { c2: 1, c3: 1 }
    }

    fn hooks(&self) -> Hooks<Self> {
        Hooks::new()
            .before("c2", |_| {
                println!("State S1");
                Ok(())
            })
            .before("c3", |_| {
                println!("State S1");
                Ok(())
            })
            .after("c2", |_| Ok(Transition::to("s2")))
            .after("c3", |_| {
                println!("  remains S1");
                Ok(Transition::Stay)
            })
    }
}

struct S2;

impl State for S2 {
    fn weights(&self) -> WeightTable {
        weights! { c1: 1, c3: 1 }
    }

    fn hooks(&self) -> Hooks<Self> {
        Hooks::new()
            .before("c1", |_| {
                println!("State S2");
                Ok(())
            })
            .before("c3", |_| {
                println!("State S2");
                Ok(())
            })
            .after("c1", |_| Ok(Transition::to("s1")))
            .after("c3", |_| {
                println!("  remains S2");
                Ok(Transition::Stay)
            })
    }
}

fn s1() -> StateRegistration<u64> {
    StateRegistration::new("S1", |_| Ok(S1))
        .command("c2", |p| Announce::from_params("C2", p))
        .command("c3", |p| Announce::from_params("C3", p))
        .start()
}

fn s2() -> StateRegistration<u64> {
    StateRegistration::new("S2", |_| Ok(S2))
        .command("c1", |p| Announce::from_params("C1", p))
        .command("c3", |p| Announce::from_params("C3", p))
        .param("prefix", "Run")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    println!("=== Two-State Automaton ===\n");

    // Count-bounded, seeded run on the current thread
    let mut dfa = DfaBuilder::new()
        .max_count(12)
        .seed(2024)
        .state(s1())
        .state(s2())
        .build()?;

    let summary = dfa.drive()?;

    println!("\nCount-bounded run:");
    println!("  Steps: {}", summary.steps);
    println!("  Switches: {}", summary.switches.len());
    println!("  Path: {}", summary.switches.get_path().join(" -> "));
    println!("  Final state: {}", summary.final_state);
    for (state, commands) in &summary.executions {
        for (command, count) in commands {
            println!("  {state}/{command}: {count}");
        }
    }

    // Time-bounded run on a background thread
    println!("\nTime-bounded run (50ms) on a driver thread:");
    let dfa = DfaBuilder::new()
        .max_duration(Duration::from_millis(50))
        .param("delay_ms", 5)
        .state(s1())
        .state(s2())
        .build()?;

    let completed = Driver::new(dfa).start()?.join()?;

    println!("\n  Steps: {}", completed.summary.steps);
    println!("  Elapsed: {:?}", completed.summary.elapsed());
    println!("  Accumulator: {}", completed.machine.accumulator());

    println!("\nSummary as JSON:");
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
