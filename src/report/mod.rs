//! Run summaries.
//!
//! Every successful `drive` returns a [`RunSummary`] describing what the run
//! did. Summaries are plain serde values, so callers can log, print or store
//! them however they like.

use crate::core::SwitchHistory;
use crate::engine::{StepRecord, StopCondition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use uuid::Uuid;

/// Summary of one completed run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Unique run identifier
    pub id: Uuid,

    /// Stop condition the run honoured
    pub stop: StopCondition,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: DateTime<Utc>,

    /// Steps executed during this run
    pub steps: u64,

    /// Execution counts per state, per command
    pub executions: BTreeMap<String, BTreeMap<String, u64>>,

    /// State switches applied during this run
    pub switches: SwitchHistory,

    /// Current state when the run finished
    pub final_state: String,
}

impl RunSummary {
    pub(crate) fn begin(stop: StopCondition) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            stop,
            started_at: now,
            finished_at: now,
            steps: 0,
            executions: BTreeMap::new(),
            switches: SwitchHistory::new(),
            final_state: String::new(),
        }
    }

    pub(crate) fn observe(&mut self, record: &StepRecord) {
        self.steps += 1;
        *self
            .executions
            .entry(record.state.clone())
            .or_default()
            .entry(record.command.clone())
            .or_default() += 1;
    }

    pub(crate) fn finish(mut self, final_state: String, switches: SwitchHistory) -> Self {
        self.finished_at = Utc::now();
        self.final_state = final_state;
        self.switches = switches;
        self
    }

    /// How many times `command` ran while `state` was current.
    pub fn executions_of(&self, state: &str, command: &str) -> u64 {
        self.executions
            .get(state)
            .and_then(|commands| commands.get(command))
            .copied()
            .unwrap_or(0)
    }

    /// Wall-clock time between start and finish.
    pub fn elapsed(&self) -> Duration {
        self.finished_at
            .signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: &str, command: &str) -> StepRecord {
        StepRecord {
            step: 0,
            state: state.to_string(),
            command: command.to_string(),
            switched_to: None,
        }
    }

    #[test]
    fn observe_tallies_per_state_and_command() {
        let mut summary = RunSummary::begin(StopCondition::MaxCount(3));
        summary.observe(&record("s1", "c2"));
        summary.observe(&record("s1", "c2"));
        summary.observe(&record("s2", "c2"));

        assert_eq!(summary.steps, 3);
        assert_eq!(summary.executions_of("s1", "c2"), 2);
        assert_eq!(summary.executions_of("s2", "c2"), 1);
        assert_eq!(summary.executions_of("s2", "c3"), 0);
    }

    #[test]
    fn finish_sets_final_state() {
        let summary = RunSummary::begin(StopCondition::MaxCount(1))
            .finish("s2".to_string(), SwitchHistory::new());

        assert_eq!(summary.final_state, "s2");
        assert!(summary.finished_at >= summary.started_at);
    }

    #[test]
    fn summary_serializes_correctly() {
        let mut summary = RunSummary::begin(StopCondition::MaxDuration(Duration::from_secs(1)));
        summary.observe(&record("s1", "c3"));
        let summary = summary.finish("s1".to_string(), SwitchHistory::new());

        let json = serde_json::to_string(&summary).unwrap();
        let deserialized: RunSummary = serde_json::from_str(&json).unwrap();

        assert_eq!(summary, deserialized);
    }
}
