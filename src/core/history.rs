//! State switch history tracking.
//!
//! Every switch applied by the automaton is recorded in order, with the step
//! at which it happened and a wall-clock timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single state switch.
///
/// # Example
///
/// ```rust
/// use stochastic_fsm::core::StateSwitch;
/// use chrono::Utc;
///
/// let switch = StateSwitch {
///     from: "browsing".to_string(),
///     to: "paying".to_string(),
///     step: 12,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(switch.to, "paying");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateSwitch {
    /// The state being switched from
    pub from: String,
    /// The state being switched to
    pub to: String,
    /// Number of steps the automaton had completed when the switch applied
    pub step: u64,
    /// When the switch occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state switches.
///
/// # Example
///
/// ```rust
/// use stochastic_fsm::core::{StateSwitch, SwitchHistory};
/// use chrono::Utc;
///
/// let mut history = SwitchHistory::new();
/// history.record(StateSwitch {
///     from: "s1".to_string(),
///     to: "s2".to_string(),
///     step: 1,
///     timestamp: Utc::now(),
/// });
/// history.record(StateSwitch {
///     from: "s2".to_string(),
///     to: "s1".to_string(),
///     step: 4,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec!["s1", "s2", "s1"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchHistory {
    switches: Vec<StateSwitch>,
}

impl SwitchHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            switches: Vec::new(),
        }
    }

    /// Append a switch.
    pub fn record(&mut self, switch: StateSwitch) {
        self.switches.push(switch);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first switch, then the `to` state of
    /// each switch in order.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.switches.len() + 1);
        if let Some(first) = self.switches.first() {
            path.push(first.from.as_str());
        }
        for switch in &self.switches {
            path.push(switch.to.as_str());
        }
        path
    }

    /// Elapsed time between the first and last switch.
    ///
    /// Returns `None` if there are no switches.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.switches.first(), self.switches.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Switches recorded after the first `skip` entries.
    pub fn since(&self, skip: usize) -> SwitchHistory {
        SwitchHistory {
            switches: self.switches.iter().skip(skip).cloned().collect(),
        }
    }

    /// All switches in order.
    pub fn switches(&self) -> &[StateSwitch] {
        &self.switches
    }

    pub fn len(&self) -> usize {
        self.switches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.switches.is_empty()
    }
}
