//! Run termination rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// When a run stops: after a fixed number of steps, or once a wall-clock
/// duration has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopCondition {
    /// Execute exactly this many steps
    MaxCount(u64),

    /// Keep stepping while less than this much time has elapsed.
    /// The check happens between steps, so a run can overrun by at most one
    /// step.
    MaxDuration(Duration),
}

impl fmt::Display for StopCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxCount(n) => write!(f, "max_count={n}"),
            Self::MaxDuration(d) => write!(f, "max_duration={d:?}"),
        }
    }
}
