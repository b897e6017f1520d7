//! Backoff schedule for poll and resubmission delays
//!
//! The delay starts at a fixed base and doubles every `multiple`-th poll
//! rather than every poll, bounded by an overall deadline measured from
//! first submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed-multiple backoff schedule with an overall deadline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffSchedule {
    /// Initial delay between polls
    pub base: Duration,

    /// Number of polls between each doubling of the delay
    pub multiple: u32,

    /// Overall deadline measured from first submission
    pub timeout: Duration,
}

impl Default for BackoffSchedule {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(2),
            multiple: 2,
            timeout: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl BackoffSchedule {
    /// Delay to wait after `polls_completed` checks have already run.
    pub fn delay_for(&self, polls_completed: u32) -> Duration {
        let doublings = (polls_completed / self.multiple.max(1)).min(31);
        self.base.saturating_mul(1u32 << doublings)
    }

    /// Whether the overall deadline has elapsed since `started_at`.
    pub fn deadline_exceeded(&self, started_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match (now - started_at).to_std() {
            Ok(elapsed) => elapsed >= self.timeout,
            // A clock that moved backwards has not reached the deadline.
            Err(_) => false,
        }
    }
}
