//! Transition handles and timing.

use std::fmt;
use std::time::Duration;

/// Default duration of a transition, matching common charting libraries.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(250);

/// Identifies one animation instance on one element.
///
/// The stage hands out a fresh id for every started transition and reports
/// it back exactly once when the transition completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(u64);

impl TransitionId {
    /// Wraps a raw id. Stages allocate these monotonically.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transition#{}", self.0)
    }
}

/// When a transition starts and how long it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionSpec {
    /// Time between scheduling and the start of interpolation.
    pub delay: Duration,
    /// Time from start to completion.
    pub duration: Duration,
}

impl TransitionSpec {
    /// A spec with the default duration and the given delay.
    #[must_use]
    pub fn delayed(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    /// Point in time, relative to scheduling, at which the transition ends.
    #[must_use]
    pub fn end_offset(&self) -> Duration {
        self.delay + self.duration
    }
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            delay: Duration::ZERO,
            duration: DEFAULT_DURATION,
        }
    }
}
