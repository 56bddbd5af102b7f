//! Commands for the step tracking context.

use std::str::FromStr;

use scrolly_core::error::ScrollyError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which way to move through the narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// One step forward.
    Next,
    /// One step back.
    Prev,
}

impl FromStr for Direction {
    type Err = ScrollyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "next" => Ok(Self::Next),
            "prev" | "previous" => Ok(Self::Prev),
            other => Err(ScrollyError::Validation(format!(
                "unknown direction {other:?}, expected \"next\" or \"prev\""
            ))),
        }
    }
}

/// Command to move one step through the narrative.
#[derive(Debug, Clone)]
pub struct Navigate {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The direction to move.
    pub direction: Direction,
}

impl Navigate {
    /// Creates a command with a fresh correlation id.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            direction,
        }
    }
}
