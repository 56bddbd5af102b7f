//! Error types shared by every Scrolly crate.

use thiserror::Error;

use crate::element::ElementId;

/// Top-level error type for scene and tracking operations.
#[derive(Debug, Error)]
pub enum ScrollyError {
    /// No element with this identifier exists on the stage.
    #[error("element not found: {0}")]
    ElementNotFound(ElementId),

    /// An element with this identifier already exists on the stage.
    #[error("duplicate element: {0}")]
    DuplicateElement(ElementId),

    /// An element was logged as changed in a step but has no recorded
    /// history. Drawing code mutated it without saving its state.
    #[error("element {element_id} was changed in step {step} but has no recorded history")]
    MissingHistory {
        /// The element without history.
        element_id: ElementId,
        /// The step whose change log referenced it.
        step: usize,
    },

    /// Navigation was requested while transitions are still running.
    #[error("navigation refused: {0} transition(s) still active")]
    TransitionsInFlight(usize),

    /// A step index fell outside `0..number_of_steps`.
    #[error("step {step} is out of range for a sequence of {number_of_steps} step(s)")]
    StepOutOfRange {
        /// The offending step index.
        step: usize,
        /// The number of steps in the sequence.
        number_of_steps: usize,
    },

    /// More transitions completed than were started.
    #[error("active transition counter would drop below zero")]
    CounterUnderflow,

    /// Transitions were still running after the frame budget was spent.
    #[error("transitions did not settle within {frames} frame(s)")]
    Stalled {
        /// The number of frames that were advanced.
        frames: usize,
    },

    /// Invalid input.
    #[error("validation error: {0}")]
    Validation(String),
}
