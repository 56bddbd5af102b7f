//! Query handlers for the step tracking context.

use serde::Serialize;

use crate::domain::manager::TransitionsManager;

/// Read-only view of where the narrative stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressView {
    /// Current step index.
    pub step: usize,
    /// Number of steps in the narrative.
    pub number_of_steps: usize,
    /// Tracked transitions still running.
    pub active_transitions: usize,
    /// Whether a `prev` command would be accepted now.
    pub can_go_back: bool,
    /// Whether a `next` command would be accepted now.
    pub can_go_forward: bool,
    /// Label shown next to the navigation buttons.
    pub label: String,
}

/// Summarises the manager's state.
#[must_use]
pub fn get_progress(manager: &TransitionsManager) -> ProgressView {
    let step = manager.step();
    let number_of_steps = manager.number_of_steps();
    let idle = manager.is_idle();
    ProgressView {
        step,
        number_of_steps,
        active_transitions: manager.number_of_active_transitions(),
        can_go_back: idle && step > 0,
        can_go_forward: idle && step + 1 < number_of_steps,
        label: format!("View: {step}"),
    }
}
