//! Navigation events for the step tracking context.

use scrolly_core::element::ElementId;
use serde::Serialize;
use uuid::Uuid;

/// Emitted when the narrative moves forward and the new step was drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepAdvanced {
    /// The step that was left.
    pub from: usize,
    /// The step that was drawn.
    pub to: usize,
}

/// Emitted when the narrative moves back and the reversal was started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReverted {
    /// The step that was undone.
    pub from: usize,
    /// The step that is current again.
    pub to: usize,
    /// Elements animated back to their previous state.
    pub reverted: Vec<ElementId>,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NavigationEventKind {
    /// The narrative moved forward.
    StepAdvanced(StepAdvanced),
    /// The narrative moved back.
    StepReverted(StepReverted),
}

/// Navigation event envelope.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationEvent {
    /// Correlation ID of the command that caused this event.
    pub correlation_id: Uuid,
    /// Event-specific payload.
    pub kind: NavigationEventKind,
}

impl NavigationEvent {
    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match &self.kind {
            NavigationEventKind::StepAdvanced(_) => "navigation.step_advanced",
            NavigationEventKind::StepReverted(_) => "navigation.step_reverted",
        }
    }

    /// The step that is current after this event.
    #[must_use]
    pub fn current_step(&self) -> usize {
        match &self.kind {
            NavigationEventKind::StepAdvanced(payload) => payload.to,
            NavigationEventKind::StepReverted(payload) => payload.to,
        }
    }

    /// Serializes the event payload to JSON.
    #[must_use]
    pub fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }
}
