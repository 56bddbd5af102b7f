//! The rendering/animation collaborator.

use std::time::Duration;

use crate::element::{Attributes, DISPLAY_ATTRIBUTE, Display, ElementId};
use crate::error::ScrollyError;
use crate::transition::{TransitionId, TransitionSpec};

/// A retained scene of identified elements that can be mutated directly or
/// through animated transitions.
///
/// Transitions are asynchronous: [`Stage::start_transition`] schedules one and
/// returns its id synchronously, and [`Stage::advance`] reports the ids of the
/// transitions that completed while time moved forward. Every started
/// transition is reported exactly once and never cancelled.
pub trait Stage {
    /// Returns `true` if an element with this id exists.
    fn contains(&self, id: &ElementId) -> bool;

    /// Creates an element with the given tag under `parent` (or at the root).
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::DuplicateElement` if `id` is taken and
    /// `ScrollyError::ElementNotFound` if `parent` does not exist.
    fn append(
        &mut self,
        parent: Option<&ElementId>,
        tag: &str,
        id: ElementId,
    ) -> Result<(), ScrollyError>;

    /// Replaces the text content of an element.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::ElementNotFound` if the element does not exist.
    fn set_text(&mut self, id: &ElementId, text: &str) -> Result<(), ScrollyError>;

    /// Reads one attribute.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::ElementNotFound` if the element does not exist.
    fn attribute(&self, id: &ElementId, name: &str) -> Result<Option<String>, ScrollyError>;

    /// Reads every attribute of an element, in the order they were first set.
    /// The id is not an attribute.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::ElementNotFound` if the element does not exist.
    fn attributes(&self, id: &ElementId) -> Result<Attributes, ScrollyError>;

    /// Sets an attribute immediately.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::ElementNotFound` if the element does not exist.
    fn set_attribute(&mut self, id: &ElementId, name: &str, value: &str)
    -> Result<(), ScrollyError>;

    /// Schedules an animated transition of `targets` on one element.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::ElementNotFound` if the element does not exist.
    fn start_transition(
        &mut self,
        id: &ElementId,
        spec: TransitionSpec,
        targets: Attributes,
    ) -> Result<TransitionId, ScrollyError>;

    /// Moves time forward and returns the transitions that completed, in
    /// completion order.
    fn advance(&mut self, elapsed: Duration) -> Vec<TransitionId>;

    /// Number of scheduled transitions that have not completed yet.
    fn pending_transitions(&self) -> usize;

    /// Sets the display flag of an element.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::ElementNotFound` if the element does not exist.
    fn set_display(&mut self, id: &ElementId, display: Display) -> Result<(), ScrollyError> {
        self.set_attribute(id, DISPLAY_ATTRIBUTE, display.as_str())
    }

    /// Returns `true` if the element's display flag is `none`.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::ElementNotFound` if the element does not exist.
    fn is_hidden(&self, id: &ElementId) -> Result<bool, ScrollyError> {
        Ok(self.attribute(id, DISPLAY_ATTRIBUTE)?.as_deref() == Some(Display::None.as_str()))
    }
}
