//! Helpers that drawing code uses to keep the manager in step with the stage.
//!
//! Every mutation of a tracked element must be followed by [`save_state`], and
//! every tracked transition must be started through [`tracked_transition`] so
//! that its completion saves the final state and releases the navigation gate.

use scrolly_core::element::{Attributes, Display, ElementId};
use scrolly_core::error::ScrollyError;
use scrolly_core::selection::Selection;
use scrolly_core::stage::Stage;
use scrolly_core::transition::{TransitionId, TransitionSpec};

use crate::domain::manager::{EndAction, TransitionsManager};

/// Saves the current state of every selected element.
///
/// # Errors
///
/// Returns `ScrollyError::ElementNotFound` if a selected element is missing.
pub fn save_state(
    manager: &mut TransitionsManager,
    stage: &dyn Stage,
    selection: &Selection,
) -> Result<(), ScrollyError> {
    for id in selection {
        manager.save(stage, id)?;
    }
    Ok(())
}

/// Starts one tracked transition per selected element.
///
/// `plan` receives each element's position in the selection and returns its
/// timing and target attributes. Each started transition holds the
/// navigation gate until it completes and `on_end` has run.
///
/// # Errors
///
/// Propagates stage errors. Transitions started before the failure keep
/// running and are still tracked.
pub fn tracked_transition<F>(
    manager: &mut TransitionsManager,
    stage: &mut dyn Stage,
    selection: &Selection,
    on_end: EndAction,
    mut plan: F,
) -> Result<Vec<TransitionId>, ScrollyError>
where
    F: FnMut(usize, &ElementId) -> (TransitionSpec, Attributes),
{
    selection
        .iter()
        .enumerate()
        .map(|(index, id)| {
            let (spec, targets) = plan(index, id);
            manager.start_tracked_transition(stage, id, spec, targets, on_end)
        })
        .collect()
}

/// Completion handling for a tracked transition on `id`: saves the element's
/// final state and releases the gate. The release is the last action.
///
/// # Errors
///
/// Propagates stage errors and `ScrollyError::CounterUnderflow`.
pub fn end_tracking(
    manager: &mut TransitionsManager,
    stage: &dyn Stage,
    id: &ElementId,
) -> Result<(), ScrollyError> {
    manager.end_tracking(stage, id)
}

/// Hides an element.
///
/// # Errors
///
/// Returns `ScrollyError::ElementNotFound` if the element is missing.
pub fn hide(stage: &mut dyn Stage, id: &ElementId) -> Result<(), ScrollyError> {
    stage.set_display(id, Display::None)
}

/// Runs `create` if no element `id` exists yet; otherwise makes the existing
/// element visible again. Returns `true` if `create` ran.
///
/// # Errors
///
/// Propagates errors from `create` and the stage.
pub fn create_once<F>(stage: &mut dyn Stage, id: &ElementId, create: F) -> Result<bool, ScrollyError>
where
    F: FnOnce(&mut dyn Stage) -> Result<(), ScrollyError>,
{
    if stage.contains(id) {
        stage.set_display(id, Display::Block)?;
        return Ok(false);
    }
    create(stage)?;
    Ok(true)
}
