//! The transitions manager: step controller, attribute history, change log
//! and active-transition gate.

use std::collections::HashMap;

use scrolly_core::element::{Attributes, Display, ElementId};
use scrolly_core::error::ScrollyError;
use scrolly_core::stage::Stage;
use scrolly_core::transition::{TransitionId, TransitionSpec};
use tracing::{debug, trace};

use super::change_log::StepChangeLog;
use super::history::ElementHistory;

/// What happens when a tracked forward transition completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndAction {
    /// Save the element's final state, then release the gate.
    EndTracking,
    /// Save the element's final state, hide it, then release the gate.
    EndTrackingThenHide,
}

/// Completion handler registered for a running tracked transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    Forward(EndAction),
    Revert,
}

/// Tracks the current step of a narrative and enough history per element to
/// undo the most recent step.
///
/// Drawing code calls [`TransitionsManager::save`] after every mutation of a
/// tracked element. Going back replays the previous snapshot of every element
/// the undone step changed.
#[derive(Debug)]
pub struct TransitionsManager {
    step: usize,
    number_of_steps: usize,
    active_transitions: usize,
    history: ElementHistory,
    change_log: StepChangeLog,
    pending: HashMap<TransitionId, (ElementId, Completion)>,
}

impl TransitionsManager {
    /// Creates a manager at step 0.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::Validation` if `number_of_steps` is zero.
    pub fn new(number_of_steps: usize) -> Result<Self, ScrollyError> {
        if number_of_steps == 0 {
            return Err(ScrollyError::Validation(
                "a sequence needs at least one step".to_owned(),
            ));
        }
        Ok(Self {
            step: 0,
            number_of_steps,
            active_transitions: 0,
            history: ElementHistory::new(),
            change_log: StepChangeLog::new(number_of_steps),
            pending: HashMap::new(),
        })
    }

    /// Current step index.
    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Number of steps in the sequence.
    #[must_use]
    pub fn number_of_steps(&self) -> usize {
        self.number_of_steps
    }

    /// Moves to the next step.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::StepOutOfRange` if already at the last step.
    pub fn increment_step(&mut self) -> Result<(), ScrollyError> {
        let next = self.step + 1;
        if next >= self.number_of_steps {
            return Err(self.out_of_range(next));
        }
        self.step = next;
        Ok(())
    }

    /// Moves to the previous step.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::StepOutOfRange` if already at step 0.
    pub fn decrement_step(&mut self) -> Result<(), ScrollyError> {
        self.step = self
            .step
            .checked_sub(1)
            .ok_or(ScrollyError::StepOutOfRange {
                step: 0,
                number_of_steps: self.number_of_steps,
            })?;
        Ok(())
    }

    /// Number of tracked transitions currently running.
    #[must_use]
    pub fn number_of_active_transitions(&self) -> usize {
        self.active_transitions
    }

    /// Records the start of one animation instance.
    pub fn increment_number_of_active_transitions(&mut self) {
        self.active_transitions += 1;
    }

    /// Records the completion of one animation instance.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::CounterUnderflow` if no transition is active.
    pub fn decrement_number_of_active_transitions(&mut self) -> Result<(), ScrollyError> {
        self.active_transitions = self
            .active_transitions
            .checked_sub(1)
            .ok_or(ScrollyError::CounterUnderflow)?;
        Ok(())
    }

    /// Returns `true` when no tracked transition is running.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active_transitions == 0
    }

    /// Per-element attribute history.
    #[must_use]
    pub fn history(&self) -> &ElementHistory {
        &self.history
    }

    /// Per-step change log.
    #[must_use]
    pub fn change_log(&self) -> &StepChangeLog {
        &self.change_log
    }

    /// Snapshots the element's current attributes and logs it as changed in
    /// the current step.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::ElementNotFound` if the stage has no such element.
    pub fn save(&mut self, stage: &dyn Stage, id: &ElementId) -> Result<(), ScrollyError> {
        let snapshot = stage.attributes(id)?;
        let depth = self.history.push(id, snapshot);
        self.change_log.record(self.step, id)?;
        debug!(element = %id, step = self.step, depth, "saved element state");
        Ok(())
    }

    /// Completion handling of a tracked forward transition: save the final
    /// state, then release one slot of the gate.
    ///
    /// # Errors
    ///
    /// Propagates stage errors and `ScrollyError::CounterUnderflow`.
    pub fn end_tracking(&mut self, stage: &dyn Stage, id: &ElementId) -> Result<(), ScrollyError> {
        self.save(stage, id)?;
        self.decrement_number_of_active_transitions()
    }

    /// Draws the current step. Going backward replays the previous snapshot of
    /// every element changed by the step being left; going forward runs
    /// `forward`. Returns the elements whose reversal was started.
    ///
    /// The step must already have been moved to the target step.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::MissingHistory` if a logged element was never
    /// saved, and propagates errors from `forward` and the stage.
    pub fn draw_step_with_auto_reverse<F>(
        &mut self,
        backward: bool,
        stage: &mut dyn Stage,
        forward: F,
    ) -> Result<Vec<ElementId>, ScrollyError>
    where
        F: FnOnce(&mut Self, &mut dyn Stage) -> Result<(), ScrollyError>,
    {
        if backward {
            self.revert_step(stage)
        } else {
            forward(self, stage)?;
            Ok(Vec::new())
        }
    }

    /// Starts a tracked transition and registers its completion handler.
    ///
    /// # Errors
    ///
    /// Propagates stage errors; the gate is untouched when starting fails.
    pub fn start_tracked_transition(
        &mut self,
        stage: &mut dyn Stage,
        id: &ElementId,
        spec: TransitionSpec,
        targets: Attributes,
        on_end: EndAction,
    ) -> Result<TransitionId, ScrollyError> {
        self.start(stage, id, spec, targets, Completion::Forward(on_end))
    }

    /// Runs the completion handler of a transition reported by the stage.
    /// Returns `false` for transitions this manager did not start.
    ///
    /// # Errors
    ///
    /// Propagates stage errors and `ScrollyError::CounterUnderflow`.
    pub fn complete_transition(
        &mut self,
        stage: &mut dyn Stage,
        transition: TransitionId,
    ) -> Result<bool, ScrollyError> {
        let Some((id, completion)) = self.pending.remove(&transition) else {
            trace!(%transition, "ignoring untracked transition");
            return Ok(false);
        };
        match completion {
            Completion::Forward(EndAction::EndTracking) => self.end_tracking(stage, &id)?,
            Completion::Forward(EndAction::EndTrackingThenHide) => {
                self.save(stage, &id)?;
                stage.set_display(&id, Display::None)?;
                self.decrement_number_of_active_transitions()?;
            }
            Completion::Revert => self.finish_reversal(stage, &id)?,
        }
        Ok(true)
    }

    fn start(
        &mut self,
        stage: &mut dyn Stage,
        id: &ElementId,
        spec: TransitionSpec,
        targets: Attributes,
        completion: Completion,
    ) -> Result<TransitionId, ScrollyError> {
        let transition = stage.start_transition(id, spec, targets)?;
        self.pending.insert(transition, (id.clone(), completion));
        self.increment_number_of_active_transitions();
        Ok(transition)
    }

    fn revert_step(&mut self, stage: &mut dyn Stage) -> Result<Vec<ElementId>, ScrollyError> {
        let undone = self.step + 1;
        let changed = self.change_log.entry(undone)?.to_vec();
        debug!(step = undone, elements = changed.len(), "reverting step");
        for id in &changed {
            self.reset_to_previous_state(stage, id, undone)?;
        }
        self.change_log.clear(undone)?;
        Ok(changed)
    }

    fn reset_to_previous_state(
        &mut self,
        stage: &mut dyn Stage,
        id: &ElementId,
        undone: usize,
    ) -> Result<(), ScrollyError> {
        if !self.history.contains(id) {
            return Err(ScrollyError::MissingHistory {
                element_id: id.clone(),
                step: undone,
            });
        }
        let Some(previous) = self.history.previous(id).cloned() else {
            // Created in the undone step and never changed since.
            debug!(element = %id, "hiding element at its creation state");
            return stage.set_display(id, Display::None);
        };

        if stage.is_hidden(id)? {
            stage.set_display(id, Display::Block)?;
        }
        self.start(stage, id, TransitionSpec::default(), previous, Completion::Revert)?;
        Ok(())
    }

    fn finish_reversal(&mut self, stage: &mut dyn Stage, id: &ElementId) -> Result<(), ScrollyError> {
        self.history.pop(id);
        if self.history.len(id) == 1 {
            stage.set_display(id, Display::None)?;
        }
        debug!(element = %id, depth = self.history.len(id), "reverted element");
        self.decrement_number_of_active_transitions()
    }

    fn out_of_range(&self, step: usize) -> ScrollyError {
        ScrollyError::StepOutOfRange {
            step,
            number_of_steps: self.number_of_steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use scrolly_stage::MemoryStage;

    use super::*;

    fn id(raw: &str) -> ElementId {
        ElementId::new(raw).unwrap()
    }

    fn run_to_end(manager: &mut TransitionsManager, stage: &mut MemoryStage) {
        for transition in stage.advance(Duration::from_secs(5)) {
            manager.complete_transition(stage, transition).unwrap();
        }
    }

    /// Creates `axis` at opacity 0 in the current step, then fades it in.
    fn fade_in(manager: &mut TransitionsManager, stage: &mut MemoryStage, axis: &ElementId) {
        if !stage.contains(axis) {
            stage.append(None, "g", axis.clone()).unwrap();
            stage.set_attribute(axis, "opacity", "0").unwrap();
            manager.save(stage, axis).unwrap();
        }
        manager
            .start_tracked_transition(
                stage,
                axis,
                TransitionSpec::default(),
                Attributes::new().with("opacity", "1"),
                EndAction::EndTracking,
            )
            .unwrap();
    }

    #[test]
    fn test_new_rejects_empty_sequence() {
        assert!(matches!(
            TransitionsManager::new(0),
            Err(ScrollyError::Validation(_))
        ));
    }

    #[test]
    fn test_step_bounds_are_reported_not_clamped() {
        // Arrange
        let mut manager = TransitionsManager::new(2).unwrap();

        // Act / Assert
        assert!(matches!(
            manager.decrement_step(),
            Err(ScrollyError::StepOutOfRange { step: 0, .. })
        ));
        manager.increment_step().unwrap();
        assert_eq!(manager.step(), 1);
        assert!(matches!(
            manager.increment_step(),
            Err(ScrollyError::StepOutOfRange { step: 2, .. })
        ));
        assert_eq!(manager.step(), 1);
    }

    #[test]
    fn test_counter_never_goes_negative() {
        let mut manager = TransitionsManager::new(1).unwrap();

        manager.increment_number_of_active_transitions();
        manager.decrement_number_of_active_transitions().unwrap();

        assert!(matches!(
            manager.decrement_number_of_active_transitions(),
            Err(ScrollyError::CounterUnderflow)
        ));
        assert_eq!(manager.number_of_active_transitions(), 0);
    }

    #[test]
    fn test_first_save_creates_floor_entry_and_logs_step() {
        // Arrange
        let mut manager = TransitionsManager::new(3).unwrap();
        let mut stage = MemoryStage::new();
        let bar = id("bar-0");
        stage.append(None, "rect", bar.clone()).unwrap();
        stage.set_attribute(&bar, "height", "0").unwrap();

        // Act
        manager.save(&stage, &bar).unwrap();
        manager.save(&stage, &bar).unwrap();

        // Assert
        assert_eq!(manager.history().len(&bar), 2);
        assert_eq!(manager.change_log().entry(0).unwrap(), &[bar]);
    }

    #[test]
    fn test_save_unknown_element_propagates_not_found() {
        let mut manager = TransitionsManager::new(1).unwrap();
        let stage = MemoryStage::new();

        let result = manager.save(&stage, &id("ghost"));

        assert!(matches!(result, Err(ScrollyError::ElementNotFound(_))));
        assert_eq!(manager.history().tracked_elements(), 0);
    }

    #[test]
    fn test_forward_transition_saves_final_state_on_completion() {
        // Arrange
        let mut manager = TransitionsManager::new(2).unwrap();
        let mut stage = MemoryStage::new();
        let axis = id("y-axis");
        manager.increment_step().unwrap();
        fade_in(&mut manager, &mut stage, &axis);
        assert_eq!(manager.number_of_active_transitions(), 1);

        // Act
        run_to_end(&mut manager, &mut stage);

        // Assert
        assert!(manager.is_idle());
        assert_eq!(manager.history().len(&axis), 2);
        assert_eq!(
            manager.history().latest(&axis).unwrap().get("opacity"),
            Some("1")
        );
    }

    #[test]
    fn test_going_back_animates_to_previous_state_then_hides_at_floor() {
        // Arrange
        let mut manager = TransitionsManager::new(2).unwrap();
        let mut stage = MemoryStage::new();
        let axis = id("y-axis");
        manager.increment_step().unwrap();
        fade_in(&mut manager, &mut stage, &axis);
        run_to_end(&mut manager, &mut stage);

        // Act
        manager.decrement_step().unwrap();
        let reverted = manager
            .draw_step_with_auto_reverse(true, &mut stage, |_, _| {
                panic!("forward draw must not run when going back")
            })
            .unwrap();

        // Assert: reversal in flight
        assert_eq!(reverted, vec![axis.clone()]);
        assert_eq!(manager.number_of_active_transitions(), 1);
        assert!(manager.change_log().entry(1).unwrap().is_empty());

        run_to_end(&mut manager, &mut stage);

        assert!(manager.is_idle());
        assert_eq!(manager.history().len(&axis), 1);
        assert_eq!(stage.attribute(&axis, "opacity").unwrap().as_deref(), Some("0"));
        assert!(stage.is_hidden(&axis).unwrap());
    }

    #[test]
    fn test_hidden_element_is_shown_again_before_reverting() {
        // Arrange: element saved three times, hidden by its last forward step
        let mut manager = TransitionsManager::new(3).unwrap();
        let mut stage = MemoryStage::new();
        let mean = id("mean-vis");
        manager.increment_step().unwrap();
        fade_in(&mut manager, &mut stage, &mean);
        run_to_end(&mut manager, &mut stage);
        manager.increment_step().unwrap();
        manager
            .start_tracked_transition(
                &mut stage,
                &mean,
                TransitionSpec::default(),
                Attributes::new().with("opacity", "0"),
                EndAction::EndTrackingThenHide,
            )
            .unwrap();
        run_to_end(&mut manager, &mut stage);
        assert!(stage.is_hidden(&mean).unwrap());

        // Act
        manager.decrement_step().unwrap();
        manager
            .draw_step_with_auto_reverse(true, &mut stage, |_, _| Ok(()))
            .unwrap();
        run_to_end(&mut manager, &mut stage);

        // Assert
        assert!(!stage.is_hidden(&mean).unwrap());
        assert_eq!(stage.attribute(&mean, "opacity").unwrap().as_deref(), Some("1"));
        assert_eq!(manager.history().len(&mean), 2);
    }

    #[test]
    fn test_element_saved_once_in_undone_step_is_hidden_immediately() {
        // Arrange
        let mut manager = TransitionsManager::new(2).unwrap();
        let mut stage = MemoryStage::new();
        let label = id("top-values-text");
        manager.increment_step().unwrap();
        stage.append(None, "text", label.clone()).unwrap();
        manager.save(&stage, &label).unwrap();

        // Act
        manager.decrement_step().unwrap();
        manager
            .draw_step_with_auto_reverse(true, &mut stage, |_, _| Ok(()))
            .unwrap();

        // Assert
        assert!(manager.is_idle());
        assert!(stage.is_hidden(&label).unwrap());
        assert_eq!(manager.history().len(&label), 1);
    }

    #[test]
    fn test_logged_element_without_history_fails_and_stays_hidden() {
        // Arrange: logged in step 1 but never saved
        let mut manager = TransitionsManager::new(2).unwrap();
        let mut stage = MemoryStage::new();
        let ghost = id("ghost");
        stage.append(None, "g", ghost.clone()).unwrap();
        stage.set_display(&ghost, Display::None).unwrap();
        manager.increment_step().unwrap();
        manager.change_log.record(1, &ghost).unwrap();

        // Act
        manager.decrement_step().unwrap();
        let result = manager.draw_step_with_auto_reverse(true, &mut stage, |_, _| Ok(()));

        // Assert
        match result {
            Err(ScrollyError::MissingHistory { element_id, step: 1 }) => {
                assert_eq!(element_id, ghost);
            }
            other => panic!("expected MissingHistory, got {other:?}"),
        }
        assert!(stage.is_hidden(&ghost).unwrap());
        assert!(manager.is_idle());
    }

    #[test]
    fn test_untracked_completion_is_ignored() {
        let mut manager = TransitionsManager::new(1).unwrap();
        let mut stage = MemoryStage::new();
        let grid = id("grid");
        stage.append(None, "g", grid.clone()).unwrap();
        let transition = stage
            .start_transition(&grid, TransitionSpec::default(), Attributes::new().with("opacity", "1"))
            .unwrap();

        let handled = manager.complete_transition(&mut stage, transition).unwrap();

        assert!(!handled);
        assert!(manager.is_idle());
    }

    #[test]
    fn test_forward_draw_runs_with_manager_and_stage() {
        let mut manager = TransitionsManager::new(1).unwrap();
        let mut stage = MemoryStage::new();
        let bar = id("bar-0");

        let reverted = manager
            .draw_step_with_auto_reverse(false, &mut stage, |manager, stage| {
                stage.append(None, "rect", bar.clone())?;
                manager.save(stage, &bar)
            })
            .unwrap();

        assert!(reverted.is_empty());
        assert_eq!(manager.history().len(&bar), 1);
    }
}
