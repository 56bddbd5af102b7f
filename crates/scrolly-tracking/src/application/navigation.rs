//! Navigation command handler.
//!
//! Moves the manager one step, then either draws the new step or starts the
//! reversal of the step that was left. Navigation is refused while any tracked
//! transition is still running.

use scrolly_core::error::ScrollyError;
use scrolly_core::stage::Stage;
use tracing::{info, instrument, warn};

use crate::domain::commands::{Direction, Navigate};
use crate::domain::events::{NavigationEvent, NavigationEventKind, StepAdvanced, StepReverted};
use crate::domain::manager::TransitionsManager;

/// Draws the steps of one narrative.
pub trait StepDrawer {
    /// Number of steps this drawer can draw.
    fn number_of_steps(&self) -> usize;

    /// Draws `step` going forward. Every element mutation must be saved on
    /// the manager and every transition started through it.
    ///
    /// # Errors
    ///
    /// Propagates stage errors.
    fn draw_step(
        &mut self,
        step: usize,
        manager: &mut TransitionsManager,
        stage: &mut dyn Stage,
    ) -> Result<(), ScrollyError>;
}

/// Draws step 0 on a fresh manager.
///
/// # Errors
///
/// Returns `ScrollyError::Validation` if the drawer and the manager disagree
/// on the number of steps or the manager is not at step 0, and propagates
/// drawing errors.
pub fn start(
    manager: &mut TransitionsManager,
    stage: &mut dyn Stage,
    drawer: &mut dyn StepDrawer,
) -> Result<(), ScrollyError> {
    if drawer.number_of_steps() != manager.number_of_steps() {
        return Err(ScrollyError::Validation(format!(
            "drawer has {} step(s) but the manager tracks {}",
            drawer.number_of_steps(),
            manager.number_of_steps()
        )));
    }
    if manager.step() != 0 {
        return Err(ScrollyError::Validation(
            "a sequence can only be started at step 0".to_owned(),
        ));
    }
    info!(steps = manager.number_of_steps(), "drawing initial step");
    manager.draw_step_with_auto_reverse(false, stage, |manager, stage| {
        drawer.draw_step(0, manager, stage)
    })?;
    Ok(())
}

/// Handles a `Navigate` command.
///
/// # Errors
///
/// Returns `ScrollyError::TransitionsInFlight` while transitions are running,
/// `ScrollyError::StepOutOfRange` when moving past either end, and propagates
/// drawing and reversal errors. After a drawing or reversal error the step
/// has already moved and the manager is left mid-step.
#[instrument(skip(manager, stage, drawer), fields(correlation_id = %command.correlation_id, direction = ?command.direction))]
pub fn handle_navigate(
    command: &Navigate,
    manager: &mut TransitionsManager,
    stage: &mut dyn Stage,
    drawer: &mut dyn StepDrawer,
) -> Result<NavigationEvent, ScrollyError> {
    let active = manager.number_of_active_transitions();
    if active > 0 {
        warn!(active, "navigation refused while transitions are running");
        return Err(ScrollyError::TransitionsInFlight(active));
    }

    let from = manager.step();
    let kind = match command.direction {
        Direction::Next => {
            manager.increment_step()?;
            let to = manager.step();
            manager.draw_step_with_auto_reverse(false, stage, |manager, stage| {
                drawer.draw_step(to, manager, stage)
            })?;
            NavigationEventKind::StepAdvanced(StepAdvanced { from, to })
        }
        Direction::Prev => {
            manager.decrement_step()?;
            let to = manager.step();
            let reverted = manager.draw_step_with_auto_reverse(true, stage, |manager, stage| {
                drawer.draw_step(to, manager, stage)
            })?;
            NavigationEventKind::StepReverted(StepReverted { from, to, reverted })
        }
    };

    let event = NavigationEvent {
        correlation_id: command.correlation_id,
        kind,
    };
    info!(
        event_type = event.event_type(),
        step = event.current_step(),
        "navigated"
    );
    Ok(event)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use scrolly_core::element::{Attributes, ElementId};
    use scrolly_core::selection::Selection;
    use scrolly_core::transition::TransitionSpec;
    use scrolly_stage::MemoryStage;
    use scrolly_test_support::{FailingStage, RecordingStage};

    use super::*;
    use crate::application::pump::settle;
    use crate::application::tracked::{create_once, save_state, tracked_transition};
    use crate::domain::manager::EndAction;

    const FRAME: Duration = Duration::from_millis(16);

    /// Step 0 creates a marker at x=0; step `n` creates (once) a label `n`
    /// at opacity 0 and fades it in, and moves the marker to x=n.
    struct MarkerDrawer {
        steps: usize,
    }

    impl StepDrawer for MarkerDrawer {
        fn number_of_steps(&self) -> usize {
            self.steps
        }

        fn draw_step(
            &mut self,
            step: usize,
            manager: &mut TransitionsManager,
            stage: &mut dyn Stage,
        ) -> Result<(), ScrollyError> {
            let marker = ElementId::new("marker")?;
            if step == 0 {
                stage.append(None, "rect", marker.clone())?;
                stage.set_attribute(&marker, "x", "0")?;
                return manager.save(stage, &marker);
            }

            let label = ElementId::indexed("label", step)?;
            create_once(stage, &label, |stage| {
                stage.append(None, "text", label.clone())?;
                stage.set_attribute(&label, "opacity", "0")?;
                save_state(manager, stage, &Selection::single(label.clone()))
            })?;
            let targets = Selection::from_iter([marker, label]);
            tracked_transition(manager, stage, &targets, EndAction::EndTracking, |index, _| {
                let targets = if index == 0 {
                    Attributes::new().with("x", step.to_string())
                } else {
                    Attributes::new().with("opacity", "1")
                };
                (TransitionSpec::default(), targets)
            })?;
            Ok(())
        }
    }

    fn started(steps: usize) -> (TransitionsManager, MemoryStage, MarkerDrawer) {
        let mut manager = TransitionsManager::new(steps).unwrap();
        let mut stage = MemoryStage::new();
        let mut drawer = MarkerDrawer { steps };
        start(&mut manager, &mut stage, &mut drawer).unwrap();
        (manager, stage, drawer)
    }

    fn go(
        direction: Direction,
        manager: &mut TransitionsManager,
        stage: &mut dyn Stage,
        drawer: &mut MarkerDrawer,
    ) -> NavigationEvent {
        let event = handle_navigate(&Navigate::new(direction), manager, stage, drawer).unwrap();
        settle(manager, stage, FRAME, 1_000).unwrap();
        event
    }

    #[test]
    fn test_start_rejects_mismatched_drawer() {
        let mut manager = TransitionsManager::new(3).unwrap();
        let mut stage = MemoryStage::new();
        let mut drawer = MarkerDrawer { steps: 2 };

        let result = start(&mut manager, &mut stage, &mut drawer);

        assert!(matches!(result, Err(ScrollyError::Validation(_))));
    }

    #[test]
    fn test_navigation_is_refused_while_transitions_run() {
        // Arrange
        let (mut manager, mut stage, mut drawer) = started(3);
        handle_navigate(&Navigate::new(Direction::Next), &mut manager, &mut stage, &mut drawer)
            .unwrap();
        assert!(!manager.is_idle());

        // Act
        let result = handle_navigate(
            &Navigate::new(Direction::Next),
            &mut manager,
            &mut stage,
            &mut drawer,
        );

        // Assert
        assert!(matches!(result, Err(ScrollyError::TransitionsInFlight(2))));
        assert_eq!(manager.step(), 1);
    }

    #[test]
    fn test_navigation_stops_at_both_ends() {
        let (mut manager, mut stage, mut drawer) = started(2);

        let back = handle_navigate(&Navigate::new(Direction::Prev), &mut manager, &mut stage, &mut drawer);
        assert!(matches!(back, Err(ScrollyError::StepOutOfRange { .. })));

        go(Direction::Next, &mut manager, &mut stage, &mut drawer);
        let past_end =
            handle_navigate(&Navigate::new(Direction::Next), &mut manager, &mut stage, &mut drawer);
        assert!(matches!(past_end, Err(ScrollyError::StepOutOfRange { .. })));
        assert_eq!(manager.step(), 1);
    }

    #[test]
    fn test_failed_draw_leaves_the_step_moved() {
        // Arrange
        let (mut manager, _, mut drawer) = started(3);
        let mut stage = FailingStage;

        // Act
        let result =
            handle_navigate(&Navigate::new(Direction::Next), &mut manager, &mut stage, &mut drawer);

        // Assert
        assert!(matches!(result, Err(ScrollyError::ElementNotFound(_))));
        assert_eq!(manager.step(), 1);
        assert!(manager.is_idle());
    }

    #[test]
    fn test_forward_then_back_restores_every_history_tip() {
        // Arrange
        let (mut manager, mut stage, mut drawer) = started(4);
        let before: Vec<_> = manager
            .history()
            .tips()
            .map(|(id, tip)| (id.clone(), tip.clone()))
            .collect();

        // Act
        for _ in 0..3 {
            go(Direction::Next, &mut manager, &mut stage, &mut drawer);
        }
        for _ in 0..3 {
            go(Direction::Prev, &mut manager, &mut stage, &mut drawer);
        }

        // Assert
        assert_eq!(manager.step(), 0);
        for (id, tip) in before {
            assert_eq!(manager.history().latest(&id), Some(&tip));
            assert_eq!(manager.history().len(&id), 1);
        }
        for step in 1..4 {
            let label = ElementId::indexed("label", step).unwrap();
            assert_eq!(manager.history().len(&label), 1);
            assert!(stage.is_hidden(&label).unwrap());
        }
        assert_eq!(stage.attribute(&ElementId::new("marker").unwrap(), "x").unwrap().as_deref(), Some("0"));
    }

    #[test]
    fn test_going_back_only_touches_elements_of_the_undone_step() {
        // Arrange
        let mut manager = TransitionsManager::new(3).unwrap();
        let mut stage = RecordingStage::new();
        let mut drawer = MarkerDrawer { steps: 3 };
        start(&mut manager, &mut stage, &mut drawer).unwrap();
        go(Direction::Next, &mut manager, &mut stage, &mut drawer);
        go(Direction::Next, &mut manager, &mut stage, &mut drawer);
        stage.clear();

        // Act
        let event = go(Direction::Prev, &mut manager, &mut stage, &mut drawer);

        // Assert
        let touched: Vec<_> = stage.touched_elements().into_iter().collect();
        assert_eq!(
            touched,
            vec![
                ElementId::new("label-2").unwrap(),
                ElementId::new("marker").unwrap()
            ]
        );
        assert_eq!(event.event_type(), "navigation.step_reverted");
        assert!(stage.is_hidden(&ElementId::new("label-2").unwrap()).unwrap());
        assert!(!stage.is_hidden(&ElementId::new("label-1").unwrap()).unwrap());
    }

    #[test]
    fn test_reentering_a_step_reuses_the_hidden_element() {
        // Arrange
        let (mut manager, mut stage, mut drawer) = started(2);
        go(Direction::Next, &mut manager, &mut stage, &mut drawer);
        go(Direction::Prev, &mut manager, &mut stage, &mut drawer);
        let elements = stage.element_count();

        // Act
        let event = go(Direction::Next, &mut manager, &mut stage, &mut drawer);

        // Assert
        let label = ElementId::new("label-1").unwrap();
        assert_eq!(stage.element_count(), elements);
        assert!(!stage.is_hidden(&label).unwrap());
        assert_eq!(stage.attribute(&label, "opacity").unwrap().as_deref(), Some("1"));
        assert_eq!(manager.history().len(&label), 2);
        assert_eq!(event.current_step(), 1);
    }
}
