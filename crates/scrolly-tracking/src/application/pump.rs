//! Delivers transition completions from the stage to the manager.

use std::time::Duration;

use scrolly_core::error::ScrollyError;
use scrolly_core::stage::Stage;
use tracing::debug;

use crate::domain::manager::TransitionsManager;

/// Advances the stage by one frame and runs the completion handler of every
/// transition that ended. Returns the number of completions delivered.
///
/// # Errors
///
/// Propagates errors from completion handlers.
pub fn pump(
    manager: &mut TransitionsManager,
    stage: &mut dyn Stage,
    elapsed: Duration,
) -> Result<usize, ScrollyError> {
    let ended = stage.advance(elapsed);
    let count = ended.len();
    for transition in ended {
        manager.complete_transition(stage, transition)?;
    }
    Ok(count)
}

/// Pumps frames until neither the manager nor the stage has transitions
/// left. Returns the number of frames advanced.
///
/// # Errors
///
/// Returns `ScrollyError::Stalled` if transitions remain after `max_frames`
/// frames, and propagates errors from completion handlers.
pub fn settle(
    manager: &mut TransitionsManager,
    stage: &mut dyn Stage,
    frame: Duration,
    max_frames: usize,
) -> Result<usize, ScrollyError> {
    let mut frames = 0;
    while !manager.is_idle() || stage.pending_transitions() > 0 {
        if frames == max_frames {
            return Err(ScrollyError::Stalled { frames });
        }
        pump(manager, stage, frame)?;
        frames += 1;
    }
    debug!(frames, "transitions settled");
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use scrolly_core::element::{Attributes, ElementId};
    use scrolly_core::transition::TransitionSpec;
    use scrolly_stage::MemoryStage;

    use super::*;
    use crate::domain::manager::EndAction;

    #[test]
    fn test_settle_on_idle_stage_advances_nothing() {
        let mut manager = TransitionsManager::new(1).unwrap();
        let mut stage = MemoryStage::new();

        let frames = settle(&mut manager, &mut stage, Duration::from_millis(16), 10).unwrap();

        assert_eq!(frames, 0);
        assert_eq!(stage.now(), Duration::ZERO);
    }

    #[test]
    fn test_settle_reports_stall_when_budget_is_too_small() {
        // Arrange
        let mut manager = TransitionsManager::new(1).unwrap();
        let mut stage = MemoryStage::new();
        let bar = ElementId::new("bar-0").unwrap();
        stage.append(None, "rect", bar.clone()).unwrap();
        manager
            .start_tracked_transition(
                &mut stage,
                &bar,
                TransitionSpec::default(),
                Attributes::new().with("height", "40"),
                EndAction::EndTracking,
            )
            .unwrap();

        // Act
        let result = settle(&mut manager, &mut stage, Duration::from_millis(16), 3);

        // Assert
        assert!(matches!(result, Err(ScrollyError::Stalled { frames: 3 })));
        assert_eq!(manager.number_of_active_transitions(), 1);

        let frames = settle(&mut manager, &mut stage, Duration::from_millis(16), 100).unwrap();
        assert!(frames > 0);
        assert!(manager.is_idle());
    }
}
