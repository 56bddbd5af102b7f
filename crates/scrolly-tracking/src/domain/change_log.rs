//! Per-step change log.

use scrolly_core::element::ElementId;
use scrolly_core::error::ScrollyError;

/// For each step, the elements changed while that step was current, in the
/// order they were first changed. Each element appears at most once per step.
#[derive(Debug)]
pub struct StepChangeLog {
    entries: Vec<Vec<ElementId>>,
}

impl StepChangeLog {
    /// Creates an empty log with one entry per step.
    #[must_use]
    pub fn new(number_of_steps: usize) -> Self {
        Self {
            entries: vec![Vec::new(); number_of_steps],
        }
    }

    /// Records `id` under `step`. Returns `false` if it was already recorded.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::StepOutOfRange` if `step` has no entry.
    pub fn record(&mut self, step: usize, id: &ElementId) -> Result<bool, ScrollyError> {
        let entry = self.entry_mut(step)?;
        if entry.contains(id) {
            return Ok(false);
        }
        entry.push(id.clone());
        Ok(true)
    }

    /// The elements recorded under `step`.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::StepOutOfRange` if `step` has no entry.
    pub fn entry(&self, step: usize) -> Result<&[ElementId], ScrollyError> {
        self.entries
            .get(step)
            .map(Vec::as_slice)
            .ok_or(ScrollyError::StepOutOfRange {
                step,
                number_of_steps: self.entries.len(),
            })
    }

    /// Empties the entry of `step`.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::StepOutOfRange` if `step` has no entry.
    pub fn clear(&mut self, step: usize) -> Result<(), ScrollyError> {
        self.entry_mut(step)?.clear();
        Ok(())
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the log has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, step: usize) -> Result<&mut Vec<ElementId>, ScrollyError> {
        let number_of_steps = self.entries.len();
        self.entries
            .get_mut(step)
            .ok_or(ScrollyError::StepOutOfRange {
                step,
                number_of_steps,
            })
    }
}
