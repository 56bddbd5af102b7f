//! Test stages: `Stage` implementations that record or fail.

use std::collections::BTreeSet;
use std::time::Duration;

use scrolly_core::element::{Attributes, ElementId};
use scrolly_core::error::ScrollyError;
use scrolly_core::stage::Stage;
use scrolly_core::transition::{TransitionId, TransitionSpec};
use scrolly_stage::MemoryStage;

/// A mutation observed by a [`RecordingStage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageCall {
    /// An element was created.
    Append(ElementId),
    /// An attribute was set immediately.
    SetAttribute {
        /// Target element.
        id: ElementId,
        /// Attribute name.
        name: String,
        /// New value.
        value: String,
    },
    /// A transition was started.
    StartTransition {
        /// Target element.
        id: ElementId,
        /// Attribute values the transition animates to.
        targets: Attributes,
    },
}

impl StageCall {
    /// The element this call touched.
    #[must_use]
    pub fn element(&self) -> &ElementId {
        match self {
            Self::Append(id)
            | Self::SetAttribute { id, .. }
            | Self::StartTransition { id, .. } => id,
        }
    }
}

/// A [`MemoryStage`] that records every mutation made through the `Stage`
/// trait. Time advancement is forwarded but not recorded.
#[derive(Debug, Default)]
pub struct RecordingStage {
    inner: MemoryStage,
    calls: Vec<StageCall>,
}

impl RecordingStage {
    /// Create an empty recording stage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The wrapped stage.
    #[must_use]
    pub fn inner(&self) -> &MemoryStage {
        &self.inner
    }

    /// All recorded calls, oldest first.
    #[must_use]
    pub fn calls(&self) -> &[StageCall] {
        &self.calls
    }

    /// The set of elements mutated since the last [`RecordingStage::clear`].
    #[must_use]
    pub fn touched_elements(&self) -> BTreeSet<ElementId> {
        self.calls.iter().map(|call| call.element().clone()).collect()
    }

    /// Forget the recorded calls.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Stage for RecordingStage {
    fn contains(&self, id: &ElementId) -> bool {
        self.inner.contains(id)
    }

    fn append(
        &mut self,
        parent: Option<&ElementId>,
        tag: &str,
        id: ElementId,
    ) -> Result<(), ScrollyError> {
        self.inner.append(parent, tag, id.clone())?;
        self.calls.push(StageCall::Append(id));
        Ok(())
    }

    fn set_text(&mut self, id: &ElementId, text: &str) -> Result<(), ScrollyError> {
        self.inner.set_text(id, text)
    }

    fn attribute(&self, id: &ElementId, name: &str) -> Result<Option<String>, ScrollyError> {
        self.inner.attribute(id, name)
    }

    fn attributes(&self, id: &ElementId) -> Result<Attributes, ScrollyError> {
        self.inner.attributes(id)
    }

    fn set_attribute(
        &mut self,
        id: &ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), ScrollyError> {
        self.inner.set_attribute(id, name, value)?;
        self.calls.push(StageCall::SetAttribute {
            id: id.clone(),
            name: name.to_owned(),
            value: value.to_owned(),
        });
        Ok(())
    }

    fn start_transition(
        &mut self,
        id: &ElementId,
        spec: TransitionSpec,
        targets: Attributes,
    ) -> Result<TransitionId, ScrollyError> {
        let transition = self.inner.start_transition(id, spec, targets.clone())?;
        self.calls.push(StageCall::StartTransition {
            id: id.clone(),
            targets,
        });
        Ok(transition)
    }

    fn advance(&mut self, elapsed: Duration) -> Vec<TransitionId> {
        self.inner.advance(elapsed)
    }

    fn pending_transitions(&self) -> usize {
        self.inner.pending_transitions()
    }
}

/// A stage with no elements that refuses every mutation. Useful for testing
/// the "missing element" propagation paths.
#[derive(Debug)]
pub struct FailingStage;

impl Stage for FailingStage {
    fn contains(&self, _id: &ElementId) -> bool {
        false
    }

    fn append(
        &mut self,
        _parent: Option<&ElementId>,
        _tag: &str,
        id: ElementId,
    ) -> Result<(), ScrollyError> {
        Err(ScrollyError::ElementNotFound(id))
    }

    fn set_text(&mut self, id: &ElementId, _text: &str) -> Result<(), ScrollyError> {
        Err(ScrollyError::ElementNotFound(id.clone()))
    }

    fn attribute(&self, id: &ElementId, _name: &str) -> Result<Option<String>, ScrollyError> {
        Err(ScrollyError::ElementNotFound(id.clone()))
    }

    fn attributes(&self, id: &ElementId) -> Result<Attributes, ScrollyError> {
        Err(ScrollyError::ElementNotFound(id.clone()))
    }

    fn set_attribute(
        &mut self,
        id: &ElementId,
        _name: &str,
        _value: &str,
    ) -> Result<(), ScrollyError> {
        Err(ScrollyError::ElementNotFound(id.clone()))
    }

    fn start_transition(
        &mut self,
        id: &ElementId,
        _spec: TransitionSpec,
        _targets: Attributes,
    ) -> Result<TransitionId, ScrollyError> {
        Err(ScrollyError::ElementNotFound(id.clone()))
    }

    fn advance(&mut self, _elapsed: Duration) -> Vec<TransitionId> {
        Vec::new()
    }

    fn pending_transitions(&self) -> usize {
        0
    }
}
