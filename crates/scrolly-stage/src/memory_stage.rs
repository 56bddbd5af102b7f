//! Retained in-memory scene.

use std::collections::HashMap;
use std::time::Duration;

use scrolly_core::element::{Attributes, ElementId};
use scrolly_core::error::ScrollyError;
use scrolly_core::stage::Stage;
use scrolly_core::transition::{TransitionId, TransitionSpec};
use tracing::trace;

use crate::interpolate::{ease_cubic_in_out, interpolate};

/// One element of the scene tree.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) tag: String,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) attributes: Attributes,
    pub(crate) text: Option<String>,
}

/// A scheduled or running transition.
#[derive(Debug)]
struct ScheduledTransition {
    id: TransitionId,
    element: ElementId,
    spec: TransitionSpec,
    scheduled_at: Duration,
    targets: Attributes,
    /// Attribute values captured when the delay elapsed.
    start_values: Option<Vec<Option<String>>>,
}

impl ScheduledTransition {
    fn ends_at(&self) -> Duration {
        self.scheduled_at + self.spec.end_offset()
    }
}

/// In-memory [`Stage`] driven by a virtual clock.
#[derive(Debug, Default)]
pub struct MemoryStage {
    pub(crate) nodes: HashMap<ElementId, Node>,
    pub(crate) roots: Vec<ElementId>,
    transitions: Vec<ScheduledTransition>,
    now: Duration,
    next_transition: u64,
}

impl MemoryStage {
    /// Creates an empty stage at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of elements in the scene.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.nodes.len()
    }

    /// Tag name of an element.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::ElementNotFound` if the element does not exist.
    pub fn tag(&self, id: &ElementId) -> Result<&str, ScrollyError> {
        Ok(self.node(id)?.tag.as_str())
    }

    /// Children of an element, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::ElementNotFound` if the element does not exist.
    pub fn children(&self, id: &ElementId) -> Result<&[ElementId], ScrollyError> {
        Ok(&self.node(id)?.children)
    }

    /// Parent of an element, `None` for roots.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::ElementNotFound` if the element does not exist.
    pub fn parent(&self, id: &ElementId) -> Result<Option<&ElementId>, ScrollyError> {
        Ok(self.node(id)?.parent.as_ref())
    }

    /// Text content of an element.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::ElementNotFound` if the element does not exist.
    pub fn text(&self, id: &ElementId) -> Result<Option<&str>, ScrollyError> {
        Ok(self.node(id)?.text.as_deref())
    }

    fn node(&self, id: &ElementId) -> Result<&Node, ScrollyError> {
        self.nodes
            .get(id)
            .ok_or_else(|| ScrollyError::ElementNotFound(id.clone()))
    }

    fn node_mut(&mut self, id: &ElementId) -> Result<&mut Node, ScrollyError> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| ScrollyError::ElementNotFound(id.clone()))
    }
}

impl Stage for MemoryStage {
    fn contains(&self, id: &ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    fn append(
        &mut self,
        parent: Option<&ElementId>,
        tag: &str,
        id: ElementId,
    ) -> Result<(), ScrollyError> {
        if self.nodes.contains_key(&id) {
            return Err(ScrollyError::DuplicateElement(id));
        }
        match parent {
            Some(parent) => self.node_mut(parent)?.children.push(id.clone()),
            None => self.roots.push(id.clone()),
        }
        self.nodes.insert(
            id,
            Node {
                tag: tag.to_owned(),
                parent: parent.cloned(),
                children: Vec::new(),
                attributes: Attributes::new(),
                text: None,
            },
        );
        Ok(())
    }

    fn set_text(&mut self, id: &ElementId, text: &str) -> Result<(), ScrollyError> {
        self.node_mut(id)?.text = Some(text.to_owned());
        Ok(())
    }

    fn attribute(&self, id: &ElementId, name: &str) -> Result<Option<String>, ScrollyError> {
        Ok(self.node(id)?.attributes.get(name).map(str::to_owned))
    }

    fn attributes(&self, id: &ElementId) -> Result<Attributes, ScrollyError> {
        Ok(self.node(id)?.attributes.clone())
    }

    fn set_attribute(
        &mut self,
        id: &ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), ScrollyError> {
        self.node_mut(id)?.attributes.set(name, value);
        Ok(())
    }

    fn start_transition(
        &mut self,
        id: &ElementId,
        spec: TransitionSpec,
        targets: Attributes,
    ) -> Result<TransitionId, ScrollyError> {
        self.node(id)?;
        self.next_transition += 1;
        let transition_id = TransitionId::from_raw(self.next_transition);
        trace!(%transition_id, element = %id, ?spec, "scheduled transition");
        self.transitions.push(ScheduledTransition {
            id: transition_id,
            element: id.clone(),
            spec,
            scheduled_at: self.now,
            targets,
            start_values: None,
        });
        Ok(transition_id)
    }

    fn advance(&mut self, elapsed: Duration) -> Vec<TransitionId> {
        self.now += elapsed;
        let now = self.now;
        let Self {
            nodes, transitions, ..
        } = self;

        let mut ended: Vec<(Duration, TransitionId)> = Vec::new();
        for transition in transitions.iter_mut() {
            let local = now.saturating_sub(transition.scheduled_at);
            if local < transition.spec.delay {
                continue;
            }
            let Some(node) = nodes.get_mut(&transition.element) else {
                ended.push((transition.ends_at(), transition.id));
                continue;
            };
            let start_values = transition.start_values.get_or_insert_with(|| {
                transition
                    .targets
                    .iter()
                    .map(|(name, _)| node.attributes.get(name).map(str::to_owned))
                    .collect()
            });

            let running = local - transition.spec.delay;
            let progress = if transition.spec.duration.is_zero() {
                1.0
            } else {
                (running.as_secs_f64() / transition.spec.duration.as_secs_f64()).min(1.0)
            };
            let eased = if progress >= 1.0 {
                1.0
            } else {
                ease_cubic_in_out(progress)
            };

            for ((name, target), start) in transition.targets.iter().zip(start_values.iter()) {
                if let Some(value) = interpolate(start.as_deref(), target, eased) {
                    node.attributes.set(name, value);
                }
            }

            if progress >= 1.0 {
                ended.push((transition.ends_at(), transition.id));
            }
        }

        transitions.retain(|transition| !ended.iter().any(|(_, id)| *id == transition.id));
        ended.sort();
        ended.into_iter().map(|(_, id)| id).collect()
    }

    fn pending_transitions(&self) -> usize {
        self.transitions.len()
    }
}
