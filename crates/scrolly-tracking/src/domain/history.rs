//! Per-element attribute history.

use std::collections::HashMap;

use scrolly_core::element::{AttributeSnapshot, ElementId};

/// Stack of snapshots per element, oldest first.
///
/// The first snapshot of an element is its creation state. [`ElementHistory::pop`]
/// never removes it.
#[derive(Debug, Default)]
pub struct ElementHistory {
    snapshots: HashMap<ElementId, Vec<AttributeSnapshot>>,
}

impl ElementHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a snapshot, creating the element's stack if needed. Returns the
    /// new stack length.
    pub fn push(&mut self, id: &ElementId, snapshot: AttributeSnapshot) -> usize {
        let stack = self.snapshots.entry(id.clone()).or_default();
        stack.push(snapshot);
        stack.len()
    }

    /// The most recent snapshot.
    #[must_use]
    pub fn latest(&self, id: &ElementId) -> Option<&AttributeSnapshot> {
        self.snapshots.get(id).and_then(|stack| stack.last())
    }

    /// The snapshot before the most recent one, if there is one.
    #[must_use]
    pub fn previous(&self, id: &ElementId) -> Option<&AttributeSnapshot> {
        let stack = self.snapshots.get(id)?;
        stack.len().checked_sub(2).map(|index| &stack[index])
    }

    /// Removes the most recent snapshot unless it is the creation state.
    pub fn pop(&mut self, id: &ElementId) -> Option<AttributeSnapshot> {
        let stack = self.snapshots.get_mut(id)?;
        if stack.len() > 1 { stack.pop() } else { None }
    }

    /// Number of snapshots recorded for an element, 0 if it was never saved.
    #[must_use]
    pub fn len(&self, id: &ElementId) -> usize {
        self.snapshots.get(id).map_or(0, Vec::len)
    }

    /// Returns `true` if the element has at least one snapshot.
    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.snapshots.contains_key(id)
    }

    /// Number of tracked elements.
    #[must_use]
    pub fn tracked_elements(&self) -> usize {
        self.snapshots.len()
    }

    /// Iterates over every tracked element and its most recent snapshot.
    pub fn tips(&self) -> impl Iterator<Item = (&ElementId, &AttributeSnapshot)> {
        self.snapshots
            .iter()
            .filter_map(|(id, stack)| stack.last().map(|tip| (id, tip)))
    }
}

#[cfg(test)]
mod tests {
    use scrolly_core::element::Attributes;

    use super::*;

    fn snapshot(opacity: &str) -> AttributeSnapshot {
        Attributes::new().with("opacity", opacity)
    }

    #[test]
    fn test_first_push_creates_stack_without_previous() {
        // Arrange
        let mut history = ElementHistory::new();
        let id = ElementId::new("y-axis").unwrap();

        // Act
        let len = history.push(&id, snapshot("0"));

        // Assert
        assert_eq!(len, 1);
        assert_eq!(history.latest(&id), Some(&snapshot("0")));
        assert_eq!(history.previous(&id), None);
    }

    #[test]
    fn test_pop_stops_at_creation_state() {
        // Arrange
        let mut history = ElementHistory::new();
        let id = ElementId::new("y-axis").unwrap();
        history.push(&id, snapshot("0"));
        history.push(&id, snapshot("1"));

        // Act
        let popped = history.pop(&id);
        let floor = history.pop(&id);

        // Assert
        assert_eq!(popped, Some(snapshot("1")));
        assert_eq!(floor, None);
        assert_eq!(history.len(&id), 1);
        assert_eq!(history.latest(&id), Some(&snapshot("0")));
    }

    #[test]
    fn test_unknown_element_has_no_history() {
        let mut history = ElementHistory::new();
        let id = ElementId::new("ghost").unwrap();

        assert_eq!(history.len(&id), 0);
        assert!(!history.contains(&id));
        assert_eq!(history.pop(&id), None);
    }
}
