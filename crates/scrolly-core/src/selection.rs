//! Ordered selections of scene elements.

use crate::element::ElementId;

/// An ordered group of element ids that drawing code operates on together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(Vec<ElementId>);

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a selection of a single element.
    #[must_use]
    pub fn single(id: ElementId) -> Self {
        Self(vec![id])
    }

    /// Returns the sub-selection whose `(index, id)` satisfies `keep`.
    /// Indices refer to positions in `self`.
    #[must_use]
    pub fn filter(&self, mut keep: impl FnMut(usize, &ElementId) -> bool) -> Self {
        self.0
            .iter()
            .enumerate()
            .filter(|(index, id)| keep(*index, id))
            .map(|(_, id)| id.clone())
            .collect()
    }

    /// Iterates over the ids in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ElementId> {
        self.0.iter()
    }

    /// Number of selected elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ElementId> for Selection {
    fn from_iter<I: IntoIterator<Item = ElementId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a ElementId;
    type IntoIter = std::slice::Iter<'a, ElementId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_keeps_order_and_uses_original_indices() {
        let bars: Selection = (0..5)
            .map(|i| ElementId::indexed("bar", i).unwrap())
            .collect();

        let even = bars.filter(|index, _| index % 2 == 0);

        let ids: Vec<_> = even.iter().map(ElementId::as_str).collect();
        assert_eq!(ids, vec!["bar-0", "bar-2", "bar-4"]);
    }
}
