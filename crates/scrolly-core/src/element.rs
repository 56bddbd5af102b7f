//! Element identifiers, attribute sets and the display flag.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScrollyError;

/// Name of the attribute that controls whether an element is rendered.
pub const DISPLAY_ATTRIBUTE: &str = "display";

/// Stable, non-empty identifier of a scene element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ElementId(String);

impl ElementId {
    /// Creates an identifier.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::Validation` if `id` is empty or contains
    /// whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, ScrollyError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ScrollyError::Validation(
                "element id must not be empty".to_owned(),
            ));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(ScrollyError::Validation(format!(
                "element id {id:?} must not contain whitespace"
            )));
        }
        Ok(Self(id))
    }

    /// Creates `<prefix>-<index>`, the naming used for element families
    /// such as bars.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::Validation` if `prefix` is not a valid id.
    pub fn indexed(prefix: &str, index: usize) -> Result<Self, ScrollyError> {
        Self::new(format!("{prefix}-{index}"))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ElementId {
    type Error = ScrollyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ElementId {
    type Error = ScrollyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ElementId> for String {
    fn from(value: ElementId) -> Self {
        value.0
    }
}

/// Ordered list of `(name, value)` attribute pairs.
///
/// Names are unique; setting an existing name replaces its value in place so
/// the original insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes(Vec<(String, String)>);

/// An element's rendered attributes at one point in time, without its id.
pub type AttributeSnapshot = Attributes;

impl Attributes {
    /// Creates an empty attribute list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Attributes::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets `name` to `value`, appending the pair if `name` is new.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(pair) => pair.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Returns the value of `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (name, value) in iter {
            attributes.set(name, value);
        }
        attributes
    }
}

/// Value of the `display` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    /// Rendered.
    Block,
    /// Not rendered.
    None,
}

impl Display {
    /// The attribute value for this flag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::None => "none",
        }
    }
}
