//! Identifiers and colours of the chart's elements.

use scrolly_core::element::ElementId;
use scrolly_core::error::ScrollyError;

/// Root `svg` element.
pub const ROOT: &str = "visualization";
/// Bottom axis group.
pub const X_AXIS: &str = "x-axis";
/// Left axis group.
pub const Y_AXIS: &str = "y-axis";
/// Group holding the bars.
pub const BARS: &str = "bars";
/// Prefix of each bar's id; bar `i` is `bar-i`.
pub const BAR_PREFIX: &str = "bar";
/// Mean line group.
pub const MEAN_VIS: &str = "mean-vis";
/// "top values" caption.
pub const TOP_VALUES_TEXT: &str = "top-values-text";

/// Bar colour.
pub const PRIMARY: &str = "#4242eb";
/// Colour of bars below the mean.
pub const SECONDARY: &str = "#699dff";
/// Highlight colour of the top values.
pub const HIGHLIGHT: &str = "#ff0000";

/// Shorthand for a constant id.
///
/// # Errors
///
/// Returns `ScrollyError::Validation` for an invalid id.
pub fn id(raw: &str) -> Result<ElementId, ScrollyError> {
    ElementId::new(raw)
}

/// Id of bar `index`.
///
/// # Errors
///
/// Never fails for the built-in prefix.
pub fn bar(index: usize) -> Result<ElementId, ScrollyError> {
    ElementId::indexed(BAR_PREFIX, index)
}
