//! Layout, dataset and scales shared by every step of the chart.

use scrolly_core::error::ScrollyError;
use scrolly_core::rng::DeterministicRng;

use crate::scale::{BandScale, LinearScale};
use crate::stats;

/// Number of bars in a generated dataset.
pub const DEFAULT_BAR_COUNT: usize = 15;
/// Smallest generated bar value.
pub const MIN_VALUE: u32 = 3;
/// Largest generated bar value.
pub const MAX_VALUE: u32 = 32;

/// Outer size of the drawing and the padding around the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    /// Total width.
    pub width: f64,
    /// Total height.
    pub height: f64,
    /// Space above the plot area.
    pub padding_top: f64,
    /// Space below the plot area.
    pub padding_bottom: f64,
    /// Space left of the plot area.
    pub padding_left: f64,
    /// Space right of the plot area.
    pub padding_right: f64,
}

impl ViewBox {
    /// Width of the plot area.
    #[must_use]
    pub fn padded_width(&self) -> f64 {
        self.width - self.padding_left - self.padding_right
    }

    /// Height of the plot area.
    #[must_use]
    pub fn padded_height(&self) -> f64 {
        self.height - self.padding_top - self.padding_bottom
    }

    /// Y coordinate of the plot area's bottom edge.
    #[must_use]
    pub fn baseline(&self) -> f64 {
        self.padding_top + self.padded_height()
    }

    /// Value of the root element's `viewBox` attribute.
    #[must_use]
    pub fn attribute(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

impl Default for ViewBox {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 500.0,
            padding_top: 150.0,
            padding_bottom: 40.0,
            padding_left: 140.0,
            padding_right: 160.0,
        }
    }
}

/// Everything a step needs to draw: layout, data and scales.
#[derive(Debug, Clone)]
pub struct ChartContext {
    view_box: ViewBox,
    dataset: Vec<u32>,
    x_scale: BandScale,
    y_scale: LinearScale,
    mean: f64,
}

impl ChartContext {
    /// Builds the scales for `dataset`.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::Validation` if the dataset is empty.
    pub fn new(view_box: ViewBox, dataset: Vec<u32>) -> Result<Self, ScrollyError> {
        let (Some(mean), Some(max)) = (stats::mean(&dataset), stats::max(&dataset)) else {
            return Err(ScrollyError::Validation(
                "the chart needs at least one value".to_owned(),
            ));
        };
        let x_scale = BandScale::new(
            dataset.len(),
            view_box.padding_left,
            view_box.width - view_box.padding_right,
            0.1,
            true,
        );
        let y_scale = LinearScale::new(
            (0.0, f64::from(max)),
            (view_box.baseline(), view_box.padding_top),
        );
        Ok(Self {
            view_box,
            dataset,
            x_scale,
            y_scale,
            mean,
        })
    }

    /// Builds a context over `bar_count` random values in
    /// `[MIN_VALUE, MAX_VALUE]`.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::Validation` if `bar_count` is zero.
    pub fn random(
        view_box: ViewBox,
        bar_count: usize,
        rng: &mut dyn DeterministicRng,
    ) -> Result<Self, ScrollyError> {
        let dataset = (0..bar_count)
            .map(|_| rng.next_u32_range(MIN_VALUE, MAX_VALUE))
            .collect();
        Self::new(view_box, dataset)
    }

    /// Layout.
    #[must_use]
    pub fn view_box(&self) -> &ViewBox {
        &self.view_box
    }

    /// Bar values.
    #[must_use]
    pub fn dataset(&self) -> &[u32] {
        &self.dataset
    }

    /// Horizontal scale over bar indices.
    #[must_use]
    pub fn x_scale(&self) -> &BandScale {
        &self.x_scale
    }

    /// Vertical scale over values.
    #[must_use]
    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    /// Mean of the dataset.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Left edge of bar `index`.
    ///
    /// # Errors
    ///
    /// Returns `ScrollyError::Validation` if `index` is not a bar.
    pub fn bar_x(&self, index: usize) -> Result<f64, ScrollyError> {
        self.x_scale
            .position(index)
            .ok_or_else(|| ScrollyError::Validation(format!("no bar at index {index}")))
    }
}
