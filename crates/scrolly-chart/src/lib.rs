//! Scrolly: bar-chart narrative.
//!
//! Draws a random dataset as bars and walks the reader through five views:
//! the bars grow in, the y-axis fades in, the mean line appears, bars below
//! the mean are recoloured, and finally the top three values are highlighted.

pub mod axis;
pub mod context;
pub mod ids;
pub mod scale;
pub mod stats;
pub mod steps;

pub use context::{ChartContext, ViewBox};
pub use steps::BarChartSequence;
