//! Axis drawing.
//!
//! An axis is a group holding a domain path and one group per tick with a
//! tick line and a label. Axes are plain scene elements; they take part in
//! tracking only through their outer group.

use scrolly_core::element::ElementId;
use scrolly_core::error::ScrollyError;
use scrolly_core::stage::Stage;

use crate::scale::{BandScale, LinearScale};

/// Length of a tick line.
const TICK_SIZE: f64 = 6.0;
/// Font size of tick labels.
const LABEL_FONT_SIZE: &str = "20";

/// Side of the plot an axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Below the plot, labels underneath.
    Bottom,
    /// Left of the plot, labels to the left.
    Left,
}

/// One tick: where it sits along the axis and what it says.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Offset along the axis.
    pub position: f64,
    /// Label text.
    pub label: String,
}

/// One tick per band, centred on the band, labelled with the band index.
#[must_use]
pub fn band_ticks(scale: &BandScale) -> Vec<Tick> {
    let half = scale.bandwidth() / 2.0;
    (0..scale.count())
        .filter_map(|index| {
            scale.position(index).map(|left| Tick {
                position: left + half,
                label: index.to_string(),
            })
        })
        .collect()
}

/// Round ticks over a linear scale.
#[must_use]
pub fn linear_ticks(scale: &LinearScale, count: usize) -> Vec<Tick> {
    scale
        .ticks(count)
        .into_iter()
        .map(|value| Tick {
            position: scale.scale(value),
            label: value.to_string(),
        })
        .collect()
}

/// Draws the content of an axis into the existing group `axis`.
///
/// `extent` is the covered range along the axis and `label_offset` the
/// distance of the labels from the axis line.
///
/// # Errors
///
/// Returns `ScrollyError::ElementNotFound` if `axis` does not exist and
/// `ScrollyError::DuplicateElement` if the axis was already drawn.
pub fn draw_axis(
    stage: &mut dyn Stage,
    axis: &ElementId,
    orientation: Orientation,
    extent: (f64, f64),
    ticks: &[Tick],
    label_offset: f64,
) -> Result<(), ScrollyError> {
    let (anchor, path) = match orientation {
        Orientation::Bottom => (
            "middle",
            format!("M{},{TICK_SIZE}V0H{}V{TICK_SIZE}", extent.0, extent.1),
        ),
        Orientation::Left => (
            "end",
            format!("M-{TICK_SIZE},{}H0V{}H-{TICK_SIZE}", extent.0, extent.1),
        ),
    };
    stage.set_attribute(axis, "fill", "none")?;
    stage.set_attribute(axis, "font-size", "10")?;
    stage.set_attribute(axis, "font-family", "sans-serif")?;
    stage.set_attribute(axis, "text-anchor", anchor)?;

    let domain = ElementId::new(format!("{axis}-domain"))?;
    stage.append(Some(axis), "path", domain.clone())?;
    stage.set_attribute(&domain, "stroke", "currentColor")?;
    stage.set_attribute(&domain, "d", &path)?;

    for (index, tick) in ticks.iter().enumerate() {
        let group = ElementId::new(format!("{axis}-tick-{index}"))?;
        let line = ElementId::new(format!("{group}-line"))?;
        let label = ElementId::new(format!("{group}-label"))?;

        stage.append(Some(axis), "g", group.clone())?;
        stage.set_attribute(&group, "opacity", "1")?;
        stage.append(Some(&group), "line", line.clone())?;
        stage.set_attribute(&line, "stroke", "currentColor")?;
        stage.append(Some(&group), "text", label.clone())?;
        stage.set_attribute(&label, "fill", "currentColor")?;
        stage.set_attribute(&label, "font-size", LABEL_FONT_SIZE)?;
        stage.set_text(&label, &tick.label)?;

        match orientation {
            Orientation::Bottom => {
                stage.set_attribute(&group, "transform", &format!("translate({},0)", tick.position))?;
                stage.set_attribute(&line, "y2", &TICK_SIZE.to_string())?;
                stage.set_attribute(&label, "y", &label_offset.to_string())?;
                stage.set_attribute(&label, "dy", "0.71em")?;
            }
            Orientation::Left => {
                stage.set_attribute(&group, "transform", &format!("translate(0,{})", tick.position))?;
                stage.set_attribute(&line, "x2", &(-TICK_SIZE).to_string())?;
                stage.set_attribute(&label, "x", &(-label_offset).to_string())?;
                stage.set_attribute(&label, "dy", "0.32em")?;
            }
        }
    }
    Ok(())
}
