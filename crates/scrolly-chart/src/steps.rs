//! The five steps of the bar-chart narrative.
//!
//! Each step only describes its forward drawing. Going back is handled by the
//! manager, which replays the snapshots saved here.

use std::time::Duration;

use scrolly_core::element::{Attributes, ElementId};
use scrolly_core::error::ScrollyError;
use scrolly_core::selection::Selection;
use scrolly_core::stage::Stage;
use scrolly_core::transition::TransitionSpec;
use scrolly_tracking::application::navigation::StepDrawer;
use scrolly_tracking::application::tracked::{create_once, save_state, tracked_transition};
use scrolly_tracking::domain::manager::{EndAction, TransitionsManager};
use tracing::debug;

use crate::axis::{self, Orientation};
use crate::context::ChartContext;
use crate::ids;
use crate::stats;

/// Number of steps in the narrative.
pub const NUMBER_OF_STEPS: usize = 5;

/// Stagger between the bars growing in.
const BAR_STAGGER: Duration = Duration::from_millis(50);
/// Distance of tick labels from their axis.
const TICK_LABEL_OFFSET: f64 = 15.0;
/// Number of ticks asked of the value axis.
const Y_TICK_COUNT: usize = 10;
/// Number of highlighted values in the last step.
const TOP_VALUE_COUNT: usize = 3;

/// Draws the bar-chart narrative over one [`ChartContext`].
#[derive(Debug, Clone)]
pub struct BarChartSequence {
    context: ChartContext,
}

impl BarChartSequence {
    /// Creates the sequence.
    #[must_use]
    pub fn new(context: ChartContext) -> Self {
        Self { context }
    }

    /// The chart being drawn.
    #[must_use]
    pub fn context(&self) -> &ChartContext {
        &self.context
    }
}

impl StepDrawer for BarChartSequence {
    fn number_of_steps(&self) -> usize {
        NUMBER_OF_STEPS
    }

    fn draw_step(
        &mut self,
        step: usize,
        manager: &mut TransitionsManager,
        stage: &mut dyn Stage,
    ) -> Result<(), ScrollyError> {
        debug!(step, "drawing chart step");
        match step {
            0 => draw_step0(&self.context, manager, stage),
            1 => draw_step1(&self.context, manager, stage),
            2 => draw_step2(&self.context, manager, stage),
            3 => draw_step3(&self.context, manager, stage),
            4 => draw_step4(&self.context, manager, stage),
            _ => Err(ScrollyError::StepOutOfRange {
                step,
                number_of_steps: NUMBER_OF_STEPS,
            }),
        }
    }
}

/// Selection of every bar, in dataset order.
///
/// # Errors
///
/// Never fails for the built-in ids.
pub fn bars(context: &ChartContext) -> Result<Selection, ScrollyError> {
    (0..context.dataset().len()).map(ids::bar).collect()
}

fn num(value: f64) -> String {
    value.to_string()
}

fn translate(x: f64, y: f64) -> String {
    format!("translate({x},{y})")
}

/// Creates the root, the value-index axis and the bars, then grows the bars
/// from the baseline to their values.
///
/// # Errors
///
/// Propagates stage errors.
pub fn draw_step0(
    context: &ChartContext,
    manager: &mut TransitionsManager,
    stage: &mut dyn Stage,
) -> Result<(), ScrollyError> {
    let view_box = context.view_box();
    let baseline = view_box.baseline();
    let root = ids::id(ids::ROOT)?;
    create_once(stage, &root, |stage| {
        stage.append(None, "svg", root.clone())?;
        stage.set_attribute(&root, "viewBox", &view_box.attribute())
    })?;

    let x_axis = ids::id(ids::X_AXIS)?;
    create_once(stage, &x_axis, |stage| {
        stage.append(Some(&root), "g", x_axis.clone())?;
        stage.set_attribute(&x_axis, "opacity", "1")?;
        stage.set_attribute(&x_axis, "transform", &translate(0.0, baseline))?;
        axis::draw_axis(
            stage,
            &x_axis,
            Orientation::Bottom,
            (view_box.padding_left, view_box.width - view_box.padding_right),
            &axis::band_ticks(context.x_scale()),
            TICK_LABEL_OFFSET,
        )
    })?;

    let group = ids::id(ids::BARS)?;
    let bars = bars(context)?;
    create_once(stage, &group, |stage| {
        stage.append(Some(&root), "g", group.clone())?;
        for (index, bar) in bars.iter().enumerate() {
            stage.append(Some(&group), "rect", bar.clone())?;
            stage.set_attribute(bar, "fill", ids::PRIMARY)?;
            stage.set_attribute(bar, "width", &num(context.x_scale().bandwidth()))?;
            stage.set_attribute(bar, "x", &num(context.bar_x(index)?))?;
            stage.set_attribute(bar, "height", "0")?;
            stage.set_attribute(bar, "y", &num(baseline))?;
        }
        Ok(())
    })?;
    save_state(manager, stage, &bars)?;

    let y = context.y_scale();
    let dataset = context.dataset();
    tracked_transition(manager, stage, &bars, EndAction::EndTracking, |index, _| {
        let value = f64::from(dataset[index]);
        (
            TransitionSpec::delayed(BAR_STAGGER * u32::try_from(index).unwrap_or(u32::MAX)),
            Attributes::new()
                .with("y", num(y.scale(value)))
                .with("height", num(y.scale(0.0) - y.scale(value))),
        )
    })?;
    Ok(())
}

/// Creates the value axis once and slides it into place.
///
/// # Errors
///
/// Propagates stage errors.
pub fn draw_step1(
    context: &ChartContext,
    manager: &mut TransitionsManager,
    stage: &mut dyn Stage,
) -> Result<(), ScrollyError> {
    let view_box = context.view_box();
    let root = ids::id(ids::ROOT)?;
    let y_axis = ids::id(ids::Y_AXIS)?;
    create_once(stage, &y_axis, |stage| {
        stage.append(Some(&root), "g", y_axis.clone())?;
        stage.set_attribute(&y_axis, "opacity", "0")?;
        stage.set_attribute(&y_axis, "transform", &translate(-10.0, 0.0))?;
        manager.save(stage, &y_axis)?;
        axis::draw_axis(
            stage,
            &y_axis,
            Orientation::Left,
            (view_box.baseline(), view_box.padding_top),
            &axis::linear_ticks(context.y_scale(), Y_TICK_COUNT),
            TICK_LABEL_OFFSET,
        )
    })?;

    tracked_transition(
        manager,
        stage,
        &Selection::single(y_axis),
        EndAction::EndTracking,
        |_, _| {
            (
                TransitionSpec::default(),
                Attributes::new()
                    .with("transform", translate(view_box.padding_left, 0.0))
                    .with("opacity", "1"),
            )
        },
    )?;
    Ok(())
}

/// Creates the mean line once and moves it to the mean.
///
/// # Errors
///
/// Propagates stage errors.
pub fn draw_step2(
    context: &ChartContext,
    manager: &mut TransitionsManager,
    stage: &mut dyn Stage,
) -> Result<(), ScrollyError> {
    let view_box = context.view_box();
    let root = ids::id(ids::ROOT)?;
    let mean_vis = ids::id(ids::MEAN_VIS)?;
    create_once(stage, &mean_vis, |stage| {
        stage.append(Some(&root), "g", mean_vis.clone())?;
        stage.set_attribute(&mean_vis, "opacity", "0")?;
        // The transform must exist for the move to interpolate from.
        stage.set_attribute(&mean_vis, "transform", &translate(0.0, 0.0))?;
        manager.save(stage, &mean_vis)?;

        let line = ElementId::new(format!("{mean_vis}-line"))?;
        stage.append(Some(&mean_vis), "rect", line.clone())?;
        stage.set_attribute(&line, "width", &num(view_box.padded_width() + 20.0))?;
        stage.set_attribute(&line, "x", &num(view_box.padding_left))?;
        stage.set_attribute(&line, "height", "2")?;

        let label = ElementId::new(format!("{mean_vis}-label"))?;
        stage.append(Some(&mean_vis), "text", label.clone())?;
        stage.set_text(&label, "mean")?;
        stage.set_attribute(&label, "font-size", "20")?;
        stage.set_attribute(&label, "font-family", "sans-serif")?;
        stage.set_attribute(&label, "text-anchor", "center")?;
        stage.set_attribute(&label, "dominant-baseline", "central")?;
        stage.set_attribute(
            &label,
            "x",
            &num(view_box.padding_left + view_box.padded_width() + 30.0),
        )
    })?;

    let mean_y = context.y_scale().scale(context.mean());
    tracked_transition(
        manager,
        stage,
        &Selection::single(mean_vis),
        EndAction::EndTracking,
        |_, _| {
            (
                TransitionSpec::default(),
                Attributes::new()
                    .with("transform", translate(0.0, mean_y))
                    .with("opacity", "1"),
            )
        },
    )?;
    Ok(())
}

/// Recolours the bars below the mean.
///
/// # Errors
///
/// Propagates stage errors.
pub fn draw_step3(
    context: &ChartContext,
    manager: &mut TransitionsManager,
    stage: &mut dyn Stage,
) -> Result<(), ScrollyError> {
    let mean = context.mean();
    let dataset = context.dataset();
    let below = bars(context)?.filter(|index, _| f64::from(dataset[index]) < mean);
    debug!(bars = below.len(), mean, "recolouring bars below the mean");
    tracked_transition(manager, stage, &below, EndAction::EndTracking, |_, _| {
        (
            TransitionSpec::default(),
            Attributes::new().with("fill", ids::SECONDARY),
        )
    })?;
    Ok(())
}

/// Fades out the mean line, captions the chart and highlights the top three
/// values.
///
/// # Errors
///
/// Propagates stage errors.
pub fn draw_step4(
    context: &ChartContext,
    manager: &mut TransitionsManager,
    stage: &mut dyn Stage,
) -> Result<(), ScrollyError> {
    let view_box = context.view_box();
    let dataset = context.dataset();
    let top = stats::top_values(dataset, TOP_VALUE_COUNT);

    tracked_transition(
        manager,
        stage,
        &Selection::single(ids::id(ids::MEAN_VIS)?),
        EndAction::EndTrackingThenHide,
        |_, _| {
            (
                TransitionSpec::default(),
                Attributes::new()
                    .with("transform", translate(0.0, 0.0))
                    .with("opacity", "0"),
            )
        },
    )?;

    let root = ids::id(ids::ROOT)?;
    let caption = ids::id(ids::TOP_VALUES_TEXT)?;
    create_once(stage, &caption, |stage| {
        stage.append(Some(&root), "text", caption.clone())?;
        stage.set_attribute(&caption, "opacity", "0")?;
        stage.set_text(&caption, "top values")?;
        stage.set_attribute(&caption, "font-size", "20")?;
        stage.set_attribute(&caption, "text-anchor", "middle")?;
        stage.set_attribute(&caption, "fill", ids::HIGHLIGHT)?;
        stage.set_attribute(&caption, "font-family", "sans-serif")?;
        stage.set_attribute(&caption, "y", "0")?;
        stage.set_attribute(
            &caption,
            "x",
            &num(view_box.padding_left + 0.5 * view_box.padded_width()),
        )?;
        manager.save(stage, &caption)
    })?;

    let max = stats::max(dataset).map_or(0.0, f64::from);
    let caption_y = context.y_scale().scale(max) - 40.0;
    tracked_transition(
        manager,
        stage,
        &Selection::single(caption),
        EndAction::EndTracking,
        |_, _| {
            (
                TransitionSpec::default(),
                Attributes::new().with("y", num(caption_y)).with("opacity", "1"),
            )
        },
    )?;

    tracked_transition(manager, stage, &bars(context)?, EndAction::EndTracking, |index, _| {
        let fill = if top.contains(&dataset[index]) {
            ids::HIGHLIGHT
        } else {
            ids::PRIMARY
        };
        (TransitionSpec::default(), Attributes::new().with("fill", fill))
    })?;
    Ok(())
}
