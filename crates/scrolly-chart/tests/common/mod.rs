//! Shared fixtures for the chart scenario tests.

#![allow(dead_code)]

use std::time::Duration;

use scrolly_chart::steps::NUMBER_OF_STEPS;
use scrolly_chart::{BarChartSequence, ChartContext, ViewBox};
use scrolly_core::element::ElementId;
use scrolly_core::stage::Stage;
use scrolly_test_support::RecordingStage;
use scrolly_tracking::application::navigation::{handle_navigate, start};
use scrolly_tracking::application::pump::settle;
use scrolly_tracking::domain::commands::{Direction, Navigate};
use scrolly_tracking::domain::events::NavigationEvent;
use scrolly_tracking::domain::manager::TransitionsManager;

/// Mean 244 / 15, top three values 32, 30 and 27.
pub const DATASET: [u32; 15] = [12, 30, 7, 22, 3, 18, 27, 9, 15, 32, 5, 20, 11, 25, 8];

const FRAME: Duration = Duration::from_millis(16);
const MAX_FRAMES: usize = 1_000;

/// A started chart whose transitions have all completed.
pub struct Harness {
    pub manager: TransitionsManager,
    pub stage: RecordingStage,
    pub drawer: BarChartSequence,
}

impl Harness {
    /// Draws step 0 and lets it settle.
    pub fn start() -> Self {
        let context = ChartContext::new(ViewBox::default(), DATASET.to_vec()).unwrap();
        let mut harness = Self {
            manager: TransitionsManager::new(NUMBER_OF_STEPS).unwrap(),
            stage: RecordingStage::new(),
            drawer: BarChartSequence::new(context),
        };
        start(&mut harness.manager, &mut harness.stage, &mut harness.drawer).unwrap();
        harness.settle();
        harness
    }

    /// Navigates once and lets the step settle.
    pub fn navigate(&mut self, direction: Direction) -> NavigationEvent {
        let event = handle_navigate(
            &Navigate::new(direction),
            &mut self.manager,
            &mut self.stage,
            &mut self.drawer,
        )
        .unwrap();
        self.settle();
        event
    }

    /// Navigates forward until `step` is reached.
    pub fn advance_to(&mut self, step: usize) {
        while self.manager.step() < step {
            self.navigate(Direction::Next);
        }
    }

    pub fn settle(&mut self) {
        settle(&mut self.manager, &mut self.stage, FRAME, MAX_FRAMES).unwrap();
    }

    pub fn attribute(&self, id: &ElementId, name: &str) -> Option<String> {
        self.stage.attribute(id, name).unwrap()
    }

    pub fn is_hidden(&self, id: &ElementId) -> bool {
        self.stage.is_hidden(id).unwrap()
    }

    /// Current fill of every bar.
    pub fn fills(&self) -> Vec<String> {
        (0..DATASET.len())
            .map(|index| {
                let bar = ElementId::indexed("bar", index).unwrap();
                self.attribute(&bar, "fill").unwrap()
            })
            .collect()
    }
}

pub fn id(raw: &str) -> ElementId {
    ElementId::new(raw).unwrap()
}
