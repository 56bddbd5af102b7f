//! Shared test mocks and utilities for the Scrolly narrative engine.

mod rng;
mod stage;

pub use rng::{MockRng, SequenceRng};
pub use stage::{FailingStage, RecordingStage, StageCall};
