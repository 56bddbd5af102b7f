//! Test RNG: deterministic `DeterministicRng` implementations for tests.

use scrolly_core::rng::DeterministicRng;

/// A no-op RNG that always returns `min` for `next_u32_range`. Every
/// generated dataset value is the lower bound.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

/// An RNG that replays a fixed list of values, wrapping around when it runs
/// out. Values outside the requested range are clamped into it, so a
/// dataset can be written down literally in a test.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        assert!(!values.is_empty(), "SequenceRng needs at least one value");
        Self { values, index: 0 }
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let val = self.values[self.index % self.values.len()];
        self.index += 1;
        val.clamp(min, max.max(min))
    }
}
