//! Band and linear scales.
//!
//! The arithmetic follows d3-scale so that a chart drawn here lines up pixel
//! for pixel with the same chart drawn in a browser.

/// Maps the indices `0..count` to evenly spaced bands over a pixel range.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    start: f64,
    step: f64,
    bandwidth: f64,
    count: usize,
}

impl BandScale {
    /// Builds a scale over `count` bands in `[range_start, range_end]` with
    /// the given inner padding (fraction of a step), no outer padding and
    /// centred alignment. With `round`, step, offset and bandwidth are whole
    /// pixels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(count: usize, range_start: f64, range_end: f64, padding_inner: f64, round: bool) -> Self {
        const ALIGN: f64 = 0.5;
        let n = count as f64;
        let extent = range_end - range_start;
        let mut step = extent / (n - padding_inner).max(1.0);
        if round {
            step = step.floor();
        }
        let mut start = range_start + (extent - step * (n - padding_inner)) * ALIGN;
        let mut bandwidth = step * (1.0 - padding_inner);
        if round {
            start = start.round();
            bandwidth = bandwidth.round();
        }
        Self {
            start,
            step,
            bandwidth,
            count,
        }
    }

    /// Left edge of band `index`, `None` outside the domain.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn position(&self, index: usize) -> Option<f64> {
        (index < self.count).then(|| self.start + self.step * index as f64)
    }

    /// Width of every band.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Number of bands.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Maps a continuous domain to a pixel range.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Builds a scale from `domain` to `range`.
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps `value`. A degenerate domain maps everything to the middle of
    /// the range.
    #[must_use]
    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span.abs() < f64::EPSILON {
            0.5
        } else {
            (value - d0) / span
        };
        r0 + t * (r1 - r0)
    }

    /// Roughly `count` round tick values covering the domain.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut lo, mut hi) = self.domain;
        let reverse = hi < lo;
        if reverse {
            std::mem::swap(&mut lo, &mut hi);
        }
        let mut ticks = nice_ticks(lo, hi, count);
        if reverse {
            ticks.reverse();
        }
        ticks
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let e10 = 50_f64.sqrt();
    let e5 = 10_f64.sqrt();
    let e2 = 2_f64.sqrt();

    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    if power < 0.0 {
        let inc = 10_f64.powf(-power) / factor;
        let mut i1 = (start * inc).round();
        let mut i2 = (stop * inc).round();
        if i1 / inc < start {
            i1 += 1.0;
        }
        if i2 / inc > stop {
            i2 -= 1.0;
        }
        let n = (i2 - i1) as i64;
        (0..=n).map(|i| (i1 + i as f64) / inc).collect()
    } else {
        let inc = 10_f64.powf(power) * factor;
        let mut i1 = (start / inc).round();
        let mut i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        let n = (i2 - i1) as i64;
        (0..=n).map(|i| (i1 + i as f64) * inc).collect()
    }
}
