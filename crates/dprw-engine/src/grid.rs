//! Fixed-step output time grid.

use dprw_core::DprwError;

/// Sample times `start + i * step` for `i` in `0..samples`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    start: f64,
    duration: f64,
    step: f64,
    samples: usize,
}

impl TimeGrid {
    /// Builds the grid covering `duration` from `start` with spacing `step`.
    ///
    /// `samples = floor(duration / step)`, with a small relative tolerance so
    /// that ratios like `1.0 / 0.1` land on the intended integer.
    pub fn new(start: f64, duration: f64, step: f64) -> Result<Self, DprwError> {
        if !start.is_finite() {
            return Err(DprwError::parameter(
                "invalid-start-time",
                format!("start_time must be finite, got {start}"),
            )
            .with_context("field", "start_time"));
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(DprwError::parameter(
                "invalid-duration",
                format!("duration must be finite and > 0, got {duration}"),
            )
            .with_context("field", "duration"));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(DprwError::parameter(
                "invalid-time-step",
                format!("time_step must be finite and > 0, got {step}"),
            )
            .with_context("field", "time_step"));
        }
        if step > duration {
            return Err(DprwError::parameter(
                "time-step-exceeds-duration",
                format!("time_step {step} exceeds duration {duration}"),
            )
            .with_context("field", "time_step"));
        }
        let ratio = duration / step;
        let samples = (ratio * (1.0 + 1e-9)).floor() as usize;
        Ok(Self {
            start,
            duration,
            step,
            samples,
        })
    }

    /// First sample time.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Spacing between samples.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Half the spacing; the resolution of echo rotation histories.
    pub fn half_step(&self) -> f64 {
        self.step / 2.0
    }

    /// Number of samples.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// End of the simulated span, `start + duration`.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Time of sample `index`.
    pub fn time(&self, index: usize) -> f64 {
        self.start + index as f64 * self.step
    }

    /// Iterator over all sample times in ascending order.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.samples).map(move |i| self.time(i))
    }
}
