//! Scattering models: when the momentum jumps and where it lands.

use std::fmt;

use dprw_core::{DprwError, RngHandle, Vec3};

/// One momentum jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatteringEvent {
    /// Momentum after the jump.
    pub k: Vec3,
    /// Waiting time until the jump, measured from the previous event.
    pub t: f64,
}

/// Produces the next momentum jump given the current momentum.
pub trait ScatteringModel: fmt::Debug + Send + Sync {
    /// Draws the next event; `t` may be `f64::INFINITY` when nothing ever happens.
    fn next_event(&self, k: &Vec3, rng: &mut RngHandle) -> ScatteringEvent;
}

/// Isotropic elastic scattering with exponential waiting times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Isotropic3D {
    scattering_rate: f64,
}

impl Isotropic3D {
    /// Creates the model. The rate must be finite and non-negative.
    pub fn new(scattering_rate: f64) -> Result<Self, DprwError> {
        if !scattering_rate.is_finite() || scattering_rate < 0.0 {
            return Err(DprwError::parameter(
                "invalid-rate",
                format!("scattering_rate must be finite and >= 0, got {scattering_rate}"),
            )
            .with_context("field", "scattering_rate"));
        }
        Ok(Self { scattering_rate })
    }

    /// Mean number of jumps per unit time.
    pub fn scattering_rate(&self) -> f64 {
        self.scattering_rate
    }
}

impl ScatteringModel for Isotropic3D {
    fn next_event(&self, _k: &Vec3, rng: &mut RngHandle) -> ScatteringEvent {
        let k = rng.unit_vector();
        let t = rng.waiting_time(self.scattering_rate);
        ScatteringEvent { k, t }
    }
}
