//! Initial conditions: where a particle starts in momentum and spin space.

use std::fmt;

use dprw_core::{DprwError, RngHandle, Vec3};

use crate::require_finite_vector;

/// Momentum direction and spin of one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinState {
    /// Momentum direction.
    pub k: Vec3,
    /// Spin vector.
    pub spin: Vec3,
}

/// Draws the starting state of a realization.
pub trait InitialCondition: fmt::Debug + Send + Sync {
    /// Draws one starting state using `rng`.
    fn roll(&self, rng: &mut RngHandle) -> SpinState;
}

/// Momentum and spin both uniform on the unit sphere, drawn in that order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Isotropic3D;

impl InitialCondition for Isotropic3D {
    fn roll(&self, rng: &mut RngHandle) -> SpinState {
        let k = rng.unit_vector();
        let spin = rng.unit_vector();
        SpinState { k, spin }
    }
}

/// Uniform momentum with a fixed spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polarized3D {
    spin: Vec3,
}

impl Polarized3D {
    /// Creates the condition; the spin is used as given, without normalization.
    pub fn new(spin: Vec3) -> Result<Self, DprwError> {
        require_finite_vector("spin", &spin)?;
        Ok(Self { spin })
    }

    /// The fixed starting spin.
    pub fn spin(&self) -> Vec3 {
        self.spin
    }
}

impl InitialCondition for Polarized3D {
    fn roll(&self, rng: &mut RngHandle) -> SpinState {
        SpinState {
            k: rng.unit_vector(),
            spin: self.spin,
        }
    }
}
