//! External magnetic field profiles.
//!
//! A profile advances a spin across an interval of constant momentum. The
//! effective spin-orbit field is constant on the interval; the profile adds
//! its own time dependence on top and splits the interval at most once.

use std::fmt;

use dprw_core::{rotate, DprwError, Vec3};

use crate::{require_finite, require_finite_vector};

/// Time-dependent external field applied on top of the spin-orbit field.
pub trait MagneticField: fmt::Debug + Send + Sync {
    /// Spin after free precession from `t0` to `t1` starting at `spin`, with
    /// `omega` the effective spin-orbit field active over the interval.
    fn advance(&self, spin: &Vec3, t0: f64, t1: f64, omega: &Vec3) -> Vec3;
}

/// Precesses under `before` until `t_switch` and under `after` from then on.
///
/// The interval is split only when `t_switch` lies strictly inside it.
fn precess_split(spin: &Vec3, t0: f64, t1: f64, t_switch: f64, before: Vec3, after: Vec3) -> Vec3 {
    if t1 <= t_switch {
        rotate(spin, &(before * (t1 - t0)))
    } else if t0 >= t_switch {
        rotate(spin, &(after * (t1 - t0)))
    } else {
        let at_switch = rotate(spin, &(before * (t_switch - t0)));
        rotate(&at_switch, &(after * (t1 - t_switch)))
    }
}

/// No external field: precession under the effective field only.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Zero;

impl MagneticField for Zero {
    fn advance(&self, spin: &Vec3, t0: f64, t1: f64, omega: &Vec3) -> Vec3 {
        rotate(spin, &(omega * (t1 - t0)))
    }
}

/// Field switched on from zero to `field` at absolute time `tstep`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    field: Vec3,
    tstep: f64,
}

impl Step {
    /// Creates the profile.
    pub fn new(field: Vec3, tstep: f64) -> Result<Self, DprwError> {
        require_finite_vector("field", &field)?;
        require_finite("tstep", tstep)?;
        Ok(Self { field, tstep })
    }

    /// Field applied after the switch.
    pub fn field(&self) -> Vec3 {
        self.field
    }

    /// Switch time.
    pub fn tstep(&self) -> f64 {
        self.tstep
    }
}

impl MagneticField for Step {
    fn advance(&self, spin: &Vec3, t0: f64, t1: f64, omega: &Vec3) -> Vec3 {
        precess_split(spin, t0, t1, self.tstep, *omega, omega + self.field)
    }
}

/// Instantaneous pi pulse at `tflip` that inverts the effective field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Echo {
    tflip: f64,
}

impl Echo {
    /// Creates the profile.
    pub fn new(tflip: f64) -> Result<Self, DprwError> {
        require_finite("tflip", tflip)?;
        Ok(Self { tflip })
    }

    /// Pulse time.
    pub fn tflip(&self) -> f64 {
        self.tflip
    }
}

impl MagneticField for Echo {
    fn advance(&self, spin: &Vec3, t0: f64, t1: f64, omega: &Vec3) -> Vec3 {
        precess_split(spin, t0, t1, self.tflip, *omega, -omega)
    }
}
