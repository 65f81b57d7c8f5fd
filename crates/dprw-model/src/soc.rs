//! Spin-orbit models: the effective field seen by a spin with momentum `k`.

use std::fmt;

use dprw_core::{DprwError, Vec3};

use crate::{require_finite, require_finite_vector};

/// Effective precession vector as a function of momentum.
pub trait SocModel: fmt::Debug + Send + Sync {
    /// Effective field for momentum `k`.
    fn omega(&self, k: &Vec3) -> Vec3;
}

/// Field parallel to the momentum: `omega * k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Isotropic3D {
    omega: f64,
}

impl Isotropic3D {
    /// Creates the model.
    pub fn new(omega: f64) -> Result<Self, DprwError> {
        require_finite("omega", omega)?;
        Ok(Self { omega })
    }

    /// Coupling strength.
    pub fn strength(&self) -> f64 {
        self.omega
    }
}

impl SocModel for Isotropic3D {
    fn omega(&self, k: &Vec3) -> Vec3 {
        k * self.omega
    }
}

/// Bulk cubic Dresselhaus field:
/// `omega * (kx (ky^2 - kz^2), ky (kz^2 - kx^2), kz (kx^2 - ky^2))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dresselhaus {
    omega: f64,
}

impl Dresselhaus {
    /// Creates the model.
    pub fn new(omega: f64) -> Result<Self, DprwError> {
        require_finite("omega", omega)?;
        Ok(Self { omega })
    }

    /// Coupling strength.
    pub fn strength(&self) -> f64 {
        self.omega
    }
}

impl SocModel for Dresselhaus {
    fn omega(&self, k: &Vec3) -> Vec3 {
        let (x2, y2, z2) = (k.x * k.x, k.y * k.y, k.z * k.z);
        Vec3::new(k.x * (y2 - z2), k.y * (z2 - x2), k.z * (x2 - y2)) * self.omega
    }
}

/// Constant field added to a wrapped model.
#[derive(Debug)]
pub struct Zeeman {
    bfield: Vec3,
    base: Box<dyn SocModel>,
}

impl Zeeman {
    /// Wraps `base`, adding `bfield` to every evaluation.
    pub fn new(bfield: Vec3, base: Box<dyn SocModel>) -> Result<Self, DprwError> {
        require_finite_vector("bfield", &bfield)?;
        Ok(Self { bfield, base })
    }

    /// Added field.
    pub fn bfield(&self) -> Vec3 {
        self.bfield
    }

    /// Wrapped model.
    pub fn base(&self) -> &dyn SocModel {
        self.base.as_ref()
    }
}

impl SocModel for Zeeman {
    fn omega(&self, k: &Vec3) -> Vec3 {
        self.base.omega(k) + self.bfield
    }
}

/// Wrapped model with each output component scaled by `lambdas`.
#[derive(Debug)]
pub struct Stretch {
    lambdas: Vec3,
    base: Box<dyn SocModel>,
}

impl Stretch {
    /// Wraps `base`, scaling its output componentwise.
    pub fn new(lambdas: Vec3, base: Box<dyn SocModel>) -> Result<Self, DprwError> {
        require_finite_vector("lambdas", &lambdas)?;
        Ok(Self { lambdas, base })
    }

    /// Per-axis scale factors.
    pub fn lambdas(&self) -> Vec3 {
        self.lambdas
    }

    /// Wrapped model.
    pub fn base(&self) -> &dyn SocModel {
        self.base.as_ref()
    }
}

impl SocModel for Stretch {
    fn omega(&self, k: &Vec3) -> Vec3 {
        self.base.omega(k).component_mul(&self.lambdas)
    }
}
