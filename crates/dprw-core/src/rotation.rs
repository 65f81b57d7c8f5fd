//! Rotation algebra on three-vectors.
//!
//! A [`Rotation`] is stored as a proper orthogonal matrix so composition is a
//! matrix product and inversion a transpose. [`rotate`] applies a single
//! rotation vector directly without materializing the matrix.

use std::ops::Mul;

use nalgebra::Matrix3;

use crate::Vec3;

/// Proper rotation of three-space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    matrix: Matrix3<f64>,
}

impl Rotation {
    /// The rotation that leaves every vector unchanged.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Rotation by `angle` radians about the unit vector `axis`.
    ///
    /// Uses the Rodrigues form `I + sin(a) K + (1 - cos(a)) K^2` where `K` is
    /// the cross-product matrix of `axis`.
    pub fn from_axis_angle(angle: f64, axis: &Vec3) -> Self {
        let k = axis.cross_matrix();
        Self {
            matrix: Matrix3::identity() + k * angle.sin() + k * k * (1.0 - angle.cos()),
        }
    }

    /// Rotation by `|phi|` radians about `phi / |phi|`.
    ///
    /// The zero vector maps to the identity.
    pub fn from_rotation_vector(phi: &Vec3) -> Self {
        let angle = phi.norm();
        if angle == 0.0 {
            return Self::identity();
        }
        Self::from_axis_angle(angle, &(phi / angle))
    }

    /// Inverse rotation; for an orthogonal matrix this is the transpose.
    pub fn inverse(&self) -> Self {
        Self {
            matrix: self.matrix.transpose(),
        }
    }

    /// Applies the rotation to `v`.
    pub fn apply(&self, v: &Vec3) -> Vec3 {
        self.matrix * v
    }

    /// Underlying matrix.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Largest absolute elementwise difference from `other`.
    pub fn distance(&self, other: &Rotation) -> f64 {
        (self.matrix - other.matrix).amax()
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

/// `a * b` applies `b` first, then `a`.
impl Mul for Rotation {
    type Output = Rotation;

    fn mul(self, rhs: Rotation) -> Rotation {
        Rotation {
            matrix: self.matrix * rhs.matrix,
        }
    }
}

impl Mul<Vec3> for Rotation {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        self.matrix * rhs
    }
}

/// Rotates `v` by the rotation vector `phi`.
///
/// Returns `v` unchanged when `|phi| == 0`.
pub fn rotate(v: &Vec3, phi: &Vec3) -> Vec3 {
    let angle = phi.norm();
    if angle == 0.0 {
        return *v;
    }
    let dir = phi / angle;
    let (sin, cos) = angle.sin_cos();
    v * cos + dir.cross(v) * sin + dir * (dir.dot(v) * (1.0 - cos))
}
