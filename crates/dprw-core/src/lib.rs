#![deny(missing_docs)]
#![doc = "Core numeric types for the spin random walk: three-vectors, rotations, structured errors and deterministic randomness."]

pub mod errors;
pub mod rng;
pub mod rotation;

pub use errors::{DprwError, ErrorInfo};
pub use rng::{derive_substream_seed, RngHandle};
pub use rotation::{rotate, Rotation};

/// Three-component real vector used for momenta, spins and effective fields.
pub type Vec3 = nalgebra::Vector3<f64>;

/// Builds a [`Vec3`] from its components.
pub fn vec3(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x, y, z)
}
