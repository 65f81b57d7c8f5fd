//! Deterministic RNG wrapper and seed-derivation helpers.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rand_distr::{Distribution, Exp, UnitSphere};
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

use crate::Vec3;

/// Deterministic RNG handle threaded through every stochastic component.
///
/// The handle is a thin wrapper around `StdRng`. Components never own a
/// generator; the caller passes the handle in, so a realization is a pure
/// function of its seed. Per-realization seeds are derived by hashing
/// `(master_seed, index)` with SipHash-1-3 under fixed zero keys, which keeps
/// the streams identical across platforms and thread counts.
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
}

impl RngHandle {
    /// Creates a new RNG handle from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws a direction uniformly distributed on the unit sphere.
    pub fn unit_vector(&mut self) -> Vec3 {
        let [x, y, z]: [f64; 3] = UnitSphere.sample(&mut self.rng);
        Vec3::new(x, y, z)
    }

    /// Draws an exponentially distributed waiting time with mean `1 / rate`.
    ///
    /// A rate of zero never fires and yields `f64::INFINITY` without
    /// consuming randomness.
    pub fn waiting_time(&mut self, rate: f64) -> f64 {
        if rate <= 0.0 {
            return f64::INFINITY;
        }
        match Exp::new(rate) {
            Ok(dist) => dist.sample(&mut self.rng),
            Err(_) => f64::INFINITY,
        }
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Derives the deterministic seed for a specific substream.
pub fn derive_substream_seed(master_seed: u64, substream: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(substream);
    hasher.finish()
}
