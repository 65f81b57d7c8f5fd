//! Seed derivation for individual realizations.

use dprw_core::derive_substream_seed;

/// Seed of realization `index` under the run's master seed.
///
/// Depends only on the pair, so any scheduling of realizations over threads
/// sees the same random streams.
pub fn realization_seed(master_seed: u64, index: usize) -> u64 {
    derive_substream_seed(master_seed, index as u64)
}
