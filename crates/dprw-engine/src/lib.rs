#![deny(missing_docs)]
#![doc = "Monte Carlo engine for spin random walks: piecewise trajectories resampled on a fixed grid, spin-echo reconstruction from composed rotations, and deterministic ensemble averaging."]

pub mod accumulate;
pub mod determinism;
pub mod echo;
pub mod grid;
pub mod measurement;
pub mod trajectory;

pub use accumulate::{ensemble_average, Accumulator, BLOCK_SIZE};
pub use determinism::realization_seed;
pub use echo::RotationHistory;
pub use grid::TimeGrid;
pub use measurement::{EchoDecay, Ensemble, Measurement, RunSettings, SampleTable, DEFAULT_SEED};
pub use trajectory::{Dynamics, Segment};
