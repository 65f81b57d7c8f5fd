//! Deterministic ensemble accumulation.
//!
//! Realizations are grouped into fixed blocks by index. Each block is summed
//! sequentially and blocks are merged in order, so the floating-point result
//! does not depend on how blocks were scheduled across threads.

use std::ops::Range;

use dprw_core::{DprwError, ErrorInfo, Vec3};
use rayon::prelude::*;

/// Realizations summed together before merging.
pub const BLOCK_SIZE: usize = 64;

/// Per-sample running sums of spin vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    sums: Vec<Vec3>,
    count: usize,
}

impl Accumulator {
    /// Empty accumulator over `samples` grid points.
    pub fn new(samples: usize) -> Self {
        Self {
            sums: vec![Vec3::zeros(); samples],
            count: 0,
        }
    }

    /// Adds one realization.
    pub fn add(&mut self, spins: &[Vec3]) {
        for (sum, spin) in self.sums.iter_mut().zip(spins) {
            *sum += spin;
        }
        self.count += 1;
    }

    /// Folds another accumulator into this one.
    pub fn merge(&mut self, other: &Accumulator) {
        for (sum, partial) in self.sums.iter_mut().zip(&other.sums) {
            *sum += partial;
        }
        self.count += other.count;
    }

    /// Realizations added so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Per-sample mean with equal weight per realization.
    pub fn mean(&self) -> Vec<Vec3> {
        if self.count == 0 {
            return self.sums.clone();
        }
        let n = self.count as f64;
        self.sums.iter().map(|sum| sum / n).collect()
    }
}

fn blocks(realizations: usize) -> Vec<Range<usize>> {
    (0..realizations)
        .step_by(BLOCK_SIZE)
        .map(|first| first..(first + BLOCK_SIZE).min(realizations))
        .collect()
}

/// Averages `realize(i)` for `i` in `0..realizations` over `samples` points,
/// using up to `threads` workers (`0` is treated as `1`).
pub fn ensemble_average<F>(
    realizations: usize,
    samples: usize,
    threads: usize,
    realize: F,
) -> Result<Vec<Vec3>, DprwError>
where
    F: Fn(usize) -> Vec<Vec3> + Sync,
{
    let sum_block = |range: Range<usize>| {
        let mut acc = Accumulator::new(samples);
        for index in range {
            acc.add(&realize(index));
        }
        log::trace!("block of {} realizations summed", acc.count());
        acc
    };

    let ranges = blocks(realizations);
    let partials: Vec<Accumulator> = if threads <= 1 {
        ranges.into_iter().map(sum_block).collect()
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|err| DprwError::Io(ErrorInfo::new("thread-pool", err.to_string())))?;
        pool.install(|| ranges.into_par_iter().map(sum_block).collect())
    };

    let mut total = Accumulator::new(samples);
    for partial in &partials {
        total.merge(partial);
    }
    Ok(total.mean())
}
