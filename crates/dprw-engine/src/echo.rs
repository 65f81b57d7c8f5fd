//! Spin-echo reconstruction from composed rotations.
//!
//! For each realization two running compositions are recorded at half the
//! output step: `forward[j]`, the net rotation from the start to half-step
//! `j`, and `inverse[j]`, the same product with every segment rotation
//! negated in angle. A pi pulse at half-step `i` observed at `2i` then gives
//! `inverse[2i] * inverse[i]^-1 * forward[i]`, with no integration of the
//! refocused branch.

use dprw_core::{Rotation, RngHandle, Vec3};
use dprw_model::{ScatteringModel, SocModel};

use crate::grid::TimeGrid;
use crate::trajectory::Dynamics;

/// Forward and sign-inverted rotation compositions of one realization.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationHistory {
    forward: Vec<Rotation>,
    inverse: Vec<Rotation>,
}

impl RotationHistory {
    /// Records `2 * grid.samples()` half-step compositions starting from
    /// momentum `k`, drawing scattering events from `rng` as they are crossed.
    pub fn record(
        k: Vec3,
        scattering: &dyn ScatteringModel,
        soc: &dyn SocModel,
        grid: &TimeGrid,
        rng: &mut RngHandle,
    ) -> Self {
        let points = 2 * grid.samples();
        let half_step = grid.half_step();
        let mut forward = Vec::with_capacity(points);
        let mut inverse = Vec::with_capacity(points);
        let mut net = Rotation::identity();
        let mut net_inverse = Rotation::identity();

        let mut k = k;
        let mut t = grid.start();
        let mut event = scattering.next_event(&k, rng);
        let mut t_event = t + event.t;

        for j in 0..points {
            let target = grid.start() + j as f64 * half_step;
            while t_event < target {
                let phi = soc.omega(&k) * (t_event - t);
                net = Rotation::from_rotation_vector(&phi) * net;
                net_inverse = Rotation::from_rotation_vector(&-phi) * net_inverse;
                t = t_event;
                k = event.k;
                event = scattering.next_event(&k, rng);
                t_event = t + event.t;
            }
            let phi = soc.omega(&k) * (target - t);
            net = Rotation::from_rotation_vector(&phi) * net;
            net_inverse = Rotation::from_rotation_vector(&-phi) * net_inverse;
            t = target;
            forward.push(net);
            inverse.push(net_inverse);
        }

        Self { forward, inverse }
    }

    /// Spin at output sample `index` for a pulse at half-step `index`.
    ///
    /// `None` when `2 * index` is outside the recorded history.
    pub fn echo(&self, index: usize, spin: &Vec3) -> Option<Vec3> {
        let pulse = self.forward.get(index)?;
        let before_pulse = self.inverse.get(index)?;
        let refocused = self.inverse.get(2 * index)?;
        Some(*refocused * (before_pulse.inverse() * (*pulse * *spin)))
    }
}

impl Dynamics<'_> {
    /// One echo-decay realization: the refocused spin at every grid sample.
    pub fn echo_realization(&self, grid: &TimeGrid, rng: &mut RngHandle) -> Vec<Vec3> {
        let state = self.initial_condition.roll(rng);
        let history = RotationHistory::record(state.k, self.scattering_model, self.soc_model, grid, rng);
        (0..grid.samples())
            .filter_map(|index| history.echo(index, &state.spin))
            .collect()
    }
}
