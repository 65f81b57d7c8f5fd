//! Piecewise trajectories of the jump process and their resampling onto the
//! output grid.

use dprw_core::{RngHandle, Vec3};
use dprw_model::{InitialCondition, MagneticField, ScatteringModel, SocModel};

use crate::grid::TimeGrid;

/// Borrowed view of the components that drive a realization.
#[derive(Debug, Clone, Copy)]
pub struct Dynamics<'a> {
    /// Source of the starting momentum and spin.
    pub initial_condition: &'a dyn InitialCondition,
    /// Jump process for the momentum.
    pub scattering_model: &'a dyn ScatteringModel,
    /// Effective field as a function of momentum.
    pub soc_model: &'a dyn SocModel,
}

/// Start of a stretch of constant momentum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Time at which the stretch begins.
    pub t: f64,
    /// Momentum held until the next segment.
    pub k: Vec3,
    /// Spin at time `t`.
    pub spin: Vec3,
}

impl Dynamics<'_> {
    /// Rolls a starting state and follows scattering events from `start`
    /// until the next event would fall beyond `end`.
    ///
    /// The first segment starts at `start`; that beyond-the-end event is
    /// dropped, so every returned segment begins inside `[start, end]`.
    pub fn segments(
        &self,
        field: &dyn MagneticField,
        start: f64,
        end: f64,
        rng: &mut RngHandle,
    ) -> Vec<Segment> {
        let state = self.initial_condition.roll(rng);
        let mut current = Segment {
            t: start,
            k: state.k,
            spin: state.spin,
        };
        let mut segments = vec![current];
        loop {
            let event = self.scattering_model.next_event(&current.k, rng);
            let t = current.t + event.t;
            if t > end {
                break;
            }
            let omega = self.soc_model.omega(&current.k);
            current = Segment {
                t,
                k: event.k,
                spin: field.advance(&current.spin, current.t, t, &omega),
            };
            segments.push(current);
        }
        segments
    }

    /// Spin at every grid time, found with a single forward scan over the
    /// time-ordered segments.
    pub fn sample(&self, segments: &[Segment], field: &dyn MagneticField, grid: &TimeGrid) -> Vec<Vec3> {
        let mut spins = Vec::with_capacity(grid.samples());
        let mut index = 0;
        for t in grid.times() {
            while index + 1 < segments.len() && segments[index + 1].t <= t {
                index += 1;
            }
            let Some(segment) = segments.get(index) else {
                break;
            };
            let omega = self.soc_model.omega(&segment.k);
            spins.push(field.advance(&segment.spin, segment.t, t, &omega));
        }
        spins
    }

    /// One full ensemble realization: segments then samples.
    pub fn ensemble_realization(
        &self,
        field: &dyn MagneticField,
        grid: &TimeGrid,
        rng: &mut RngHandle,
    ) -> Vec<Vec3> {
        let segments = self.segments(field, grid.start(), grid.end(), rng);
        log::trace!("realization with {} segments", segments.len());
        self.sample(&segments, field, grid)
    }
}
