//! Measurements: complete runs that average realizations and emit a table.

use std::fmt;

use dprw_core::{DprwError, RngHandle, Vec3};
use dprw_model::{InitialCondition, MagneticField, RecordSink, ScatteringModel, SocModel};

use crate::accumulate::ensemble_average;
use crate::determinism::realization_seed;
use crate::grid::TimeGrid;
use crate::trajectory::Dynamics;

/// Master seed used when a configuration does not set one.
pub const DEFAULT_SEED: u64 = 5489;

/// Sizing and scheduling shared by every measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    /// Number of independent realizations averaged.
    pub spin_count: usize,
    /// Master seed; realization `i` uses a substream derived from it.
    pub seed: u64,
    /// Worker threads used by [`Measurement::run`].
    pub threads: usize,
}

impl RunSettings {
    /// Validates and creates the settings.
    pub fn new(spin_count: usize, seed: u64, threads: usize) -> Result<Self, DprwError> {
        if spin_count == 0 {
            return Err(DprwError::parameter(
                "invalid-spin-count",
                "spin_count must be at least 1",
            )
            .with_context("field", "spin_count"));
        }
        Ok(Self {
            spin_count,
            seed,
            threads,
        })
    }
}

/// Emitted output: column names and one row per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleTable {
    /// Column names, in order.
    pub columns: Vec<String>,
    /// Rows in ascending time order.
    pub rows: Vec<Vec<f64>>,
}

impl SampleTable {
    fn from_spins(columns: &[&str], times: Option<&TimeGrid>, spins: &[Vec3]) -> Self {
        let rows = spins
            .iter()
            .enumerate()
            .map(|(index, spin)| {
                let mut row = Vec::with_capacity(columns.len());
                if let Some(grid) = times {
                    row.push(grid.time(index));
                }
                row.extend_from_slice(&[spin.x, spin.y, spin.z]);
                row
            })
            .collect();
        Self {
            columns: columns.iter().map(|name| name.to_string()).collect(),
            rows,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of the named column, if present.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.columns.iter().position(|column| column == name)?;
        Some(self.rows.iter().filter_map(|row| row.get(index).copied()).collect())
    }

    /// Writes the header once, then every row, then flushes.
    pub fn write_to(&self, sink: &mut dyn RecordSink) -> Result<(), DprwError> {
        sink.write_header(&self.columns)?;
        for row in &self.rows {
            sink.write_record(row)?;
        }
        sink.flush()
    }
}

/// A configured experiment that can be run to completion.
pub trait Measurement: fmt::Debug + Send {
    /// Run settings.
    fn settings(&self) -> &RunSettings;

    /// Runs with `threads` workers, writes the table to the output sink and
    /// returns it. The result is identical for every thread count.
    fn run_with_threads(&mut self, threads: usize) -> Result<SampleTable, DprwError>;

    /// Runs with the configured thread count.
    fn run(&mut self) -> Result<SampleTable, DprwError> {
        let threads = self.settings().threads;
        self.run_with_threads(threads)
    }
}

/// Plain ensemble average of the spin under an external field profile.
#[derive(Debug)]
pub struct Ensemble {
    settings: RunSettings,
    grid: TimeGrid,
    initial_condition: Box<dyn InitialCondition>,
    scattering_model: Box<dyn ScatteringModel>,
    magnetic_field: Box<dyn MagneticField>,
    soc_model: Box<dyn SocModel>,
    output: Box<dyn RecordSink>,
}

impl Ensemble {
    /// Assembles the measurement from already-validated parts.
    pub fn new(
        settings: RunSettings,
        grid: TimeGrid,
        initial_condition: Box<dyn InitialCondition>,
        scattering_model: Box<dyn ScatteringModel>,
        magnetic_field: Box<dyn MagneticField>,
        soc_model: Box<dyn SocModel>,
        output: Box<dyn RecordSink>,
    ) -> Self {
        Self {
            settings,
            grid,
            initial_condition,
            scattering_model,
            magnetic_field,
            soc_model,
            output,
        }
    }

    /// Output grid.
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    fn dynamics(&self) -> Dynamics<'_> {
        Dynamics {
            initial_condition: self.initial_condition.as_ref(),
            scattering_model: self.scattering_model.as_ref(),
            soc_model: self.soc_model.as_ref(),
        }
    }

    /// Mean spin at every grid time, without writing output.
    pub fn average(&self, threads: usize) -> Result<Vec<Vec3>, DprwError> {
        let dynamics = self.dynamics();
        let field = self.magnetic_field.as_ref();
        let grid = self.grid;
        let seed = self.settings.seed;
        ensemble_average(self.settings.spin_count, grid.samples(), threads, |index| {
            let mut rng = RngHandle::from_seed(realization_seed(seed, index));
            dynamics.ensemble_realization(field, &grid, &mut rng)
        })
    }
}

impl Measurement for Ensemble {
    fn settings(&self) -> &RunSettings {
        &self.settings
    }

    fn run_with_threads(&mut self, threads: usize) -> Result<SampleTable, DprwError> {
        log::info!(
            "ensemble run: {} realizations, {} samples, {} threads",
            self.settings.spin_count,
            self.grid.samples(),
            threads.max(1)
        );
        let means = self.average(threads)?;
        let table = SampleTable::from_spins(&["t", "s_x", "s_y", "s_z"], Some(&self.grid), &means);
        table.write_to(self.output.as_mut())?;
        log::info!("ensemble run finished: {} records", table.len());
        Ok(table)
    }
}

/// Spin-echo decay: for each sample time `t`, the mean spin after a pi pulse
/// at `t / 2` (relative to the start), reconstructed from rotation histories.
#[derive(Debug)]
pub struct EchoDecay {
    settings: RunSettings,
    grid: TimeGrid,
    initial_condition: Box<dyn InitialCondition>,
    scattering_model: Box<dyn ScatteringModel>,
    soc_model: Box<dyn SocModel>,
    output: Box<dyn RecordSink>,
}

impl EchoDecay {
    /// Assembles the measurement from already-validated parts.
    pub fn new(
        settings: RunSettings,
        grid: TimeGrid,
        initial_condition: Box<dyn InitialCondition>,
        scattering_model: Box<dyn ScatteringModel>,
        soc_model: Box<dyn SocModel>,
        output: Box<dyn RecordSink>,
    ) -> Self {
        Self {
            settings,
            grid,
            initial_condition,
            scattering_model,
            soc_model,
            output,
        }
    }

    /// Output grid.
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    fn dynamics(&self) -> Dynamics<'_> {
        Dynamics {
            initial_condition: self.initial_condition.as_ref(),
            scattering_model: self.scattering_model.as_ref(),
            soc_model: self.soc_model.as_ref(),
        }
    }

    /// Mean refocused spin at every grid time, without writing output.
    pub fn average(&self, threads: usize) -> Result<Vec<Vec3>, DprwError> {
        let dynamics = self.dynamics();
        let grid = self.grid;
        let seed = self.settings.seed;
        ensemble_average(self.settings.spin_count, grid.samples(), threads, |index| {
            let mut rng = RngHandle::from_seed(realization_seed(seed, index));
            dynamics.echo_realization(&grid, &mut rng)
        })
    }
}

impl Measurement for EchoDecay {
    fn settings(&self) -> &RunSettings {
        &self.settings
    }

    fn run_with_threads(&mut self, threads: usize) -> Result<SampleTable, DprwError> {
        log::info!(
            "echo decay run: {} realizations, {} samples, {} threads",
            self.settings.spin_count,
            self.grid.samples(),
            threads.max(1)
        );
        let means = self.average(threads)?;
        let table = SampleTable::from_spins(&["s_x", "s_y", "s_z"], None, &means);
        table.write_to(self.output.as_mut())?;
        log::info!("echo decay run finished: {} records", table.len());
        Ok(table)
    }
}
