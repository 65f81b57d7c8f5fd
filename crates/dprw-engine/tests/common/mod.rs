#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use dprw_core::{DprwError, RngHandle, Vec3};
use dprw_model::{RecordSink, ScatteringEvent, ScatteringModel};

/// Sink that keeps every line it is given.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl RecordSink for MemorySink {
    fn write_header(&mut self, names: &[String]) -> Result<(), DprwError> {
        self.lines.lock().unwrap().push(format!("# {}", names.join(", ")));
        Ok(())
    }

    fn write_record(&mut self, values: &[f64]) -> Result<(), DprwError> {
        let cells: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        self.lines.lock().unwrap().push(cells.join(", "));
        Ok(())
    }
}

/// Scattering that always waits `t` and lands on `k`, consuming no randomness.
#[derive(Debug, Clone, Copy)]
pub struct FixedEvent {
    pub k: Vec3,
    pub t: f64,
}

impl ScatteringModel for FixedEvent {
    fn next_event(&self, _k: &Vec3, _rng: &mut RngHandle) -> ScatteringEvent {
        ScatteringEvent { k: self.k, t: self.t }
    }
}

pub fn max_deviation(a: &[Vec3], b: &[Vec3]) -> f64 {
    assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| (x - y).amax()).fold(0.0, f64::max)
}
