use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use dprw_core::{DprwError, Vec3};
use dprw_engine::{EchoDecay, Ensemble, Measurement, RunSettings, TimeGrid};
use dprw_model::{field, initial, scattering, soc, RecordSink};

#[derive(Debug)]
struct Discard;

impl RecordSink for Discard {
    fn write_header(&mut self, _names: &[String]) -> Result<(), DprwError> {
        Ok(())
    }

    fn write_record(&mut self, _values: &[f64]) -> Result<(), DprwError> {
        Ok(())
    }
}

fn ensemble(threads: usize) -> Ensemble {
    Ensemble::new(
        RunSettings::new(256, 5489, threads).unwrap(),
        TimeGrid::new(0.0, 2.0, 0.02).unwrap(),
        Box::new(initial::Isotropic3D),
        Box::new(scattering::Isotropic3D::new(10.0).unwrap()),
        Box::new(field::Step::new(Vec3::new(0.0, 0.0, 1.0), 1.0).unwrap()),
        Box::new(soc::Dresselhaus::new(5.0).unwrap()),
        Box::new(Discard),
    )
}

fn echo(threads: usize) -> EchoDecay {
    EchoDecay::new(
        RunSettings::new(256, 5489, threads).unwrap(),
        TimeGrid::new(0.0, 2.0, 0.02).unwrap(),
        Box::new(initial::Isotropic3D),
        Box::new(scattering::Isotropic3D::new(10.0).unwrap()),
        Box::new(soc::Isotropic3D::new(5.0).unwrap()),
        Box::new(Discard),
    )
}

fn bench_ensemble(c: &mut Criterion) {
    let mut serial = ensemble(1);
    c.bench_function("ensemble_256_spins_serial", |b| {
        b.iter(|| black_box(serial.run().unwrap()))
    });
    let mut parallel = ensemble(4);
    c.bench_function("ensemble_256_spins_4_threads", |b| {
        b.iter(|| black_box(parallel.run().unwrap()))
    });
}

fn bench_echo(c: &mut Criterion) {
    let mut measurement = echo(1);
    c.bench_function("echo_decay_256_spins_serial", |b| {
        b.iter(|| black_box(measurement.run().unwrap()))
    });
}

criterion_group!(benches, bench_ensemble, bench_echo);
criterion_main!(benches);
