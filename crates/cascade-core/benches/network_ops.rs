//! Benchmarks for per-frequency two-port operations
//!
//! Cascading, de-embedding, topology transforms and the gain/match summaries
//! over sweeps of increasing length.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::{Array1, Array3};
use num_complex::Complex64;
use cascade_core::frequency::{Frequency, FrequencyUnit};
use cascade_core::value::ElementValue;
use cascade_core::Network;
use std::f64::consts::PI;

/// Create a transistor-like 2-port with a phase that rotates over the sweep
fn create_test_network(nfreq: usize) -> Network {
    let freq = Frequency::new(0.1, 10.0, nfreq, FrequencyUnit::GHz);

    let s = Array3::from_shape_fn((nfreq, 2, 2), |(f, i, j)| {
        let phase = 2.0 * PI * f as f64 / nfreq as f64;
        let mag = match (i, j) {
            (0, 0) => 0.6,
            (0, 1) => 0.05,
            (1, 0) => 4.0,
            _ => 0.5,
        };
        Complex64::from_polar(mag, phase * (i + 2 * j + 1) as f64)
    });

    let z0 = Array1::from_elem(2, Complex64::new(50.0, 0.0));
    Network::new(freq, s, z0)
}

const SWEEPS: [usize; 3] = [101, 1001, 10001];

fn bench_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade");

    for nfreq in SWEEPS.iter() {
        let a = create_test_network(*nfreq);
        let b = a.flipped().unwrap();
        group.bench_with_input(BenchmarkId::new("cascade", nfreq), nfreq, |bench, _| {
            bench.iter(|| black_box(a.cascade(&b).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("deembed", nfreq), nfreq, |bench, _| {
            bench.iter(|| black_box(a.deembed(&b).unwrap()))
        });
    }

    group.finish();
}

fn bench_topology(c: &mut Criterion) {
    let mut group = c.benchmark_group("topology");
    let lift = ElementValue::Inductance(1e-9);

    for nfreq in SWEEPS.iter() {
        let network = create_test_network(*nfreq);
        group.bench_with_input(BenchmarkId::new("lift", nfreq), nfreq, |b, _| {
            b.iter(|| {
                let mut n = network.clone();
                n.lift_ground(&lift).unwrap();
                black_box(n)
            })
        });
        group.bench_with_input(BenchmarkId::new("common_base", nfreq), nfreq, |b, _| {
            b.iter(|| {
                let mut n = network.clone();
                n.to_common_base().unwrap();
                black_box(n)
            })
        });
    }

    group.finish();
}

fn bench_summaries(c: &mut Criterion) {
    let mut group = c.benchmark_group("summaries");

    for nfreq in SWEEPS.iter() {
        let network = create_test_network(*nfreq);
        group.bench_with_input(BenchmarkId::new("gain_summary", nfreq), nfreq, |b, _| {
            b.iter(|| black_box(network.gain_summary()))
        });
        group.bench_with_input(BenchmarkId::new("device_match", nfreq), nfreq, |b, _| {
            b.iter(|| black_box(network.device_match()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cascade, bench_topology, bench_summaries);
criterion_main!(benches);
