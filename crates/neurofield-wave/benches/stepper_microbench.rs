// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CI Microbenchmarks
//!
//! Purpose:
//! - Fast, stable(ish) benchmarks of the finite-difference hot loop.
//!
//! Notes:
//! - Keep runtime low (CI runners are noisy and slower).
//! - Prefer fixed inputs and avoid I/O.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use neurofield_wave::{run_wave, sine_profile, WaveParameters, WaveStepper};

fn sized_params(points: usize) -> WaveParameters {
    // Scale the step count with the grid so the Courant number stays below 1
    WaveParameters {
        spatial_points: points,
        time_steps: 2 * (points + 1),
        ..WaveParameters::default()
    }
}

fn bench_single_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("wave_advance");
    group.sample_size(20);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(1));

    for points in [100usize, 1_000, 10_000] {
        let params = sized_params(points);
        let grid = params.space_grid().unwrap();
        let profile = sine_profile(&grid);

        group.throughput(Throughput::Elements(points as u64));
        group.bench_with_input(
            BenchmarkId::new("advance", format!("{}_points", points)),
            &points,
            |b, _| {
                let mut stepper = WaveStepper::new(&params, profile.clone()).unwrap();
                b.iter(|| {
                    black_box(stepper.advance());
                });
            },
        );
    }

    group.finish();
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("wave_full_run");
    group.sample_size(20);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(1));

    let params = WaveParameters::default();
    group.throughput(Throughput::Elements(
        (params.time_steps * params.spatial_points) as u64,
    ));
    group.bench_function("canonical_200x100", |b| {
        b.iter(|| run_wave(black_box(&params)));
    });

    group.finish();
}

fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(1))
        .sample_size(20)
}

criterion_group! {
    name = stepper_microbench;
    config = criterion_config();
    targets = bench_single_advance, bench_full_run
}
criterion_main!(stepper_microbench);
