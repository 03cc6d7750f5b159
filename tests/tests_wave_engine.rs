// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Umbrella-level wave checks: facade run, config/kernel validation
//! agreement, and the JSON artifacts.

use neurofield::prelude::*;

#[test]
fn canonical_wave_run_through_the_facade() {
    let run = run_wave(&WaveParameters::default()).unwrap();

    assert_eq!(run.field.num_steps(), 200);
    assert_eq!(run.field.num_points(), 100);
    for n in 0..200 {
        assert_eq!(run.field.displacement(0, n), 0.0);
        assert_eq!(run.field.displacement(99, n), 0.0);
    }

    let energies = run.energy_series();
    assert!((energies[0] - 0.98687762048050054).abs() < 1e-12);
    for e in &energies {
        assert!((e - energies[0]).abs() / energies[0] < 1e-12);
    }
}

#[test]
fn config_defaults_reproduce_the_canonical_run() {
    let config = NeurofieldConfig::default();
    let params = WaveParameters {
        speed: config.wave.speed,
        length: config.wave.length,
        duration: config.wave.duration,
        spatial_points: config.wave.spatial_points,
        time_steps: config.wave.time_steps,
    };
    assert_eq!(params, WaveParameters::default());

    let from_config = run_wave(&params).unwrap();
    let direct = run_wave(&WaveParameters::default()).unwrap();
    assert_eq!(from_config, direct);
}

#[test]
fn config_validation_agrees_with_the_kernel_on_stability() {
    // A discretization the kernel would refuse must already fail config
    // validation, and vice versa
    let mut config = NeurofieldConfig::default();
    config.wave.time_steps = 100; // Courant 1.98

    assert!(validate_config(&config).is_err());

    let params = WaveParameters {
        speed: config.wave.speed,
        length: config.wave.length,
        duration: config.wave.duration,
        spatial_points: config.wave.spatial_points,
        time_steps: config.wave.time_steps,
    };
    assert!(matches!(
        run_wave(&params),
        Err(NeurofieldError::UnstableCourant(_))
    ));
}

#[test]
fn velocity_artifact_round_trips_through_the_results_file() {
    let run = run_wave(&WaveParameters::default()).unwrap();
    let velocity = run.velocity_field().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wave_velocity.json");
    std::fs::write(&path, serde_json::to_string_pretty(&velocity).unwrap()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let back: neurofield::wave::VelocityField = serde_json::from_str(&text).unwrap();
    assert_eq!(back, velocity);
}
