// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `neurofield.toml`. Defaults reproduce the canonical scenarios of both
//! kernels, so a missing file or section still yields a runnable config.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NeurofieldConfig {
    pub simulation: SimulationConfig,
    pub lif: LifConfig,
    pub wave: WaveConfig,
    pub logging: LoggingConfig,
}

/// Run-level selection and output settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub run_lif: bool,
    pub run_wave: bool,
    /// Directory run artifacts (JSON results) are written into
    pub results_dir: PathBuf,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            run_lif: true,
            run_wave: true,
            results_dir: PathBuf::from("results"),
        }
    }
}

/// LIF kernel configuration: grid, membrane constants, stimulus schedule
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LifConfig {
    /// Integration step in milliseconds
    pub dt_ms: f64,
    /// Simulated horizon in milliseconds
    pub horizon_ms: f64,
    pub membrane: MembraneConfig,
    pub stimulus: StimulusConfig,
}

impl Default for LifConfig {
    fn default() -> Self {
        Self {
            dt_ms: 0.1,
            horizon_ms: 50.0,
            membrane: MembraneConfig::default(),
            stimulus: StimulusConfig::default(),
        }
    }
}

/// Membrane constants (mV / ms / MOhm)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MembraneConfig {
    pub tau_m: f64,
    pub v_rest: f64,
    pub v_th: f64,
    pub v_reset: f64,
    pub r_m: f64,
    pub refractory_period: f64,
    pub spike_peak: f64,
}

impl Default for MembraneConfig {
    fn default() -> Self {
        Self {
            tau_m: 10.0,
            v_rest: -70.0,
            v_th: -50.0,
            v_reset: -65.0,
            r_m: 30.0,
            refractory_period: 15.0,
            spike_peak: 60.0,
        }
    }
}

/// Stimulus schedule: a regular amplitude ramp, optionally replaced by an
/// explicit pulse list
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StimulusConfig {
    pub first_onset_ms: f64,
    pub spacing_ms: f64,
    pub count: usize,
    pub duration_ms: f64,
    pub amp_start: f64,
    pub amp_end: f64,
    /// When non-empty, these pulses are used verbatim and the ramp
    /// fields above are ignored
    pub pulses: Vec<PulseConfig>,
}

impl Default for StimulusConfig {
    fn default() -> Self {
        Self {
            first_onset_ms: 5.0,
            spacing_ms: 5.0,
            count: 8,
            duration_ms: 2.0,
            amp_start: 1.0,
            amp_end: 6.0,
            pulses: Vec::new(),
        }
    }
}

/// One explicit rectangular pulse
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PulseConfig {
    pub onset_ms: f64,
    pub duration_ms: f64,
    pub amplitude: f64,
}

/// Wave kernel configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WaveConfig {
    pub speed: f64,
    pub length: f64,
    pub duration: f64,
    pub spatial_points: usize,
    pub time_steps: usize,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            length: 10.0,
            duration: 10.0,
            spatial_points: 100,
            time_steps: 200,
        }
    }
}

/// Logging settings consumed by the observability layer
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter when RUST_LOG is unset
    pub level: String,
    /// Also write rolling log files under `log_dir`
    pub file_output: bool,
    pub log_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_output: false,
            log_dir: PathBuf::from("logs"),
        }
    }
}
