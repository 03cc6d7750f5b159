// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Complete wave runs: initial profile, stepping loop, recorded field.
//!
//! A run is an atomic unit of work: it validates up front, owns its
//! buffers, walks every time step, and returns the full space-time field.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use neurofield_structures::Result;

use crate::energy::discrete_energy;
use crate::field::{VelocityField, WaveField};
use crate::initializer::sine_profile;
use crate::params::WaveParameters;
use crate::stepper::WaveStepper;

/// Runtime-gated tracing config for field stepping.
/// Enable with:
/// - NEUROFIELD_TRACE_FIELD=1
/// Optional filter:
/// - NEUROFIELD_TRACE_STEP=<step index> (single step)
struct FieldTraceCfg {
    enabled: bool,
    step_filter: Option<usize>,
}

fn field_trace_cfg() -> &'static FieldTraceCfg {
    static CFG: OnceLock<FieldTraceCfg> = OnceLock::new();
    CFG.get_or_init(|| {
        let enabled = std::env::var("NEUROFIELD_TRACE_FIELD")
            .ok()
            .as_deref()
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let step_filter = std::env::var("NEUROFIELD_TRACE_STEP")
            .ok()
            .and_then(|v| v.parse().ok());

        FieldTraceCfg {
            enabled,
            step_filter,
        }
    })
}

/// Result of a complete wave run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveRun {
    /// Parameters the run was produced with
    pub parameters: WaveParameters,
    /// Recorded displacement history, `(time_steps, spatial_points)`
    pub field: WaveField,
}

impl WaveRun {
    /// Backward-difference velocity estimate over the recorded field.
    pub fn velocity_field(&self) -> Result<VelocityField> {
        crate::velocity::velocity_field(&self.field, self.parameters.dt())
    }

    /// Discrete energy of each consecutive snapshot pair, one value per
    /// step taken (`time_steps - 1` entries).
    pub fn energy_series(&self) -> Vec<f64> {
        let dt = self.parameters.dt();
        let dx = self.parameters.dx();
        let speed = self.parameters.speed;
        (1..self.field.num_steps())
            .map(|n| {
                discrete_energy(
                    self.field.snapshot(n - 1),
                    self.field.snapshot(n),
                    dt,
                    dx,
                    speed,
                )
            })
            .collect()
    }
}

/// Initialize the half-sine profile and step it across the full horizon.
///
/// Validation happens before any allocation; an unstable Courant number
/// never reaches the stepping loop.
pub fn run_wave(params: &WaveParameters) -> Result<WaveRun> {
    params.validate()?;

    let run_start = std::time::Instant::now();
    let grid = params.space_grid()?;
    let initial = sine_profile(&grid);

    debug!(
        "[WAVE] stepping {} point(s) across {} snapshot(s), courant={:.6}",
        params.spatial_points,
        params.time_steps,
        params.courant()
    );

    let mut stepper = WaveStepper::new(params, initial)?;
    let mut flat = Vec::with_capacity(params.time_steps * params.spatial_points);
    flat.extend_from_slice(stepper.current());

    let trace_cfg = field_trace_cfg();
    let dt = params.dt();

    for n in 1..params.time_steps {
        let row = stepper.advance();
        flat.extend_from_slice(row);

        if trace_cfg.enabled && trace_cfg.step_filter.map(|s| s == n).unwrap_or(true) {
            let max_abs = row.iter().fold(0.0_f64, |m, &y| m.max(y.abs()));
            trace!(
                target: "neurofield-trace",
                "[WAVE] n={} t={:.4} max_abs={:.6} STEP",
                n,
                n as f64 * dt,
                max_abs
            );
        }
    }

    let field = WaveField::from_flat(params.time_steps, params.spatial_points, flat)?;

    info!(
        "[WAVE] run complete: {} snapshot(s) x {} point(s), courant={:.4} in {:.2}ms",
        field.num_steps(),
        field.num_points(),
        params.courant(),
        run_start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(WaveRun {
        parameters: *params,
        field,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurofield_structures::NeurofieldError;

    #[test]
    fn test_run_records_every_snapshot() {
        let params = WaveParameters::default();
        let run = run_wave(&params).unwrap();
        assert_eq!(run.field.num_steps(), 200);
        assert_eq!(run.field.num_points(), 100);

        // row 0 is the untouched initial profile
        let grid = params.space_grid().unwrap();
        let initial = sine_profile(&grid);
        for (i, &y) in initial.iter().enumerate() {
            assert_eq!(run.field.displacement(i, 0), y);
        }
    }

    #[test]
    fn test_unstable_run_is_refused_before_stepping() {
        let params = WaveParameters {
            time_steps: 100,
            ..WaveParameters::default()
        };
        assert!(params.courant() > 1.0);
        assert!(matches!(
            run_wave(&params),
            Err(NeurofieldError::UnstableCourant(_))
        ));
    }

    #[test]
    fn test_energy_series_has_one_entry_per_step() {
        let params = WaveParameters {
            speed: 1.0,
            length: 1.0,
            duration: 1.0,
            spatial_points: 5,
            time_steps: 4,
        };
        let run = run_wave(&params).unwrap();
        let energies = run.energy_series();
        assert_eq!(energies.len(), 3);
        for e in &energies {
            assert!((e - energies[0]).abs() / energies[0] < 1e-12);
        }
    }

    #[test]
    fn test_identical_inputs_give_identical_runs() {
        let params = WaveParameters::default();
        let a = run_wave(&params).unwrap();
        let b = run_wave(&params).unwrap();
        assert_eq!(a, b);
    }
}
