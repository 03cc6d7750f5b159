// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Complete LIF runs: stimulus sampling, integration loop, run summary.
//!
//! A run is an atomic unit of work: it owns its buffers, walks the whole
//! grid, and returns the full trace. Nothing is streamed mid-run.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use neurofield_structures::{NeurofieldError, Result, TimeGrid};

use crate::dynamics::{LifIntegrator, LifParameters, NeuronPhase};
use crate::stimulus::{PulseTrain, StimulusWaveform};
use crate::trace::{MembraneTrace, SpikeList};

/// Runtime-gated tracing config for membrane dynamics.
/// Enable with:
/// - NEUROFIELD_TRACE_DYNAMICS=1
/// Optional filter:
/// - NEUROFIELD_TRACE_SAMPLE=<sample index> (single sample)
struct DynamicsTraceCfg {
    enabled: bool,
    sample_filter: Option<usize>,
}

fn dynamics_trace_cfg() -> &'static DynamicsTraceCfg {
    static CFG: OnceLock<DynamicsTraceCfg> = OnceLock::new();
    CFG.get_or_init(|| {
        let enabled = std::env::var("NEUROFIELD_TRACE_DYNAMICS")
            .ok()
            .as_deref()
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let sample_filter = std::env::var("NEUROFIELD_TRACE_SAMPLE")
            .ok()
            .and_then(|v| v.parse().ok());

        DynamicsTraceCfg {
            enabled,
            sample_filter,
        }
    })
}

/// Result of a complete LIF run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifRun {
    /// Committed membrane trace, one sample per grid instant
    pub trace: MembraneTrace,
    /// Spike sample indices, strictly increasing
    pub spikes: SpikeList,
    /// Samples spent held inside refractory lock windows
    pub refractory_samples: usize,
}

/// Sample `pulses` onto `grid` and integrate the membrane across the run.
///
/// Validation happens up front (grid invariants by construction, parameter
/// taxonomy via [`LifParameters::validate`]); after that the loop is total.
pub fn run_lif(grid: &TimeGrid, pulses: &PulseTrain, params: LifParameters) -> Result<LifRun> {
    debug!(
        "[LIF] sampling {} pulse(s) onto {} grid samples",
        pulses.len(),
        grid.len()
    );
    let waveform = pulses.sample(grid);
    run_lif_on_waveform(grid, &waveform, params)
}

/// Integrate the membrane against an already-sampled stimulus waveform.
///
/// The waveform must cover the grid exactly, one current value per instant.
pub fn run_lif_on_waveform(
    grid: &TimeGrid,
    waveform: &StimulusWaveform,
    params: LifParameters,
) -> Result<LifRun> {
    if waveform.len() != grid.len() {
        return Err(NeurofieldError::ArraySizeMismatch {
            expected: grid.len(),
            actual: waveform.len(),
        });
    }

    let run_start = std::time::Instant::now();
    let mut integrator = LifIntegrator::new(params, grid)?;

    let mut membrane = MembraneTrace::with_capacity(grid.len());
    let mut spikes = SpikeList::new();
    let mut refractory_samples = 0usize;

    // V[0] is the seed sample, not a step
    membrane.push(integrator.voltage());

    let trace_cfg = dynamics_trace_cfg();

    for k in 1..grid.len() {
        let input = waveform.amplitude_at(k);
        let outcome = integrator.step(k, input);
        membrane.push(outcome.voltage);

        if outcome.fired {
            spikes.push(k);
        }
        if outcome.phase == NeuronPhase::Refractory {
            refractory_samples += 1;
        }

        if trace_cfg.enabled
            && trace_cfg.sample_filter.map(|s| s == k).unwrap_or(true)
        {
            let tag = if outcome.fired {
                "FIRED"
            } else if outcome.phase == NeuronPhase::Refractory {
                "REFRACTORY"
            } else {
                "STEP"
            };
            trace!(
                target: "neurofield-trace",
                "[LIF] k={} t={:.4} input={:.6} v={:.6} {}",
                k,
                grid.time_at(k),
                input,
                outcome.voltage,
                tag
            );
        }
    }

    info!(
        "[LIF] run complete: {} samples, {} spike(s), {} refractory sample(s) in {:.2}ms",
        membrane.len(),
        spikes.len(),
        refractory_samples,
        run_start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(LifRun {
        trace: membrane,
        spikes,
        refractory_samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stimulus::Pulse;

    #[test]
    fn test_run_covers_grid_and_seeds_rest() {
        let grid = TimeGrid::new(0.1, 50).unwrap();
        let run = run_lif(&grid, &PulseTrain::default(), LifParameters::default()).unwrap();
        assert_eq!(run.trace.len(), grid.len());
        assert_eq!(run.trace.voltage_at(0), -70.0);
        assert!(run.spikes.is_empty());
        assert_eq!(run.refractory_samples, 0);
    }

    #[test]
    fn test_waveform_length_mismatch_is_rejected() {
        let grid = TimeGrid::new(0.1, 50).unwrap();
        let waveform = StimulusWaveform::from_samples(vec![0.0; 49]);
        let err = run_lif_on_waveform(&grid, &waveform, LifParameters::default()).unwrap_err();
        assert_eq!(
            err,
            NeurofieldError::ArraySizeMismatch {
                expected: 50,
                actual: 49
            }
        );
    }

    #[test]
    fn test_invalid_parameters_fail_before_stepping() {
        let grid = TimeGrid::new(0.1, 50).unwrap();
        let params = LifParameters {
            tau_m: 0.0,
            ..LifParameters::default()
        };
        assert!(run_lif(&grid, &PulseTrain::default(), params).is_err());
    }

    #[test]
    fn test_spike_is_clamped_and_lock_holds_reset() {
        // dt = 1 ms, refractory 3 ms: spike at k=1, hold at k=2..=4
        let grid = TimeGrid::new(1.0, 10).unwrap();
        let params = LifParameters {
            refractory_period: 3.0,
            ..LifParameters::default()
        };
        let train = PulseTrain::single(Pulse::new(1.0, 1.0, 10.0));
        let run = run_lif(&grid, &train, params).unwrap();

        assert_eq!(run.spikes.as_slice(), &[1]);
        assert_eq!(run.trace.voltage_at(1), 60.0);
        for k in 2..=4 {
            assert_eq!(run.trace.voltage_at(k), -65.0);
        }
        assert!(run.trace.voltage_at(5) < -65.0); // decay resumes toward rest
        assert_eq!(run.refractory_samples, 3);
    }

    #[test]
    fn test_identical_inputs_give_identical_runs() {
        let grid = TimeGrid::from_horizon(0.1, 50.0).unwrap();
        let train = PulseTrain::ramp(5.0, 5.0, 8, 2.0, 1.0, 6.0);
        let a = run_lif(&grid, &train, LifParameters::default()).unwrap();
        let b = run_lif(&grid, &train, LifParameters::default()).unwrap();
        assert_eq!(a, b);
    }
}
