// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # LIF (Leaky Integrate-and-Fire) Membrane Dynamics
//!
//! Explicit-Euler integration of a single point neuron with a hard
//! refractory hold.
//!
//! ## Model Dynamics
//!
//! ```text
//! Refractory hold (lock window after a spike):
//!     V[k] = v_reset        (no decay, no threshold check)
//!
//! Membrane update (outside the lock window):
//!     dV   = (-(V[k-1] - v_rest) + r_m * I[k]) * (dt / tau_m)
//!     V[k] = V[k-1] + dV
//!
//! Firing check:
//!     if V[k] >= v_th:
//!         V[k] = spike_peak                     (clamp, not the raw value)
//!         lock k+1 ..= min(k + refractory_steps, N-1)
//!
//! refractory_steps = round(refractory_period / dt)
//! ```
//!
//! The step function is total: once parameters pass [`LifParameters::validate`],
//! no error paths remain inside the per-step arithmetic. Pathological but
//! finite parameters diverge numerically rather than fault.

use serde::{Deserialize, Serialize};

use neurofield_structures::{NeurofieldError, Result, TimeGrid};

/// LIF model parameters.
///
/// Defaults reproduce the canonical demonstration scenario: a neuron at
/// -70 mV rest, -50 mV threshold, 15 ms refractory period, driven through
/// a 30 MOhm membrane resistance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifParameters {
    /// Membrane time constant (ms)
    pub tau_m: f64,
    /// Resting potential (mV)
    pub v_rest: f64,
    /// Threshold potential (mV)
    pub v_th: f64,
    /// Reset potential held through the refractory window (mV)
    pub v_reset: f64,
    /// Membrane resistance (MOhm)
    pub r_m: f64,
    /// Refractory period (ms)
    pub refractory_period: f64,
    /// Value the trace is clamped to at a spike (mV)
    pub spike_peak: f64,
}

impl LifParameters {
    /// Parameters with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the configuration-error taxonomy before any stepping.
    ///
    /// Rejects non-positive `tau_m`, a negative refractory period, and a
    /// spike peak at or below threshold (the clamp must be observable above
    /// `v_th`). Anything else — including sign-flipped resistances — is
    /// allowed through and simply produces the divergent trace it implies.
    pub fn validate(&self) -> Result<()> {
        if !self.tau_m.is_finite() || self.tau_m <= 0.0 {
            return Err(NeurofieldError::InvalidParameter {
                name: "tau_m",
                reason: format!("must be finite and > 0, got {}", self.tau_m),
            });
        }
        if !self.refractory_period.is_finite() || self.refractory_period < 0.0 {
            return Err(NeurofieldError::InvalidParameter {
                name: "refractory_period",
                reason: format!("must be finite and >= 0, got {}", self.refractory_period),
            });
        }
        if !(self.spike_peak > self.v_th) {
            return Err(NeurofieldError::InvalidParameter {
                name: "spike_peak",
                reason: format!(
                    "must exceed v_th ({} <= {})",
                    self.spike_peak, self.v_th
                ),
            });
        }
        Ok(())
    }
}

impl Default for LifParameters {
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

/// Which rule produced the current sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeuronPhase {
    /// Membrane update + threshold check applied
    Integrating,
    /// Inside the post-spike lock window, held at `v_reset`
    Refractory,
}

/// Result of one integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Committed membrane potential `V[k]`
    pub voltage: f64,
    /// Whether this step crossed threshold (the sample is clamped to peak)
    pub fired: bool,
    /// Rule that produced the sample
    pub phase: NeuronPhase,
}

/// Single-neuron integrator state.
///
/// Holds the previous committed voltage and the end of the active lock
/// window; stepping it along a [`TimeGrid`] reproduces the reference
/// dynamics sample by sample. The lock window is an explicit index bound,
/// clamped to the last grid sample so a late spike cannot lock past the
/// end of the run.
#[derive(Debug, Clone)]
pub struct LifIntegrator {
    params: LifParameters,
    dt: f64,
    last_index: usize,
    refractory_steps: usize,
    voltage: f64,
    locked_until: Option<usize>,
}

impl LifIntegrator {
    /// Build an integrator for one run over `grid`.
    ///
    /// Validates `params`, precomputes the lock-window width
    /// `round(refractory_period / dt)`, and seeds the voltage at `v_rest`
    /// (the `V[0]` sample).
    pub fn new(params: LifParameters, grid: &TimeGrid) -> Result<Self> {
        params.validate()?;
        let refractory_steps = (params.refractory_period / grid.dt()).round() as usize;
        Ok(Self {
            params,
            dt: grid.dt(),
            last_index: grid.last_index(),
            refractory_steps,
            voltage: params.v_rest,
            locked_until: None,
        })
    }

    /// Membrane potential after the most recent step (or the seed value).
    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    /// Number of samples a spike locks after its own index.
    pub fn refractory_steps(&self) -> usize {
        self.refractory_steps
    }

    /// Rewind to the `V[0]` state for a fresh run.
    pub fn reset(&mut self) {
        self.voltage = self.params.v_rest;
        self.locked_until = None;
    }

    /// Advance one sample: commit `V[k]` for input current `I[k]`.
    ///
    /// `k` is expected to walk `1..grid.len()` in order; the rules are
    /// applied in fixed priority:
    ///
    /// 1. inside an active lock window the sample is held at `v_reset`
    ///    with no decay and no threshold check;
    /// 2. otherwise the explicit-Euler membrane update runs;
    /// 3. a sample at or above `v_th` is clamped to `spike_peak` and opens
    ///    a lock window over the next `refractory_steps` samples.
    #[inline]
    pub fn step(&mut self, k: usize, input_current: f64) -> StepOutcome {
        if let Some(locked_until) = self.locked_until {
            if k <= locked_until {
                self.voltage = self.params.v_reset;
                return StepOutcome {
                    voltage: self.voltage,
                    fired: false,
                    phase: NeuronPhase::Refractory,
                };
            }
            self.locked_until = None;
        }

        let dv = (-(self.voltage - self.params.v_rest) + self.params.r_m * input_current)
            * (self.dt / self.params.tau_m);
        self.voltage += dv;

        let mut fired = false;
        if self.voltage >= self.params.v_th {
            self.voltage = self.params.spike_peak;
            fired = true;
            self.locked_until = Some((k + self.refractory_steps).min(self.last_index));
        }

        StepOutcome {
            voltage: self.voltage,
            fired,
            phase: NeuronPhase::Integrating,
        }
    }
}
