// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Stimulus generation: rectangular current pulses on a time grid.
//!
//! A [`PulseTrain`] is an ordered list of rectangular pulses. Sampling it
//! onto a [`TimeGrid`] produces a [`StimulusWaveform`], the per-sample input
//! current the integrator consumes.

use serde::{Deserialize, Serialize};

use neurofield_structures::TimeGrid;

/// One rectangular current pulse: `amplitude` over `[onset, onset + duration)`.
///
/// Units follow the grid (milliseconds for the neuron kernel); amplitude is
/// in input-current units. A non-positive duration covers no samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    /// Start of the active window
    pub onset: f64,
    /// Width of the active window
    pub duration: f64,
    /// Current level held while active
    pub amplitude: f64,
}

impl Pulse {
    pub fn new(onset: f64, duration: f64, amplitude: f64) -> Self {
        Self {
            onset,
            duration,
            amplitude,
        }
    }

    /// Exclusive end of the active window.
    pub fn end(&self) -> f64 {
        self.onset + self.duration
    }

    /// Whether instant `t` falls inside the half-open active window.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.onset && t < self.end()
    }
}

/// Ordered collection of stimulus pulses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PulseTrain {
    pulses: Vec<Pulse>,
}

impl PulseTrain {
    pub fn new(pulses: Vec<Pulse>) -> Self {
        Self { pulses }
    }

    /// Train carrying a single pulse.
    pub fn single(pulse: Pulse) -> Self {
        Self {
            pulses: vec![pulse],
        }
    }

    /// Evenly spaced pulses with linearly interpolated amplitudes.
    ///
    /// Pulse `j` starts at `first_onset + j * spacing` and holds
    /// `amp_start + (amp_end - amp_start) * j / (count - 1)`; with
    /// `count == 1` the single pulse holds `amp_start`. This is the
    /// increasing-depolarization schedule used by the default scenario
    /// (eight 2 ms pulses every 5 ms, ramping from 1.0 to 6.0).
    pub fn ramp(
        first_onset: f64,
        spacing: f64,
        count: usize,
        duration: f64,
        amp_start: f64,
        amp_end: f64,
    ) -> Self {
        let mut pulses = Vec::with_capacity(count);
        for j in 0..count {
            let amplitude = if count > 1 {
                amp_start + (amp_end - amp_start) * j as f64 / (count - 1) as f64
            } else {
                amp_start
            };
            pulses.push(Pulse::new(first_onset + j as f64 * spacing, duration, amplitude));
        }
        Self { pulses }
    }

    pub fn push(&mut self, pulse: Pulse) {
        self.pulses.push(pulse);
    }

    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    /// Sample the train onto `grid`, producing one current value per instant.
    ///
    /// Baseline is 0. Pulses are applied in order and a later pulse
    /// overwrites any earlier one across the overlap — amplitudes are never
    /// summed. Pulses entirely outside the grid contribute nothing.
    pub fn sample(&self, grid: &TimeGrid) -> StimulusWaveform {
        let mut samples = vec![0.0; grid.len()];
        for pulse in &self.pulses {
            let end = pulse.end();
            for (k, t) in grid.times().enumerate() {
                if t >= pulse.onset && t < end {
                    samples[k] = pulse.amplitude;
                }
            }
        }
        StimulusWaveform(samples)
    }
}

/// Input current sampled on a time grid, one value per instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StimulusWaveform(Vec<f64>);

impl StimulusWaveform {
    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self(samples)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Current at sample `k`.
    pub fn amplitude_at(&self, k: usize) -> f64 {
        self.0[k]
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<f64>> for StimulusWaveform {
    fn from(samples: Vec<f64>) -> Self {
        Self(samples)
    }
}
