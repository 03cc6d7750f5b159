// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Wave run parameters and the pre-run stability check.

use serde::{Deserialize, Serialize};

use neurofield_structures::{NeurofieldError, Result, SpaceGrid, TimeGrid};

/// Absolute slack on the Courant bound, absorbing rounding in the
/// derived `dx`/`dt` quotients. Anything beyond it is a real violation.
pub const COURANT_TOLERANCE: f64 = 1e-9;

/// Parameters of one wave run.
///
/// The grids are derived: `dx = length / (spatial_points - 1)` and
/// `dt = duration / time_steps`. A run produces `time_steps` snapshots,
/// the initial profile included.
///
/// Defaults describe the canonical scenario: a 10-unit string sampled at
/// 100 points, speed 2, simulated for 10 time units in 200 steps
/// (Courant number 0.99).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveParameters {
    /// Propagation speed
    pub speed: f64,
    /// Domain length
    pub length: f64,
    /// Simulated time span
    pub duration: f64,
    /// Spatial samples, boundaries included
    pub spatial_points: usize,
    /// Snapshots to produce (the initial profile counts as the first)
    pub time_steps: usize,
}

impl WaveParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spatial step `length / (spatial_points - 1)`.
    pub fn dx(&self) -> f64 {
        self.length / (self.spatial_points - 1) as f64
    }

    /// Time step `duration / time_steps`.
    pub fn dt(&self) -> f64 {
        self.duration / self.time_steps as f64
    }

    /// Courant number `speed * dt / dx`, the explicit-scheme stability
    /// measure. At most 1 for a stable run; exactly 1 is the lossless
    /// edge case.
    pub fn courant(&self) -> f64 {
        self.speed * self.dt() / self.dx()
    }

    /// The spatial grid the run discretizes.
    pub fn space_grid(&self) -> Result<SpaceGrid> {
        SpaceGrid::from_length(self.length, self.spatial_points)
    }

    /// The snapshot instants of the run.
    pub fn time_grid(&self) -> Result<TimeGrid> {
        TimeGrid::new(self.dt(), self.time_steps)
    }

    /// Check the configuration-error taxonomy before any stepping.
    ///
    /// Rejects non-positive speed/length/duration, fewer than three
    /// spatial points, zero time steps, and a Courant number beyond the
    /// stability bound. An unstable discretization is refused outright,
    /// never clamped into range.
    pub fn validate(&self) -> Result<()> {
        if self.spatial_points < SpaceGrid::MIN_POINTS {
            return Err(NeurofieldError::GridTooSmall {
                needed: SpaceGrid::MIN_POINTS,
                actual: self.spatial_points,
            });
        }
        if self.time_steps == 0 {
            return Err(NeurofieldError::GridTooSmall {
                needed: 1,
                actual: 0,
            });
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(NeurofieldError::InvalidParameter {
                name: "speed",
                reason: format!("must be finite and > 0, got {}", self.speed),
            });
        }
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(NeurofieldError::InvalidParameter {
                name: "length",
                reason: format!("must be finite and > 0, got {}", self.length),
            });
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(NeurofieldError::InvalidParameter {
                name: "duration",
                reason: format!("must be finite and > 0, got {}", self.duration),
            });
        }
        let courant = self.courant();
        if courant > 1.0 + COURANT_TOLERANCE {
            return Err(NeurofieldError::UnstableCourant(courant));
        }
        Ok(())
    }
}

impl Default for WaveParameters {
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
