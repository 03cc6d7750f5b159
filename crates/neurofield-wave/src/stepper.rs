// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Explicit finite-difference stepper for the 1-D wave equation.
//!
//! Central differences in both time and space give the update
//!
//! ```text
//! y[i]^(n+1) = 2*y[i]^n - y[i]^(n-1) + c^2 * (y[i+1]^n - 2*y[i]^n + y[i-1]^n)
//! ```
//!
//! with `c` the Courant number. Both string ends are held at zero on
//! every step. The stepper keeps exactly three row buffers and rotates
//! them, so advancing allocates nothing.

use neurofield_structures::{NeurofieldError, Result};

use crate::params::WaveParameters;

/// In-place time stepper over one displacement row.
///
/// Starting from a displacement profile at rest (zero initial velocity),
/// the previous row is seeded equal to the current one; the first
/// [`advance`](Self::advance) then produces the profile one time step in.
#[derive(Debug, Clone)]
pub struct WaveStepper {
    c2: f64,
    prev: Vec<f64>,
    curr: Vec<f64>,
    scratch: Vec<f64>,
}

impl WaveStepper {
    /// Build a stepper from validated parameters and the initial profile.
    ///
    /// Fails when the parameters themselves are invalid or when the
    /// profile length does not match `spatial_points`.
    pub fn new(params: &WaveParameters, initial: Vec<f64>) -> Result<Self> {
        params.validate()?;
        if initial.len() != params.spatial_points {
            return Err(NeurofieldError::ArraySizeMismatch {
                expected: params.spatial_points,
                actual: initial.len(),
            });
        }
        let courant = params.courant();
        Ok(Self {
            c2: courant * courant,
            prev: initial.clone(),
            curr: initial,
            scratch: vec![0.0; params.spatial_points],
        })
    }

    /// Advance one time step and return the new current row.
    pub fn advance(&mut self) -> &[f64] {
        let last = self.curr.len() - 1;
        self.scratch[0] = 0.0;
        self.scratch[last] = 0.0;
        for i in 1..last {
            let laplacian = self.curr[i + 1] - 2.0 * self.curr[i] + self.curr[i - 1];
            self.scratch[i] = 2.0 * self.curr[i] - self.prev[i] + self.c2 * laplacian;
        }
        std::mem::swap(&mut self.prev, &mut self.curr);
        std::mem::swap(&mut self.curr, &mut self.scratch);
        &self.curr
    }

    /// Displacement row at the current step.
    pub fn current(&self) -> &[f64] {
        &self.curr
    }

    /// Displacement row one step behind.
    pub fn previous(&self) -> &[f64] {
        &self.prev
    }

    /// Squared Courant number used in the update.
    pub fn courant_squared(&self) -> f64 {
        self.c2
    }

    /// Row width, boundaries included.
    pub fn num_points(&self) -> usize {
        self.curr.len()
    }
}
