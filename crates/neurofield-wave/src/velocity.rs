// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Transverse velocity estimation by backward time differences.

use ndarray::Array2;

use neurofield_structures::{NeurofieldError, Result};

use crate::field::{VelocityField, WaveField};

/// Backward-difference velocity of point `i` between two snapshots.
pub fn point_velocity(prev: &[f64], curr: &[f64], dt: f64, i: usize) -> f64 {
    (curr[i] - prev[i]) / dt
}

/// Estimate the velocity field from a recorded displacement field.
///
/// Row `n >= 1` holds `(y^n - y^(n-1)) / dt`; row 0 has no predecessor
/// and stays all zeros, consistent with the at-rest initial condition.
pub fn velocity_field(field: &WaveField, dt: f64) -> Result<VelocityField> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(NeurofieldError::InvalidTimeStep(dt));
    }
    let steps = field.num_steps();
    let points = field.num_points();
    let mut data = Array2::zeros((steps, points));
    for n in 1..steps {
        let prev = field.snapshot(n - 1);
        let curr = field.snapshot(n);
        let mut row = data.row_mut(n);
        for i in 0..points {
            row[i] = (curr[i] - prev[i]) / dt;
        }
    }
    Ok(VelocityField::from_array(data))
}
