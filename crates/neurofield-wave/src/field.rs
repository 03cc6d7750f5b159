// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Space-time result containers.
//!
//! Both fields are `(time_steps, spatial_points)` matrices: one row per
//! snapshot, one column per grid point, so `field[[n, i]]` reads as
//! `y_i^n` in the discretization.

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use neurofield_structures::{NeurofieldError, Result};

/// Displacement history of a wave run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveField {
    data: Array2<f64>,
}

impl WaveField {
    /// Reshape a row-major flat buffer into the field.
    pub fn from_flat(num_steps: usize, num_points: usize, flat: Vec<f64>) -> Result<Self> {
        let expected = num_steps * num_points;
        let actual = flat.len();
        let data = Array2::from_shape_vec((num_steps, num_points), flat)
            .map_err(|_| NeurofieldError::ArraySizeMismatch { expected, actual })?;
        Ok(Self { data })
    }

    /// Snapshots recorded, the initial profile included.
    pub fn num_steps(&self) -> usize {
        self.data.nrows()
    }

    /// Grid points per snapshot.
    pub fn num_points(&self) -> usize {
        self.data.ncols()
    }

    /// Displacement of point `i` at step `n`.
    pub fn displacement(&self, i: usize, n: usize) -> f64 {
        self.data[[n, i]]
    }

    /// Full displacement row at step `n`.
    pub fn snapshot(&self, n: usize) -> ArrayView1<'_, f64> {
        self.data.row(n)
    }

    /// Displacement of point `i` across all steps.
    pub fn point_series(&self, i: usize) -> ArrayView1<'_, f64> {
        self.data.column(i)
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn into_array(self) -> Array2<f64> {
        self.data
    }
}

/// Per-point transverse velocity history, same shape as [`WaveField`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityField {
    data: Array2<f64>,
}

impl VelocityField {
    pub(crate) fn from_array(data: Array2<f64>) -> Self {
        Self { data }
    }

    pub fn num_steps(&self) -> usize {
        self.data.nrows()
    }

    pub fn num_points(&self) -> usize {
        self.data.ncols()
    }

    /// Velocity of point `i` at step `n`.
    pub fn velocity(&self, i: usize, n: usize) -> f64 {
        self.data[[n, i]]
    }

    /// Full velocity row at step `n`.
    pub fn snapshot(&self, n: usize) -> ArrayView1<'_, f64> {
        self.data.row(n)
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn into_array(self) -> Array2<f64> {
        self.data
    }
}
