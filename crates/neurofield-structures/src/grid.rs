// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Uniform sampling grids.
//!
//! Both kernels integrate on uniform grids: the LIF integrator walks a
//! [`TimeGrid`] (`t_k = k * dt`), the wave solver additionally discretizes
//! space on a [`SpaceGrid`] (`x_i = i * dx`). The constructors enforce the
//! invariants the stepping code relies on (positive spacing, enough points
//! for the interior stencil), so the hot loops never re-check them.

use serde::{Deserialize, Serialize};

use crate::error::{NeurofieldError, Result};

/// Uniform time grid: `samples` instants at `t_k = k * dt` for `k = 0..samples`.
///
/// Spacing is uniform and instants are strictly increasing by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    dt: f64,
    samples: usize,
}

impl TimeGrid {
    /// Create a grid from an explicit step and sample count.
    ///
    /// `dt` must be finite and strictly positive, and at least one sample
    /// is required.
    pub fn new(dt: f64, samples: usize) -> Result<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(NeurofieldError::InvalidTimeStep(dt));
        }
        if samples == 0 {
            return Err(NeurofieldError::GridTooSmall {
                needed: 1,
                actual: 0,
            });
        }
        Ok(Self { dt, samples })
    }

    /// Create a grid covering the half-open span `[0, horizon)` with step `dt`.
    ///
    /// The sample count is `ceil(horizon / dt)`: the horizon itself is never
    /// sampled. A 50 ms horizon at dt = 0.1 ms yields 500 samples, the last
    /// at 49.9 ms.
    pub fn from_horizon(dt: f64, horizon: f64) -> Result<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(NeurofieldError::InvalidTimeStep(dt));
        }
        if !horizon.is_finite() || horizon <= 0.0 {
            return Err(NeurofieldError::InvalidParameter {
                name: "horizon",
                reason: format!("must be finite and > 0, got {}", horizon),
            });
        }
        Self::new(dt, (horizon / dt).ceil() as usize)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples
    }

    /// A grid always carries at least one sample.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Step between consecutive samples.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Instant of sample `k`.
    pub fn time_at(&self, k: usize) -> f64 {
        k as f64 * self.dt
    }

    /// Index of the last sample, `samples - 1`.
    pub fn last_index(&self) -> usize {
        self.samples - 1
    }

    /// Total span covered, `samples * dt` (the half-open upper edge).
    pub fn horizon(&self) -> f64 {
        self.samples as f64 * self.dt
    }

    /// Iterate over all instants in order.
    pub fn times(&self) -> impl Iterator<Item = f64> {
        let dt = self.dt;
        (0..self.samples).map(move |k| k as f64 * dt)
    }
}

/// Uniform spatial grid: `points` positions at `x_i = i * dx`, spanning a
/// domain of length `(points - 1) * dx` with both endpoints sampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpaceGrid {
    dx: f64,
    points: usize,
}

impl SpaceGrid {
    /// Minimum number of grid points: two boundaries plus one interior
    /// point, the least the second-difference stencil can act on.
    pub const MIN_POINTS: usize = 3;

    /// Create a grid from an explicit spacing and point count.
    pub fn new(dx: f64, points: usize) -> Result<Self> {
        if !dx.is_finite() || dx <= 0.0 {
            return Err(NeurofieldError::InvalidSpaceStep(dx));
        }
        if points < Self::MIN_POINTS {
            return Err(NeurofieldError::GridTooSmall {
                needed: Self::MIN_POINTS,
                actual: points,
            });
        }
        Ok(Self { dx, points })
    }

    /// Grid spanning `[0, length]` inclusive with `points` samples, so
    /// `dx = length / (points - 1)`.
    pub fn from_length(length: f64, points: usize) -> Result<Self> {
        if points < Self::MIN_POINTS {
            return Err(NeurofieldError::GridTooSmall {
                needed: Self::MIN_POINTS,
                actual: points,
            });
        }
        if !length.is_finite() || length <= 0.0 {
            return Err(NeurofieldError::InvalidParameter {
                name: "length",
                reason: format!("must be finite and > 0, got {}", length),
            });
        }
        Self::new(length / (points - 1) as f64, points)
    }

    /// Number of grid points, boundaries included.
    pub fn len(&self) -> usize {
        self.points
    }

    /// A grid always carries at least [`Self::MIN_POINTS`] points.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Spacing between adjacent points.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Domain length `(points - 1) * dx`.
    pub fn length(&self) -> f64 {
        (self.points - 1) as f64 * self.dx
    }

    /// Position of point `i`.
    pub fn position_at(&self, i: usize) -> f64 {
        i as f64 * self.dx
    }

    /// Iterate over all positions in order.
    pub fn positions(&self) -> impl Iterator<Item = f64> {
        let dx = self.dx;
        (0..self.points).map(move |i| i as f64 * dx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_grid_construction() {
        let grid = TimeGrid::new(0.1, 500).unwrap();
        assert_eq!(grid.len(), 500);
        assert_eq!(grid.dt(), 0.1);
        assert_eq!(grid.time_at(0), 0.0);
        assert!((grid.time_at(10) - 1.0).abs() < 1e-12);
        assert_eq!(grid.last_index(), 499);
    }

    #[test]
    fn test_time_grid_rejects_bad_steps() {
        assert!(matches!(
            TimeGrid::new(0.0, 10),
            Err(NeurofieldError::InvalidTimeStep(_))
        ));
        assert!(matches!(
            TimeGrid::new(-0.1, 10),
            Err(NeurofieldError::InvalidTimeStep(_))
        ));
        assert!(matches!(
            TimeGrid::new(f64::NAN, 10),
            Err(NeurofieldError::InvalidTimeStep(_))
        ));
        assert!(matches!(
            TimeGrid::new(0.1, 0),
            Err(NeurofieldError::GridTooSmall { .. })
        ));
    }

    #[test]
    fn test_from_horizon_excludes_upper_edge() {
        // 50 ms at 0.1 ms: 500 samples, last one at 49.9 ms
        let grid = TimeGrid::from_horizon(0.1, 50.0).unwrap();
        assert_eq!(grid.len(), 500);
        assert!((grid.time_at(grid.last_index()) - 49.9).abs() < 1e-9);

        // Non-divisible horizon rounds the count up, still below the edge
        let grid = TimeGrid::from_horizon(0.3, 1.0).unwrap();
        assert_eq!(grid.len(), 4);
        assert!(grid.time_at(3) < 1.0);
    }

    #[test]
    fn test_times_iterator_matches_time_at() {
        let grid = TimeGrid::new(0.25, 4).unwrap();
        let collected: Vec<f64> = grid.times().collect();
        assert_eq!(collected, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_space_grid_from_length() {
        // 100 points over [0, 10]: dx = 10/99
        let grid = SpaceGrid::from_length(10.0, 100).unwrap();
        assert_eq!(grid.len(), 100);
        assert!((grid.dx() - 10.0 / 99.0).abs() < 1e-15);
        assert!((grid.length() - 10.0).abs() < 1e-12);
        assert_eq!(grid.position_at(0), 0.0);
        assert!((grid.position_at(99) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_space_grid_needs_an_interior_point() {
        assert!(matches!(
            SpaceGrid::new(0.5, 2),
            Err(NeurofieldError::GridTooSmall {
                needed: 3,
                actual: 2
            })
        ));
        assert!(SpaceGrid::new(0.5, 3).is_ok());
        assert!(matches!(
            SpaceGrid::from_length(-1.0, 10),
            Err(NeurofieldError::InvalidParameter { name: "length", .. })
        ));
    }

    #[test]
    fn test_grid_serde_round_trip() {
        let grid = SpaceGrid::from_length(1.0, 5).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: SpaceGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, back);
    }
}
