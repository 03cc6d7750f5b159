// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Initial displacement profiles.

use std::f64::consts::PI;

use neurofield_structures::SpaceGrid;

/// Sample the half-sine standing profile `sin(pi * x / length)` over the
/// grid. The endpoints are forced to exactly 0.0: the fixed-end boundary
/// condition wins over the formula, whose value at `x = length` is only
/// zero up to floating-point residue.
pub fn sine_profile(grid: &SpaceGrid) -> Vec<f64> {
    let length = grid.length();
    let mut profile: Vec<f64> = grid
        .positions()
        .map(|x| (PI * x / length).sin())
        .collect();
    profile[0] = 0.0;
    let last = profile.len() - 1;
    profile[last] = 0.0;
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exactly_zero() {
        let grid = SpaceGrid::from_length(10.0, 100).unwrap();
        let profile = sine_profile(&grid);
        assert_eq!(profile.len(), 100);
        assert_eq!(profile[0], 0.0);
        assert_eq!(profile[99], 0.0);
    }

    #[test]
    fn test_midpoint_peaks_at_one() {
        // Odd point count puts a sample exactly at length / 2
        let grid = SpaceGrid::from_length(10.0, 101).unwrap();
        let profile = sine_profile(&grid);
        assert!((profile[50] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_profile_is_symmetric() {
        let grid = SpaceGrid::from_length(1.0, 5).unwrap();
        let profile = sine_profile(&grid);
        let n = profile.len();
        for i in 0..n {
            assert!((profile[i] - profile[n - 1 - i]).abs() < 1e-12);
        }
        // sin(pi/4) at the quarter points
        assert!((profile[1] - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }
}
