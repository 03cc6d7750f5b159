// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for neurofield operations
//!
//! Every variant describes a configuration problem caught before stepping
//! begins. Once a run loop has started, the per-step arithmetic is total:
//! pathological-but-finite parameters diverge numerically, they do not fault.

use thiserror::Error;

/// Error type shared by every neurofield simulation kernel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NeurofieldError {
    /// Time step is non-positive or non-finite
    #[error("Invalid time step: dt = {0} (must be finite and > 0)")]
    InvalidTimeStep(f64),

    /// Spatial step is non-positive or non-finite
    #[error("Invalid spatial step: dx = {0} (must be finite and > 0)")]
    InvalidSpaceStep(f64),

    /// Grid carries too few samples for the requested operation
    #[error("Grid too small: {actual} point(s), need at least {needed}")]
    GridTooSmall { needed: usize, actual: usize },

    /// A named parameter failed validation
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Courant number v*dt/dx exceeds the explicit-scheme stability bound
    #[error("Unstable discretization: Courant number {0} exceeds 1 (refine dt or coarsen dx)")]
    UnstableCourant(f64),

    /// Sampled buffer length does not match the grid it claims to cover
    #[error("Array size mismatch: expected {expected}, got {actual}")]
    ArraySizeMismatch { expected: usize, actual: usize },
}

pub type Result<T> = core::result::Result<T, NeurofieldError>;
pub type Error = NeurofieldError;
