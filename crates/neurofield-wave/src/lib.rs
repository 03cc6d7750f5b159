// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # 1-D Wave Equation Kernel
//!
//! Explicit finite-difference solver for `(1/v^2) d2y/dt2 - d2y/dx2 = 0`
//! on a string with fixed (Dirichlet) ends:
//! - **Initializer**: half-sine displacement profile, released from rest
//! - **Stepper**: second-order leapfrog stencil with the Courant factor
//!   precomputed and the boundaries pinned to zero every step
//! - **Velocity**: backward-difference estimate between snapshots
//! - **Energy**: the conserved discrete kinetic+potential diagnostic
//!
//! Stability (Courant number `v*dt/dx <= 1`) is validated before any
//! stepping and never silently clamped.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod energy;
pub mod field;
pub mod initializer;
pub mod params;
pub mod runner;
pub mod stepper;
pub mod velocity;

pub use energy::discrete_energy;
pub use field::{VelocityField, WaveField};
pub use initializer::sine_profile;
pub use params::WaveParameters;
pub use runner::{run_wave, WaveRun};
pub use stepper::WaveStepper;
pub use velocity::{point_velocity, velocity_field};
