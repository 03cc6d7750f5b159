// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # LIF Point-Neuron Kernel
//!
//! Deterministic leaky integrate-and-fire simulation in two stages:
//! - **Stimulus**: rectangular current pulses sampled onto a time grid
//! - **Dynamics**: explicit-Euler membrane integration with spike clamping
//!   and a hard refractory hold
//!
//! The kernel is synchronous and single-threaded; a run owns all of its
//! buffers and produces the complete membrane trace before returning.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod dynamics;
pub mod runner;
pub mod stimulus;
pub mod trace;

pub use dynamics::{LifIntegrator, LifParameters, NeuronPhase, StepOutcome};
pub use runner::{run_lif, run_lif_on_waveform, LifRun};
pub use stimulus::{Pulse, PulseTrain, StimulusWaveform};
pub use trace::{MembraneTrace, SpikeList};
