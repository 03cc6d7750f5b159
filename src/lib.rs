//! # NeuroField - Deterministic Simulation Kernels
//!
//! NeuroField packages two small, fully deterministic numerical kernels
//! behind one facade: a leaky integrate-and-fire (LIF) point-neuron
//! integrator driven by rectangular current pulses, and an explicit
//! finite-difference solver for the 1-D wave equation with fixed ends.
//! Same inputs, same outputs, bit for bit, on every run.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! neurofield = "0.1"  # Default: config + observability
//! ```
//!
//! ```rust
//! use neurofield::prelude::*;
//!
//! // Membrane response to the canonical increasing-pulse schedule
//! let grid = TimeGrid::from_horizon(0.1, 50.0)?;
//! let train = PulseTrain::ramp(5.0, 5.0, 8, 2.0, 1.0, 6.0);
//! let lif = run_lif(&grid, &train, LifParameters::default())?;
//! println!("spikes at {:?}", lif.spikes.as_slice());
//!
//! // Standing half-sine on a 10-unit string, Courant number 0.99
//! let wave = run_wave(&WaveParameters::default())?;
//! println!("energy at step 1 = {}", wave.energy_series()[0]);
//! # Ok::<(), neurofield::structures::NeurofieldError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - **`config`** (default): TOML configuration loader with environment
//!   and CLI overrides
//! - **`observability`** (default): one-call logging initialization
//!   (console + rolling file output)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: neurofield-structures                      │
//! │  (TimeGrid, SpaceGrid, shared error taxonomy)           │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Kernels: neurofield-lif, neurofield-wave               │
//! │  (Pure numerical stepping, no I/O)                      │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Infrastructure: neurofield-config, -observability      │
//! │  (TOML + overrides, tracing subscriber wiring)          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The kernel crates emit `tracing` events but never install a
//! subscriber; binaries do that once through `observability`.
//!
//! ## License
//!
//! Apache-2.0

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export foundation
pub use neurofield_structures as structures;

// Re-export kernels
pub use neurofield_lif as lif;
pub use neurofield_wave as wave;

// Re-export infrastructure
#[cfg(feature = "config")]
pub use neurofield_config as config;

#[cfg(feature = "observability")]
pub use neurofield_observability as observability;

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::structures::{NeurofieldError, Result, SpaceGrid, TimeGrid};

    pub use crate::lif::{
        run_lif, run_lif_on_waveform, LifParameters, LifRun, Pulse, PulseTrain,
    };
    pub use crate::wave::{run_wave, WaveParameters, WaveRun};

    #[cfg(feature = "config")]
    pub use crate::config::{load_config, validate_config, NeurofieldConfig};

    #[cfg(feature = "observability")]
    pub use crate::observability::{init_logging, CrateDebugFlags, LoggingGuard};
}
