// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neurofield-observability
//!
//! Logging infrastructure for NeuroField binaries.
//!
//! Provides one-call logging initialization with console output, optional
//! rolling per-run log files, and per-crate debug flags
//! (`--debug-neurofield-lif`, `NEUROFIELD_DEBUG=neurofield-wave,...`).
//!
//! Library crates only emit `tracing` events; wiring a subscriber is the
//! binary's job and happens exactly once, here.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use init::*;

/// Known NeuroField crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "neurofield",
    "neurofield-structures",
    "neurofield-config",
    "neurofield-lif",
    "neurofield-wave",
    "neurofield-observability",
];
