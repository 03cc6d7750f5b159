// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! The core crate for neurofield. Defines the uniform sampling grids the
//! simulation kernels integrate on and the error type they all share.

mod error;
mod grid;

pub use error::{Error, NeurofieldError, Result};
pub use grid::{SpaceGrid, TimeGrid};
