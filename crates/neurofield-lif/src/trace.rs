//! Run output containers: the committed membrane trace and spike indices.

use serde::{Deserialize, Serialize};

use neurofield_structures::TimeGrid;

/// Membrane potential time series, one committed sample per grid instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MembraneTrace(Vec<f64>);

impl MembraneTrace {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(samples: usize) -> Self {
        Self(Vec::with_capacity(samples))
    }

    pub fn push(&mut self, voltage: f64) {
        self.0.push(voltage);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Committed sample `V[k]`.
    pub fn voltage_at(&self, k: usize) -> f64 {
        self.0[k]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

/// Sample indices at which the trace was clamped to the spike peak,
/// strictly increasing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpikeList(Vec<usize>);

impl SpikeList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, index: usize) {
        self.0.push(index);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Map spike indices to instants on `grid`.
    pub fn times(&self, grid: &TimeGrid) -> Vec<f64> {
        self.0.iter().map(|&k| grid.time_at(k)).collect()
    }
}
