//! Classical Hopfield Network
//!
//! Binary (bipolar) associative memory after Hopfield (1982):
//!
//! - [`builder`] stores memories with the Hebbian outer-product rule
//! - [`energy`] evaluates `E(s) = -½ sᵀWs − bᵀs`
//! - [`recovery`] relaxes a probe by asynchronous single-neuron updates
//!
//! This module also holds the recovery configuration and a few helpers for
//! working with bipolar vectors.

pub mod builder;
pub mod energy;
pub mod model;
pub mod recovery;

use crate::error::{HopfieldError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Configuration for a recovery run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    /// Upper bound on the number of asynchronous updates
    pub max_iterations: usize,
    /// Number of consecutive identical states required to declare convergence
    pub patience: usize,
    /// Iterations that must pass before convergence may be declared.
    /// `None` means the same as `patience`.
    pub min_iterations: Option<usize>,
    /// Random seed for neuron selection
    pub seed: Option<u64>,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            patience: 5,
            min_iterations: None,
            seed: None,
        }
    }
}

impl RecoveryConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration limit
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence patience
    pub fn patience(mut self, patience: usize) -> Self {
        self.patience = patience;
        self
    }

    /// Set the minimum number of iterations before convergence is tested
    pub fn min_iterations(mut self, min_iterations: usize) -> Self {
        self.min_iterations = Some(min_iterations);
        self
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Effective minimum iteration count before a convergence test
    pub fn min_iterations_before_convergence(&self) -> usize {
        self.min_iterations.unwrap_or(self.patience)
    }

    /// Reject non-positive iteration limits and patience
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(HopfieldError::InvalidParameter(
                "max_iterations must be positive".to_string(),
            ));
        }
        if self.patience == 0 {
            return Err(HopfieldError::InvalidParameter(
                "patience must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Quantize a vector to {-1, +1}, resolving `sign(0)` to `+1`
pub fn binarize(values: &[f64]) -> Vec<f64> {
    values.iter().map(|&x| sign(x)).collect()
}

/// Sign with the tie-break `sign(0) = +1`
#[inline]
pub(crate) fn sign(x: f64) -> f64 {
    if x >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Check that every component is exactly -1 or +1
pub fn validate_bipolar(values: &[f64]) -> Result<()> {
    match values
        .iter()
        .enumerate()
        .find(|(_, v)| **v != 1.0 && **v != -1.0)
    {
        Some((idx, value)) => Err(HopfieldError::InvalidPattern(format!(
            "value {} at index {} is not bipolar",
            value, idx
        ))),
        None => Ok(()),
    }
}

/// Flip `flips` distinct, randomly chosen components of a bipolar pattern
///
/// Used to produce noisy probes from stored memories.
pub fn corrupt<R: Rng + ?Sized>(pattern: &[f64], flips: usize, rng: &mut R) -> Result<Vec<f64>> {
    validate_bipolar(pattern)?;
    if flips > pattern.len() {
        return Err(HopfieldError::InvalidParameter(format!(
            "cannot flip {} of {} components",
            flips,
            pattern.len()
        )));
    }

    let mut noisy = pattern.to_vec();
    for idx in rand::seq::index::sample(rng, pattern.len(), flips).iter() {
        noisy[idx] = -noisy[idx];
    }
    Ok(noisy)
}
