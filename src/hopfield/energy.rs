//! Energy function
//!
//! E(s) = -0.5 * sᵀ W s − bᵀ s
//!
//! Stored memories sit at local minima; asynchronous updates never raise it.

use super::model::Model;
use crate::error::{HopfieldError, Result};
use ndarray::ArrayView1;

/// Energy of `state` under `model`
pub fn energy(model: &Model, state: &[f64]) -> Result<f64> {
    if state.len() != model.size() {
        return Err(HopfieldError::shape(model.size(), state.len()));
    }
    Ok(energy_of(model, ArrayView1::from(state)))
}

/// Energy without a shape check; callers guarantee `state.len() == model.size()`
pub(crate) fn energy_of(model: &Model, state: ArrayView1<f64>) -> f64 {
    let quadratic = state.dot(&model.weights.dot(&state));
    -0.5 * quadratic - model.bias.dot(&state)
}
