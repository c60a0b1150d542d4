//! Learned network parameters

use ndarray::{Array1, Array2};

/// A trained classical Hopfield network
///
/// Produced only by [`build`](super::builder::build) and read-only afterwards.
/// The weight matrix is symmetric with a zero diagonal; the bias is kept for
/// generality and is all zeros under Hebbian learning.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Weight matrix (size x size)
    pub(crate) weights: Array2<f64>,
    /// Bias vector (size)
    pub(crate) bias: Array1<f64>,
    /// Energy of each stored memory, in storage order
    pub(crate) reference_energies: Vec<f64>,
}

impl Model {
    /// Number of neurons
    pub fn size(&self) -> usize {
        self.bias.len()
    }

    /// Number of stored memories
    pub fn memory_count(&self) -> usize {
        self.reference_energies.len()
    }

    /// Weight matrix (size x size)
    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Bias vector, all zeros for Hebbian-built models
    pub fn bias(&self) -> &Array1<f64> {
        &self.bias
    }

    /// Energies of the stored memories, indexed by storage order
    pub fn reference_energies(&self) -> &[f64] {
        &self.reference_energies
    }

    /// Energy of the `index`-th stored memory (0-based)
    pub fn reference_energy(&self, index: usize) -> Option<f64> {
        self.reference_energies.get(index).copied()
    }

    /// Index of the memory whose reference energy is nearest to `energy`
    pub fn closest_reference(&self, energy: f64) -> Option<usize> {
        self.reference_energies
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - energy).abs().total_cmp(&(*b - energy).abs()))
            .map(|(idx, _)| idx)
    }

    /// Theoretical capacity (0.14 * N for random patterns)
    pub fn capacity(&self) -> f64 {
        0.14 * self.size() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> Model {
        Model {
            weights: Array2::zeros((4, 4)),
            bias: Array1::zeros(4),
            reference_energies: vec![-3.0, -1.0, -6.0],
        }
    }

    #[test]
    fn test_dimensions() {
        let model = sample_model();
        assert_eq!(model.size(), 4);
        assert_eq!(model.memory_count(), 3);
        assert!((model.capacity() - 0.56).abs() < 1e-10);
    }

    #[test]
    fn test_reference_lookup() {
        let model = sample_model();
        assert_eq!(model.reference_energy(2), Some(-6.0));
        assert_eq!(model.reference_energy(3), None);
        assert_eq!(model.closest_reference(-2.6), Some(0));
        assert_eq!(model.closest_reference(-10.0), Some(2));
    }
}
