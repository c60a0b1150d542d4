//! Hebbian learning
//!
//! W = (1/K) Σ_k ξ^k (ξ^k)^T with the diagonal zeroed afterwards.

use super::energy::energy_of;
use super::model::Model;
use super::validate_bipolar;
use crate::error::{HopfieldError, Result};
use ndarray::{Array1, Array2, ArrayView1};

/// Build a model from a batch of bipolar memories
///
/// Every memory must have the same, non-zero length and contain only -1/+1.
/// The reference energy of each memory is computed under the finished model.
pub fn build(memories: &[Vec<f64>]) -> Result<Model> {
    let first = memories.first().ok_or_else(|| {
        HopfieldError::InvalidPattern("at least one memory is required".to_string())
    })?;

    let n = first.len();
    if n == 0 {
        return Err(HopfieldError::InvalidPattern(
            "memories must not be empty vectors".to_string(),
        ));
    }

    for memory in memories {
        if memory.len() != n {
            return Err(HopfieldError::shape(n, memory.len()));
        }
        validate_bipolar(memory)?;
    }

    let k = memories.len();
    let mut weights = Array2::<f64>::zeros((n, n));

    for memory in memories {
        let xi = ArrayView1::from(memory.as_slice());
        for i in 0..n {
            let xi_i = xi[i];
            weights.row_mut(i).scaled_add(xi_i, &xi);
        }
    }

    weights /= k as f64;
    weights.diag_mut().fill(0.0);

    let mut model = Model {
        weights,
        bias: Array1::zeros(n),
        reference_energies: Vec::with_capacity(k),
    };

    model.reference_energies = memories
        .iter()
        .map(|memory| energy_of(&model, ArrayView1::from(memory.as_slice())))
        .collect();

    log::debug!("Built Hopfield model: {} neurons, {} memories", n, k);
    if k as f64 > model.capacity() {
        log::warn!(
            "Stored {} memories exceeds classical capacity {:.1} for {} neurons",
            k,
            model.capacity(),
            n
        );
    }

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orthogonal_pair() -> Vec<Vec<f64>> {
        vec![vec![1.0, 1.0, -1.0, -1.0], vec![1.0, -1.0, 1.0, -1.0]]
    }

    #[test]
    fn test_hebbian_weights() {
        let model = build(&orthogonal_pair()).unwrap();
        let w = model.weights();

        // Components 0 and 3 disagree in both memories
        assert!((w[[0, 3]] + 1.0).abs() < 1e-12);
        // Components 0 and 1 agree in one memory and disagree in the other
        assert!(w[[0, 1]].abs() < 1e-12);
        assert_eq!(model.size(), 4);
        assert_eq!(model.memory_count(), 2);
    }

    #[test]
    fn test_zero_diagonal_and_symmetry() {
        let memories = vec![
            vec![1.0, -1.0, 1.0, 1.0, -1.0],
            vec![-1.0, -1.0, 1.0, -1.0, 1.0],
            vec![1.0, 1.0, 1.0, -1.0, -1.0],
        ];
        let model = build(&memories).unwrap();
        let w = model.weights();

        for i in 0..5 {
            assert_eq!(w[[i, i]], 0.0);
            for j in 0..5 {
                assert_eq!(w[[i, j]], w[[j, i]]);
            }
        }
        assert!(model.bias().iter().all(|&b| b == 0.0));
    }

    #[test]
    fn test_reference_energies_match_memories() {
        let memories = orthogonal_pair();
        let model = build(&memories).unwrap();

        for (k, memory) in memories.iter().enumerate() {
            let e = crate::hopfield::energy::energy(&model, memory).unwrap();
            assert_eq!(model.reference_energy(k), Some(e));
        }
    }

    #[test]
    fn test_rejects_empty_batch() {
        assert!(matches!(build(&[]), Err(HopfieldError::InvalidPattern(_))));
    }

    #[test]
    fn test_rejects_zero_length_memory() {
        let memories: Vec<Vec<f64>> = vec![vec![]];
        assert!(matches!(
            build(&memories),
            Err(HopfieldError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_rejects_ragged_memories() {
        let memories = vec![vec![1.0, -1.0, 1.0], vec![1.0, -1.0]];
        assert_eq!(
            build(&memories),
            Err(HopfieldError::Shape { expected: 3, actual: 2 })
        );
    }

    #[test]
    fn test_rejects_non_bipolar_values() {
        let memories = vec![vec![1.0, 0.5, -1.0]];
        assert!(matches!(
            build(&memories),
            Err(HopfieldError::InvalidPattern(_))
        ));
    }
}
