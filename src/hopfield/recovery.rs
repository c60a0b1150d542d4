//! Asynchronous recovery
//!
//! Relaxes a probe toward a stored memory one neuron at a time. Each
//! iteration picks a neuron uniformly at random (with replacement), sets it
//! to the sign of its local field and records the resulting state and energy.
//! Because only one neuron changes per step and the weights are symmetric
//! with a zero diagonal, the energy never increases along the trajectory.
//!
//! A run stops when the last `patience` recorded states are identical (after
//! at least `min_iterations` steps), when `max_iterations` is reached, or when
//! an external cancellation flag is raised.

use super::energy::energy_of;
use super::model::Model;
use super::{sign, validate_bipolar, RecoveryConfig};
use crate::error::{HopfieldError, Result};
use crate::utils::distance::hamming;
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

/// Why a recovery run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The last `patience` states were identical
    Converged,
    /// The iteration limit was reached first
    MaxIterations,
    /// The cancellation flag was raised
    Cancelled,
}

/// One asynchronous update
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Iteration number, starting at 1
    pub iteration: usize,
    /// Index of the neuron that was updated
    pub neuron: usize,
    /// Whether the neuron changed sign
    pub flipped: bool,
    /// Quantized state after the update
    pub state: Array1<f64>,
    /// Energy of `state`
    pub energy: f64,
}

/// Record of a recovery run
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    steps: Vec<Step>,
    termination: Termination,
}

impl Trajectory {
    /// Number of recorded iterations
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Recorded states in iteration order
    pub fn frames(&self) -> impl Iterator<Item = &Array1<f64>> + '_ {
        self.steps.iter().map(|step| &step.state)
    }

    /// Recorded energies in iteration order
    pub fn energy_trace(&self) -> Vec<f64> {
        self.steps.iter().map(|step| step.energy).collect()
    }

    /// State at iteration `t` (1-based)
    pub fn frame(&self, t: usize) -> Option<&Array1<f64>> {
        self.step(t).map(|step| &step.state)
    }

    /// Energy at iteration `t` (1-based)
    pub fn energy_at(&self, t: usize) -> Option<f64> {
        self.step(t).map(|step| step.energy)
    }

    pub fn final_state(&self) -> Option<&Array1<f64>> {
        self.steps.last().map(|step| &step.state)
    }

    pub fn final_energy(&self) -> Option<f64> {
        self.steps.last().map(|step| step.energy)
    }

    /// Number of iterations in which the selected neuron changed sign
    pub fn flip_count(&self) -> usize {
        self.steps.iter().filter(|step| step.flipped).count()
    }

    fn step(&self, t: usize) -> Option<&Step> {
        t.checked_sub(1).and_then(|idx| self.steps.get(idx))
    }
}

/// Runs asynchronous relaxation against an immutable [`Model`]
///
/// The engine holds only its configuration, so one engine (and one model)
/// can serve any number of concurrent runs, each with its own RNG.
#[derive(Debug, Clone)]
pub struct RecoveryEngine {
    config: RecoveryConfig,
}

impl RecoveryEngine {
    /// Create an engine, rejecting invalid limits
    pub fn new(config: RecoveryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RecoveryConfig {
        &self.config
    }

    /// Relax `initial` using neuron selections drawn from `rng`
    pub fn recover<R: Rng + ?Sized>(
        &self,
        model: &Model,
        initial: &[f64],
        rng: &mut R,
    ) -> Result<Trajectory> {
        self.run(model, initial, rng, None)
    }

    /// Like [`recover`](Self::recover), but checks `cancel` before every iteration
    ///
    /// A cancelled run returns the states recorded so far.
    pub fn recover_cancellable<R: Rng + ?Sized>(
        &self,
        model: &Model,
        initial: &[f64],
        rng: &mut R,
        cancel: &AtomicBool,
    ) -> Result<Trajectory> {
        self.run(model, initial, rng, Some(cancel))
    }

    /// Relax `initial` with an RNG seeded from the configuration
    ///
    /// Falls back to OS entropy when no seed is configured.
    pub fn recover_seeded(&self, model: &Model, initial: &[f64]) -> Result<Trajectory> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.recover(model, initial, &mut rng)
    }

    fn run<R: Rng + ?Sized>(
        &self,
        model: &Model,
        initial: &[f64],
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<Trajectory> {
        let n = model.size();
        if initial.len() != n {
            return Err(HopfieldError::shape(n, initial.len()));
        }
        validate_bipolar(initial)?;

        let patience = self.config.patience;
        let min_iterations = self.config.min_iterations_before_convergence();

        let mut state = Array1::from(initial.to_vec());
        let mut window: VecDeque<Vec<f64>> = VecDeque::with_capacity(patience);
        let mut steps = Vec::new();
        let mut termination = Termination::MaxIterations;

        for t in 1..=self.config.max_iterations {
            if cancel.map_or(false, |flag| flag.load(Ordering::Relaxed)) {
                termination = Termination::Cancelled;
                break;
            }

            let neuron = rng.gen_range(0..n);
            let activation = model.weights.row(neuron).dot(&state) - model.bias[neuron];
            let value = sign(activation);
            let flipped = value != state[neuron];
            state[neuron] = value;

            let frame = state.mapv(sign);
            let energy = energy_of(model, frame.view());

            if flipped {
                log::trace!(
                    "iteration {}: neuron {} flipped to {:+}, energy {:.6}",
                    t,
                    neuron,
                    value,
                    energy
                );
            }

            if window.len() == patience {
                window.pop_front();
            }
            window.push_back(frame.to_vec());

            steps.push(Step {
                iteration: t,
                neuron,
                flipped,
                state: frame,
                energy,
            });

            if t >= min_iterations && window.len() == patience && is_settled(&window) {
                termination = Termination::Converged;
                break;
            }
        }

        log::debug!(
            "Recovery stopped ({:?}) after {} iterations, final energy {:?}",
            termination,
            steps.len(),
            steps.last().map(|step| step.energy)
        );

        Ok(Trajectory { steps, termination })
    }
}

/// True when every state in the window equals the oldest one
fn is_settled(window: &VecDeque<Vec<f64>>) -> bool {
    match window.front() {
        Some(oldest) => window
            .iter()
            .skip(1)
            .all(|state| hamming(oldest, state).map_or(false, |d| d == 0)),
        None => false,
    }
}

/// Relax `initial` under `model`
///
/// `min_iterations` defaults to `patience` when `None`. Reaching
/// `max_iterations` without convergence is not an error; inspect
/// [`Trajectory::converged`] or its length.
pub fn recover<R: Rng + ?Sized>(
    model: &Model,
    initial: &[f64],
    max_iterations: usize,
    patience: usize,
    min_iterations: Option<usize>,
    rng: &mut R,
) -> Result<Trajectory> {
    let config = RecoveryConfig {
        max_iterations,
        patience,
        min_iterations,
        seed: None,
    };
    RecoveryEngine::new(config)?.recover(model, initial, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hopfield::builder::build;

    fn orthogonal_model() -> Model {
        build(&[vec![1.0, 1.0, -1.0, -1.0], vec![1.0, -1.0, 1.0, -1.0]]).unwrap()
    }

    #[test]
    fn test_is_settled() {
        let mut window = VecDeque::new();
        assert!(!is_settled(&window));

        window.push_back(vec![1.0, -1.0]);
        window.push_back(vec![1.0, -1.0]);
        assert!(is_settled(&window));

        window.push_back(vec![-1.0, -1.0]);
        assert!(!is_settled(&window));
    }

    #[test]
    fn test_stored_memory_is_fixed_point() {
        let model = orthogonal_model();
        let mut rng = StdRng::seed_from_u64(1);
        let trajectory = recover(&model, &[1.0, 1.0, -1.0, -1.0], 100, 3, None, &mut rng).unwrap();

        assert!(trajectory.converged());
        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory.flip_count(), 0);
    }

    #[test]
    fn test_patience_one_respects_min_iterations() {
        let model = orthogonal_model();
        let mut rng = StdRng::seed_from_u64(2);
        let trajectory =
            recover(&model, &[1.0, 1.0, -1.0, -1.0], 100, 1, Some(10), &mut rng).unwrap();

        assert!(trajectory.converged());
        assert_eq!(trajectory.len(), 10);
    }

    #[test]
    fn test_iterations_are_one_based() {
        let model = orthogonal_model();
        let mut rng = StdRng::seed_from_u64(3);
        let trajectory = recover(&model, &[1.0, -1.0, 1.0, -1.0], 4, 10, None, &mut rng).unwrap();

        assert!(trajectory.frame(0).is_none());
        assert!(trajectory.frame(1).is_some());
        assert!(trajectory.energy_at(4).is_some());
        assert!(trajectory.energy_at(5).is_none());
        for (idx, step) in trajectory.steps().iter().enumerate() {
            assert_eq!(step.iteration, idx + 1);
        }
    }

    #[test]
    fn test_invalid_parameters() {
        let model = orthogonal_model();
        let mut rng = StdRng::seed_from_u64(4);
        let probe = [1.0, 1.0, -1.0, -1.0];

        assert!(matches!(
            recover(&model, &probe, 0, 5, None, &mut rng),
            Err(HopfieldError::InvalidParameter(_))
        ));
        assert!(matches!(
            recover(&model, &probe, 10, 0, None, &mut rng),
            Err(HopfieldError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_non_bipolar_probe_rejected() {
        let model = orthogonal_model();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            recover(&model, &[1.0, 0.0, -1.0, -1.0], 10, 2, None, &mut rng),
            Err(HopfieldError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let model = orthogonal_model();
        let engine = RecoveryEngine::new(RecoveryConfig::new().patience(3).seed(99)).unwrap();
        let probe = [-1.0, 1.0, -1.0, -1.0];

        let first = engine.recover_seeded(&model, &probe).unwrap();
        let second = engine.recover_seeded(&model, &probe).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_raised_flag_cancels_before_first_iteration() {
        let model = orthogonal_model();
        let engine = RecoveryEngine::new(RecoveryConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(6);
        let cancel = AtomicBool::new(true);

        let trajectory = engine
            .recover_cancellable(&model, &[1.0, 1.0, -1.0, -1.0], &mut rng, &cancel)
            .unwrap();
        assert_eq!(trajectory.termination(), Termination::Cancelled);
        assert!(trajectory.is_empty());
        assert!(trajectory.final_energy().is_none());
    }
}
