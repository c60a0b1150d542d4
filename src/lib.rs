//! # Hopfield Recall
//!
//! A classical Hopfield associative memory: binary patterns are stored as
//! low-energy configurations of a symmetric weight matrix, and a noisy or
//! partial probe is recovered by asynchronous relaxation toward a local
//! energy minimum.
//!
//! ## Features
//!
//! - Hebbian (outer-product) learning with per-memory reference energies
//! - Energy evaluation `E(s) = -½ sᵀWs − bᵀs`
//! - Stochastic asynchronous recovery with patience-based convergence,
//!   an injectable RNG and cooperative cancellation
//! - Hamming distance and image decoding helpers
//!
//! ## Quick Start
//!
//! ```rust
//! use hopfield_recall::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let memories = vec![
//!     vec![1.0, 1.0, -1.0, -1.0],
//!     vec![1.0, -1.0, 1.0, -1.0],
//! ];
//! let model = build(&memories)?;
//!
//! let engine = RecoveryEngine::new(RecoveryConfig::default())?;
//! let mut rng = StdRng::seed_from_u64(42);
//! let trajectory = engine.recover(&model, &memories[0], &mut rng)?;
//!
//! assert!(trajectory.converged());
//! assert_eq!(trajectory.final_energy(), model.reference_energy(0));
//! # Ok::<(), hopfield_recall::HopfieldError>(())
//! ```

pub mod error;
pub mod hopfield;
pub mod utils;

// Re-export main types for convenience
pub use error::{HopfieldError, Result};
pub use hopfield::builder::build;
pub use hopfield::energy::energy;
pub use hopfield::model::Model;
pub use hopfield::recovery::{recover, RecoveryEngine, Step, Termination, Trajectory};
pub use hopfield::{binarize, corrupt, validate_bipolar, RecoveryConfig};
pub use utils::distance::hamming;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{HopfieldError, Result};
    pub use crate::hopfield::builder::build;
    pub use crate::hopfield::energy::energy;
    pub use crate::hopfield::model::Model;
    pub use crate::hopfield::recovery::{recover, RecoveryEngine, Step, Termination, Trajectory};
    pub use crate::hopfield::{binarize, corrupt, validate_bipolar, RecoveryConfig};
    pub use crate::utils::distance::hamming;
    pub use crate::utils::image::{decode_image, encode_image, render_ascii};
}
