//! # statesim-generator
//!
//! Synthetic measurement streams from a discrete-time stochastic
//! state-space process, for exercising estimators such as Kalman filters
//! with reproducible data.
//!
//! ## Step Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["S (x, k)"] -->|"Transition::advance()"| B["S' (x, k)"]
//!     B -->|"Sᵀ · H"| C["m (k, n)"]
//!     C -->|"N(m, sqrt(P))"| D["measurement (k, n)"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use ndarray::{Array2, array};
//! use statesim_generator::Generator;
//!
//! // Constant-velocity target, position observed with variance 0.25.
//! let mut g = Generator::linear(
//!     42,
//!     1,
//!     array![[1.0, 1.0], [0.0, 1.0]],
//!     array![0.25],
//!     array![[1.0], [0.0]],
//!     array![[0.0], [1.0]],
//! )?;
//!
//! let first = g.generate()?;
//! assert_eq!(first.dim(), (1, 1));
//! assert_eq!(g.state_estimate(), &array![[1.0], [1.0]]);
//!
//! let path = g.simulate(100)?;
//! assert_eq!(path.dim(), (100, 1, 1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | S | [`Generator::state_estimate()`] | hidden state, shape `(x, k)` |
//! | A | [`Generator::transition()`] | transition rule, matrix `(x, x)` or function |
//! | H | [`Generator::observation()`] | observation matrix, shape `(x, n)` |
//! | P | [`Generator::variances()`] | per-channel noise variance, length `n` |
//! | n | [`Generator::measurement_size()`] | measurement size |
//! | x | [`Generator::state_size()`] | state size |

mod error;
mod generator;
mod transition;

pub(crate) mod state_space;

pub use error::{ShapeError, StepError};
pub use generator::{Generator, LinearGenerator, NonLinearGenerator};
pub use transition::{Linear, NonLinear, Transition};
