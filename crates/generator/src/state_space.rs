//! Shared state-space core.
//!
//! Owns the state `S (x, k)`, observation matrix `H (x, n)` and variance
//! vector `P (n)`, validates their shapes once, and turns a committed state
//! into a noisy measurement:
//!
//! ```text
//! m      = Sᵀ · H                       (k, n)
//! y[i,j] ~ N(m[i,j], sqrt(P[j]))
//! ```
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2, ArrayViewMut2};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{ShapeError, StepError};
use crate::transition::Transition;

/// State, observation and noise parameters shared by every transition rule.
#[derive(Clone, Debug)]
pub(crate) struct StateSpace {
    n: usize,
    state: Array2<f64>,
    observation: Array2<f64>,
    variances: Array1<f64>,
    std_devs: Array1<f64>,
}

impl StateSpace {
    /// Validates shapes and builds the core.
    ///
    /// Checks, in order: `n >= 1`, `S` non-empty, `len(P) == n`, the
    /// transition's own check, then `H` is `(x, n)` where `x` is the row
    /// count of `S`. Variance values are not inspected here.
    pub(crate) fn new<T: Transition>(
        n: usize,
        variances: Array1<f64>,
        observation: Array2<f64>,
        state: Array2<f64>,
        transition: &T,
    ) -> Result<Self, ShapeError> {
        if n == 0 {
            return Err(ShapeError::EmptyMeasurement);
        }
        let (rows, cols) = state.dim();
        if rows == 0 || cols == 0 {
            return Err(ShapeError::EmptyState { rows, cols });
        }
        if variances.len() != n {
            return Err(ShapeError::VarianceLength {
                expected: n,
                got: variances.len(),
            });
        }
        transition.validate(&state)?;
        if observation.dim() != (rows, n) {
            return Err(ShapeError::ObservationShape {
                expected: (rows, n),
                got: observation.dim(),
            });
        }

        let std_devs = variances.mapv(f64::sqrt);
        Ok(Self {
            n,
            state,
            observation,
            variances,
            std_devs,
        })
    }

    /// Measurement size `n`.
    pub(crate) fn n(&self) -> usize {
        self.n
    }

    /// State size `x`.
    pub(crate) fn x(&self) -> usize {
        self.state.nrows()
    }

    /// Number of state columns `k`.
    pub(crate) fn k(&self) -> usize {
        self.state.ncols()
    }

    /// Shape of one measurement, `(k, n)`.
    pub(crate) fn measurement_dim(&self) -> (usize, usize) {
        (self.k(), self.n)
    }

    pub(crate) fn state(&self) -> &Array2<f64> {
        &self.state
    }

    pub(crate) fn observation(&self) -> &Array2<f64> {
        &self.observation
    }

    pub(crate) fn variances(&self) -> &Array1<f64> {
        &self.variances
    }

    /// Replaces the state with `next` if it has the current shape.
    ///
    /// On error the previous state is kept.
    pub(crate) fn commit(&mut self, next: Array2<f64>) -> Result<(), StepError> {
        if next.dim() != self.state.dim() {
            return Err(StepError::TransitionShape {
                expected: self.state.dim(),
                got: next.dim(),
            });
        }
        self.state = next;
        Ok(())
    }

    /// Maps the current state onto measurement space and samples noise into `out`.
    ///
    /// `out` must already have shape `(k, n)`. Draws are made in row-major order.
    pub(crate) fn emit_into<R: Rng>(
        &self,
        rng: &mut R,
        mut out: ArrayViewMut2<'_, f64>,
    ) -> Result<(), StepError> {
        let mapped = self.state.t().dot(&self.observation);
        for ((i, j), &mean) in mapped.indexed_iter() {
            let std_dev = self.std_devs[j];
            let normal = Normal::new(mean, std_dev).map_err(|_| StepError::InvalidVariance {
                channel: j,
                variance: self.variances[j],
            })?;
            out[[i, j]] = normal.sample(rng);
        }
        Ok(())
    }
}
