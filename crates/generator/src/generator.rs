//! Seeded measurement generator.

use ndarray::{Array1, Array2, Array3, ArrayViewMut2, Axis};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::error::{ShapeError, StepError};
use crate::state_space::StateSpace;
use crate::transition::{Linear, NonLinear, Transition};

/// Generator driven by a fixed transition matrix.
pub type LinearGenerator = Generator<Linear>;

/// Generator driven by an arbitrary state transition function.
pub type NonLinearGenerator<F> = Generator<NonLinear<F>>;

/// A discrete-time stochastic state-space process.
///
/// Each call to [`Generator::generate()`] advances the state with the
/// transition rule `T`, projects it onto measurement space through the
/// observation matrix and adds Gaussian noise with the per-channel variances.
///
/// The generator owns its random stream. Two generators built from the same
/// seed and parameters produce bit-identical measurement sequences,
/// independently of any other generator in the process.
///
/// # Example
///
/// ```
/// use ndarray::{Array2, array};
/// use statesim_generator::Generator;
///
/// let mut g = Generator::linear(
///     42,
///     2,
///     Array2::eye(2),
///     array![0.0, 0.0],
///     Array2::eye(2),
///     array![[1.0], [2.0]],
/// )?;
/// assert_eq!(g.generate()?, array![[1.0, 2.0]]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct Generator<T> {
    core: StateSpace,
    transition: T,
    rng: StdRng,
    seed: u64,
}

impl<T: Transition> Generator<T> {
    /// Builds a generator from any transition rule.
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed of this generator's random stream.
    /// * `n` - Measurement size.
    /// * `transition` - Rule advancing the state each step.
    /// * `variances` - Per-channel noise variance `P`, length `n`.
    /// * `observation` - Observation matrix `H`, shape `(x, n)`.
    /// * `state` - Initial state `S`, shape `(x, k)`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ShapeError::EmptyMeasurement`] | `n == 0` |
    /// | [`ShapeError::EmptyState`] | `S` has no rows or no columns |
    /// | [`ShapeError::VarianceLength`] | `len(P) != n` |
    /// | [`ShapeError::TransitionNotSquare`] | linear `A` is not square |
    /// | [`ShapeError::TransitionDimension`] | linear `A` does not match `x` |
    /// | [`ShapeError::ObservationShape`] | `H` is not `(x, n)` |
    pub fn new(
        seed: u64,
        n: usize,
        transition: T,
        variances: Array1<f64>,
        observation: Array2<f64>,
        state: Array2<f64>,
    ) -> Result<Self, ShapeError> {
        let core = StateSpace::new(n, variances, observation, state, &transition)?;
        debug!(
            n = core.n(),
            x = core.x(),
            k = core.k(),
            transition = transition.kind(),
            seed,
            "generator ready"
        );
        Ok(Self {
            core,
            transition,
            rng: StdRng::seed_from_u64(seed),
            seed,
        })
    }

    /// Advances the state and returns one noisy measurement of shape `(k, n)`.
    ///
    /// For a column state (`k = 1`) the result is a single row holding the
    /// length-`n` measurement.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`StepError::TransitionShape`] | the transition changed the state shape; state unchanged |
    /// | [`StepError::InvalidVariance`] | a variance is negative, NaN or infinite; state advanced |
    pub fn generate(&mut self) -> Result<Array2<f64>, StepError> {
        let mut out = Array2::zeros(self.core.measurement_dim());
        self.generate_into(out.view_mut())?;
        Ok(out)
    }

    /// Advances the state and writes one measurement into `out`.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::BufferShape`] if `out` is not `(k, n)`; nothing
    /// is advanced in that case. Otherwise fails as [`Generator::generate()`].
    pub fn generate_into(&mut self, out: ArrayViewMut2<'_, f64>) -> Result<(), StepError> {
        let expected = self.core.measurement_dim();
        if out.dim() != expected {
            return Err(StepError::BufferShape {
                expected,
                got: out.dim(),
            });
        }
        let result = self.step(out);
        if let Err(e) = &result {
            warn!(error = %e, transition = self.transition.kind(), "generation step failed");
        }
        result
    }

    /// Runs `steps` successive generations.
    ///
    /// Returns an [`Array3<f64>`] of shape `(steps, k, n)`; slice `t` along
    /// the first axis is the measurement of step `t`. Stops at the first
    /// failing step.
    #[tracing::instrument(skip(self), fields(n = self.core.n(), x = self.core.x()))]
    pub fn simulate(&mut self, steps: usize) -> Result<Array3<f64>, StepError> {
        let (k, n) = self.core.measurement_dim();
        let mut out = Array3::zeros((steps, k, n));
        for slot in out.axis_iter_mut(Axis(0)) {
            self.generate_into(slot)?;
        }
        debug!(steps, "simulation complete");
        Ok(out)
    }

    fn step(&mut self, out: ArrayViewMut2<'_, f64>) -> Result<(), StepError> {
        let next = self.transition.advance(self.core.state());
        self.core.commit(next)?;
        self.core.emit_into(&mut self.rng, out)
    }

    /// Returns the current state `S`, shape `(x, k)`.
    pub fn state_estimate(&self) -> &Array2<f64> {
        self.core.state()
    }

    /// Returns the observation matrix `H`.
    pub fn observation(&self) -> &Array2<f64> {
        self.core.observation()
    }

    /// Returns the variance vector `P`.
    pub fn variances(&self) -> &Array1<f64> {
        self.core.variances()
    }

    /// Returns the transition rule.
    pub fn transition(&self) -> &T {
        &self.transition
    }

    /// Measurement size `n`.
    pub fn measurement_size(&self) -> usize {
        self.core.n()
    }

    /// State size `x`.
    pub fn state_size(&self) -> usize {
        self.core.x()
    }

    /// Number of state columns `k`.
    pub fn state_columns(&self) -> usize {
        self.core.k()
    }

    /// Returns the seed the random stream was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl<T: Transition> std::fmt::Debug for Generator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("core", &self.core)
            .field("transition", &self.transition.kind())
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl Generator<Linear> {
    /// Builds a generator with the linear transition `S' = A · S`.
    ///
    /// `A` must be square with the same dimension as the state rows. See
    /// [`Generator::new()`] for the remaining arguments and errors.
    pub fn linear(
        seed: u64,
        n: usize,
        a: Array2<f64>,
        variances: Array1<f64>,
        observation: Array2<f64>,
        state: Array2<f64>,
    ) -> Result<Self, ShapeError> {
        Self::new(seed, n, Linear::new(a), variances, observation, state)
    }
}

impl<F> Generator<NonLinear<F>>
where
    F: Fn(&Array2<f64>) -> Array2<f64>,
{
    /// Builds a generator with the transition `S' = f(S)`.
    ///
    /// `f` is not inspected at construction; a state of the wrong shape is
    /// reported by the step that produced it. See [`Generator::new()`] for
    /// the remaining arguments and errors.
    pub fn nonlinear(
        seed: u64,
        n: usize,
        f: F,
        variances: Array1<f64>,
        observation: Array2<f64>,
        state: Array2<f64>,
    ) -> Result<Self, ShapeError> {
        Self::new(seed, n, NonLinear::new(f), variances, observation, state)
    }
}
