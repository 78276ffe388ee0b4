//! State transition rules.
//!
//! A [`Transition`] advances a state of shape `(x, k)` to the next state of
//! the same shape. Two rules ship with the crate:
//!
//! ```text
//! Linear      S' = A · S          A is a fixed (x, x) matrix
//! NonLinear   S' = f(S)           f is any state -> state function
//! ```

use ndarray::Array2;

use crate::error::ShapeError;

/// Capability to advance a state by one step.
pub trait Transition {
    /// Returns the state that follows `state`.
    fn advance(&self, state: &Array2<f64>) -> Array2<f64>;

    /// Checks that this rule can act on `state`.
    ///
    /// Called once at construction. The default accepts any state.
    fn validate(&self, _state: &Array2<f64>) -> Result<(), ShapeError> {
        Ok(())
    }

    /// Short name used in log events.
    fn kind(&self) -> &'static str;
}

/// Linear transition `S' = A · S`.
#[derive(Clone, Debug, PartialEq)]
pub struct Linear {
    a: Array2<f64>,
}

impl Linear {
    /// Wraps a transition matrix. Its shape is checked when a generator is built.
    pub fn new(a: Array2<f64>) -> Self {
        Self { a }
    }

    /// Identity transition on a state with `x` rows; the state never changes.
    ///
    /// # Example
    ///
    /// ```
    /// use statesim_generator::Linear;
    ///
    /// let t = Linear::identity(3);
    /// assert_eq!(t.matrix().dim(), (3, 3));
    /// ```
    pub fn identity(x: usize) -> Self {
        Self::new(Array2::eye(x))
    }

    /// Returns the transition matrix `A`.
    pub fn matrix(&self) -> &Array2<f64> {
        &self.a
    }
}

impl Transition for Linear {
    fn advance(&self, state: &Array2<f64>) -> Array2<f64> {
        self.a.dot(state)
    }

    fn validate(&self, state: &Array2<f64>) -> Result<(), ShapeError> {
        let (rows, cols) = self.a.dim();
        if rows != cols {
            return Err(ShapeError::TransitionNotSquare { rows, cols });
        }
        if rows != state.nrows() {
            return Err(ShapeError::TransitionDimension {
                transition: rows,
                state: state.nrows(),
            });
        }
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}

/// Non-linear transition `S' = f(S)`.
///
/// The function is trusted to preserve the state shape. Nothing is checked
/// at construction; a wrongly shaped result is reported by the step that
/// produced it.
#[derive(Clone)]
pub struct NonLinear<F> {
    f: F,
}

impl<F> NonLinear<F>
where
    F: Fn(&Array2<f64>) -> Array2<f64>,
{
    /// Wraps a state transition function.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Transition for NonLinear<F>
where
    F: Fn(&Array2<f64>) -> Array2<f64>,
{
    fn advance(&self, state: &Array2<f64>) -> Array2<f64> {
        (self.f)(state)
    }

    fn kind(&self) -> &'static str {
        "nonlinear"
    }
}

impl<F> std::fmt::Debug for NonLinear<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonLinear").finish_non_exhaustive()
    }
}
