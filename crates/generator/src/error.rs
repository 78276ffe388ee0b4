//! Error types for the statesim-generator crate.

/// Structural error raised while constructing a generator.
///
/// Every variant describes which pair of dimensions disagrees. A generator is
/// never built when one of these is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    /// Returned when the declared measurement size `n` is zero.
    #[error("measurement size must be at least 1")]
    EmptyMeasurement,

    /// Returned when the initial state has no rows or no columns.
    #[error("initial state is empty: shape ({rows}, {cols})")]
    EmptyState {
        /// Number of rows of the initial state.
        rows: usize,
        /// Number of columns of the initial state.
        cols: usize,
    },

    /// Returned when the variance vector length differs from `n`.
    #[error("variance vector has {got} entries, expected one per measurement channel ({expected})")]
    VarianceLength {
        /// Declared measurement size `n`.
        expected: usize,
        /// Length of the variance vector.
        got: usize,
    },

    /// Returned when a linear transition matrix is not square.
    #[error("transition matrix must be square, got shape ({rows}, {cols})")]
    TransitionNotSquare {
        /// Number of rows of the transition matrix.
        rows: usize,
        /// Number of columns of the transition matrix.
        cols: usize,
    },

    /// Returned when a linear transition matrix does not match the state dimension.
    #[error("transition matrix is {transition}x{transition} but the state has {state} rows")]
    TransitionDimension {
        /// Dimension of the (square) transition matrix.
        transition: usize,
        /// Number of rows of the state.
        state: usize,
    },

    /// Returned when the observation matrix is not `(x, n)`.
    #[error("observation matrix has shape {got:?}, expected {expected:?}")]
    ObservationShape {
        /// Required shape `(x, n)`.
        expected: (usize, usize),
        /// Actual shape.
        got: (usize, usize),
    },
}

/// Numeric fault raised by a single generation step.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StepError {
    /// Returned when a transition produces a state of a different shape.
    ///
    /// The state keeps its previous value.
    #[error("transition returned a state of shape {got:?}, expected {expected:?}")]
    TransitionShape {
        /// Shape of the current state `(x, k)`.
        expected: (usize, usize),
        /// Shape returned by the transition.
        got: (usize, usize),
    },

    /// Returned when a variance is negative, NaN or infinite.
    #[error("variance {variance} on channel {channel} is not a valid standard deviation squared")]
    InvalidVariance {
        /// Zero-based measurement channel.
        channel: usize,
        /// The offending variance entry.
        variance: f64,
    },

    /// Returned when an output buffer does not have the measurement shape.
    #[error("output buffer has shape {got:?}, expected {expected:?}")]
    BufferShape {
        /// Measurement shape `(k, n)`.
        expected: (usize, usize),
        /// Shape of the supplied buffer.
        got: (usize, usize),
    },
}
