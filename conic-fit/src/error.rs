/// Errors from building or evaluating a conic fitting problem.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[cfg_attr(not(feature = "unstable-exhaustive"), non_exhaustive)]
pub enum Error {
    /// Points must have at least one coordinate.
    #[error("Cannot fit a conic in 0 dimensions")]
    EmptyDimension,
    /// A parameter vector (or a probe direction in parameter space) had the wrong length.
    #[error("Expected {expected} parameters but got {actual}")]
    ParameterLength {
        /// Length implied by the dimension, i.e. n + n(n+1)/2.
        expected: usize,
        /// Length that was actually supplied.
        actual: usize,
    },
    /// A point didn't have the same number of coordinates as the conic.
    #[error("Expected points with {expected} coordinates but got {actual}")]
    PointDimension {
        /// Dimension of the conic.
        expected: usize,
        /// Dimension of the point.
        actual: usize,
    },
    /// There must be exactly one weight per point.
    #[error("There should be exactly 1 weight per point, but you supplied {points} points and {weights} weights")]
    WeightCount {
        /// How many points were given.
        points: usize,
        /// How many weights were given.
        weights: usize,
    },
    /// The quadratic term must be a square matrix.
    #[error("Quadratic term must be square, but it is {rows}x{cols}")]
    NotSquare {
        /// Rows of the matrix.
        rows: usize,
        /// Columns of the matrix.
        cols: usize,
    },
    /// The quadratic term must be exactly symmetric.
    #[error("Quadratic term is not symmetric: entry ({row}, {col}) differs from ({col}, {row})")]
    NotSymmetric {
        /// Row of the first offending entry.
        row: usize,
        /// Column of the first offending entry.
        col: usize,
    },
    /// Relative error is undefined when the analytic derivative is exactly zero.
    #[error("Relative error is undefined because the directional derivative is exactly 0")]
    ZeroDirectionalDerivative,
    /// A probe direction of zero length can't be normalized.
    #[error("Probe direction has zero length")]
    ZeroProbe,
}

/// Shorthand for results in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
