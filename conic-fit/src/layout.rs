//! How a conic's coefficients are packed into a flat parameter vector.
//!
//! For a conic in `n` dimensions there are `k = n(n+1)/2` independent entries
//! in the symmetric quadratic term `A`, and `n` entries in the linear term `b`.
//! The parameter vector is
//!
//! ```text
//! [A00, A01, .., A0(n-1), A11, A12, .., A(n-1)(n-1), b0, .., b(n-1)]
//! ```
//!
//! i.e. the upper triangle of `A` row by row, followed by `b`.
//! Every encoder, decoder and gradient in this crate walks the triangle through
//! [`Layout::upper_triangle`], so they can't disagree about the order.

use crate::{Error, error::Result};

/// Dimension of the conic, and everything derived from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    dim: usize,
}

impl Layout {
    /// Layout for a conic over points with `dim` coordinates.
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(Error::EmptyDimension);
        }
        Ok(Self { dim })
    }

    /// Number of coordinates per point (`n`).
    #[inline(always)]
    pub fn dim(self) -> usize {
        self.dim
    }

    /// Number of packed entries of the quadratic term (`k = n(n+1)/2`).
    #[inline(always)]
    pub fn num_quadratic(self) -> usize {
        self.dim * (self.dim + 1) / 2
    }

    /// Length of a full parameter vector (`n + k`).
    #[inline(always)]
    pub fn num_params(self) -> usize {
        self.num_quadratic() + self.dim
    }

    /// Offset of the first linear-term entry in the parameter vector.
    #[inline(always)]
    pub fn linear_offset(self) -> usize {
        self.num_quadratic()
    }

    /// Where does `A[i][j]` (with `i <= j`) live in the parameter vector?
    pub fn packed_index(self, i: usize, j: usize) -> usize {
        debug_assert!(i <= j && j < self.dim, "({i}, {j}) is not in the upper triangle");
        // Rows before `i` hold n, n-1, .., n-i+1 entries.
        i * self.dim - i * (i.saturating_sub(1)) / 2 + (j - i)
    }

    /// Every `(i, j)` with `i <= j`, in packing order.
    pub fn upper_triangle(self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let n = self.dim;
        (0..n).flat_map(move |i| (i..n).map(move |j| (i, j)))
    }

    /// Checks a parameter vector (or a direction in parameter space) has the right length.
    pub fn check_params(self, x: &[f64]) -> Result<()> {
        if x.len() != self.num_params() {
            return Err(Error::ParameterLength {
                expected: self.num_params(),
                actual: x.len(),
            });
        }
        Ok(())
    }

    /// Checks a point has one coordinate per dimension.
    pub fn check_point(self, z: &[f64]) -> Result<()> {
        if z.len() != self.dim {
            return Err(Error::PointDimension {
                expected: self.dim,
                actual: z.len(),
            });
        }
        Ok(())
    }
}
