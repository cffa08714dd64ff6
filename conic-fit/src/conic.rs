use faer::{Mat, MatRef};

use crate::{Error, Layout, error::Result};

/// A quadric surface `h(z) = zᵀAz + bᵀz − 1 = 0`, with symmetric `A`.
#[derive(Clone, Debug)]
pub struct Conic {
    layout: Layout,
    /// Symmetric quadratic term, n×n.
    a: Mat<f64>,
    /// Linear term, length n.
    b: Vec<f64>,
}

impl Conic {
    /// Unpack a parameter vector into `A` and `b`.
    /// The first `k` entries are the upper triangle of `A`, read row by row,
    /// and get mirrored into the lower triangle. The last `n` entries are `b`.
    pub fn decode(layout: Layout, x: &[f64]) -> Result<Self> {
        layout.check_params(x)?;
        let n = layout.dim();
        let mut a = Mat::zeros(n, n);
        for ((i, j), &value) in layout.upper_triangle().zip(x) {
            a[(i, j)] = value;
            a[(j, i)] = value;
        }
        let b = x[layout.linear_offset()..].to_vec();
        Ok(Self { layout, a, b })
    }

    /// Build a conic from its quadratic and linear terms.
    /// `a` must be square and exactly symmetric, and `b` must match its size.
    pub fn from_parts(a: Mat<f64>, b: Vec<f64>) -> Result<Self> {
        let (rows, cols) = (a.nrows(), a.ncols());
        if rows != cols {
            return Err(Error::NotSquare { rows, cols });
        }
        let layout = Layout::new(rows)?;
        layout.check_point(&b)?;
        for (i, j) in layout.upper_triangle() {
            if a[(i, j)] != a[(j, i)] {
                return Err(Error::NotSymmetric { row: i, col: j });
            }
        }
        Ok(Self { layout, a, b })
    }

    /// Pack `A` and `b` into a parameter vector. Inverse of [`Conic::decode`].
    pub fn encode(&self) -> Vec<f64> {
        let mut x = Vec::with_capacity(self.layout.num_params());
        x.extend(self.layout.upper_triangle().map(|(i, j)| self.a[(i, j)]));
        x.extend_from_slice(&self.b);
        x
    }

    /// Dimension of the space this conic lives in.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The quadratic term `A`.
    pub fn a(&self) -> MatRef<'_, f64> {
        self.a.as_ref()
    }

    /// The linear term `b`.
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Evaluates `zᵀAz + bᵀz − 1`. Callers must have checked `z` has `n` coordinates.
    pub(crate) fn eval(&self, z: &[f64]) -> f64 {
        let n = self.layout.dim();
        debug_assert_eq!(z.len(), n);
        let mut quadratic = 0.0;
        for i in 0..n {
            let mut az_i = 0.0;
            for (j, zj) in z.iter().enumerate() {
                az_i += self.a[(i, j)] * zj;
            }
            quadratic += z[i] * az_i;
        }
        let linear: f64 = self.b.iter().zip(z).map(|(bi, zi)| bi * zi).sum();
        quadratic + linear - 1.0
    }
}
