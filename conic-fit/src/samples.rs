//! Weighted points that a conic gets fitted to.
use faer::{Mat, MatRef};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::{Error, Layout, error::Result};

/// `m` points in `n` dimensions (one per row), each with a signed weight.
///
/// The sign of a weight picks which side of the conic its point should lie on:
/// a point is penalized when `w·h(z) > 0`, so positive weights want the point
/// inside (`h(z) <= 0`) and negative weights want it outside.
#[derive(Clone, Debug)]
pub struct Samples {
    points: Mat<f64>,
    weights: Vec<f64>,
}

impl Samples {
    /// One weight per row of `points`.
    pub fn new(points: Mat<f64>, weights: Vec<f64>) -> Result<Self> {
        if points.nrows() != weights.len() {
            return Err(Error::WeightCount {
                points: points.nrows(),
                weights: weights.len(),
            });
        }
        Ok(Self { points, weights })
    }

    /// Build from a list of points, which must all have the same number of coordinates.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R], weights: Vec<f64>) -> Result<Self> {
        let dim = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
        if let Some(ragged) = rows.iter().find(|row| row.as_ref().len() != dim) {
            return Err(Error::PointDimension {
                expected: dim,
                actual: ragged.as_ref().len(),
            });
        }
        let points = Mat::from_fn(rows.len(), dim, |i, j| rows[i].as_ref()[j]);
        Self::new(points, weights)
    }

    /// Random test data: standard normal coordinates, and weights that are
    /// +1 or −1 with equal probability.
    pub fn random<R: Rng + ?Sized>(num_points: usize, dim: usize, rng: &mut R) -> Self {
        let coords: Vec<f64> = (0..num_points * dim)
            .map(|_| rng.sample::<f64, _>(StandardNormal))
            .collect();
        let points = Mat::from_fn(num_points, dim, |i, j| coords[i * dim + j]);
        let weights = (0..num_points)
            .map(|_| if rng.gen_bool(0.5) { 1.0 } else { -1.0 })
            .collect();
        Self { points, weights }
    }

    /// Number of points (`m`).
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Are there no points at all?
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Coordinates per point (`n`).
    pub fn dim(&self) -> usize {
        self.points.ncols()
    }

    /// The m×n point matrix.
    pub fn points(&self) -> MatRef<'_, f64> {
        self.points.as_ref()
    }

    /// One weight per point.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Copy out the coordinates of point `i`.
    pub fn point(&self, i: usize) -> Vec<f64> {
        let mut z = vec![0.0; self.dim()];
        self.point_into(i, &mut z);
        z
    }

    /// Like [`Samples::point`] but writes into existing scratch space.
    pub(crate) fn point_into(&self, i: usize, z: &mut [f64]) {
        for (j, zj) in z.iter_mut().enumerate() {
            *zj = self.points[(i, j)];
        }
    }

    /// Every point must have one coordinate per dimension of the conic.
    pub(crate) fn check_layout(&self, layout: Layout) -> Result<()> {
        if self.dim() != layout.dim() {
            return Err(Error::PointDimension {
                expected: layout.dim(),
                actual: self.dim(),
            });
        }
        Ok(())
    }
}
