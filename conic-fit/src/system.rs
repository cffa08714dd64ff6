use faer::{ColRef, Mat};

use crate::{Conic, Layout, Samples, error::Result, evaluate, gradient};

/// A sum-of-squares objective `f(x) = Σ r_i(x)²`, described by its residuals and their Jacobian.
/// This is everything an external Gauss-Newton, Levenberg-Marquardt or quasi-Newton solver needs.
pub trait LeastSquares {
    /// Length of the parameter vector, i.e. number of Jacobian columns.
    fn num_params(&self) -> usize;

    /// Number of residuals, i.e. number of Jacobian rows.
    fn num_residuals(&self) -> usize;

    /// Compute the residual vector at `x`, writing one entry per row into `out`.
    fn residual(&self, x: &[f64], out: &mut [f64]) -> Result<()>;

    /// Compute the Jacobian of the residual vector at `x`.
    fn jacobian(&self, x: &[f64]) -> Result<Mat<f64>>;

    /// Allocate and compute the residual vector at `x`.
    fn residuals(&self, x: &[f64]) -> Result<Vec<f64>> {
        let mut out = vec![0.0; self.num_residuals()];
        self.residual(x, &mut out)?;
        Ok(out)
    }

    /// `f(x) = Σ r_i(x)²`.
    fn objective(&self, x: &[f64]) -> Result<f64> {
        Ok(self.residuals(x)?.iter().map(|r| r * r).sum())
    }

    /// `∇f(x) = 2·Jᵀr`.
    fn gradient(&self, x: &[f64]) -> Result<Vec<f64>> {
        let r = self.residuals(x)?;
        let j = self.jacobian(x)?;
        let jtr = j.as_ref().transpose() * ColRef::from_slice(&r);
        Ok((0..jtr.nrows()).map(|i| 2.0 * jtr[i]).collect())
    }
}

/// Fit a conic to weighted points, penalizing each point that's on the wrong side of it.
///
/// Residual `i` is `max(0, W_i·h(x, Z_i))`, so the objective is zero exactly when every
/// point is on its preferred side (or on the conic itself).
#[derive(Clone, Copy, Debug)]
pub struct HingeFit<'s> {
    layout: Layout,
    samples: &'s Samples,
}

impl<'s> HingeFit<'s> {
    /// The conic's dimension comes from the points.
    pub fn new(samples: &'s Samples) -> Result<Self> {
        let layout = Layout::new(samples.dim())?;
        Ok(Self { layout, samples })
    }

    /// How parameter vectors for this problem are laid out.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The points being fitted.
    pub fn samples(&self) -> &'s Samples {
        self.samples
    }

    /// Unpack a parameter vector for this problem.
    pub fn decode(&self, x: &[f64]) -> Result<Conic> {
        Conic::decode(self.layout, x)
    }

    /// `h(x, Z_i)` for every point.
    pub fn h_values(&self, x: &[f64]) -> Result<Vec<f64>> {
        evaluate::h_values(&self.decode(x)?, self.samples)
    }
}

impl LeastSquares for HingeFit<'_> {
    fn num_params(&self) -> usize {
        self.layout.num_params()
    }

    fn num_residuals(&self) -> usize {
        self.samples.len()
    }

    fn residual(&self, x: &[f64], out: &mut [f64]) -> Result<()> {
        let conic = self.decode(x)?;
        let r = evaluate::residuals(&conic, self.samples)?;
        debug_assert_eq!(
            out.len(),
            r.len(),
            "residual output has {} rows but there are {} points",
            out.len(),
            r.len()
        );
        out.copy_from_slice(&r);
        Ok(())
    }

    fn jacobian(&self, x: &[f64]) -> Result<Mat<f64>> {
        let conic = self.decode(x)?;
        let r = evaluate::residuals(&conic, self.samples)?;
        let (m, num_params) = (self.num_residuals(), self.num_params());
        let mut jac = Mat::zeros(m, num_params);

        // Scratch space, so the loop below doesn't allocate per row.
        let mut z = vec![0.0; self.layout.dim()];
        let mut row = vec![0.0; num_params];
        for (i, (&ri, &wi)) in r.iter().zip(self.samples.weights()).enumerate() {
            if ri <= 0.0 {
                // Inactive rows stay zero.
                continue;
            }
            self.samples.point_into(i, &mut z);
            gradient::write_dr(self.layout, &z, wi, ri, &mut row);
            for (col, &pd) in row.iter().enumerate() {
                jac[(i, col)] = pd;
            }
        }
        Ok(jac)
    }
}

/// `f(x) = Σ max(0, W_i·h(x, Z_i))²`.
pub fn objective(x: &[f64], samples: &Samples) -> Result<f64> {
    HingeFit::new(samples)?.objective(x)
}

/// `∇f(x)`, the analytic gradient of [`objective`].
pub fn objective_gradient(x: &[f64], samples: &Samples) -> Result<Vec<f64>> {
    HingeFit::new(samples)?.gradient(x)
}
