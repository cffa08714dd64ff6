//! Checks an analytic gradient against forward differences of the objective.
//!
//! Given parameters `x` and a probe direction `p`, the analytic directional derivative
//! is `g = ∇f(x)·p`. For each step size `ε` we compare it to `(f(x + εp) − f(x)) / ε`.
//! With a correct gradient the relative error should shrink with `ε` until rounding
//! error takes over, so the error curve over the whole sweep is roughly U-shaped.
use std::fmt;

use rand::Rng;
use rand_distr::StandardNormal;

use crate::{Error, HingeFit, LeastSquares, Samples, error::Result};

/// Which step sizes to try.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckConfig {
    /// The largest step is `10^max_exponent`.
    pub max_exponent: i32,
    /// The smallest step is `10^min_exponent`.
    pub min_exponent: i32,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            max_exponent: 2,
            min_exponent: -8,
        }
    }
}

impl CheckConfig {
    /// Powers of ten from largest to smallest.
    pub fn steps(self) -> impl Iterator<Item = f64> + use<> {
        (self.min_exponent..=self.max_exponent)
            .rev()
            .map(|exponent| 10f64.powi(exponent))
    }
}

/// How well one forward difference matched the analytic derivative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    /// `ε`.
    pub step: f64,
    /// `|approx − g| / |g|`.
    pub rel_error: f64,
    /// The forward difference itself.
    pub approx: f64,
}

impl fmt::Display for StepReport {
    /// Human-readable, for printing.
    #[mutants::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ep = {}, error = {}, g_app = {}",
            Scientific(self.step),
            Scientific(self.rel_error),
            Scientific(self.approx)
        )
    }
}

/// Displays a number like C's `%e`, e.g. `1.000000e-02`.
#[derive(Clone, Copy, Debug)]
pub struct Scientific(pub f64);

impl fmt::Display for Scientific {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = format!("{:.6e}", self.0);
        // Rust writes `1.000000e-2`, so pad the exponent and always sign it.
        let Some((mantissa, exponent)) = s.split_once('e') else {
            // NaN and infinities have no exponent.
            return f.write_str(&s);
        };
        let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(f, "{mantissa}e{sign}{:02}", exponent.abs())
    }
}

/// Outcome of a gradient check.
#[derive(Clone, Debug, PartialEq)]
pub enum GradientCheck {
    /// The analytic directional derivative was exactly zero, so relative errors
    /// are meaningless. Usually every point was on its preferred side.
    Degenerate {
        /// Direction that was probed.
        probe: Vec<f64>,
        /// Full analytic gradient at `x`.
        gradient: Vec<f64>,
    },
    /// Forward differences were compared at every step size.
    Checked {
        /// `f(x)`.
        value: f64,
        /// `g = ∇f(x)·p`.
        directional: f64,
        /// One entry per step size, largest step first.
        steps: Vec<StepReport>,
    },
}

impl GradientCheck {
    /// The step whose forward difference came closest to the analytic derivative.
    pub fn best_step(&self) -> Option<&StepReport> {
        match self {
            GradientCheck::Degenerate { .. } => None,
            GradientCheck::Checked { steps, .. } => steps
                .iter()
                .min_by(|a, b| a.rel_error.total_cmp(&b.rel_error)),
        }
    }

    /// Was the directional derivative zero?
    pub fn is_degenerate(&self) -> bool {
        matches!(self, GradientCheck::Degenerate { .. })
    }
}

/// `|approx − exact| / |exact|`. Refuses an exact value of zero.
pub fn relative_error(approx: f64, exact: f64) -> Result<f64> {
    if exact == 0.0 {
        return Err(Error::ZeroDirectionalDerivative);
    }
    Ok(((approx - exact) / exact).abs())
}

/// `(f(x + step·p) − f(x)) / step`, where `fx` is the already-known `f(x)`.
pub fn forward_difference<S>(
    system: &S,
    x: &[f64],
    probe: &[f64],
    step: f64,
    fx: f64,
) -> Result<f64>
where
    S: LeastSquares + ?Sized,
{
    let shifted: Vec<f64> = x.iter().zip(probe).map(|(xi, pi)| xi + step * pi).collect();
    Ok((system.objective(&shifted)? - fx) / step)
}

/// Scale `v` to unit Euclidean length.
pub fn normalize(mut v: Vec<f64>) -> Result<Vec<f64>> {
    let norm = v.iter().map(|vi| vi * vi).sum::<f64>().sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return Err(Error::ZeroProbe);
    }
    v.iter_mut().for_each(|vi| *vi /= norm);
    Ok(v)
}

/// A uniformly random direction with `len` coordinates.
pub fn random_unit<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Result<Vec<f64>> {
    normalize(standard_normal(len, rng))
}

fn standard_normal<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<f64> {
    (0..len).map(|_| rng.sample(StandardNormal)).collect()
}

/// Compare `∇f(x)·probe` to forward differences of `f` along `probe`.
pub fn check_gradient<S>(
    system: &S,
    x: &[f64],
    probe: &[f64],
    config: CheckConfig,
) -> Result<GradientCheck>
where
    S: LeastSquares + ?Sized,
{
    let num_params = system.num_params();
    if probe.len() != num_params {
        return Err(Error::ParameterLength {
            expected: num_params,
            actual: probe.len(),
        });
    }
    let value = system.objective(x)?;
    let gradient = system.gradient(x)?;
    let directional: f64 = gradient.iter().zip(probe).map(|(gi, pi)| gi * pi).sum();
    if directional == 0.0 {
        return Ok(GradientCheck::Degenerate {
            probe: probe.to_vec(),
            gradient,
        });
    }

    let steps = config
        .steps()
        .map(|step| {
            let approx = forward_difference(system, x, probe, step, value)?;
            let rel_error = relative_error(approx, directional)?;
            Ok(StepReport {
                step,
                rel_error,
                approx,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(GradientCheck::Checked {
        value,
        directional,
        steps,
    })
}

/// Fit `num_points` random points in `dim` dimensions, then check the hinge fit's
/// gradient at random parameters along a random unit direction.
pub fn finite_difference_test<R: Rng + ?Sized>(
    num_points: usize,
    dim: usize,
    rng: &mut R,
) -> Result<GradientCheck> {
    let samples = Samples::random(num_points, dim, rng);
    let fit = HingeFit::new(&samples)?;
    let x = standard_normal(fit.num_params(), rng);
    let probe = random_unit(fit.num_params(), rng)?;
    check_gradient(&fit, &x, &probe, CheckConfig::default())
}
