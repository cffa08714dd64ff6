//! Fits conics (ellipses, hyperbolas and their higher-dimensional cousins) to weighted points.
//!
//! A conic is `h(z) = zᵀAz + bᵀz − 1` with symmetric `A`. Each point `Z_i` has a signed weight
//! `W_i` choosing which side of the conic it belongs on, and contributes the hinge residual
//! `max(0, W_i·h(Z_i))`. This crate evaluates the objective `f = Σ r_i²`, its Jacobian and
//! its gradient, for an external optimizer to minimize. It doesn't minimize anything itself.

pub use crate::check::{
    CheckConfig, GradientCheck, Scientific, StepReport, check_gradient, finite_difference_test,
    relative_error,
};
pub use crate::conic::Conic;
pub use crate::error::{Error, Result};
pub use crate::layout::Layout;
pub use crate::samples::Samples;
pub use crate::system::{HingeFit, LeastSquares, objective, objective_gradient};

/// Comparing analytic gradients to finite differences.
pub mod check;
/// Symmetric quadratic term plus linear term.
mod conic;
/// Everything that can go wrong.
mod error;
/// Values of `h` and of the hinge residuals.
pub mod evaluate;
/// Analytic partial derivatives.
pub mod gradient;
/// Packing order of the parameter vector.
mod layout;
/// Points and their weights.
mod samples;
/// The least-squares system handed to an optimizer.
mod system;
/// Unit tests
#[cfg(test)]
mod tests;
