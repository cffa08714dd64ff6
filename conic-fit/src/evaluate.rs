//! Evaluating the conic and its hinge residuals, for one point or for all of them.
use crate::{Conic, Samples, error::Result};

/// `h(z) = zᵀAz + bᵀz − 1` for a single point.
pub fn h(conic: &Conic, z: &[f64]) -> Result<f64> {
    conic.layout().check_point(z)?;
    Ok(conic.eval(z))
}

/// `r = max(0, w·h(z))` for a single point.
pub fn residual(conic: &Conic, z: &[f64], w: f64) -> Result<f64> {
    Ok(hinge(w, h(conic, z)?))
}

/// `h` for every point at once.
/// Uses one matrix product `ZA` instead of a quadratic form per row:
/// `h_i = Σ_j (ZA)_ij·Z_ij + Σ_j b_j·Z_ij − 1`.
pub fn h_values(conic: &Conic, samples: &Samples) -> Result<Vec<f64>> {
    samples.check_layout(conic.layout())?;
    let z = samples.points();
    let za = z * conic.a();
    let h = (0..samples.len())
        .map(|i| {
            let mut hi = -1.0;
            for (j, bj) in conic.b().iter().enumerate() {
                let zij = z[(i, j)];
                hi += za[(i, j)] * zij + bj * zij;
            }
            hi
        })
        .collect();
    Ok(h)
}

/// The residual vector `R = max(0, H ⊙ W)`.
pub fn residuals(conic: &Conic, samples: &Samples) -> Result<Vec<f64>> {
    let mut r = h_values(conic, samples)?;
    for (ri, &wi) in r.iter_mut().zip(samples.weights()) {
        *ri = hinge(wi, *ri);
    }
    Ok(r)
}

/// One-sided penalty: zero when `w·h` is non-positive, `w·h` otherwise.
#[inline(always)]
pub(crate) fn hinge(w: f64, h: f64) -> f64 {
    libm::fmax(w * h, 0.0)
}
