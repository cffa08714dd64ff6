//! Partial derivatives of `h` and of the hinge residual with respect to the parameter vector.
use crate::{Conic, Layout, error::Result, evaluate};

/// Gradient of `h(z)` with respect to the packed parameters.
///
/// `h` is linear in the parameters, so this only depends on `z`:
/// * the diagonal entry `A[j][j]` contributes `z_j²`,
/// * the off-diagonal entry `A[j][l]` (`j < l`) is stored once but appears twice in `zᵀAz`,
///   so it contributes `2·z_j·z_l`,
/// * `b` contributes `z`.
pub fn dh(layout: Layout, z: &[f64]) -> Result<Vec<f64>> {
    layout.check_point(z)?;
    let mut out = vec![0.0; layout.num_params()];
    write_dh(layout, z, &mut out);
    Ok(out)
}

/// Gradient of the residual `max(0, w·h(z))` with respect to the packed parameters.
///
/// If the residual is strictly positive, this is `w·∇h(z)`. Otherwise the point
/// is inactive and the gradient is zero (including at the kink, where `w·h(z) = 0`).
///
/// If you already know the residual for this point, pass it in and `h` won't be
/// evaluated again. Otherwise pass `None`.
pub fn dr(conic: &Conic, z: &[f64], w: f64, residual: Option<f64>) -> Result<Vec<f64>> {
    let layout = conic.layout();
    layout.check_point(z)?;
    let mut out = vec![0.0; layout.num_params()];
    let residual = residual.unwrap_or_else(|| evaluate::hinge(w, conic.eval(z)));
    write_dr(layout, z, w, residual, &mut out);
    Ok(out)
}

/// Writes `∇h(z)` into `out`, which must have `n + k` entries.
pub(crate) fn write_dh(layout: Layout, z: &[f64], out: &mut [f64]) {
    debug_assert_eq!(out.len(), layout.num_params());
    for (pd, (j, l)) in out.iter_mut().zip(layout.upper_triangle()) {
        *pd = if j == l { z[j] * z[j] } else { 2.0 * z[j] * z[l] };
    }
    out[layout.linear_offset()..].copy_from_slice(z);
}

/// Writes the residual gradient into `out`, overwriting whatever was there.
pub(crate) fn write_dr(layout: Layout, z: &[f64], w: f64, residual: f64, out: &mut [f64]) {
    if residual > 0.0 {
        write_dh(layout, z, out);
        out.iter_mut().for_each(|pd| *pd *= w);
    } else {
        out.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, tests::unit_circle};

    #[test]
    fn dh_2d() {
        let layout = Layout::new(2).unwrap();
        // [z0², 2·z0·z1, z1², z0, z1]
        assert_eq!(
            dh(layout, &[2.0, 3.0]).unwrap(),
            vec![4.0, 12.0, 9.0, 2.0, 3.0]
        );
    }

    #[test]
    fn dh_3d_matches_packing_order() {
        let layout = Layout::new(3).unwrap();
        let z = [1.0, 2.0, 3.0];
        // A00, A01, A02, A11, A12, A22, b0, b1, b2
        let expected = vec![1.0, 4.0, 6.0, 4.0, 12.0, 9.0, 1.0, 2.0, 3.0];
        assert_eq!(dh(layout, &z).unwrap(), expected);
    }

    #[test]
    fn dh_is_exact_for_linear_h() {
        // h is linear in x, so h(x) + 1 = ∇h·x for any x.
        let layout = Layout::new(3).unwrap();
        let x = [0.5, -1.0, 2.0, 0.25, 3.0, -0.5, 1.0, 0.0, -2.0];
        let z = [1.5, -0.5, 2.0];
        let conic = Conic::decode(layout, &x).unwrap();
        let grad = dh(layout, &z).unwrap();
        let dot: f64 = grad.iter().zip(x).map(|(g, xi)| g * xi).sum();
        let h = evaluate::h(&conic, &z).unwrap();
        assert!((dot - (h + 1.0)).abs() < 1e-12, "{dot} vs {}", h + 1.0);
    }

    #[test]
    fn dr_active_and_inactive() {
        let (conic, _) = unit_circle();
        // Outside, positive weight: active.
        assert_eq!(
            dr(&conic, &[2.0, 0.0], 0.5, None).unwrap(),
            vec![2.0, 0.0, 0.0, 1.0, 0.0]
        );
        // Outside, negative weight: strictly satisfied, zero gradient.
        assert_eq!(dr(&conic, &[2.0, 0.0], -1.0, None).unwrap(), vec![0.0; 5]);
        // On the curve: the kink, zero gradient.
        assert_eq!(dr(&conic, &[0.0, 1.0], 1.0, None).unwrap(), vec![0.0; 5]);
    }

    #[test]
    fn dr_reuses_given_residual() {
        let (conic, _) = unit_circle();
        let z = [2.0, 0.0];
        let computed = dr(&conic, &z, 1.0, None).unwrap();
        let reused = dr(&conic, &z, 1.0, Some(3.0)).unwrap();
        assert_eq!(computed, reused);
        // The given residual decides which branch is taken.
        assert_eq!(dr(&conic, &z, 1.0, Some(0.0)).unwrap(), vec![0.0; 5]);
    }

    #[test]
    fn dr_checks_dimension() {
        let (conic, _) = unit_circle();
        assert_eq!(
            dr(&conic, &[1.0], 1.0, Some(1.0)).unwrap_err(),
            Error::PointDimension {
                expected: 2,
                actual: 1
            }
        );
    }
}
