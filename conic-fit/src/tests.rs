use faer::Mat;

use super::*;


/// Unit circle `A = I, b = 0`, with points on it at (1, 0) and (0, 1)
/// and one outside it at (2, 0), all with weight 1.
pub(crate) fn unit_circle() -> (Conic, Samples) {
    let conic = Conic::decode(Layout::new(2).unwrap(), &[1.0, 0.0, 1.0, 0.0, 0.0]).unwrap();
    let samples =
        Samples::from_rows(&[[1.0, 0.0], [0.0, 1.0], [2.0, 0.0]], vec![1.0, 1.0, 1.0]).unwrap();
    (conic, samples)
}

#[track_caller]
pub(crate) fn assert_nearly_eq(actual: f64, expected: f64) {
    let scale = actual.abs().max(expected.abs());
    assert!(
        actual == expected || (actual - expected).abs() <= 1e-9 * scale,
        "{actual} is not nearly equal to {expected}"
    );
}

#[test]
fn scenario() {
    let (conic, samples) = unit_circle();
    let x = conic.encode();
    assert_eq!(x, vec![1.0, 0.0, 1.0, 0.0, 0.0]);

    assert_eq!(evaluate::h_values(&conic, &samples).unwrap(), vec![0.0, 0.0, 3.0]);
    assert_eq!(evaluate::residuals(&conic, &samples).unwrap(), vec![0.0, 0.0, 3.0]);
    assert_eq!(objective(&x, &samples).unwrap(), 9.0);
    assert_eq!(
        objective_gradient(&x, &samples).unwrap(),
        vec![24.0, 0.0, 0.0, 12.0, 0.0]
    );
}

#[test]
fn ellipse_from_parts() {
    // x²/4 + y² = 1
    let a = Mat::from_fn(2, 2, |i, j| match (i, j) {
        (0, 0) => 0.25,
        (1, 1) => 1.0,
        _ => 0.0,
    });
    let conic = Conic::from_parts(a, vec![0.0, 0.0]).unwrap();
    let samples = Samples::from_rows(
        &[[2.0, 0.0], [0.0, 1.0], [0.0, 0.0], [4.0, 0.0]],
        // The origin should be outside (it isn't), and (4, 0) inside (it isn't).
        vec![1.0, 1.0, -1.0, 1.0],
    )
    .unwrap();
    let h = evaluate::h_values(&conic, &samples).unwrap();
    assert_eq!(h, vec![0.0, 0.0, -1.0, 3.0]);
    let r = evaluate::residuals(&conic, &samples).unwrap();
    assert_eq!(r, vec![0.0, 0.0, 1.0, 3.0]);
    assert_eq!(objective(&conic.encode(), &samples).unwrap(), 10.0);
}

#[test]
fn gradient_matches_jacobian_transpose() {
    // 3D, with every kind of point: active, inactive, and both weight signs.
    let samples = Samples::from_rows(
        &[
            [0.5, -1.0, 2.0],
            [0.1, 0.1, 0.1],
            [-1.5, 0.3, 0.7],
            [2.0, 2.0, -2.0],
        ],
        vec![1.0, -1.0, -2.0, 0.5],
    )
    .unwrap();
    let fit = HingeFit::new(&samples).unwrap();
    let x = [0.3, 0.1, -0.2, 0.4, 0.05, 0.6, -0.1, 0.2, 0.3];
    let r = fit.residuals(&x).unwrap();
    let jac = fit.jacobian(&x).unwrap();
    let gradient = fit.gradient(&x).unwrap();
    assert_eq!(gradient.len(), 9);
    for (j, g) in gradient.iter().enumerate() {
        let expected: f64 = (0..samples.len()).map(|i| 2.0 * jac[(i, j)] * r[i]).sum();
        assert!((g - expected).abs() < 1e-12 * (1.0 + expected.abs()), "{g} vs {expected}");
    }
}

#[test]
fn harness_on_the_scenario() {
    let (conic, samples) = unit_circle();
    let fit = HingeFit::new(&samples).unwrap();
    let probe = check::normalize(vec![1.0, 0.0, 0.0, 1.0, 0.0]).unwrap();
    let check = check_gradient(&fit, &conic.encode(), &probe, CheckConfig::default()).unwrap();
    let GradientCheck::Checked { directional, .. } = check else {
        panic!("expected a checked gradient, got {check:?}");
    };
    // (24 + 12) / √2
    assert_nearly_eq(directional, 36.0 / 2f64.sqrt());
    assert!(check.best_step().unwrap().rel_error < 1e-4);
}
