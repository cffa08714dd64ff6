//! Evaluate the hinge fit for a handful of points, then take a few gradient
//! descent steps with it, the way an external optimizer would.
use conic_fit::{Conic, HingeFit, Layout, LeastSquares, Samples};

fn main() {
    // Two points should end up inside the conic (weight +1) and one outside (weight -1).
    let samples = Samples::from_rows(
        &[[0.5, 0.0], [2.0, 0.0], [0.0, 3.0]],
        vec![1.0, 1.0, -1.0],
    )
    .unwrap();
    let fit = HingeFit::new(&samples).unwrap();

    // Start from the unit circle.
    let mut x = Conic::decode(Layout::new(2).unwrap(), &[1.0, 0.0, 1.0, 0.0, 0.0])
        .unwrap()
        .encode();
    let start = fit.objective(&x).unwrap();
    println!("f = {start}, residuals = {:?}", fit.residuals(&x).unwrap());

    let learning_rate = 0.005;
    for _ in 0..50 {
        let gradient = fit.gradient(&x).unwrap();
        for (xi, gi) in x.iter_mut().zip(&gradient) {
            *xi -= learning_rate * gi;
        }
    }

    let end = fit.objective(&x).unwrap();
    let conic = fit.decode(&x).unwrap();
    println!("f = {end} after 50 steps");
    println!("A = {:?}", conic.a());
    println!("b = {:?}", conic.b());
    assert!(end < start);
}
