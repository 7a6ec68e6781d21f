mod common;

use approx::assert_relative_eq;
use common::drifting_walk_2d;
use motility::{compute_msd, ActiveTransportFit};

#[test]
fn synthetic_series_recovers_velocity_and_coefficient() {
    let dt: Vec<f64> = (1..=20).map(|i| 0.1 * i as f64).collect();
    let msd: Vec<f64> = dt
        .iter()
        .map(|&x| (2.0 * x).powi(2) + 4.0 * 0.1 * x)
        .collect();
    let fit = ActiveTransportFit::fit(&dt, &msd).unwrap();
    assert_relative_eq!(fit.velocity, 2.0, epsilon = 1e-3);
    assert_relative_eq!(fit.diffusion_coefficient, 0.1, epsilon = 1e-3);
    assert!(fit.goodness > 0.999);
}

#[test]
fn engine_series_feeds_the_fit() {
    // Directed transport at 2 units/frame plus diffusion, analyzed at 1 fps.
    let sigma = 0.3;
    let t = drifting_walk_2d(4_000, sigma, 2.0, 99);

    let mut dt = Vec::new();
    let mut msd = Vec::new();
    for lag in 1..=15 {
        let (value, _) = compute_msd(&t, lag, true, None).unwrap();
        dt.push(lag as f64);
        msd.push(value);
    }

    let fit = ActiveTransportFit::fit(&dt, &msd).unwrap();
    assert!((fit.velocity - 2.0).abs() < 0.05, "velocity = {}", fit.velocity);
    // The diffusive term is tiny next to the ballistic one here, so its
    // estimate is noisy; only its order of magnitude is checked.
    assert!(
        fit.diffusion_coefficient.is_finite() && fit.diffusion_coefficient < 2.0,
        "D = {}",
        fit.diffusion_coefficient
    );
}
