mod common;

use common::{ballistic_2d, drifting_walk_2d, random_walk_2d};
use motility::{compute_msd, compute_msd_sample, MotilityError};
use nalgebra::Vector3;

#[test]
fn sample_count_formulas_hold_for_every_lag() {
    let t = random_walk_2d(137, 1.0, 7);
    let n = t.len();
    for lag in 1..n {
        let (_, overlapping) = compute_msd(&t, lag, true, None).unwrap();
        let (_, disjoint) = compute_msd(&t, lag, false, None).unwrap();
        assert_eq!(overlapping, n - lag);
        assert_eq!(disjoint, (n - 1) / lag);
    }
}

#[test]
fn msd_is_non_negative_and_grows_for_a_random_walk() {
    let t = random_walk_2d(5_000, 0.5, 11);
    let mut previous = 0.0;
    for lag in [1, 5, 10, 20, 50] {
        let (msd, _) = compute_msd(&t, lag, true, None).unwrap();
        assert!(msd >= 0.0);
        assert!(msd > previous, "MSD should grow with the lag");
        previous = msd;
    }

    // Expected MSD(L) = 2 sigma^2 L for the 2D walk; allow wide statistical slack.
    let (msd_10, _) = compute_msd(&t, 10, true, None).unwrap();
    let expected = 2.0 * 0.25 * 10.0;
    assert!((msd_10 - expected).abs() / expected < 0.2);
}

#[test]
fn drift_correction_recovers_the_undrifted_statistics() {
    let sigma = 0.4;
    let drifting = drifting_walk_2d(8_000, sigma, 0.3, 23);
    let drift = Vector3::new(0.3, 0.0, 0.0);

    let (raw, _) = compute_msd(&drifting, 20, true, None).unwrap();
    let (corrected, _) = compute_msd(&drifting, 20, true, Some(&drift)).unwrap();

    // The ballistic term (0.3 * 20)^2 = 36 dominates the raw value.
    assert!(raw > 30.0);
    let expected = 2.0 * sigma * sigma * 20.0;
    assert!((corrected - expected).abs() / expected < 0.25);
}

#[test]
fn ballistic_trajectory_yields_quadratic_msd() {
    let t = ballistic_2d(100, 0.1);
    for lag in [1, 2, 5, 10] {
        let (msd, _) = compute_msd(&t, lag, false, None).unwrap();
        assert!((msd - (0.1 * lag as f64).powi(2)).abs() < 1e-12);
    }
}

#[test]
fn raw_displacement_list_matches_the_mean() {
    let t = random_walk_2d(200, 1.0, 3);
    let sample = compute_msd_sample(&t, 4, true, None).unwrap();
    assert_eq!(sample.squared_displacements.len(), sample.n_samples);
    let mean: f64 =
        sample.squared_displacements.iter().sum::<f64>() / sample.n_samples as f64;
    assert!((mean - sample.value).abs() < 1e-12);
}

#[test]
fn too_large_lag_is_insufficient_data() {
    let t = random_walk_2d(10, 1.0, 1);
    assert_eq!(
        compute_msd(&t, 10, true, None).unwrap_err(),
        MotilityError::InsufficientData { lag: 10, len: 10 }
    );
}
