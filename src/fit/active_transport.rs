//! # Active-transport MSD line fit
//!
//! Separate ballistic (directed) and diffusive contributions by fitting
//!
//! ```text
//! msd(dt) = (v·dt)² + 4·√(b²)·dt
//! ```
//!
//! to a caller-supplied `(dt, msd)` series (dt in seconds, msd in squared
//! distance units). Both parameters enter the model through a square, so the
//! fit is sign-invariant and the results are reported as absolute values.

use itertools::izip;
use serde::{Deserialize, Serialize};

use crate::fit::r_squared;
use crate::fit::simplex::{minimize, SimplexOptions};
use crate::motility_errors::MotilityError;

/// Result of the ballistic + diffusive MSD line fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveTransportFit {
    /// Directed-transport velocity |v|.
    pub velocity: f64,
    /// Diffusion coefficient |b|.
    pub diffusion_coefficient: f64,
    /// Coefficient of determination (R²).
    pub goodness: f64,
}

impl ActiveTransportFit {
    /// Fit the active-transport model to the supplied series.
    ///
    /// Arguments
    /// -----------------
    /// * `dt`: time lags in seconds.
    /// * `msd`: mean squared displacements, same length as `dt` (typically
    ///   produced by [`compute_msd`](crate::msd::compute_msd) across a lag
    ///   range).
    ///
    /// Return
    /// ----------
    /// * The fitted parameters as absolute values. The fit starts from the
    ///   unconstrained guess `(0, 0)`; no convergence flag is exposed and a
    ///   non-converging search yields the solver's last estimate.
    pub fn fit(dt: &[f64], msd: &[f64]) -> Result<Self, MotilityError> {
        if dt.len() != msd.len() {
            return Err(MotilityError::SeriesLengthMismatch(dt.len(), msd.len()));
        }
        if dt.is_empty() {
            return Err(MotilityError::EmptySeries);
        }

        let model = |a: f64, b: f64, x: f64| (a * x).powi(2) + 4.0 * (b * b).sqrt() * x;
        let sse = |p: &[f64]| {
            izip!(dt, msd)
                .map(|(&x, &y)| (y - model(p[0], p[1], x)).powi(2))
                .sum::<f64>()
        };

        let (params, _) = minimize(sse, &[0.0, 0.0], &SimplexOptions::default());
        let velocity = params[0].abs();
        let diffusion_coefficient = params[1].abs();

        let predicted: Vec<f64> = dt
            .iter()
            .map(|&x| model(velocity, diffusion_coefficient, x))
            .collect();
        Ok(ActiveTransportFit {
            velocity,
            diffusion_coefficient,
            goodness: r_squared(msd, &predicted),
        })
    }
}

#[cfg(test)]
mod active_transport_test {
    use super::*;

    #[test]
    fn separates_ballistic_and_diffusive_parts() {
        let dt: Vec<f64> = (1..=20).map(|i| 0.1 * i as f64).collect();
        let msd: Vec<f64> = dt
            .iter()
            .map(|&x| (2.0 * x).powi(2) + 4.0 * 0.1 * x)
            .collect();
        let fit = ActiveTransportFit::fit(&dt, &msd).unwrap();
        assert!((fit.velocity - 2.0).abs() < 1e-3, "velocity = {}", fit.velocity);
        assert!(
            (fit.diffusion_coefficient - 0.1).abs() < 1e-3,
            "D = {}",
            fit.diffusion_coefficient
        );
        assert!(fit.goodness > 0.999);
    }

    #[test]
    fn pure_diffusion_has_zero_velocity() {
        let dt: Vec<f64> = (1..=10).map(|i| 0.5 * i as f64).collect();
        let msd: Vec<f64> = dt.iter().map(|&x| 4.0 * 0.25 * x).collect();
        let fit = ActiveTransportFit::fit(&dt, &msd).unwrap();
        assert!(fit.velocity.abs() < 1e-3);
        assert!((fit.diffusion_coefficient - 0.25).abs() < 1e-3);
    }

    #[test]
    fn rejects_malformed_series() {
        assert_eq!(
            ActiveTransportFit::fit(&[1.0], &[]).unwrap_err(),
            MotilityError::SeriesLengthMismatch(1, 0)
        );
        assert_eq!(
            ActiveTransportFit::fit(&[], &[]).unwrap_err(),
            MotilityError::EmptySeries
        );
    }
}
