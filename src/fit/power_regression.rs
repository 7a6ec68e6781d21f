//! # Power regression
//!
//! Least-squares fit of `y = a·x^b`, the model behind the anomalous-diffusion
//! exponent: on MSD data, `b` is the exponent α and `a` carries the diffusion
//! coefficient.
//!
//! The fit is seeded by an ordinary linear regression in log-log space
//! (restricted to strictly positive samples) and refined by a downhill
//! simplex on the **original** scale, so the reported parameters minimize the
//! plain sum of squared residuals rather than the log-residuals.

use itertools::izip;
use serde::{Deserialize, Serialize};

use crate::fit::r_squared;
use crate::fit::simplex::{minimize, SimplexOptions};
use crate::motility_errors::MotilityError;

/// Result of a `y = a·x^b` regression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerFit {
    /// Multiplicative coefficient `a`.
    pub a: f64,
    /// Exponent `b`.
    pub b: f64,
    /// Coefficient of determination (R²) on the original scale.
    pub goodness: f64,
}

/// Fit `y = a·x^b` to the supplied series.
///
/// Arguments
/// -----------------
/// * `x`, `y`: equal-length series; replicated entries act as weights.
///
/// Return
/// ----------
/// * The fitted [`PowerFit`], or [`MotilityError::SeriesLengthMismatch`] /
///   [`MotilityError::EmptySeries`] on malformed input.
///
/// See also
/// ------------
/// * [`PowerLawFit`](crate::features::power_law::PowerLawFit) – Builds the weighted MSD dataset this fits.
pub fn fit_power(x: &[f64], y: &[f64]) -> Result<PowerFit, MotilityError> {
    if x.len() != y.len() {
        return Err(MotilityError::SeriesLengthMismatch(x.len(), y.len()));
    }
    if x.is_empty() {
        return Err(MotilityError::EmptySeries);
    }

    let start = log_log_seed(x, y);
    let sse = |p: &[f64]| {
        izip!(x, y)
            .map(|(&xi, &yi)| {
                let predicted = p[0] * xi.powf(p[1]);
                (yi - predicted).powi(2)
            })
            .sum::<f64>()
    };
    let (params, _) = minimize(sse, &start, &SimplexOptions::default());
    let (a, b) = (params[0], params[1]);

    let predicted: Vec<f64> = x.iter().map(|&xi| a * xi.powf(b)).collect();
    Ok(PowerFit {
        a,
        b,
        goodness: r_squared(y, &predicted),
    })
}

/// Linear regression of `ln y` on `ln x` over the strictly positive samples.
///
/// Non-positive samples are skipped. Falls back to `(1, 1)` when fewer than
/// two usable samples remain.
fn log_log_seed(x: &[f64], y: &[f64]) -> [f64; 2] {
    let pairs: Vec<(f64, f64)> = izip!(x, y)
        .filter(|&(&xi, &yi)| xi > 0.0 && yi > 0.0)
        .map(|(&xi, &yi)| (xi.ln(), yi.ln()))
        .collect();
    if pairs.len() < 2 {
        return [1.0, 1.0];
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(lx, _)| lx).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, ly)| ly).sum::<f64>() / n;
    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (lx, ly) in &pairs {
        covariance += (lx - mean_x) * (ly - mean_y);
        variance += (lx - mean_x).powi(2);
    }
    if variance <= f64::EPSILON {
        return [1.0, 1.0];
    }
    let slope = covariance / variance;
    let intercept = mean_y - slope * mean_x;
    [intercept.exp(), slope]
}
