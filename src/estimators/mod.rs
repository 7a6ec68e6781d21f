//! # Diffusion coefficient estimators
//!
//! A single capability, [`DiffusionCoefficientEstimator`], turns a trajectory
//! into one or more diffusion-coefficient values. Concrete strategies plug in
//! behind the trait, so callers never depend on a particular estimation
//! scheme:
//!
//! * [`RegressionEstimator`] – ordinary linear regression of MSD against the
//!   time lag; the slope divided by 4 is the 2D diffusion coefficient.
//! * [`PowerLawEstimator`] – delegates to the power-law fitter and reports
//!   the coefficient together with the anomalous-diffusion exponent.
//!
//! Estimators are stateless between calls: each call is independently
//! reproducible given identical inputs.

use nalgebra::Vector3;
use smallvec::smallvec;

use crate::constants::{FeatureValues, FramesPerSecond, Lag};
use crate::features::msd_feature::EngineMsdSource;
use crate::features::power_law::PowerLawFit;
use crate::features::TrajectoryFeature;
use crate::fit::FitMethod;
use crate::motility_errors::MotilityError;
use crate::msd::compute_msd;
use crate::trajectory::Trajectory;

/// Capability of estimating a diffusion coefficient from a trajectory.
pub trait DiffusionCoefficientEstimator {
    /// Estimate the diffusion coefficient.
    ///
    /// Arguments
    /// -----------------
    /// * `t`: the trajectory (borrowed read-only).
    /// * `fps`: acquisition frame rate [Hz]; time lags are converted to
    ///   seconds as `lag / fps`.
    /// * `drift`: optional per-frame global drift removed before estimation.
    ///
    /// Return
    /// ----------
    /// * Estimator-specific values whose first entry is the diffusion
    ///   coefficient.
    fn estimate(
        &self,
        t: &Trajectory,
        fps: FramesPerSecond,
        drift: Option<&Vector3<f64>>,
    ) -> Result<FeatureValues, MotilityError>;
}

/// MSD-slope estimator: linear regression of `MSD(dt)` on `dt` over a lag
/// range, `D = slope / 4` (2D relation).
///
/// Result columns: `[diffusion_coefficient, slope, intercept]`.
#[derive(Debug, Clone, Copy)]
pub struct RegressionEstimator {
    pub min_lag: Lag,
    pub max_lag: Lag,
}

impl RegressionEstimator {
    pub fn new(min_lag: Lag, max_lag: Lag) -> Result<Self, MotilityError> {
        if min_lag == 0 {
            return Err(MotilityError::InvalidLag(min_lag));
        }
        if min_lag > max_lag {
            return Err(MotilityError::InvalidLagRange(min_lag, max_lag));
        }
        Ok(RegressionEstimator { min_lag, max_lag })
    }
}

impl DiffusionCoefficientEstimator for RegressionEstimator {
    fn estimate(
        &self,
        t: &Trajectory,
        fps: FramesPerSecond,
        drift: Option<&Vector3<f64>>,
    ) -> Result<FeatureValues, MotilityError> {
        // Overlapping sampling maximizes the statistics behind each point.
        let mut dts = Vec::with_capacity(self.max_lag - self.min_lag + 1);
        let mut msds = Vec::with_capacity(self.max_lag - self.min_lag + 1);
        for lag in self.min_lag..=self.max_lag {
            let (msd, _) = compute_msd(t, lag, true, drift)?;
            dts.push(lag as f64 / fps);
            msds.push(msd);
        }

        let n = dts.len() as f64;
        let mean_x = dts.iter().sum::<f64>() / n;
        let mean_y = msds.iter().sum::<f64>() / n;
        let mut covariance = 0.0;
        let mut variance = 0.0;
        for (x, y) in dts.iter().zip(&msds) {
            covariance += (x - mean_x) * (y - mean_y);
            variance += (x - mean_x).powi(2);
        }
        if variance <= f64::EPSILON {
            // Single-lag range: fall back to MSD = 4 D dt through the origin.
            let d = mean_y / (4.0 * mean_x);
            return Ok(smallvec![d, mean_y / mean_x, 0.0]);
        }
        let slope = covariance / variance;
        let intercept = mean_y - slope * mean_x;
        Ok(smallvec![slope / 4.0, slope, intercept])
    }
}

/// Power-law estimator: runs [`PowerLawFit`] and reorders its output so the
/// coefficient comes first.
///
/// Result columns: `[diffusion_coefficient, exponent, goodness]`.
#[derive(Debug, Clone, Copy)]
pub struct PowerLawEstimator {
    pub min_lag: Lag,
    pub max_lag: Lag,
    pub fit_method: FitMethod,
}

impl PowerLawEstimator {
    pub fn new(min_lag: Lag, max_lag: Lag, fit_method: FitMethod) -> Result<Self, MotilityError> {
        if min_lag == 0 {
            return Err(MotilityError::InvalidLag(min_lag));
        }
        if min_lag > max_lag {
            return Err(MotilityError::InvalidLagRange(min_lag, max_lag));
        }
        Ok(PowerLawEstimator {
            min_lag,
            max_lag,
            fit_method,
        })
    }
}

impl DiffusionCoefficientEstimator for PowerLawEstimator {
    fn estimate(
        &self,
        t: &Trajectory,
        fps: FramesPerSecond,
        drift: Option<&Vector3<f64>>,
    ) -> Result<FeatureValues, MotilityError> {
        let source = EngineMsdSource {
            overlap: false,
            drift: drift.copied(),
        };
        let feature = PowerLawFit::new(t, self.min_lag, self.max_lag)?
            .with_fps(fps)
            .with_fit_method(self.fit_method)
            .with_msd_source(Box::new(source));
        let values = feature.evaluate()?;
        Ok(smallvec![values[1], values[0], values[2]])
    }
}
