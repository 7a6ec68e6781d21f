//! # Power-law fit of the MSD curve
//!
//! Classify the type of diffusion by fitting `MSD(lag) = D'·lag^α` over a
//! lag range. The exponent α is the primary output: α ≈ 1 indicates free
//! diffusion, α < 1 confined motion, α > 1 directed/active transport — the
//! classification itself is left to callers, this feature only supplies the
//! numbers.
//!
//! ## Weighted dataset
//! -----------------
//! For every lag in `[min_lag, max_lag]` the configured [`MsdSource`] yields
//! an MSD value and the number of displacement samples behind it. Each
//! `(lag, msd)` pair is **replicated** `n_samples` times in the regression
//! dataset, so more reliable lags carry proportionally more weight without
//! requiring a weighted-least-squares solver.
//!
//! ## Fit strategies
//! -----------------
//! Selected at construction via [`FitMethod`]:
//!
//! * [`FitMethod::NonlinearRegression`] – direct `y = a·x^b` regression;
//!   reports `[b, a/4, R²]`. The factor 4 is the 2D MSD-to-D relation
//!   (`MSD = 4·D·t`); for 1D or 3D data recover `a` as `4·D` and rescale.
//! * [`FitMethod::ConstrainedLogLinear`] – box-constrained minimization of
//!   the log-residuals; reports `[α, D, cost]`. A non-converging solve is
//!   **not** an error: the last iterate is returned and a warning is logged.

use log::warn;
use smallvec::smallvec;

use crate::constants::{FeatureValues, FramesPerSecond, Lag, DEFAULT_FPS};
use crate::features::msd_feature::{EngineMsdSource, MsdSource};
use crate::features::TrajectoryFeature;
use crate::fit::constrained::{fit_log_linear, ConstrainedOptions, FitStatus};
use crate::fit::power_regression::fit_power;
use crate::fit::FitMethod;
use crate::motility_errors::MotilityError;
use crate::trajectory::Trajectory;

/// Anomalous-diffusion exponent fit, as a cached feature.
///
/// Result columns: `[exponent, diffusion_coefficient, goodness]`.
pub struct PowerLawFit<'a> {
    t: &'a Trajectory,
    min_lag: Lag,
    max_lag: Lag,
    fps: FramesPerSecond,
    source: Box<dyn MsdSource>,
    evaluate_index: usize,
    fit_method: FitMethod,
    cache: Option<FeatureValues>,
}

impl<'a> PowerLawFit<'a> {
    /// Fitter over the lag range `[min_lag, max_lag]`.
    ///
    /// Defaults: MSD engine with overlap disabled and no drift as the source,
    /// regression on the MSD value column, direct nonlinear regression, and
    /// the frame rate [`DEFAULT_FPS`] (the fit abscissa is then the lag
    /// itself).
    ///
    /// Arguments
    /// -----------------
    /// * `t`: the trajectory (borrowed read-only).
    /// * `min_lag`, `max_lag`: lag range, `1 <= min_lag <= max_lag`. The
    ///   upper end must leave at least one displacement sample; a too-large
    ///   `max_lag` surfaces as [`MotilityError::InsufficientData`] at
    ///   evaluation time.
    pub fn new(t: &'a Trajectory, min_lag: Lag, max_lag: Lag) -> Result<Self, MotilityError> {
        if min_lag == 0 {
            return Err(MotilityError::InvalidLag(min_lag));
        }
        if min_lag > max_lag {
            return Err(MotilityError::InvalidLagRange(min_lag, max_lag));
        }
        Ok(PowerLawFit {
            t,
            min_lag,
            max_lag,
            fps: DEFAULT_FPS,
            source: Box::new(EngineMsdSource::default()),
            evaluate_index: 0,
            fit_method: FitMethod::default(),
            cache: None,
        })
    }

    /// Select the optimization strategy; invalidates the cached result.
    pub fn with_fit_method(mut self, fit_method: FitMethod) -> Self {
        self.fit_method = fit_method;
        self.cache = None;
        self
    }

    /// Express the fit abscissa in seconds (`x = lag / fps`); invalidates
    /// the cached result.
    pub fn with_fps(mut self, fps: FramesPerSecond) -> Self {
        self.fps = fps;
        self.cache = None;
        self
    }

    /// Substitute the per-lag MSD provider; invalidates the cached result.
    pub fn with_msd_source(mut self, source: Box<dyn MsdSource>) -> Self {
        self.source = source;
        self.cache = None;
        self
    }

    /// Regress on a different column of the source output; invalidates the
    /// cached result.
    pub fn with_evaluate_index(mut self, evaluate_index: usize) -> Self {
        self.evaluate_index = evaluate_index;
        self.cache = None;
        self
    }

    /// The weighted `(x, y)` dataset over the configured lag range.
    fn weighted_dataset(&self) -> Result<(Vec<f64>, Vec<f64>), MotilityError> {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for lag in self.min_lag..=self.max_lag {
            let columns = self.source.columns_at(self.t, lag)?;
            let y = *columns
                .get(self.evaluate_index)
                .ok_or(MotilityError::InvalidColumnIndex(
                    self.evaluate_index,
                    columns.len(),
                ))?;
            let n_samples = columns[columns.len() - 1] as usize;
            let x = lag as f64 / self.fps;
            for _ in 0..n_samples {
                xs.push(x);
                ys.push(y);
            }
        }
        Ok((xs, ys))
    }
}

impl<'a> TrajectoryFeature<'a> for PowerLawFit<'a> {
    fn evaluate(&self) -> Result<FeatureValues, MotilityError> {
        let (xs, ys) = self.weighted_dataset()?;

        match self.fit_method {
            FitMethod::NonlinearRegression => {
                let fit = fit_power(&xs, &ys)?;
                Ok(smallvec![fit.b, fit.a / 4.0, fit.goodness])
            }
            FitMethod::ConstrainedLogLinear => {
                let fit = fit_log_linear(&xs, &ys, &ConstrainedOptions::default())?;
                if fit.status != FitStatus::Optimal {
                    warn!(
                        "constrained power-law fit not optimal (cost {:.6e}); reporting last iterate",
                        fit.cost
                    );
                }
                Ok(smallvec![fit.alpha, fit.diffusion_coefficient, fit.cost])
            }
        }
    }

    fn cache_slot(&mut self) -> &mut Option<FeatureValues> {
        &mut self.cache
    }

    fn set_trajectory(&mut self, t: &'a Trajectory) {
        self.t = t;
        self.cache = None;
    }

    fn name(&self) -> &'static str {
        "Power-law fit of the MSD curve"
    }

    fn short_name(&self) -> &'static str {
        "POWER"
    }
}

#[cfg(test)]
mod power_law_test {
    use super::*;

    /// Synthetic source: msd(lag) = d · lag^alpha with a fixed sample count.
    struct SyntheticMsd {
        d: f64,
        alpha: f64,
        n_samples: usize,
    }

    impl MsdSource for SyntheticMsd {
        fn columns_at(&self, _t: &Trajectory, lag: Lag) -> Result<FeatureValues, MotilityError> {
            let value = self.d * (lag as f64).powf(self.alpha);
            Ok(smallvec![value, lag as f64, self.n_samples as f64])
        }
    }

    fn dummy_trajectory() -> Trajectory {
        let mut t = Trajectory::new(2).unwrap();
        for i in 0..40 {
            t.push(nalgebra::Vector3::new(i as f64, 0.0, 0.0));
        }
        t
    }

    #[test]
    fn free_diffusion_recovers_unit_exponent() {
        let t = dummy_trajectory();
        let source = SyntheticMsd {
            d: 2.0,
            alpha: 1.0,
            n_samples: 5,
        };
        let mut feature = PowerLawFit::new(&t, 1, 10)
            .unwrap()
            .with_msd_source(Box::new(source));
        let result = feature.value().unwrap();
        assert!((result[0] - 1.0).abs() < 1e-3, "exponent = {}", result[0]);
        assert!((result[1] - 0.5).abs() < 1e-3, "D = a/4 = {}", result[1]);
        assert!(result[2] > 0.999);
    }

    #[test]
    fn constrained_strategy_recovers_bounded_fit() {
        let t = dummy_trajectory();
        let source = SyntheticMsd {
            d: 0.2,
            alpha: 0.8,
            n_samples: 3,
        };
        let mut feature = PowerLawFit::new(&t, 1, 10)
            .unwrap()
            .with_msd_source(Box::new(source))
            .with_fit_method(FitMethod::ConstrainedLogLinear);
        let result = feature.value().unwrap();
        assert!((result[0] - 0.8).abs() < 1e-3);
        assert!((result[1] - 0.2).abs() < 1e-3);
    }

    #[test]
    fn lag_range_is_validated() {
        let t = dummy_trajectory();
        assert_eq!(
            PowerLawFit::new(&t, 0, 5).err(),
            Some(MotilityError::InvalidLag(0))
        );
        assert_eq!(
            PowerLawFit::new(&t, 6, 5).err(),
            Some(MotilityError::InvalidLagRange(6, 5))
        );
    }

    #[test]
    fn out_of_range_lag_surfaces_insufficient_data() {
        let t = dummy_trajectory();
        let mut feature = PowerLawFit::new(&t, 1, 40).unwrap();
        assert_eq!(
            feature.value().unwrap_err(),
            MotilityError::InsufficientData { lag: 40, len: 40 }
        );
    }

    #[test]
    fn cache_invalidated_by_trajectory_reassignment() {
        let a = dummy_trajectory();
        let b = dummy_trajectory();
        let source = SyntheticMsd {
            d: 1.0,
            alpha: 1.0,
            n_samples: 2,
        };
        let mut feature = PowerLawFit::new(&a, 1, 5)
            .unwrap()
            .with_msd_source(Box::new(source));
        let first = feature.value().unwrap();
        assert_eq!(first, feature.value().unwrap());
        feature.set_trajectory(&b);
        assert!(feature.cache_slot().is_none());
    }
}
