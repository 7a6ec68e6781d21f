//! # MSD feature and pluggable MSD sources
//!
//! [`MeanSquaredDisplacement`] wraps the MSD engine as a cached feature for a
//! single time lag. [`MsdSource`] is the plug point used by the power-law
//! fitter to obtain its per-lag statistics: the default
//! [`EngineMsdSource`] delegates to [`compute_msd`] with the overlap policy
//! disabled, and alternative sources (smoothed series, simulated data, …)
//! can be substituted without touching the fitter.

use nalgebra::Vector3;
use smallvec::smallvec;

use crate::constants::{FeatureValues, Lag};
use crate::features::TrajectoryFeature;
use crate::motility_errors::MotilityError;
use crate::msd::compute_msd;
use crate::trajectory::Trajectory;

/// Per-lag MSD provider consumed by the power-law fitter.
///
/// ## Column contract
/// -----------------
/// `columns_at` returns at least two values. Column 0 is the MSD value (the
/// default regression target), the **last** column is the number of
/// displacement samples behind it (used for reliability weighting).
/// Implementations may expose further columns in between; the fitter selects
/// its regression target by index.
pub trait MsdSource {
    /// Evaluate the source for one time lag.
    fn columns_at(&self, t: &Trajectory, lag: Lag) -> Result<FeatureValues, MotilityError>;
}

/// Default [`MsdSource`]: the MSD engine itself.
#[derive(Debug, Clone, Default)]
pub struct EngineMsdSource {
    /// Sampling policy passed to the engine (default: disjoint pairs).
    pub overlap: bool,
    /// Optional per-frame drift removed before squaring.
    pub drift: Option<Vector3<f64>>,
}

impl MsdSource for EngineMsdSource {
    /// Columns: `[msd, lag, n_samples]`.
    fn columns_at(&self, t: &Trajectory, lag: Lag) -> Result<FeatureValues, MotilityError> {
        let (value, n) = compute_msd(t, lag, self.overlap, self.drift.as_ref())?;
        Ok(smallvec![value, lag as f64, n as f64])
    }
}

/// Mean squared displacement at a fixed time lag, as a cached feature.
///
/// Result columns: `[msd, lag, n_samples]`.
#[derive(Debug, Clone)]
pub struct MeanSquaredDisplacement<'a> {
    t: &'a Trajectory,
    lag: Lag,
    overlap: bool,
    drift: Option<Vector3<f64>>,
    cache: Option<FeatureValues>,
}

impl<'a> MeanSquaredDisplacement<'a> {
    /// Feature for `t` at time lag `lag`, overlap enabled, no drift.
    pub fn new(t: &'a Trajectory, lag: Lag) -> Self {
        MeanSquaredDisplacement {
            t,
            lag,
            overlap: true,
            drift: None,
            cache: None,
        }
    }

    /// Change the time lag; invalidates the cached result.
    pub fn set_lag(&mut self, lag: Lag) {
        self.lag = lag;
        self.cache = None;
    }

    /// Change the sampling policy; invalidates the cached result.
    pub fn set_overlap(&mut self, overlap: bool) {
        self.overlap = overlap;
        self.cache = None;
    }

    /// Set or clear the drift correction; invalidates the cached result.
    pub fn set_drift(&mut self, drift: Option<Vector3<f64>>) {
        self.drift = drift;
        self.cache = None;
    }
}

impl<'a> TrajectoryFeature<'a> for MeanSquaredDisplacement<'a> {
    fn evaluate(&self) -> Result<FeatureValues, MotilityError> {
        let (value, n) = compute_msd(self.t, self.lag, self.overlap, self.drift.as_ref())?;
        Ok(smallvec![value, self.lag as f64, n as f64])
    }

    fn cache_slot(&mut self) -> &mut Option<FeatureValues> {
        &mut self.cache
    }

    fn set_trajectory(&mut self, t: &'a Trajectory) {
        self.t = t;
        self.cache = None;
    }

    fn name(&self) -> &'static str {
        "Mean squared displacement"
    }

    fn short_name(&self) -> &'static str {
        "MSD"
    }
}

impl<'a> MsdSource for MeanSquaredDisplacement<'a> {
    /// Uses this feature's overlap and drift configuration with the supplied
    /// trajectory and lag (the feature's own trajectory and lag are ignored).
    fn columns_at(&self, t: &Trajectory, lag: Lag) -> Result<FeatureValues, MotilityError> {
        let (value, n) = compute_msd(t, lag, self.overlap, self.drift.as_ref())?;
        Ok(smallvec![value, lag as f64, n as f64])
    }
}

#[cfg(test)]
mod msd_feature_test {
    use super::*;

    fn line_1d(n: usize) -> Trajectory {
        let mut t = Trajectory::new(1).unwrap();
        for i in 0..n {
            t.push(Vector3::new(i as f64, 0.0, 0.0));
        }
        t
    }

    #[test]
    fn value_is_cached_until_trajectory_reassignment() {
        let a = line_1d(10);
        let b = line_1d(20);

        let mut feature = MeanSquaredDisplacement::new(&a, 2);
        let first = feature.value().unwrap();
        assert_eq!(first, feature.value().unwrap());
        assert!(feature.cache_slot().is_some());

        // Reassignment invalidates; the next read recomputes with more samples.
        feature.set_trajectory(&b);
        assert!(feature.cache_slot().is_none());
        let second = feature.value().unwrap();
        assert_eq!(second[2], 18.0);
    }

    #[test]
    fn engine_source_reports_count_in_last_column() {
        let t = line_1d(10);
        let source = EngineMsdSource::default();
        let cols = source.columns_at(&t, 3).unwrap();
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[2], 3.0); // floor((10 - 1) / 3)
    }
}
