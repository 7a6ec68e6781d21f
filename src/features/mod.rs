//! # Cached trajectory features
//!
//! A *feature* condenses a trajectory into a handful of scalars (an MSD
//! value, a fitted exponent, a maximum displacement…). Features are cheap to
//! construct and **memoize** their result: the first [`value`] call computes
//! it, subsequent calls return the cached array, and reassigning the
//! trajectory invalidates the cache.
//!
//! ## Caching model
//! -----------------
//! The cache is an explicit `Option<FeatureValues>` slot owned by each
//! feature, exposed through [`TrajectoryFeature::cache_slot`]. Mutating a
//! feature's inputs (trajectory, lag, …) clears the slot. Instances are not
//! thread-safe: each feature belongs to a single logical computation.
//!
//! [`value`]: TrajectoryFeature::value

pub mod max_distance;
pub mod msd_feature;
pub mod power_law;

use crate::constants::FeatureValues;
use crate::motility_errors::MotilityError;
use crate::trajectory::Trajectory;

/// Capability shared by all trajectory features.
///
/// `evaluate` performs the actual computation and is side-effect-free;
/// `value` adds the evaluate-once memoization on top. The lifetime `'a` ties
/// a feature to the trajectory it borrows.
pub trait TrajectoryFeature<'a> {
    /// Compute the feature values from scratch.
    fn evaluate(&self) -> Result<FeatureValues, MotilityError>;

    /// The memoization slot backing [`value`](TrajectoryFeature::value).
    fn cache_slot(&mut self) -> &mut Option<FeatureValues>;

    /// Replace the analyzed trajectory and invalidate the cached result.
    fn set_trajectory(&mut self, t: &'a Trajectory);

    /// Human-readable feature name.
    fn name(&self) -> &'static str;

    /// Short identifier, suitable for column headers.
    fn short_name(&self) -> &'static str;

    /// The feature values, computed on first access and cached afterwards.
    ///
    /// Return
    /// ----------
    /// * The cached [`FeatureValues`] if present, otherwise the result of a
    ///   fresh [`evaluate`](TrajectoryFeature::evaluate) (which is then
    ///   cached). Errors are not cached; a failing feature re-evaluates on
    ///   the next call.
    fn value(&mut self) -> Result<FeatureValues, MotilityError> {
        if let Some(cached) = self.cache_slot().as_ref() {
            return Ok(cached.clone());
        }
        let computed = self.evaluate()?;
        *self.cache_slot() = Some(computed.clone());
        Ok(computed)
    }
}
