//! Maximum displacement observed for a fixed time lag.

use smallvec::smallvec;

use crate::constants::{FeatureValues, Lag};
use crate::features::TrajectoryFeature;
use crate::motility_errors::MotilityError;
use crate::trajectory::Trajectory;

/// Largest Euclidean distance between two positions separated by `lag`
/// frames. Result columns: `[max_distance]`.
#[derive(Debug, Clone)]
pub struct MaxDistanceForLag<'a> {
    t: &'a Trajectory,
    lag: Lag,
    cache: Option<FeatureValues>,
}

impl<'a> MaxDistanceForLag<'a> {
    pub fn new(t: &'a Trajectory, lag: Lag) -> Self {
        MaxDistanceForLag { t, lag, cache: None }
    }
}

impl<'a> TrajectoryFeature<'a> for MaxDistanceForLag<'a> {
    fn evaluate(&self) -> Result<FeatureValues, MotilityError> {
        if self.lag == 0 {
            return Err(MotilityError::InvalidLag(self.lag));
        }
        if self.lag >= self.t.len() {
            return Err(MotilityError::InsufficientData {
                lag: self.lag,
                len: self.t.len(),
            });
        }
        let mut max = f64::MIN_POSITIVE;
        for i in self.lag..self.t.len() {
            let d = self.t.distance(i - self.lag, i)?;
            if d > max {
                max = d;
            }
        }
        Ok(smallvec![max])
    }

    fn cache_slot(&mut self) -> &mut Option<FeatureValues> {
        &mut self.cache
    }

    fn set_trajectory(&mut self, t: &'a Trajectory) {
        self.t = t;
        self.cache = None;
    }

    fn name(&self) -> &'static str {
        "Max distance for a given time lag"
    }

    fn short_name(&self) -> &'static str {
        "MAX-DIST-LAG"
    }
}
