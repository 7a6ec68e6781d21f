//! # Trajectory container
//!
//! Ordered, fixed-dimension sequence of particle positions sampled at a
//! constant frame rate.
//!
//! ## Overview
//!
//! - Positions live in a [`Vector3<f64>`]; a trajectory of dimension `d < 3`
//!   keeps the unused components at zero and every distance computation runs
//!   over the native `d` components only.
//! - A trajectory optionally carries the **absolute frame index** of its
//!   first sample, so windowed sub-trajectories stay anchored to global time.
//! - The analysis core borrows trajectories read-only; nothing in this crate
//!   mutates a trajectory it did not create.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::FrameIndex;
use crate::motility_errors::MotilityError;

/// An ordered sequence of positions in a fixed dimension (1, 2 or 3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    dimension: usize,
    start_frame: FrameIndex,
    positions: Vec<Vector3<f64>>,
}

impl Trajectory {
    /// Create an empty trajectory of the given dimension, starting at frame 0.
    ///
    /// Arguments
    /// -----------------
    /// * `dimension`: spatial dimension of the positions, in `{1, 2, 3}`.
    ///
    /// Return
    /// ----------
    /// * An empty [`Trajectory`], or [`MotilityError::InvalidDimension`].
    pub fn new(dimension: usize) -> Result<Self, MotilityError> {
        Self::with_start_frame(dimension, 0)
    }

    /// Create an empty trajectory anchored at an absolute frame index.
    ///
    /// Arguments
    /// -----------------
    /// * `dimension`: spatial dimension of the positions, in `{1, 2, 3}`.
    /// * `start_frame`: absolute frame index of the first sample to come.
    ///
    /// See also
    /// ------------
    /// * [`split_into_windows`](crate::windowing::split_into_windows) – Produces anchored sub-trajectories.
    pub fn with_start_frame(
        dimension: usize,
        start_frame: FrameIndex,
    ) -> Result<Self, MotilityError> {
        if !(1..=3).contains(&dimension) {
            return Err(MotilityError::InvalidDimension(dimension));
        }
        Ok(Trajectory {
            dimension,
            start_frame,
            positions: Vec::new(),
        })
    }

    /// Build a trajectory from an existing position sequence.
    pub fn from_positions(
        dimension: usize,
        positions: Vec<Vector3<f64>>,
    ) -> Result<Self, MotilityError> {
        let mut t = Self::new(dimension)?;
        t.positions = positions;
        Ok(t)
    }

    /// Append a position.
    ///
    /// Components beyond the trajectory dimension are ignored by every
    /// distance computation and should be left at zero.
    pub fn push(&mut self, position: Vector3<f64>) {
        self.positions.push(position);
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Spatial dimension (1, 2 or 3).
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Absolute frame index of the first sample.
    #[inline]
    pub fn start_frame(&self) -> FrameIndex {
        self.start_frame
    }

    /// Position at index `i`, if any.
    #[inline]
    pub fn get(&self, i: usize) -> Option<&Vector3<f64>> {
        self.positions.get(i)
    }

    /// All positions, in sampling order.
    #[inline]
    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    /// Squared Euclidean norm restricted to the native dimension.
    #[inline]
    pub(crate) fn squared_norm(&self, v: &Vector3<f64>) -> f64 {
        v.iter().take(self.dimension).map(|c| c * c).sum()
    }

    /// Displacement vector from sample `i` to sample `j`.
    ///
    /// Return
    /// ----------
    /// * `positions[j] - positions[i]`, or
    ///   [`MotilityError::PositionOutOfBounds`] when either index is invalid.
    pub fn displacement(&self, i: usize, j: usize) -> Result<Vector3<f64>, MotilityError> {
        let n = self.len();
        let pi = self
            .positions
            .get(i)
            .ok_or(MotilityError::PositionOutOfBounds(i, n))?;
        let pj = self
            .positions
            .get(j)
            .ok_or(MotilityError::PositionOutOfBounds(j, n))?;
        Ok(pj - pi)
    }

    /// Euclidean distance between samples `i` and `j` in the native dimension.
    pub fn distance(&self, i: usize, j: usize) -> Result<f64, MotilityError> {
        let d = self.displacement(i, j)?;
        Ok(self.squared_norm(&d).sqrt())
    }

    /// Extract the half-open sample range `[start, end)` as a new trajectory.
    ///
    /// The sub-trajectory keeps the source dimension and carries the
    /// **absolute** frame index of its first sample
    /// (`self.start_frame() + start`).
    ///
    /// Arguments
    /// -----------------
    /// * `start`: first sample index (inclusive).
    /// * `end`: one past the last sample index; must satisfy
    ///   `start < end <= len`.
    pub fn sub_trajectory(&self, start: usize, end: usize) -> Result<Self, MotilityError> {
        if start >= end || end > self.len() {
            return Err(MotilityError::PositionOutOfBounds(end, self.len()));
        }
        Ok(Trajectory {
            dimension: self.dimension,
            start_frame: self.start_frame + start,
            positions: self.positions[start..end].to_vec(),
        })
    }
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trajectory(dim={}, len={}, start_frame={})",
            self.dimension,
            self.len(),
            self.start_frame
        )
    }
}

/// Combine two trajectories by coordinate-wise addition of their positions.
///
/// The result's i-th position is the sum of the inputs' i-th positions. Both
/// trajectories must share dimension and length. The combined trajectory is
/// anchored at `a`'s start frame.
///
/// Arguments
/// -----------------
/// * `a`, `b`: trajectories of equal dimension and length.
///
/// Return
/// ----------
/// * The combined [`Trajectory`], or
///   [`MotilityError::DimensionMismatch`] / [`MotilityError::LengthMismatch`].
pub fn combine_trajectories(a: &Trajectory, b: &Trajectory) -> Result<Trajectory, MotilityError> {
    if a.dimension() != b.dimension() {
        return Err(MotilityError::DimensionMismatch(a.dimension(), b.dimension()));
    }
    if a.len() != b.len() {
        return Err(MotilityError::LengthMismatch(a.len(), b.len()));
    }
    let positions = a
        .positions()
        .iter()
        .zip(b.positions())
        .map(|(pa, pb)| pa + pb)
        .collect();
    Ok(Trajectory {
        dimension: a.dimension(),
        start_frame: a.start_frame(),
        positions,
    })
}
