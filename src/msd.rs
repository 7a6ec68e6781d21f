//! # Mean squared displacement engine
//!
//! Compute the mean squared displacement (MSD) of a trajectory for a given
//! time lag, with a configurable overlap policy and optional drift
//! correction.
//!
//! ## Overview
//! -----------------
//! For a trajectory of length `N` and a lag `L`, every valid starting index
//! `i` (with `i + L < N`) contributes one squared displacement
//! `‖p[i+L] − p[i]‖²`. Two sampling policies are supported:
//!
//! * **overlap** – stride 1, every valid starting index is used; the sample
//!   count is `N − L`. Maximizes statistics at the cost of independence.
//! * **non-overlap** – stride `L`, each displacement pair is used once; the
//!   sample count is `⌊(N − 1) / L⌋`.
//!
//! A constant per-frame **drift** vector can be removed before squaring: the
//! correction subtracted from a displacement spanning `L` frames is
//! `drift · L`.
//!
//! ## Error semantics
//! -----------------
//! * `lag == 0` → [`MotilityError::InvalidLag`] (a zero lag has no
//!   displacement).
//! * `lag >= N` → [`MotilityError::InsufficientData`] (zero valid samples).

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::Lag;
use crate::motility_errors::MotilityError;
use crate::trajectory::Trajectory;

/// One MSD measurement: lag, mean value, sample count and the raw
/// per-pair squared displacements it was averaged from.
///
/// Produced fresh per call; nothing in the engine caches across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsdSample {
    /// Time lag in frames.
    pub lag: Lag,
    /// Mean squared displacement (≥ 0).
    pub value: f64,
    /// Number of displacement pairs averaged.
    pub n_samples: usize,
    /// The individual squared displacements, in starting-index order.
    pub squared_displacements: Vec<f64>,
}

/// Compute the mean squared displacement of `t` at time lag `lag`.
///
/// Arguments
/// -----------------
/// * `t`: the trajectory (borrowed read-only).
/// * `lag`: time lag in frames, `1 <= lag < t.len()`.
/// * `overlap`: `true` uses stride 1 (every valid starting index); `false`
///   uses stride `lag` (disjoint displacement pairs).
/// * `drift`: optional per-frame drift removed (scaled by `lag`) from each
///   displacement before squaring. Components beyond the trajectory
///   dimension are ignored.
///
/// Return
/// ----------
/// * `(msd, n_samples)` – the mean squared displacement and the number of
///   displacement pairs it averages. `n_samples` is needed downstream for
///   reliability weighting.
///
/// See also
/// ------------
/// * [`compute_msd_sample`] – Same computation, keeping the raw displacement list.
/// * [`PowerLawFit`](crate::features::power_law::PowerLawFit) – Consumes MSD series over a lag range.
pub fn compute_msd(
    t: &Trajectory,
    lag: Lag,
    overlap: bool,
    drift: Option<&Vector3<f64>>,
) -> Result<(f64, usize), MotilityError> {
    let sample = msd_pass(t, lag, overlap, drift, false)?;
    Ok((sample.value, sample.n_samples))
}

/// Compute the MSD at `lag` and keep the raw squared-displacement list.
///
/// Identical sampling and drift semantics as [`compute_msd`]; useful when the
/// caller needs the per-pair distribution (e.g. for variance estimates).
pub fn compute_msd_sample(
    t: &Trajectory,
    lag: Lag,
    overlap: bool,
    drift: Option<&Vector3<f64>>,
) -> Result<MsdSample, MotilityError> {
    msd_pass(t, lag, overlap, drift, true)
}

fn msd_pass(
    t: &Trajectory,
    lag: Lag,
    overlap: bool,
    drift: Option<&Vector3<f64>>,
    keep_displacements: bool,
) -> Result<MsdSample, MotilityError> {
    if lag == 0 {
        return Err(MotilityError::InvalidLag(lag));
    }
    let n = t.len();
    if lag >= n {
        return Err(MotilityError::InsufficientData { lag, len: n });
    }

    let stride = if overlap { 1 } else { lag };
    let correction = drift.map(|d| d * lag as f64);

    let mut sum = 0.0;
    let mut count = 0usize;
    let mut displacements = Vec::new();

    let mut i = 0;
    while i + lag < n {
        // Indices are in range by the loop condition.
        let mut d = t.positions()[i + lag] - t.positions()[i];
        if let Some(c) = correction {
            d -= c;
        }
        let sq = t.squared_norm(&d);
        sum += sq;
        count += 1;
        if keep_displacements {
            displacements.push(sq);
        }
        i += stride;
    }

    Ok(MsdSample {
        lag,
        value: sum / count as f64,
        n_samples: count,
        squared_displacements: displacements,
    })
}
