//! # Constants and type definitions for motility
//!
//! This module centralizes the **numeric constants** and **common type
//! definitions** used throughout the `motility` library.
//!
//! ## Overview
//!
//! - Frame-rate and numeric tolerance constants
//! - Core type aliases used across the crate
//! - The inline-optimized container type for feature results
//!
//! These definitions are used by all main modules, including the MSD engine,
//! the feature implementations, and the fit back-ends.

use smallvec::SmallVec;

// -------------------------------------------------------------------------------------------------
// Numeric constants
// -------------------------------------------------------------------------------------------------

/// Default frame rate used when no acquisition rate is supplied [Hz].
///
/// With the default rate, time lags are used as-is on the fit abscissa
/// (one frame ↔ one time unit).
pub const DEFAULT_FPS: f64 = 1.0;

/// Threshold below which a floating-point value is treated as zero.
pub const ZERO_EPS: f64 = 1e-18;

/// Smallest diffusion coefficient admitted by the constrained log-linear fit.
///
/// Keeps `ln(D)` finite while staying far below any physically meaningful
/// coefficient in the boxed range `[0, 1]`.
pub const MIN_DIFFUSION_COEFFICIENT: f64 = 1e-12;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Time lag expressed as a number of frames.
pub type Lag = usize;

/// Acquisition frame rate [Hz].
pub type FramesPerSecond = f64;

/// Frame index into the global recording (absolute time anchor).
pub type FrameIndex = usize;

/// A small, inline-optimized container for the scalar outputs of a feature.
///
/// Most features return between one and four values (e.g. `[exponent, D,
/// goodness]` for the power-law fit), so results stay on the stack.
pub type FeatureValues = SmallVec<[f64; 4]>;

/// Test whether a value is numerically zero.
#[inline]
pub fn is_zero(v: f64) -> bool {
    v.abs() < ZERO_EPS
}

#[cfg(test)]
mod constants_test {
    use super::*;

    #[test]
    fn zero_threshold() {
        assert!(is_zero(0.0));
        assert!(is_zero(1e-19));
        assert!(!is_zero(1e-12));
    }
}
