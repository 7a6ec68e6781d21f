//! # motility
//!
//! Diffusion analysis of discrete particle-motion trajectories: ordered 1D,
//! 2D or 3D positions sampled at a fixed frame rate are condensed into the
//! statistics that characterize the underlying motion — mean squared
//! displacement, anomalous-diffusion exponent, diffusion coefficient and
//! directed-transport velocity.
//!
//! ## Pipeline
//! -----------------
//! [`Trajectory`] → MSD engine (per lag) → power-law / active-transport fit
//! → scalar feature outputs. The windowing utility sits upstream and feeds
//! independent sub-trajectories into the same pipeline for localized
//! estimates.
//!
//! ## Entry points
//! -----------------
//! * [`compute_msd`] – MSD at one lag, with overlap policy and drift removal.
//! * [`PowerLawFit`](features::power_law::PowerLawFit) – anomalous-diffusion
//!   exponent via two selectable solvers.
//! * [`ActiveTransportFit`] – ballistic + diffusive separation.
//! * [`DiffusionCoefficientEstimator`](estimators::DiffusionCoefficientEstimator)
//!   – pluggable coefficient estimation strategies.
//! * [`split_into_windows`] – fixed-width windowed analysis.
//!
//! All computations are synchronous pure functions over borrowed, immutable
//! input data; features memoize their result per instance and are not
//! thread-safe (see [`features`]).

pub mod constants;
pub mod estimators;
pub mod features;
pub mod fit;
pub mod motility_errors;
pub mod msd;
pub mod trajectory;
pub mod windowing;

pub use crate::constants::{FeatureValues, FramesPerSecond, Lag};
pub use crate::fit::{ActiveTransportFit, FitMethod};
pub use crate::motility_errors::MotilityError;
pub use crate::msd::{compute_msd, compute_msd_sample, MsdSample};
pub use crate::trajectory::{combine_trajectories, Trajectory};
pub use crate::windowing::split_into_windows;
