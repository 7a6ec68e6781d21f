//! # Fit back-ends
//!
//! The numerical machinery behind the diffusion features:
//!
//! - [`simplex`] – a derivative-free Nelder–Mead minimizer, shared by the
//!   unconstrained model fits,
//! - [`power_regression`] – `y = a·x^b` least squares (log-linear seed,
//!   simplex refinement),
//! - [`constrained`] – box-constrained log-linear power-law fit with an
//!   explicit convergence status,
//! - [`active_transport`] – the ballistic + diffusive MSD line model.
//!
//! The two power-law strategies are mutually exclusive and selected through
//! [`FitMethod`]; the selector changes the solver and its constraints, never
//! the underlying MSD data.

pub mod active_transport;
pub mod constrained;
pub mod power_regression;
pub(crate) mod simplex;

use serde::{Deserialize, Serialize};

pub use active_transport::ActiveTransportFit;
pub use constrained::{ConstrainedFit, ConstrainedOptions, FitStatus};
pub use power_regression::PowerFit;

/// Optimization strategy of the power-law fitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FitMethod {
    /// Direct nonlinear regression of `y = a·x^b` on the weighted data.
    #[default]
    NonlinearRegression,
    /// Box-constrained minimization of the log-residuals
    /// `Σ (ln y − (α·ln x + ln D))²`.
    ConstrainedLogLinear,
}

/// Coefficient of determination of a fit.
///
/// Return
/// ----------
/// * `1 − SS_res / SS_tot`; defined as 1.0 when the observations are
///   constant (zero total variance).
pub(crate) fn r_squared(observed: &[f64], predicted: &[f64]) -> f64 {
    let n = observed.len() as f64;
    let mean = observed.iter().sum::<f64>() / n;
    let ss_tot: f64 = observed.iter().map(|y| (y - mean).powi(2)).sum();
    let ss_res: f64 = observed
        .iter()
        .zip(predicted)
        .map(|(y, y_hat)| (y - y_hat).powi(2))
        .sum();
    if ss_tot <= f64::EPSILON {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    }
}
