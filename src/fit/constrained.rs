//! # Constrained log-linear power-law fit
//!
//! Minimize `Σ (ln y − (α·ln x + ln D))²` subject to box constraints
//! `α ∈ [0, 3]` and `D ∈ [0, 1]`, from the fixed starting point
//! `(α, D) = (1, 0.09)`.
//!
//! ## Solver
//! -----------------
//! Internally the search runs over `(α, β = ln D)`, where the objective is an
//! unconstrained-convex quadratic, using projected gradient descent with
//! Armijo backtracking. The box on `D` maps monotonically onto a box on `β`,
//! so the projection is a component-wise clamp.
//!
//! ## Non-convergence is not an error
//! -----------------
//! When the iteration budget runs out before the projected gradient vanishes,
//! the solver still returns its **last iterate**, flagged
//! [`FitStatus::IterationLimit`], so downstream classification can proceed
//! with a low-confidence result.
//!
//! ## Domain policy
//! -----------------
//! Samples with non-positive `x` or `y` (possible after drift
//! overcorrection) are **skipped**, not clamped. When no sample survives the
//! filter the fit fails with [`MotilityError::NoPositiveSamples`].

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_DIFFUSION_COEFFICIENT;
use crate::motility_errors::MotilityError;

/// Convergence status of the constrained solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitStatus {
    /// The projected gradient vanished within tolerance.
    Optimal,
    /// The iteration budget was exhausted; the reported parameters are the
    /// last iterate.
    IterationLimit,
}

/// Result of the constrained log-linear fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstrainedFit {
    /// Anomalous-diffusion exponent α.
    pub alpha: f64,
    /// Diffusion coefficient D, boxed to `[0, 1]`.
    pub diffusion_coefficient: f64,
    /// Achieved objective cost (sum of squared log-residuals).
    pub cost: f64,
    /// Whether the solver reached an optimal solution.
    pub status: FitStatus,
}

/// Tuning of the constrained solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstrainedOptions {
    /// Box on the exponent α.
    pub alpha_bounds: (f64, f64),
    /// Box on the diffusion coefficient D.
    pub d_bounds: (f64, f64),
    /// Fixed starting point `(α₀, D₀)`.
    pub initial: (f64, f64),
    /// Iteration budget.
    pub max_iterations: usize,
    /// Convergence threshold on the projected-gradient norm.
    pub tolerance: f64,
}

impl Default for ConstrainedOptions {
    fn default() -> Self {
        ConstrainedOptions {
            alpha_bounds: (0.0, 3.0),
            d_bounds: (MIN_DIFFUSION_COEFFICIENT, 1.0),
            initial: (1.0, 0.09),
            max_iterations: 50_000,
            tolerance: 1e-9,
        }
    }
}

/// Fit `ln y = α·ln x + ln D` under box constraints.
///
/// Arguments
/// -----------------
/// * `x`, `y`: equal-length series; replicated entries act as weights.
///   Non-positive samples are skipped (see module docs).
/// * `options`: bounds, starting point and iteration budget.
///
/// Return
/// ----------
/// * A [`ConstrainedFit`] carrying the (possibly non-optimal) solution and
///   its [`FitStatus`]. Structural input problems are the only fatal errors.
pub fn fit_log_linear(
    x: &[f64],
    y: &[f64],
    options: &ConstrainedOptions,
) -> Result<ConstrainedFit, MotilityError> {
    if x.len() != y.len() {
        return Err(MotilityError::SeriesLengthMismatch(x.len(), y.len()));
    }
    if x.is_empty() {
        return Err(MotilityError::EmptySeries);
    }

    // Domain guard: the logarithmic objective is undefined at non-positive
    // samples; skip them.
    let logs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|&(&xi, &yi)| xi > 0.0 && yi > 0.0)
        .map(|(&xi, &yi)| (xi.ln(), yi.ln()))
        .collect();
    if logs.is_empty() {
        return Err(MotilityError::NoPositiveSamples);
    }

    let lower = Vector2::new(options.alpha_bounds.0, options.d_bounds.0.ln());
    let upper = Vector2::new(options.alpha_bounds.1, options.d_bounds.1.ln());
    let clamp = |p: Vector2<f64>| {
        Vector2::new(
            p.x.clamp(lower.x, upper.x),
            p.y.clamp(lower.y, upper.y),
        )
    };

    let cost = |p: &Vector2<f64>| {
        logs.iter()
            .map(|(lx, ly)| (ly - p.x * lx - p.y).powi(2))
            .sum::<f64>()
    };
    let gradient = |p: &Vector2<f64>| {
        let mut g = Vector2::zeros();
        for (lx, ly) in &logs {
            let r = ly - p.x * lx - p.y;
            g.x -= 2.0 * r * lx;
            g.y -= 2.0 * r;
        }
        g
    };

    let mut p = clamp(Vector2::new(options.initial.0, options.initial.1.ln()));
    let mut value = cost(&p);
    let mut status = FitStatus::IterationLimit;
    let mut step = 1.0;

    for _ in 0..options.max_iterations {
        let g = gradient(&p);

        // Projected-gradient optimality measure.
        if (p - clamp(p - g)).norm() < options.tolerance {
            status = FitStatus::Optimal;
            break;
        }

        // Armijo backtracking on the projected step.
        let mut candidate = clamp(p - step * g);
        let mut candidate_value = cost(&candidate);
        while candidate_value > value - 1e-4 * (candidate - p).norm_squared() / step {
            step *= 0.5;
            if step < 1e-16 {
                break;
            }
            candidate = clamp(p - step * g);
            candidate_value = cost(&candidate);
        }

        p = candidate;
        value = candidate_value;
        step = (step * 2.0).min(1.0);
    }

    Ok(ConstrainedFit {
        alpha: p.x,
        diffusion_coefficient: p.y.exp(),
        cost: value,
        status,
    })
}
