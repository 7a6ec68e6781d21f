use thiserror::Error;

use crate::constants::Lag;

/// Errors produced by the motility core.
///
/// Structural/input-validation errors (dimension or length mismatches,
/// out-of-range lags and window widths) are fatal for the call that raised
/// them. Data-sufficiency errors are fatal per call as well. Solver
/// convergence issues are deliberately **not** represented here: a
/// non-converging constrained fit returns its last iterate together with a
/// status flag (see [`FitStatus`](crate::fit::constrained::FitStatus)).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotilityError {
    #[error("Combination not possible: the trajectories do not have the same dimension ({0} vs {1})")]
    DimensionMismatch(usize, usize),

    #[error("Combination not possible: the trajectories do not have the same number of steps a={0} b={1}")]
    LengthMismatch(usize, usize),

    #[error("Invalid trajectory dimension: {0} (expected 1, 2 or 3)")]
    InvalidDimension(usize),

    #[error("Invalid time lag: {0} (must be >= 1)")]
    InvalidLag(Lag),

    #[error("Invalid lag range: min={0}, max={1}")]
    InvalidLagRange(Lag, Lag),

    #[error("Invalid window width: {0} (must be >= 1)")]
    InvalidWindowWidth(usize),

    #[error("Insufficient data: no displacement sample for lag {lag} on a trajectory of length {len}")]
    InsufficientData { lag: Lag, len: usize },

    #[error("Series length mismatch: x has {0} entries, y has {1}")]
    SeriesLengthMismatch(usize, usize),

    #[error("Empty input series")]
    EmptySeries,

    #[error("No strictly positive (x, y) sample available for the logarithmic fit")]
    NoPositiveSamples,

    #[error("Invalid result column index {0} for an MSD source with {1} columns")]
    InvalidColumnIndex(usize, usize),

    #[error("Position index {0} out of bounds for a trajectory of length {1}")]
    PositionOutOfBounds(usize, usize),
}
