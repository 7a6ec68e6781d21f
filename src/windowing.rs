//! # Trajectory windowing
//!
//! Split a trajectory into fixed-width sub-trajectories for spatially or
//! temporally localized analysis.
//!
//! Each window preserves the source dimension and carries the absolute frame
//! index of its first sample, so downstream time-dependent analyses stay
//! anchored to global time. The sequence is eagerly materialized in
//! traversal order.

use log::debug;

use crate::motility_errors::MotilityError;
use crate::trajectory::Trajectory;

/// Split `t` into fixed-width windows.
///
/// Arguments
/// -----------------
/// * `t`: the source trajectory.
/// * `window_width`: number of samples per window, `>= 1`.
/// * `overlapping`: `true` advances the window start by 1 (every possible
///   position); `false` advances by `window_width` (disjoint windows).
///
/// Return
/// ----------
/// * The windows in traversal order. Under the non-overlapping policy the
///   last window is truncated to whatever remains (never padded, never
///   dropped), so the windows cover every sample exactly once.
///
/// See also
/// ------------
/// * [`Trajectory::sub_trajectory`] – Extraction primitive used per window.
pub fn split_into_windows(
    t: &Trajectory,
    window_width: usize,
    overlapping: bool,
) -> Result<Vec<Trajectory>, MotilityError> {
    if window_width == 0 {
        return Err(MotilityError::InvalidWindowWidth(window_width));
    }

    let increment = if overlapping { 1 } else { window_width };
    let n = t.len();
    let mut windows = Vec::new();

    let mut i = 0;
    while i < n {
        let upper = (i + window_width).min(n);
        windows.push(t.sub_trajectory(i, upper)?);
        // A truncated window is the last one.
        if upper == n {
            break;
        }
        i += increment;
    }

    debug!("{} sub-trajectories returned", windows.len());
    Ok(windows)
}

#[cfg(test)]
mod windowing_test {
    use super::*;
    use nalgebra::Vector3;

    fn line_2d(n: usize) -> Trajectory {
        let mut t = Trajectory::new(2).unwrap();
        for i in 0..n {
            t.push(Vector3::new(i as f64, i as f64, 0.0));
        }
        t
    }

    #[test]
    fn disjoint_windows_cover_all_samples_once() {
        let t = line_2d(10);
        let windows = split_into_windows(&t, 3, false).unwrap();
        let sizes: Vec<usize> = windows.iter().map(Trajectory::len).collect();
        assert_eq!(sizes, vec![3, 3, 3, 1]);

        // Exact cover, in order.
        let mut x = 0.0;
        for w in &windows {
            for p in w.positions() {
                assert_eq!(p.x, x);
                x += 1.0;
            }
        }
        assert_eq!(x, 10.0);
    }

    #[test]
    fn overlapping_windows_share_samples() {
        let t = line_2d(10);
        let windows = split_into_windows(&t, 3, true).unwrap();
        assert_eq!(windows.len(), 8);
        for (k, w) in windows.iter().enumerate() {
            assert_eq!(w.len(), 3);
            assert_eq!(w.start_frame(), k);
        }
        // Consecutive windows share two samples.
        assert_eq!(windows[0].get(1), windows[1].get(0));
        assert_eq!(windows[0].get(2), windows[1].get(1));
    }

    #[test]
    fn window_width_is_validated() {
        let t = line_2d(4);
        assert_eq!(
            split_into_windows(&t, 0, false).unwrap_err(),
            MotilityError::InvalidWindowWidth(0)
        );
    }

    #[test]
    fn exact_multiple_has_no_truncated_window() {
        let t = line_2d(9);
        let windows = split_into_windows(&t, 3, false).unwrap();
        let sizes: Vec<usize> = windows.iter().map(Trajectory::len).collect();
        assert_eq!(sizes, vec![3, 3, 3]);
    }
}
