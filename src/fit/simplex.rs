//! Nelder–Mead downhill simplex minimization.
//!
//! Derivative-free, so models with kinks at the initial guess (absolute
//! values, square roots) remain fittable from arbitrary starting points.
//! After a first convergence the search restarts once from the best vertex,
//! which guards against premature collapse of the simplex.

/// Tuning knobs for [`minimize`].
#[derive(Debug, Clone)]
pub(crate) struct SimplexOptions {
    /// Hard cap on function evaluations per restart.
    pub max_iterations: usize,
    /// Relative spread of vertex values below which the simplex has converged.
    pub tolerance: f64,
    /// Initial displacement of the non-origin vertices.
    pub initial_step: f64,
}

impl Default for SimplexOptions {
    fn default() -> Self {
        SimplexOptions {
            max_iterations: 5_000,
            tolerance: 1e-12,
            initial_step: 0.1,
        }
    }
}

// Standard Nelder–Mead coefficients.
const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Minimize `f` starting from `start`.
///
/// Return
/// ----------
/// * `(argmin, f(argmin))` – the best point found. The minimizer always
///   returns its last iterate; boundedness of the search is the caller's
///   responsibility.
pub(crate) fn minimize<F>(f: F, start: &[f64], opts: &SimplexOptions) -> (Vec<f64>, f64)
where
    F: Fn(&[f64]) -> f64,
{
    let mut best = start.to_vec();
    let mut best_value = f(&best);

    // One restart from the converged vertex.
    for _ in 0..2 {
        let (candidate, value) = run_simplex(&f, &best, opts);
        if value < best_value {
            best = candidate;
            best_value = value;
        }
    }

    (best, best_value)
}

fn run_simplex<F>(f: &F, start: &[f64], opts: &SimplexOptions) -> (Vec<f64>, f64)
where
    F: Fn(&[f64]) -> f64,
{
    let n = start.len();

    // Initial simplex: the start point plus one displaced vertex per axis.
    let mut vertices: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    vertices.push(start.to_vec());
    for i in 0..n {
        let mut v = start.to_vec();
        let step = (0.1 * v[i].abs()).max(opts.initial_step);
        v[i] += step;
        vertices.push(v);
    }
    let mut values: Vec<f64> = vertices.iter().map(|v| f(v)).collect();

    for _ in 0..opts.max_iterations {
        // Order vertices by function value.
        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
        let best = order[0];
        let worst = order[n];
        let second_worst = order[n - 1];

        let spread = values[worst] - values[best];
        if spread <= opts.tolerance * (values[best].abs() + opts.tolerance) {
            break;
        }

        // Centroid of all vertices but the worst.
        let mut centroid = vec![0.0; n];
        for (idx, v) in vertices.iter().enumerate() {
            if idx == worst {
                continue;
            }
            for (c, x) in centroid.iter_mut().zip(v) {
                *c += x;
            }
        }
        for c in centroid.iter_mut() {
            *c /= n as f64;
        }

        let reflected = affine(&centroid, &vertices[worst], REFLECTION);
        let reflected_value = f(&reflected);

        if reflected_value < values[best] {
            // Try to expand further along the same direction.
            let expanded = affine(&centroid, &vertices[worst], EXPANSION);
            let expanded_value = f(&expanded);
            if expanded_value < reflected_value {
                vertices[worst] = expanded;
                values[worst] = expanded_value;
            } else {
                vertices[worst] = reflected;
                values[worst] = reflected_value;
            }
        } else if reflected_value < values[second_worst] {
            vertices[worst] = reflected;
            values[worst] = reflected_value;
        } else {
            // Contract towards the centroid.
            let contracted = affine(&centroid, &vertices[worst], -CONTRACTION);
            let contracted_value = f(&contracted);
            if contracted_value < values[worst] {
                vertices[worst] = contracted;
                values[worst] = contracted_value;
            } else {
                // Shrink everything towards the best vertex.
                let anchor = vertices[best].clone();
                for (idx, v) in vertices.iter_mut().enumerate() {
                    if idx == best {
                        continue;
                    }
                    for (x, a) in v.iter_mut().zip(&anchor) {
                        *x = a + SHRINK * (*x - a);
                    }
                    values[idx] = f(v);
                }
            }
        }
    }

    let mut best_idx = 0;
    for i in 1..=n {
        if values[i] < values[best_idx] {
            best_idx = i;
        }
    }
    (vertices[best_idx].clone(), values[best_idx])
}

/// `centroid + coefficient * (centroid - worst)`.
fn affine(centroid: &[f64], worst: &[f64], coefficient: f64) -> Vec<f64> {
    centroid
        .iter()
        .zip(worst)
        .map(|(c, w)| c + coefficient * (c - w))
        .collect()
}

#[cfg(test)]
mod simplex_test {
    use super::*;

    #[test]
    fn minimizes_shifted_quadratic() {
        let f = |p: &[f64]| (p[0] - 3.0).powi(2) + (p[1] + 1.5).powi(2);
        let (p, value) = minimize(f, &[0.0, 0.0], &SimplexOptions::default());
        assert!((p[0] - 3.0).abs() < 1e-5);
        assert!((p[1] + 1.5).abs() < 1e-5);
        assert!(value < 1e-9);
    }

    #[test]
    fn handles_non_smooth_objective() {
        // Absolute-value kink at the optimum, like the active-transport model
        // at its (0, 0) starting point.
        let f = |p: &[f64]| (p[0].abs() - 2.0).powi(2) + p[1].powi(2);
        let (p, _) = minimize(f, &[0.0, 0.0], &SimplexOptions::default());
        assert!((p[0].abs() - 2.0).abs() < 1e-5);
    }
}
