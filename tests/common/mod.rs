//! Shared builders for synthetic trajectories.
#![allow(dead_code)]

use motility::Trajectory;
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Straight-line 2D motion: `x_i = step · i`.
pub fn ballistic_2d(n: usize, step: f64) -> Trajectory {
    let mut t = Trajectory::new(2).unwrap();
    for i in 0..n {
        t.push(Vector3::new(step * i as f64, 0.0, 0.0));
    }
    t
}

/// Seeded 2D random walk with per-component step deviation `sigma`.
///
/// Expected MSD at lag L is `2 · sigma² · L` per the two spatial components.
pub fn random_walk_2d(n: usize, sigma: f64, seed: u64) -> Trajectory {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, sigma).unwrap();
    let mut t = Trajectory::new(2).unwrap();
    let mut position = Vector3::zeros();
    for _ in 0..n {
        t.push(position);
        position.x += normal.sample(&mut rng);
        position.y += normal.sample(&mut rng);
    }
    t
}

/// Random walk superimposed on a constant per-frame drift along x.
pub fn drifting_walk_2d(n: usize, sigma: f64, drift_per_frame: f64, seed: u64) -> Trajectory {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, sigma).unwrap();
    let mut t = Trajectory::new(2).unwrap();
    let mut position = Vector3::zeros();
    for _ in 0..n {
        t.push(position);
        position.x += drift_per_frame + normal.sample(&mut rng);
        position.y += normal.sample(&mut rng);
    }
    t
}
