use crate::eggholder::eggholder_objective;
use crate::parallel_eval::ParallelConfig;
use crate::swarm::Swarm;
use crate::update_bests::{evaluate_swarm, update_bests};
use crate::update_position::update_position;
use crate::update_velocity::update_velocity;
use ndarray::Array1;
use rand::Rng;

/// Counters for one iteration of the swarm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IterationStats {
    /// Objective evaluations performed.
    pub nfev: usize,
    /// Coordinates clamped onto the bounds.
    pub clamped: usize,
}

/// Performs one PSO iteration in place.
///
/// Every particle moves first, steering on the global best left by the
/// previous iteration; only then are all particles evaluated and the bests
/// updated.
#[allow(clippy::too_many_arguments)]
pub fn iterate<F, R>(
    func: &F,
    swarm: &mut Swarm,
    w: f64,
    c1: f64,
    c2: f64,
    pos_min: f64,
    pos_max: f64,
    parallel: &ParallelConfig,
    rng: &mut R,
) -> IterationStats
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
    R: Rng + ?Sized,
{
    let mut clamped = 0;
    for particle in swarm.particles.iter_mut() {
        update_velocity(particle, &swarm.global_best_position, w, c1, c2, rng);
        clamped += update_position(particle, pos_min, pos_max);
    }
    let nfev = evaluate_swarm(swarm, func, parallel);
    update_bests(swarm);
    IterationStats { nfev, clamped }
}

/// Runs exactly `iterations` PSO iterations on `func` and returns the final
/// global best fitness.
///
/// There is no early exit. With `iterations == 0` the swarm is never
/// evaluated and `f64::MAX` is returned.
#[allow(clippy::too_many_arguments)]
pub fn run_optimization_with<F, R>(
    func: &F,
    swarm: &mut Swarm,
    iterations: usize,
    w: f64,
    c1: f64,
    c2: f64,
    pos_min: f64,
    pos_max: f64,
    rng: &mut R,
) -> f64
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
    R: Rng + ?Sized,
{
    let sequential = ParallelConfig::sequential();
    for _ in 0..iterations {
        iterate(func, swarm, w, c1, c2, pos_min, pos_max, &sequential, rng);
    }
    swarm.global_best_fitness
}

/// [`run_optimization_with`] on the Eggholder objective.
///
/// # Panics
///
/// Panics if the swarm has fewer than two dimensions.
#[allow(clippy::too_many_arguments)]
pub fn run_optimization<R: Rng + ?Sized>(
    swarm: &mut Swarm,
    iterations: usize,
    w: f64,
    c1: f64,
    c2: f64,
    pos_min: f64,
    pos_max: f64,
    rng: &mut R,
) -> f64 {
    run_optimization_with(
        &eggholder_objective,
        swarm,
        iterations,
        w,
        c1,
        c2,
        pos_min,
        pos_max,
        rng,
    )
}
