use crate::particle::Particle;
use ndarray::{Array1, Zip};
use rand::Rng;

/// Velocity rule: `v = w v + c1 r1 (pbest - x) + c2 r2 (gbest - x)`.
///
/// `r1` and `r2` are fresh uniform draws in `[0, 1)` for every coordinate,
/// drawn in that order.
pub fn update_velocity<R: Rng + ?Sized>(
    particle: &mut Particle,
    global_best_position: &Array1<f64>,
    w: f64,
    c1: f64,
    c2: f64,
    rng: &mut R,
) {
    Zip::from(&mut particle.velocity)
        .and(&particle.position)
        .and(&particle.best_position)
        .and(global_best_position)
        .for_each(|v, &x, &pbest, &gbest| {
            let r1: f64 = rng.random::<f64>();
            let r2: f64 = rng.random::<f64>();
            *v = w * *v + c1 * r1 * (pbest - x) + c2 * r2 * (gbest - x);
        });
}
