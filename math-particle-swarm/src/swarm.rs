use crate::particle::Particle;
use ndarray::Array1;
use rand::Rng;

/// The population of particles plus the best solution any of them found.
#[derive(Debug, Clone)]
pub struct Swarm {
    /// Particles, in evaluation order.
    pub particles: Vec<Particle>,
    /// Number of coordinates of every particle.
    pub dimensions: usize,
    /// Position of the lowest fitness seen by the swarm.
    pub global_best_position: Array1<f64>,
    /// Lowest fitness seen by the swarm; `f64::MAX` before the first pass.
    pub global_best_fitness: f64,
}

impl Swarm {
    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns `true` if the swarm holds no particle.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Creates a swarm with uniformly random positions and velocities.
///
/// Each coordinate of each particle draws its position uniformly in
/// `[pos_min, pos_max]` and then its velocity uniformly in
/// `[-vel_max, vel_max]`. The global best position starts at the origin and
/// is replaced by the first evaluation pass.
///
/// Inputs are assumed valid (`population >= 1`, `dimensions >= 1`,
/// `pos_max > pos_min`, `vel_max > 0`); see [`crate::PSOConfigBuilder::build`].
pub fn initialize_swarm<R: Rng + ?Sized>(
    population: usize,
    dimensions: usize,
    pos_min: f64,
    pos_max: f64,
    vel_max: f64,
    rng: &mut R,
) -> Swarm {
    let mut particles = Vec::with_capacity(population);
    for _ in 0..population {
        let mut position = Array1::<f64>::zeros(dimensions);
        let mut velocity = Array1::<f64>::zeros(dimensions);
        for d in 0..dimensions {
            let u: f64 = rng.random::<f64>();
            position[d] = pos_min + (pos_max - pos_min) * u;
            let u: f64 = rng.random::<f64>();
            velocity[d] = -vel_max + 2.0 * vel_max * u;
        }
        particles.push(Particle::new(position, velocity));
    }
    Swarm {
        particles,
        dimensions,
        global_best_position: Array1::zeros(dimensions),
        global_best_fitness: f64::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_initialize_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let swarm = initialize_swarm(40, 3, -5.0, 10.0, 2.0, &mut rng);

        assert_eq!(swarm.len(), 40);
        assert_eq!(swarm.dimensions, 3);
        assert_eq!(swarm.global_best_fitness, f64::MAX);
        assert_eq!(swarm.global_best_position.len(), 3);
        for p in &swarm.particles {
            assert_eq!(p.dimensions(), 3);
            assert_eq!(p.best_position, p.position);
            assert_eq!(p.best_fitness, f64::MAX);
            assert!(p.position.iter().all(|&x| (-5.0..=10.0).contains(&x)));
            assert!(p.velocity.iter().all(|&v| (-2.0..=2.0).contains(&v)));
        }
    }

    #[test]
    fn test_initialize_same_seed_same_swarm() {
        let a = initialize_swarm(10, 2, -512.0, 512.0, 77.0, &mut StdRng::seed_from_u64(99));
        let b = initialize_swarm(10, 2, -512.0, 512.0, 77.0, &mut StdRng::seed_from_u64(99));
        for (pa, pb) in a.particles.iter().zip(b.particles.iter()) {
            assert_eq!(pa.position, pb.position);
            assert_eq!(pa.velocity, pb.velocity);
        }
    }

    #[test]
    fn test_initialize_draws_are_not_shared() {
        let mut rng = StdRng::seed_from_u64(3);
        let swarm = initialize_swarm(2, 2, 0.0, 1.0, 1.0, &mut rng);
        let p = &swarm.particles[0];
        let q = &swarm.particles[1];
        assert_ne!(p.position[0], p.position[1]);
        assert_ne!(p.position, q.position);
    }
}
