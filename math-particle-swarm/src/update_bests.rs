use crate::parallel_eval::{ParallelConfig, evaluate_positions_parallel};
use crate::swarm::Swarm;
use ndarray::Array1;

/// Evaluates every particle at its current position and stores the result in
/// `fitness`. Returns the number of objective evaluations.
pub fn evaluate_swarm<F>(swarm: &mut Swarm, func: &F, parallel: &ParallelConfig) -> usize
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    let fitness = evaluate_positions_parallel(&swarm.particles, func, parallel);
    for (particle, f) in swarm.particles.iter_mut().zip(fitness) {
        particle.fitness = f;
    }
    swarm.particles.len()
}

/// Folds the current fitness values into personal and global bests.
///
/// Particles are visited in index order and every comparison is strict, so
/// on ties the earlier best (and the earlier particle) is kept. The global
/// best may change several times within one pass.
pub fn update_bests(swarm: &mut Swarm) {
    for particle in swarm.particles.iter_mut() {
        if particle.fitness < particle.best_fitness {
            particle.best_fitness = particle.fitness;
            particle.best_position.assign(&particle.position);
        }
        if particle.fitness < swarm.global_best_fitness {
            swarm.global_best_fitness = particle.fitness;
            swarm.global_best_position.assign(&particle.position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use ndarray::array;

    fn swarm_of(positions: &[[f64; 2]]) -> Swarm {
        let particles = positions
            .iter()
            .map(|p| Particle::new(array![p[0], p[1]], array![0.0, 0.0]))
            .collect();
        Swarm {
            particles,
            dimensions: 2,
            global_best_position: Array1::zeros(2),
            global_best_fitness: f64::MAX,
        }
    }

    fn sum_sq(x: &Array1<f64>) -> f64 {
        x.iter().map(|&v| v * v).sum()
    }

    #[test]
    fn test_first_pass_sets_all_bests() {
        let mut swarm = swarm_of(&[[3.0, 4.0], [1.0, 0.0], [0.0, 2.0]]);
        let nfev = evaluate_swarm(&mut swarm, &sum_sq, &ParallelConfig::sequential());
        update_bests(&mut swarm);

        assert_eq!(nfev, 3);
        assert_eq!(swarm.particles[0].best_fitness, 25.0);
        assert_eq!(swarm.global_best_fitness, 1.0);
        assert_eq!(swarm.global_best_position, array![1.0, 0.0]);
    }

    #[test]
    fn test_personal_best_not_degraded() {
        let mut swarm = swarm_of(&[[1.0, 1.0]]);
        evaluate_swarm(&mut swarm, &sum_sq, &ParallelConfig::sequential());
        update_bests(&mut swarm);

        swarm.particles[0].position = array![5.0, 5.0];
        evaluate_swarm(&mut swarm, &sum_sq, &ParallelConfig::sequential());
        update_bests(&mut swarm);

        let p = &swarm.particles[0];
        assert_eq!(p.fitness, 50.0);
        assert_eq!(p.best_fitness, 2.0);
        assert_eq!(p.best_position, array![1.0, 1.0]);
        assert_eq!(swarm.global_best_fitness, 2.0);
    }

    #[test]
    fn test_ties_keep_earliest() {
        let mut swarm = swarm_of(&[[0.0, 2.0], [2.0, 0.0], [0.0, -2.0]]);
        evaluate_swarm(&mut swarm, &sum_sq, &ParallelConfig::sequential());
        update_bests(&mut swarm);
        assert_eq!(swarm.global_best_fitness, 4.0);
        assert_eq!(swarm.global_best_position, array![0.0, 2.0]);

        // same value elsewhere on a later pass does not move the bests
        swarm.particles[1].position = array![-2.0, 0.0];
        evaluate_swarm(&mut swarm, &sum_sq, &ParallelConfig::sequential());
        update_bests(&mut swarm);
        assert_eq!(swarm.particles[1].best_position, array![2.0, 0.0]);
        assert_eq!(swarm.global_best_position, array![0.0, 2.0]);
    }

    #[test]
    fn test_parallel_evaluation_gives_same_bests() {
        let positions: Vec<[f64; 2]> = (0..32)
            .map(|i| [(i as f64 * 0.37).sin() * 10.0, (i as f64 * 0.11).cos() * 10.0])
            .collect();
        let mut seq = swarm_of(&positions);
        let mut par = swarm_of(&positions);
        evaluate_swarm(&mut seq, &sum_sq, &ParallelConfig::sequential());
        update_bests(&mut seq);
        let config = ParallelConfig {
            enabled: true,
            num_threads: None,
        };
        evaluate_swarm(&mut par, &sum_sq, &config);
        update_bests(&mut par);

        assert_eq!(seq.global_best_fitness, par.global_best_fitness);
        assert_eq!(seq.global_best_position, par.global_best_position);
    }
}
