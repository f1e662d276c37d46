use ndarray::Array1;

/// One candidate solution of the swarm.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Current position.
    pub position: Array1<f64>,
    /// Current velocity.
    pub velocity: Array1<f64>,
    /// Position at which `best_fitness` was observed.
    pub best_position: Array1<f64>,
    /// Objective value at `position` (as of the last evaluation pass).
    pub fitness: f64,
    /// Lowest objective value this particle has seen.
    pub best_fitness: f64,
}

impl Particle {
    /// Creates a particle that has not been evaluated yet.
    ///
    /// `best_position` starts at `position`; both fitness values start at
    /// `f64::MAX` so the first evaluation always improves on them.
    pub fn new(position: Array1<f64>, velocity: Array1<f64>) -> Self {
        Self {
            best_position: position.clone(),
            position,
            velocity,
            fitness: f64::MAX,
            best_fitness: f64::MAX,
        }
    }

    /// Number of coordinates.
    pub fn dimensions(&self) -> usize {
        self.position.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_new_particle_is_unevaluated() {
        let p = Particle::new(array![1.0, -2.0], array![0.5, 0.25]);
        assert_eq!(p.best_position, p.position);
        assert_eq!(p.fitness, f64::MAX);
        assert_eq!(p.best_fitness, f64::MAX);
        assert_eq!(p.dimensions(), 2);
    }
}
