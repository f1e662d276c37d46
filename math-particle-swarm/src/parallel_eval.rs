use crate::particle::Particle;
use ndarray::Array1;
use rayon::prelude::*;

/// Parallel evaluation configuration
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Enable parallel evaluation
    pub enabled: bool,
    /// Number of threads to use (None = use rayon default)
    pub num_threads: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            num_threads: None, // Use rayon's default (typically num_cpus)
        }
    }
}

impl ParallelConfig {
    /// Configuration that never leaves the calling thread.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            num_threads: None,
        }
    }

    /// Configures the global rayon pool once if a thread count was requested.
    pub(crate) fn install_global_pool(&self) {
        if let Some(n) = self.num_threads {
            // Ignore error if global pool already set
            let _ = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build_global();
        }
    }
}

/// Evaluate the current position of every particle.
///
/// Results are returned in particle order whatever the scheduling, so
/// best-tracking done afterwards sees the same sequence as a sequential run.
pub fn evaluate_positions_parallel<F>(
    particles: &[Particle],
    eval_fn: &F,
    config: &ParallelConfig,
) -> Vec<f64>
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    if !config.enabled || particles.len() < 4 {
        // Sequential evaluation for small swarms or when disabled
        return particles.iter().map(|p| eval_fn(&p.position)).collect();
    }

    particles.par_iter().map(|p| eval_fn(&p.position)).collect()
}
