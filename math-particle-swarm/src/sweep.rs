//! Repeated independent Eggholder runs over a population x iteration grid.
//!
//! Each cell of the grid performs `runs` independent optimizations and
//! summarizes their final global best fitness. Run `i` of every cell draws
//! from `StdRng::seed_from_u64(seed + i)`, so results do not depend on thread
//! scheduling, and two cells differing only by iteration count share their
//! first iterations exactly.

use crate::eggholder::EGGHOLDER_DIMENSIONS;
use crate::error::{PSOError, Result};
use crate::parallel_eval::ParallelConfig;
use crate::run_optimization::run_optimization;
use crate::statistics::{RunSummary, summarize};
use crate::swarm::initialize_swarm;
use crate::SwarmParams;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

/// Parameter grid of a sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Population sizes to try.
    pub populations: Vec<usize>,
    /// Iteration counts to try.
    pub iterations: Vec<usize>,
    /// Independent runs per grid cell.
    pub runs: usize,
    /// Base seed; `None` draws every run from fresh entropy.
    pub seed: Option<u64>,
    /// Geometry and coefficients shared by all runs.
    pub params: SwarmParams,
    /// Run the independent runs of a cell in parallel.
    pub parallel: ParallelConfig,
    /// Print one line per finished cell to stderr.
    pub disp: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            populations: vec![50, 100],
            iterations: vec![20, 50, 100],
            runs: 10,
            seed: None,
            params: SwarmParams::default(),
            parallel: ParallelConfig::default(),
            disp: false,
        }
    }
}

impl SweepConfig {
    /// Checks that the grid is non-empty and every run would be valid.
    pub fn validate(&self) -> Result<()> {
        if self.populations.is_empty() {
            return Err(PSOError::EmptyGrid("no population sizes"));
        }
        if self.iterations.is_empty() {
            return Err(PSOError::EmptyGrid("no iteration counts"));
        }
        if self.runs == 0 {
            return Err(PSOError::EmptyGrid("zero runs per cell"));
        }
        if self.populations.contains(&0) {
            return Err(PSOError::EmptyPopulation);
        }
        self.params.validate()?;
        if self.params.dimensions < EGGHOLDER_DIMENSIONS {
            return Err(PSOError::TooFewDimensions {
                required: EGGHOLDER_DIMENSIONS,
                got: self.params.dimensions,
            });
        }
        Ok(())
    }
}

/// Summary of one grid cell.
#[derive(Debug, Clone)]
pub struct SweepRow {
    /// Population size of the cell.
    pub population: usize,
    /// Iteration count of the cell.
    pub iterations: usize,
    /// Final global best fitness of each run, in run order.
    pub results: Vec<f64>,
    /// Statistics over `results`.
    pub summary: RunSummary,
}

fn run_rng(seed: Option<u64>, run: usize) -> StdRng {
    match seed {
        Some(base_seed) => StdRng::seed_from_u64(base_seed.wrapping_add(run as u64)),
        None => {
            let mut thread_rng = rand::rng();
            StdRng::from_rng(&mut thread_rng)
        }
    }
}

/// Final Eggholder fitness of `runs` independent runs, in run order.
///
/// Parameters are assumed valid; see [`SweepConfig::validate`].
pub fn run_independent(
    params: &SwarmParams,
    population: usize,
    iterations: usize,
    runs: usize,
    seed: Option<u64>,
    parallel: &ParallelConfig,
) -> Vec<f64> {
    let single = |run: usize| -> f64 {
        let mut rng = run_rng(seed, run);
        let mut swarm = initialize_swarm(
            population,
            params.dimensions,
            params.pos_min,
            params.pos_max,
            params.vel_max,
            &mut rng,
        );
        run_optimization(
            &mut swarm,
            iterations,
            params.w,
            params.c1,
            params.c2,
            params.pos_min,
            params.pos_max,
            &mut rng,
        )
    };

    if !parallel.enabled || runs < 2 {
        return (0..runs).map(single).collect();
    }
    (0..runs).into_par_iter().map(single).collect()
}

/// Runs every cell of the grid, populations outermost.
///
/// # Errors
///
/// Returns a configuration error if [`SweepConfig::validate`] fails.
pub fn run_sweep(config: &SweepConfig) -> Result<Vec<SweepRow>> {
    config.validate()?;
    config.parallel.install_global_pool();

    let mut rows = Vec::with_capacity(config.populations.len() * config.iterations.len());
    for &population in &config.populations {
        for &iterations in &config.iterations {
            let results = run_independent(
                &config.params,
                population,
                iterations,
                config.runs,
                config.seed,
                &config.parallel,
            );
            let summary = summarize(&results)?;
            if config.disp {
                eprintln!(
                    "PSO sweep: population={:4} iterations={:4}  best={:.6}  mean={:.6}  std={:.6}",
                    population, iterations, summary.best, summary.mean, summary.stddev
                );
            }
            rows.push(SweepRow {
                population,
                iterations,
                results,
                summary,
            });
        }
    }
    Ok(rows)
}
