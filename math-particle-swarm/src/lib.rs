//! Particle Swarm Optimization library.
//!
//! This crate minimizes the two-dimensional Eggholder benchmark with a
//! classic global-best Particle Swarm Optimizer (PSO), and summarizes the
//! quality of repeated independent runs.
//!
//! # Features
//!
//! - Inertia-weight velocity rule with per-coordinate random factors
//! - Inelastic box boundaries (clamp position, zero the velocity component)
//! - Eggholder objective built on self-contained `sqrt`/`sin` approximations
//! - Seedable, injected random source for reproducible runs
//! - Mean / standard deviation summaries and population x iteration sweeps
//! - Optional parallel evaluation of particles and of independent runs
//!
//! # Example
//!
//! ```rust
//! use math_audio_particle_swarm::{PSOConfigBuilder, eggholder_swarm};
//!
//! let config = PSOConfigBuilder::new()
//!     .population(50)
//!     .iterations(100)
//!     .seed(42)
//!     .build()
//!     .expect("invalid config");
//!
//! let report = eggholder_swarm(config)
//!     .expect("eggholder needs two dimensions")
//!     .solve();
//!
//! assert!(report.fun < -700.0);
//! ```
#![doc = include_str!("../README.md")]
#![doc = include_str!("../REFERENCES.md")]
#![warn(missing_docs)]

pub mod error;
pub use error::{PSOError, Result};

use std::fmt;
use std::time::Instant;

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Self-contained `sqrt`/`sin` approximations used by the objective.
pub mod numeric;

/// Eggholder objective function.
pub mod eggholder;

/// A single particle of the swarm.
pub mod particle;
/// Swarm state and random initialization.
pub mod swarm;

/// Velocity rule.
pub mod update_velocity;
/// Position update with inelastic bounds.
pub mod update_position;
/// Fitness evaluation and personal/global best tracking.
pub mod update_bests;
/// Fixed-count iteration loop.
pub mod run_optimization;

/// Parallel particle evaluation support.
pub mod parallel_eval;

/// Mean / standard deviation over repeated runs.
pub mod statistics;
/// Repeated runs over a population x iteration grid.
pub mod sweep;
/// Text report of a sweep.
pub mod report;
/// Per-iteration convergence recording.
pub mod recorder;


pub use eggholder::{eggholder, eggholder_objective};
pub use numeric::{abs_value, checked_newton_sqrt, newton_sqrt, taylor_sin};
pub use parallel_eval::ParallelConfig;
pub use particle::Particle;
pub use recorder::{ConvergenceRecord, ConvergenceRecorder};
pub use report::{format_report, format_row, write_report};
pub use run_optimization::{run_optimization, run_optimization_with};
pub use statistics::{RunSummary, mean, stddev, summarize};
pub use swarm::{Swarm, initialize_swarm};
pub use sweep::{SweepConfig, SweepRow, run_independent, run_sweep};

/// Callback function type, called after every iteration.
pub type CallbackFn = Box<dyn FnMut(&PSOIntermediate) + Send>;

/// Objective signature used by [`eggholder_swarm`].
pub type ObjectiveFn = fn(&Array1<f64>) -> f64;

static EGGHOLDER: ObjectiveFn = eggholder_objective;

/// Geometry and coefficients of a swarm, shared by single runs and sweeps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwarmParams {
    /// Number of coordinates per particle.
    pub dimensions: usize,
    /// Lower position bound, same for every axis.
    pub pos_min: f64,
    /// Upper position bound, same for every axis.
    pub pos_max: f64,
    /// Initial velocities are drawn in `[-vel_max, vel_max]`.
    pub vel_max: f64,
    /// Inertia weight.
    pub w: f64,
    /// Cognitive coefficient (pull toward the personal best).
    pub c1: f64,
    /// Social coefficient (pull toward the global best).
    pub c2: f64,
}

impl Default for SwarmParams {
    fn default() -> Self {
        Self {
            dimensions: 2,
            pos_min: -512.0,
            pos_max: 512.0,
            vel_max: 77.0,
            w: 0.5,
            c1: 1.5,
            c2: 1.5,
        }
    }
}

impl SwarmParams {
    /// Checks the constraints the numeric core relies on.
    ///
    /// # Errors
    ///
    /// Returns `PSOError::ZeroDimensions`, `PSOError::InvalidBounds` or
    /// `PSOError::InvalidVelocityLimit`.
    pub fn validate(&self) -> Result<()> {
        if self.dimensions == 0 {
            return Err(PSOError::ZeroDimensions);
        }
        if !self.pos_min.is_finite() || !self.pos_max.is_finite() || self.pos_max <= self.pos_min
        {
            return Err(PSOError::InvalidBounds {
                lower: self.pos_min,
                upper: self.pos_max,
            });
        }
        if !self.vel_max.is_finite() || self.vel_max <= 0.0 {
            return Err(PSOError::InvalidVelocityLimit {
                vel_max: self.vel_max,
            });
        }
        Ok(())
    }
}

/// Configuration for the Particle Swarm optimizer.
pub struct PSOConfig {
    /// Number of particles.
    pub population: usize,
    /// Number of iterations; the run never stops earlier.
    pub iterations: usize,
    /// Geometry and coefficients.
    pub params: SwarmParams,
    /// Optional random seed for reproducibility.
    pub seed: Option<u64>,
    /// Print progress to stderr.
    pub disp: bool,
    /// Optional per-iteration callback.
    pub callback: Option<CallbackFn>,
    /// Parallel particle evaluation.
    pub parallel: ParallelConfig,
}

impl Default for PSOConfig {
    fn default() -> Self {
        Self {
            population: 50,
            iterations: 100,
            params: SwarmParams::default(),
            seed: None,
            disp: false,
            callback: None,
            // Eggholder is far too cheap to amortise thread hand-off
            parallel: ParallelConfig::sequential(),
        }
    }
}

impl PSOConfig {
    /// Checks the configuration without building an optimizer.
    pub fn validate(&self) -> Result<()> {
        if self.population == 0 {
            return Err(PSOError::EmptyPopulation);
        }
        self.params.validate()
    }
}

/// Fluent builder for `PSOConfig`.
///
/// # Example
///
/// ```rust
/// use math_audio_particle_swarm::PSOConfigBuilder;
///
/// let config = PSOConfigBuilder::new()
///     .population(100)
///     .iterations(50)
///     .coefficients(0.7, 1.4, 1.4)
///     .bounds(-10.0, 10.0)
///     .vel_max(2.0)
///     .seed(7)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.population, 100);
/// ```
pub struct PSOConfigBuilder {
    cfg: PSOConfig,
}

impl Default for PSOConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PSOConfigBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            cfg: PSOConfig::default(),
        }
    }
    /// Sets the number of particles.
    pub fn population(mut self, v: usize) -> Self {
        self.cfg.population = v;
        self
    }
    /// Sets the number of iterations.
    pub fn iterations(mut self, v: usize) -> Self {
        self.cfg.iterations = v;
        self
    }
    /// Sets the number of dimensions.
    pub fn dimensions(mut self, v: usize) -> Self {
        self.cfg.params.dimensions = v;
        self
    }
    /// Sets the position bounds shared by all axes.
    pub fn bounds(mut self, pos_min: f64, pos_max: f64) -> Self {
        self.cfg.params.pos_min = pos_min;
        self.cfg.params.pos_max = pos_max;
        self
    }
    /// Sets the initial velocity limit.
    pub fn vel_max(mut self, v: f64) -> Self {
        self.cfg.params.vel_max = v;
        self
    }
    /// Sets inertia, cognitive and social coefficients.
    pub fn coefficients(mut self, w: f64, c1: f64, c2: f64) -> Self {
        self.cfg.params.w = w;
        self.cfg.params.c1 = c1;
        self.cfg.params.c2 = c2;
        self
    }
    /// Replaces geometry and coefficients at once.
    pub fn params(mut self, params: SwarmParams) -> Self {
        self.cfg.params = params;
        self
    }
    /// Sets the random seed for reproducibility.
    pub fn seed(mut self, v: u64) -> Self {
        self.cfg.seed = Some(v);
        self
    }
    /// Enables/disables progress display.
    pub fn disp(mut self, v: bool) -> Self {
        self.cfg.disp = v;
        self
    }
    /// Sets a per-iteration callback function.
    pub fn callback(mut self, cb: CallbackFn) -> Self {
        self.cfg.callback = Some(cb);
        self
    }
    /// Sets the parallel evaluation configuration.
    pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
        self.cfg.parallel = parallel;
        self
    }
    /// Builds and returns the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the population is empty, there are
    /// no dimensions, the bounds are not increasing, or `vel_max <= 0`.
    pub fn build(self) -> Result<PSOConfig> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}

/// Result/report of a PSO run.
#[derive(Clone)]
pub struct PSOReport {
    /// Best position found.
    pub x: Array1<f64>,
    /// Objective value at `x`.
    pub fun: f64,
    /// Number of iterations performed.
    pub nit: usize,
    /// Number of function evaluations performed.
    pub nfev: usize,
    /// Global best fitness after each iteration.
    pub history: Vec<f64>,
    /// Final swarm state.
    pub swarm: Swarm,
}

impl fmt::Debug for PSOReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PSOReport")
            .field("x", &self.x)
            .field("fun", &self.fun)
            .field("nit", &self.nit)
            .field("nfev", &self.nfev)
            .field("history", &format!("len={}", self.history.len()))
            .field("swarm", &format!("{} particles", self.swarm.len()))
            .finish()
    }
}

/// Information passed to the callback after each iteration.
pub struct PSOIntermediate {
    /// Current global best position.
    pub x: Array1<f64>,
    /// Current global best fitness.
    pub fun: f64,
    /// Iteration just completed, starting at 1.
    pub iter: usize,
}

/// Particle Swarm optimizer.
///
/// Use [`ParticleSwarm::new`] (or [`eggholder_swarm`]) to create an
/// instance, then call [`solve`](Self::solve).
pub struct ParticleSwarm<'a, F>
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    func: &'a F,
    config: PSOConfig,
}

impl<'a, F> ParticleSwarm<'a, F>
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    /// Creates a new optimizer minimizing `func`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` does not validate.
    pub fn new(func: &'a F, config: PSOConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { func, config })
    }

    /// Read access to configuration
    pub fn config(&self) -> &PSOConfig {
        &self.config
    }

    /// Mutable access to configuration
    pub fn config_mut(&mut self) -> &mut PSOConfig {
        &mut self.config
    }

    /// Run the optimization with the configured seed and return a report.
    pub fn solve(&mut self) -> PSOReport {
        let mut rng: StdRng = match self.config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => {
                let mut thread_rng = rand::rng();
                StdRng::from_rng(&mut thread_rng)
            }
        };
        self.solve_with_rng(&mut rng)
    }

    /// Run the optimization drawing every random number from `rng`.
    pub fn solve_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> PSOReport {
        use run_optimization::iterate;

        let SwarmParams {
            dimensions,
            pos_min,
            pos_max,
            vel_max,
            w,
            c1,
            c2,
        } = self.config.params;
        let population = self.config.population;
        let iterations = self.config.iterations;
        let disp = self.config.disp;

        // Timing toggle via env var
        let timing_enabled = std::env::var("MATH_AUDIO_PSO_TIMING")
            .map(|v| v != "0")
            .unwrap_or(false);

        if disp {
            eprintln!(
                "PSO Init: {} dimensions, population={}, iterations={}",
                dimensions, population, iterations
            );
            eprintln!(
                "  w={:.3}, c1={:.3}, c2={:.3}, bounds=[{}, {}], vel_max={}",
                w, c1, c2, pos_min, pos_max, vel_max
            );
        }

        self.config.parallel.install_global_pool();

        let t_start = Instant::now();
        let mut swarm = initialize_swarm(population, dimensions, pos_min, pos_max, vel_max, rng);
        let mut history = Vec::with_capacity(iterations);
        let mut nfev = 0;

        for iter in 1..=iterations {
            let stats = iterate(
                self.func,
                &mut swarm,
                w,
                c1,
                c2,
                pos_min,
                pos_max,
                &self.config.parallel,
                rng,
            );
            nfev += stats.nfev;
            history.push(swarm.global_best_fitness);

            if disp {
                eprintln!(
                    "PSO iter {:4}  best_f={:.6e}  clamped={}",
                    iter, swarm.global_best_fitness, stats.clamped
                );
            }

            if let Some(ref mut cb) = self.config.callback {
                cb(&PSOIntermediate {
                    x: swarm.global_best_position.clone(),
                    fun: swarm.global_best_fitness,
                    iter,
                });
            }
        }

        if disp {
            eprintln!(
                "PSO finished: best_f={:.6e} after {} iterations, {} evaluations",
                swarm.global_best_fitness, iterations, nfev
            );
        }
        if timing_enabled {
            eprintln!(
                "TIMING total: {:.3} ms for {} iterations",
                t_start.elapsed().as_secs_f64() * 1e3,
                iterations
            );
        }

        PSOReport {
            x: swarm.global_best_position.clone(),
            fun: swarm.global_best_fitness,
            nit: iterations,
            nfev,
            history,
            swarm,
        }
    }
}

/// Builds an optimizer for the Eggholder objective.
///
/// # Errors
///
/// Returns `PSOError::TooFewDimensions` for fewer than two dimensions, or any
/// other configuration error from [`ParticleSwarm::new`].
pub fn eggholder_swarm(config: PSOConfig) -> Result<ParticleSwarm<'static, ObjectiveFn>> {
    if config.params.dimensions < eggholder::EGGHOLDER_DIMENSIONS {
        return Err(PSOError::TooFewDimensions {
            required: eggholder::EGGHOLDER_DIMENSIONS,
            got: config.params.dimensions,
        });
    }
    ParticleSwarm::new(&EGGHOLDER, config)
}
