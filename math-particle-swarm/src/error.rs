//! Error types for the Particle Swarm optimizer.
//!
//! The numeric core assumes validated input. These errors are raised by the
//! layers that validate on its behalf: the configuration builder, the
//! optimizer constructor, the statistics summary and the sweep driver.

use thiserror::Error;

/// Errors that can occur while configuring or driving PSO runs.
#[derive(Debug, Error)]
pub enum PSOError {
    /// The swarm must contain at least one particle.
    #[error("population size must be >= 1")]
    EmptyPopulation,

    /// The search space must have at least one dimension.
    #[error("number of dimensions must be >= 1")]
    ZeroDimensions,

    /// The objective reads more coordinates than the swarm provides.
    #[error("objective needs at least {required} dimensions, got {got}")]
    TooFewDimensions {
        /// Dimensions the objective reads
        required: usize,
        /// Dimensions configured for the swarm
        got: usize,
    },

    /// Position bounds are not an increasing pair of finite values.
    #[error("invalid position bounds: lower ({lower}) must be < upper ({upper})")]
    InvalidBounds {
        /// The lower position bound
        lower: f64,
        /// The upper position bound
        upper: f64,
    },

    /// Initial velocity limit must be strictly positive.
    #[error("invalid velocity limit: {vel_max} (must be > 0)")]
    InvalidVelocityLimit {
        /// The invalid limit
        vel_max: f64,
    },

    /// Statistics were requested over zero values.
    #[error("cannot summarize an empty set of results")]
    EmptySample,

    /// A sweep was requested with nothing to run.
    #[error("sweep grid is empty: {0}")]
    EmptyGrid(&'static str),

    /// Writing a report or a recording failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for PSO operations.
pub type Result<T> = std::result::Result<T, PSOError>;

impl PSOError {
    /// Returns `true` for errors caused by an invalid run configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PSOError::EmptyPopulation
                | PSOError::ZeroDimensions
                | PSOError::TooFewDimensions { .. }
                | PSOError::InvalidBounds { .. }
                | PSOError::InvalidVelocityLimit { .. }
                | PSOError::EmptyGrid(_)
        )
    }

    /// Returns `true` if the error comes from the filesystem.
    pub fn is_io_error(&self) -> bool {
        matches!(self, PSOError::Io(_))
    }
}
