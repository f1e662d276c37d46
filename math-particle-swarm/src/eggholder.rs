//! Eggholder objective evaluated through the crate's own `sqrt`/`sin`.

use crate::numeric::{abs_value, newton_sqrt, taylor_sin};
use ndarray::Array1;

/// Known global minimum value of the Eggholder function on `[-512, 512]^2`.
pub const EGGHOLDER_MINIMUM: f64 = -959.6407;

/// Location of the global minimum.
pub const EGGHOLDER_ARGMIN: [f64; 2] = [512.0, 404.2319];

/// Usual search bounds per axis.
pub const EGGHOLDER_BOUNDS: (f64, f64) = (-512.0, 512.0);

/// Number of coordinates the objective reads.
pub const EGGHOLDER_DIMENSIONS: usize = 2;

/// Eggholder function - highly multimodal, very challenging.
///
/// `f(x, y) = -(y + 47) sin(sqrt(|x/2 + y + 47|)) - x sin(sqrt(|x - (y + 47)|))`
pub fn eggholder(x: f64, y: f64) -> f64 {
    -(y + 47.0) * taylor_sin(newton_sqrt(abs_value(x / 2.0 + y + 47.0)))
        - x * taylor_sin(newton_sqrt(abs_value(x - (y + 47.0))))
}

/// Eggholder over the first two coordinates of a position.
///
/// Further coordinates are ignored. Panics if `p` has fewer than two
/// elements; [`crate::ParticleSwarm`] rejects such swarms up front.
pub fn eggholder_objective(p: &Array1<f64>) -> f64 {
    eggholder(p[0], p[1])
}
