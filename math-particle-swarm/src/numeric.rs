//! Self-contained approximations of `sqrt` and `sin`.
//!
//! The Eggholder objective and the run statistics are evaluated through these
//! functions instead of `f64::sqrt`/`f64::sin` so that fitness values are
//! reproducible bit for bit across platforms and libm versions. Both are
//! deliberately approximate: `newton_sqrt` stops once `|g^2 - x| <= 1e-5`,
//! `taylor_sin` stops once the last series term is `<= 1e-5` and does no range
//! reduction.

/// Convergence tolerance on `|guess^2 - x|` for [`newton_sqrt`].
pub const SQRT_TOLERANCE: f64 = 1e-5;

/// Value returned by [`newton_sqrt`] for negative input.
///
/// It is never a valid root: callers that can see negative input must test for
/// it (or use [`checked_newton_sqrt`]).
pub const SQRT_UNDEFINED: f64 = -1.0;

/// Magnitude below which [`taylor_sin`] stops adding terms.
pub const SERIES_TOLERANCE: f64 = 1e-5;

// Quadratic convergence needs far fewer steps than this for any input whose
// tolerance is representable; the cap only matters for x above ~1e10 where
// |g^2 - x| cannot drop below 1e-5 in f64.
const MAX_NEWTON_STEPS: usize = 128;

/// Absolute value.
#[inline]
pub fn abs_value(x: f64) -> f64 {
    if x < 0.0 { -x } else { x }
}

/// Square root by Newton-Raphson iteration started from `x / 2`.
///
/// Returns [`SQRT_UNDEFINED`] (`-1`) for negative input and `0` for `0`
/// without dividing by the zero guess.
///
/// The stopping rule is absolute, so for `x` below about `1e-5` the initial
/// guess `x / 2` is already accepted.
///
/// # Example
///
/// ```rust
/// use math_audio_particle_swarm::numeric::{newton_sqrt, SQRT_UNDEFINED};
///
/// assert!((newton_sqrt(2.0) - 2f64.sqrt()).abs() < 1e-4);
/// assert_eq!(newton_sqrt(-4.0), SQRT_UNDEFINED);
/// assert_eq!(newton_sqrt(0.0), 0.0);
/// ```
pub fn newton_sqrt(x: f64) -> f64 {
    if x < 0.0 {
        return SQRT_UNDEFINED;
    }
    if x == 0.0 {
        return 0.0;
    }
    let mut guess = x / 2.0;
    let mut steps = 0;
    while abs_value(guess * guess - x) > SQRT_TOLERANCE && steps < MAX_NEWTON_STEPS {
        guess = (guess + x / guess) / 2.0;
        steps += 1;
    }
    guess
}

/// [`newton_sqrt`] with the negative-input sentinel lifted into `None`.
pub fn checked_newton_sqrt(x: f64) -> Option<f64> {
    if x < 0.0 { None } else { Some(newton_sqrt(x)) }
}

/// Sine by the truncated Maclaurin series `x - x^3/3! + x^5/5! - ...`.
///
/// Terms follow the recurrence `term *= x^2 / ((2n)(2n+1))` with alternating
/// sign, and the sum stops once `|term| <= 1e-5`. Accuracy is good on
/// `[-pi, pi]` and degrades as `|x|` grows since there is no range reduction.
pub fn taylor_sin(x: f64) -> f64 {
    let mut term = x;
    let mut sum = term;
    let mut n = 1.0;
    let mut sign = -1.0;
    while abs_value(term) > SERIES_TOLERANCE && term.is_finite() {
        term *= x * x / ((2.0 * n) * (2.0 * n + 1.0));
        sum += sign * term;
        sign = -sign;
        n += 1.0;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_abs_value() {
        assert_eq!(abs_value(-3.5), 3.5);
        assert_eq!(abs_value(3.5), 3.5);
        assert_eq!(abs_value(0.0), 0.0);
    }

    #[test]
    fn test_sqrt_matches_reference() {
        let mut x = 0.01;
        while x < 1.0e6 {
            assert_abs_diff_eq!(newton_sqrt(x), x.sqrt(), epsilon = 1e-4);
            x *= 1.37;
        }
        for x in [0.25, 1.0, 2.0, 4.0, 9.0, 47.0, 815.0, 1071.0] {
            assert_abs_diff_eq!(newton_sqrt(x), x.sqrt(), epsilon = 1e-4);
        }
    }

    #[test]
    fn test_sqrt_satisfies_stopping_rule() {
        for x in [0.5, 3.0, 123.456, 9.99e4, 2.5e7] {
            let g = newton_sqrt(x);
            assert!(abs_value(g * g - x) <= SQRT_TOLERANCE, "x={} g={}", x, g);
        }
    }

    #[test]
    fn test_sqrt_zero_and_negative() {
        assert_eq!(newton_sqrt(0.0), 0.0);
        assert_eq!(newton_sqrt(-1.0), SQRT_UNDEFINED);
        assert_eq!(newton_sqrt(-1e-12), SQRT_UNDEFINED);
        assert_eq!(checked_newton_sqrt(-2.0), None);
        assert_eq!(checked_newton_sqrt(0.0), Some(0.0));
        assert_abs_diff_eq!(checked_newton_sqrt(16.0).unwrap(), 4.0, epsilon = 1e-5);
    }

    #[test]
    fn test_sqrt_tiny_input_accepts_initial_guess() {
        // |(x/2)^2 - x| is already within tolerance
        let x = 1e-8;
        assert_eq!(newton_sqrt(x), x / 2.0);
    }

    #[test]
    fn test_sqrt_huge_input_terminates() {
        let x = 1.0e18;
        assert_abs_diff_eq!(newton_sqrt(x) / x.sqrt(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sin_principal_range() {
        let steps = 400;
        for i in 0..=steps {
            let x = -PI + 2.0 * PI * (i as f64) / (steps as f64);
            assert_abs_diff_eq!(taylor_sin(x), x.sin(), epsilon = 1e-3);
        }
    }

    #[test]
    fn test_sin_odd_and_zero() {
        assert_eq!(taylor_sin(0.0), 0.0);
        for x in [0.3, 1.1, 2.7, 7.5, 19.0] {
            assert_eq!(taylor_sin(-x), -taylor_sin(x));
        }
    }

    #[test]
    fn test_sin_over_eggholder_range() {
        // sqrt arguments inside [-512, 512]^2 never exceed sqrt(1071) ~ 32.7
        let steps = 600;
        for i in 0..=steps {
            let x = 33.0 * (i as f64) / (steps as f64);
            assert_abs_diff_eq!(taylor_sin(x), x.sin(), epsilon = 0.05);
        }
    }

    #[test]
    fn test_sin_non_finite_input_terminates() {
        assert!(!taylor_sin(f64::INFINITY).is_finite());
        assert!(taylor_sin(f64::NAN).is_nan());
    }
}
