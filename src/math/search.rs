//! Inversion of strictly monotonic scalar functions.
//!
//! The search needs no domain bounds: it brackets the target by doubling a
//! step away from the guess, then bisects the bracket.

use crate::error::SearchError;

/// Direction in which a function's output moves as its input increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Monotonicity {
    Increasing,
    Decreasing,
}

impl Monotonicity {
    /// Returns the opposite direction.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Increasing => Self::Decreasing,
            Self::Decreasing => Self::Increasing,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
        }
    }

    /// Sign applied to function values so the search can treat every
    /// function as increasing.
    fn sign(self) -> f64 {
        match self {
            Self::Increasing => 1.0,
            Self::Decreasing => -1.0,
        }
    }
}

/// Tuning knobs for [`search_with`].
///
/// The defaults start doubling from a step of 1, which suits functions whose
/// slope near the guess is within a few orders of magnitude of 1. Curves with
/// very large or very small speeds should pick an `initial_step` of their own.
#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    /// First step taken away from the guess while bracketing.
    pub initial_step: f64,
    /// Maximum number of step doublings before giving up on bracketing.
    pub max_doublings: u32,
    /// Maximum number of bisection rounds.
    pub max_bisections: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            initial_step: 1.0,
            max_doublings: 1024,
            max_bisections: 2048,
        }
    }
}

/// Finds `t` such that `|f(t) - want| < epsilon`, starting from `guess`.
///
/// `f` must be strictly monotonic in the given direction over the region the
/// search explores.
///
/// # Errors
///
/// - [`SearchError::InvalidTolerance`] if `epsilon` is not finite and positive.
/// - [`SearchError::NonFiniteInput`] if `guess` or `want` is not finite.
/// - [`SearchError::PreconditionViolation`] if a probe shows `f` is not
///   strictly monotonic in the declared direction.
/// - [`SearchError::BracketNotFound`] if no value beyond `want` is reached.
/// - [`SearchError::NotConverged`] if the bracket collapses before `f` gets
///   within `epsilon` of `want`.
pub fn search<F>(
    guess: f64,
    f: F,
    monotonicity: Monotonicity,
    want: f64,
    epsilon: f64,
) -> Result<f64, SearchError>
where
    F: Fn(f64) -> f64,
{
    search_with(guess, f, monotonicity, want, epsilon, &SearchParams::default())
}

/// Like [`search`], with explicit [`SearchParams`].
///
/// # Errors
///
/// See [`search`].
pub fn search_with<F>(
    guess: f64,
    f: F,
    monotonicity: Monotonicity,
    want: f64,
    epsilon: f64,
    params: &SearchParams,
) -> Result<f64, SearchError>
where
    F: Fn(f64) -> f64,
{
    if !(epsilon.is_finite() && epsilon > 0.0) {
        return Err(SearchError::InvalidTolerance(epsilon));
    }
    if !(guess.is_finite() && want.is_finite()) {
        return Err(SearchError::NonFiniteInput { guess, want });
    }

    let sign = monotonicity.sign();
    let increasing = |t: f64| sign * f(t);
    let want = sign * want;

    let start = increasing(guess);
    if start == want {
        return Ok(guess);
    }

    match bracket(guess, start, &increasing, want, params) {
        Ok(Bracket::Exact(t)) => Ok(t),
        Ok(Bracket::Range(low, high)) => bisect(&increasing, low, high, want, epsilon, params),
        Ok(Bracket::Exhausted) => Err(SearchError::BracketNotFound {
            guess,
            want: sign * want,
            steps: params.max_doublings,
        }),
        Err(v) => Err(SearchError::PreconditionViolation {
            expected: monotonicity.describe(),
            from: v.from,
            to: v.to,
            from_value: sign * v.from_value,
            to_value: sign * v.to_value,
        }),
    }
}

enum Bracket {
    /// A probe landed exactly on the target.
    Exact(f64),
    Range(f64, f64),
    Exhausted,
}

struct Violation {
    from: f64,
    to: f64,
    from_value: f64,
    to_value: f64,
}

/// Walks away from `guess` with doubling steps until `f` passes `want`.
///
/// `f` is assumed increasing. Returns `Exhausted` when the step budget runs
/// out or the probe point stops being finite.
fn bracket<F>(
    guess: f64,
    start: f64,
    f: &F,
    want: f64,
    params: &SearchParams,
) -> Result<Bracket, Violation>
where
    F: Fn(f64) -> f64,
{
    // Too small means go right, too big means go left.
    let dir = if start < want { 1.0 } else { -1.0 };

    let mut prev_t = guess;
    let mut prev_value = start;
    let mut step = params.initial_step;

    for _ in 0..params.max_doublings {
        let t = guess + dir * step;
        if !t.is_finite() {
            break;
        }
        let value = f(t);

        let consistent = if dir > 0.0 {
            value > prev_value
        } else {
            value < prev_value
        };
        if !consistent {
            return Err(Violation {
                from: prev_t,
                to: t,
                from_value: prev_value,
                to_value: value,
            });
        }

        if value == want {
            return Ok(Bracket::Exact(t));
        }
        let passed = if dir > 0.0 { value > want } else { value < want };
        if passed {
            let (low, high) = if dir > 0.0 { (prev_t, t) } else { (t, prev_t) };
            return Ok(Bracket::Range(low, high));
        }

        prev_t = t;
        prev_value = value;
        step *= 2.0;
    }

    Ok(Bracket::Exhausted)
}

/// Bisects `[low, high]` where `f(low) < want < f(high)` and `f` is increasing.
fn bisect<F>(
    f: &F,
    mut low: f64,
    mut high: f64,
    want: f64,
    epsilon: f64,
    params: &SearchParams,
) -> Result<f64, SearchError>
where
    F: Fn(f64) -> f64,
{
    let mut residual = f64::INFINITY;
    for _ in 0..params.max_bisections {
        let mid = low + 0.5 * (high - low);
        let value = f(mid);
        residual = (value - want).abs();
        if residual < epsilon {
            return Ok(mid);
        }
        if mid <= low || mid >= high {
            break;
        }
        if value < want {
            low = mid;
        } else if value > want {
            high = mid;
        } else {
            // NaN
            break;
        }
    }

    Err(SearchError::NotConverged {
        low,
        high,
        residual,
        epsilon,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPS: f64 = 1.0 / 1000.0;

    #[test]
    fn identity_from_below_and_above() {
        let f = |x: f64| x;
        for guess in [1.0, 10.0] {
            let t = search(guess, f, Monotonicity::Increasing, 5.0, EPS).unwrap();
            assert!((f(t) - 5.0).abs() < EPS, "guess={guess} t={t}");
        }
    }

    #[test]
    fn negated_identity() {
        let f = |x: f64| -x;
        for guess in [1.0, 10.0] {
            let t = search(guess, f, Monotonicity::Decreasing, -5.0, EPS).unwrap();
            assert!((f(t) + 5.0).abs() < EPS, "guess={guess} t={t}");
        }
    }

    #[test]
    fn direction_invariance() {
        let f = |x: f64| x.powi(3) + x;
        let up = search(0.0, f, Monotonicity::Increasing, 30.0, 1e-9).unwrap();
        let down = search(
            0.0,
            |x| -f(x),
            Monotonicity::Increasing.reversed(),
            -30.0,
            1e-9,
        )
        .unwrap();
        assert_abs_diff_eq!(up, down, epsilon = 1e-9);
        assert_abs_diff_eq!(up, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn exp_round_trip() {
        for t in [-3.0_f64, -0.25, 0.5, 7.0] {
            let found = search(0.0, f64::exp, Monotonicity::Increasing, t.exp(), 1e-9).unwrap();
            assert_abs_diff_eq!(found, t, epsilon = 1e-6);
        }
    }

    #[test]
    fn exact_guess_short_circuits() {
        let t = search(4.0, |x| 2.0 * x, Monotonicity::Increasing, 8.0, EPS).unwrap();
        assert!((t - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn exact_probe_hit() {
        // Probes from guess 0 land on 1, 2, 4; 4 is exact.
        let t = search(0.0, |x| x, Monotonicity::Increasing, 4.0, EPS).unwrap();
        assert!((t - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn non_monotonic_function_fails_fast() {
        let r = search(0.0, |x| x * x, Monotonicity::Increasing, -1.0, EPS);
        assert!(matches!(
            r,
            Err(SearchError::PreconditionViolation { expected: "increasing", .. })
        ));
    }

    #[test]
    fn wrong_direction_flag_fails_fast() {
        let r = search(0.0, |x| x, Monotonicity::Decreasing, 5.0, EPS);
        assert!(matches!(r, Err(SearchError::PreconditionViolation { .. })));
    }

    #[test]
    fn flat_function_fails_fast() {
        let r = search(0.0, |_| 3.0, Monotonicity::Increasing, 5.0, EPS);
        assert!(matches!(r, Err(SearchError::PreconditionViolation { .. })));
    }

    #[test]
    fn invalid_tolerance() {
        for eps in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let r = search(0.0, |x| x, Monotonicity::Increasing, 5.0, eps);
            assert!(matches!(r, Err(SearchError::InvalidTolerance(_))));
        }
    }

    #[test]
    fn non_finite_guess_or_target() {
        for (guess, want) in [(0.0, f64::NAN), (0.0, f64::INFINITY), (f64::NEG_INFINITY, 5.0)] {
            let r = search(guess, |x| x, Monotonicity::Increasing, want, EPS);
            assert!(matches!(r, Err(SearchError::NonFiniteInput { .. })));
        }
    }

    #[test]
    fn nan_value_is_a_violation() {
        let f = |x: f64| if x > 1.5 { f64::NAN } else { x };
        let r = search(0.0, f, Monotonicity::Increasing, 5.0, EPS);
        assert!(matches!(
            r,
            Err(SearchError::PreconditionViolation { from, to, .. })
                if (from - 1.0).abs() < f64::EPSILON && (to - 2.0).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn overflowing_step_ends_bracketing() {
        // The second step overflows to infinity before the target is passed.
        let params = SearchParams {
            initial_step: f64::MAX,
            ..SearchParams::default()
        };
        let r = search_with(
            0.0,
            |x| 0.25 * x,
            Monotonicity::Increasing,
            f64::MAX / 2.0,
            EPS,
            &params,
        );
        assert!(matches!(r, Err(SearchError::BracketNotFound { .. })));
    }

    #[test]
    fn doubling_budget_exhausted() {
        let params = SearchParams {
            max_doublings: 4,
            ..SearchParams::default()
        };
        let r = search_with(0.0, |x| x, Monotonicity::Increasing, 1000.0, EPS, &params);
        assert!(matches!(r, Err(SearchError::BracketNotFound { steps: 4, .. })));
    }

    #[test]
    fn jump_over_target_does_not_loop() {
        let f = |x: f64| if x < 2.5 { x } else { x + 10.0 };
        let r = search(0.0, f, Monotonicity::Increasing, 5.0, EPS);
        assert!(matches!(r, Err(SearchError::NotConverged { .. })));
    }

    #[test]
    fn small_initial_step() {
        let params = SearchParams {
            initial_step: 1e-6,
            ..SearchParams::default()
        };
        let t = search_with(0.0, |x| x, Monotonicity::Increasing, 3e-6, 1e-12, &params).unwrap();
        assert_abs_diff_eq!(t, 3e-6, epsilon = 1e-12);
    }
}
