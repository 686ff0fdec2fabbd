// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A safeguarded Newton iteration for arbitrary differentiable functions.

use core::ops::Range;

use crate::common::different_signs;
use crate::Error;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Relative step size below which the iteration is considered converged.
const STEP_TOLERANCE: f64 = 1e-14;

/// Ratio of bound magnitudes beyond which interpolation aims off-center.
const LOPSIDED_RATIO: f64 = 50.0;

/// Relative difference of bound magnitudes below which interpolation bisects.
const BALANCE_TOLERANCE: f64 = 1e-3;

/// Find a root of `f` near `x0` by Newton iteration, safeguarded by secant
/// and bisection steps when a bracket is given.
///
/// Each iteration takes the Newton step `x - f(x) / df(x)`. If `df(x)` is
/// exactly zero, the derivative from the previous iteration is reused.
/// Iteration stops when the step is at most `1e-14` relative to the new
/// estimate, or when a step repeats one of the previous two steps (a
/// cycle).
///
/// With `bounds`, `f` must change sign over the range. The range shrinks
/// as the iteration proceeds: each estimate replaces whichever end has the
/// same sign of `f`. A Newton step that would leave the range is replaced
/// by an interpolated step between the ends. That is a plain secant step
/// in general, a bisection when the two end values agree in magnitude to
/// within a relative `1e-3`, and a step a quarter of the way in from the
/// end with the smaller magnitude when one end value is more than fifty
/// times the other. An `x0` outside the range is replaced by its midpoint.
///
/// The result should be judged by how small `f` is at it, not by whether
/// it is exactly zero.
///
/// # Errors
///
/// - [`Error::InvalidBracket`] if the range is reversed or not finite.
/// - [`Error::BracketSameSign`] if `f` doesn't change sign over the range.
/// - [`Error::DerivativeUnavailable`] if `df` is zero on the first iteration.
/// - [`Error::IterationBudgetExceeded`] if there is no convergence within
///   `max_iterations`, or the unbounded iteration diverges. The last finite
///   estimate is included.
///
/// # Examples
///
/// ```
/// use polycurve::newton_secant_bisection;
///
/// let x = newton_secant_bisection(1.0, |x| x * x - 2.0, |x| 2.0 * x, 100, Some(0.0..2.0))
///     .unwrap();
/// assert!((x - 2f64.sqrt()).abs() < 1e-12);
/// ```
pub fn newton_secant_bisection(
    x0: f64,
    f: impl Fn(f64) -> f64,
    df: impl Fn(f64) -> f64,
    max_iterations: u32,
    bounds: Option<Range<f64>>,
) -> Result<f64, Error> {
    let mut bracket = match bounds {
        Some(range) => match Bracket::new(range, &f)? {
            Ok(bracket) => Some(bracket),
            Err(root) => return Ok(root),
        },
        None => None,
    };
    let mut x = x0;
    if let Some(b) = &bracket {
        if !(b.min..=b.max).contains(&x) {
            x = 0.5 * (b.min + b.max);
        }
    }
    let mut prev_deriv = None;
    let mut prev_steps = [f64::NAN; 2];
    for i in 0..max_iterations {
        let fx = f(x);
        if fx == 0.0 {
            return Ok(x);
        }
        let mut deriv = df(x);
        if deriv == 0.0 {
            deriv = prev_deriv.ok_or(Error::DerivativeUnavailable { x })?;
        }
        prev_deriv = Some(deriv);
        let mut x_new = x - fx / deriv;
        if let Some(b) = &mut bracket {
            b.shrink(x, fx);
            if !(b.min..=b.max).contains(&x_new) {
                x_new = b.interpolate();
                log::trace!("Newton step left [{}, {}], using {x_new}", b.min, b.max);
            }
        } else if !x_new.is_finite() {
            log::debug!("Newton iteration diverged after {i} iterations");
            return Err(Error::IterationBudgetExceeded {
                iterations: i as usize,
                estimate: Some(x),
            });
        }
        let step = x_new - x;
        if step.abs() <= STEP_TOLERANCE * x_new.abs() || prev_steps.contains(&step) {
            return Ok(x_new);
        }
        prev_steps = [prev_steps[1], step];
        x = x_new;
    }
    log::debug!("Newton iteration did not converge in {max_iterations} iterations");
    Err(Error::IterationBudgetExceeded {
        iterations: max_iterations as usize,
        estimate: Some(x),
    })
}

/// The shrinking range known to contain a sign change.
struct Bracket {
    min: f64,
    max: f64,
    f_min: f64,
    f_max: f64,
}

impl Bracket {
    /// Validate a bracket. The inner `Err` is an end that is already a root.
    fn new(range: Range<f64>, f: impl Fn(f64) -> f64) -> Result<Result<Self, f64>, Error> {
        let Range { start: min, end: max } = range;
        if !(min.is_finite() && max.is_finite() && min <= max) {
            log::debug!("rejecting bracket [{min}, {max}]");
            return Err(Error::InvalidBracket { min, max });
        }
        let f_min = f(min);
        if f_min == 0.0 {
            return Ok(Err(min));
        }
        let f_max = f(max);
        if f_max == 0.0 {
            return Ok(Err(max));
        }
        if !different_signs(f_min, f_max) {
            log::debug!("rejecting bracket [{min}, {max}]: f(min) = {f_min}, f(max) = {f_max}");
            return Err(Error::BracketSameSign { f_min, f_max });
        }
        Ok(Ok(Bracket {
            min,
            max,
            f_min,
            f_max,
        }))
    }

    fn shrink(&mut self, x: f64, fx: f64) {
        if !different_signs(fx, self.f_min) {
            self.min = x;
            self.f_min = fx;
        } else {
            self.max = x;
            self.f_max = fx;
        }
    }

    fn interpolate(&self) -> f64 {
        let a_min = self.f_min.abs();
        let a_max = self.f_max.abs();
        if a_max == 0.0 {
            return self.max;
        }
        if a_min == 0.0 {
            return self.min;
        }
        let width = self.max - self.min;
        let ratio = a_min / a_max;
        if ratio > LOPSIDED_RATIO {
            self.min + 0.75 * width
        } else if ratio < LOPSIDED_RATIO.recip() {
            self.min + 0.25 * width
        } else if (a_min - a_max).abs() <= BALANCE_TOLERANCE * a_min.max(a_max) {
            self.min + 0.5 * width
        } else {
            self.min - self.f_min * width / (self.f_max - self.f_min)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt2() {
        let x = newton_secant_bisection(1.0, |x| x * x - 2.0, |x| 2.0 * x, 100, Some(0.0..2.0))
            .unwrap();
        assert!((x - 2f64.sqrt()).abs() < 1e-10);
        let x = newton_secant_bisection(1.0, |x| x * x - 2.0, |x| 2.0 * x, 100, None).unwrap();
        assert!((x - 2f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn transcendental() {
        let x = newton_secant_bisection(
            0.1,
            |x| x.cos() - x,
            |x| -x.sin() - 1.0,
            100,
            Some(0.0..1.0),
        )
        .unwrap();
        assert!((x - 0.739_085_133_215_160_7).abs() < 1e-12);
        for x0 in [-3.0, 4.0] {
            let x = newton_secant_bisection(x0, |x| x.exp() - 2.0, f64::exp, 100, Some(-5.0..5.0))
                .unwrap();
            assert!((x - 2f64.ln()).abs() < 1e-12);
        }
    }

    #[test]
    fn start_outside_bracket() {
        let x = newton_secant_bisection(
            0.0,
            |x| x * x * x - 2.0 * x - 5.0,
            |x| 3.0 * x * x - 2.0,
            100,
            Some(2.0..3.0),
        )
        .unwrap();
        assert!((x - 2.094_551_481_542_326_5).abs() < 1e-12);
    }

    #[test]
    fn overshoot_falls_back_to_interpolation() {
        // Newton from 1.5 jumps to about -1.69, outside the bracket.
        let x = newton_secant_bisection(1.5, f64::atan, |x| 1.0 / (1.0 + x * x), 100, Some(-1.0..3.0))
            .unwrap();
        assert!(x.abs() < 1e-12);
    }

    #[test]
    fn root_at_bracket_end() {
        let x = newton_secant_bisection(0.5, |x| x - 1.0, |_| 1.0, 10, Some(0.0..1.0)).unwrap();
        assert_eq!(x, 1.0);
        let x = newton_secant_bisection(0.0, |x| x * x * x, |x| 3.0 * x * x, 10, Some(-1.0..2.0))
            .unwrap();
        assert_eq!(x, 0.0);
    }

    #[test]
    fn bracket_errors() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;
        assert_eq!(
            newton_secant_bisection(1.0, f, df, 100, Some(2.0..1.0)),
            Err(Error::InvalidBracket { min: 2.0, max: 1.0 })
        );
        assert!(matches!(
            newton_secant_bisection(1.0, f, df, 100, Some(0.0..f64::INFINITY)),
            Err(Error::InvalidBracket { .. })
        ));
        assert_eq!(
            newton_secant_bisection(2.5, f, df, 100, Some(2.0..3.0)),
            Err(Error::BracketSameSign {
                f_min: 2.0,
                f_max: 7.0
            })
        );
    }

    #[test]
    fn zero_derivative() {
        assert_eq!(
            newton_secant_bisection(1.0, |x| x * x - 2.0, |_| 0.0, 100, None),
            Err(Error::DerivativeUnavailable { x: 1.0 })
        );
        // Only the first derivative is usable; the slope 2 is reused throughout.
        let df = |x: f64| if x == 1.0 { 2.0 } else { 0.0 };
        let x = newton_secant_bisection(1.0, |x| x * x - 2.0, df, 200, None).unwrap();
        assert!((x - 2f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn budget_exhaustion() {
        let err = newton_secant_bisection(100.0, |x| x * x - 2.0, |x| 2.0 * x, 2, None).unwrap_err();
        let Error::IterationBudgetExceeded {
            iterations,
            estimate: Some(estimate),
        } = err
        else {
            panic!("unexpected error {err:?}");
        };
        assert_eq!(iterations, 2);
        assert!(estimate > 2f64.sqrt() && estimate < 100.0);
    }

    fn bracket(f_min: f64, f_max: f64) -> Bracket {
        Bracket {
            min: 0.0,
            max: 4.0,
            f_min,
            f_max,
        }
    }

    #[test]
    fn interpolation_steps() {
        // Secant through (0, -1) and (4, 3).
        assert_eq!(bracket(-1.0, 3.0).interpolate(), 1.0);
        // Balanced ends bisect.
        assert_eq!(bracket(-2.0, 2.0).interpolate(), 2.0);
        assert_eq!(bracket(-2.0, 2.001).interpolate(), 2.0);
        assert_eq!(bracket(3.0, -2.999).interpolate(), 2.0);
        // Lopsided ends aim a quarter in from the smaller end.
        assert_eq!(bracket(-1.0, 100.0).interpolate(), 1.0);
        assert_eq!(bracket(-100.0, 1.0).interpolate(), 3.0);
        assert_eq!(bracket(60.0, -1.0).interpolate(), 3.0);
        // Just inside the ratio, the secant is used.
        let x = bracket(-40.0, 1.0).interpolate();
        assert!((x - 160.0 / 41.0).abs() < 1e-12);
        // An end that is already a root is returned as is.
        assert_eq!(bracket(0.0, 5.0).interpolate(), 0.0);
        assert_eq!(bracket(-5.0, 0.0).interpolate(), 4.0);
    }

    #[test]
    fn lopsided_bracket_converges() {
        // Newton from 1.5 lands near -1.69. With |atan(-0.01)| about a
        // hundredth of atan(1.5), the replacement step is aimed at 0.3675.
        let x = newton_secant_bisection(
            1.5,
            f64::atan,
            |x| 1.0 / (1.0 + x * x),
            100,
            Some(-0.01..1.5),
        )
        .unwrap();
        assert!(x.abs() < 1e-12);
    }
}
