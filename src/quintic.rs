// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quintic roots by repeated extraction of quadratic factors.
//!
//! This is Bairstow's method: Newton iteration on the coefficients `(u, v)`
//! of a trial divisor `x² + u x + v`, driving the remainder of the division
//! to zero. Each converged factor is divided out and the search starts over
//! on the quotient, two degrees lower.

use arrayvec::ArrayVec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::common::{snap_to_zero, DEFAULT_QUINTIC_SEED, MAX_BAIRSTOW_ITERATIONS};
use crate::{quartic_roots, Error, Root, Roots};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

const QUINTIC_LEN: usize = 6;

/// Find the real roots of `a x⁵ + b x⁴ + c x³ + d x² + e x + f = 0`.
///
/// The initial guesses come from a generator seeded with
/// [`DEFAULT_QUINTIC_SEED`](crate::common::DEFAULT_QUINTIC_SEED) on every
/// call, so the result is reproducible. Use [`quintic_roots_with_rng`] to
/// supply a different generator, for example to retry after a failure.
///
/// # Errors
///
/// [`Error::IterationBudgetExceeded`] if some quadratic factor doesn't
/// converge within [`MAX_BAIRSTOW_ITERATIONS`](crate::common::MAX_BAIRSTOW_ITERATIONS).
/// This is expected for roots of high multiplicity, where the iteration
/// stalls well above `epsilon`.
///
/// # Examples
///
/// ```
/// use polycurve::{quintic_roots, DEFAULT_EPSILON};
///
/// // (x - 1)(x - 2)(x - 3)(x - 4)(x - 5)
/// let roots = quintic_roots(1.0, -15.0, 85.0, -225.0, 274.0, -120.0, DEFAULT_EPSILON)
///     .unwrap()
///     .sorted();
/// assert_eq!(roots.len(), 5);
/// for (r, expected) in roots.iter().zip([1.0, 2.0, 3.0, 4.0, 5.0]) {
///     assert!((r - expected).abs() < 1e-9);
/// }
/// ```
pub fn quintic_roots(
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
    epsilon: f64,
) -> Result<Roots, Error> {
    let mut rng = SmallRng::seed_from_u64(DEFAULT_QUINTIC_SEED);
    quintic_roots_with_rng([a, b, c, d, e, f], epsilon, &mut rng)
}

/// Find the real roots of a quintic, drawing initial guesses from `rng`.
///
/// The coefficients are ordered from the `x⁵` term down to the constant.
/// Complex roots are dropped; see [`quintic_factor_roots`] to get them.
///
/// # Errors
///
/// [`Error::IterationBudgetExceeded`] if some quadratic factor doesn't converge.
pub fn quintic_roots_with_rng<R: Rng + ?Sized>(
    coeffs: [f64; QUINTIC_LEN],
    epsilon: f64,
    rng: &mut R,
) -> Result<Roots, Error> {
    let [a, b, c, d, e, f] = coeffs;
    if a.abs() <= epsilon {
        return Ok(quartic_roots(b, c, d, e, f, epsilon));
    }
    let mut result = Roots::new();
    for root in quintic_factor_roots(coeffs, epsilon, rng)? {
        if let Some(x) = root.real() {
            result.insert(x, epsilon);
        }
    }
    Ok(result)
}

/// Find all roots of a quintic, real and complex.
///
/// The coefficients are ordered from the `x⁵` term down to the constant.
/// Each complex conjugate pair is reported once. Roots are listed in the
/// order the factors were extracted, and repeated roots are not merged.
///
/// # Errors
///
/// [`Error::IterationBudgetExceeded`] if some quadratic factor doesn't
/// converge. No partial result is returned in that case.
pub fn quintic_factor_roots<R: Rng + ?Sized>(
    coeffs: [f64; QUINTIC_LEN],
    epsilon: f64,
    rng: &mut R,
) -> Result<ArrayVec<Root, 5>, Error> {
    let mut out = ArrayVec::new();
    // Work on the monic polynomial, constant term first.
    let lead = coeffs[0];
    let mut work: ArrayVec<f64, QUINTIC_LEN> = coeffs.iter().rev().map(|c| c / lead).collect();
    if !work.iter().all(|c| c.is_finite()) {
        return Ok(out);
    }
    while work.len() > 1 && work[0].abs() <= epsilon {
        out.push(Root::Real(0.0));
        work.remove(0);
    }
    while work.len() > 3 {
        let (u, v) = find_quadratic_factor(&work, epsilon, rng)?;
        push_factor_roots(&mut out, u, v, epsilon);
        let n = work.len() - 1;
        let quotient = divide_quadratic(&work, u, v);
        work = quotient[2..=n].iter().copied().collect();
    }
    match work.len() {
        3 => push_factor_roots(&mut out, work[1], work[0], epsilon),
        2 => out.push(Root::Real(-work[0])),
        _ => {}
    }
    Ok(out)
}

/// Run Bairstow iteration on the monic polynomial `coeffs` (constant first),
/// of degree at least 3.
fn find_quadratic_factor<R: Rng + ?Sized>(
    coeffs: &[f64],
    epsilon: f64,
    rng: &mut R,
) -> Result<(f64, f64), Error> {
    let n = coeffs.len() - 1;
    debug_assert!(n >= 3, "degree {n} is solved directly");
    let (mut u, mut v) = initial_guess(rng);
    for i in 0..MAX_BAIRSTOW_ITERATIONS {
        let b = divide_quadratic(coeffs, u, v);
        let g = divide_quadratic(&b[..=n], u, v);
        // Jacobian of the remainder (b[1], b[0]) with respect to (u, v).
        let det = g[2] * g[2] - g[1] * g[3];
        if det == 0.0 || !det.is_finite() {
            log::trace!("singular Jacobian at u = {u}, v = {v}; drawing a new guess");
            (u, v) = initial_guess(rng);
            continue;
        }
        let du = (b[1] * g[2] - b[0] * g[3]) / det;
        let dv = (b[0] * g[2] - b[1] * g[1]) / det;
        u += du;
        v += dv;
        if du.abs() < epsilon && dv.abs() < epsilon {
            log::trace!("quadratic factor x² + {u} x + {v} after {} iterations", i + 1);
            return Ok((u, v));
        }
    }
    log::debug!("Bairstow iteration on degree {n} did not converge");
    Err(Error::IterationBudgetExceeded {
        iterations: MAX_BAIRSTOW_ITERATIONS,
        estimate: None,
    })
}

fn initial_guess<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    (rng.random_range(0.5..=1.0), rng.random_range(0.5..=1.0))
}

/// Synthetic division by `x² + u x + v`.
///
/// With `b` the result, the quotient has coefficients `b[2..]` and the
/// remainder is `b[1] (x + u) + b[0]`.
fn divide_quadratic(coeffs: &[f64], u: f64, v: f64) -> [f64; QUINTIC_LEN] {
    let n = coeffs.len() - 1;
    let mut b = [0.0; QUINTIC_LEN];
    b[n] = coeffs[n];
    b[n - 1] = coeffs[n - 1] - u * b[n];
    for k in (0..n - 1).rev() {
        b[k] = coeffs[k] - u * b[k + 1] - v * b[k + 2];
    }
    b
}

/// Push the roots of `x² + u x + v`.
fn push_factor_roots(out: &mut ArrayVec<Root, 5>, u: f64, v: f64, epsilon: f64) {
    let disc = snap_to_zero(u * u - 4.0 * v, epsilon);
    if disc >= 0.0 {
        let q = -0.5 * (u + disc.sqrt().copysign(u));
        if q == 0.0 {
            out.push(Root::Real(0.0));
            out.push(Root::Real(0.0));
        } else {
            out.push(Root::Real(q));
            out.push(Root::Real(v / q));
        }
    } else {
        out.push(Root::Complex {
            re: -0.5 * u,
            im: 0.5 * (-disc).sqrt(),
        });
    }
}
