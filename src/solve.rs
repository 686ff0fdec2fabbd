// Copyright 2018 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed-form solvers for polynomials up to degree four.
//!
//! All of these take the coefficients from the highest degree term down to
//! the constant term, followed by the tolerance. A leading coefficient
//! within `epsilon` of zero falls back to the solver one degree lower.

use core::f64::consts::PI;

use crate::common::{eval_poly, snap_to_zero};
use crate::Roots;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Find the real root of `a x + b = 0`.
///
/// Returns an empty set when `|a| <= epsilon`: the line is parallel to the
/// axis, and either has no root or every value is a root.
pub fn linear_roots(a: f64, b: f64, epsilon: f64) -> Roots {
    let mut result = Roots::new();
    if a.abs() > epsilon {
        result.insert(-b / a, epsilon);
    }
    result
}

/// Find the real roots of `a x² + b x + c = 0`.
///
/// The discriminant of the normalized equation is snapped to zero within
/// `epsilon`, in which case the double root is reported once.
///
/// # Examples
///
/// ```
/// use polycurve::{quadratic_roots, DEFAULT_EPSILON};
///
/// let roots = quadratic_roots(1.0, -3.0, 2.0, DEFAULT_EPSILON);
/// assert_eq!(roots.sorted().as_slice(), &[1.0, 2.0]);
/// ```
pub fn quadratic_roots(a: f64, b: f64, c: f64, epsilon: f64) -> Roots {
    if a.abs() <= epsilon {
        return linear_roots(b, c, epsilon);
    }
    let mut result = Roots::new();
    let b = b / a;
    let c = c / a;
    let disc = snap_to_zero(b * b - 4.0 * c, epsilon);
    if disc > 0.0 {
        // See https://math.stackexchange.com/questions/866331
        let q = -0.5 * (b + disc.sqrt().copysign(b));
        result.insert(q, epsilon);
        result.insert(c / q, epsilon);
    } else if disc == 0.0 {
        result.insert(-0.5 * b, epsilon);
    }
    result
}

/// Find the real roots of `a x³ + b x² + c x + d = 0`.
///
/// With `Q` and `R` the usual resolvent terms of the depressed cubic, the
/// sign of `R² + Q³` picks the method:
///
/// - positive: Cardano's formula gives the one real root. The other two
///   form a complex pair and are only reported if their imaginary part is
///   within `epsilon` of zero.
/// - zero (within `epsilon`): a single and a double root.
/// - negative: three real roots, from the trigonometric form.
pub fn cubic_roots(a: f64, b: f64, c: f64, d: f64, epsilon: f64) -> Roots {
    if a.abs() <= epsilon {
        return quadratic_roots(b, c, d, epsilon);
    }
    let mut result = Roots::new();
    let (b, c, d) = (b / a, c / a, d / a);
    let q = (3.0 * c - b * b) * (1.0 / 9.0);
    let r = (9.0 * b * c - 27.0 * d - 2.0 * b * b * b) * (1.0 / 54.0);
    let disc = snap_to_zero(q * q * q + r * r, epsilon);
    let offset = b * (1.0 / 3.0);
    if disc > 0.0 {
        // Pick the cube root that doesn't cancel, and get the other from s t = -q.
        let s = (r + disc.sqrt().copysign(r)).cbrt();
        let t = if s == 0.0 { 0.0 } else { -q / s };
        result.insert(s + t - offset, epsilon);
        let im = 0.5 * 3.0f64.sqrt() * (s - t);
        if im.abs() <= epsilon {
            result.insert(-0.5 * (s + t) - offset, epsilon);
        }
    } else if disc == 0.0 {
        let s = r.cbrt();
        result.insert(2.0 * s - offset, epsilon);
        result.insert(-s - offset, epsilon);
    } else {
        // Here q < 0, so the square root is real.
        let m = (-q * q * q).sqrt();
        let theta = (r / m).clamp(-1.0, 1.0).acos();
        let scale = 2.0 * (-q).sqrt();
        for k in [0.0, 1.0, 2.0] {
            let angle = (theta + 2.0 * PI * k) * (1.0 / 3.0);
            result.insert(scale * angle.cos() - offset, epsilon);
        }
    }
    result
}

/// Find the real roots of `a x⁴ + b x³ + c x² + d x + e = 0`.
///
/// This is Ferrari's method: one root `y` of the resolvent cubic splits
/// the quartic into two quadratics. Every square root is taken of a value
/// snapped to zero within `epsilon`, so tiny negative values from rounding
/// don't lose roots. The roots are polished with a few Newton steps, as the
/// method is prone to cancellation.
///
/// # Examples
///
/// ```
/// use polycurve::{quartic_roots, DEFAULT_EPSILON};
///
/// // (x - 1)(x - 2)(x - 3)(x - 4)
/// let roots = quartic_roots(1.0, -10.0, 35.0, -50.0, 24.0, DEFAULT_EPSILON).sorted();
/// assert_eq!(roots.len(), 4);
/// for (r, expected) in roots.iter().zip([1.0, 2.0, 3.0, 4.0]) {
///     assert!((r - expected).abs() < 1e-12);
/// }
/// ```
pub fn quartic_roots(a: f64, b: f64, c: f64, d: f64, e: f64, epsilon: f64) -> Roots {
    if a.abs() <= epsilon {
        return cubic_roots(b, c, d, e, epsilon);
    }
    let mut result = Roots::new();
    let (b, c, d, e) = (b / a, c / a, d / a, e / a);

    // Resolvent cubic y³ - c y² + (b d - 4 e) y - (b² e - 4 c e + d²) = 0.
    // The largest of its real roots makes b²/4 - c + y non-negative.
    let resolvent = [-(b * b * e - 4.0 * c * e + d * d), b * d - 4.0 * e, -c, 1.0];
    let Some(y) = cubic_roots(1.0, resolvent[2], resolvent[1], resolvent[0], epsilon)
        .iter()
        .copied()
        .reduce(f64::max)
    else {
        return result;
    };
    let y = polish_root(&resolvent, y);

    let r2 = snap_to_zero(0.25 * b * b - c + y, epsilon);
    if r2 < 0.0 {
        return result;
    }
    let (r, d2, e2) = if r2 > 0.0 {
        let r = r2.sqrt();
        let base = 0.75 * b * b - r2 - 2.0 * c;
        let t = (4.0 * b * c - 8.0 * d - b * b * b) / (4.0 * r);
        (r, base + t, base - t)
    } else {
        let z = snap_to_zero(y * y - 4.0 * e, epsilon);
        if z < 0.0 {
            return result;
        }
        let base = 0.75 * b * b - 2.0 * c;
        let t = 2.0 * z.sqrt();
        (0.0, base + t, base - t)
    };

    let coeffs = [e, d, c, b, 1.0];
    let mut push = |x: f64| {
        result.insert(polish_root(&coeffs, x), epsilon);
    };
    let d2 = snap_to_zero(d2, epsilon);
    if d2 >= 0.0 {
        let s = d2.sqrt();
        push(-0.25 * b + 0.5 * (r + s));
        push(-0.25 * b + 0.5 * (r - s));
    }
    let e2 = snap_to_zero(e2, epsilon);
    if e2 >= 0.0 {
        let s = e2.sqrt();
        push(-0.25 * b - 0.5 * (r - s));
        push(-0.25 * b - 0.5 * (r + s));
    }
    result
}

/// Refine a root with a few Newton steps, keeping only steps that improve it.
///
/// The coefficient of `x^i` is at index `i`.
fn polish_root(coeffs: &[f64], mut x: f64) -> f64 {
    let mut y = eval_poly(coeffs, x);
    for _ in 0..3 {
        if y == 0.0 {
            break;
        }
        let mut dy = 0.0;
        for (i, c) in coeffs.iter().enumerate().skip(1).rev() {
            dy = dy * x + c * i as f64;
        }
        let x_new = x - y / dy;
        let y_new = eval_poly(coeffs, x_new);
        if y_new.is_nan() || y_new.abs() >= y.abs() {
            break;
        }
        x = x_new;
        y = y_new;
    }
    x
}
