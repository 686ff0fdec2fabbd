// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion between Bernstein control points and power basis coefficients.
//!
//! A Bézier curve of degree `n` with control points `P_0 … P_n` is the
//! polynomial `Σ a_k t^k` with
//!
//! ```text
//! a_k = C(n, k) Σ_{i=0}^{k} (-1)^(k-i) C(k, i) P_i
//! ```
//!
//! and conversely `P_i = Σ_{k=0}^{i} C(i, k) / C(n, k) a_k`.
//!
//! The functions here work on anything that can be added, subtracted and
//! scaled: plain `f64` values for one coordinate at a time, or [`Vec2`] for
//! both at once.
//!
//! [`Vec2`]: crate::Vec2

use core::ops::{Add, Mul, Sub};

use arrayvec::ArrayVec;

use crate::common::MAX_BEZIER_DEGREE;
use crate::Error;

/// Storage for the control points or coefficients of a supported curve.
pub type BezierArray<T> = ArrayVec<T, { MAX_BEZIER_DEGREE + 1 }>;

/// The power basis coefficients of a Bézier curve.
///
/// The result has the same length as `control_points`, and the `t^k`
/// coefficient is at index `k`. The constant term is always the first
/// control point.
///
/// # Errors
///
/// [`Error::UnsupportedBezierDegree`] unless there are between 2 and 11
/// control points (degree 1 to 10).
///
/// # Examples
///
/// ```
/// use polycurve::bezier_coefficients;
///
/// // A cubic Bézier with control values 0, 1, 1, 0 is 3t - 3t².
/// let c = bezier_coefficients(&[0.0, 1.0, 1.0, 0.0]).unwrap();
/// assert_eq!(c.as_slice(), &[0.0, 3.0, -3.0, 0.0]);
/// ```
pub fn bezier_coefficients<T>(control_points: &[T]) -> Result<BezierArray<T>, Error>
where
    T: Copy + Default + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T>,
{
    check_degree(control_points.len())?;
    Ok((0..control_points.len())
        .map(|k| coefficient(control_points, k))
        .collect())
}

/// The Bézier control points of a polynomial given in the power basis.
///
/// This is the inverse of [`bezier_coefficients`]: the `t^k` coefficient
/// is at index `k`, and the result has one control point per coefficient.
///
/// # Errors
///
/// [`Error::UnsupportedBezierDegree`] unless there are between 2 and 11
/// coefficients.
///
/// # Examples
///
/// ```
/// use polycurve::bezier_control_points;
///
/// // t² on [0, 1] is the quadratic Bézier with control values 0, 0, 1.
/// let p = bezier_control_points(&[0.0, 0.0, 1.0]).unwrap();
/// assert_eq!(p.as_slice(), &[0.0, 0.0, 1.0]);
/// ```
pub fn bezier_control_points<T>(coeffs: &[T]) -> Result<BezierArray<T>, Error>
where
    T: Copy + Default + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T>,
{
    check_degree(coeffs.len())?;
    Ok((0..coeffs.len()).map(|i| control_point(coeffs, i)).collect())
}

/// [`bezier_coefficients`] for a fixed, known good degree.
pub(crate) fn power_basis<T, const N: usize>(control_points: [T; N]) -> [T; N]
where
    T: Copy + Default + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T>,
{
    core::array::from_fn(|k| coefficient(&control_points, k))
}

/// [`bezier_control_points`] for a fixed, known good degree.
pub(crate) fn from_power_basis<T, const N: usize>(coeffs: [T; N]) -> [T; N]
where
    T: Copy + Default + Add<Output = T> + Mul<f64, Output = T>,
{
    core::array::from_fn(|i| control_point(&coeffs, i))
}

/// The `t^k` coefficient of the curve with the given control points.
fn coefficient<T>(control_points: &[T], k: usize) -> T
where
    T: Copy + Default + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T>,
{
    let n = control_points.len() - 1;
    let mut sum = T::default();
    for (i, &p) in control_points[..=k].iter().enumerate() {
        let term = p * binomial(k, i);
        sum = if (k - i) % 2 == 0 { sum + term } else { sum - term };
    }
    sum * binomial(n, k)
}

/// Control point `i` of the curve with the given power basis coefficients.
fn control_point<T>(coeffs: &[T], i: usize) -> T
where
    T: Copy + Default + Add<Output = T> + Mul<f64, Output = T>,
{
    let n = coeffs.len() - 1;
    let mut sum = T::default();
    for (k, &a) in coeffs[..=i].iter().enumerate() {
        sum = sum + a * (binomial(i, k) / binomial(n, k));
    }
    sum
}

fn check_degree(len: usize) -> Result<(), Error> {
    if (2..=MAX_BEZIER_DEGREE + 1).contains(&len) {
        Ok(())
    } else {
        Err(Error::UnsupportedBezierDegree {
            control_points: len,
        })
    }
}

/// The binomial coefficient `C(n, k)`, exact for the small `n` used here.
fn binomial(n: usize, k: usize) -> f64 {
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 1..=k {
        result = result * (n + 1 - i) as f64 / i as f64;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::eval_poly;
    use arbitrary::Unstructured;

    use crate::{CubicBez, ParamCurve, Point, Vec2};

    #[test]
    fn binomials() {
        assert_eq!(binomial(0, 0), 1.0);
        assert_eq!(binomial(5, 2), 10.0);
        assert_eq!(binomial(10, 5), 252.0);
        assert_eq!(binomial(10, 10), 1.0);
        let row: ArrayVec<f64, 8> = (0..=7).map(|k| binomial(7, k)).collect();
        assert_eq!(row.as_slice(), &[1.0, 7.0, 21.0, 35.0, 35.0, 21.0, 7.0, 1.0]);
    }

    #[test]
    fn low_degrees() {
        assert_eq!(bezier_coefficients(&[2.0, 5.0]).unwrap().as_slice(), &[2.0, 3.0]);
        // p0 (1-t)² + 2 p1 t (1-t) + p2 t²
        assert_eq!(
            bezier_coefficients(&[1.0, 3.0, 2.0]).unwrap().as_slice(),
            &[1.0, 4.0, -3.0]
        );
        assert_eq!(
            bezier_coefficients(&[1.0, 2.0, 4.0, 8.0]).unwrap().as_slice(),
            &[1.0, 3.0, 3.0, 1.0]
        );
    }

    #[test]
    fn unsupported_degrees() {
        assert_eq!(
            bezier_coefficients::<f64>(&[]),
            Err(Error::UnsupportedBezierDegree { control_points: 0 })
        );
        assert_eq!(
            bezier_coefficients(&[1.0]),
            Err(Error::UnsupportedBezierDegree { control_points: 1 })
        );
        assert_eq!(
            bezier_control_points(&[0.0; 12]),
            Err(Error::UnsupportedBezierDegree { control_points: 12 })
        );
        assert_eq!(bezier_coefficients(&[0.0; 11]).unwrap().len(), 11);
    }

    #[test]
    fn matches_curve_evaluation() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 3.0), (4.0, -1.0), (6.0, 2.0));
        let points = [c.p0, c.p1, c.p2, c.p3].map(Point::to_vec2);
        let coeffs = bezier_coefficients(&points).unwrap();
        assert_eq!(coeffs[0], c.p0.to_vec2());
        let xs: ArrayVec<f64, 4> = coeffs.iter().map(|v| v.x).collect();
        let ys: ArrayVec<f64, 4> = coeffs.iter().map(|v| v.y).collect();
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            let p = c.eval(t);
            assert!((eval_poly(&xs, t) - p.x).abs() < 1e-12);
            assert!((eval_poly(&ys, t) - p.y).abs() < 1e-12);
        }
    }

    #[test]
    fn high_degree_endpoints() {
        // The curve passes through its first and last control points.
        let points: ArrayVec<f64, 11> = (0..11).map(|i| f64::from(i * i) - 3.0).collect();
        let coeffs = bezier_coefficients(&points).unwrap();
        assert_eq!(coeffs[0], points[0]);
        let end: f64 = coeffs.iter().sum();
        assert!((end - points[10]).abs() < 1e-9);
    }

    #[test]
    fn inverse_transform() {
        arbtest::arbtest(|u: &mut Unstructured<'_>| {
            let n: usize = u.int_in_range(2..=11)?;
            let mut points = BezierArray::<Vec2>::new();
            for _ in 0..n {
                let x = f64::from(u.int_in_range(-1000..=1000)?) / 10.0;
                let y = f64::from(u.int_in_range(-1000..=1000)?) / 10.0;
                points.push(Vec2::new(x, y));
            }
            let coeffs = bezier_coefficients(&points).unwrap();
            let back = bezier_control_points(&coeffs).unwrap();
            for (p, q) in points.iter().zip(&back) {
                assert!((*p - *q).hypot() < 1e-6, "{points:?} came back as {back:?}");
            }
            Ok(())
        });
    }
}
