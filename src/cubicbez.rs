// Copyright 2018 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use core::ops::Range;

use arrayvec::ArrayVec;

use crate::bezier::{from_power_basis, power_basis};
use crate::{
    quadratic_roots, Line, LineIntersection, ParamCurve, ParamCurveDeriv, Point, QuadBez, Vec2,
    DEFAULT_EPSILON,
};

/// A single cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBez {
    /// The start point.
    pub p0: Point,
    /// The first control point.
    pub p1: Point,
    /// The second control point.
    pub p2: Point,
    /// The end point.
    pub p3: Point,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline(always)]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> CubicBez {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// The coefficients of `1`, `t`, `t²` and `t³` when this curve is
    /// written as a polynomial in `t`.
    ///
    /// # Examples
    ///
    /// ```
    /// use polycurve::{CubicBez, Vec2};
    ///
    /// let c = CubicBez::new((0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 0.0));
    /// let [a0, a1, a2, a3] = c.power_coefficients();
    /// assert_eq!(a0, Vec2::ZERO);
    /// assert_eq!(a1, Vec2::new(3.0, 3.0));
    /// assert_eq!(a2, Vec2::new(0.0, -3.0));
    /// assert_eq!(a3, Vec2::ZERO);
    /// ```
    #[inline]
    pub fn power_coefficients(&self) -> [Vec2; 4] {
        power_basis([self.p0, self.p1, self.p2, self.p3].map(Point::to_vec2))
    }

    /// The cubic Bézier segment tracing `Σ coeffs[k] t^k` for `t` in 0..1.
    ///
    /// This is the inverse of [`CubicBez::power_coefficients`].
    #[inline]
    pub fn from_power_coefficients(coeffs: [Vec2; 4]) -> CubicBez {
        let [p0, p1, p2, p3] = from_power_basis(coeffs).map(Vec2::to_point);
        CubicBez { p0, p1, p2, p3 }
    }

    /// Parameter values in the open interval 0..1 where the curve's tangent
    /// is horizontal or vertical, in increasing order.
    pub fn extrema(&self) -> ArrayVec<f64, 4> {
        fn one_coord(result: &mut ArrayVec<f64, 4>, d0: f64, d1: f64, d2: f64) {
            let a = d0 - 2.0 * d1 + d2;
            let b = 2.0 * (d1 - d0);
            let c = d0;
            for &t in &quadratic_roots(a, b, c, DEFAULT_EPSILON) {
                if t > 0.0 && t < 1.0 {
                    result.push(t);
                }
            }
        }
        let mut result = ArrayVec::new();
        let d0 = self.p1 - self.p0;
        let d1 = self.p2 - self.p1;
        let d2 = self.p3 - self.p2;
        one_coord(&mut result, d0.x, d1.x, d2.x);
        one_coord(&mut result, d0.y, d1.y, d2.y);
        result.sort_unstable_by(f64::total_cmp);
        result
    }

    /// Find the intersections of this curve with a line.
    ///
    /// Only intersections within both segments are reported, ordered by
    /// their parameter on this curve.
    ///
    /// # Examples
    ///
    /// ```
    /// use polycurve::{CubicBez, Line};
    ///
    /// let c = CubicBez::new((0.0, 0.0), (1.0, 2.0), (2.0, -2.0), (3.0, 0.0));
    /// let hits = c.intersect_line(Line::new((-1.0, 0.0), (4.0, 0.0)));
    /// assert_eq!(hits.len(), 3);
    /// assert!((hits[1].segment_t - 0.5).abs() < 1e-12);
    /// ```
    pub fn intersect_line(&self, line: Line) -> ArrayVec<LineIntersection, 3> {
        line.crossings(&self.power_coefficients())
    }

    /// Is this cubic Bézier curve [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite() && self.p2.is_finite() && self.p3.is_finite()
    }
}

impl ParamCurve for CubicBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let v = self.p0.to_vec2() * (mt * mt * mt)
            + (self.p1.to_vec2() * (mt * mt * 3.0)
                + (self.p2.to_vec2() * (mt * 3.0) + self.p3.to_vec2() * t) * t)
                * t;
        v.to_point()
    }

    fn subsegment(&self, range: Range<f64>) -> CubicBez {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p3 = self.eval(t1);
        let d = self.deriv();
        let scale = (t1 - t0) * (1.0 / 3.0);
        let p1 = p0 + scale * d.eval(t0).to_vec2();
        let p2 = p3 - scale * d.eval(t1).to_vec2();
        CubicBez { p0, p1, p2, p3 }
    }

    /// Subdivide into halves, using de Casteljau.
    #[inline]
    fn subdivide(&self) -> (CubicBez, CubicBez) {
        let pm = self.eval(0.5);
        (
            CubicBez::new(
                self.p0,
                self.p0.midpoint(self.p1),
                ((self.p0.to_vec2() + self.p1.to_vec2() * 2.0 + self.p2.to_vec2()) * 0.25)
                    .to_point(),
                pm,
            ),
            CubicBez::new(
                pm,
                ((self.p1.to_vec2() + self.p2.to_vec2() * 2.0 + self.p3.to_vec2()) * 0.25)
                    .to_point(),
                self.p2.midpoint(self.p3),
                self.p3,
            ),
        )
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p3
    }
}

impl ParamCurveDeriv for CubicBez {
    type DerivResult = QuadBez;

    #[inline]
    fn deriv(&self) -> QuadBez {
        QuadBez::new(
            (3.0 * (self.p1 - self.p0)).to_point(),
            (3.0 * (self.p2 - self.p1)).to_point(),
            (3.0 * (self.p3 - self.p2)).to_point(),
        )
    }
}
