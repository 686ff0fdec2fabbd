// Copyright 2018 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadratic Bézier segments.

use core::ops::Range;

use arrayvec::ArrayVec;

use crate::bezier::power_basis;
use crate::{CubicBez, Line, LineIntersection, ParamCurve, ParamCurveDeriv, Point, Vec2};

/// A single quadratic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadBez {
    /// The start point.
    pub p0: Point,
    /// The control point.
    pub p1: Point,
    /// The end point.
    pub p2: Point,
}

impl QuadBez {
    /// Create a new quadratic Bézier segment.
    #[inline(always)]
    pub fn new<V: Into<Point>>(p0: V, p1: V, p2: V) -> QuadBez {
        QuadBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
        }
    }

    /// Raise the order by 1.
    ///
    /// Returns a cubic Bézier segment that exactly represents this quadratic.
    #[inline]
    pub fn raise(&self) -> CubicBez {
        CubicBez::new(
            self.p0,
            self.p0 + (2.0 / 3.0) * (self.p1 - self.p0),
            self.p2 + (2.0 / 3.0) * (self.p1 - self.p2),
            self.p2,
        )
    }

    /// The coefficients of `1`, `t` and `t²` when this curve is written as
    /// a polynomial in `t`.
    #[inline]
    pub fn power_coefficients(&self) -> [Vec2; 3] {
        power_basis([self.p0, self.p1, self.p2].map(Point::to_vec2))
    }

    /// Find the intersections of this curve with a line.
    ///
    /// Only intersections within both segments are reported, ordered by
    /// their parameter on this curve.
    pub fn intersect_line(&self, line: Line) -> ArrayVec<LineIntersection, 3> {
        line.crossings(&self.power_coefficients())
    }

    /// Is this quadratic Bézier curve [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite() && self.p2.is_finite()
    }
}

/// Elevate the quadratic Bézier with control points `p0`, `p1`, `p2` to
/// an equivalent cubic.
///
/// The end points are kept exactly, and the tangents at both ends are
/// unchanged.
///
/// # Examples
///
/// ```
/// use polycurve::{quadratic_to_cubic, ParamCurve, Point};
///
/// let c = quadratic_to_cubic(Point::new(0.0, 0.0), Point::new(3.0, 3.0), Point::new(6.0, 0.0));
/// assert_eq!(c.p1, Point::new(2.0, 2.0));
/// assert_eq!(c.p2, Point::new(4.0, 2.0));
/// assert_eq!(c.eval(1.0), Point::new(6.0, 0.0));
/// ```
#[inline]
pub fn quadratic_to_cubic(p0: Point, p1: Point, p2: Point) -> CubicBez {
    QuadBez::new(p0, p1, p2).raise()
}

impl ParamCurve for QuadBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        (self.p0.to_vec2() * (mt * mt)
            + (self.p1.to_vec2() * (mt * 2.0) + self.p2.to_vec2() * t) * t)
            .to_point()
    }

    fn subsegment(&self, range: Range<f64>) -> QuadBez {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p2 = self.eval(t1);
        let p1 = p0 + (self.p1 - self.p0).lerp(self.p2 - self.p1, t0) * (t1 - t0);
        QuadBez { p0, p1, p2 }
    }

    /// Subdivide into halves, using de Casteljau.
    #[inline]
    fn subdivide(&self) -> (QuadBez, QuadBez) {
        let pm = self.eval(0.5);
        (
            QuadBez::new(self.p0, self.p0.midpoint(self.p1), pm),
            QuadBez::new(pm, self.p1.midpoint(self.p2), self.p2),
        )
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p2
    }
}

impl ParamCurveDeriv for QuadBez {
    type DerivResult = Line;

    #[inline]
    fn deriv(&self) -> Line {
        Line::new(
            (2.0 * (self.p1 - self.p0)).to_point(),
            (2.0 * (self.p2 - self.p1)).to_point(),
        )
    }
}
