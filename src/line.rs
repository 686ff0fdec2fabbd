// Copyright 2018 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines.

use core::ops::Range;

use arrayvec::ArrayVec;

use crate::{roots, CubicBez, ParamCurve, ParamCurveDeriv, Point, Vec2, DEFAULT_EPSILON};

/// How far outside 0..1 a parameter may be and still count as an intersection.
const INTERSECTION_EPSILON: f64 = 1e-9;

/// A single line.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// The line's start point.
    pub p0: Point,
    /// The line's end point.
    pub p1: Point,
}

impl Line {
    /// Create a new line.
    #[inline(always)]
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Line {
        Line {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// Raise the order to 3.
    ///
    /// Returns a cubic Bézier segment that exactly represents this line,
    /// with its inner control points at one and two thirds of the way.
    #[inline]
    pub fn raise(&self) -> CubicBez {
        CubicBez::new(
            self.p0,
            self.p0.lerp(self.p1, 1.0 / 3.0),
            self.p0.lerp(self.p1, 2.0 / 3.0),
            self.p1,
        )
    }

    /// The length of the line.
    #[inline]
    pub fn length(self) -> f64 {
        self.p0.distance(self.p1)
    }

    /// Intersections with the polynomial curve `Σ coeffs[k] t^k`, `t` in 0..1.
    ///
    /// The signed distance of the curve from the line is itself a polynomial
    /// in `t`, so the crossings are its roots. Results are ordered by `t`.
    pub(crate) fn crossings(&self, coeffs: &[Vec2]) -> ArrayVec<LineIntersection, 3> {
        let mut result = ArrayVec::new();
        let d = self.p1 - self.p0;
        let d2 = d.hypot2();
        if d2 == 0.0 {
            return result;
        }
        let mut poly: ArrayVec<f64, 4> = coeffs.iter().map(|a| d.cross(*a)).collect();
        poly[0] -= d.cross(self.p0.to_vec2());
        let in_range = -INTERSECTION_EPSILON..=1.0 + INTERSECTION_EPSILON;
        for segment_t in roots(&poly, DEFAULT_EPSILON).sorted() {
            if !in_range.contains(&segment_t) {
                continue;
            }
            let p = coeffs
                .iter()
                .rev()
                .fold(Vec2::ZERO, |acc, &a| acc * segment_t + a);
            let line_t = (p - self.p0.to_vec2()).dot(d) / d2;
            if in_range.contains(&line_t) {
                result.push(LineIntersection::new(line_t, segment_t.clamp(0.0, 1.0)));
            }
        }
        result
    }
}

impl ParamCurve for Line {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    #[inline]
    fn subsegment(&self, range: Range<f64>) -> Line {
        Line {
            p0: self.eval(range.start),
            p1: self.eval(range.end),
        }
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p1
    }
}

impl ParamCurveDeriv for Line {
    type DerivResult = ConstPoint;

    #[inline]
    fn deriv(&self) -> ConstPoint {
        ConstPoint((self.p1 - self.p0).to_point())
    }
}

/// A trivial "curve" that is just a constant.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstPoint(Point);

impl ConstPoint {
    /// Is this point [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl ParamCurve for ConstPoint {
    #[inline(always)]
    fn eval(&self, _t: f64) -> Point {
        self.0
    }

    #[inline(always)]
    fn subsegment(&self, _range: Range<f64>) -> ConstPoint {
        *self
    }
}

impl ParamCurveDeriv for ConstPoint {
    type DerivResult = ConstPoint;

    #[inline(always)]
    fn deriv(&self) -> ConstPoint {
        ConstPoint(Point::ZERO)
    }
}

/// An intersection of a [`Line`] and a curve segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineIntersection {
    /// The parameter of the intersection on the line.
    ///
    /// If the intersection is in the interior of the line, this is in the
    /// range 0..1.
    pub line_t: f64,

    /// The parameter of the intersection on the segment.
    pub segment_t: f64,
}

impl LineIntersection {
    /// Create a new intersection.
    #[inline(always)]
    pub fn new(line_t: f64, segment_t: f64) -> Self {
        LineIntersection { line_t, segment_t }
    }
}
