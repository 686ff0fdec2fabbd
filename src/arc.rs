// Copyright 2019 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An ellipse arc.

use core::f64::consts::FRAC_PI_2;

use smallvec::SmallVec;

use crate::{CubicBez, Point, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A single elliptical arc segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    /// The arc's centre point.
    pub center: Point,
    /// The arc's radii, where the vector's x-component is the radius in the
    /// positive x direction after applying `x_rotation`.
    pub radii: Vec2,
    /// The start angle in radians.
    pub start_angle: f64,
    /// The angle between the start and end of the arc, in radians.
    pub sweep_angle: f64,
    /// How much the arc is rotated, in radians.
    pub x_rotation: f64,
}

impl Arc {
    /// Create a new `Arc`.
    #[inline(always)]
    pub fn new(
        center: impl Into<Point>,
        radii: impl Into<Vec2>,
        start_angle: f64,
        sweep_angle: f64,
        x_rotation: f64,
    ) -> Self {
        Self {
            center: center.into(),
            radii: radii.into(),
            start_angle,
            sweep_angle,
            x_rotation,
        }
    }

    /// Create an iterator generating cubic Bézier segments approximating
    /// this arc.
    ///
    /// The arc is split into the fewest equal pieces of at most a quarter
    /// turn each. Each piece is approximated following L. Maisonobe,
    /// "Drawing an elliptical arc using polylines, quadratic or cubic
    /// Bézier curves": for a piece subtending `θ`, the inner control points
    /// lie along the end tangents at
    /// `α = sin θ (√(4 + 3 tan²(θ/2)) − 1) / 3` times the derivative of the
    /// ellipse parametrization.
    ///
    /// Consecutive segments share their end points exactly. A zero or
    /// non-finite sweep produces no segments, and so does a sweep of more
    /// than 1024 full turns.
    pub fn append_iter(&self) -> ArcAppendIter {
        let n = segment_count(self.sweep_angle);
        let angle_step = if n == 0 {
            0.0
        } else {
            self.sweep_angle / n as f64
        };
        let alpha = angle_step.sin() * ((4.0 + 3.0 * (0.5 * angle_step).tan().powi(2)).sqrt() - 1.0)
            / 3.0;
        let (sin, cos) = self.x_rotation.sin_cos();
        let ellipse = Ellipse {
            center: self.center,
            radii: self.radii,
            cos,
            sin,
        };
        ArcAppendIter {
            idx: 0,
            n,
            p0: ellipse.sample(self.start_angle),
            ellipse,
            alpha,
            start_angle: self.start_angle,
            angle_step,
        }
    }

    /// Converts an `Arc` into a series of cubic Bézier segments.
    ///
    /// The closure is invoked with the three trailing control points of each
    /// segment; the first segment starts at the arc's start point, and each
    /// following one at the previous end point.
    pub fn to_cubic_beziers<P>(&self, mut p: P)
    where
        P: FnMut(Point, Point, Point),
    {
        for c in self.append_iter() {
            p(c.p1, c.p2, c.p3);
        }
    }
}

/// Approximate an elliptical arc, axis-aligned, with cubic Bézier segments.
///
/// See [`Arc::append_iter`] for how the arc is split.
///
/// # Examples
///
/// ```
/// use polycurve::{elliptical_arc_to_cubic_beziers, Point, Vec2};
/// use std::f64::consts::PI;
///
/// let segments = elliptical_arc_to_cubic_beziers(Point::ZERO, Vec2::new(2.0, 1.0), 0.0, PI);
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].p0, Point::new(2.0, 0.0));
/// assert_eq!(segments[0].p3, segments[1].p0);
/// assert!((segments[1].p3 - Point::new(-2.0, 0.0)).hypot() < 1e-12);
/// ```
pub fn elliptical_arc_to_cubic_beziers(
    center: Point,
    radii: Vec2,
    start_angle: f64,
    sweep_angle: f64,
) -> SmallVec<[CubicBez; 4]> {
    Arc::new(center, radii, start_angle, sweep_angle, 0.0)
        .append_iter()
        .collect()
}

/// Sweeps of more than this many full turns are not approximated.
const MAX_TURNS: f64 = 1024.0;

/// The number of pieces of at most a quarter turn covering `sweep_angle`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the value is at most 4 * MAX_TURNS"
)]
fn segment_count(sweep_angle: f64) -> usize {
    let quarters = sweep_angle.abs() / FRAC_PI_2;
    if !(quarters <= 4.0 * MAX_TURNS) {
        log::debug!("not approximating an arc sweeping {sweep_angle} radians");
        return 0;
    }
    quarters.ceil() as usize
}

#[derive(Clone, Copy, Debug)]
struct Ellipse {
    center: Point,
    radii: Vec2,
    cos: f64,
    sin: f64,
}

impl Ellipse {
    fn sample(&self, angle: f64) -> Point {
        let (s, c) = angle.sin_cos();
        self.center + Vec2::new(self.radii.x * c, self.radii.y * s).rotate(self.cos, self.sin)
    }

    /// Derivative of the parametrization with respect to the angle.
    fn tangent(&self, angle: f64) -> Vec2 {
        let (s, c) = angle.sin_cos();
        Vec2::new(-self.radii.x * s, self.radii.y * c).rotate(self.cos, self.sin)
    }
}

/// An iterator over the cubic Bézier segments approximating an [`Arc`].
///
/// Created by [`Arc::append_iter`].
#[derive(Clone, Debug)]
pub struct ArcAppendIter {
    idx: usize,
    n: usize,
    p0: Point,
    ellipse: Ellipse,
    alpha: f64,
    start_angle: f64,
    angle_step: f64,
}

impl Iterator for ArcAppendIter {
    type Item = CubicBez;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.n {
            return None;
        }
        let angle0 = self.start_angle + self.idx as f64 * self.angle_step;
        let angle1 = self.start_angle + (self.idx + 1) as f64 * self.angle_step;
        let p0 = self.p0;
        let p3 = self.ellipse.sample(angle1);
        let p1 = p0 + self.alpha * self.ellipse.tangent(angle0);
        let p2 = p3 - self.alpha * self.ellipse.tangent(angle1);
        self.p0 = p3;
        self.idx += 1;
        Some(CubicBez { p0, p1, p2, p3 })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.n - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ArcAppendIter {}

#[cfg(test)]
mod tests {
    use core::f64::consts::PI;

    use super::*;
    use crate::ParamCurve;

    fn point_on(arc: &Arc, angle: f64) -> Point {
        let (sin, cos) = arc.x_rotation.sin_cos();
        Ellipse {
            center: arc.center,
            radii: arc.radii,
            cos,
            sin,
        }
        .sample(angle)
    }

    #[test]
    fn half_turn_is_contiguous() {
        let arc = Arc::new((1.0, -2.0), (3.0, 1.5), 0.3, PI, 0.0);
        let segments: SmallVec<[CubicBez; 4]> = arc.append_iter().collect();
        assert!(segments.len() >= 2);
        assert_eq!(segments[0].p0, point_on(&arc, arc.start_angle));
        for pair in segments.windows(2) {
            assert_eq!(pair[0].p3, pair[1].p0);
        }
        let end = point_on(&arc, arc.start_angle + arc.sweep_angle);
        assert!((segments[segments.len() - 1].p3 - end).hypot() < 1e-12);
    }

    #[test]
    fn segment_counts() {
        let count = |sweep| Arc::new(Point::ZERO, (1.0, 1.0), 0.0, sweep, 0.0).append_iter().len();
        assert_eq!(count(0.0), 0);
        assert_eq!(count(f64::NAN), 0);
        assert_eq!(count(f64::INFINITY), 0);
        assert_eq!(count(0.1), 1);
        assert_eq!(count(FRAC_PI_2), 1);
        assert_eq!(count(FRAC_PI_2 + 1e-9), 2);
        assert_eq!(count(-PI), 2);
        assert_eq!(count(2.0 * PI), 4);
        assert_eq!(count(100.0 * 2.0 * PI), 400);
    }

    #[test]
    fn huge_sweep() {
        let count = |sweep| Arc::new(Point::ZERO, (1.0, 1.0), 0.0, sweep, 0.0).append_iter().len();
        assert_eq!(count(2048.0 * PI), 4096);
        assert_eq!(count(1e300), 0);
        assert_eq!(count(-1e300), 0);
        let segments = elliptical_arc_to_cubic_beziers(Point::ZERO, Vec2::new(1.0, 1.0), 0.0, 1e300);
        assert!(segments.is_empty());
    }

    #[test]
    fn quarter_circle() {
        let arc = Arc::new(Point::ZERO, (1.0, 1.0), 0.0, FRAC_PI_2, 0.0);
        let segments: SmallVec<[CubicBez; 4]> = arc.append_iter().collect();
        assert_eq!(segments.len(), 1);
        let c = segments[0];
        let alpha = (7f64.sqrt() - 1.0) / 3.0;
        assert!((c.p1 - Point::new(1.0, alpha)).hypot() < 1e-12);
        assert!((c.p2 - Point::new(alpha, 1.0)).hypot() < 1e-12);
        for i in 0..=20 {
            let r = c.eval(f64::from(i) / 20.0).to_vec2().hypot();
            assert!((r - 1.0).abs() < 2.5e-3, "radius {r}");
        }
    }

    #[test]
    fn clockwise_sweep() {
        let segments = elliptical_arc_to_cubic_beziers(Point::ZERO, Vec2::new(1.0, 1.0), 0.0, -PI);
        assert_eq!(segments.len(), 2);
        // The first quarter runs through negative y.
        assert!(segments[0].eval(0.5).y < -0.7);
        assert!((segments[1].p3 - Point::new(-1.0, 0.0)).hypot() < 1e-12);
    }

    #[test]
    fn rotated_ellipse() {
        let arc = Arc::new((1.0, 1.0), (2.0, 1.0), 0.0, FRAC_PI_2, FRAC_PI_2);
        let mut ends = SmallVec::<[Point; 4]>::new();
        arc.to_cubic_beziers(|_, _, p3| ends.push(p3));
        assert_eq!(ends.len(), 1);
        // The major axis now points along y, and the arc ends at angle π/2
        // on the rotated minor axis.
        assert!((arc.append_iter().next().unwrap().p0 - Point::new(1.0, 3.0)).hypot() < 1e-12);
        assert!((ends[0] - Point::new(0.0, 1.0)).hypot() < 1e-12);
    }
}
