// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform Catmull-Rom splines.

use alloc::vec::Vec;

use crate::{CubicBez, Point};

/// Convert a uniform Catmull-Rom spline through `points` into cubic Béziers.
///
/// There is one segment per pair of consecutive points. The segment from
/// `P_i` to `P_{i+1}` uses the neighbours `P_{i-1}` and `P_{i+2}` for its
/// tangents:
///
/// ```text
/// B_0 = P_i
/// B_1 = P_i + (P_{i+1} - P_{i-1}) / 6
/// B_2 = P_{i+1} - (P_{i+2} - P_i) / 6
/// B_3 = P_{i+1}
/// ```
///
/// The first and last points stand in for their own missing neighbours.
/// Fewer than two points produce no segments.
///
/// # Examples
///
/// ```
/// use polycurve::{catmull_rom_to_bezier, Point};
///
/// let points = [Point::new(0.0, 0.0), Point::new(6.0, 0.0), Point::new(6.0, 6.0)];
/// let segments = catmull_rom_to_bezier(&points);
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].p1, Point::new(1.0, 0.0));
/// assert_eq!(segments[0].p2, Point::new(5.0, -1.0));
/// assert_eq!(segments[1].p0, Point::new(6.0, 0.0));
/// ```
pub fn catmull_rom_to_bezier(points: &[Point]) -> Vec<CubicBez> {
    let Some(last) = points.len().checked_sub(1) else {
        return Vec::new();
    };
    (0..last)
        .map(|i| {
            let before = points[i.saturating_sub(1)];
            let p1 = points[i];
            let p2 = points[i + 1];
            let after = points[(i + 2).min(last)];
            CubicBez {
                p0: p1,
                p1: p1 + (p2 - before) * (1.0 / 6.0),
                p2: p2 - (after - p1) * (1.0 / 6.0),
                p3: p2,
            }
        })
        .collect()
}
