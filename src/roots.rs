// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Real root sets, and solving a polynomial by its effective degree.

use core::ops::Deref;

use arrayvec::ArrayVec;

use crate::degree::effective_len;
use crate::{
    cubic_roots, linear_roots, quadratic_roots, quartic_roots, quintic_roots, Degree, Error,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// The largest number of real roots any of the solvers can report.
pub const MAX_ROOTS: usize = 5;

/// A set of distinct real roots.
///
/// Candidates within `epsilon` of a root already in the set are dropped,
/// so a double root found by two branches of a solver is only reported
/// once. The order of the roots is unspecified; use [`Roots::sorted`] if
/// it matters.
#[derive(Clone, Debug, Default)]
pub struct Roots {
    roots: ArrayVec<f64, MAX_ROOTS>,
}

impl Roots {
    /// An empty root set.
    #[inline]
    pub const fn new() -> Roots {
        Roots {
            roots: ArrayVec::new_const(),
        }
    }

    /// Add a root, unless it is not finite or already present within `epsilon`.
    ///
    /// Returns `true` if the root was added.
    pub fn insert(&mut self, root: f64, epsilon: f64) -> bool {
        if !root.is_finite() || self.contains(root, epsilon) {
            return false;
        }
        self.roots.try_push(root).is_ok()
    }

    /// Whether some root is within `tolerance` of `x`.
    pub fn contains(&self, x: f64, tolerance: f64) -> bool {
        self.roots.iter().any(|r| (r - x).abs() <= tolerance)
    }

    /// The roots in increasing order.
    pub fn sorted(&self) -> ArrayVec<f64, MAX_ROOTS> {
        let mut sorted = self.roots.clone();
        sorted.sort_unstable_by(f64::total_cmp);
        sorted
    }
}

impl Deref for Roots {
    type Target = [f64];

    #[inline]
    fn deref(&self) -> &[f64] {
        &self.roots
    }
}

impl IntoIterator for Roots {
    type Item = f64;
    type IntoIter = arrayvec::IntoIter<f64, MAX_ROOTS>;

    fn into_iter(self) -> Self::IntoIter {
        self.roots.into_iter()
    }
}

impl<'a> IntoIterator for &'a Roots {
    type Item = &'a f64;
    type IntoIter = core::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.roots.iter()
    }
}

/// A root that is either real or one of a complex conjugate pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Root {
    /// A real root.
    Real(f64),
    /// The pair `re ± im·i`, with `im > 0`.
    Complex {
        /// The shared real part.
        re: f64,
        /// The magnitude of the imaginary part.
        im: f64,
    },
}

impl Root {
    /// The real value, if this root is real.
    pub fn real(self) -> Option<f64> {
        match self {
            Root::Real(x) => Some(x),
            Root::Complex { .. } => None,
        }
    }
}

/// Find the real roots of a polynomial.
///
/// The coefficient of `x^i` is at index `i`, so `[2.0, -3.0, 1.0]` is
/// `x² - 3x + 2`. The degree is classified first (see
/// [`classify_degree`](crate::classify_degree)), and the matching solver
/// is used.
///
/// This returns an empty set both when there are no real roots and when
/// none could be computed: polynomials of degree six or more, and quintics
/// on which the deflation iteration did not converge. Use [`try_roots`] to
/// tell these cases apart.
///
/// The deflation iteration converges on an absolute step size of
/// `epsilon`. Near a root of high multiplicity, such as `(x - 1)⁵`, the
/// steps stall far above that, so such quintics come back empty even
/// though they have real roots.
///
/// # Examples
///
/// ```
/// use polycurve::{roots, DEFAULT_EPSILON};
///
/// let r = roots(&[-6.0, 11.0, -6.0, 1.0], DEFAULT_EPSILON).sorted();
/// assert_eq!(r.len(), 3);
/// assert!((r[0] - 1.0).abs() < 1e-12);
/// assert!((r[1] - 2.0).abs() < 1e-12);
/// assert!((r[2] - 3.0).abs() < 1e-12);
/// ```
pub fn roots(coeffs: &[f64], epsilon: f64) -> Roots {
    match try_roots(coeffs, epsilon) {
        Ok(roots) => roots,
        Err(e) => {
            log::debug!("no roots reported for {} coefficients: {e}", coeffs.len());
            Roots::new()
        }
    }
}

/// Find the real roots of a polynomial, reporting why none could be found.
///
/// Same as [`roots`], except that an unsupported degree or a failed
/// quintic deflation is an error rather than an empty set.
///
/// # Errors
///
/// [`Error::UnsupportedDegree`] for polynomials of effective degree six or
/// more, and [`Error::IterationBudgetExceeded`] if the quintic solver fails.
pub fn try_roots(coeffs: &[f64], epsilon: f64) -> Result<Roots, Error> {
    let len = effective_len(coeffs, epsilon);
    let c = &coeffs[..len];
    let degree = Degree::from_order(len.saturating_sub(1));
    match degree {
        Degree::Constant => Ok(Roots::new()),
        Degree::Linear => Ok(linear_roots(c[1], c[0], epsilon)),
        Degree::Quadratic => Ok(quadratic_roots(c[2], c[1], c[0], epsilon)),
        Degree::Cubic => Ok(cubic_roots(c[3], c[2], c[1], c[0], epsilon)),
        Degree::Quartic => Ok(quartic_roots(c[4], c[3], c[2], c[1], c[0], epsilon)),
        Degree::Quintic => quintic_roots(c[5], c[4], c[3], c[2], c[1], c[0], epsilon),
        degree => Err(Error::UnsupportedDegree { degree }),
    }
}

#[cfg(test)]
mod tests {
    use arbitrary::Unstructured;

    use super::*;
    use crate::common::eval_poly;
    use crate::DEFAULT_EPSILON;

    fn verify(roots: Roots, expected: &[f64]) {
        let sorted = roots.sorted();
        assert_eq!(sorted.len(), expected.len(), "got {sorted:?}, expected {expected:?}");
        for (r, e) in sorted.iter().zip(expected) {
            assert!((r - e).abs() < 1e-9, "got {sorted:?}, expected {expected:?}");
        }
    }

    #[test]
    fn set_semantics() {
        let mut roots = Roots::new();
        assert!(roots.insert(1.0, 1e-6));
        assert!(!roots.insert(1.0 + 1e-9, 1e-6));
        assert!(!roots.insert(f64::NAN, 1e-6));
        assert!(!roots.insert(f64::INFINITY, 1e-6));
        assert!(roots.insert(-2.0, 1e-6));
        assert_eq!(roots.len(), 2);
        assert!(roots.contains(-2.0, 0.0));
        assert_eq!(roots.sorted().as_slice(), &[-2.0, 1.0]);
    }

    #[test]
    fn dispatch_by_degree() {
        verify(roots(&[], DEFAULT_EPSILON), &[]);
        verify(roots(&[3.0], DEFAULT_EPSILON), &[]);
        verify(roots(&[4.0, -2.0], DEFAULT_EPSILON), &[2.0]);
        verify(roots(&[2.0, -3.0, 1.0], DEFAULT_EPSILON), &[1.0, 2.0]);
        verify(roots(&[-6.0, 11.0, -6.0, 1.0], DEFAULT_EPSILON), &[1.0, 2.0, 3.0]);
        verify(
            roots(&[24.0, -50.0, 35.0, -10.0, 1.0], DEFAULT_EPSILON),
            &[1.0, 2.0, 3.0, 4.0],
        );
        verify(
            roots(&[-120.0, 274.0, -225.0, 85.0, -15.0, 1.0], DEFAULT_EPSILON),
            &[1.0, 2.0, 3.0, 4.0, 5.0],
        );
    }

    #[test]
    fn negligible_leading_terms_lower_the_degree() {
        verify(roots(&[2.0, -3.0, 1.0, 1e-14, -1e-13], DEFAULT_EPSILON), &[1.0, 2.0]);
    }

    #[test]
    fn unsupported_degree() {
        let sextic = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0];
        assert!(roots(&sextic, DEFAULT_EPSILON).is_empty());
        assert_eq!(
            try_roots(&sextic, DEFAULT_EPSILON).unwrap_err(),
            Error::UnsupportedDegree {
                degree: Degree::Sextic
            }
        );
    }

    fn residual_bound(coeffs: &[f64], r: f64) -> f64 {
        let magnitude = coeffs.iter().fold(1.0f64, |m, c| m.max(c.abs()));
        magnitude * 1e-9 * r.abs().max(1.0).powi(coeffs.len() as i32)
    }

    #[test]
    fn roots_are_roots() {
        arbtest::arbtest(|u: &mut Unstructured<'_>| {
            let n: usize = u.int_in_range(2..=6)?;
            let mut coeffs = [0.0; 6];
            for c in &mut coeffs[..n] {
                *c = f64::from(u.int_in_range(-1000..=1000)?) / 100.0;
            }
            let coeffs = &coeffs[..n];
            let found = roots(coeffs, DEFAULT_EPSILON);
            let degree = crate::classify_degree(coeffs, DEFAULT_EPSILON);
            assert!(found.len() <= degree.order());
            for &r in &found {
                let y = eval_poly(coeffs, r);
                assert!(
                    y.abs() <= residual_bound(coeffs, r),
                    "{coeffs:?} has root {r} evaluating to {y}"
                );
            }
            Ok(())
        })
        .budget_ms(2_000);
    }

    #[test]
    fn fivefold_root_exhausts_budget() {
        // (x - 1)⁵
        let coeffs = [-1.0, 5.0, -10.0, 10.0, -5.0, 1.0];
        assert!(matches!(
            try_roots(&coeffs, DEFAULT_EPSILON),
            Err(Error::IterationBudgetExceeded { .. })
        ));
        assert!(roots(&coeffs, DEFAULT_EPSILON).is_empty());
    }

    #[test]
    fn scaling_invariance() {
        let base = [-6.0, 11.0, -6.0, 1.0];
        for scale in [-3.0, 0.5, 7.25, 1e3] {
            let scaled = base.map(|c| c * scale);
            let a = roots(&base, DEFAULT_EPSILON).sorted();
            let b = roots(&scaled, DEFAULT_EPSILON).sorted();
            assert_eq!(a.len(), b.len());
            for (x, y) in a.iter().zip(&b) {
                assert!((x - y).abs() < 1e-9);
            }
        }
    }
}
