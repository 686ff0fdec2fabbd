// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Failures reported by the solvers and basis transforms.

use crate::Degree;

/// An error from one of the root finders or Bézier transforms.
///
/// Degenerate input, such as a vanishing leading coefficient, is not an
/// error: the solvers return an empty [`Roots`](crate::Roots) for it.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The bracket passed to the refiner is reversed or not finite.
    #[error("invalid bracket [{min}, {max}]")]
    InvalidBracket {
        /// Lower bound as given.
        min: f64,
        /// Upper bound as given.
        max: f64,
    },
    /// The function has the same sign at both ends of the bracket.
    #[error("bracket does not straddle a root: f(min) = {f_min}, f(max) = {f_max}")]
    BracketSameSign {
        /// Function value at the lower bound.
        f_min: f64,
        /// Function value at the upper bound.
        f_max: f64,
    },
    /// The derivative vanished before any usable derivative was seen.
    #[error("derivative is zero at x = {x} and there is no previous value to reuse")]
    DerivativeUnavailable {
        /// Where the derivative vanished.
        x: f64,
    },
    /// An iterative method ran out of iterations without converging.
    #[error("no convergence after {iterations} iterations")]
    IterationBudgetExceeded {
        /// The iteration budget that was spent.
        iterations: usize,
        /// The last estimate, if the method has a meaningful one.
        estimate: Option<f64>,
    },
    /// No closed-form or deflation solver exists for this degree.
    #[error("unsupported polynomial degree: {degree}")]
    UnsupportedDegree {
        /// The classified degree of the input.
        degree: Degree,
    },
    /// The Bézier transforms only handle degrees 1 through 10.
    #[error("unsupported Bézier curve with {control_points} control points")]
    UnsupportedBezierDegree {
        /// Number of control points (or coefficients) given.
        control_points: usize,
    },
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn messages() {
        let e = Error::UnsupportedDegree {
            degree: Degree::Sextic,
        };
        assert_eq!(e.to_string(), "unsupported polynomial degree: sextic");
        let e = Error::IterationBudgetExceeded {
            iterations: 1000,
            estimate: None,
        };
        assert_eq!(e.to_string(), "no convergence after 1000 iterations");
        let e = Error::InvalidBracket { min: 2.0, max: 1.0 };
        assert_eq!(e.to_string(), "invalid bracket [2, 1]");
    }
}
