// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Effective degree of a coefficient sequence.

use core::fmt;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// The degree of a polynomial.
///
/// Only degrees up to [`Quintic`](Degree::Quintic) have solvers; the higher
/// ones are recognized so that callers can tell "unsupported" apart from
/// "no real roots".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Degree {
    /// Degree 0.
    Constant,
    /// Degree 1.
    Linear,
    /// Degree 2.
    Quadratic,
    /// Degree 3.
    Cubic,
    /// Degree 4.
    Quartic,
    /// Degree 5.
    Quintic,
    /// Degree 6.
    Sextic,
    /// Degree 7.
    Septic,
    /// Degree 8.
    Octic,
    /// Degree 9.
    Nonic,
    /// Degree 10.
    Decic,
    /// Any degree above 10.
    Higher(usize),
}

impl Degree {
    /// The degree with the given order.
    pub const fn from_order(order: usize) -> Degree {
        match order {
            0 => Degree::Constant,
            1 => Degree::Linear,
            2 => Degree::Quadratic,
            3 => Degree::Cubic,
            4 => Degree::Quartic,
            5 => Degree::Quintic,
            6 => Degree::Sextic,
            7 => Degree::Septic,
            8 => Degree::Octic,
            9 => Degree::Nonic,
            10 => Degree::Decic,
            n => Degree::Higher(n),
        }
    }

    /// The numeric degree, i.e. the exponent of the leading term.
    pub const fn order(self) -> usize {
        match self {
            Degree::Constant => 0,
            Degree::Linear => 1,
            Degree::Quadratic => 2,
            Degree::Cubic => 3,
            Degree::Quartic => 4,
            Degree::Quintic => 5,
            Degree::Sextic => 6,
            Degree::Septic => 7,
            Degree::Octic => 8,
            Degree::Nonic => 9,
            Degree::Decic => 10,
            Degree::Higher(n) => n,
        }
    }

    /// Whether [`roots`](crate::roots) can solve polynomials of this degree.
    pub const fn is_solvable(self) -> bool {
        self.order() <= 5
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Degree::Constant => "constant",
            Degree::Linear => "linear",
            Degree::Quadratic => "quadratic",
            Degree::Cubic => "cubic",
            Degree::Quartic => "quartic",
            Degree::Quintic => "quintic",
            Degree::Sextic => "sextic",
            Degree::Septic => "septic",
            Degree::Octic => "octic",
            Degree::Nonic => "nonic",
            Degree::Decic => "decic",
            Degree::Higher(n) => return write!(f, "degree {n}"),
        };
        f.write_str(name)
    }
}

/// Classify the effective degree of a polynomial.
///
/// The coefficient of `x^i` is at index `i`. Leading coefficients whose
/// magnitude is at most `epsilon` are treated as zero, so floating point
/// noise left over from curve construction doesn't push a polynomial onto
/// a higher degree (and less stable) solver. The constant term is never
/// trimmed, and an empty slice is [`Degree::Constant`].
///
/// # Examples
///
/// ```
/// use polycurve::{classify_degree, Degree, DEFAULT_EPSILON};
///
/// assert_eq!(classify_degree(&[2.0, -3.0, 1.0], DEFAULT_EPSILON), Degree::Quadratic);
/// assert_eq!(classify_degree(&[2.0, -3.0, 1e-15], DEFAULT_EPSILON), Degree::Linear);
/// ```
pub fn classify_degree(coeffs: &[f64], epsilon: f64) -> Degree {
    Degree::from_order(effective_len(coeffs, epsilon).saturating_sub(1))
}

/// Length of `coeffs` once negligible leading terms are dropped.
pub(crate) fn effective_len(coeffs: &[f64], epsilon: f64) -> usize {
    let mut len = coeffs.len();
    while len > 1 && coeffs[len - 1].abs() <= epsilon {
        len -= 1;
    }
    len
}
