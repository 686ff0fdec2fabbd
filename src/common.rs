// Copyright 2018 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations and tolerances.

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("polycurve requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs;
    fn acos(self) -> Self => acos;
    fn cbrt(self) -> Self => cbrt;
    fn ceil(self) -> Self => ceil;
    fn copysign(self, sign: Self) -> Self => copysign;
    fn cos(self) -> Self => cos;
    fn powi(self, n: i32) -> Self => pow;
    fn sin(self) -> Self => sin;
    fn sin_cos(self) -> (Self, Self) => sincos;
    fn sqrt(self) -> Self => sqrt;
    fn tan(self) -> Self => tan;
}

/// The tolerance used by the convenience entry points.
///
/// It decides when a coefficient is negligible for degree classification,
/// when a discriminant counts as zero, and when an iteration has converged.
/// Every solver also accepts an explicit `epsilon`.
pub const DEFAULT_EPSILON: f64 = 5.684341886080802e-12;

/// Iteration cap for extracting a single quadratic factor in the quintic solver.
pub const MAX_BAIRSTOW_ITERATIONS: usize = 1000;

/// Seed for the generator behind [`quintic_roots`](crate::quintic_roots).
pub const DEFAULT_QUINTIC_SEED: u64 = 0x5eed_f00d_cafe_d00d;

/// The highest Bézier degree supported by the basis transforms.
pub const MAX_BEZIER_DEGREE: usize = 10;

/// Snap a value to zero when it is within `epsilon` of it.
#[inline]
pub(crate) fn snap_to_zero(x: f64, epsilon: f64) -> f64 {
    if x.abs() <= epsilon {
        0.0
    } else {
        x
    }
}

pub(crate) fn different_signs(x: f64, y: f64) -> bool {
    (x < 0.0) != (y < 0.0)
}

/// Evaluate a polynomial using Horner's scheme.
///
/// The coefficient of `x^i` is at index `i`, so `[c, b, a]` is the
/// polynomial `a x² + b x + c`. An empty slice is the zero polynomial.
///
/// # Examples
///
/// ```
/// use polycurve::common::eval_poly;
///
/// // x² - 3x + 2
/// assert_eq!(eval_poly(&[2.0, -3.0, 1.0], 1.0), 0.0);
/// assert_eq!(eval_poly(&[2.0, -3.0, 1.0], 3.0), 2.0);
/// ```
pub fn eval_poly(coeffs: &[f64], x: f64) -> f64 {
    let mut acc = 0.0;
    for c in coeffs.iter().rev() {
        acc = acc * x + c;
    }
    acc
}
