// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polynomial root finding and Bézier algebra for 2D curves.
//!
//! The polycurve library contains the numerical core that curve code leans
//! on: real roots of polynomials up to degree five, a safeguarded Newton
//! iteration for everything else, and conversion of Bézier curves to and
//! from the power basis, together with the curve constructions built on top
//! of it.
//!
//! Polynomials are given as coefficient slices in ascending order, so the
//! coefficient of `x^i` is at index `i`. The per-degree solvers take their
//! coefficients as separate arguments from the highest degree down instead.
//! Every operation takes its tolerance as an explicit `epsilon`;
//! [`DEFAULT_EPSILON`] is a reasonable choice for coordinates of moderate
//! size.
//!
//! # Examples
//!
//! Solving polynomials:
//! ```
//! use polycurve::{classify_degree, roots, Degree, DEFAULT_EPSILON};
//!
//! // x³ - 6x² + 11x - 6 = (x - 1)(x - 2)(x - 3)
//! let coeffs = [-6.0, 11.0, -6.0, 1.0];
//! assert_eq!(classify_degree(&coeffs, DEFAULT_EPSILON), Degree::Cubic);
//! let r = roots(&coeffs, DEFAULT_EPSILON).sorted();
//! assert_eq!(r.len(), 3);
//! assert!((r[1] - 2.0).abs() < 1e-12);
//! ```
//!
//! Refining a root of an arbitrary function inside a bracket:
//! ```
//! use polycurve::newton_secant_bisection;
//!
//! let x = newton_secant_bisection(0.5, |x| x.cos() - x, |x| -x.sin() - 1.0, 50, Some(0.0..1.0))
//!     .unwrap();
//! assert!((x.cos() - x).abs() < 1e-12);
//! ```
//!
//! Where a curve crosses a line:
//! ```
//! use polycurve::{CubicBez, Line};
//!
//! let curve = CubicBez::new((0.0, 0.0), (30.0, 60.0), (60.0, -60.0), (90.0, 0.0));
//! let hits = curve.intersect_line(Line::new((0.0, 10.0), (90.0, 10.0)));
//! assert_eq!(hits.len(), 2);
//! ```
//!
//! # Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm][].
//!   This is useful for `no_std` environments.
//!   However, note that the `libm` crate is not as efficient as the standard library.
//! - `mint`: Enable `From`/`Into` conversion of [`Point`] and [`Vec2`] with [mint][] types.
//! - `serde`: Implement `serde::Deserialize` and `serde::Serialize` on the curve types
//!   and [`Degree`].
//! - `schemars`: Add best-effort support for using the curve types in JSON schemas
//!   using [schemars][].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//! Note that polycurve does require that an allocator is available (i.e. it uses [alloc]).
//!
//! [libm]: https://docs.rs/libm
//! [mint]: https://docs.rs/mint
//! [schemars]: https://docs.rs/schemars

// LINEBENDER LINT SET - lib.rs - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision
)]
// The following lints are part of the Linebender standard set,
// but resolving them has been deferred for now.
#![allow(
    clippy::use_self,
    clippy::wildcard_imports,
    clippy::shadow_unrelated,
    clippy::missing_assert_message,
    clippy::exhaustive_enums,
    clippy::unseparated_literal_suffix,
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason
)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("polycurve requires either the `std` or `libm` feature");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

// Only the benchmarks use criterion.
#[cfg(test)]
use criterion as _;

extern crate alloc;

mod arc;
mod bezier;
mod catmull_rom;
pub mod common;
mod cubicbez;
mod degree;
mod error;
mod line;
mod param_curve;
mod point;
mod quadbez;
mod quintic;
mod refine;
mod roots;
mod solve;
mod vec2;

pub use crate::arc::*;
pub use crate::bezier::*;
pub use crate::catmull_rom::*;
pub use crate::common::{
    DEFAULT_EPSILON, DEFAULT_QUINTIC_SEED, MAX_BAIRSTOW_ITERATIONS, MAX_BEZIER_DEGREE,
};
pub use crate::cubicbez::*;
pub use crate::degree::*;
pub use crate::error::*;
pub use crate::line::*;
pub use crate::param_curve::*;
pub use crate::point::*;
pub use crate::quadbez::*;
pub use crate::quintic::*;
pub use crate::refine::*;
pub use crate::roots::*;
pub use crate::solve::*;
pub use crate::vec2::*;
