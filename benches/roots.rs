// Copyright 2025 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks of the polynomial solvers and the Newton refiner.

#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use polycurve::{
    cubic_roots, newton_secant_bisection, quartic_roots, quintic_roots, roots, DEFAULT_EPSILON,
};

fn bench_cubic(cc: &mut Criterion) {
    let (x1, x2, x3) = (1.0, 2.0, 3.0);
    let a = -(x1 + x2 + x3);
    let b = x1 * x2 + x1 * x3 + x2 * x3;
    let c = -x1 * x2 * x3;

    cc.bench_function("cubic roots", |bb| {
        bb.iter(|| {
            cubic_roots(
                1.0,
                black_box(a),
                black_box(b),
                black_box(c),
                DEFAULT_EPSILON,
            )
        });
    });
}

fn bench_quartic(cc: &mut Criterion) {
    let (x1, x2, x3, x4) = (1.0, 2.0, 3.0, 4.0);
    let a = -(x1 + x2 + x3 + x4);
    let b = x1 * (x2 + x3) + x2 * (x3 + x4) + x4 * (x1 + x3);
    let c = -x1 * x2 * (x3 + x4) - x3 * x4 * (x1 + x2);
    let d = x1 * x2 * x3 * x4;

    cc.bench_function("quartic roots", |bb| {
        bb.iter(|| {
            quartic_roots(
                1.0,
                black_box(a),
                black_box(b),
                black_box(c),
                black_box(d),
                DEFAULT_EPSILON,
            )
        });
    });
}

fn bench_quintic(cc: &mut Criterion) {
    // (x - 1)(x - 2)(x - 3)(x - 4)(x - 5)
    let coeffs = [1.0, -15.0, 85.0, -225.0, 274.0, -120.0];
    cc.bench_function("quintic roots", |bb| {
        bb.iter(|| {
            let [a, b, c, d, e, f] = black_box(coeffs);
            quintic_roots(a, b, c, d, e, f, DEFAULT_EPSILON)
        });
    });

    // x⁵ - 1, mostly complex
    let ascending = [-1.0, 0.0, 0.0, 0.0, 0.0, 1.0];
    cc.bench_function("quintic roots complex", |bb| {
        bb.iter(|| roots(black_box(&ascending), DEFAULT_EPSILON));
    });
}

fn bench_refine(cc: &mut Criterion) {
    cc.bench_function("newton sqrt2 bracketed", |bb| {
        bb.iter(|| {
            newton_secant_bisection(
                black_box(1.0),
                |x| x * x - 2.0,
                |x| 2.0 * x,
                100,
                Some(0.0..2.0),
            )
        });
    });

    cc.bench_function("newton overshoot", |bb| {
        bb.iter(|| {
            newton_secant_bisection(
                black_box(1.5),
                f64::atan,
                |x| 1.0 / (1.0 + x * x),
                100,
                Some(-1.0..3.0),
            )
        });
    });
}

criterion_group!(benches, bench_cubic, bench_quartic, bench_quintic, bench_refine);
criterion_main!(benches);
