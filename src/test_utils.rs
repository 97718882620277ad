//! Shared test utilities for the estimator and both engines.

use crate::interval::Interval;

/// Si(10), the sine integral of sinc over [0, 10].
pub const SI_10: f64 = 1.658_347_594_218_874_1;

/// Asserts that `actual` is within `tolerance` of `expected`.
///
/// # Panics
/// Panics with both values and their distance if they are too far apart.
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    let distance = (actual - expected).abs();
    assert!(
        distance <= tolerance,
        "expected {expected} within {tolerance}, got {actual} (off by {distance:e})"
    );
}

/// Seeds an interval, panicking on invalid bounds.
pub fn seed<F>(left: f64, right: f64, tol: f64, f: &F) -> Interval
where
    F: Fn(f64) -> f64 + ?Sized,
{
    Interval::seed(left, right, tol, f).expect("test bounds should be valid")
}

/// sin(x)/x with the removable singularity at zero filled in.
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 { 1.0 } else { x.sin() / x }
}

/// Evaluates the polynomial with the given coefficients, constant term first.
pub fn eval_polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, coefficient| acc * x + coefficient)
}

/// Exact integral of the polynomial over [left, right].
pub fn integrate_polynomial(coefficients: &[f64], left: f64, right: f64) -> f64 {
    let antiderivative = |x: f64| {
        coefficients
            .iter()
            .enumerate()
            .rev()
            .fold(0.0, |acc, (power, coefficient)| {
                acc * x + coefficient / (power + 1) as f64
            })
            * x
    };
    antiderivative(right) - antiderivative(left)
}

#[test]
fn polynomial_helpers_agree_on_a_cubic() {
    // 1 + 2x + 3x^2 + 4x^3
    let coefficients = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(eval_polynomial(&coefficients, 2.0), 49.0);
    // x + x^2 + x^3 + x^4 over [0, 2]
    assert_eq!(integrate_polynomial(&coefficients, 0.0, 2.0), 30.0);
}
