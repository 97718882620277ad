//! Simpson estimator shared by both engines.
//!
//! One estimation step evaluates the integrand at the two quarter points of an
//! interval and compares the 3-point Simpson rule over the whole interval with the
//! 5-point composite rule over its halves. Their difference drives subdivision.

use crate::interval::{Interval, midpoint};

/// Intervals narrower than this are accepted whatever their error estimate.
///
/// This bounds recursion depth for integrands (or tolerances) that would never
/// satisfy the error test. Intervals too narrow to bisect in f64 are accepted as
/// well, which covers magnitudes where the f64 spacing exceeds the floor.
pub const WIDTH_FLOOR: f64 = 1.0e-12;

/// Outcome of estimating a single interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Estimate {
    /// The tolerance was met; the value is this interval's contribution.
    Resolved(f64),
    /// The tolerance was not met; both halves must be estimated in turn.
    Split(Interval, Interval),
}

/// Estimates `interval`, making exactly two fresh integrand evaluations.
pub fn estimate<F>(interval: &Interval, f: &F) -> Estimate
where
    F: Fn(f64) -> f64 + ?Sized,
{
    let left = interval.left();
    let right = interval.right();
    let tol = interval.tol();
    let f_left = interval.f_left();
    let f_mid = interval.f_mid();
    let f_right = interval.f_right();

    let h = right - left;
    let c = midpoint(left, right);
    let d = midpoint(left, c);
    let e = midpoint(c, right);
    let f_d = f(d);
    let f_e = f(e);

    let coarse = h / 6.0 * (f_left + 4.0 * f_mid + f_right);
    let refined = h / 12.0 * (f_left + 4.0 * f_d + 2.0 * f_mid + 4.0 * f_e + f_right);

    // Far from zero, adjacent f64 values can be further apart than the floor. An
    // interval whose midpoint rounds onto an endpoint cannot be halved any further.
    let bisectable = left < c && c < right;
    if (refined - coarse).abs() < tol || h < WIDTH_FLOOR || !bisectable {
        // Richardson extrapolation cancels the leading h^5 error term.
        return Estimate::Resolved(refined + (refined - coarse) / 15.0);
    }

    Estimate::Split(
        Interval::from_samples(left, c, tol, f_left, f_d, f_mid),
        Interval::from_samples(c, right, tol, f_mid, f_e, f_right),
    )
}
