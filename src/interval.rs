//! The interval record shared by both engines.

use crate::error::IntegrationError;

/// A subinterval awaiting estimation.
///
/// The integrand values at both ends and at the midpoint are sampled once, when
/// the interval is created, and are carried along so a split never evaluates the
/// integrand at a point it has already visited. Intervals are plain values: they
/// are copied into and out of the work queue and never mutated after creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    left: f64,
    right: f64,
    tol: f64,
    f_left: f64,
    f_mid: f64,
    f_right: f64,
}

impl Interval {
    /// Creates the root interval for an integration over `[left, right]`.
    ///
    /// Validates the bounds and tolerance, then evaluates `f` at `left`, the midpoint
    /// and `right`. These are the only three evaluations not made by the estimator.
    pub fn seed<F>(left: f64, right: f64, tol: f64, f: &F) -> Result<Self, IntegrationError>
    where
        F: Fn(f64) -> f64 + ?Sized,
    {
        if !left.is_finite() || !right.is_finite() {
            return Err(IntegrationError::NonFiniteBounds);
        }
        if left >= right {
            return Err(IntegrationError::InvalidBoundsOrder);
        }
        if !tol.is_finite() || tol <= 0.0 {
            return Err(IntegrationError::NonpositiveTolerance);
        }

        Ok(Self {
            left,
            right,
            tol,
            f_left: f(left),
            f_mid: f(midpoint(left, right)),
            f_right: f(right),
        })
    }

    /// Builds an interval from samples the caller already holds.
    ///
    /// Only the estimator calls this, with values inherited from a parent.
    pub(crate) fn from_samples(
        left: f64,
        right: f64,
        tol: f64,
        f_left: f64,
        f_mid: f64,
        f_right: f64,
    ) -> Self {
        debug_assert!(left < right, "split produced an empty interval");
        Self {
            left,
            right,
            tol,
            f_left,
            f_mid,
            f_right,
        }
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn tol(&self) -> f64 {
        self.tol
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn midpoint(&self) -> f64 {
        midpoint(self.left, self.right)
    }

    pub fn f_left(&self) -> f64 {
        self.f_left
    }

    pub fn f_mid(&self) -> f64 {
        self.f_mid
    }

    pub fn f_right(&self) -> f64 {
        self.f_right
    }
}

pub(crate) fn midpoint(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}
