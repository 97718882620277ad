//! Error types for integration calls.
//!
//! # Fatal conditions
//!
//! Both engines treat their error conditions as fatal for the call in progress:
//! no partial sum is ever returned. The queue engine raises its shared stop flag
//! when a worker hits one of these, so every other worker leaves its loop and the
//! error surfaces from `integrate` once all workers have joined.
//!
//! Numerical non-convergence is not an error. The estimator's absolute width
//! floor forces every branch to resolve, at the cost of accuracy on that branch.

use std::fmt;

use crate::queue::QueueError;

/// Errors that can occur while setting up or running an integration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntegrationError {
    /// Tolerance must be positive and finite.
    NonpositiveTolerance,
    /// The left bound is not strictly less than the right bound.
    InvalidBoundsOrder,
    /// At least one bound is infinite or NaN.
    NonFiniteBounds,
    /// An engine configuration value is unusable (e.g. zero workers).
    InvalidConfig { reason: &'static str },
    /// More subintervals were pending at once than the work queue can hold.
    QueueCapacityExceeded { capacity: usize },
    /// An interval was removed from a queue that was already empty.
    QueueProtocolViolation,
    /// The worker thread pool could not be started.
    ThreadPool(String),
    /// A worker panicked, most likely inside the integrand.
    WorkerPanicked,
}

impl fmt::Display for IntegrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonpositiveTolerance => write!(f, "tolerance must be positive and finite"),
            Self::InvalidBoundsOrder => write!(f, "left bound must be less than right bound"),
            Self::NonFiniteBounds => write!(f, "integration bounds must be finite"),
            Self::InvalidConfig { reason } => write!(f, "invalid engine configuration: {reason}"),
            Self::QueueCapacityExceeded { capacity } => {
                write!(f, "maximum queue size ({capacity}) exceeded")
            }
            Self::QueueProtocolViolation => {
                write!(f, "attempt to extract from empty queue")
            }
            Self::ThreadPool(reason) => write!(f, "failed to start worker pool: {reason}"),
            Self::WorkerPanicked => write!(f, "a worker thread panicked"),
        }
    }
}

impl std::error::Error for IntegrationError {}

impl From<QueueError> for IntegrationError {
    fn from(error: QueueError) -> Self {
        match error {
            QueueError::CapacityExceeded { capacity } => Self::QueueCapacityExceeded { capacity },
            QueueError::Empty => Self::QueueProtocolViolation,
        }
    }
}
