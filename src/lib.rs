//! Parallel adaptive Simpson quadrature.
//!
//! An integral over `[left, right]` is estimated with Simpson's rule on the whole
//! interval and on its two halves. If the two estimates agree to within the
//! tolerance, the refined one is accepted with a Richardson correction; otherwise
//! both halves are processed the same way. The resulting subdivision tree is
//! resolved by one of two engines:
//!
//! - [`RecursiveEngine`] forks every split into a pair of rayon tasks.
//! - [`QueueEngine`] runs a fixed set of workers over a shared bounded LIFO queue.
//!
//! ```
//! use parquad::{Engine, Interval, QueueConfig, QueueEngine};
//!
//! let square = |x: f64| x * x;
//! let seed = Interval::seed(0.0, 10.0, 1e-6, &square)?;
//! let engine = QueueEngine::new(QueueConfig::new().with_workers(2))?;
//! let integral = engine.integrate(seed, &square)?;
//! assert!((integral.value() - 1000.0 / 3.0).abs() < 1e-9);
//! # Ok::<(), parquad::IntegrationError>(())
//! ```

#![warn(
    clippy::shadow_reuse,
    clippy::shadow_same,
    clippy::shadow_unrelated,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::panic,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

mod concurrency;
mod config;
mod engine;
mod error;
mod estimator;
mod interval;
mod queue;
#[cfg(test)]
mod test_utils;

pub use config::{
    DEFAULT_QUEUE_CAPACITY, QueueConfig, RecursiveConfig, WORKERS_ENV_VAR, WaitStrategy,
    default_workers,
};
pub use engine::{Engine, Integral, QueueEngine, RecursiveEngine};
pub use error::IntegrationError;
pub use estimator::{Estimate, WIDTH_FLOOR, estimate};
pub use interval::Interval;
pub use queue::{QueueError, WorkQueue};

/// Integrates `f` over `[left, right]` with the recursive engine and default settings.
pub fn integrate_recursive<F>(left: f64, right: f64, tol: f64, f: F) -> Result<f64, IntegrationError>
where
    F: Fn(f64) -> f64 + Sync,
{
    let seed = Interval::seed(left, right, tol, &f)?;
    let engine = RecursiveEngine::new(RecursiveConfig::default())?;
    Ok(engine.integrate(seed, &f)?.value())
}

/// Integrates `f` over `[left, right]` with the queue engine and default settings.
pub fn integrate_queue<F>(left: f64, right: f64, tol: f64, f: F) -> Result<f64, IntegrationError>
where
    F: Fn(f64) -> f64 + Sync,
{
    let seed = Interval::seed(left, right, tol, &f)?;
    let engine = QueueEngine::new(QueueConfig::default())?;
    Ok(engine.integrate(seed, &f)?.value())
}
