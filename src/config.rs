//! Engine configuration.
//!
//! Worker counts default to the machine's available parallelism and can be
//! overridden with the `PARQUAD_WORKERS` environment variable. Queue capacity is
//! a fixed resource limit chosen by the caller.

use std::env;
use std::num::NonZeroUsize;
use std::thread;

use crate::error::IntegrationError;

/// Default number of pending intervals the queue engine can hold.
pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;

/// Environment variable consulted for the default worker count.
pub const WORKERS_ENV_VAR: &str = "PARQUAD_WORKERS";

/// Returns the default worker count.
///
/// Reads `PARQUAD_WORKERS` first; values that are missing, unparsable or zero fall
/// back to `std::thread::available_parallelism`, then to a single worker.
pub fn default_workers() -> usize {
    parse_workers(env::var(WORKERS_ENV_VAR).ok().as_deref())
        .or_else(|| thread::available_parallelism().ok().map(NonZeroUsize::get))
        .unwrap_or(1)
}

fn parse_workers(raw: Option<&str>) -> Option<usize> {
    raw?.trim().parse::<usize>().ok().filter(|&workers| workers > 0)
}

fn validate_workers(workers: usize) -> Result<(), IntegrationError> {
    if workers == 0 {
        return Err(IntegrationError::InvalidConfig {
            reason: "worker count must be positive",
        });
    }
    Ok(())
}

/// How queue workers behave while the queue is empty but work is still in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WaitStrategy {
    /// Keep polling the queue, yielding the CPU between attempts.
    #[default]
    Spin,
    /// Park on a condition variable until the queue changes.
    Block,
}

/// Configuration for [`RecursiveEngine`](crate::RecursiveEngine).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecursiveConfig {
    workers: usize,
}

impl RecursiveConfig {
    pub fn new() -> Self {
        Self {
            workers: default_workers(),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn validate(&self) -> Result<(), IntegrationError> {
        validate_workers(self.workers)
    }
}

impl Default for RecursiveConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for [`QueueEngine`](crate::QueueEngine).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueConfig {
    workers: usize,
    capacity: usize,
    wait: WaitStrategy,
}

impl QueueConfig {
    pub fn new() -> Self {
        Self {
            workers: default_workers(),
            capacity: DEFAULT_QUEUE_CAPACITY,
            wait: WaitStrategy::default(),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the maximum number of simultaneously pending intervals.
    ///
    /// A capacity of zero is accepted; such a queue cannot even hold the seed, and
    /// every integration fails with `QueueCapacityExceeded`.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_wait(mut self, wait: WaitStrategy) -> Self {
        self.wait = wait;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn wait(&self) -> WaitStrategy {
        self.wait
    }

    pub fn validate(&self) -> Result<(), IntegrationError> {
        validate_workers(self.workers)
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self::new()
    }
}
