//! Synchronized state shared by the queue engine's workers.
//!
//! Each type owns its own exclusion domain and exposes only whole operations, so a
//! critical section can never be widened by a caller or nested inside another one.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::engine::Tally;

/// Monotonic stop flag that can only transition from false to true.
#[derive(Debug, Default)]
pub struct StopFlag {
    inner: AtomicBool,
}

impl StopFlag {
    pub fn new() -> Self {
        Self {
            inner: AtomicBool::new(false),
        }
    }

    pub fn stop(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }
}

/// Number of intervals currently held by some worker.
///
/// A slot is claimed inside the same critical section that pops the interval, and
/// given back only once the interval is fully dealt with: added to the accumulator,
/// or replaced by two children that are already visible in the queue. An empty
/// queue observed together with a zero count therefore means that no interval
/// exists anywhere.
#[derive(Debug, Default)]
pub struct ActiveCount {
    inner: AtomicUsize,
}

impl ActiveCount {
    pub fn new() -> Self {
        Self {
            inner: AtomicUsize::new(0),
        }
    }

    pub fn claim(&self) {
        self.inner.fetch_add(1, Ordering::SeqCst);
    }

    pub fn release(&self) {
        let previous = self.inner.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(previous > 0, "active count released more often than claimed");
    }

    pub fn get(&self) -> usize {
        self.inner.load(Ordering::SeqCst)
    }

    pub fn is_idle(&self) -> bool {
        self.get() == 0
    }
}

/// Running total of resolved contributions.
#[derive(Debug, Default)]
pub struct Accumulator {
    inner: Mutex<Tally>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Tally::default()),
        }
    }

    /// Adds one resolved leaf and returns the new running sum.
    pub fn add_and_get(&self, contribution: f64) -> f64 {
        let mut tally = self.inner.lock();
        *tally = *tally + Tally::leaf(contribution);
        tally.value
    }

    /// Consumes the accumulator once every worker has stopped.
    pub fn into_tally(self) -> Tally {
        self.inner.into_inner()
    }
}
