//! Shared-queue engine.
//!
//! A fixed set of worker threads drains one bounded LIFO queue. A worker takes an
//! interval, estimates it, and either adds the contribution to the shared
//! accumulator or pushes both halves back. The run is over once the queue is empty
//! and no worker holds an interval; a fatal error raises the stop flag instead.

use std::hint;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use tracing::{Span, debug, debug_span, error, trace, trace_span};

use crate::concurrency::{Accumulator, ActiveCount, StopFlag};
use crate::config::{QueueConfig, WaitStrategy};
use crate::engine::{Engine, Integral};
use crate::error::IntegrationError;
use crate::estimator::{Estimate, estimate};
use crate::interval::Interval;
use crate::queue::WorkQueue;

/// Resolves the subdivision tree with workers sharing a bounded queue.
pub struct QueueEngine {
    config: QueueConfig,
}

impl QueueEngine {
    pub fn new(config: QueueConfig) -> Result<Self, IntegrationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }
}

/// Everything the workers of one call share. Lives on the caller's stack.
struct Shared {
    queue: WorkQueue<Interval>,
    active: ActiveCount,
    total: Accumulator,
    stop: StopFlag,
    wait: WaitStrategy,
}

impl Shared {
    /// Gives back a claimed interval. Parked workers re-check for termination.
    fn release(&self) {
        self.active.release();
        if self.wait == WaitStrategy::Block {
            self.queue.wake_all();
        }
    }

    fn halt(&self) {
        self.stop.stop();
        self.queue.wake_all();
    }

    fn idle(&self) {
        match self.wait {
            WaitStrategy::Spin => {
                hint::spin_loop();
                thread::yield_now();
            }
            WaitStrategy::Block => self.queue.wait_for_work(&self.active, &self.stop),
        }
    }
}

impl Engine for QueueEngine {
    fn integrate<F>(&self, seed: Interval, f: &F) -> Result<Integral, IntegrationError>
    where
        F: Fn(f64) -> f64 + Sync,
    {
        let span = debug_span!(
            "queue_integrate",
            workers = self.config.workers(),
            capacity = self.config.capacity(),
            wait = ?self.config.wait(),
            left = seed.left(),
            right = seed.right(),
            tol = seed.tol(),
        );
        let _entered = span.enter();

        let shared = Shared {
            queue: WorkQueue::with_capacity(self.config.capacity()),
            active: ActiveCount::new(),
            total: Accumulator::new(),
            stop: StopFlag::new(),
            wait: self.config.wait(),
        };
        shared
            .queue
            .push(seed)
            .inspect_err(|error| error!(%error, "seed interval does not fit in the queue"))?;

        thread::scope(|scope| {
            let mut first_error = None;
            let mut handles = Vec::with_capacity(self.config.workers());
            for id in 0..self.config.workers() {
                let worker_shared = &shared;
                let parent = span.clone();
                let spawned = thread::Builder::new()
                    .name(format!("parquad-worker-{id}"))
                    .spawn_scoped(scope, move || run_worker(id, worker_shared, f, &parent));
                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(spawn_error) => {
                        error!(%spawn_error, id, "failed to spawn queue worker");
                        shared.halt();
                        first_error = Some(IntegrationError::ThreadPool(spawn_error.to_string()));
                        break;
                    }
                }
            }

            for handle in handles {
                let outcome = handle
                    .join()
                    .unwrap_or(Err(IntegrationError::WorkerPanicked));
                if let Err(worker_error) = outcome {
                    first_error.get_or_insert(worker_error);
                }
            }
            first_error.map_or(Ok(()), Err)
        })?;

        let tally = shared.total.into_tally();
        debug!(value = tally.value, leaves = tally.leaves, "queue drained");
        Ok(Integral::from_tally(tally))
    }

    fn name(&self) -> &'static str {
        "queue"
    }
}

fn run_worker<F>(id: usize, shared: &Shared, f: &F, parent: &Span) -> Result<(), IntegrationError>
where
    F: Fn(f64) -> f64 + Sync,
{
    let span = trace_span!(parent: parent, "worker", id);
    let _entered = span.enter();
    trace!("worker started");

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| work(shared, f))).unwrap_or_else(|_| {
        error!("integrand panicked");
        shared.halt();
        Err(IntegrationError::WorkerPanicked)
    });

    trace!(ok = outcome.is_ok(), "worker exiting");
    outcome
}

fn work<F>(shared: &Shared, f: &F) -> Result<(), IntegrationError>
where
    F: Fn(f64) -> f64 + Sync,
{
    let mut resolved = 0_usize;
    while !shared.stop.is_stopped() {
        let Some(interval) = shared.queue.take(&shared.active) else {
            if shared.queue.is_drained(&shared.active) {
                break;
            }
            shared.idle();
            continue;
        };

        match estimate(&interval, f) {
            Estimate::Resolved(contribution) => {
                shared.total.add_and_get(contribution);
                resolved += 1;
            }
            Estimate::Split(lower, upper) => {
                // The halves must be visible before the claim is released, or another
                // worker could see an empty queue and an idle count mid-split.
                if let Err(overflow) = shared.queue.push_pair(lower, upper) {
                    error!(
                        %overflow,
                        left = interval.left(),
                        right = interval.right(),
                        "cannot enqueue subintervals",
                    );
                    shared.halt();
                    return Err(overflow.into());
                }
            }
        }
        shared.release();
    }

    trace!(resolved, "no work left");
    Ok(())
}
