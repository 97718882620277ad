//! Fork-join engine.
//!
//! Every interval that fails the error test becomes two tasks joined with
//! `rayon::join`. Siblings run wherever the pool has capacity while their parent
//! waits at the join. No state is shared between tasks: each owns its interval, and
//! the only data flow is the partial sum a child hands back to its parent.

use std::panic::{self, AssertUnwindSafe};

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, debug_span};

use crate::config::RecursiveConfig;
use crate::engine::{Engine, Integral, Tally};
use crate::error::IntegrationError;
use crate::estimator::{Estimate, estimate};
use crate::interval::Interval;

/// Resolves the subdivision tree with recursive task decomposition.
pub struct RecursiveEngine {
    config: RecursiveConfig,
    pool: ThreadPool,
}

impl RecursiveEngine {
    /// Validates `config` and starts a dedicated pool with its worker count.
    pub fn new(config: RecursiveConfig) -> Result<Self, IntegrationError> {
        config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers())
            .thread_name(|index| format!("parquad-task-{index}"))
            .build()
            .map_err(|error| IntegrationError::ThreadPool(error.to_string()))?;
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &RecursiveConfig {
        &self.config
    }
}

impl Engine for RecursiveEngine {
    fn integrate<F>(&self, seed: Interval, f: &F) -> Result<Integral, IntegrationError>
    where
        F: Fn(f64) -> f64 + Sync,
    {
        let span = debug_span!(
            "recursive_integrate",
            workers = self.config.workers(),
            left = seed.left(),
            right = seed.right(),
            tol = seed.tol(),
        );
        let _entered = span.enter();

        // The calling thread is the originator: it hands the root task to the pool
        // and blocks here until the whole tree has been joined.
        let tally = panic::catch_unwind(AssertUnwindSafe(|| {
            self.pool.install(|| resolve(seed, f))
        }))
        .map_err(|_| IntegrationError::WorkerPanicked)?;

        debug!(value = tally.value, leaves = tally.leaves, "task tree resolved");
        Ok(Integral::from_tally(tally))
    }

    fn name(&self) -> &'static str {
        "recursive"
    }
}

fn resolve<F>(interval: Interval, f: &F) -> Tally
where
    F: Fn(f64) -> f64 + Sync,
{
    match estimate(&interval, f) {
        Estimate::Resolved(contribution) => Tally::leaf(contribution),
        Estimate::Split(lower, upper) => {
            let (lower_tally, upper_tally) =
                rayon::join(|| resolve(lower, f), || resolve(upper, f));
            lower_tally + upper_tally
        }
    }
}
