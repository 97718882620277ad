use std::time::{Duration, Instant};

use parquad::{
    Engine, Integral, IntegrationError, Interval, QueueConfig, QueueEngine, RecursiveConfig,
    RecursiveEngine,
};

/// Si(10), the integral of sin(x)/x over [0, 10].
pub const SI_10: f64 = 1.658_347_594_218_874_1;

/// Result of one timed integration
#[derive(Debug)]
pub struct RunResult {
    pub duration: Duration,
    pub integral: Integral,
}

pub fn sinc(x: f64) -> f64 {
    if x == 0.0 { 1.0 } else { x.sin() / x }
}

pub fn recursive_engine(workers: usize) -> Result<RecursiveEngine, IntegrationError> {
    RecursiveEngine::new(RecursiveConfig::new().with_workers(workers))
}

pub fn queue_engine(workers: usize) -> Result<QueueEngine, IntegrationError> {
    QueueEngine::new(QueueConfig::new().with_workers(workers))
}

/// Seeds and integrates, timing both steps together.
pub fn timed_run<E, F>(
    engine: &E,
    left: f64,
    right: f64,
    tol: f64,
    f: &F,
) -> Result<RunResult, IntegrationError>
where
    E: Engine,
    F: Fn(f64) -> f64 + Sync,
{
    let start = Instant::now();
    let seed = Interval::seed(left, right, tol, f)?;
    let integral = engine.integrate(seed, f)?;
    Ok(RunResult {
        duration: start.elapsed(),
        integral,
    })
}
