#![allow(dead_code)]

use parquad::{
    Engine, Integral, Interval, QueueConfig, QueueEngine, RecursiveConfig, RecursiveEngine,
};

/// Set `PARQUAD_BENCH_VERBOSE` to print result summaries before timing.
pub fn verbose() -> bool {
    std::env::var_os("PARQUAD_BENCH_VERBOSE").is_some()
}

pub fn recursive_engine(workers: usize) -> RecursiveEngine {
    RecursiveEngine::new(RecursiveConfig::new().with_workers(workers)).expect("pool should start")
}

pub fn queue_engine(workers: usize) -> QueueEngine {
    QueueEngine::new(QueueConfig::new().with_workers(workers)).expect("config should be valid")
}

/// Seeds and integrates in one step, panicking on failure.
pub fn run<E, F>(engine: &E, left: f64, right: f64, tol: f64, f: &F) -> Integral
where
    E: Engine,
    F: Fn(f64) -> f64 + Sync,
{
    let seed = Interval::seed(left, right, tol, f).expect("bench bounds should be valid");
    engine.integrate(seed, f).expect("integration should succeed")
}

pub fn report(label: &str, integral: &Integral) {
    eprintln!(
        "[{label}] value: {:.15}, leaves: {}, evaluations: {}",
        integral.value(),
        integral.leaves(),
        integral.evaluations()
    );
}
