//! Integrates x^2 over [0, 10] at tolerance 1e-6 with each engine.

use parquad::{Engine, IntegrationError};

use crate::common::{RunResult, queue_engine, recursive_engine, timed_run};

const LEFT: f64 = 0.0;
const RIGHT: f64 = 10.0;
const TOLERANCE: f64 = 1e-6;

fn square(x: f64) -> f64 {
    x * x
}

fn print_run(name: &str, result: &RunResult) {
    println!("[{name}]");
    println!("Result = {:e}", result.integral.value());
    println!("Time(s) = {:.6}", result.duration.as_secs_f64());
}

pub fn run_square_benchmark() -> Result<(), IntegrationError> {
    println!("== Square Benchmark ==");
    println!();

    let recursive = recursive_engine(parquad::default_workers())?;
    print_run(recursive.name(), &timed_run(&recursive, LEFT, RIGHT, TOLERANCE, &square)?);

    let queued = queue_engine(parquad::default_workers())?;
    print_run(queued.name(), &timed_run(&queued, LEFT, RIGHT, TOLERANCE, &square)?);

    Ok(())
}
