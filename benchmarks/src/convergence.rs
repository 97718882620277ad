//! Tolerance sweep for sin(x)/x over [0, 10] against the known value of Si(10).

use parquad::{Engine, IntegrationError};

use crate::common::{SI_10, queue_engine, recursive_engine, sinc, timed_run};

const TOLERANCES: &[f64] = &[1e-2, 1e-4, 1e-6, 1e-8, 1e-10, 1e-12];

fn sweep<E: Engine>(engine: &E) -> Result<(), IntegrationError> {
    println!("[{}]", engine.name());
    println!(
        "{:>10} {:>12} {:>8} {:>12} {:>12}",
        "tol", "error", "leaves", "evaluations", "time (s)"
    );
    for &tol in TOLERANCES {
        let result = timed_run(engine, 0.0, 10.0, tol, &sinc)?;
        println!(
            "{:>10.0e} {:>12.3e} {:>8} {:>12} {:>12.6}",
            tol,
            (result.integral.value() - SI_10).abs(),
            result.integral.leaves(),
            result.integral.evaluations(),
            result.duration.as_secs_f64()
        );
    }
    Ok(())
}

pub fn run_convergence_benchmark() -> Result<(), IntegrationError> {
    println!("== Sinc Convergence Benchmark ==");
    println!();

    sweep(&recursive_engine(parquad::default_workers())?)?;
    println!();
    sweep(&queue_engine(parquad::default_workers())?)
}
