//! Finds the smallest queue capacity that completes a deep subdivision.
//!
//! Capacity exhaustion is the expected outcome for the small sizes here, so it is
//! reported per row instead of ending the run.

use parquad::{IntegrationError, QueueConfig, QueueEngine};

use crate::common::timed_run;

const CAPACITIES: &[usize] = &[1, 2, 4, 8, 16, 32, 64];
const TOLERANCE: f64 = 1e-12;

pub fn run_capacity_benchmark() -> Result<(), IntegrationError> {
    println!("== Queue Capacity Benchmark ==");
    println!();
    println!("Integrating sin(x) over [0, 100] at tol {TOLERANCE:e} with one worker");
    println!();

    for &capacity in CAPACITIES {
        let engine = QueueEngine::new(QueueConfig::new().with_workers(1).with_capacity(capacity))?;
        match timed_run(&engine, 0.0, 100.0, TOLERANCE, &f64::sin) {
            Ok(result) => println!(
                "capacity {capacity:>4}: ok, value {:.12}, leaves {}",
                result.integral.value(),
                result.integral.leaves()
            ),
            Err(error @ IntegrationError::QueueCapacityExceeded { .. }) => {
                println!("capacity {capacity:>4}: {error}");
            }
            Err(error) => return Err(error),
        }
    }
    Ok(())
}
