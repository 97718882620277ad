//! Worker scaling for both engines on a batch of random oscillatory integrands.

use std::time::Duration;

use parquad::{Engine, IntegrationError, QueueConfig, QueueEngine, WaitStrategy};
use rand::Rng;
use rand::rngs::StdRng;

use crate::common::{recursive_engine, timed_run};

const WORKER_COUNTS: &[usize] = &[1, 2, 4, 8];
const INTEGRAND_COUNT: usize = 20;
const TOLERANCE: f64 = 1e-11;

/// Damped sinusoid with frequency `omega`.
#[derive(Clone, Copy, Debug)]
struct Wave {
    omega: f64,
    decay: f64,
}

impl Wave {
    fn eval(&self, x: f64) -> f64 {
        (self.omega * x).sin() * (-self.decay * x).exp()
    }
}

fn total_time<E: Engine>(engine: &E, waves: &[Wave]) -> Result<(Duration, usize), IntegrationError> {
    let mut duration = Duration::ZERO;
    let mut leaves = 0;
    for wave in waves {
        let f = |x: f64| wave.eval(x);
        let result = timed_run(engine, 0.0, 20.0, TOLERANCE, &f)?;
        duration += result.duration;
        leaves += result.integral.leaves();
    }
    Ok((duration, leaves))
}

pub fn run_scaling_benchmark(rng: &mut StdRng) -> Result<(), IntegrationError> {
    println!("== Worker Scaling Benchmark ==");
    println!();

    let waves: Vec<Wave> = (0..INTEGRAND_COUNT)
        .map(|_| Wave {
            omega: rng.gen_range(1.0..20.0),
            decay: rng.gen_range(0.0..0.5),
        })
        .collect();

    println!(
        "{:>8} {:>14} {:>14} {:>14} {:>10}",
        "workers", "recursive (s)", "spin (s)", "block (s)", "leaves"
    );
    for &workers in WORKER_COUNTS {
        let (recursive, leaves) = total_time(&recursive_engine(workers)?, &waves)?;
        let spin_engine =
            QueueEngine::new(QueueConfig::new().with_workers(workers).with_wait(WaitStrategy::Spin))?;
        let (spin, _) = total_time(&spin_engine, &waves)?;
        let block_engine =
            QueueEngine::new(QueueConfig::new().with_workers(workers).with_wait(WaitStrategy::Block))?;
        let (block, _) = total_time(&block_engine, &waves)?;
        println!(
            "{:>8} {:>14.6} {:>14.6} {:>14.6} {:>10}",
            workers,
            recursive.as_secs_f64(),
            spin.as_secs_f64(),
            block.as_secs_f64(),
            leaves
        );
    }
    Ok(())
}
