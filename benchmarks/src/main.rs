use std::collections::HashSet;
use std::env;
use std::process::ExitCode;

use parquad::IntegrationError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

mod capacity;
mod common;
mod convergence;
mod scaling;
mod square;

use capacity::run_capacity_benchmark;
use convergence::run_convergence_benchmark;
use scaling::run_scaling_benchmark;
use square::run_square_benchmark;

/// Available benchmark names
const BENCHMARK_NAMES: &[&str] = &["square", "convergence", "scaling", "capacity"];

fn print_usage() {
    println!("Usage: benchmarks [OPTIONS] [BENCHMARK...]");
    println!();
    println!("Run performance benchmarks for the quadrature engines.");
    println!();
    println!("Options:");
    println!("  --help, -h       Show this help message");
    println!("  --list, -l       List available benchmarks");
    println!();
    println!("Arguments:");
    println!("  BENCHMARK        Benchmark(s) to run, by name or index (0-based)");
    println!("                   If no benchmarks specified, runs 'square'.");
    println!();
    println!("Environment:");
    println!("  RUST_LOG         Log filter, e.g. 'parquad=debug' (default: info)");
    println!("  PARQUAD_WORKERS  Default worker count");
    println!();
    println!("Examples:");
    println!("  benchmarks                      # Run the square benchmark");
    println!("  benchmarks scaling              # Run only 'scaling'");
    println!("  benchmarks 0 2                  # Run benchmarks 0 and 2");
}

fn print_benchmark_list() {
    println!("Available benchmarks:");
    for (i, name) in BENCHMARK_NAMES.iter().enumerate() {
        println!("  {}: {}", i, name);
    }
}

/// Resolves each argument as a 0-based index or a name; unknown ones are logged and skipped.
fn parse_benchmark_selection(args: &[String]) -> HashSet<usize> {
    args.iter()
        .filter_map(|arg| {
            let index = match arg.parse::<usize>() {
                Ok(index) => Some(index).filter(|&index| index < BENCHMARK_NAMES.len()),
                Err(_) => BENCHMARK_NAMES.iter().position(|&name| name == arg),
            };
            if index.is_none() {
                warn!(benchmark = %arg, "ignoring unknown benchmark");
            }
            index
        })
        .collect()
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_selected(selected: &HashSet<usize>) -> Result<(), IntegrationError> {
    let mut rng = StdRng::seed_from_u64(7);
    let mut first = true;

    for i in 0..BENCHMARK_NAMES.len() {
        if selected.contains(&i) {
            if !first {
                println!();
            }
            first = false;

            match i {
                0 => run_square_benchmark()?,
                1 => run_convergence_benchmark()?,
                2 => run_scaling_benchmark(&mut rng)?,
                3 => run_capacity_benchmark()?,
                _ => unreachable!(),
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        return ExitCode::SUCCESS;
    }
    if args.iter().any(|arg| arg == "--list" || arg == "-l") {
        print_benchmark_list();
        return ExitCode::SUCCESS;
    }

    init_logging();

    let benchmark_args: Vec<String> = args
        .into_iter()
        .filter(|arg| !arg.starts_with('-'))
        .collect();

    let selected = if benchmark_args.is_empty() {
        HashSet::from([0])
    } else {
        parse_benchmark_selection(&benchmark_args)
    };

    if selected.is_empty() {
        error!("no valid benchmarks selected; use --list to see available benchmarks");
        return ExitCode::FAILURE;
    }

    match run_selected(&selected) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            error!(error = %failure, "benchmark aborted");
            eprintln!("{failure} - exiting");
            ExitCode::FAILURE
        }
    }
}
