//! Integration engines.
//!
//! - `RecursiveEngine`: fork-join over a binary task tree on a rayon pool
//! - `QueueEngine`: a fixed set of workers draining a shared bounded LIFO queue
//!
//! Both consume the same seed interval and the same estimator, and for a given
//! input they resolve exactly the same set of leaves. Only the order of the final
//! summation differs.

use std::ops::Add;

use crate::error::IntegrationError;
use crate::interval::Interval;

mod recursive;
mod worker_pool;

pub use recursive::RecursiveEngine;
pub use worker_pool::QueueEngine;

/// A strategy for resolving a seed interval into an integral.
pub trait Engine {
    /// Integrates `f` over `seed`, whose cached samples must come from `f`.
    fn integrate<F>(&self, seed: Interval, f: &F) -> Result<Integral, IntegrationError>
    where
        F: Fn(f64) -> f64 + Sync;

    /// Short label used in logs and benchmark output.
    fn name(&self) -> &'static str;
}

/// The result of one integration call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Integral {
    value: f64,
    leaves: usize,
}

impl Integral {
    pub(crate) fn from_tally(tally: Tally) -> Self {
        Self {
            value: tally.value,
            leaves: tally.leaves,
        }
    }

    /// The approximate value of the integral.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Number of subintervals whose contribution was accepted.
    pub fn leaves(&self) -> usize {
        self.leaves
    }

    /// Number of estimation steps taken. The subdivision is a full binary tree.
    pub fn intervals(&self) -> usize {
        (2 * self.leaves).saturating_sub(1)
    }

    /// Total integrand evaluations, including the three seed samples.
    pub fn evaluations(&self) -> usize {
        3 + 2 * self.intervals()
    }
}

/// Partial sum over a set of resolved leaves.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tally {
    pub value: f64,
    pub leaves: usize,
}

impl Tally {
    pub fn leaf(value: f64) -> Self {
        Self { value, leaves: 1 }
    }
}

impl Add for Tally {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            value: self.value + other.value,
            leaves: self.leaves + other.leaves,
        }
    }
}
