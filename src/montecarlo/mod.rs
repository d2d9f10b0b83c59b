//! Trial orchestration and aggregation.
//!
//! `MonteCarloRunner` repeats independent trials of one deck and folds the
//! outcomes into an [`AggregateResult`]. Trials draw per-index RNG streams
//! from the run seed, so sequential and parallel execution produce the same
//! aggregate for the same seed.

pub mod runner;

pub use runner::{AggregateResult, MonteCarloRunner, SampleTrace};
