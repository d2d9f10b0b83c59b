//! Simulation run configuration.

use serde::{Deserialize, Serialize};

/// Parameters for one Monte Carlo run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of independent trials to execute. Every trial runs; there is
    /// no early exit on convergence.
    pub trials: usize,

    /// Turn limit per trial. Each trial ends in evaluation after this many
    /// turns regardless of board state.
    pub max_turns: u32,

    /// Maximum number of bricked-trial traces to retain as examples.
    pub max_examples: usize,

    /// Base seed for the run. `None` draws a seed from process entropy;
    /// a fixed seed makes the whole run reproducible.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trials: 1000,
            max_turns: 7,
            max_examples: 5,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Create a config with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trial count.
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Set the turn limit per trial.
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set the number of example traces to retain.
    #[must_use]
    pub fn with_max_examples(mut self, max_examples: usize) -> Self {
        self.max_examples = max_examples;
        self
    }

    /// Set a fixed base seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
