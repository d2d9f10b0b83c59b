//! The Monte Carlo driver.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::MainAttackerSet;
use crate::cards::{CapabilityTable, Deck};
use crate::catalog::Catalog;
use crate::core::{DeckError, SimConfig, SimRng, DECK_SIZE};
use crate::engine::TurnEngine;

/// One retained trial log, tagged with the trial it came from.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SampleTrace {
    /// Zero-based trial index within the run.
    pub trial: u64,
    /// The full ordered trace of that trial.
    pub lines: Vec<String>,
}

impl SampleTrace {
    /// Render the trace as plain ordered lines.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

/// Folded result of a run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Trials actually completed. Equals the configured count unless the
    /// run was cancelled.
    pub trials: u64,
    /// Trials that bricked.
    pub brick_count: u64,
    /// Bricked trials failing the attacker threshold.
    pub attacker_brick_count: u64,
    /// Bricked trials where a key card never surfaced.
    pub key_card_brick_count: u64,
    /// Traces of the earliest bricked trials, bounded by the configured
    /// example cap.
    pub sample_traces: Vec<SampleTrace>,
}

impl AggregateResult {
    /// Fraction of completed trials that bricked. Zero when no trials ran.
    #[must_use]
    pub fn brick_rate(&self) -> f64 {
        ratio(self.brick_count, self.trials)
    }

    /// Fraction of completed trials bricked on the attacker threshold.
    #[must_use]
    pub fn attacker_brick_rate(&self) -> f64 {
        ratio(self.attacker_brick_count, self.trials)
    }

    /// Fraction of completed trials bricked with a key card stuck.
    #[must_use]
    pub fn key_card_brick_rate(&self) -> f64 {
        ratio(self.key_card_brick_count, self.trials)
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Runs many independent trials of one deck and aggregates them.
pub struct MonteCarloRunner<'a> {
    engine: TurnEngine<'a>,
    config: SimConfig,
    base_seed: u64,
}

impl<'a> MonteCarloRunner<'a> {
    /// Build a runner. The base seed comes from the config, or from OS
    /// entropy when the config leaves it unset.
    #[must_use]
    pub fn new(
        catalog: &'a Catalog,
        capabilities: &'a CapabilityTable,
        attackers: &'a MainAttackerSet,
        config: SimConfig,
    ) -> Self {
        let base_seed = match config.seed {
            Some(seed) => seed,
            None => SimRng::from_entropy().seed(),
        };
        let engine = TurnEngine::new(catalog, capabilities, attackers, config.max_turns);
        Self {
            engine,
            config,
            base_seed,
        }
    }

    /// The seed in effect for this run. Recording it makes any run
    /// reproducible.
    #[must_use]
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Run all trials sequentially.
    ///
    /// `cancel` is checked between trials; on cancellation the aggregate
    /// covers exactly the trials that completed.
    pub fn run(&self, deck: &Deck, cancel: &AtomicBool) -> Result<AggregateResult, DeckError> {
        check_deck(deck)?;
        info!(
            "starting run: {} trials, {} turns, seed {}",
            self.config.trials, self.config.max_turns, self.base_seed
        );

        let mut agg = AggregateResult::default();
        for trial in 0..self.config.trials as u64 {
            if cancel.load(Ordering::Relaxed) {
                debug!("run cancelled after {} trials", agg.trials);
                break;
            }
            let outcome = self.run_one(deck, trial);
            fold_outcome(&mut agg, trial, outcome, self.config.max_examples);
        }

        info!(
            "run complete: {}/{} trials bricked",
            agg.brick_count, agg.trials
        );
        Ok(agg)
    }

    /// Run all trials across the rayon thread pool.
    ///
    /// Produces the same aggregate as [`run`](Self::run) for the same seed:
    /// per-trial RNG streams are index-derived, counters are order-free,
    /// and retained traces are merged by earliest trial index.
    pub fn run_parallel(
        &self,
        deck: &Deck,
        cancel: &AtomicBool,
    ) -> Result<AggregateResult, DeckError> {
        check_deck(deck)?;
        info!(
            "starting parallel run: {} trials, {} turns, seed {}",
            self.config.trials, self.config.max_turns, self.base_seed
        );

        let max_examples = self.config.max_examples;
        let agg = (0..self.config.trials as u64)
            .into_par_iter()
            .fold(AggregateResult::default, |mut agg, trial| {
                if cancel.load(Ordering::Relaxed) {
                    return agg;
                }
                let outcome = self.run_one(deck, trial);
                fold_outcome(&mut agg, trial, outcome, max_examples);
                agg
            })
            .reduce(AggregateResult::default, |a, b| {
                merge(a, b, max_examples)
            });

        info!(
            "parallel run complete: {}/{} trials bricked",
            agg.brick_count, agg.trials
        );
        Ok(agg)
    }

    fn run_one(&self, deck: &Deck, trial: u64) -> crate::engine::TrialOutcome {
        let mut rng = SimRng::for_trial(self.base_seed, trial);
        self.engine.run_trial(deck, &mut rng)
    }
}

fn check_deck(deck: &Deck) -> Result<(), DeckError> {
    // Deck::new already enforces this; re-assert at the run boundary so a
    // future construction path cannot slip a short deck into a long run.
    if deck.cards().len() != DECK_SIZE {
        return Err(DeckError::WrongSize {
            expected: DECK_SIZE,
            found: deck.cards().len(),
        });
    }
    Ok(())
}

fn fold_outcome(
    agg: &mut AggregateResult,
    trial: u64,
    outcome: crate::engine::TrialOutcome,
    max_examples: usize,
) {
    agg.trials += 1;
    if outcome.is_brick {
        agg.brick_count += 1;
        if outcome.brick_due_to_attackers {
            agg.attacker_brick_count += 1;
        }
        if outcome.brick_due_to_key_cards {
            agg.key_card_brick_count += 1;
        }
        if agg.sample_traces.len() < max_examples {
            agg.sample_traces.push(SampleTrace {
                trial,
                lines: outcome.trace,
            });
        }
    }
}

/// Merge two partial aggregates, keeping the earliest-index traces.
fn merge(mut a: AggregateResult, b: AggregateResult, max_examples: usize) -> AggregateResult {
    a.trials += b.trials;
    a.brick_count += b.brick_count;
    a.attacker_brick_count += b.attacker_brick_count;
    a.key_card_brick_count += b.key_card_brick_count;
    a.sample_traces.extend(b.sample_traces);
    a.sample_traces.sort_by_key(|t| t.trial);
    a.sample_traces.truncate(max_examples);
    a
}
