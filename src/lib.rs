//! # bricksim
//!
//! A Monte Carlo consistency estimator for small fixed card decks.
//!
//! Given a 20-card deck, `bricksim` estimates how often the deck "bricks":
//! fails to develop enough of its main attackers onto the board within a
//! turn limit, under a deterministic greedy turn policy.
//!
//! ## Design Principles
//!
//! 1. **Data-Driven Cards**: Cards are plain records resolved from a
//!    [`catalog::Catalog`]; all special behavior lives in a
//!    [`cards::CapabilityTable`], never in per-card code.
//!
//! 2. **Deterministic Trials**: Every trial draws an independent RNG stream
//!    from the run seed and its trial index, so runs replay exactly and
//!    parallel execution matches sequential.
//!
//! 3. **Heuristic Policy, Not Search**: Turns are played by a fixed-point
//!    greedy action loop with strict priorities. No lookahead, no opponent.
//!
//! ## Modules
//!
//! - `core`: Run configuration, error types, deterministic RNG
//! - `catalog`: Name-to-record card lookup and evolution-chain resolution
//! - `cards`: Card records, decks, and the capability table
//! - `analysis`: Main-attacker classification, run once per deck
//! - `engine`: Per-trial simulation (setup, turn loop, evaluation)
//! - `montecarlo`: Trial orchestration and aggregation

pub mod analysis;
pub mod cards;
pub mod catalog;
pub mod core;
pub mod engine;
pub mod montecarlo;

// Re-export commonly used types
pub use crate::core::{DeckError, SimConfig, SimRng, DECK_SIZE};

pub use crate::catalog::{CardEntry, Catalog, CatalogBuilder};

pub use crate::cards::{
    Capability, CapabilityTable, CardRecord, Category, Deck, EvolveBonus, IntegrityWarning, Stage,
    SupporterEffect,
};

pub use crate::analysis::{classify, EvolutionMethod, MainAttackerSet};

pub use crate::engine::{TrialOutcome, TurnEngine};

pub use crate::montecarlo::{AggregateResult, MonteCarloRunner, SampleTrace};
