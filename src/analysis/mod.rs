//! Per-deck attacker classification.
//!
//! Runs once per deck, before any simulation. The classifier decides which
//! card names count as primary win-condition pieces ("main attackers") and
//! tags each with a descriptive evolution-method label.

pub mod classifier;

pub use classifier::{classify, EvolutionMethod, MainAttackerSet};
