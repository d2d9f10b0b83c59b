//! Card records, decks, and the capability table.
//!
//! `CardRecord` is the fixed-shape per-copy record that moves between piles
//! during a trial. `Deck` is the validated 20-card sequence a trial starts
//! from. `CapabilityTable` is the data-driven registry of special card
//! behaviors; new special cards are data edits there, not new branches in
//! the engine.

pub mod capabilities;
pub mod deck;
pub mod record;

pub use capabilities::{Capability, CapabilityTable, EvolveBonus, SupporterEffect};
pub use deck::{Deck, IntegrityWarning};
pub use record::{CardRecord, Category, Stage};
