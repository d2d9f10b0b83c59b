//! Core types: RNG, configuration, error taxonomy.
//!
//! These are the building blocks the rest of the crate leans on; nothing in
//! here knows about cards or game rules.

pub mod config;
pub mod error;
pub mod rng;

pub use config::SimConfig;
pub use error::{DeckError, DECK_SIZE};
pub use rng::SimRng;
