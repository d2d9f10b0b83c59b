//! The turn-simulation engine.
//!
//! `TurnEngine` simulates exactly one trial: shuffle, opening hand, a
//! bounded turn loop driven by a deterministic heuristic policy, and a final
//! board evaluation. The policy runs a fixed-point action loop per turn with
//! strict priority: supporter, basic placement, search item, evolutions,
//! special positioning. Within a tier the scan is left-to-right and restarts
//! after any mutation.

pub mod actions;
pub mod evolution;
pub mod state;
pub mod turn;

pub use state::{Board, Position, TrialState, MAX_BENCH, MAX_HAND};
pub use turn::{TrialOutcome, TurnEngine};
