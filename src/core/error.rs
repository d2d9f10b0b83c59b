//! Error taxonomy for deck construction and validation.
//!
//! Simulation itself is infallible: once a deck passes validation a trial
//! cannot fail, since every reachable state has a well-defined "no further
//! action" condition. All fallibility lives at the boundary where decklists
//! meet the catalog.

use thiserror::Error;

/// Every deck contains exactly this many cards.
pub const DECK_SIZE: usize = 20;

/// Errors raised while building or validating a deck.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    /// The deck does not contain exactly [`DECK_SIZE`] cards. Fatal; nothing
    /// is simulated for an invalid deck.
    #[error("deck must contain exactly {expected} cards (found {found})")]
    WrongSize { expected: usize, found: usize },

    /// A decklist entry could not be resolved against the catalog.
    ///
    /// Lookup failures fail fast rather than dropping the entry: a dropped
    /// entry would silently shrink the deck below [`DECK_SIZE`] and surface
    /// later as a confusing size error.
    #[error("card '{0}' is not present in the catalog")]
    UnknownCard(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_size_message() {
        let err = DeckError::WrongSize {
            expected: DECK_SIZE,
            found: 18,
        };
        assert_eq!(
            err.to_string(),
            "deck must contain exactly 20 cards (found 18)"
        );
    }

    #[test]
    fn test_unknown_card_message() {
        let err = DeckError::UnknownCard("missingno".to_string());
        assert_eq!(err.to_string(), "card 'missingno' is not present in the catalog");
    }
}
