//! Validated 20-card decks.

use log::warn;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::capabilities::CapabilityTable;
use crate::cards::record::CardRecord;
use crate::catalog::Catalog;
use crate::core::{DeckError, DECK_SIZE};

/// Advisory finding about a deck that simulates fine but probably does not
/// do what its builder intended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrityWarning {
    /// A Stage 2 and the evolution-skip item are both present, but the
    /// required Basic ancestor is missing, so the skip line can never fire.
    SkipChainMissingBasic {
        stage2: String,
        missing_basic: String,
    },
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkipChainMissingBasic {
                stage2,
                missing_basic,
            } => write!(
                f,
                "{stage2} and the evolution-skip item are present, but the required basic \
                 ({missing_basic}) is missing from the deck"
            ),
        }
    }
}

/// An ordered, validated sequence of exactly [`DECK_SIZE`] card records.
///
/// Decks are templates: a trial clones the records, shuffles the clone, and
/// discards it at evaluation. Duplicate copies are repeated entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<CardRecord>,
}

impl Deck {
    /// Validate and wrap a card sequence.
    pub fn new(cards: Vec<CardRecord>) -> Result<Self, DeckError> {
        if cards.len() != DECK_SIZE {
            return Err(DeckError::WrongSize {
                expected: DECK_SIZE,
                found: cards.len(),
            });
        }
        Ok(Self { cards })
    }

    /// The cards, in decklist order.
    #[must_use]
    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    /// Iterate over the cards.
    pub fn iter(&self) -> std::slice::Iter<'_, CardRecord> {
        self.cards.iter()
    }

    /// Number of cards; always [`DECK_SIZE`] for a constructed deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// False for any constructed deck; present for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Set of distinct card names in the deck.
    #[must_use]
    pub fn distinct_names(&self) -> FxHashSet<&str> {
        self.cards.iter().map(|c| c.name.as_str()).collect()
    }

    /// True if the deck carries the evolution-skip item.
    #[must_use]
    pub fn has_skip_evolution_item(&self, capabilities: &CapabilityTable) -> bool {
        self.cards
            .iter()
            .any(|c| capabilities.is_skip_evolution_item(&c.name))
    }

    /// Advisory integrity check: Stage 2 plus skip item with the required
    /// Basic ancestor absent. Findings are logged and returned; simulation
    /// proceeds unaffected.
    pub fn integrity_warnings(
        &self,
        catalog: &Catalog,
        capabilities: &CapabilityTable,
    ) -> Vec<IntegrityWarning> {
        if !self.has_skip_evolution_item(capabilities) {
            return Vec::new();
        }

        let names = self.distinct_names();
        let mut warnings = Vec::new();
        let mut reported: FxHashSet<&str> = FxHashSet::default();

        for card in self.cards.iter().filter(|c| c.is_stage2()) {
            if !reported.insert(card.name.as_str()) {
                continue;
            }
            let ancestor = catalog.ultimate_basic(card);
            if !names.contains(ancestor.as_str()) {
                let warning = IntegrityWarning::SkipChainMissingBasic {
                    stage2: card.name.clone(),
                    missing_basic: ancestor,
                };
                warn!("{warning}");
                warnings.push(warning);
            }
        }

        warnings
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a CardRecord;
    type IntoIter = std::slice::Iter<'a, CardRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CardEntry, CatalogBuilder};

    fn catalog() -> Catalog {
        CatalogBuilder::new()
            .card("froakie", CardEntry::basic())
            .card("frogadier", CardEntry::stage1("froakie"))
            .card("greninja", CardEntry::stage2("frogadier"))
            .card("rare candy", CardEntry::item())
            .card("poké ball", CardEntry::item())
            .build()
    }

    fn names(n: &str, count: usize) -> Vec<&str> {
        std::iter::repeat(n).take(count).collect()
    }

    #[test]
    fn test_deck_wrong_size_rejected() {
        let catalog = catalog();
        let err = catalog.deck_from_names(names("froakie", 19)).unwrap_err();
        assert_eq!(
            err,
            DeckError::WrongSize {
                expected: DECK_SIZE,
                found: 19
            }
        );
    }

    #[test]
    fn test_deck_of_twenty_accepted() {
        let catalog = catalog();
        let deck = catalog.deck_from_names(names("froakie", 20)).unwrap();
        assert_eq!(deck.len(), DECK_SIZE);
        assert_eq!(deck.distinct_names().len(), 1);
    }

    #[test]
    fn test_integrity_warning_for_missing_basic() {
        let catalog = catalog();
        let capabilities = CapabilityTable::standard();

        // Greninja + Rare Candy, but no Froakie anywhere.
        let mut list = names("greninja", 2);
        list.extend(names("rare candy", 2));
        list.extend(names("poké ball", 16));
        let deck = catalog.deck_from_names(list).unwrap();

        let warnings = deck.integrity_warnings(&catalog, &capabilities);
        assert_eq!(
            warnings,
            vec![IntegrityWarning::SkipChainMissingBasic {
                stage2: "greninja".to_string(),
                missing_basic: "froakie".to_string(),
            }]
        );
    }

    #[test]
    fn test_no_integrity_warning_when_basic_present() {
        let catalog = catalog();
        let capabilities = CapabilityTable::standard();

        let mut list = names("greninja", 2);
        list.extend(names("rare candy", 2));
        list.extend(names("froakie", 2));
        list.extend(names("poké ball", 14));
        let deck = catalog.deck_from_names(list).unwrap();

        assert!(deck.integrity_warnings(&catalog, &capabilities).is_empty());
    }

    #[test]
    fn test_no_integrity_warning_without_skip_item() {
        let catalog = catalog();
        let capabilities = CapabilityTable::standard();

        let mut list = names("greninja", 2);
        list.extend(names("poké ball", 18));
        let deck = catalog.deck_from_names(list).unwrap();

        assert!(deck.integrity_warnings(&catalog, &capabilities).is_empty());
    }
}
