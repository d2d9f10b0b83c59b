//! Immutable card catalog.
//!
//! The catalog resolves a normalized card name to its static attributes and
//! walks evolution ancestry chains. It is built once through
//! [`CatalogBuilder`] and never mutated afterwards; the classifier and the
//! engine share it by reference. Loading catalog data from tabular sources
//! is the caller's job.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardRecord, Category, Deck, Stage};
use crate::core::DeckError;

/// Static attributes of one card name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEntry {
    pub category: Category,
    pub stage: Stage,
    pub is_ex: bool,
    pub evolves_from: Option<String>,
    pub rarity: String,
}

impl CardEntry {
    /// A Basic Pokemon.
    #[must_use]
    pub fn basic() -> Self {
        Self {
            category: Category::Pokemon,
            stage: Stage::Basic,
            is_ex: false,
            evolves_from: None,
            rarity: "one diamond".to_string(),
        }
    }

    /// A Stage 1 Pokemon evolving from `from`.
    #[must_use]
    pub fn stage1(from: impl Into<String>) -> Self {
        Self {
            stage: Stage::Stage1,
            evolves_from: Some(from.into()),
            ..Self::basic()
        }
    }

    /// A Stage 2 Pokemon evolving from `from`.
    #[must_use]
    pub fn stage2(from: impl Into<String>) -> Self {
        Self {
            stage: Stage::Stage2,
            evolves_from: Some(from.into()),
            ..Self::basic()
        }
    }

    /// A supporter card.
    #[must_use]
    pub fn supporter() -> Self {
        Self {
            category: Category::Supporter,
            stage: Stage::None,
            ..Self::basic()
        }
    }

    /// An item card.
    #[must_use]
    pub fn item() -> Self {
        Self {
            category: Category::Item,
            stage: Stage::None,
            ..Self::basic()
        }
    }

    /// A tool card.
    #[must_use]
    pub fn tool() -> Self {
        Self {
            category: Category::Tool,
            stage: Stage::None,
            ..Self::basic()
        }
    }

    /// Mark as an ex variant (builder pattern).
    #[must_use]
    pub fn ex(mut self) -> Self {
        self.is_ex = true;
        self
    }

    /// Set the rarity tag (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = rarity.into();
        self
    }
}

/// Builder for [`Catalog`]. Explicit construction only; there is no ambient
/// global catalog.
#[derive(Clone, Debug, Default)]
pub struct CatalogBuilder {
    entries: FxHashMap<String, CardEntry>,
}

impl CatalogBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card, replacing any previous entry with the same name.
    #[must_use]
    pub fn card(mut self, name: impl Into<String>, entry: CardEntry) -> Self {
        self.entries.insert(name.into(), entry);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Catalog {
        Catalog {
            entries: self.entries,
        }
    }
}

/// Immutable name-to-attributes catalog.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Catalog {
    entries: FxHashMap<String, CardEntry>,
}

impl Catalog {
    /// Resolve a card name to its attributes.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&CardEntry> {
        self.entries.get(name)
    }

    /// Number of distinct card names in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Walk `evolves_from` links from `name` down to the ultimate Basic.
    ///
    /// Returns `name` itself when the card has no pre-evolution or is not in
    /// the catalog. A visited set guards against malformed chain data that
    /// loops.
    #[must_use]
    pub fn chain_to_basic(&self, name: &str) -> String {
        let mut current = name.to_string();
        let mut visited = rustc_hash::FxHashSet::default();

        while visited.insert(current.clone()) {
            let Some(entry) = self.resolve(&current) else {
                break;
            };
            match &entry.evolves_from {
                Some(from) if !from.is_empty() => current = from.clone(),
                _ => break,
            }
        }

        current
    }

    /// The ultimate Basic ancestor of a card record.
    ///
    /// Basics (and cards without a pre-evolution link) are their own
    /// ancestor.
    #[must_use]
    pub fn ultimate_basic(&self, card: &CardRecord) -> String {
        match &card.evolves_from {
            Some(from) if !from.is_empty() => self.chain_to_basic(from),
            _ => card.name.clone(),
        }
    }

    /// Build a single card record, failing fast on unknown names.
    pub fn record(&self, name: &str) -> Result<CardRecord, DeckError> {
        let entry = self
            .resolve(name)
            .ok_or_else(|| DeckError::UnknownCard(name.to_string()))?;
        Ok(CardRecord {
            name: name.to_string(),
            category: entry.category,
            stage: entry.stage,
            is_ex: entry.is_ex,
            evolves_from: entry.evolves_from.clone(),
            rarity: entry.rarity.clone(),
            just_placed: false,
        })
    }

    /// Build a validated deck from an ordered list of card names.
    ///
    /// Fails fast on the first unresolvable name rather than dropping the
    /// entry, so a lookup error can never masquerade as a size error.
    pub fn deck_from_names<'a, I>(&self, names: I) -> Result<Deck, DeckError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let cards = names
            .into_iter()
            .map(|name| self.record(name))
            .collect::<Result<Vec<_>, _>>()?;
        Deck::new(cards)
    }
}
