//! Per-copy card records.
//!
//! A `CardRecord` is one physical copy of a card inside one trial. Identity
//! is by name: duplicate copies are repeated, indistinguishable entries, not
//! unique-ID'd instances. The only mutable field is `just_placed`, the
//! one-turn evolution lock.

use serde::{Deserialize, Serialize};

/// Broad card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pokemon,
    Supporter,
    Item,
    Tool,
}

/// Pokemon evolution stage. Non-Pokemon cards carry [`Stage::None`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Basic,
    Stage1,
    Stage2,
    None,
}

/// One copy of a card within a trial.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Normalized card name; card identity.
    pub name: String,

    /// Broad category.
    pub category: Category,

    /// Evolution stage.
    pub stage: Stage,

    /// Whether this is an ex variant.
    pub is_ex: bool,

    /// Name of the card this evolves from, if any.
    pub evolves_from: Option<String>,

    /// Rarity tag, as carried by the catalog data.
    pub rarity: String,

    /// One-turn evolution lock: true only during the turn this copy entered
    /// play, cleared before the following turn's evolutions.
    #[serde(skip)]
    pub just_placed: bool,
}

impl CardRecord {
    /// True for a Basic Pokemon.
    #[must_use]
    pub fn is_basic(&self) -> bool {
        self.category == Category::Pokemon && self.stage == Stage::Basic
    }

    /// True for a Stage 1 Pokemon.
    #[must_use]
    pub fn is_stage1(&self) -> bool {
        self.stage == Stage::Stage1
    }

    /// True for a Stage 2 Pokemon.
    #[must_use]
    pub fn is_stage2(&self) -> bool {
        self.stage == Stage::Stage2
    }

    /// True for any Pokemon card.
    #[must_use]
    pub fn is_pokemon(&self) -> bool {
        self.category == Category::Pokemon
    }

    /// True for an evolution card (Stage 1 or Stage 2).
    #[must_use]
    pub fn is_evolution(&self) -> bool {
        self.is_stage1() || self.is_stage2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(name: &str) -> CardRecord {
        CardRecord {
            name: name.to_string(),
            category: Category::Pokemon,
            stage: Stage::Basic,
            is_ex: false,
            evolves_from: None,
            rarity: "one diamond".to_string(),
            just_placed: false,
        }
    }

    #[test]
    fn test_basic_predicates() {
        let card = basic("froakie");
        assert!(card.is_basic());
        assert!(card.is_pokemon());
        assert!(!card.is_evolution());
    }

    #[test]
    fn test_trainer_is_not_basic() {
        let card = CardRecord {
            name: "rare candy".to_string(),
            category: Category::Item,
            stage: Stage::None,
            is_ex: false,
            evolves_from: None,
            rarity: "one diamond".to_string(),
            just_placed: false,
        };
        assert!(!card.is_basic());
        assert!(!card.is_pokemon());
    }

    #[test]
    fn test_stage_predicates() {
        let mut card = basic("frogadier");
        card.stage = Stage::Stage1;
        card.evolves_from = Some("froakie".to_string());
        assert!(card.is_stage1());
        assert!(card.is_evolution());
        assert!(!card.is_basic());
    }

    #[test]
    fn test_serde_skips_just_placed() {
        let mut card = basic("froakie");
        card.just_placed = true;

        let json = serde_json::to_string(&card).unwrap();
        let back: CardRecord = serde_json::from_str(&json).unwrap();
        assert!(!back.just_placed);
        assert_eq!(back.name, "froakie");
    }
}
