//! Data-driven capability table for special card behaviors.
//!
//! The engine never branches on card names directly. Every special behavior
//! (the draw supporter, the hand-reset supporter, the search item, the
//! evolution-skip item, the end-of-turn bankers, evolution bonuses, the
//! ongoing deck-pull ability, classifier fodder exclusions) is an entry in
//! this table. Adding a special card is a data edit, not an engine change.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::record::CardRecord;

/// Effect of playing a supporter card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupporterEffect {
    /// Draw two cards (the researcher card).
    DrawTwo,
    /// Shuffle the rest of the hand into the deck, then draw five
    /// (the disruption card).
    ShuffleHandDrawFive,
    /// No simulated effect beyond consuming the one-per-turn supporter slot.
    Plain,
}

/// One-shot bonus granted when a specific card evolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolveBonus {
    /// Draw two cards on evolving.
    DrawTwo,
    /// Pull one Pokemon card from the deck into hand, then reshuffle.
    PullPokemonReshuffle,
}

/// Special behaviors attached to one card name.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Capability {
    /// Supporter effect override. Supporters without an entry play as
    /// [`SupporterEffect::Plain`].
    pub supporter: Option<SupporterEffect>,

    /// Item that searches the deck for a Basic Pokemon.
    pub search_item: bool,

    /// Item that lets a Basic evolve directly into a Stage 2.
    pub skip_evolution_item: bool,

    /// While active, banks one deck card at end of turn for use next turn,
    /// and is force-swapped into the active spot from the bench.
    pub end_turn_banker: bool,

    /// Evolution handled in its own priority tier, ahead of regular
    /// evolutions.
    pub priority_evolution: bool,

    /// Bonus effect fired when this card evolves onto its pre-evolution.
    pub evolve_bonus: Option<EvolveBonus>,

    /// Restrict `evolve_bonus` to a specific pre-evolution name.
    pub bonus_partner: Option<String>,

    /// While in play, pulls one Pokemon card from the deck each turn
    /// (followed by a reshuffle).
    pub ongoing_pokemon_pull: bool,

    /// Excluded from attacker classification: present only as evolution
    /// fodder for a named combo.
    pub attacker_fodder: bool,
}

/// Registry of special card behaviors, keyed by card name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CapabilityTable {
    entries: FxHashMap<String, Capability>,
    /// Extra names accepted as a given pre-evolution, e.g. an ex variant
    /// of the base form.
    evolve_aliases: FxHashMap<String, Vec<String>>,
    /// The lowest rarity tier; basics above it count as key cards for the
    /// stuck-card diagnostic.
    baseline_rarity: String,
}

impl CapabilityTable {
    /// Create an empty table.
    #[must_use]
    pub fn new(baseline_rarity: impl Into<String>) -> Self {
        Self {
            entries: FxHashMap::default(),
            evolve_aliases: FxHashMap::default(),
            baseline_rarity: baseline_rarity.into(),
        }
    }

    /// The standard table for the current card pool.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::new("one diamond");

        table.insert(
            "professor's research",
            Capability {
                supporter: Some(SupporterEffect::DrawTwo),
                ..Capability::default()
            },
        );
        table.insert(
            "iono",
            Capability {
                supporter: Some(SupporterEffect::ShuffleHandDrawFive),
                ..Capability::default()
            },
        );
        table.insert(
            "poké ball",
            Capability {
                search_item: true,
                ..Capability::default()
            },
        );
        table.insert(
            "rare candy",
            Capability {
                skip_evolution_item: true,
                ..Capability::default()
            },
        );

        for beast in ["raikou ex", "entei ex", "suicune ex"] {
            table.insert(
                beast,
                Capability {
                    end_turn_banker: true,
                    ..Capability::default()
                },
            );
        }

        table.insert(
            "sylveon ex",
            Capability {
                priority_evolution: true,
                evolve_bonus: Some(EvolveBonus::DrawTwo),
                ..Capability::default()
            },
        );
        table.insert(
            "shiinotic",
            Capability {
                evolve_bonus: Some(EvolveBonus::PullPokemonReshuffle),
                bonus_partner: Some("morelull".to_string()),
                ongoing_pokemon_pull: true,
                ..Capability::default()
            },
        );
        table.insert(
            "eevee ex",
            Capability {
                attacker_fodder: true,
                ..Capability::default()
            },
        );

        table.add_evolve_alias("eevee", "eevee ex");

        table
    }

    /// Register or replace a capability entry.
    pub fn insert(&mut self, name: impl Into<String>, capability: Capability) {
        self.entries.insert(name.into(), capability);
    }

    /// Accept `alias` wherever `base` is required as a pre-evolution.
    pub fn add_evolve_alias(&mut self, base: impl Into<String>, alias: impl Into<String>) {
        self.evolve_aliases
            .entry(base.into())
            .or_default()
            .push(alias.into());
    }

    /// Look up the capability entry for a card name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Capability> {
        self.entries.get(name)
    }

    /// Effect of playing `card` as a supporter, or `None` for non-supporters.
    #[must_use]
    pub fn supporter_effect(&self, card: &CardRecord) -> Option<SupporterEffect> {
        if card.category != super::record::Category::Supporter {
            return None;
        }
        Some(
            self.get(&card.name)
                .and_then(|c| c.supporter)
                .unwrap_or(SupporterEffect::Plain),
        )
    }

    /// True if `name` is the Basic-search item.
    #[must_use]
    pub fn is_search_item(&self, name: &str) -> bool {
        self.get(name).is_some_and(|c| c.search_item)
    }

    /// True if `name` is the evolution-skip item.
    #[must_use]
    pub fn is_skip_evolution_item(&self, name: &str) -> bool {
        self.get(name).is_some_and(|c| c.skip_evolution_item)
    }

    /// True if `name` banks a card at end of turn while active.
    #[must_use]
    pub fn is_end_turn_banker(&self, name: &str) -> bool {
        self.get(name).is_some_and(|c| c.end_turn_banker)
    }

    /// True if `name` evolves in the named priority tier.
    #[must_use]
    pub fn is_priority_evolution(&self, name: &str) -> bool {
        self.get(name).is_some_and(|c| c.priority_evolution)
    }

    /// True if `name` pulls a Pokemon from the deck each turn while in play.
    #[must_use]
    pub fn is_ongoing_puller(&self, name: &str) -> bool {
        self.get(name).is_some_and(|c| c.ongoing_pokemon_pull)
    }

    /// True if `name` is excluded from attacker classification as fodder.
    #[must_use]
    pub fn is_attacker_fodder(&self, name: &str) -> bool {
        self.get(name).is_some_and(|c| c.attacker_fodder)
    }

    /// Bonus fired when `evolution` lands on `target_name`, if any.
    #[must_use]
    pub fn evolve_bonus(&self, evolution: &str, target_name: &str) -> Option<EvolveBonus> {
        let capability = self.get(evolution)?;
        let bonus = capability.evolve_bonus?;
        match &capability.bonus_partner {
            Some(partner) if partner != target_name => None,
            _ => Some(bonus),
        }
    }

    /// Whether a card in play named `candidate` satisfies the pre-evolution
    /// requirement `required`, including aliases.
    #[must_use]
    pub fn matches_pre_evolution(&self, required: &str, candidate: &str) -> bool {
        if required == candidate {
            return true;
        }
        self.evolve_aliases
            .get(required)
            .is_some_and(|aliases| aliases.iter().any(|a| a == candidate))
    }

    /// True if `rarity` sits above the lowest tier; such basics count as
    /// key cards for the stuck-card diagnostic.
    #[must_use]
    pub fn is_above_baseline_rarity(&self, rarity: &str) -> bool {
        rarity != self.baseline_rarity
    }
}

impl Default for CapabilityTable {
    fn default() -> Self {
        Self::standard()
    }
}
