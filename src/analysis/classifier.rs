//! Main-attacker classification rules.
//!
//! Rule application order matters: the stage-2/ex rules grant attacker
//! status first, the standalone rules second, and the exclusions run last --
//! a later rule can revoke status granted earlier.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::{CapabilityTable, CardRecord, Deck};
use crate::catalog::Catalog;

/// How an attacker reaches its playable form. Informational only; the
/// engine never branches on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionMethod {
    /// Stage 2 with the evolution-skip item in the deck.
    Stage2ViaSkipItem,
    /// Stage 2 evolved the slow way.
    Stage2,
    /// Stage 1 ex.
    Stage1Ex,
    /// Basic ex.
    BasicEx,
    /// Basic with no evolution line represented in the deck.
    BasicStandalone,
    /// Stage 1 not evolved further by any deck card.
    Stage1Standalone,
    /// Basic that is evolution material, not an attacker.
    BasicWithEvolution,
}

impl fmt::Display for EvolutionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Stage2ViaSkipItem => "Stage 2 (via Rare Candy)",
            Self::Stage2 => "Stage 2",
            Self::Stage1Ex => "Stage 1 ex",
            Self::BasicEx => "Basic ex",
            Self::BasicStandalone => "Basic (standalone)",
            Self::Stage1Standalone => "Stage 1 (standalone)",
            Self::BasicWithEvolution => "Basic (with evolution)",
        };
        f.write_str(label)
    }
}

/// The attacker names classified for one specific deck, with their
/// evolution-method labels.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MainAttackerSet {
    names: FxHashSet<String>,
    methods: FxHashMap<String, EvolutionMethod>,
}

impl MainAttackerSet {
    /// True if `name` is a main attacker for this deck.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// The attacker names.
    #[must_use]
    pub fn names(&self) -> &FxHashSet<String> {
        &self.names
    }

    /// The evolution-method label recorded for `name`, if any. Labels are
    /// kept even for names later revoked from the attacker set.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<EvolutionMethod> {
        self.methods.get(name).copied()
    }

    /// Number of distinct attacker names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if no card qualified as an attacker.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn grant(&mut self, name: &str, method: EvolutionMethod) {
        self.names.insert(name.to_string());
        self.methods.insert(name.to_string(), method);
    }

    /// Grant without clobbering a more specific label from an earlier rule.
    fn grant_if_new(&mut self, name: &str, method: EvolutionMethod) {
        if !self.names.contains(name) {
            self.grant(name, method);
        }
    }

    fn revoke(&mut self, name: &str, method: EvolutionMethod) {
        self.names.remove(name);
        self.methods.insert(name.to_string(), method);
    }
}

/// Classify the main attackers of `deck`.
///
/// Pure analysis over the deck multiset: the output is invariant under
/// permutation of the input entries.
#[must_use]
pub fn classify(
    deck: &Deck,
    catalog: &Catalog,
    capabilities: &CapabilityTable,
) -> MainAttackerSet {
    let mut attackers = MainAttackerSet::default();
    let has_skip_item = deck.has_skip_evolution_item(capabilities);

    // Group Pokemon into evolution lines keyed by ultimate basic ancestor.
    let mut lines: FxHashMap<String, Vec<&CardRecord>> = FxHashMap::default();
    for card in deck.iter().filter(|c| c.is_pokemon()) {
        lines
            .entry(catalog.ultimate_basic(card))
            .or_default()
            .push(card);
    }

    // Stage 2, Stage 1 ex, Basic ex.
    for cards in lines.values() {
        for card in cards {
            if card.is_stage2() {
                let method = if has_skip_item {
                    EvolutionMethod::Stage2ViaSkipItem
                } else {
                    EvolutionMethod::Stage2
                };
                attackers.grant(&card.name, method);
            } else if card.is_stage1() && card.is_ex {
                attackers.grant(&card.name, EvolutionMethod::Stage1Ex);
            } else if card.is_basic() && card.is_ex {
                attackers.grant(&card.name, EvolutionMethod::BasicEx);
            }
        }
    }

    // Standalone basics: no deck card evolves from them, and they are not
    // the ancestor of a skip-item Stage 2 chain.
    let evolved_from: FxHashSet<&str> = deck
        .iter()
        .filter_map(|c| c.evolves_from.as_deref())
        .filter(|f| !f.is_empty())
        .collect();
    let skip_chain_basics = skip_chain_ancestors(deck, catalog, has_skip_item);

    for card in deck.iter().filter(|c| c.is_basic()) {
        if !evolved_from.contains(card.name.as_str())
            && !skip_chain_basics.contains(card.name.as_str())
        {
            attackers.grant_if_new(&card.name, EvolutionMethod::BasicStandalone);
        }
    }

    // Standalone stage 1s: nothing in the deck evolves from them.
    for card in deck.iter().filter(|c| c.is_stage1()) {
        if !evolved_from.contains(card.name.as_str()) {
            attackers.grant_if_new(&card.name, EvolutionMethod::Stage1Standalone);
        }
    }

    // Exclusions last: combo fodder, then basics whose own evolves_from
    // link erroneously points at themselves (bad chain data).
    for card in deck.iter() {
        if capabilities.is_attacker_fodder(&card.name) {
            attackers.names.remove(&card.name);
        }
    }
    for card in deck.iter().filter(|c| c.is_basic()) {
        if card.evolves_from.as_deref() == Some(card.name.as_str()) {
            attackers.revoke(&card.name, EvolutionMethod::BasicWithEvolution);
        }
    }

    attackers
}

/// Basics that are the ultimate ancestor of a Stage 2 present in a deck
/// carrying the skip item. Such basics are evolution material, not
/// standalone attackers.
fn skip_chain_ancestors(
    deck: &Deck,
    catalog: &Catalog,
    has_skip_item: bool,
) -> FxHashSet<String> {
    if !has_skip_item {
        return FxHashSet::default();
    }
    deck.iter()
        .filter(|c| c.is_stage2())
        .map(|stage2| catalog.ultimate_basic(stage2))
        .collect()
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
            .card("suicune ex", CardEntry::basic().ex().with_rarity("four diamond"))
            .card("arceus ex", CardEntry::basic().ex().with_rarity("four diamond"))
            .card("mantyke", CardEntry::basic())
            .card("eevee", CardEntry::basic())
            .card("eevee ex", CardEntry::basic().ex().with_rarity("four diamond"))
            .card("sylveon ex", CardEntry::stage1("eevee").ex().with_rarity("four diamond"))
            .card("morelull", CardEntry::basic())
            .card("shiinotic", CardEntry::stage1("morelull"))
            .card("rare candy", CardEntry::item())
            .card("poké ball", CardEntry::item())
            .card("professor's research", CardEntry::supporter())
            .build()
    }

    fn deck(list: &[(&str, usize)]) -> Deck {
        let names: Vec<&str> = list
            .iter()
            .flat_map(|(name, count)| std::iter::repeat(*name).take(*count))
            .collect();
        catalog().deck_from_names(names).unwrap()
    }

    #[test]
    fn test_stage2_with_skip_item() {
        let deck = deck(&[
            ("froakie", 2),
            ("greninja", 2),
            ("rare candy", 2),
            ("poké ball", 14),
        ]);
        let attackers = classify(&deck, &catalog(), &CapabilityTable::standard());

        assert!(attackers.contains("greninja"));
        assert_eq!(
            attackers.method("greninja"),
            Some(EvolutionMethod::Stage2ViaSkipItem)
        );
        // Froakie is skip-chain material, not a standalone attacker.
        assert!(!attackers.contains("froakie"));
    }

    #[test]
    fn test_stage2_without_skip_item() {
        let deck = deck(&[("froakie", 2), ("greninja", 2), ("poké ball", 16)]);
        let attackers = classify(&deck, &catalog(), &CapabilityTable::standard());

        assert!(attackers.contains("greninja"));
        assert_eq!(attackers.method("greninja"), Some(EvolutionMethod::Stage2));
    }

    #[test]
    fn test_basic_ex_is_attacker() {
        let deck = deck(&[("suicune ex", 2), ("arceus ex", 1), ("poké ball", 17)]);
        let attackers = classify(&deck, &catalog(), &CapabilityTable::standard());

        assert!(attackers.contains("suicune ex"));
        assert!(attackers.contains("arceus ex"));
        assert_eq!(attackers.method("suicune ex"), Some(EvolutionMethod::BasicEx));
    }

    #[test]
    fn test_standalone_basic_is_attacker() {
        let deck = deck(&[("mantyke", 2), ("poké ball", 18)]);
        let attackers = classify(&deck, &catalog(), &CapabilityTable::standard());

        assert!(attackers.contains("mantyke"));
        assert_eq!(
            attackers.method("mantyke"),
            Some(EvolutionMethod::BasicStandalone)
        );
    }

    #[test]
    fn test_evolved_basic_is_not_standalone() {
        // Froakie is evolved by Frogadier, so it is not a standalone attacker.
        let deck = deck(&[("froakie", 2), ("frogadier", 2), ("poké ball", 16)]);
        let attackers = classify(&deck, &catalog(), &CapabilityTable::standard());

        assert!(!attackers.contains("froakie"));
        // Frogadier has no further evolution in this deck.
        assert!(attackers.contains("frogadier"));
        assert_eq!(
            attackers.method("frogadier"),
            Some(EvolutionMethod::Stage1Standalone)
        );
    }

    #[test]
    fn test_stage1_evolved_further_is_not_standalone() {
        let deck = deck(&[
            ("froakie", 2),
            ("frogadier", 2),
            ("greninja", 2),
            ("poké ball", 14),
        ]);
        let attackers = classify(&deck, &catalog(), &CapabilityTable::standard());

        assert!(!attackers.contains("frogadier"));
        assert!(attackers.contains("greninja"));
    }

    #[test]
    fn test_fodder_exclusion_revokes_ex() {
        // Eevee ex qualifies as Basic ex, then the fodder exclusion removes it.
        let deck = deck(&[("eevee ex", 2), ("sylveon ex", 2), ("poké ball", 16)]);
        let attackers = classify(&deck, &catalog(), &CapabilityTable::standard());

        assert!(!attackers.contains("eevee ex"));
        assert!(attackers.contains("sylveon ex"));
        assert_eq!(attackers.method("sylveon ex"), Some(EvolutionMethod::Stage1Ex));
    }

    #[test]
    fn test_self_referential_basic_excluded() {
        // Force the malformed shape: a basic whose evolves_from names itself.
        let mut broken = CardEntry::basic();
        broken.evolves_from = Some("loopy".to_string());
        let catalog = CatalogBuilder::new()
            .card("loopy", broken)
            .card("poké ball", CardEntry::item())
            .build();

        let names: Vec<&str> = std::iter::repeat("loopy")
            .take(2)
            .chain(std::iter::repeat("poké ball").take(18))
            .collect();
        let deck = catalog.deck_from_names(names).unwrap();
        let attackers = classify(&deck, &catalog, &CapabilityTable::standard());

        assert!(!attackers.contains("loopy"));
        assert_eq!(
            attackers.method("loopy"),
            Some(EvolutionMethod::BasicWithEvolution)
        );
    }

    #[test]
    fn test_classify_is_order_invariant() {
        let forward = deck(&[
            ("froakie", 2),
            ("greninja", 2),
            ("suicune ex", 2),
            ("rare candy", 2),
            ("poké ball", 12),
        ]);
        let reversed = {
            let mut cards: Vec<_> = forward.cards().to_vec();
            cards.reverse();
            Deck::new(cards).unwrap()
        };

        let a = classify(&forward, &catalog(), &CapabilityTable::standard());
        let b = classify(&reversed, &catalog(), &CapabilityTable::standard());
        assert_eq!(a.names(), b.names());
    }

    #[test]
    fn test_empty_attacker_set() {
        let deck = deck(&[("professor's research", 2), ("poké ball", 18)]);
        let attackers = classify(&deck, &catalog(), &CapabilityTable::standard());
        assert!(attackers.is_empty());
    }
}
