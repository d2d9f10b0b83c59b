//! The evolution tier of the action loop.
//!
//! Gated entirely off before turn 2. Within a pass, evolutions apply in
//! priority order until exhausted:
//!
//! 1. skip-item: a Stage 2 in hand whose ultimate Basic ancestor is in
//!    play, consuming the evolution-skip item;
//! 2. named priority evolutions from the capability table;
//! 3. every other Stage 1/Stage 2 whose required pre-evolution is in play.
//!
//! A just-placed card never evolves, and is never evolved onto, the turn it
//! entered play. Evolved cards themselves carry no lock, so a chain can
//! continue within the same turn.

use crate::cards::{CapabilityTable, EvolveBonus};
use crate::catalog::Catalog;
use crate::core::SimRng;

use super::state::{Position, TrialState, MAX_HAND};

/// Run the evolution tier for one pass of the action loop. Returns true if
/// at least one evolution resolved.
pub fn try_evolutions(
    state: &mut TrialState,
    catalog: &Catalog,
    capabilities: &CapabilityTable,
    rng: &mut SimRng,
) -> bool {
    // Global gate: no evolutions on turn 1.
    if state.turn < 2 {
        return false;
    }

    let mut msgs = Vec::new();
    let mut evolved_any = false;
    while evolve_once(state, catalog, capabilities, rng, &mut msgs) {
        evolved_any = true;
    }
    if evolved_any {
        state.trace.append(&mut msgs);
    }
    evolved_any
}

/// Select and apply the single highest-priority evolution available.
fn evolve_once(
    state: &mut TrialState,
    catalog: &Catalog,
    capabilities: &CapabilityTable,
    rng: &mut SimRng,
    msgs: &mut Vec<String>,
) -> bool {
    skip_item_evolution(state, catalog, capabilities, rng, msgs)
        || priority_evolution(state, capabilities, rng, msgs)
        || regular_evolution(state, capabilities, rng, msgs)
}

/// Tier 1: Stage 2 straight onto its ultimate Basic ancestor, consuming the
/// skip item.
fn skip_item_evolution(
    state: &mut TrialState,
    catalog: &Catalog,
    capabilities: &CapabilityTable,
    rng: &mut SimRng,
    msgs: &mut Vec<String>,
) -> bool {
    let Some(item_idx) = state
        .hand
        .iter()
        .position(|c| capabilities.is_skip_evolution_item(&c.name))
    else {
        return false;
    };
    let item_name = state.hand[item_idx].name.clone();

    for idx in 0..state.hand.len() {
        if !state.hand[idx].is_stage2() {
            continue;
        }
        let ancestor = catalog.ultimate_basic(&state.hand[idx]);
        let Some(pos) = state.board.find(|c| c.name == ancestor) else {
            continue;
        };
        if state.board.card_at(pos).just_placed {
            msgs.push(format!(
                "Attempted to evolve {ancestor} with {item_name} in {pos} but failed \
                 (just placed this turn)"
            ));
            continue;
        }

        let item = state.hand.remove(item_idx);
        let evo_idx = if item_idx < idx { idx - 1 } else { idx };
        state.materials.push(item);
        apply_evolution(state, evo_idx, pos, Some(&item_name), capabilities, rng, msgs);
        return true;
    }

    false
}

/// Tier 2: named evolutions that jump the regular queue.
fn priority_evolution(
    state: &mut TrialState,
    capabilities: &CapabilityTable,
    rng: &mut SimRng,
    msgs: &mut Vec<String>,
) -> bool {
    scan_evolutions(state, capabilities, rng, msgs, true)
}

/// Tier 3: every remaining Stage 1/Stage 2 whose pre-evolution is in play.
fn regular_evolution(
    state: &mut TrialState,
    capabilities: &CapabilityTable,
    rng: &mut SimRng,
    msgs: &mut Vec<String>,
) -> bool {
    scan_evolutions(state, capabilities, rng, msgs, false)
}

fn scan_evolutions(
    state: &mut TrialState,
    capabilities: &CapabilityTable,
    rng: &mut SimRng,
    msgs: &mut Vec<String>,
    priority_tier: bool,
) -> bool {
    for idx in 0..state.hand.len() {
        let card = &state.hand[idx];
        if !card.is_evolution() {
            continue;
        }
        if capabilities.is_priority_evolution(&card.name) != priority_tier {
            continue;
        }
        let Some(required) = card.evolves_from.clone() else {
            continue;
        };
        if required.is_empty() {
            continue;
        }
        let evo_name = card.name.clone();

        let Some(pos) = state
            .board
            .find(|c| capabilities.matches_pre_evolution(&required, &c.name))
        else {
            continue;
        };
        let target = state.board.card_at(pos);
        if target.just_placed {
            msgs.push(format!(
                "Attempted to evolve {} to {evo_name} in {pos} but failed \
                 (just placed this turn)",
                target.name
            ));
            continue;
        }

        apply_evolution(state, idx, pos, None, capabilities, rng, msgs);
        return true;
    }

    false
}

/// Move the evolution card from hand onto the board, stash the displaced
/// pre-evolution, and fire any evolve bonus.
fn apply_evolution(
    state: &mut TrialState,
    hand_idx: usize,
    pos: Position,
    via_item: Option<&str>,
    capabilities: &CapabilityTable,
    rng: &mut SimRng,
    msgs: &mut Vec<String>,
) {
    let evo = state.hand.remove(hand_idx);
    let evo_name = evo.name.clone();
    let target_name = state.board.card_at(pos).name.clone();
    let bonus = capabilities.evolve_bonus(&evo_name, &target_name);

    let displaced = state.board.replace(pos, evo);
    state.materials.push(displaced);
    state.mark_seen(&evo_name);

    match via_item {
        Some(item) => msgs.push(format!("{target_name} -> {evo_name} with {item} in {pos}")),
        None => msgs.push(format!("{target_name} -> {evo_name} in {pos}")),
    }

    match bonus {
        Some(EvolveBonus::DrawTwo) => {
            let drawn = state.draw(2);
            msgs.push(format!(
                "{evo_name} drew {} cards: {}",
                drawn.len(),
                drawn.join(", ")
            ));
        }
        Some(EvolveBonus::PullPokemonReshuffle) => {
            match state.deck.iter().position(|c| c.is_pokemon()) {
                Some(j) if state.hand.len() < MAX_HAND => {
                    let found = state.deck.remove(j);
                    msgs.push(format!(
                        "{evo_name} ability: pulled {} from deck on evolution",
                        found.name
                    ));
                    state.add_to_hand(found);
                }
                Some(_) => msgs.push(format!(
                    "{evo_name} ability: hand full, could not pull on evolution"
                )),
                None => msgs.push(format!("{evo_name} ability: no Pokemon left in deck")),
            }
            rng.shuffle(&mut state.deck);
            msgs.push("Shuffled deck after evolution ability".to_string());
        }
        None => {}
    }
}
