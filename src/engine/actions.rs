//! Non-evolution turn actions.
//!
//! Each function applies at most the policy's allowance for one pass of the
//! fixed-point action loop and reports whether it changed anything. Scans
//! are left-to-right over the current hand/board order; every mutation goes
//! through a fresh scan on the next pass.

use crate::cards::{CapabilityTable, SupporterEffect};
use crate::core::SimRng;

use super::state::{Position, TrialState, MAX_HAND};

/// Auto-place Basics from hand: active first if empty, then bench to
/// capacity. Every placement is marked with the one-turn evolution lock.
pub fn place_basics(state: &mut TrialState) -> bool {
    let mut placed = false;

    if state.board.active.is_none() {
        if let Some(i) = state.hand.iter().position(|c| c.is_basic()) {
            let mut card = state.hand.remove(i);
            card.just_placed = true;
            state.mark_seen(&card.name);
            state.note(format!("Placed {} in active", card.name));
            state.board.active = Some(card);
            placed = true;
        }
    }

    while !state.board.bench_full() {
        let Some(i) = state.hand.iter().position(|c| c.is_basic()) else {
            break;
        };
        let mut card = state.hand.remove(i);
        card.just_placed = true;
        state.mark_seen(&card.name);
        state.note(format!("Placed {} in bench", card.name));
        state.board.bench.push(card);
        placed = true;
    }

    placed
}

/// Play at most one supporter for the turn.
///
/// Priority: the draw-two researcher, then the hand-reset disruption card,
/// then any other supporter, first match in current hand order.
pub fn play_supporter(
    state: &mut TrialState,
    capabilities: &CapabilityTable,
    rng: &mut SimRng,
    supporter_used: &mut bool,
) -> bool {
    if *supporter_used {
        return false;
    }

    let tiers = [
        Some(SupporterEffect::DrawTwo),
        Some(SupporterEffect::ShuffleHandDrawFive),
        None,
    ];
    for tier in tiers {
        let found = state.hand.iter().position(|c| {
            let effect = capabilities.supporter_effect(c);
            match tier {
                Some(wanted) => effect == Some(wanted),
                None => effect.is_some(),
            }
        });
        let Some(i) = found else { continue };

        let card = state.hand.remove(i);
        *supporter_used = true;

        match capabilities.supporter_effect(&card) {
            Some(SupporterEffect::DrawTwo) => {
                let drawn = state.draw(2);
                state.note(format!(
                    "Played supporter: {} (drew {} cards: {})",
                    card.name,
                    drawn.len(),
                    drawn.join(", ")
                ));
            }
            Some(SupporterEffect::ShuffleHandDrawFive) => {
                let returned = state.hand.len();
                let hand = std::mem::take(&mut state.hand);
                state.deck.extend(hand);
                rng.shuffle(&mut state.deck);
                let drawn = state.draw(5);
                state.note(format!(
                    "Played supporter: {} (shuffled {} cards back, drew {}: {})",
                    card.name,
                    returned,
                    drawn.len(),
                    drawn.join(", ")
                ));
            }
            _ => state.note(format!("Played supporter: {}", card.name)),
        }
        state.materials.push(card);
        return true;
    }

    false
}

/// Play one search item: consumes the item and moves the first Basic found
/// in the deck into hand. The item is spent even when the hand is full or
/// the deck holds no Basic.
pub fn play_search_item(state: &mut TrialState, capabilities: &CapabilityTable) -> bool {
    let Some(i) = state
        .hand
        .iter()
        .position(|c| capabilities.is_search_item(&c.name))
    else {
        return false;
    };

    let item = state.hand.remove(i);
    match state.deck.iter().position(|c| c.is_basic()) {
        Some(j) if state.hand.len() < MAX_HAND => {
            let found = state.deck.remove(j);
            state.note(format!("Played {}: found {}", item.name, found.name));
            state.add_to_hand(found);
        }
        Some(_) => state.note(format!("Played {}: hand full", item.name)),
        None => state.note(format!("Played {}: no basics found", item.name)),
    }
    state.materials.push(item);
    true
}

/// Force an end-of-turn banker from the bench into the active spot,
/// displacing the current active to the bench. Gated off before turn 2 and
/// inert while a banker is already active.
pub fn reposition_banker(state: &mut TrialState, capabilities: &CapabilityTable) -> bool {
    if state.turn < 2 {
        return false;
    }
    if state
        .board
        .active
        .as_ref()
        .is_some_and(|c| capabilities.is_end_turn_banker(&c.name))
    {
        return false;
    }
    let Some(Position::Bench(i)) = state
        .board
        .find(|c| capabilities.is_end_turn_banker(&c.name))
    else {
        return false;
    };

    let banker = state.board.bench.remove(i);
    let mut line = format!("Switched {} to active", banker.name);
    let displaced = state.board.active.replace(banker);
    if let Some(card) = displaced {
        line.push_str(&format!(" (moved {} to bench)", card.name));
        state.board.bench.push(card);
    }
    state.note(line);
    true
}

/// End-of-turn trigger: while a banker is active, bank the top deck card.
/// Banked cards join the hand at the start of the next turn.
pub fn bank_end_of_turn(state: &mut TrialState, capabilities: &CapabilityTable) {
    let banker_active = state
        .board
        .active
        .as_ref()
        .is_some_and(|c| capabilities.is_end_turn_banker(&c.name));
    if !banker_active || state.deck.is_empty() {
        return;
    }

    let card = state.deck.remove(0);
    state.note(format!(
        "End-of-turn draw: {} (available next turn)",
        card.name
    ));
    state.banked.push(card);
}

/// Start-of-turn hook: each in-play copy of an ongoing-pull card moves one
/// Pokemon from the deck into hand, then the deck is reshuffled.
pub fn ongoing_pull(state: &mut TrialState, capabilities: &CapabilityTable, rng: &mut SimRng) {
    let pullers = state
        .board
        .in_play()
        .filter(|c| capabilities.is_ongoing_puller(&c.name))
        .count();

    for _ in 0..pullers {
        match state.deck.iter().position(|c| c.is_pokemon()) {
            Some(j) if state.hand.len() < MAX_HAND => {
                let found = state.deck.remove(j);
                state.note(format!("Ongoing ability: pulled {} from deck", found.name));
                state.add_to_hand(found);
            }
            Some(_) => state.note("Ongoing ability: hand full, could not pull".to_string()),
            None => state.note("Ongoing ability: no Pokemon left in deck".to_string()),
        }
        rng.shuffle(&mut state.deck);
        state.note("Shuffled deck after ongoing ability".to_string());
    }
}
