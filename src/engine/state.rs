//! Mutable per-trial state: piles, board, trace.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::fmt;

use crate::cards::CardRecord;

/// Hand capacity.
pub const MAX_HAND: usize = 10;

/// Bench capacity.
pub const MAX_BENCH: usize = 3;

/// Location of a card in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Active,
    Bench(usize),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Bench(_) => f.write_str("bench"),
        }
    }
}

/// The board: at most one active card plus a bench of up to [`MAX_BENCH`].
#[derive(Clone, Debug, Default)]
pub struct Board {
    pub active: Option<CardRecord>,
    pub bench: SmallVec<[CardRecord; MAX_BENCH]>,
}

impl Board {
    /// Iterate over all cards in play, active first, bench left-to-right.
    pub fn in_play(&self) -> impl Iterator<Item = &CardRecord> {
        self.active.iter().chain(self.bench.iter())
    }

    /// Number of cards in play.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.active.is_some()) + self.bench.len()
    }

    /// True when nothing is in play.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_none() && self.bench.is_empty()
    }

    /// True when the bench is at capacity.
    #[must_use]
    pub fn bench_full(&self) -> bool {
        self.bench.len() >= MAX_BENCH
    }

    /// First in-play position matching `pred`, scanning active then bench
    /// left-to-right.
    pub fn find(&self, mut pred: impl FnMut(&CardRecord) -> bool) -> Option<Position> {
        if self.active.as_ref().is_some_and(&mut pred) {
            return Some(Position::Active);
        }
        self.bench
            .iter()
            .position(|c| pred(c))
            .map(Position::Bench)
    }

    /// The card at `position`. Panics on a stale position; positions are
    /// only valid until the next board mutation.
    #[must_use]
    pub fn card_at(&self, position: Position) -> &CardRecord {
        match position {
            Position::Active => self.active.as_ref().expect("stale active position"),
            Position::Bench(i) => &self.bench[i],
        }
    }

    /// Replace the card at `position` with `card`, returning the displaced
    /// card. A replaced bench card leaves its slot; the replacement joins at
    /// the right end of the bench, as an evolved card does.
    pub fn replace(&mut self, position: Position, card: CardRecord) -> CardRecord {
        match position {
            Position::Active => self
                .active
                .replace(card)
                .expect("stale active position"),
            Position::Bench(i) => {
                let displaced = self.bench.remove(i);
                self.bench.push(card);
                displaced
            }
        }
    }
}

/// All mutable state of one trial.
///
/// Cards move between `deck`, `hand`, the board, the `banked` holding pile,
/// and the `materials` pile; nothing is ever created or destroyed mid-trial,
/// so the total count is invariant.
#[derive(Clone, Debug)]
pub struct TrialState {
    /// Current turn number, 1-based. Zero during setup.
    pub turn: u32,
    /// Remaining draw pile, drawn from the front.
    pub deck: Vec<CardRecord>,
    /// Hand, capacity [`MAX_HAND`].
    pub hand: Vec<CardRecord>,
    /// Cards in play.
    pub board: Board,
    /// Cards earned at end of turn, usable only from the following turn.
    pub banked: Vec<CardRecord>,
    /// Cards out of play but still counted: pre-evolutions sitting under
    /// the card that evolved from them, played trainers, spent items.
    /// Never re-enters play.
    pub materials: Vec<CardRecord>,
    /// Every name that has appeared in hand or in play this trial.
    pub seen: FxHashSet<String>,
    /// Human-readable event log, one line per event.
    pub trace: Vec<String>,
}

impl TrialState {
    /// Start a trial from an already shuffled pile.
    #[must_use]
    pub fn new(shuffled: Vec<CardRecord>) -> Self {
        Self {
            turn: 0,
            deck: shuffled,
            hand: Vec::with_capacity(MAX_HAND),
            board: Board::default(),
            banked: Vec::new(),
            materials: Vec::new(),
            seen: FxHashSet::default(),
            trace: Vec::new(),
        }
    }

    /// Total cards across every pile; always the original deck size.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len() + self.hand.len() + self.board.len() + self.banked.len() + self.materials.len()
    }

    /// Append one line to the trace.
    pub fn note(&mut self, line: impl Into<String>) {
        self.trace.push(line.into());
    }

    /// Record a name as seen in hand or in play.
    pub fn mark_seen(&mut self, name: &str) {
        if !self.seen.contains(name) {
            self.seen.insert(name.to_string());
        }
    }

    /// Draw up to `n` cards from the top of the deck, respecting the hand
    /// limit. Returns the names drawn, in order.
    pub fn draw(&mut self, n: usize) -> Vec<String> {
        let mut drawn = Vec::new();
        for _ in 0..n {
            if self.deck.is_empty() || self.hand.len() >= MAX_HAND {
                break;
            }
            let card = self.deck.remove(0);
            self.mark_seen(&card.name);
            drawn.push(card.name.clone());
            self.hand.push(card);
        }
        drawn
    }

    /// Move a card into the hand, marking it seen. The caller checks the
    /// hand limit.
    pub fn add_to_hand(&mut self, card: CardRecord) {
        debug_assert!(self.hand.len() < MAX_HAND);
        self.mark_seen(&card.name);
        self.hand.push(card);
    }

    /// Clear the one-turn evolution locks left over from the previous turn.
    pub fn release_placement_locks(&mut self) {
        if let Some(active) = self.board.active.as_mut() {
            active.just_placed = false;
        }
        for card in self.board.bench.iter_mut() {
            card.just_placed = false;
        }
    }

    /// Format a card list for the trace, e.g. `[froakie, greninja]`.
    #[must_use]
    pub fn format_names<'a>(cards: impl IntoIterator<Item = &'a CardRecord>) -> String {
        let names: Vec<&str> = cards.into_iter().map(|c| c.name.as_str()).collect();
        format!("[{}]", names.join(", "))
    }

    /// Trace lines describing the current hand and board.
    pub fn note_piles(&mut self) {
        let hand = Self::format_names(&self.hand);
        let active = Self::format_names(self.board.active.iter());
        let bench = Self::format_names(self.board.bench.iter());
        self.note(format!("Hand: {hand}"));
        self.note(format!("Active: {active}"));
        self.note(format!("Bench: {bench}"));
    }
}
