use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::rules::PLAYERS;
use crate::domain::scoring::RoundSummary;
use crate::domain::{Card, Suit};
use crate::errors::domain::{DomainError, SeatErrorKind};

/// Stable identity of a seated player for the whole match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Overall match progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Lobby: players join and get ready.
    Waiting,
    /// Players bid in turn order.
    Bidding,
    /// Tricks are being played.
    Playing,
    /// Round scored; waiting for the caller to continue or finish.
    Scoring,
    /// Match over.
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    /// Seat 0..=3, assigned in join order.
    pub seat: u8,
    pub ready: bool,
    pub hand: Vec<Card>,
    pub current_bid: Option<u8>,
    pub tricks_won: u8,
    pub cumulative_score: i32,
    /// Cumulative score before the last scored round, for delta display.
    pub previous_cumulative_score: i32,
}

impl Player {
    pub fn new(id: PlayerId, display_name: impl Into<String>, seat: u8) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            seat,
            ready: false,
            hand: Vec::new(),
            current_bid: None,
            tricks_won: 0,
            cumulative_score: 0,
            previous_cumulative_score: 0,
        }
    }

    /// Points gained or lost in the last scored round.
    pub fn round_delta(&self) -> i32 {
        self.cumulative_score - self.previous_cumulative_score
    }
}

/// One card played into a trick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub player: PlayerId,
    pub card: Card,
}

impl Play {
    pub fn new(player: PlayerId, card: Card) -> Self {
        Self { player, card }
    }
}

/// Per-round state relevant during bidding and trick play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// 1-based; 0 before the first deal.
    pub round_no: u32,
    pub dealer: Option<PlayerId>,
    /// Fixed for the round; entry 0 bids first and leads the first trick.
    pub turn_order: Vec<PlayerId>,
    pub bids: BTreeMap<PlayerId, u8>,
    /// Ordered plays for the current trick.
    pub current_trick: Vec<Play>,
    pub tricks_resolved: u8,
    pub last_trick_winner: Option<PlayerId>,
    /// Last completed trick (4 cards) for display purposes.
    pub last_trick: Option<Vec<Play>>,
}

impl RoundState {
    pub fn empty() -> Self {
        Self {
            round_no: 0,
            dealer: None,
            turn_order: Vec::with_capacity(PLAYERS),
            bids: BTreeMap::new(),
            current_trick: Vec::with_capacity(PLAYERS),
            tricks_resolved: 0,
            last_trick_winner: None,
            last_trick: None,
        }
    }

    /// Led suit of the current trick, if anyone has played.
    pub fn led_suit(&self) -> Option<Suit> {
        self.current_trick.first().map(|p| p.card.suit)
    }

    /// Player after `current` in this round's turn order (cyclic).
    pub fn next_after(&self, current: &PlayerId) -> Option<PlayerId> {
        next_in_order(&self.turn_order, current)
    }
}

/// Entire match container; the value synchronized with the room store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub phase: Phase,
    pub players: BTreeMap<PlayerId, Player>,
    pub round: RoundState,
    /// Player whose turn it is; None when nobody can act.
    pub active_player: Option<PlayerId>,
    /// Base seed; every round's deal is derived from it.
    pub rng_seed: u64,
    /// Score table, one entry per scored round.
    pub history: Vec<RoundSummary>,
}

impl MatchState {
    pub fn new(rng_seed: u64) -> Self {
        Self {
            phase: Phase::Waiting,
            players: BTreeMap::new(),
            round: RoundState::empty(),
            active_player: None,
            rng_seed,
            history: Vec::new(),
        }
    }

    /// New match seeded from the thread RNG.
    pub fn with_random_seed() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Players ordered by seat.
    pub fn seating_order(&self) -> Vec<PlayerId> {
        let mut seated: Vec<&Player> = self.players.values().collect();
        seated.sort_by_key(|p| p.seat);
        seated.into_iter().map(|p| p.id.clone()).collect()
    }

    /// Cards that have left the hands since the deal.
    pub fn cards_played_this_round(&self) -> usize {
        self.round.tricks_resolved as usize * PLAYERS + self.round.current_trick.len()
    }

    pub fn cards_in_hands(&self) -> usize {
        self.players.values().map(|p| p.hand.len()).sum()
    }

    pub fn is_active(&self, id: &PlayerId) -> bool {
        self.active_player.as_ref() == Some(id)
    }
}

/// Entry after `current` in a cyclic order.
pub fn next_in_order(order: &[PlayerId], current: &PlayerId) -> Option<PlayerId> {
    let idx = order.iter().position(|id| id == current)?;
    order.get((idx + 1) % order.len()).cloned()
}

/// `order` rotated so that it starts at `first`.
pub fn rotated_from(order: &[PlayerId], first: &PlayerId) -> Option<Vec<PlayerId>> {
    let idx = order.iter().position(|id| id == first)?;
    let mut rotated = order.to_vec();
    rotated.rotate_left(idx);
    Some(rotated)
}

pub fn require_player<'a>(state: &'a MatchState, id: &PlayerId) -> Result<&'a Player, DomainError> {
    state
        .players
        .get(id)
        .ok_or(DomainError::Seat(SeatErrorKind::UnknownPlayer))
}

pub fn require_active(state: &MatchState, ctx: &'static str) -> Result<PlayerId, DomainError> {
    state.active_player.clone().ok_or_else(|| {
        DomainError::invariant(format!("active player must be set ({ctx})"))
    })
}
