//! What one seat is allowed to see: own hand, everyone's public counters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::bidding::legal_bids;
use crate::domain::scoring::RoundSummary;
use crate::domain::state::{require_player, MatchState, Phase, Play, PlayerId};
use crate::domain::tricks::legal_plays;
use crate::domain::{Card, Suit};
use crate::errors::domain::DomainError;

/// Public information about one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub id: PlayerId,
    pub display_name: String,
    pub seat: u8,
    pub ready: bool,
    pub cards_in_hand: usize,
    pub current_bid: Option<u8>,
    pub tricks_won: u8,
    pub cumulative_score: i32,
    pub round_delta: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleMatchState {
    pub viewer: PlayerId,
    pub phase: Phase,
    pub round_no: u32,
    pub dealer: Option<PlayerId>,
    pub turn_order: Vec<PlayerId>,
    pub active_player: Option<PlayerId>,
    /// The viewer's own cards.
    pub hand: Vec<Card>,
    /// Seats in seat order.
    pub seats: Vec<SeatView>,
    pub bids: BTreeMap<PlayerId, u8>,
    pub current_trick: Vec<Play>,
    pub last_trick: Option<Vec<Play>>,
    pub last_trick_winner: Option<PlayerId>,
    pub legal_bids: Vec<u8>,
    pub legal_plays: Vec<Card>,
    pub history: Vec<RoundSummary>,
}

impl VisibleMatchState {
    pub fn for_player(state: &MatchState, viewer: &PlayerId) -> Result<Self, DomainError> {
        let me = require_player(state, viewer)?;
        let mut seats: Vec<SeatView> = state
            .players
            .values()
            .map(|p| SeatView {
                id: p.id.clone(),
                display_name: p.display_name.clone(),
                seat: p.seat,
                ready: p.ready,
                cards_in_hand: p.hand.len(),
                current_bid: p.current_bid,
                tricks_won: p.tricks_won,
                cumulative_score: p.cumulative_score,
                round_delta: p.round_delta(),
            })
            .collect();
        seats.sort_by_key(|s| s.seat);

        let is_my_turn = state.is_active(viewer);
        Ok(Self {
            viewer: viewer.clone(),
            phase: state.phase,
            round_no: state.round.round_no,
            dealer: state.round.dealer.clone(),
            turn_order: state.round.turn_order.clone(),
            active_player: state.active_player.clone(),
            hand: me.hand.clone(),
            seats,
            bids: state.round.bids.clone(),
            current_trick: state.round.current_trick.clone(),
            last_trick: state.round.last_trick.clone(),
            last_trick_winner: state.round.last_trick_winner.clone(),
            legal_bids: legal_bids(state, viewer),
            legal_plays: if is_my_turn {
                legal_plays(state, viewer)
            } else {
                Vec::new()
            },
            history: state.history.clone(),
        })
    }

    pub fn is_my_turn(&self) -> bool {
        self.active_player.as_ref() == Some(&self.viewer)
    }

    pub fn led_suit(&self) -> Option<Suit> {
        self.current_trick.first().map(|p| p.card.suit)
    }

    /// Sum of the bids placed so far this round.
    pub fn bid_total(&self) -> u32 {
        self.bids.values().map(|&b| b as u32).sum()
    }
}
