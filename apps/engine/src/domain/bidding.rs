use tracing::{debug, info};

use crate::domain::rules::{valid_bid_range, FORBIDDEN_BID_SUM, PLAYERS};
use crate::domain::state::{require_active, MatchState, Phase, PlayerId};
use crate::errors::domain::DomainError;

/// Result of a bid, telling the caller whom to notify next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidResult {
    pub phase: Phase,
    pub active_player: PlayerId,
    /// The four bids summed to 13 and were discarded; bidding restarts.
    pub bid_sum_forbidden: bool,
}

/// Bids the player may place right now (empty when it is not their turn).
pub fn legal_bids(state: &MatchState, who: &PlayerId) -> Vec<u8> {
    if state.phase != Phase::Bidding || !state.is_active(who) || state.round.bids.contains_key(who)
    {
        return Vec::new();
    }
    valid_bid_range().collect()
}

/// Record a bid, advancing the bidder turn and closing the auction after four bids.
pub fn submit_bid(
    state: &mut MatchState,
    who: &PlayerId,
    bid: u8,
) -> Result<BidResult, DomainError> {
    if state.phase != Phase::Bidding {
        return Err(DomainError::phase("submit_bid", state.phase));
    }
    let active = require_active(state, "submit_bid")?;
    if &active != who {
        return Err(DomainError::NotPlayersTurn {
            player: who.clone(),
            expected: Some(active),
        });
    }
    if !valid_bid_range().contains(&bid) {
        return Err(DomainError::invalid_bid(format!("bid {bid} outside 0..=13")));
    }
    if state.round.bids.contains_key(who) {
        return Err(DomainError::invalid_bid(format!("{who} already bid")));
    }
    let next = state
        .round
        .next_after(who)
        .ok_or_else(|| DomainError::invariant("bidder missing from turn order"))?;
    let first = state
        .round
        .turn_order
        .first()
        .cloned()
        .ok_or_else(|| DomainError::invariant("turn order is empty"))?;

    // Validated; mutate from here on.
    state.round.bids.insert(who.clone(), bid);
    if let Some(player) = state.players.get_mut(who) {
        player.current_bid = Some(bid);
    }
    state.active_player = Some(next.clone());
    debug!(player = %who, bid, "bid recorded");

    if state.round.bids.len() < PLAYERS {
        return Ok(BidResult {
            phase: Phase::Bidding,
            active_player: next,
            bid_sum_forbidden: false,
        });
    }

    let total: u32 = state.round.bids.values().map(|&b| b as u32).sum();
    if total == FORBIDDEN_BID_SUM {
        state.round.bids.clear();
        for player in state.players.values_mut() {
            player.current_bid = None;
        }
        state.active_player = Some(first.clone());
        info!(round_no = state.round.round_no, "bids summed to 13; bidding restarts");
        return Ok(BidResult {
            phase: Phase::Bidding,
            active_player: first,
            bid_sum_forbidden: true,
        });
    }

    state.phase = Phase::Playing;
    state.active_player = Some(first.clone());
    info!(round_no = state.round.round_no, total, "bidding complete");
    Ok(BidResult {
        phase: Phase::Playing,
        active_player: first,
        bid_sum_forbidden: false,
    })
}
