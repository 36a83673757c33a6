//! Self-consistency checks for a `MatchState` snapshot.

use std::collections::HashSet;

use crate::domain::rules::{DECK_SIZE, FORBIDDEN_BID_SUM, PLAYERS, TRICKS_PER_ROUND};
use crate::domain::state::{MatchState, Phase};
use crate::errors::domain::DomainError;

pub fn check_invariants(state: &MatchState) -> Result<(), DomainError> {
    if state.phase == Phase::Waiting {
        if state.players.len() > PLAYERS {
            return Err(DomainError::invariant("more than 4 players seated"));
        }
        return Ok(());
    }

    if state.players.len() != PLAYERS {
        return Err(DomainError::invariant(format!(
            "expected {PLAYERS} players, found {}",
            state.players.len()
        )));
    }
    let order: HashSet<_> = state.round.turn_order.iter().collect();
    if order.len() != PLAYERS
        || state.round.turn_order.len() != PLAYERS
        || !state.players.keys().all(|id| order.contains(id))
    {
        return Err(DomainError::invariant(
            "turn order is not a permutation of the players",
        ));
    }

    let in_play = matches!(state.phase, Phase::Bidding | Phase::Playing);
    if in_play && state.cards_in_hands() + state.cards_played_this_round() != DECK_SIZE {
        return Err(DomainError::invariant(format!(
            "{} cards in hands + {} played != {DECK_SIZE}",
            state.cards_in_hands(),
            state.cards_played_this_round()
        )));
    }

    let bids = &state.round.bids;
    if bids.len() > PLAYERS {
        return Err(DomainError::invariant("more than 4 bids"));
    }
    if state.phase == Phase::Playing {
        let total: u32 = bids.values().map(|&b| b as u32).sum();
        if bids.len() != PLAYERS || total == FORBIDDEN_BID_SUM {
            return Err(DomainError::invariant("playing without a legal bid set"));
        }
    }

    if state.round.current_trick.len() >= PLAYERS {
        return Err(DomainError::invariant("unresolved full trick"));
    }

    let won: u32 = state.players.values().map(|p| p.tricks_won as u32).sum();
    if won != state.round.tricks_resolved as u32 || state.round.tricks_resolved > TRICKS_PER_ROUND {
        return Err(DomainError::invariant(format!(
            "tricks won {won} != tricks resolved {}",
            state.round.tricks_resolved
        )));
    }
    Ok(())
}
