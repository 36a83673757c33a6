//! Round lifecycle: deal, rotate the dealer, score, and move on or finish.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::deck::{deal, dealing_rng, generate, shuffle};
use crate::domain::rules::PLAYERS;
use crate::domain::scoring::{score_round, RoundSummary};
use crate::domain::seats::check_can_start;
use crate::domain::state::{next_in_order, rotated_from, MatchState, Phase, PlayerId, RoundState};
use crate::errors::domain::DomainError;

/// What the caller wants after a round has been scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchDecision {
    NextRound,
    Finish,
}

/// Dealer and opening seat for the next round.
///
/// Round 1: seat 0 deals and also opens the bidding. Later rounds: the deal
/// passes one seat on and the seat after the dealer opens.
fn next_dealer_and_opener(
    seating: &[PlayerId],
    previous_dealer: Option<&PlayerId>,
) -> Option<(PlayerId, PlayerId)> {
    match previous_dealer {
        None => {
            let dealer = seating.first()?.clone();
            Some((dealer.clone(), dealer))
        }
        Some(prev) => {
            let dealer = next_in_order(seating, prev)?;
            let opener = next_in_order(seating, &dealer)?;
            Some((dealer, opener))
        }
    }
}

/// Deal a fresh round. Valid from Waiting (first round) or Scoring.
pub fn start_round(state: &mut MatchState) -> Result<(), DomainError> {
    let first_round = match state.phase {
        Phase::Waiting => {
            check_can_start(state)?;
            true
        }
        Phase::Scoring => false,
        other => return Err(DomainError::phase("start_round", other)),
    };
    let seating = state.seating_order();
    if seating.len() != PLAYERS {
        return Err(DomainError::invalid_deal(format!(
            "need {PLAYERS} seated players, have {}",
            seating.len()
        )));
    }
    let previous_dealer = if first_round {
        None
    } else {
        state.round.dealer.as_ref()
    };
    let (dealer, opener) = next_dealer_and_opener(&seating, previous_dealer)
        .ok_or_else(|| DomainError::invariant("dealer is not seated"))?;
    let turn_order = rotated_from(&seating, &opener)
        .ok_or_else(|| DomainError::invariant("opener is not seated"))?;
    let round_no = if first_round { 1 } else { state.round.round_no + 1 };

    let deck = shuffle(generate(), &mut dealing_rng(state.rng_seed, round_no));
    let mut hands = deal(&deck, &turn_order)?;

    // Validated; mutate from here on.
    for player in state.players.values_mut() {
        player.hand = hands.remove(&player.id).unwrap_or_default();
        player.current_bid = None;
        player.tricks_won = 0;
    }
    let mut round = RoundState::empty();
    round.round_no = round_no;
    round.dealer = Some(dealer.clone());
    round.turn_order = turn_order;
    state.round = round;
    state.active_player = Some(opener.clone());
    state.phase = Phase::Bidding;
    info!(round_no, dealer = %dealer, opener = %opener, "round dealt");
    Ok(())
}

/// Score the finished round; called by trick play after the 13th trick.
pub fn end_round(state: &mut MatchState) -> Result<(), DomainError> {
    if state.phase != Phase::Playing {
        return Err(DomainError::phase("end_round", state.phase));
    }
    let rows = score_round(&mut state.players);
    state.history.push(RoundSummary {
        round_no: state.round.round_no,
        dealer: state.round.dealer.clone(),
        rows,
    });
    state.phase = Phase::Scoring;
    state.active_player = None;
    info!(round_no = state.round.round_no, "round scored");
    Ok(())
}

/// Continue with another round or close the match; only valid while Scoring.
pub fn advance_after_scoring(
    state: &mut MatchState,
    decision: MatchDecision,
) -> Result<(), DomainError> {
    if state.phase != Phase::Scoring {
        return Err(DomainError::phase("advance_after_scoring", state.phase));
    }
    match decision {
        MatchDecision::NextRound => start_round(state),
        MatchDecision::Finish => {
            state.phase = Phase::Finished;
            state.active_player = None;
            info!(rounds = state.round.round_no, "match finished");
            Ok(())
        }
    }
}
