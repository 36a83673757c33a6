use tracing::debug;

use crate::domain::round::end_round;
use crate::domain::rules::{PLAYERS, TRICKS_PER_ROUND, TRUMP};
use crate::domain::state::{MatchState, Phase, Play, PlayerId};
use crate::domain::{card_beats, hand_has_suit, Card, Suit};
use crate::errors::domain::{DomainError, IllegalPlayKind};

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    /// Winner of the trick this card completed, if any.
    pub trick_winner: Option<PlayerId>,
    /// The completed trick, in play order.
    pub completed_trick: Option<Vec<Play>>,
    /// Phase after the play (Scoring once the 13th trick resolves).
    pub phase: Phase,
    pub active_player: Option<PlayerId>,
}

fn check_play(state: &MatchState, who: &PlayerId, card: Card) -> Result<(), IllegalPlayKind> {
    if !state.is_active(who) {
        return Err(IllegalPlayKind::NotYourTurn);
    }
    let hand = state
        .players
        .get(who)
        .map(|p| p.hand.as_slice())
        .unwrap_or_default();
    if !hand.contains(&card) {
        return Err(IllegalPlayKind::CardNotInHand);
    }
    if let Some(lead) = state.round.led_suit() {
        if card.suit != lead && hand_has_suit(hand, lead) {
            return Err(IllegalPlayKind::MustFollowSuit);
        }
    }
    Ok(())
}

/// Whether `who` may play `card` now. Leading allows any card, trump included.
pub fn is_legal_play(state: &MatchState, who: &PlayerId, card: Card) -> bool {
    state.phase == Phase::Playing && check_play(state, who, card).is_ok()
}

/// Cards the player may play, independent of turn enforcement.
pub fn legal_plays(state: &MatchState, who: &PlayerId) -> Vec<Card> {
    if state.phase != Phase::Playing {
        return Vec::new();
    }
    let Some(player) = state.players.get(who) else {
        return Vec::new();
    };
    if let Some(lead) = state.round.led_suit() {
        if hand_has_suit(&player.hand, lead) {
            return player
                .hand
                .iter()
                .copied()
                .filter(|c| c.suit == lead)
                .collect();
        }
    }
    player.hand.clone()
}

/// Index of the winning play: running best under the fixed trump.
pub fn resolve_trick(plays: &[Play]) -> Option<usize> {
    let lead = plays.first()?.card.suit;
    winning_index(plays, lead)
}

/// Winner for an explicit led suit. The result does not depend on the order
/// of `plays`, only on which cards are in it.
pub fn winning_index(plays: &[Play], lead: Suit) -> Option<usize> {
    if plays.is_empty() {
        return None;
    }
    let mut best = 0usize;
    for (i, play) in plays.iter().enumerate().skip(1) {
        if card_beats(play.card, plays[best].card, lead, TRUMP) {
            best = i;
        }
    }
    Some(best)
}

/// Play a card into the current trick, enforcing turn, suit-following, and phase.
pub fn play_card(
    state: &mut MatchState,
    who: &PlayerId,
    card: Card,
) -> Result<PlayCardResult, DomainError> {
    if state.phase != Phase::Playing {
        return Err(DomainError::phase("play_card", state.phase));
    }
    check_play(state, who, card).map_err(DomainError::IllegalPlay)?;
    let next = state
        .round
        .next_after(who)
        .ok_or_else(|| DomainError::invariant("player missing from turn order"))?;

    if let Some(player) = state.players.get_mut(who) {
        player.hand.retain(|c| *c != card);
    }
    state.round.current_trick.push(Play::new(who.clone(), card));
    state.active_player = Some(next);
    debug!(player = %who, card = %card, "card played");

    let mut result = PlayCardResult {
        trick_winner: None,
        completed_trick: None,
        phase: Phase::Playing,
        active_player: state.active_player.clone(),
    };
    if state.round.current_trick.len() < PLAYERS {
        return Ok(result);
    }

    let winner = resolve_completed_trick(state)?;
    result.trick_winner = Some(winner);
    result.completed_trick = state.round.last_trick.clone();
    result.phase = state.phase;
    result.active_player = state.active_player.clone();
    Ok(result)
}

/// Credit the winner of a full trick and clear it; ends the round after trick 13.
fn resolve_completed_trick(state: &mut MatchState) -> Result<PlayerId, DomainError> {
    let idx = resolve_trick(&state.round.current_trick)
        .ok_or_else(|| DomainError::invariant("resolving an empty trick"))?;
    let winner = state.round.current_trick[idx].player.clone();

    if let Some(player) = state.players.get_mut(&winner) {
        player.tricks_won += 1;
    }
    let trick = std::mem::take(&mut state.round.current_trick);
    state.round.last_trick = Some(trick);
    state.round.last_trick_winner = Some(winner.clone());
    state.round.tricks_resolved += 1;
    state.active_player = Some(winner.clone());
    debug!(
        winner = %winner,
        trick_no = state.round.tricks_resolved,
        "trick resolved"
    );

    if state.round.tricks_resolved == TRICKS_PER_ROUND {
        end_round(state)?;
    }
    Ok(winner)
}
