//! Phase dispatch: routes player actions to the bidding or trick engine and
//! reports what happened as a list of events to broadcast.

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::bidding::submit_bid;
use crate::domain::invariants::check_invariants;
use crate::domain::round::{advance_after_scoring, start_round, MatchDecision};
use crate::domain::scoring::RoundSummary;
use crate::domain::state::{MatchState, Phase, Play, PlayerId};
use crate::domain::tricks::play_card;
use crate::domain::Card;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerAction {
    Bid { player: PlayerId, bid: u8 },
    Play { player: PlayerId, card: Card },
}

impl PlayerAction {
    pub fn player(&self) -> &PlayerId {
        match self {
            PlayerAction::Bid { player, .. } | PlayerAction::Play { player, .. } => player,
        }
    }

    fn operation(&self) -> &'static str {
        match self {
            PlayerAction::Bid { .. } => "submit_bid",
            PlayerAction::Play { .. } => "play_card",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    PlayerJoined { player: PlayerId, seat: u8 },
    PlayerLeft { player: PlayerId },
    ReadyChanged { player: PlayerId, ready: bool },
    /// The last player left and the room was deleted.
    RoomClosed,
    /// Edge-triggered: a new round was dealt.
    RoundStarted { round_no: u32, dealer: Option<PlayerId> },
    BidPlaced { player: PlayerId, bid: u8 },
    /// The four bids summed to 13; everyone bids again from the opener.
    BidsReset { restart_from: PlayerId },
    /// Edge-triggered: Bidding -> Playing.
    BiddingComplete,
    CardPlayed { player: PlayerId, card: Card },
    TrickWon { winner: PlayerId, plays: Vec<Play> },
    RoundScored { summary: RoundSummary },
    /// Edge-triggered: the turn became a specific player.
    TurnBecame { player: PlayerId },
    /// Edge-triggered: -> Finished.
    MatchFinished,
}

/// The slice of a match that edge-triggered events are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleView {
    pub phase: Phase,
    pub active_player: Option<PlayerId>,
    pub round_no: u32,
    pub dealer: Option<PlayerId>,
}

impl From<&MatchState> for LifecycleView {
    fn from(state: &MatchState) -> Self {
        Self {
            phase: state.phase,
            active_player: state.active_player.clone(),
            round_no: state.round.round_no,
            dealer: state.round.dealer.clone(),
        }
    }
}

/// Derive edge-triggered events from before/after lifecycle views.
pub fn derive_transitions(before: &LifecycleView, after: &LifecycleView) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if after.round_no != before.round_no && after.phase == Phase::Bidding {
        events.push(GameEvent::RoundStarted {
            round_no: after.round_no,
            dealer: after.dealer.clone(),
        });
    }
    if before.phase == Phase::Bidding && after.phase == Phase::Playing {
        events.push(GameEvent::BiddingComplete);
    }
    if before.phase != Phase::Finished && after.phase == Phase::Finished {
        events.push(GameEvent::MatchFinished);
    }
    if let Some(player) = &after.active_player {
        if before.active_player.as_ref() != Some(player) {
            events.push(GameEvent::TurnBecame {
                player: player.clone(),
            });
        }
    }
    events
}

fn finish(state: &MatchState, before: &LifecycleView, mut events: Vec<GameEvent>) -> Vec<GameEvent> {
    let check = check_invariants(state);
    if let Err(err) = &check {
        error!(error = %err, "match state inconsistent after mutation");
    }
    debug_assert!(check.is_ok(), "{check:?}");
    events.extend(derive_transitions(before, &LifecycleView::from(state)));
    events
}

/// Apply one player action. Actions that do not fit the current phase are
/// rejected with `InvalidPhaseTransition` and leave the state untouched.
pub fn apply(state: &mut MatchState, action: &PlayerAction) -> Result<Vec<GameEvent>, DomainError> {
    let before = LifecycleView::from(&*state);
    let mut events = Vec::new();

    match (state.phase, action) {
        (Phase::Bidding, PlayerAction::Bid { player, bid }) => {
            let result = submit_bid(state, player, *bid)?;
            events.push(GameEvent::BidPlaced {
                player: player.clone(),
                bid: *bid,
            });
            if result.bid_sum_forbidden {
                events.push(GameEvent::BidsReset {
                    restart_from: result.active_player,
                });
            }
        }
        (Phase::Playing, PlayerAction::Play { player, card }) => {
            let result = play_card(state, player, *card)?;
            events.push(GameEvent::CardPlayed {
                player: player.clone(),
                card: *card,
            });
            if let (Some(winner), Some(plays)) = (result.trick_winner, result.completed_trick) {
                events.push(GameEvent::TrickWon { winner, plays });
            }
            if result.phase == Phase::Scoring {
                if let Some(summary) = state.history.last() {
                    events.push(GameEvent::RoundScored {
                        summary: summary.clone(),
                    });
                }
            }
        }
        (phase, action) => return Err(DomainError::phase(action.operation(), phase)),
    }

    Ok(finish(state, &before, events))
}

/// Deal the first round once the lobby is full and ready.
pub fn start_match(state: &mut MatchState) -> Result<Vec<GameEvent>, DomainError> {
    if state.phase != Phase::Waiting {
        return Err(DomainError::phase("start_match", state.phase));
    }
    let before = LifecycleView::from(&*state);
    start_round(state)?;
    Ok(finish(state, &before, Vec::new()))
}

/// Caller-driven step out of Scoring: next round or end of match.
pub fn advance(
    state: &mut MatchState,
    decision: MatchDecision,
) -> Result<Vec<GameEvent>, DomainError> {
    let before = LifecycleView::from(&*state);
    advance_after_scoring(state, decision)?;
    Ok(finish(state, &before, Vec::new()))
}
