//! Drives whole matches through the room service with four bots.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use callbreak_engine::domain::scoring::RoundSummary;
use callbreak_engine::room::Versioned;
use callbreak_engine::{
    GameEvent, InMemoryRoomStore, MatchDecision, MatchState, MutationOutcome, Phase,
    PlayerAction, PlayerId, RoomCode, RoomService, RoomStore, ServiceError,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::bots::RandomBot;

/// Upper bound on submitted actions per round; a round needs 56 without resets.
const MAX_ACTIONS_PER_ROUND: u32 = 2_000;
const MAX_TRANSIENT_RETRIES: u32 = 3;

#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("bot {0} had no legal move")]
    NoLegalMove(PlayerId),
    #[error("match stalled after {0} actions")]
    Stalled(u32),
    #[error("nobody to act in phase {0:?}")]
    NoActivePlayer(Phase),
    #[error("room {0} vanished")]
    RoomMissing(RoomCode),
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub match_no: u32,
    pub seed: u64,
    pub room: String,
    pub players: Vec<PlayerId>,
    pub final_scores: [i32; 4],
    pub rounds: Vec<RoundSummary>,
    pub bid_resets: u32,
    pub actions: u32,
    /// State updates delivered to the room subscriber.
    pub notifications: u64,
}

pub struct Simulator {
    service: RoomService<InMemoryRoomStore>,
    rounds: u32,
}

impl Simulator {
    pub fn new(rounds: u32) -> Self {
        Self {
            service: RoomService::new(Arc::new(InMemoryRoomStore::new())),
            rounds,
        }
    }

    pub fn simulate_match(&self, match_no: u32, seed: u64) -> Result<MatchResult, SimError> {
        let mut bots: Vec<RandomBot> = (0..4u64)
            .map(|seat| {
                let id = PlayerId::new(format!("m{match_no}-bot{seat}"));
                RandomBot::new(id, seed.wrapping_mul(31).wrapping_add(seat))
            })
            .collect();

        let created = self
            .service
            .create_room(bots[0].id.clone(), "Bot 0", Some(seed))?;
        let room = created.room;
        let notifications = Arc::new(AtomicU64::new(0));
        let counter = notifications.clone();
        let subscription = self.service.store().subscribe(
            &room,
            Arc::new(move |_: &RoomCode, _: &Versioned<MatchState>| {
                counter.fetch_add(1, Ordering::Relaxed);
            }),
        );

        for (seat, bot) in bots.iter().enumerate().skip(1) {
            self.service
                .join_room(&room, bot.id.clone(), &format!("Bot {seat}"))?;
            self.service.set_ready(&room, &bot.id, true)?;
        }
        self.service.start_match(&room)?;

        let mut actions = 0u32;
        let mut bid_resets = 0u32;
        let (state, version) = loop {
            let Versioned { version, value: state } = self.current(&room)?;
            let outcome = match state.phase {
                Phase::Bidding | Phase::Playing => {
                    actions += 1;
                    if actions > MAX_ACTIONS_PER_ROUND * self.rounds {
                        return Err(SimError::Stalled(actions));
                    }
                    let action = self.next_action(&room, &state, &mut bots)?;
                    self.with_retry(|| self.service.submit(&room, &action))?
                }
                Phase::Scoring if state.round.round_no < self.rounds => {
                    self.with_retry(|| self.service.advance(&room, MatchDecision::NextRound))?
                }
                Phase::Scoring => {
                    self.with_retry(|| self.service.advance(&room, MatchDecision::Finish))?
                }
                Phase::Finished => break (state, version),
                Phase::Waiting => return Err(SimError::Stalled(actions)),
            };
            bid_resets += outcome
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::BidsReset { .. }))
                .count() as u32;
        };

        self.service.store().unsubscribe(&room, subscription);
        self.service
            .store()
            .remove(&room, version)
            .map_err(ServiceError::from)?;

        let players: Vec<PlayerId> = bots.into_iter().map(|b| b.id).collect();
        let mut final_scores = [0i32; 4];
        for (slot, id) in final_scores.iter_mut().zip(&players) {
            *slot = state.players.get(id).map_or(0, |p| p.cumulative_score);
        }
        info!(match_no, seed, ?final_scores, bid_resets, "match finished");

        Ok(MatchResult {
            match_no,
            seed,
            room: room.to_string(),
            players,
            final_scores,
            rounds: state.history,
            bid_resets,
            actions,
            notifications: notifications.load(Ordering::Relaxed),
        })
    }

    fn current(&self, room: &RoomCode) -> Result<Versioned<MatchState>, SimError> {
        self.service
            .store()
            .read(room)
            .map_err(ServiceError::from)?
            .ok_or_else(|| SimError::RoomMissing(room.clone()))
    }

    fn next_action(
        &self,
        room: &RoomCode,
        state: &MatchState,
        bots: &mut [RandomBot],
    ) -> Result<PlayerAction, SimError> {
        let active = state
            .active_player
            .clone()
            .ok_or(SimError::NoActivePlayer(state.phase))?;
        let bot = bots
            .iter_mut()
            .find(|b| b.id == active)
            .ok_or_else(|| SimError::NoLegalMove(active.clone()))?;
        let (_, view) = self.service.view(room, &active)?;

        let action = if state.phase == Phase::Bidding {
            let bid = bot
                .choose_bid(&view)
                .ok_or_else(|| SimError::NoLegalMove(active.clone()))?;
            PlayerAction::Bid {
                player: active,
                bid,
            }
        } else {
            let card = bot
                .choose_card(&view)
                .ok_or_else(|| SimError::NoLegalMove(active.clone()))?;
            PlayerAction::Play {
                player: active,
                card,
            }
        };
        debug!(?action, "bot move");
        Ok(action)
    }

    fn with_retry<F>(&self, mut op: F) -> Result<MutationOutcome, SimError>
    where
        F: FnMut() -> Result<MutationOutcome, ServiceError>,
    {
        let mut attempt = 0;
        loop {
            match op() {
                Ok(outcome) => return Ok(outcome),
                Err(err) if err.is_transient() && attempt < MAX_TRANSIENT_RETRIES => {
                    attempt += 1;
                    warn!(attempt, error = %err, "transient failure; retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
