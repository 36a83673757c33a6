//! Room-level operations: read the shared state, run one domain step, write
//! it back with a version check.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::machine::{self, GameEvent, PlayerAction};
use crate::domain::player_view::VisibleMatchState;
use crate::domain::round::MatchDecision;
use crate::domain::seats;
use crate::domain::state::{MatchState, PlayerId};
use crate::errors::domain::DomainError;
use crate::room::code::{generate_room_code, RoomCode};
use crate::room::store::{RoomStore, StoreError};

const MAX_CODE_ATTEMPTS: usize = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Worth re-reading and retrying: version conflicts and store outages.
    pub fn is_transient(&self) -> bool {
        match self {
            ServiceError::Domain(_) => false,
            ServiceError::Store(err) => err.is_transient(),
        }
    }
}

/// The state a mutation wrote, the version it got, and what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub room: RoomCode,
    pub state: MatchState,
    pub version: u64,
    pub events: Vec<GameEvent>,
}

pub struct RoomService<S: RoomStore> {
    store: Arc<S>,
}

impl<S: RoomStore> Clone for RoomService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: RoomStore> RoomService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Open a room with the host in seat 0. `seed` fixes every deal of the
    /// match; `None` draws one.
    pub fn create_room(
        &self,
        host: PlayerId,
        name: &str,
        seed: Option<u64>,
    ) -> Result<MutationOutcome, ServiceError> {
        let mut state = match seed {
            Some(seed) => MatchState::new(seed),
            None => MatchState::with_random_seed(),
        };
        let seat = seats::join(&mut state, host.clone(), name)?;
        let events = vec![GameEvent::PlayerJoined {
            player: host.clone(),
            seat,
        }];

        let mut attempts = 0;
        loop {
            attempts += 1;
            let room = generate_room_code();
            match self.store.write(&room, None, &state) {
                Ok(version) => {
                    info!(room = %room, host = %host, "room created");
                    return Ok(MutationOutcome {
                        room,
                        state,
                        version,
                        events,
                    });
                }
                Err(StoreError::AlreadyExists(_)) if attempts < MAX_CODE_ATTEMPTS => {
                    debug!(room = %room, "room code taken; drawing another");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    pub fn join_room(
        &self,
        room: &RoomCode,
        player: PlayerId,
        name: &str,
    ) -> Result<MutationOutcome, ServiceError> {
        self.mutate(room, "join_room", |state| {
            let seat = seats::join(state, player.clone(), name)?;
            Ok(vec![GameEvent::PlayerJoined { player, seat }])
        })
    }

    /// Free the player's seat; the room is deleted once nobody is left.
    pub fn leave_room(
        &self,
        room: &RoomCode,
        player: &PlayerId,
    ) -> Result<MutationOutcome, ServiceError> {
        let mut outcome = self.mutate(room, "leave_room", |state| {
            seats::leave(state, player)?;
            Ok(vec![GameEvent::PlayerLeft {
                player: player.clone(),
            }])
        })?;
        if outcome.state.players.is_empty() {
            match self.store.remove(room, outcome.version) {
                Ok(()) => {
                    outcome.events.push(GameEvent::RoomClosed);
                    info!(room = %room, "room closed");
                }
                // Someone joined the emptied room first; it stays open.
                Err(StoreError::VersionConflict { actual, .. }) => {
                    debug!(room = %room, version = actual, "room refilled before close");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(outcome)
    }

    pub fn set_ready(
        &self,
        room: &RoomCode,
        player: &PlayerId,
        ready: bool,
    ) -> Result<MutationOutcome, ServiceError> {
        self.mutate(room, "set_ready", |state| {
            seats::set_ready(state, player, ready)?;
            Ok(vec![GameEvent::ReadyChanged {
                player: player.clone(),
                ready,
            }])
        })
    }

    pub fn start_match(&self, room: &RoomCode) -> Result<MutationOutcome, ServiceError> {
        self.mutate(room, "start_match", machine::start_match)
    }

    /// Apply a bid or a card play.
    pub fn submit(
        &self,
        room: &RoomCode,
        action: &PlayerAction,
    ) -> Result<MutationOutcome, ServiceError> {
        self.mutate(room, "submit", |state| machine::apply(state, action))
    }

    pub fn advance(
        &self,
        room: &RoomCode,
        decision: MatchDecision,
    ) -> Result<MutationOutcome, ServiceError> {
        self.mutate(room, "advance", |state| machine::advance(state, decision))
    }

    /// Current state as `viewer` may see it, with the version it was read at.
    pub fn view(
        &self,
        room: &RoomCode,
        viewer: &PlayerId,
    ) -> Result<(u64, VisibleMatchState), ServiceError> {
        let current = self
            .store
            .read(room)?
            .ok_or_else(|| StoreError::NotFound(room.clone()))?;
        let view = VisibleMatchState::for_player(&current.value, viewer)?;
        Ok((current.version, view))
    }

    /// Read, run `step` on a private copy, then compare-and-swap it back.
    ///
    /// A rejected step writes nothing. A conflicting write is reported, not
    /// retried; the stored state is whatever the winning writer put there.
    fn mutate<F>(
        &self,
        room: &RoomCode,
        operation: &'static str,
        step: F,
    ) -> Result<MutationOutcome, ServiceError>
    where
        F: FnOnce(&mut MatchState) -> Result<Vec<GameEvent>, DomainError>,
    {
        let current = self
            .store
            .read(room)?
            .ok_or_else(|| StoreError::NotFound(room.clone()))?;
        let mut state = current.value;

        let events = step(&mut state).inspect_err(|err| {
            if err.is_player_error() {
                debug!(room = %room, operation, error = %err, "rejected");
            } else {
                warn!(room = %room, operation, error = %err, "step failed");
            }
        })?;

        let version = self
            .store
            .write(room, Some(current.version), &state)
            .inspect_err(|err| {
                warn!(
                    room = %room,
                    operation,
                    expected_version = current.version,
                    error = %err,
                    "room write failed"
                );
            })?;
        debug!(room = %room, operation, version, "room updated");

        Ok(MutationOutcome {
            room: room.clone(),
            state,
            version,
            events,
        })
    }
}
