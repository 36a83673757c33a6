//! Lobby seating: joining, leaving and readiness while the match is Waiting.

use tracing::debug;

use crate::domain::rules::{MAX_NAME_LEN, PLAYERS};
use crate::domain::state::{MatchState, Phase, Player, PlayerId};
use crate::errors::domain::{DomainError, SeatErrorKind};

fn require_waiting(state: &MatchState, operation: &'static str) -> Result<(), DomainError> {
    if state.phase != Phase::Waiting {
        return Err(DomainError::phase(operation, state.phase));
    }
    Ok(())
}

/// Trimmed display name, 1..=15 characters.
pub fn validate_display_name(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(DomainError::Seat(SeatErrorKind::InvalidName));
    }
    Ok(trimmed.to_string())
}

/// Lowest seat not yet taken.
pub fn first_free_seat(state: &MatchState) -> Option<u8> {
    (0..PLAYERS as u8).find(|seat| state.players.values().all(|p| p.seat != *seat))
}

/// Seat a new player. The first seat (the room creator) starts ready.
pub fn join(state: &mut MatchState, id: PlayerId, name: &str) -> Result<u8, DomainError> {
    require_waiting(state, "join")?;
    if state.players.contains_key(&id) {
        return Err(DomainError::Seat(SeatErrorKind::AlreadySeated));
    }
    let display_name = validate_display_name(name)?;
    let seat = first_free_seat(state).ok_or(DomainError::Seat(SeatErrorKind::RoomFull))?;

    let mut player = Player::new(id.clone(), display_name, seat);
    player.ready = seat == 0;
    debug!(player = %id, seat, "player seated");
    state.players.insert(id, player);
    Ok(seat)
}

/// Free a seat. Other players keep their seats.
pub fn leave(state: &mut MatchState, id: &PlayerId) -> Result<(), DomainError> {
    require_waiting(state, "leave")?;
    state
        .players
        .remove(id)
        .ok_or(DomainError::Seat(SeatErrorKind::UnknownPlayer))?;
    debug!(player = %id, "player left");
    Ok(())
}

pub fn set_ready(state: &mut MatchState, id: &PlayerId, ready: bool) -> Result<(), DomainError> {
    require_waiting(state, "set_ready")?;
    let player = state
        .players
        .get_mut(id)
        .ok_or(DomainError::Seat(SeatErrorKind::UnknownPlayer))?;
    player.ready = ready;
    Ok(())
}

/// Check that the lobby can start: 4 seated players, all ready.
pub fn check_can_start(state: &MatchState) -> Result<(), DomainError> {
    if state.players.len() != PLAYERS {
        return Err(DomainError::Seat(SeatErrorKind::NotEnoughPlayers));
    }
    if !state.players.values().all(|p| p.ready) {
        return Err(DomainError::Seat(SeatErrorKind::NotAllReady));
    }
    Ok(())
}

pub fn can_start(state: &MatchState) -> bool {
    state.phase == Phase::Waiting && check_can_start(state).is_ok()
}
