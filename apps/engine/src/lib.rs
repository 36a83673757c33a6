//! Rules engine for Call Break, the four-player trick-taking game with
//! spades as permanent trump, plus the room layer that shares a match between
//! clients.

pub mod domain;
pub mod errors;
pub mod room;
pub mod services;

pub use domain::{GameEvent, MatchDecision, MatchState, Phase, PlayerAction, PlayerId};
pub use errors::DomainError;
pub use room::{InMemoryRoomStore, RoomCode, RoomStore, StoreError};
pub use services::{MutationOutcome, RoomService, ServiceError};

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::logging::init();
}
