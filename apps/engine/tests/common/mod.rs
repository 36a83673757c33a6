#![allow(dead_code)]

use std::sync::Arc;

use callbreak_engine::domain::legal_plays;
use callbreak_engine::{
    InMemoryRoomStore, MatchDecision, MatchState, MutationOutcome, Phase, PlayerAction, PlayerId,
    RoomCode, RoomService, RoomStore,
};
use engine_test_support::unique_helpers::unique_table;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    engine_test_support::logging::init();
}

pub fn service() -> RoomService<InMemoryRoomStore> {
    RoomService::new(Arc::new(InMemoryRoomStore::new()))
}

/// A room with four ready players, not yet started. Ids are in seat order.
pub fn full_lobby(
    svc: &RoomService<InMemoryRoomStore>,
    seed: u64,
) -> (RoomCode, [PlayerId; 4]) {
    let ids = unique_table("p").map(PlayerId::from);
    let created = svc.create_room(ids[0].clone(), "North", Some(seed)).unwrap();
    let room = created.room;
    for (id, name) in ids[1..].iter().zip(["East", "South", "West"]) {
        svc.join_room(&room, id.clone(), name).unwrap();
        svc.set_ready(&room, id, true).unwrap();
    }
    (room, ids)
}

/// Submit `bids` in the round's turn order.
pub fn bid_round(
    svc: &RoomService<InMemoryRoomStore>,
    room: &RoomCode,
    bids: [u8; 4],
) -> MutationOutcome {
    let mut last = None;
    for bid in bids {
        let current = state_of(svc, room);
        let player = current.active_player.clone().unwrap();
        last = Some(svc.submit(room, &PlayerAction::Bid { player, bid }).unwrap());
    }
    last.unwrap()
}

/// Play the first legal card for the active player until the round is scored.
pub fn play_round(svc: &RoomService<InMemoryRoomStore>, room: &RoomCode) -> MutationOutcome {
    let mut state = state_of(svc, room);
    let mut last = None;
    while state.phase == Phase::Playing {
        let player = state.active_player.clone().unwrap();
        let card = legal_plays(&state, &player)[0];
        let outcome = svc.submit(room, &PlayerAction::Play { player, card }).unwrap();
        state = outcome.state.clone();
        last = Some(outcome);
    }
    last.unwrap()
}

pub fn next_round(svc: &RoomService<InMemoryRoomStore>, room: &RoomCode) -> MutationOutcome {
    svc.advance(room, MatchDecision::NextRound).unwrap()
}

/// Current stored state of `room`.
pub fn state_of(svc: &RoomService<InMemoryRoomStore>, room: &RoomCode) -> MatchState {
    svc.store().read(room).unwrap().unwrap().value
}
