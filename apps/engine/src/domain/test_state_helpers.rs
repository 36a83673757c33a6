//! Test-only match builders for domain unit tests.

use crate::domain::bidding::submit_bid;
use crate::domain::round::start_round;
use crate::domain::rules::{PLAYERS, TRICKS_PER_ROUND};
use crate::domain::seats::{join, set_ready};
use crate::domain::state::{MatchState, Phase, Player, PlayerId, RoundState};
use crate::domain::tricks::{legal_plays, play_card};
use crate::domain::Card;

/// Seat ids used by every helper, in seat order.
pub fn ids() -> [PlayerId; PLAYERS] {
    ["A", "B", "C", "D"].map(PlayerId::from)
}

pub fn pid(id: &str) -> PlayerId {
    PlayerId::from(id)
}

/// Four seated, ready players in Waiting.
pub fn lobby(seed: u64) -> MatchState {
    let mut state = MatchState::new(seed);
    for id in ids() {
        join(&mut state, id.clone(), id.as_str()).unwrap();
        set_ready(&mut state, &id, true).unwrap();
    }
    state
}

/// First round dealt: A deals and opens, turn order A, B, C, D.
pub fn started(seed: u64) -> MatchState {
    let mut state = lobby(seed);
    start_round(&mut state).unwrap();
    state
}

/// Submit `bids` in the round's turn order. The bids must not sum to 13.
pub fn bid_all(state: &mut MatchState, bids: [u8; PLAYERS]) {
    let order = state.round.turn_order.clone();
    for (who, bid) in order.iter().zip(bids) {
        submit_bid(state, who, bid).unwrap();
    }
    assert_eq!(state.phase, Phase::Playing);
}

/// Play the first legal card for whoever is active until the round is scored.
pub fn play_out_round(state: &mut MatchState) {
    while state.phase == Phase::Playing {
        let who = state.active_player.clone().unwrap();
        let card = legal_plays(state, &who)[0];
        play_card(state, &who, card).unwrap();
    }
}

/// A Playing state mid-round, built from explicit hands for A..D.
///
/// All hands must have the same length `n`; the `13 - n` tricks already
/// resolved are credited to A so the state stays self-consistent. A leads.
pub fn playing_with_hands(hands: [Vec<Card>; PLAYERS]) -> MatchState {
    let n = hands[0].len();
    assert!(hands.iter().all(|h| h.len() == n), "hands must be equal size");
    let resolved = TRICKS_PER_ROUND - n as u8;

    let mut state = MatchState::new(0);
    let mut round = RoundState::empty();
    round.round_no = 1;
    round.dealer = Some(pid("A"));
    round.turn_order = ids().to_vec();
    round.tricks_resolved = resolved;

    for (seat, (id, hand)) in ids().into_iter().zip(hands).enumerate() {
        let mut player = Player::new(id.clone(), id.as_str(), seat as u8);
        player.ready = true;
        player.hand = hand;
        player.current_bid = Some(1);
        if seat == 0 {
            player.tricks_won = resolved;
        }
        round.bids.insert(id.clone(), 1);
        state.players.insert(id, player);
    }
    state.round = round;
    state.phase = Phase::Playing;
    state.active_player = Some(pid("A"));
    state
}

pub fn cards(codes: &str) -> Vec<Card> {
    crate::domain::try_parse_cards(codes.split_whitespace()).unwrap()
}
