use crate::domain::invariants::check_invariants;
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{bid_all, lobby, pid, play_out_round, started};
use crate::errors::domain::DomainError;

#[test]
fn fresh_states_are_consistent() {
    assert_eq!(check_invariants(&lobby(1)), Ok(()));
    let mut state = started(1);
    assert_eq!(check_invariants(&state), Ok(()));
    bid_all(&mut state, [1, 2, 3, 4]);
    assert_eq!(check_invariants(&state), Ok(()));
    play_out_round(&mut state);
    assert_eq!(check_invariants(&state), Ok(()));
}

#[test]
fn missing_card_is_detected() {
    let mut state = started(1);
    state.players.get_mut(&pid("B")).unwrap().hand.pop();
    assert!(matches!(check_invariants(&state), Err(DomainError::Invariant(_))));
}

#[test]
fn playing_with_forbidden_bid_total_is_detected() {
    let mut state = started(1);
    bid_all(&mut state, [1, 2, 3, 4]);
    state.round.bids.insert(pid("D"), 7);
    assert!(check_invariants(&state).is_err());
}

#[test]
fn broken_turn_order_is_detected() {
    let mut state = started(1);
    state.round.turn_order[3] = pid("A");
    assert!(check_invariants(&state).is_err());
}

#[test]
fn trick_count_mismatch_is_detected() {
    let mut state = started(1);
    bid_all(&mut state, [1, 2, 3, 4]);
    state.players.get_mut(&pid("C")).unwrap().tricks_won = 1;
    assert!(check_invariants(&state).is_err());
    state.phase = Phase::Scoring;
    assert!(check_invariants(&state).is_err());
}
