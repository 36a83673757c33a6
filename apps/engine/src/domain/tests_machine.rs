use crate::domain::machine::{advance, apply, start_match, GameEvent, PlayerAction};
use crate::domain::round::MatchDecision;
use crate::domain::state::{MatchState, Phase};
use crate::domain::test_state_helpers::{cards, lobby, pid, playing_with_hands, started};
use crate::domain::tricks::legal_plays;
use crate::errors::domain::DomainError;

fn bid(who: &str, bid: u8) -> PlayerAction {
    PlayerAction::Bid {
        player: pid(who),
        bid,
    }
}

fn play(who: &str, code: &str) -> PlayerAction {
    PlayerAction::Play {
        player: pid(who),
        card: code.parse().unwrap(),
    }
}

#[test]
fn start_match_deals_and_announces_the_opener() {
    let mut state = lobby(5);
    let events = start_match(&mut state).unwrap();
    assert_eq!(
        events,
        vec![
            GameEvent::RoundStarted {
                round_no: 1,
                dealer: Some(pid("A")),
            },
            GameEvent::TurnBecame { player: pid("A") },
        ]
    );
    assert!(matches!(
        start_match(&mut state),
        Err(DomainError::InvalidPhaseTransition { .. })
    ));
}

#[test]
fn four_legal_bids_move_to_playing_with_opener_to_lead() {
    let mut state = started(5);
    for (who, b) in [("A", 2), ("B", 3), ("C", 4)] {
        apply(&mut state, &bid(who, b)).unwrap();
    }
    let events = apply(&mut state, &bid("D", 5)).unwrap();
    assert_eq!(state.phase, Phase::Playing);
    assert_eq!(state.active_player, Some(pid("A")));
    assert!(events.contains(&GameEvent::BiddingComplete));
    assert!(events.contains(&GameEvent::TurnBecame { player: pid("A") }));
}

#[test]
fn forbidden_total_emits_reset() {
    let mut state = started(5);
    for (who, b) in [("A", 0), ("B", 0), ("C", 0)] {
        apply(&mut state, &bid(who, b)).unwrap();
    }
    let events = apply(&mut state, &bid("D", 13)).unwrap();
    assert!(events.contains(&GameEvent::BidsReset {
        restart_from: pid("A")
    }));
    assert_eq!(state.phase, Phase::Bidding);
}

#[test]
fn action_for_the_wrong_phase_leaves_state_untouched() {
    let mut state = started(5);
    let before = state.clone();
    let err = apply(&mut state, &play("A", "2C")).unwrap_err();
    assert_eq!(
        err,
        DomainError::InvalidPhaseTransition {
            operation: "play_card",
            phase: Phase::Bidding,
        }
    );
    assert_eq!(state, before);

    let mut waiting = MatchState::new(1);
    assert!(apply(&mut waiting, &bid("A", 1)).is_err());
}

#[test]
fn trick_of_spades_goes_to_the_seven() {
    let mut state = playing_with_hands([
        cards("3S 4D"),
        cards("7S 5D"),
        cards("2H 6D"),
        cards("AC 7D"),
    ]);
    apply(&mut state, &play("A", "3S")).unwrap();
    apply(&mut state, &play("B", "7S")).unwrap();
    apply(&mut state, &play("C", "2H")).unwrap();
    let events = apply(&mut state, &play("D", "AC")).unwrap();

    let winner = events.iter().find_map(|e| match e {
        GameEvent::TrickWon { winner, plays } => {
            assert_eq!(plays.len(), 4);
            Some(winner.clone())
        }
        _ => None,
    });
    assert_eq!(winner, Some(pid("B")));
    assert_eq!(state.active_player, Some(pid("B")));
}

#[test]
fn full_round_through_apply_then_next_round() {
    let mut state = started(77);
    let mut events = Vec::new();
    for (who, b) in [("A", 3), ("B", 3), ("C", 3), ("D", 3)] {
        events.extend(apply(&mut state, &bid(who, b)).unwrap());
    }
    while state.phase == Phase::Playing {
        let who = state.active_player.clone().unwrap();
        let card = legal_plays(&state, &who)[0];
        events.extend(
            apply(&mut state, &PlayerAction::Play { player: who, card }).unwrap(),
        );
    }
    assert_eq!(state.phase, Phase::Scoring);
    let played = events
        .iter()
        .filter(|e| matches!(e, GameEvent::CardPlayed { .. }))
        .count();
    let tricks = events
        .iter()
        .filter(|e| matches!(e, GameEvent::TrickWon { .. }))
        .count();
    assert_eq!((played, tricks), (52, 13));
    assert!(matches!(events.last(), Some(GameEvent::RoundScored { .. })));

    let events = advance(&mut state, MatchDecision::NextRound).unwrap();
    assert!(events.contains(&GameEvent::RoundStarted {
        round_no: 2,
        dealer: Some(pid("B")),
    }));
    assert_eq!(state.phase, Phase::Bidding);
}

#[test]
fn actions_round_trip_through_json() {
    let json = serde_json::to_string(&play("C", "10H")).unwrap();
    assert_eq!(json, r#"{"type":"play","player":"C","card":"10H"}"#);
    let back: PlayerAction = serde_json::from_str(r#"{"type":"bid","player":"A","bid":4}"#).unwrap();
    assert_eq!(back, bid("A", 4));
}
