use crate::domain::state::{Phase, Play};
use crate::domain::test_state_helpers::{cards, pid, playing_with_hands};
use crate::domain::tricks::{is_legal_play, legal_plays, play_card, resolve_trick};
use crate::domain::Card;
use crate::errors::domain::{DomainError, IllegalPlayKind};

fn two_card_hands() -> [Vec<Card>; 4] {
    [
        cards("3S 4D"),
        cards("7S 5D"),
        cards("2H 6D"),
        cards("AC 7D"),
    ]
}

fn card(code: &str) -> Card {
    code.parse().unwrap()
}

#[test]
fn highest_spade_wins_when_spades_are_led() {
    let mut state = playing_with_hands(two_card_hands());
    play_card(&mut state, &pid("A"), card("3S")).unwrap();
    play_card(&mut state, &pid("B"), card("7S")).unwrap();
    play_card(&mut state, &pid("C"), card("2H")).unwrap();
    let r = play_card(&mut state, &pid("D"), card("AC")).unwrap();

    assert_eq!(r.trick_winner, Some(pid("B")));
    assert_eq!(r.completed_trick.as_ref().map(Vec::len), Some(4));
    assert_eq!(state.active_player, Some(pid("B")));
    assert_eq!(state.players[&pid("B")].tricks_won, 1);
    assert_eq!(state.round.last_trick_winner, Some(pid("B")));
    assert!(state.round.current_trick.is_empty());
    assert_eq!(state.phase, Phase::Playing);
}

#[test]
fn off_suit_trump_beats_led_suit() {
    let hands = [
        cards("KH 4D"),
        cards("AH 5D"),
        cards("2S 6D"),
        cards("QH 7D"),
    ];
    let mut state = playing_with_hands(hands);
    for (who, code) in [("A", "KH"), ("B", "AH"), ("C", "2S"), ("D", "QH")] {
        play_card(&mut state, &pid(who), card(code)).unwrap();
    }
    assert_eq!(state.round.last_trick_winner, Some(pid("C")));
}

#[test]
fn must_follow_led_suit_when_able() {
    let mut state = playing_with_hands(two_card_hands());
    play_card(&mut state, &pid("A"), card("3S")).unwrap();
    let before = state.clone();

    let err = play_card(&mut state, &pid("B"), card("5D")).unwrap_err();
    assert_eq!(err, DomainError::IllegalPlay(IllegalPlayKind::MustFollowSuit));
    assert_eq!(state, before);
    assert_eq!(legal_plays(&state, &pid("B")), vec![card("7S")]);
}

#[test]
fn void_player_may_discard_anything() {
    let mut state = playing_with_hands(two_card_hands());
    play_card(&mut state, &pid("A"), card("3S")).unwrap();
    play_card(&mut state, &pid("B"), card("7S")).unwrap();
    assert_eq!(legal_plays(&state, &pid("C")).len(), 2);
    assert!(is_legal_play(&state, &pid("C"), card("6D")));
}

#[test]
fn playing_out_of_turn_or_unheld_card_is_rejected() {
    let mut state = playing_with_hands(two_card_hands());
    assert_eq!(
        play_card(&mut state, &pid("B"), card("7S")).unwrap_err(),
        DomainError::IllegalPlay(IllegalPlayKind::NotYourTurn)
    );
    assert_eq!(
        play_card(&mut state, &pid("A"), card("9H")).unwrap_err(),
        DomainError::IllegalPlay(IllegalPlayKind::CardNotInHand)
    );
}

#[test]
fn leader_may_open_with_a_spade() {
    let state = playing_with_hands(two_card_hands());
    assert!(is_legal_play(&state, &pid("A"), card("3S")));
    assert_eq!(legal_plays(&state, &pid("A")).len(), 2);
}

#[test]
fn thirteenth_trick_scores_the_round() {
    let hands = [cards("3S"), cards("7S"), cards("2H"), cards("AC")];
    let mut state = playing_with_hands(hands);
    for (who, code) in [("A", "3S"), ("B", "7S"), ("C", "2H"), ("D", "AC")] {
        play_card(&mut state, &pid(who), card(code)).unwrap();
    }
    assert_eq!(state.phase, Phase::Scoring);
    assert_eq!(state.active_player, None);
    assert_eq!(state.round.tricks_resolved, 13);
    assert_eq!(state.history.len(), 1);

    // Every seat bid 1: A took 12, B took 1.
    let scores: Vec<i32> = state.history[0].rows.iter().map(|r| r.round_score).collect();
    assert_eq!(scores, vec![12, 11, -1, -1]);
}

#[test]
fn play_card_outside_playing_is_a_phase_error() {
    let mut state = playing_with_hands(two_card_hands());
    state.phase = Phase::Bidding;
    assert!(matches!(
        play_card(&mut state, &pid("A"), card("3S")),
        Err(DomainError::InvalidPhaseTransition {
            operation: "play_card",
            ..
        })
    ));
}

#[test]
fn resolve_trick_of_nothing_is_none() {
    assert_eq!(resolve_trick(&[]), None);
    let single = [Play::new(pid("A"), card("2C"))];
    assert_eq!(resolve_trick(&single), Some(0));
}
