use crate::domain::scoring::{round_score, score_round, standings};
use crate::domain::test_state_helpers::{lobby, pid};

#[test]
fn exact_bid_earns_ten_plus_bid() {
    assert_eq!(round_score(5, 5), 15);
    assert_eq!(round_score(0, 0), 10);
    assert_eq!(round_score(13, 13), 23);
}

#[test]
fn overtricks_add_one_each() {
    assert_eq!(round_score(5, 7), 7);
    assert_eq!(round_score(0, 3), 3);
}

#[test]
fn shortfall_costs_one_per_missing_trick() {
    assert_eq!(round_score(5, 3), -2);
    assert_eq!(round_score(13, 0), -13);
}

#[test]
fn score_round_accumulates_and_keeps_previous_total() {
    let mut state = lobby(1);
    for (id, bid, won) in [("A", 2, 2), ("B", 3, 5), ("C", 4, 1), ("D", 0, 5)] {
        let p = state.players.get_mut(&pid(id)).unwrap();
        p.current_bid = Some(bid);
        p.tricks_won = won;
        p.cumulative_score = 10;
    }
    let rows = score_round(&mut state.players);

    let ids: Vec<_> = rows.iter().map(|r| r.player.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "C", "D"]);
    let deltas: Vec<i32> = rows.iter().map(|r| r.round_score).collect();
    assert_eq!(deltas, vec![12, 5, -3, 5]);

    let a = &state.players[&pid("A")];
    assert_eq!(a.previous_cumulative_score, 10);
    assert_eq!(a.cumulative_score, 22);
    assert_eq!(a.round_delta(), 12);
    assert_eq!(rows[2].cumulative_score, 7);
}

#[test]
fn standings_rank_by_score_then_seat() {
    let mut state = lobby(1);
    for (id, score) in [("A", 5), ("B", 20), ("C", 5), ("D", -4)] {
        state.players.get_mut(&pid(id)).unwrap().cumulative_score = score;
    }
    let order: Vec<_> = standings(&state).iter().map(|p| p.id.as_str()).collect();
    assert_eq!(order, vec!["B", "A", "C", "D"]);
}
