use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::state::{MatchState, Player, PlayerId};

/// Points for one round: exact bid earns 10 + bid, overtricks add one each on
/// top of the bid, a shortfall costs one per missing trick.
pub fn round_score(bid: u8, won: u8) -> i32 {
    let (bid, won) = (bid as i32, won as i32);
    if won == bid {
        10 + bid
    } else if won > bid {
        bid + (won - bid)
    } else {
        -(bid - won)
    }
}

/// One row of the score table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScoreRow {
    pub player: PlayerId,
    pub bid: u8,
    pub tricks_won: u8,
    pub round_score: i32,
    pub cumulative_score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_no: u32,
    pub dealer: Option<PlayerId>,
    /// Rows in seat order.
    pub rows: Vec<RoundScoreRow>,
}

/// Apply round scores to every player and return their score rows in seat order.
pub fn score_round(players: &mut BTreeMap<PlayerId, Player>) -> Vec<RoundScoreRow> {
    let mut rows: Vec<(u8, RoundScoreRow)> = players
        .values_mut()
        .map(|player| {
            let bid = player.current_bid.unwrap_or(0);
            let won = player.tricks_won;
            let score = round_score(bid, won);
            player.previous_cumulative_score = player.cumulative_score;
            player.cumulative_score += score;
            (
                player.seat,
                RoundScoreRow {
                    player: player.id.clone(),
                    bid,
                    tricks_won: won,
                    round_score: score,
                    cumulative_score: player.cumulative_score,
                },
            )
        })
        .collect();
    rows.sort_by_key(|(seat, _)| *seat);
    rows.into_iter().map(|(_, row)| row).collect()
}

/// Players ranked by cumulative score (highest first), ties by seat.
pub fn standings(state: &MatchState) -> Vec<&Player> {
    let mut ranked: Vec<&Player> = state.players.values().collect();
    ranked.sort_by(|a, b| {
        b.cumulative_score
            .cmp(&a.cumulative_score)
            .then(a.seat.cmp(&b.seat))
    });
    ranked
}
