//! Domain layer: pure game logic types and helpers.

pub mod bidding;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod deck;
pub mod invariants;
pub mod machine;
pub mod player_view;
pub mod round;
pub mod rules;
pub mod scoring;
pub mod seats;
pub mod seed_derivation;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_invariants;
#[cfg(test)]
mod tests_machine;
#[cfg(test)]
mod tests_props_trick_winner;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use bidding::{legal_bids, submit_bid, BidResult};
pub use cards_logic::{card_beats, hand_has_suit, sort_hand};
pub use cards_parsing::try_parse_cards;
pub use cards_types::{Card, Rank, Suit};
pub use invariants::check_invariants;
pub use machine::{apply, GameEvent, PlayerAction};
pub use player_view::VisibleMatchState;
pub use round::{advance_after_scoring, end_round, start_round, MatchDecision};
pub use scoring::{round_score, score_round, standings, RoundScoreRow, RoundSummary};
pub use state::{MatchState, Phase, Play, Player, PlayerId, RoundState};
pub use tricks::{is_legal_play, legal_plays, play_card, resolve_trick, winning_index, PlayCardResult};
