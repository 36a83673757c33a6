use std::ops::RangeInclusive;

use crate::domain::Suit;

pub const PLAYERS: usize = 4;
pub const DECK_SIZE: usize = 52;
pub const HAND_SIZE: usize = 13;
pub const TRICKS_PER_ROUND: u8 = 13;
pub const MAX_BID: u8 = 13;

/// The four bids of a round may not add up to exactly this.
pub const FORBIDDEN_BID_SUM: u32 = 13;

/// Spades are trump for the whole match.
pub const TRUMP: Suit = Suit::Spades;

pub const MAX_NAME_LEN: usize = 15;

pub fn valid_bid_range() -> RangeInclusive<u8> {
    0..=MAX_BID
}
