//! Card game logic: checking suits in hands, comparing card strength

use super::cards_types::{Card, Suit};

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Does `challenger` take the trick away from the current `best` card?
///
/// Trump beats any non-trump; within the same suit the higher rank wins; a
/// card that is neither trump nor of the led suit never wins.
pub fn card_beats(challenger: Card, best: Card, lead: Suit, trump: Suit) -> bool {
    let challenger_trump = challenger.suit == trump;
    let best_trump = best.suit == trump;
    if challenger_trump != best_trump {
        return challenger_trump;
    }
    if challenger.suit == best.suit {
        return challenger.rank > best.rank;
    }
    // Neither is trump and the suits differ: only a led-suit card could win,
    // and the running best is never an off-suit card once a led card exists.
    challenger.suit == lead && best.suit != lead
}

/// Sort a hand the way the client shows it: S, H, D, C, high to low.
pub fn sort_hand(hand: &mut [Card]) {
    hand.sort();
}
