use proptest::prelude::*;

use crate::domain::rules::TRUMP;
use crate::domain::state::Play;
use crate::domain::test_gens;
use crate::domain::tricks::{resolve_trick, winning_index};
use crate::domain::{Card, Suit};

/// Highest spade if any was played, else highest card of the led suit.
fn oracle_winner(plays: &[Play], lead: Suit) -> Card {
    let best_of = |suit: Suit| {
        plays
            .iter()
            .map(|p| p.card)
            .filter(|c| c.suit == suit)
            .max_by_key(|c| c.rank)
    };
    best_of(TRUMP)
        .or_else(|| best_of(lead))
        .unwrap_or(plays[0].card)
}

proptest! {
    #[test]
    fn prop_winner_matches_oracle(plays in test_gens::complete_trick()) {
        let lead = plays[0].card.suit;
        let idx = resolve_trick(&plays).unwrap();
        prop_assert_eq!(plays[idx].card, oracle_winner(&plays, lead));
    }

    #[test]
    fn prop_winner_is_led_suit_or_trump(plays in test_gens::complete_trick()) {
        let lead = plays[0].card.suit;
        let idx = resolve_trick(&plays).unwrap();
        let suit = plays[idx].card.suit;
        prop_assert!(suit == lead || suit == TRUMP);
    }

    #[test]
    fn prop_winner_ignores_play_order(
        (plays, lead, reordered) in test_gens::trick_and_reordering(),
    ) {
        let winner = &plays[winning_index(&plays, lead).unwrap()];
        let other = &reordered[winning_index(&reordered, lead).unwrap()];
        prop_assert_eq!(winner, other);
    }
}
