//! Deck generation, shuffling and dealing.

use std::collections::{BTreeMap, HashSet};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::cards_logic::sort_hand;
use crate::domain::rules::{DECK_SIZE, PLAYERS};
use crate::domain::seed_derivation::derive_dealing_seed;
use crate::domain::state::PlayerId;
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::DomainError;

/// Generate a full 52-card deck in standard order (S, H, D, C; 2..A).
pub fn generate() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Uniform Fisher-Yates permutation of `deck`.
pub fn shuffle<R: Rng + ?Sized>(mut deck: Vec<Card>, rng: &mut R) -> Vec<Card> {
    deck.shuffle(rng);
    deck
}

/// RNG used to shuffle the deck of a given round.
pub fn dealing_rng(match_seed: u64, round_no: u32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_dealing_seed(match_seed, round_no))
}

/// Deal round-robin: card `i` goes to `turn_order[i % 4]`.
///
/// Hands come back sorted for display.
pub fn deal(
    deck: &[Card],
    turn_order: &[PlayerId],
) -> Result<BTreeMap<PlayerId, Vec<Card>>, DomainError> {
    if turn_order.len() != PLAYERS {
        return Err(DomainError::invalid_deal(format!(
            "turn order must have {PLAYERS} players, got {}",
            turn_order.len()
        )));
    }
    let distinct: HashSet<&PlayerId> = turn_order.iter().collect();
    if distinct.len() != PLAYERS {
        return Err(DomainError::invalid_deal(
            "turn order contains duplicate players",
        ));
    }
    if deck.len() != DECK_SIZE {
        return Err(DomainError::invalid_deal(format!(
            "deck must have {DECK_SIZE} cards, got {}",
            deck.len()
        )));
    }

    let mut hands: BTreeMap<PlayerId, Vec<Card>> = turn_order
        .iter()
        .map(|id| (id.clone(), Vec::with_capacity(DECK_SIZE / PLAYERS)))
        .collect();
    for (i, card) in deck.iter().enumerate() {
        if let Some(hand) = hands.get_mut(&turn_order[i % PLAYERS]) {
            hand.push(*card);
        }
    }
    for hand in hands.values_mut() {
        sort_hand(hand);
    }
    Ok(hands)
}
