//! Seat bots that pick uniformly among the moves the engine allows.

use callbreak_engine::domain::player_view::VisibleMatchState;
use callbreak_engine::domain::Card;
use callbreak_engine::PlayerId;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

pub struct RandomBot {
    pub id: PlayerId,
    rng: StdRng,
}

impl RandomBot {
    pub fn new(id: PlayerId, seed: u64) -> Self {
        Self {
            id,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn choose_bid(&mut self, view: &VisibleMatchState) -> Option<u8> {
        view.legal_bids.choose(&mut self.rng).copied()
    }

    pub fn choose_card(&mut self, view: &VisibleMatchState) -> Option<Card> {
        view.legal_plays.choose(&mut self.rng).copied()
    }
}
