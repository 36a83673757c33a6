//! RNG seed derivation for deterministic dealing.
//!
//! A match carries one base seed; each round derives its own dealing seed
//! from it so that replaying a match reproduces every deal.

/// Derive a seed for dealing cards in a round.
///
/// # Arguments
///
/// * `match_seed` - Base RNG seed stored on the match
/// * `round_no` - 1-based round number
pub fn derive_dealing_seed(match_seed: u64, round_no: u32) -> u64 {
    match_seed
        .wrapping_add((round_no as u64).wrapping_mul(1_000_003))
        .wrapping_add(2)
}
