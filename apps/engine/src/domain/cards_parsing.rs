//! Card codes: parsing and formatting (e.g., "AS", "10H", "2C")

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::DomainError;

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.code(), self.suit.letter())
    }
}

impl FromStr for Rank {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            // "T" is the common two-character spelling of ten
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(DomainError::ParseCard(format!("invalid rank: {s}"))),
        };
        Ok(rank)
    }
}

impl TryFrom<char> for Suit {
    type Error = DomainError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'S' => Ok(Suit::Spades),
            'H' => Ok(Suit::Hearts),
            'D' => Ok(Suit::Diamonds),
            'C' => Ok(Suit::Clubs),
            _ => Err(DomainError::ParseCard(format!("invalid suit: {c}"))),
        }
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_uppercase();
        let Some(suit_ch) = s.chars().last() else {
            return Err(DomainError::ParseCard("empty card code".to_string()));
        };
        let rank_part = &s[..s.len() - suit_ch.len_utf8()];
        if rank_part.is_empty() {
            return Err(DomainError::ParseCard(format!("missing rank: {s}")));
        }
        let suit = Suit::try_from(suit_ch)?;
        let rank = rank_part.parse::<Rank>()?;
        Ok(Card { suit, rank })
    }
}

/// Non-panicking helper to parse card tokens (e.g., "AS", "10C") into Card instances.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
