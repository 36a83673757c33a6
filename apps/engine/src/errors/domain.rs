//! Domain-level error type used by the rules engine and the room service.
//!
//! This error type is transport- and storage-agnostic. Every variant is
//! produced before any mutation happens, so a returned error always means
//! the `MatchState` is exactly as it was before the call.

use thiserror::Error;

use crate::domain::state::{Phase, PlayerId};

/// Why a card play was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum IllegalPlayKind {
    NotYourTurn,
    CardNotInHand,
    MustFollowSuit,
}

/// Lobby / seating failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeatErrorKind {
    RoomFull,
    AlreadySeated,
    UnknownPlayer,
    InvalidName,
    NotEnoughPlayers,
    NotAllReady,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Malformed turn order or deck; an integration bug, never a player mistake.
    #[error("invalid deal: {0}")]
    InvalidDeal(String),
    #[error("not {player}'s turn (expected {expected:?})")]
    NotPlayersTurn {
        player: PlayerId,
        expected: Option<PlayerId>,
    },
    #[error("invalid bid: {0}")]
    InvalidBid(String),
    #[error("illegal play: {0:?}")]
    IllegalPlay(IllegalPlayKind),
    #[error("`{operation}` is not valid in phase {phase:?}")]
    InvalidPhaseTransition {
        operation: &'static str,
        phase: Phase,
    },
    #[error("seat error: {0:?}")]
    Seat(SeatErrorKind),
    #[error("parse card: {0}")]
    ParseCard(String),
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl DomainError {
    pub fn invalid_bid(detail: impl Into<String>) -> Self {
        Self::InvalidBid(detail.into())
    }

    pub fn invalid_deal(detail: impl Into<String>) -> Self {
        Self::InvalidDeal(detail.into())
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    pub fn phase(operation: &'static str, phase: Phase) -> Self {
        Self::InvalidPhaseTransition { operation, phase }
    }

    /// Player-facing rejections: surfaced to the offending client only.
    pub fn is_player_error(&self) -> bool {
        matches!(
            self,
            DomainError::NotPlayersTurn { .. }
                | DomainError::InvalidBid(_)
                | DomainError::IllegalPlay(_)
                | DomainError::Seat(_)
                | DomainError::ParseCard(_)
        )
    }
}
