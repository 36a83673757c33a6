//! Error handling for the Call Break engine.

pub mod domain;

pub use domain::{DomainError, IllegalPlayKind, SeatErrorKind};
