//! Shared-state store: where every client's copy of a room's match lives.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::MatchState;
use crate::room::code::RoomCode;

/// A stored value together with the version it was written at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub version: u64,
    pub value: T,
}

pub type SubscriptionId = Uuid;

/// Called with every state written to a subscribed room, the writer's own
/// writes included.
pub type SubscriberFn = Arc<dyn Fn(&RoomCode, &Versioned<MatchState>) + Send + Sync>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("room {room} changed: expected version {expected}, found {actual}")]
    VersionConflict {
        room: RoomCode,
        expected: u64,
        actual: u64,
    },
    #[error("room {0} already exists")]
    AlreadyExists(RoomCode),
    #[error("room {0} not found")]
    NotFound(RoomCode),
    #[error("invalid room code: {0:?}")]
    InvalidCode(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Failures that may succeed if the caller re-reads and retries.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::VersionConflict { .. } | StoreError::Unavailable(_)
        )
    }
}

/// Versioned key-value storage for match states with change notification.
///
/// Writes are compare-and-swap on the version: `expected_version = None`
/// creates the room and fails if it exists, `Some(v)` replaces it only if
/// it is still at `v`. A successful write returns the new version.
pub trait RoomStore: Send + Sync {
    fn read(&self, room: &RoomCode) -> Result<Option<Versioned<MatchState>>, StoreError>;

    fn write(
        &self,
        room: &RoomCode,
        expected_version: Option<u64>,
        state: &MatchState,
    ) -> Result<u64, StoreError>;

    fn subscribe(&self, room: &RoomCode, callback: SubscriberFn) -> SubscriptionId;

    fn unsubscribe(&self, room: &RoomCode, id: SubscriptionId);

    /// Delete the room and drop its subscribers, only if it is still at
    /// `expected_version`.
    fn remove(&self, room: &RoomCode, expected_version: u64) -> Result<(), StoreError>;
}
