//! In-process `RoomStore` used by tests and the simulator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::domain::MatchState;
use crate::room::code::RoomCode;
use crate::room::hub::SubscriberRegistry;
use crate::room::store::{RoomStore, StoreError, SubscriberFn, SubscriptionId, Versioned};

/// One room. `removed` is set under the lock before the map entry goes, so
/// a writer that fetched the slot earlier cannot commit into a deleted room.
struct RoomSlot {
    current: Versioned<MatchState>,
    removed: bool,
}

type Slot = Arc<Mutex<RoomSlot>>;

pub struct InMemoryRoomStore {
    rooms: DashMap<RoomCode, Slot>,
    subscribers: SubscriberRegistry,
    available: AtomicBool,
}

impl Default for InMemoryRoomStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomStore {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
            subscribers: SubscriberRegistry::new(),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate an outage: every call fails with `Unavailable` until restored.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn subscriber_count(&self, room: &RoomCode) -> usize {
        self.subscribers.subscriber_count(room)
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("in-memory store offline".to_string()))
        }
    }

    fn slot(&self, room: &RoomCode) -> Option<Slot> {
        self.rooms.get(room).map(|slot| slot.value().clone())
    }

    fn create(&self, room: &RoomCode, state: &MatchState) -> Result<Versioned<MatchState>, StoreError> {
        match self.rooms.entry(room.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(room.clone())),
            Entry::Vacant(vacant) => {
                let stored = Versioned {
                    version: 1,
                    value: state.clone(),
                };
                vacant.insert(Arc::new(Mutex::new(RoomSlot {
                    current: stored.clone(),
                    removed: false,
                })));
                Ok(stored)
            }
        }
    }

    fn replace(
        &self,
        room: &RoomCode,
        expected: u64,
        state: &MatchState,
    ) -> Result<Versioned<MatchState>, StoreError> {
        let slot = self
            .slot(room)
            .ok_or_else(|| StoreError::NotFound(room.clone()))?;
        let mut guard = slot.lock();
        if guard.removed {
            return Err(StoreError::NotFound(room.clone()));
        }
        if guard.current.version != expected {
            return Err(StoreError::VersionConflict {
                room: room.clone(),
                expected,
                actual: guard.current.version,
            });
        }
        guard.current.version += 1;
        guard.current.value = state.clone();
        Ok(guard.current.clone())
    }
}

impl RoomStore for InMemoryRoomStore {
    fn read(&self, room: &RoomCode) -> Result<Option<Versioned<MatchState>>, StoreError> {
        self.ensure_available()?;
        Ok(self.slot(room).and_then(|slot| {
            let guard = slot.lock();
            let current = if guard.removed {
                None
            } else {
                Some(guard.current.clone())
            };
            current
        }))
    }

    fn write(
        &self,
        room: &RoomCode,
        expected_version: Option<u64>,
        state: &MatchState,
    ) -> Result<u64, StoreError> {
        self.ensure_available()?;
        let stored = match expected_version {
            None => self.create(room, state)?,
            Some(expected) => self.replace(room, expected, state)?,
        };
        debug!(room = %room, version = stored.version, "room state written");
        // Locks are released; subscribers may read back.
        self.subscribers.broadcast(room, &stored);
        Ok(stored.version)
    }

    fn subscribe(&self, room: &RoomCode, callback: SubscriberFn) -> SubscriptionId {
        self.subscribers.register(room, callback)
    }

    fn unsubscribe(&self, room: &RoomCode, id: SubscriptionId) {
        self.subscribers.unregister(room, id);
    }

    fn remove(&self, room: &RoomCode, expected_version: u64) -> Result<(), StoreError> {
        self.ensure_available()?;
        let slot = self
            .slot(room)
            .ok_or_else(|| StoreError::NotFound(room.clone()))?;
        {
            let mut guard = slot.lock();
            if guard.removed {
                return Err(StoreError::NotFound(room.clone()));
            }
            if guard.current.version != expected_version {
                return Err(StoreError::VersionConflict {
                    room: room.clone(),
                    expected: expected_version,
                    actual: guard.current.version,
                });
            }
            guard.removed = true;
        }
        self.rooms
            .remove_if(room, |_, stored| Arc::ptr_eq(stored, &slot));
        self.subscribers.drop_room(room);
        debug!(room = %room, version = expected_version, "room removed");
        Ok(())
    }
}
