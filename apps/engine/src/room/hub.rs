use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::MatchState;
use crate::room::code::RoomCode;
use crate::room::store::{SubscriberFn, SubscriptionId, Versioned};

/// Per-room subscriber callbacks keyed by a random token.
#[derive(Default)]
pub struct SubscriberRegistry {
    rooms: DashMap<RoomCode, DashMap<Uuid, SubscriberFn>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    pub fn register(&self, room: &RoomCode, callback: SubscriberFn) -> SubscriptionId {
        let token = Uuid::new_v4();
        let entry = self.rooms.entry(room.clone()).or_default();
        entry.insert(token, callback);
        token
    }

    pub fn unregister(&self, room: &RoomCode, token: SubscriptionId) {
        let now_empty = match self.rooms.get(room) {
            Some(entry) => {
                entry.remove(&token);
                entry.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.rooms.remove_if(room, |_, subs| subs.is_empty());
        }
    }

    pub fn drop_room(&self, room: &RoomCode) {
        self.rooms.remove(room);
    }

    pub fn subscriber_count(&self, room: &RoomCode) -> usize {
        self.rooms.get(room).map(|e| e.len()).unwrap_or(0)
    }

    /// Deliver `update` to every subscriber of `room`.
    ///
    /// Callbacks run after the map guards are released, so a callback may
    /// read the store or (un)subscribe.
    pub fn broadcast(&self, room: &RoomCode, update: &Versioned<MatchState>) {
        let callbacks: Vec<SubscriberFn> = match self.rooms.get(room) {
            Some(entry) => entry.iter().map(|cb| cb.value().clone()).collect(),
            None => return,
        };
        for callback in callbacks {
            callback(room, update);
        }
    }
}
