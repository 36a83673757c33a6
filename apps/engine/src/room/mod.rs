//! Rooms: codes, the versioned shared-state store and its in-memory backend.

pub mod code;
pub mod hub;
pub mod memory;
pub mod store;

pub use code::{generate_room_code, RoomCode};
pub use memory::InMemoryRoomStore;
pub use store::{RoomStore, StoreError, SubscriberFn, SubscriptionId, Versioned};
