pub mod room_service;

pub use room_service::{MutationOutcome, RoomService, ServiceError};
