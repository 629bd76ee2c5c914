//! Domain layer: room registry model and its contracts.
//!
//! This layer does not depend on axum or on the wire format.

pub mod entity;
pub mod error;
pub mod repository;
pub mod value_object;

pub use entity::{Connection, ConnectionState, PusherChannel, RegisterOutcome, Room, Signal};
pub use error::PushError;
pub use repository::RoomRepository;
pub use value_object::{ConnectionId, RoomId, Timestamp};

#[cfg(test)]
pub use repository::MockRoomRepository;
