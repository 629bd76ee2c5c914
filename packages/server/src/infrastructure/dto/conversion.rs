//! Conversion logic between DTOs and domain entities.

use serde_json::Value;
use signal_relay_shared::time::timestamp_to_rfc3339;
use thiserror::Error;

use crate::domain::{Room, RoomId, Signal};
use crate::infrastructure::dto::{http::RoomSummaryDto, websocket::RawSignal};

/// Discriminator of the only forwarded signal
pub const MESSAGE_TYPE: &str = "message";

/// Key inside `data` that names the target room
pub const ROOM_ID_KEY: &str = "roomId";

/// Reasons an inbound payload could not be decoded
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON envelope: {0}")]
    Json(#[from] serde_json::Error),

    #[error("message data must be an object")]
    DataNotObject,

    #[error("message data has no string `roomId`")]
    MissingRoomId,
}

// ========================================
// DTO → Domain Entity
// ========================================

impl TryFrom<RawSignal> for Signal {
    type Error = DecodeError;

    fn try_from(raw: RawSignal) -> Result<Self, Self::Error> {
        if raw.r#type != MESSAGE_TYPE {
            return Ok(Signal::Unknown { kind: raw.r#type });
        }

        let Value::Object(data) = raw.data else {
            return Err(DecodeError::DataNotObject);
        };
        let room_id = match data.get(ROOM_ID_KEY) {
            Some(Value::String(id)) => RoomId::new(id.clone()),
            _ => return Err(DecodeError::MissingRoomId),
        };

        Ok(Signal::Message { room_id, data })
    }
}

/// Decode a text frame into a [`Signal`]
pub fn decode_signal(text: &str) -> Result<Signal, DecodeError> {
    let raw: RawSignal = serde_json::from_str(text)?;
    Signal::try_from(raw)
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<Room> for RoomSummaryDto {
    fn from(room: Room) -> Self {
        Self {
            id: room.id.into_string(),
            host: room.host.id().to_string(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}
