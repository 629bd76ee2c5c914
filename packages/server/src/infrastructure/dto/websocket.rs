//! WebSocket envelope DTOs.
//!
//! Both directions use `{ "type": string, "data": any }`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerSignal {
    /// Connection accepted and processed
    #[serde(rename = "connected")]
    Connected,
    /// Request refused, e.g. the room already has a host
    #[serde(rename = "bad request")]
    BadRequest(String),
    /// Payload forwarded from another connection
    #[serde(rename = "message")]
    Message(Map<String, Value>),
}

impl ServerSignal {
    /// Notice sent to a connection whose room id is already hosted
    pub const ROOM_EXISTS: &'static str = "room has exist";

    pub fn room_exists() -> Self {
        Self::BadRequest(Self::ROOM_EXISTS.to_string())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Raw inbound envelope before it is interpreted
#[derive(Debug, Clone, Deserialize)]
pub struct RawSignal {
    pub r#type: String,
    #[serde(default)]
    pub data: Value,
}
