//! Entities of the relay: rooms, connections and routed signals.

use std::sync::{
    Arc,
    atomic::{AtomicU8, Ordering},
};

use serde_json::{Map, Value};
use tokio::sync::mpsc;

use super::{ConnectionId, PushError, RoomId, Timestamp};

/// Outbound channel of one connection (serialized JSON frames)
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Transport state of a connection
///
/// `Connecting -> Open -> Closing -> Closed`. Only `Open` connections receive pushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    Connecting = 0,
    Open = 1,
    Closing = 2,
    Closed = 3,
}

impl ConnectionState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Connecting,
            1 => Self::Open,
            2 => Self::Closing,
            _ => Self::Closed,
        }
    }
}

/// Handle to one relay connection.
///
/// Cloning is cheap; all clones share the transport state and the outbound channel.
/// The registry holds a clone, the socket task owns the transport itself.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    state: Arc<AtomicU8>,
    sender: PusherChannel,
}

impl Connection {
    pub fn new(id: ConnectionId, sender: PusherChannel) -> Self {
        Self {
            id,
            state: Arc::new(AtomicU8::new(ConnectionState::Connecting as u8)),
            sender,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Move to `next`. Transitions only go forward; a backwards move is ignored.
    pub fn transition(&self, next: ConnectionState) -> ConnectionState {
        let previous = self.state.fetch_max(next as u8, Ordering::AcqRel);
        ConnectionState::from_u8(previous)
    }

    /// Queue a frame for this connection, only if it is open.
    pub fn push(&self, content: String) -> Result<(), PushError> {
        let state = self.state();
        if state != ConnectionState::Open {
            return Err(PushError::NotOpen(state));
        }
        self.sender
            .send(content)
            .map_err(|_| PushError::ChannelClosed)
    }
}

/// A named routing slot bound to exactly one host connection
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub host: Connection,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(id: RoomId, host: Connection, created_at: Timestamp) -> Self {
        Self {
            id,
            host,
            created_at,
        }
    }
}

/// Result of registering a connection as host of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// No room existed; the connection is now the host
    Created,
    /// The id already has a host; nothing was stored
    Conflict,
}

/// Inbound signal, already decoded from the wire envelope
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Forward `data` (which still contains `roomId`) to the host of `room_id`
    Message {
        room_id: RoomId,
        data: Map<String, Value>,
    },
    /// Any other discriminator; logged and dropped
    Unknown { kind: String },
}
