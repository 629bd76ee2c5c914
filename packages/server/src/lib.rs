//! WebSocket signaling relay.
//!
//! Clients connect with a `room` query parameter. The first connection for a room id
//! becomes its host; any connection may then send
//! `{"type":"message","data":{"roomId": ..., ...}}` and the whole `data` object is
//! forwarded to that room's host. Typically used to exchange WebRTC offers, answers
//! and ICE candidates before a direct peer connection exists.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
