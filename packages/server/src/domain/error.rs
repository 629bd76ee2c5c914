//! Domain error types.

use thiserror::Error;

use super::ConnectionState;

/// Errors returned when pushing an outbound payload to a connection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushError {
    /// The connection is not in the `Open` state
    #[error("connection is not open (state: {0:?})")]
    NotOpen(ConnectionState),

    /// The writer task for the connection has already gone away
    #[error("outbound channel closed")]
    ChannelClosed,
}
