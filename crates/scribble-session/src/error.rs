//! Error types for the session layer.

use scribble_protocol::{ConnectionId, RoomId};

/// Errors that can occur while binding connections to rooms.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The connection is not in any room.
    #[error("connection {0} is not in a room")]
    NotBound(ConnectionId),

    /// The connection already occupies a room. It must leave that room
    /// before it can be bound to another one.
    #[error("connection {0} is already in room {1}")]
    AlreadyBound(ConnectionId, RoomId),
}
