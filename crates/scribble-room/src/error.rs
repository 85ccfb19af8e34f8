//! Error types for the room layer.
//!
//! Every variant is an ignorable precondition failure: a late or dangling
//! reference that the game service reports and then drops. None of them
//! is fatal to a room or to the process.

use scribble_protocol::{ConnectionId, RoomId};
use scribble_session::SessionError;

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room does not exist (never created, or already destroyed).
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// The connection has no player record in its room.
    #[error("connection {0} is not a player in room {1}")]
    NotInRoom(ConnectionId, RoomId),

    /// The connection asked to join the room it is already in.
    #[error("connection {0} already in room {1}")]
    AlreadyInRoom(ConnectionId, RoomId),

    /// A game cannot be started while a round is being played.
    #[error("room {0} has a round in progress")]
    RoundInProgress(RoomId),

    /// A chat line or guess was blank after trimming.
    #[error("message is empty")]
    EmptyMessage,

    /// The requested word category does not exist.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// Startup configuration or a word table is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The session index rejected the operation.
    #[error(transparent)]
    Session(#[from] SessionError),
}
