//! Unified error type for the Scribble server.

use scribble_protocol::ProtocolError;
use scribble_room::RoomError;
use scribble_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant generates a `From` impl, so
/// `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum ScribbleError {
    /// A transport-level error (accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode or decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A room-level error, including session bookkeeping and unusable
    /// startup configuration.
    #[error(transparent)]
    Room(#[from] RoomError),

    /// Reading configuration from disk failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The game loop has stopped; no more events can be processed.
    #[error("game loop shut down")]
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribble_protocol::{ConnectionId, RoomId};
    use scribble_session::SessionError;

    #[test]
    fn test_from_transport_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        let scribble_err: ScribbleError = TransportError::SendFailed(io).into();
        assert!(matches!(scribble_err, ScribbleError::Transport(_)));
        assert!(scribble_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let scribble_err: ScribbleError = ProtocolError::Decode(err).into();
        assert!(matches!(scribble_err, ScribbleError::Protocol(_)));
        assert!(scribble_err.to_string().starts_with("decode failed"));
    }

    #[test]
    fn test_session_error_arrives_wrapped_in_room_error() {
        let err = RoomError::from(SessionError::NotBound(ConnectionId::new(1)));
        let scribble_err: ScribbleError = err.into();
        assert!(matches!(
            scribble_err,
            ScribbleError::Room(RoomError::Session(SessionError::NotBound(_)))
        ));
    }

    #[test]
    fn test_from_room_error() {
        let err = RoomError::NotFound(RoomId::new("r1"));
        let scribble_err: ScribbleError = err.into();
        assert!(matches!(scribble_err, ScribbleError::Room(_)));
        assert!(scribble_err.to_string().contains("r1"));
    }

    #[test]
    fn test_from_io_error() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "words.json");
        let scribble_err: ScribbleError = err.into();
        assert!(matches!(scribble_err, ScribbleError::Io(_)));
        assert!(scribble_err.to_string().contains("words.json"));
    }
}
