//! Error types for the protocol layer.
//!
//! Each crate in Scribble defines its own error enum. When you see a
//! `ProtocolError`, the problem is in turning events into bytes or back,
//! not in networking or game rules.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning an event into bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into an event).
    ///
    /// Common causes: malformed JSON, an unknown `event` name, missing
    /// required fields, or wrong field types.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
