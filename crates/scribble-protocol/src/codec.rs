//! Codec trait and implementations for serializing/deserializing events.
//!
//! The server loop does not care how events are serialized; it just needs
//! something that implements [`Codec`]. Today that is [`JsonCodec`],
//! because browser clients speak JSON natively.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` because one codec value is shared by every
/// connection task.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// ## Example
///
/// ```rust
/// use scribble_protocol::{ClientEvent, Codec, JsonCodec};
///
/// let codec = JsonCodec;
/// let raw = br#"{"event":"answer","data":{"message":" Apple "}}"#;
/// let event: ClientEvent = codec.decode(raw).unwrap();
/// assert_eq!(event, ClientEvent::Answer { message: " Apple ".into() });
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientEvent, ServerEvent};

    #[test]
    fn test_json_codec_decode_garbage_returns_decode_error() {
        let result: Result<ClientEvent, _> = JsonCodec.decode(b"not json at all");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_json_codec_encode_produces_utf8_json() {
        let bytes = JsonCodec
            .encode(&ServerEvent::HintUpdated { hint: "ㄱㅇㅇ".into() })
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, r#"{"event":"hintUpdated","data":{"hint":"ㄱㅇㅇ"}}"#);
    }
}
