//! Identity, routing, and view types shared by every layer.

use std::fmt;

use scribble_transport::ConnectionId;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RoomId
// ---------------------------------------------------------------------------

/// Identifier of a room, as typed by players (`"r1"`, `"friday-night"`)
/// or generated by the server when a player joins without one.
///
/// A "newtype wrapper" around `String`: you can't pass a nickname where a
/// room is expected, even though both are strings underneath.
/// `#[serde(transparent)]` keeps it a bare string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Wraps a room name. Callers are expected to have trimmed it.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The room name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ---------------------------------------------------------------------------
// Recipient
// ---------------------------------------------------------------------------

/// Specifies who should receive a server event.
///
/// Game logic produces `(Recipient, ServerEvent)` pairs; the server loop
/// resolves room recipients to the room's members at delivery time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// Every member of the room.
    Room(RoomId),

    /// Every member of the room except one connection. Used to relay a
    /// player's strokes back to everyone else.
    RoomExcept(RoomId, ConnectionId),

    /// One connection only. The secret word travels this way.
    Connection(ConnectionId),
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A player as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: ConnectionId,
    pub nickname: String,
    pub score: u32,
}

/// The full public state of a room, broadcast as `roomState`.
///
/// Never contains the secret word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    /// Players in join order, which is also drawing order.
    pub players: Vec<PlayerInfo>,
    pub drawer_id: Option<ConnectionId>,
    pub round: u32,
    pub max_rounds: u32,
    pub category: String,
    pub round_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_serializes_as_bare_string() {
        let json = serde_json::to_value(RoomId::new("r1")).unwrap();
        assert_eq!(json, serde_json::json!("r1"));
    }

    #[test]
    fn test_room_snapshot_uses_camel_case_fields() {
        let snapshot = RoomSnapshot {
            room_id: RoomId::new("r1"),
            players: vec![PlayerInfo {
                id: ConnectionId::new(3),
                nickname: "Alice".into(),
                score: 10,
            }],
            drawer_id: Some(ConnectionId::new(3)),
            round: 2,
            max_rounds: 5,
            category: "food".into(),
            round_active: true,
        };
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["roomId"], "r1");
        assert_eq!(json["drawerId"], 3);
        assert_eq!(json["maxRounds"], 5);
        assert_eq!(json["roundActive"], true);
        assert_eq!(json["players"][0]["nickname"], "Alice");
        assert_eq!(json["players"][0]["score"], 10);
    }

    #[test]
    fn test_room_snapshot_without_drawer_serializes_null() {
        let snapshot = RoomSnapshot {
            room_id: RoomId::new("r1"),
            players: vec![],
            drawer_id: None,
            round: 0,
            max_rounds: 5,
            category: "food".into(),
            round_active: false,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json["drawerId"].is_null());
    }
}
