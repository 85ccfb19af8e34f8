//! Every named event that travels on the wire.
//!
//! Both enums are *adjacently tagged*: the variant name goes in `event`,
//! its fields in `data`. `rename_all` turns `JoinRoom` into `"joinRoom"`
//! and `rename_all_fields` turns `room_id` into `"roomId"`, matching what
//! JavaScript clients expect.

use scribble_transport::ConnectionId;
use serde::{Deserialize, Serialize};

use crate::{PlayerInfo, RoomSnapshot};

/// One line segment of a drawing, relayed verbatim between clients.
///
/// The server never inspects strokes; it only forwards them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    #[serde(default)]
    pub room_id: String,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub color: String,
    pub line_width: f64,
}

// ---------------------------------------------------------------------------
// Client → server
// ---------------------------------------------------------------------------

/// Events a client may send.
///
/// Variants without payload are written `Variant {}` so they decode from
/// `"data": {}` the way browser clients send them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    /// Join (or create) a room. Blank fields are filled in by the server.
    JoinRoom {
        #[serde(default)]
        room_id: String,
        #[serde(default)]
        nickname: String,
    },

    /// Leave the current room without closing the connection.
    LeaveRoom {},

    /// Pick the word category for the following rounds.
    SetCategory { category: String },

    /// Start a new game in the current room.
    StartGame {},

    /// A stroke from the drawer's canvas.
    Draw(Stroke),

    /// Wipe everyone else's canvas.
    ClearCanvas {
        #[serde(default)]
        room_id: String,
    },

    /// A guess at the secret word.
    Answer { message: String },

    /// Free-form chat, never scored.
    ChatMessage { message: String },
}

// ---------------------------------------------------------------------------
// Server → client
// ---------------------------------------------------------------------------

/// Events the server sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    /// First frame on every connection: the id the server knows you by.
    Welcome { connection_id: ConnectionId },

    /// Full public room state.
    RoomState(RoomSnapshot),

    /// Human-readable announcement (arrivals, departures, settings).
    SystemMessage { message: String },

    RoundStarted {
        round: u32,
        max_rounds: u32,
        drawer_id: ConnectionId,
        round_duration_sec: u64,
    },

    /// The secret word. Only ever addressed to the drawer.
    WordForDrawer { word: String },

    /// Partial reveal of the word; empty string clears the hint.
    HintUpdated { hint: String },

    RoundEnded { reason: String, round: u32 },

    ClearCanvas,

    Draw(Stroke),

    AnswerResult {
        correct: bool,
        player_id: ConnectionId,
        nickname: String,
        word: String,
        new_score: u32,
    },

    Chat {
        nickname: String,
        message: String,
        correct: bool,
    },

    /// Final standings after the last round.
    GameEnded { players: Vec<PlayerInfo> },
}
