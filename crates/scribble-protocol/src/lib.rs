//! Wire protocol for Scribble.
//!
//! This crate defines the "language" that browser clients and the game
//! server speak:
//!
//! - **Identity** ([`RoomId`], [`ConnectionId`]): who and where.
//! - **Events** ([`ClientEvent`], [`ServerEvent`]): every named message
//!   that travels on the wire, one enum variant per event.
//! - **Routing** ([`Recipient`]): which connections an outbound event
//!   goes to.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how events are
//!   converted to/from bytes.
//!
//! # Wire shape
//!
//! Every frame is a JSON object `{"event": "<name>", "data": {...}}`
//! with camelCase names, e.g.
//!
//! ```text
//! {"event":"joinRoom","data":{"roomId":"r1","nickname":"Alice"}}
//! {"event":"roundStarted","data":{"round":1,"maxRounds":5,"drawerId":3,"roundDurationSec":60}}
//! ```

mod codec;
mod error;
mod events;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use events::{ClientEvent, ServerEvent, Stroke};
pub use scribble_transport::ConnectionId;
pub use types::{PlayerInfo, Recipient, RoomId, RoomSnapshot};
