//! Connection-to-room session index for Scribble.
//!
//! A player has no identity beyond its connection, and a connection sits
//! in at most one room. [`SessionIndex`] is the reverse map that answers
//! "which room is this connection in?" in O(1), so inbound events don't
//! have to carry (or be trusted about) a room id.
//!
//! # How it fits in the stack
//!
//! ```text
//! Room Layer (above)     ← keeps rosters and this index in lockstep
//!     ↕
//! Session Layer (this crate)  ← connection → room binding
//!     ↕
//! Protocol Layer (below) ← provides ConnectionId, RoomId
//! ```

mod error;
mod index;

pub use error::SessionError;
pub use index::SessionIndex;
