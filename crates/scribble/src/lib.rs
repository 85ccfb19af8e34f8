//! # Scribble
//!
//! Authoritative server for a multiplayer draw-and-guess game.
//!
//! One player per room draws a secret word while the others guess in
//! chat; correct guesses score and advance the game through a fixed
//! number of rounds. Browser clients connect over WebSocket and speak
//! JSON events (see [`scribble_protocol`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scribble::prelude::*;
//!
//! # async fn demo() -> Result<(), ScribbleError> {
//! let config = ServerConfig::from_env();
//! let server = ScribbleServer::builder()
//!     .bind(&config.bind_addr())
//!     .words(config.load_words()?)
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod error;
mod handler;
mod server;

pub use config::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig};
pub use error::ScribbleError;
pub use server::{ScribbleServer, ScribbleServerBuilder};

pub mod prelude {
    pub use crate::{ScribbleError, ScribbleServer, ScribbleServerBuilder, ServerConfig};
    pub use scribble_protocol::{
        ClientEvent, ConnectionId, PlayerInfo, Recipient, RoomId, RoomSnapshot, ServerEvent,
        Stroke,
    };
    pub use scribble_room::{GameConfig, GameService, WordBank, WordSource};
}
