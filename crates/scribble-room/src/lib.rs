//! Room lifecycle and round scheduling for Scribble.
//!
//! Everything that decides what happens in a game lives here. The crate
//! is synchronous: a single [`GameService`] owns all rooms and is fed
//! [`Command`]s one at a time by the server's game loop. Timing is
//! delegated to an injected [`Scheduler`](scribble_timer::Scheduler),
//! whose fired [`Alarm`]s come back in as commands.
//!
//! # Key types
//!
//! - [`GameService`]: dispatch, membership and the round state machine
//! - [`Room`] / [`RoomRegistry`]: per-room state and its owner
//! - [`WordSource`] / [`WordBank`]: where secret words come from
//! - [`GameConfig`]: round duration, rounds per game, reward, cooldown
//! - [`consonant_hint`], [`next_drawer`], [`evaluate`]: the pure rules

mod alarm;
mod answer;
mod config;
mod error;
mod hint;
mod registry;
mod room;
mod roster;
mod rotation;
mod service;
mod words;

pub use alarm::{Alarm, AlarmKind};
pub use answer::{Verdict, evaluate};
pub use config::{EndReason, GameConfig, RoundPhase};
pub use error::RoomError;
pub use hint::consonant_hint;
pub use registry::RoomRegistry;
pub use room::{Room, RoomTimers};
pub use roster::{Player, Roster};
pub use rotation::next_drawer;
pub use service::{Command, DEFAULT_NICKNAME, GameService, Outbox};
pub use words::{WordBank, WordSource};
