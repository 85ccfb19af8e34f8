//! `ScribbleServer` builder, accept loop and game loop.
//!
//! Two kinds of task run here:
//!
//! - one **connection task** per socket ([`handle_connection`]), which only
//!   decodes inbound frames and encodes outbound events;
//! - a single **game loop** that owns the [`GameService`] and processes
//!   connection events and fired alarms strictly one at a time.
//!
//! Connection tasks talk to the game loop through an [`Inbound`] channel
//! and receive their outbound events on a channel of their own.

use std::collections::HashMap;

use scribble_protocol::{ClientEvent, ConnectionId, JsonCodec, ServerEvent};
use scribble_room::{Alarm, Command, GameConfig, GameService, WordBank};
use scribble_timer::TokioScheduler;
use scribble_transport::{Transport, WebSocketTransport};
use tokio::sync::mpsc;

use crate::ScribbleError;
use crate::handler::handle_connection;

/// Messages from connection tasks to the game loop.
#[derive(Debug)]
pub(crate) enum Inbound {
    /// A socket was accepted; `outbound` is where its events go.
    Connected {
        conn: ConnectionId,
        outbound: mpsc::UnboundedSender<ServerEvent>,
    },
    Event {
        conn: ConnectionId,
        event: ClientEvent,
    },
    Closed(ConnectionId),
}

/// Builder for configuring and starting a Scribble server.
///
/// # Example
///
/// ```rust,no_run
/// use scribble::prelude::*;
///
/// # async fn demo() -> Result<(), ScribbleError> {
/// let server = ScribbleServer::builder()
///     .bind("0.0.0.0:3000")
///     .game_config(GameConfig::default())
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct ScribbleServerBuilder {
    bind_addr: String,
    game_config: GameConfig,
    words: WordBank,
}

impl ScribbleServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            game_config: GameConfig::default(),
            words: WordBank::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets round timing, rounds per game, reward and default category.
    pub fn game_config(mut self, config: GameConfig) -> Self {
        self.game_config = config;
        self
    }

    /// Replaces the built-in word table.
    pub fn words(mut self, words: WordBank) -> Self {
        self.words = words;
        self
    }

    /// Binds the listener and assembles the game service.
    ///
    /// # Errors
    /// [`ScribbleError::Room`] for an invalid game config or word table,
    /// [`ScribbleError::Transport`] if the address cannot be bound.
    pub async fn build(self) -> Result<ScribbleServer, ScribbleError> {
        let (scheduler, alarms) = TokioScheduler::new();
        let service = GameService::new(self.game_config, scheduler, self.words)?;
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        Ok(ScribbleServer {
            transport,
            service,
            alarms,
        })
    }
}

impl Default for ScribbleServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Scribble server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct ScribbleServer {
    transport: WebSocketTransport,
    service: GameService<TokioScheduler<Alarm>>,
    alarms: mpsc::UnboundedReceiver<Alarm>,
}

impl ScribbleServer {
    /// Creates a new builder.
    pub fn builder() -> ScribbleServerBuilder {
        ScribbleServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the accept loop and the game loop.
    ///
    /// Only returns if the game loop stops, which is a bug; accept
    /// failures are logged and the loop keeps going.
    pub async fn run(mut self) -> Result<(), ScribbleError> {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let game = GameLoop {
            service: self.service,
            outbound: HashMap::new(),
        };
        let mut game_task = tokio::spawn(game.run(inbound_rx, self.alarms));

        tracing::info!("Scribble server running");

        loop {
            tokio::select! {
                accepted = self.transport.accept() => match accepted {
                    Ok(conn) => {
                        let inbound = inbound_tx.clone();
                        tokio::spawn(async move {
                            if let Err(e) = handle_connection(conn, inbound, JsonCodec).await {
                                tracing::debug!(error = %e, "connection ended with error");
                            }
                        });
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "accept failed");
                    }
                },
                result = &mut game_task => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "game loop panicked");
                    }
                    return Err(ScribbleError::Shutdown);
                }
            }
        }
    }
}

/// Owns all game state. Runs on one task; nothing else touches it.
struct GameLoop {
    service: GameService<TokioScheduler<Alarm>>,
    outbound: HashMap<ConnectionId, mpsc::UnboundedSender<ServerEvent>>,
}

impl GameLoop {
    async fn run(
        mut self,
        mut inbound: mpsc::UnboundedReceiver<Inbound>,
        mut alarms: mpsc::UnboundedReceiver<Alarm>,
    ) {
        loop {
            tokio::select! {
                Some(msg) = inbound.recv() => self.on_inbound(msg),
                Some(alarm) = alarms.recv() => self.apply(Command::Alarm(alarm)),
                else => break,
            }
        }
        tracing::info!("game loop stopped");
    }

    fn on_inbound(&mut self, msg: Inbound) {
        match msg {
            Inbound::Connected { conn, outbound } => {
                tracing::info!(%conn, connections = self.outbound.len() + 1, "client connected");
                let _ = outbound.send(ServerEvent::Welcome {
                    connection_id: conn,
                });
                self.outbound.insert(conn, outbound);
            }
            Inbound::Event { conn, event } => {
                self.apply(Command::Client { conn, event });
            }
            Inbound::Closed(conn) => {
                self.outbound.remove(&conn);
                tracing::info!(%conn, connections = self.outbound.len(), "client disconnected");
                self.apply(Command::Disconnected(conn));
            }
        }
    }

    /// Runs one command and fans its output out to current members.
    fn apply(&mut self, command: Command) {
        for (recipient, event) in self.service.handle(command) {
            for conn in self.service.recipients(&recipient) {
                if let Some(tx) = self.outbound.get(&conn) {
                    // A closed receiver means the connection task is
                    // exiting; its Closed message is already queued.
                    let _ = tx.send(event.clone());
                }
            }
        }
    }
}
