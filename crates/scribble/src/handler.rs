//! Per-connection handler: decode inbound frames, encode outbound events.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! It owns no game state; everything it receives is forwarded to the
//! game loop, and everything the game loop addresses to this connection
//! is written to the socket.

use scribble_protocol::{ClientEvent, Codec, ConnectionId};
use scribble_transport::{Connection, WebSocketConnection};
use tokio::sync::mpsc;

use crate::ScribbleError;
use crate::server::Inbound;

/// Tells the game loop the connection is gone when the handler exits,
/// whichever way it exits.
struct DisconnectGuard {
    conn: ConnectionId,
    inbound: mpsc::UnboundedSender<Inbound>,
}

impl Drop for DisconnectGuard {
    fn drop(&mut self) {
        let _ = self.inbound.send(Inbound::Closed(self.conn));
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WebSocketConnection,
    inbound: mpsc::UnboundedSender<Inbound>,
    codec: C,
) -> Result<(), ScribbleError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel();
    inbound
        .send(Inbound::Connected {
            conn: conn_id,
            outbound: outbound_tx,
        })
        .map_err(|_| ScribbleError::Shutdown)?;
    let _guard = DisconnectGuard {
        conn: conn_id,
        inbound: inbound.clone(),
    };

    loop {
        tokio::select! {
            frame = conn.recv() => {
                let data = match frame {
                    Ok(Some(data)) => data,
                    Ok(None) => {
                        tracing::debug!(%conn_id, "connection closed cleanly");
                        break;
                    }
                    Err(e) => {
                        tracing::debug!(%conn_id, error = %e, "recv error");
                        break;
                    }
                };

                let event: ClientEvent = match codec.decode(&data) {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::debug!(%conn_id, error = %e, "failed to decode event");
                        continue;
                    }
                };
                inbound
                    .send(Inbound::Event { conn: conn_id, event })
                    .map_err(|_| ScribbleError::Shutdown)?;
            }
            Some(event) = outbound_rx.recv() => {
                let bytes = codec.encode(&event)?;
                conn.send(&bytes).await?;
            }
        }
    }

    let _ = conn.close().await;
    // _guard drops here → the game loop removes the player.
    Ok(())
}
