//! The session index: which room each connection currently occupies.

use std::collections::HashMap;

use scribble_protocol::{ConnectionId, RoomId};

use crate::SessionError;

/// Maps each connection to the single room it occupies.
///
/// Not thread-safe by itself: it lives inside the game service, which is
/// owned by one task and processes one event at a time.
#[derive(Debug, Default)]
pub struct SessionIndex {
    bindings: HashMap<ConnectionId, RoomId>,
}

impl SessionIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a connection to a room.
    ///
    /// Binding to the room the connection is already in is a no-op.
    ///
    /// # Errors
    /// Returns [`SessionError::AlreadyBound`] if the connection occupies a
    /// different room. Callers leave that room first.
    pub fn bind(&mut self, conn: ConnectionId, room_id: RoomId) -> Result<(), SessionError> {
        if let Some(current) = self.bindings.get(&conn) {
            if *current == room_id {
                return Ok(());
            }
            return Err(SessionError::AlreadyBound(conn, current.clone()));
        }
        tracing::debug!(%conn, %room_id, "session bound");
        self.bindings.insert(conn, room_id);
        Ok(())
    }

    /// Clears a connection's binding and returns the room it was in.
    ///
    /// # Errors
    /// Returns [`SessionError::NotBound`] if the connection is in no room.
    pub fn unbind(&mut self, conn: ConnectionId) -> Result<RoomId, SessionError> {
        let room_id = self
            .bindings
            .remove(&conn)
            .ok_or(SessionError::NotBound(conn))?;
        tracing::debug!(%conn, %room_id, "session unbound");
        Ok(room_id)
    }

    /// Returns the room a connection is in, if any.
    pub fn room_of(&self, conn: ConnectionId) -> Option<&RoomId> {
        self.bindings.get(&conn)
    }

    /// Number of bound connections.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if no connection is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn(id: u64) -> ConnectionId {
        ConnectionId::new(id)
    }

    fn room(id: &str) -> RoomId {
        RoomId::new(id)
    }

    #[test]
    fn test_bind_new_connection_records_room() {
        let mut index = SessionIndex::new();
        index.bind(conn(1), room("r1")).unwrap();
        assert_eq!(index.room_of(conn(1)), Some(&room("r1")));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_bind_same_room_twice_is_noop() {
        let mut index = SessionIndex::new();
        index.bind(conn(1), room("r1")).unwrap();
        index.bind(conn(1), room("r1")).unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_bind_other_room_returns_already_bound() {
        let mut index = SessionIndex::new();
        index.bind(conn(1), room("r1")).unwrap();

        let err = index.bind(conn(1), room("r2")).unwrap_err();
        assert!(matches!(err, SessionError::AlreadyBound(c, ref r) if c == conn(1) && *r == room("r1")));
        // The original binding is untouched.
        assert_eq!(index.room_of(conn(1)), Some(&room("r1")));
    }

    #[test]
    fn test_unbind_returns_previous_room() {
        let mut index = SessionIndex::new();
        index.bind(conn(1), room("r1")).unwrap();

        assert_eq!(index.unbind(conn(1)).unwrap(), room("r1"));
        assert!(index.room_of(conn(1)).is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn test_unbind_unknown_connection_returns_not_bound() {
        let mut index = SessionIndex::new();
        let err = index.unbind(conn(7)).unwrap_err();
        assert!(matches!(err, SessionError::NotBound(c) if c == conn(7)));
    }

    #[test]
    fn test_rebind_after_unbind_succeeds() {
        let mut index = SessionIndex::new();
        index.bind(conn(1), room("r1")).unwrap();
        index.unbind(conn(1)).unwrap();
        index.bind(conn(1), room("r2")).unwrap();
        assert_eq!(index.room_of(conn(1)), Some(&room("r2")));
    }

    #[test]
    fn test_error_display_mentions_ids() {
        let err = SessionError::AlreadyBound(conn(2), room("lobby"));
        assert_eq!(err.to_string(), "connection conn-2 is already in room lobby");
    }
}
