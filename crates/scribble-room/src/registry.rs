//! Room registry: every live room, keyed by id.

use std::collections::HashMap;

use rand::Rng;
use scribble_protocol::RoomId;

use crate::{GameConfig, Room};

const ROOM_ID_LEN: usize = 6;
const ROOM_ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Owns all rooms. Rooms are created on first reference and removed by
/// the service once their roster is empty.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the room, creating an idle one if it does not exist yet.
    pub fn get_or_create(&mut self, id: &RoomId, config: &GameConfig) -> &mut Room {
        self.rooms.entry(id.clone()).or_insert_with(|| {
            tracing::info!(room_id = %id, "room created");
            Room::new(id.clone(), config)
        })
    }

    pub fn get(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn get_mut(&mut self, id: &RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id)
    }

    /// Removes a room and hands it back so the caller can cancel its
    /// timers.
    pub fn remove(&mut self, id: &RoomId) -> Option<Room> {
        self.rooms.remove(id)
    }

    pub fn contains(&self, id: &RoomId) -> bool {
        self.rooms.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// A fresh six-character `[a-z0-9]` id not used by any live room.
    pub fn random_room_id(&self) -> RoomId {
        let mut rng = rand::rng();
        loop {
            let id: String = (0..ROOM_ID_LEN)
                .map(|_| char::from(ROOM_ID_CHARS[rng.random_range(0..ROOM_ID_CHARS.len())]))
                .collect();
            let id = RoomId::new(id);
            if !self.rooms.contains_key(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_is_idempotent() {
        let mut registry = RoomRegistry::new();
        let config = GameConfig::default();
        let id = RoomId::new("r1");

        registry.get_or_create(&id, &config).round = 3;
        let room = registry.get_or_create(&id, &config);

        assert_eq!(room.round(), 3);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_returns_room() {
        let mut registry = RoomRegistry::new();
        let id = RoomId::new("r1");
        registry.get_or_create(&id, &GameConfig::default());

        assert!(registry.remove(&id).is_some());
        assert!(!registry.contains(&id));
        assert!(registry.remove(&id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_random_room_id_shape() {
        let registry = RoomRegistry::new();
        for _ in 0..50 {
            let id = registry.random_room_id();
            assert_eq!(id.as_str().len(), ROOM_ID_LEN);
            assert!(
                id.as_str()
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
                "bad id {id}"
            );
        }
    }
}
