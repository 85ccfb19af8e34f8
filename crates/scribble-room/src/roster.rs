//! Player roster: who is in a room, in the order they joined.

use scribble_protocol::{ConnectionId, PlayerInfo};

/// One player's record inside a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: ConnectionId,
    pub nickname: String,
    pub score: u32,
}

impl Player {
    /// A fresh player with zero points.
    pub fn new(id: ConnectionId, nickname: impl Into<String>) -> Self {
        Self {
            id,
            nickname: nickname.into(),
            score: 0,
        }
    }

    pub fn info(&self) -> PlayerInfo {
        PlayerInfo {
            id: self.id,
            nickname: self.nickname.clone(),
            score: self.score,
        }
    }
}

/// Players of one room in stable join order.
///
/// Join order is drawing order, so this is a `Vec`, not a map. Rooms are
/// small enough that linear lookups are fine.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a player. Returns `false` (and changes nothing) if the
    /// connection is already on the roster.
    pub fn add(&mut self, player: Player) -> bool {
        if self.contains(player.id) {
            return false;
        }
        self.players.push(player);
        true
    }

    /// Removes a player, keeping everyone else's relative order.
    pub fn remove(&mut self, id: ConnectionId) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id == id)?;
        Some(self.players.remove(idx))
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: ConnectionId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.get(id).is_some()
    }

    /// Connection ids in join order.
    pub fn ids(&self) -> Vec<ConnectionId> {
        self.players.iter().map(|p| p.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Wire view of every player, in join order.
    pub fn infos(&self) -> Vec<PlayerInfo> {
        self.players.iter().map(Player::info).collect()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn(id: u64) -> ConnectionId {
        ConnectionId::new(id)
    }

    fn roster_of(ids: &[u64]) -> Roster {
        let mut roster = Roster::new();
        for id in ids {
            roster.add(Player::new(conn(*id), format!("p{id}")));
        }
        roster
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let roster = roster_of(&[3, 1, 2]);
        assert_eq!(roster.ids(), vec![conn(3), conn(1), conn(2)]);
    }

    #[test]
    fn test_add_duplicate_is_rejected() {
        let mut roster = roster_of(&[1]);
        assert!(!roster.add(Player::new(conn(1), "again")));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get(conn(1)).unwrap().nickname, "p1");
    }

    #[test]
    fn test_remove_preserves_order_of_others() {
        let mut roster = roster_of(&[1, 2, 3]);
        let removed = roster.remove(conn(2)).unwrap();
        assert_eq!(removed.nickname, "p2");
        assert_eq!(roster.ids(), vec![conn(1), conn(3)]);
    }

    #[test]
    fn test_remove_unknown_returns_none() {
        let mut roster = roster_of(&[1]);
        assert!(roster.remove(conn(9)).is_none());
    }

    #[test]
    fn test_new_player_starts_at_zero() {
        let roster = roster_of(&[1]);
        assert_eq!(roster.get(conn(1)).unwrap().score, 0);
    }

    #[test]
    fn test_infos_reflect_scores() {
        let mut roster = roster_of(&[1, 2]);
        roster.get_mut(conn(2)).unwrap().score = 20;
        let infos = roster.infos();
        assert_eq!(infos[1].score, 20);
        assert_eq!(infos[1].id, conn(2));
    }
}
