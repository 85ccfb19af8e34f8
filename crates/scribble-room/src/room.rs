//! Per-room state owned by the registry.

use scribble_protocol::{ConnectionId, RoomId, RoomSnapshot};
use scribble_timer::TimerHandle;

use crate::{GameConfig, Roster, RoundPhase};

/// Pending timer handles of one room. At most one of each kind.
#[derive(Debug, Clone, Default)]
pub struct RoomTimers {
    pub hint: Option<TimerHandle>,
    pub timeout: Option<TimerHandle>,
    pub next_round: Option<TimerHandle>,
}

impl RoomTimers {
    /// Takes the handles of the round in progress, leaving the cooldown.
    pub fn take_round(&mut self) -> impl Iterator<Item = TimerHandle> + use<> {
        [self.hint.take(), self.timeout.take()].into_iter().flatten()
    }

    /// Takes every handle.
    pub fn take_all(&mut self) -> impl Iterator<Item = TimerHandle> + use<> {
        [self.hint.take(), self.timeout.take(), self.next_round.take()]
            .into_iter()
            .flatten()
    }

    pub fn pending(&self) -> usize {
        [self.hint, self.timeout, self.next_round].iter().flatten().count()
    }
}

/// One isolated game session.
///
/// Fields are mutated only by [`GameService`](crate::GameService); other
/// code reads them through the accessors.
#[derive(Debug)]
pub struct Room {
    pub(crate) id: RoomId,
    pub(crate) roster: Roster,
    pub(crate) drawer: Option<ConnectionId>,
    pub(crate) word: Option<String>,
    pub(crate) round: u32,
    pub(crate) max_rounds: u32,
    pub(crate) category: String,
    pub(crate) phase: RoundPhase,
    pub(crate) epoch: u64,
    pub(crate) timers: RoomTimers,
}

impl Room {
    /// An empty, idle room at round 0.
    pub fn new(id: RoomId, config: &GameConfig) -> Self {
        Self {
            id,
            roster: Roster::new(),
            drawer: None,
            word: None,
            round: 0,
            max_rounds: config.max_rounds,
            category: config.default_category.clone(),
            phase: RoundPhase::Idle,
            epoch: 0,
            timers: RoomTimers::default(),
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn drawer(&self) -> Option<ConnectionId> {
        self.drawer
    }

    /// The secret word. Set only while a round is active.
    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_round_active(&self) -> bool {
        self.phase.is_active()
    }

    /// Generation counter; changes whenever a round starts or ends.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn timers(&self) -> &RoomTimers {
        &self.timers
    }

    /// The public view broadcast as `roomState`.
    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            room_id: self.id.clone(),
            players: self.roster.infos(),
            drawer_id: self.drawer,
            round: self.round,
            max_rounds: self.max_rounds,
            category: self.category.clone(),
            round_active: self.phase.is_active(),
        }
    }

    pub(crate) fn next_epoch(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    #[test]
    fn test_new_room_defaults() {
        let room = Room::new(RoomId::new("r1"), &GameConfig::default());
        assert_eq!(room.round(), 0);
        assert_eq!(room.max_rounds(), 5);
        assert_eq!(room.category(), "food");
        assert!(!room.is_round_active());
        assert!(room.drawer().is_none());
        assert!(room.word().is_none());
        assert_eq!(room.timers().pending(), 0);
    }

    #[test]
    fn test_snapshot_never_contains_word() {
        let mut room = Room::new(RoomId::new("r1"), &GameConfig::default());
        room.roster.add(Player::new(ConnectionId::new(1), "Alice"));
        room.word = Some("비밀단어".into());
        let json = format!("{:?}", room.snapshot());
        assert!(!json.contains("비밀단어"));
        assert_eq!(room.snapshot().players.len(), 1);
    }

    #[test]
    fn test_timers_take_round_leaves_cooldown() {
        let mut timers = RoomTimers::default();
        let mut scheduler = scribble_timer::ManualScheduler::<()>::new();
        use scribble_timer::Scheduler;
        let a = scheduler.schedule(std::time::Duration::from_secs(1), ());
        let b = scheduler.schedule(std::time::Duration::from_secs(2), ());
        let c = scheduler.schedule(std::time::Duration::from_secs(3), ());
        timers.hint = Some(a);
        timers.timeout = Some(b);
        timers.next_round = Some(c);

        let taken: Vec<_> = timers.take_round().collect();
        assert_eq!(taken, vec![a, b]);
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.take_all().collect::<Vec<_>>(), vec![c]);
        assert_eq!(timers.pending(), 0);
    }
}
