//! Scheduled re-entries into the round state machine.

use scribble_protocol::RoomId;

/// What a fired alarm asks the room to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmKind {
    /// Half-time: broadcast the consonant hint.
    RevealHint,
    /// Full time: end the round as timed out.
    RoundTimeout,
    /// Cooldown over: start the next round.
    NextRound,
}

/// A delayed event addressed to one room.
///
/// `epoch` is the room's generation when the alarm was scheduled. Rooms
/// bump their epoch whenever a round starts or ends, so an alarm from an
/// earlier round no longer matches and is dropped when it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alarm {
    pub room_id: RoomId,
    pub epoch: u64,
    pub kind: AlarmKind,
}

impl Alarm {
    pub fn new(room_id: RoomId, epoch: u64, kind: AlarmKind) -> Self {
        Self {
            room_id,
            epoch,
            kind,
        }
    }
}
