//! Guess evaluation.

use scribble_protocol::ConnectionId;

use crate::Room;

/// How a submitted guess is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No round is running; the text is plain chat.
    Unscored,
    /// The drawer typed it; never scored.
    DrawerSelf,
    Correct,
    Incorrect,
}

/// Judges `guess` against the room's secret word.
///
/// Both sides are trimmed and compared case-insensitively; anything short
/// of exact equality is incorrect.
pub fn evaluate(room: &Room, submitter: ConnectionId, guess: &str) -> Verdict {
    let Some(word) = room.word().filter(|_| room.is_round_active()) else {
        return Verdict::Unscored;
    };
    if room.drawer() == Some(submitter) {
        return Verdict::DrawerSelf;
    }
    if guess.trim().to_lowercase() == word.trim().to_lowercase() {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameConfig, Player, RoundPhase};
    use scribble_protocol::RoomId;

    fn active_room(word: &str) -> Room {
        let mut room = Room::new(RoomId::new("r1"), &GameConfig::default());
        room.roster.add(Player::new(ConnectionId::new(1), "Alice"));
        room.roster.add(Player::new(ConnectionId::new(2), "Bob"));
        room.drawer = Some(ConnectionId::new(1));
        room.word = Some(word.into());
        room.phase = RoundPhase::Active;
        room
    }

    #[test]
    fn test_evaluate_trims_and_ignores_case() {
        let room = active_room("apple");
        assert_eq!(evaluate(&room, ConnectionId::new(2), " Apple "), Verdict::Correct);
        assert_eq!(evaluate(&room, ConnectionId::new(2), "APPLE"), Verdict::Correct);
    }

    #[test]
    fn test_evaluate_no_partial_credit() {
        let room = active_room("apple");
        assert_eq!(evaluate(&room, ConnectionId::new(2), "appl"), Verdict::Incorrect);
        assert_eq!(evaluate(&room, ConnectionId::new(2), "apples"), Verdict::Incorrect);
    }

    #[test]
    fn test_evaluate_drawer_never_scores() {
        let room = active_room("apple");
        assert_eq!(evaluate(&room, ConnectionId::new(1), "apple"), Verdict::DrawerSelf);
    }

    #[test]
    fn test_evaluate_idle_room_is_unscored() {
        let mut room = active_room("apple");
        room.phase = RoundPhase::Idle;
        assert_eq!(evaluate(&room, ConnectionId::new(2), "apple"), Verdict::Unscored);
    }

    #[test]
    fn test_evaluate_hangul_word() {
        let room = active_room("고양이");
        assert_eq!(evaluate(&room, ConnectionId::new(2), "고양이 "), Verdict::Correct);
        assert_eq!(evaluate(&room, ConnectionId::new(2), "강아지"), Verdict::Incorrect);
    }
}
