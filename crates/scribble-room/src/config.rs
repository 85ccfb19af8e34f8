//! Game configuration and the round state machine's phases.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::RoomError;

// ---------------------------------------------------------------------------
// GameConfig
// ---------------------------------------------------------------------------

/// Fixed game constants, supplied once at startup and shared by every
/// room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// How long the drawer has before the round times out. The hint is
    /// revealed at exactly half of this.
    pub round_duration: Duration,

    /// Rounds per game. Starting round `max_rounds + 1` ends the game.
    pub max_rounds: u32,

    /// Points awarded for a correct guess.
    pub score_reward: u32,

    /// Pause between the end of one round and the start of the next,
    /// however the round ended.
    pub cooldown: Duration,

    /// Category a freshly created room starts with.
    pub default_category: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_duration: Duration::from_secs(60),
            max_rounds: 5,
            score_reward: 10,
            cooldown: Duration::from_secs(3),
            default_category: "food".to_string(),
        }
    }
}

impl GameConfig {
    /// Checks the constants make a playable game.
    ///
    /// # Errors
    /// Returns [`RoomError::InvalidConfig`] for zero rounds, a zero round
    /// duration, or a blank default category.
    pub fn validate(&self) -> Result<(), RoomError> {
        if self.max_rounds == 0 {
            return Err(RoomError::InvalidConfig("max_rounds must be at least 1".into()));
        }
        if self.round_duration.is_zero() {
            return Err(RoomError::InvalidConfig("round_duration must be non-zero".into()));
        }
        if self.default_category.trim().is_empty() {
            return Err(RoomError::InvalidConfig("default_category must not be blank".into()));
        }
        Ok(())
    }

    /// When the hint alarm fires, relative to round start.
    pub fn hint_delay(&self) -> Duration {
        self.round_duration / 2
    }
}

// ---------------------------------------------------------------------------
// RoundPhase
// ---------------------------------------------------------------------------

/// Where a room is in its round cycle.
///
/// ```text
///            start_round
///   Idle ────────────────→ Active ──(timeout | correct guess | drawer left)──→ Idle
///    │                                                                          │
///    └──────────── start_round past max_rounds ──→ GameOver ←──────────────────┘
/// ```
///
/// `GameOver` is left only by an explicit `startGame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    #[default]
    Idle,
    Active,
    GameOver,
}

impl RoundPhase {
    /// Returns `true` while a word is being drawn.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Active => write!(f, "Active"),
            Self::GameOver => write!(f, "GameOver"),
        }
    }
}

// ---------------------------------------------------------------------------
// EndReason
// ---------------------------------------------------------------------------

/// Why an active round stopped early or on time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndReason {
    TimedOut,
    Guessed { nickname: String },
    DrawerLeft,
}

impl EndReason {
    /// The reason text shown to players in `roundEnded`.
    pub fn message(&self) -> String {
        match self {
            Self::TimedOut => "시간이 종료되었습니다.".to_string(),
            Self::Guessed { nickname } => format!("{nickname}님이 정답을 맞혔습니다!"),
            Self::DrawerLeft => "출제자가 나가서 라운드가 종료되었습니다.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_config_default() {
        let config = GameConfig::default();
        assert_eq!(config.max_rounds, 5);
        assert_eq!(config.score_reward, 10);
        assert_eq!(config.cooldown, Duration::from_secs(3));
        assert_eq!(config.default_category, "food");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_game_config_hint_delay_is_half_round() {
        let config = GameConfig {
            round_duration: Duration::from_secs(80),
            ..GameConfig::default()
        };
        assert_eq!(config.hint_delay(), Duration::from_secs(40));
    }

    #[test]
    fn test_game_config_validate_rejects_zero_rounds() {
        let config = GameConfig {
            max_rounds: 0,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(RoomError::InvalidConfig(_))));
    }

    #[test]
    fn test_game_config_validate_rejects_zero_duration() {
        let config = GameConfig {
            round_duration: Duration::ZERO,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_round_phase_is_active() {
        assert!(!RoundPhase::Idle.is_active());
        assert!(RoundPhase::Active.is_active());
        assert!(!RoundPhase::GameOver.is_active());
    }

    #[test]
    fn test_round_phase_display() {
        assert_eq!(RoundPhase::GameOver.to_string(), "GameOver");
    }

    #[test]
    fn test_end_reason_messages() {
        assert_eq!(EndReason::TimedOut.message(), "시간이 종료되었습니다.");
        let guessed = EndReason::Guessed {
            nickname: "Bob".into(),
        };
        assert!(guessed.message().contains("Bob"));
        assert!(EndReason::DrawerLeft.message().contains("출제자"));
    }
}
