use crate::direction::Direction;
use crate::trap::FailureStage;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use swipe_protocol::config::RulesParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Default)]
pub enum RoundState {
    #[default]
    Idle,
    AwaitingSwipe,
    /// A fake direction is on screen. Swipes are still judged against the
    /// real target.
    Faking,
    PendingFailureFeint,
    AwaitingGuess,
    RevealingSuccess,
    RevealingFailure,
}

impl RoundState {
    pub const fn accepts_swipe(self) -> bool {
        matches!(
            self,
            Self::AwaitingSwipe | Self::Faking | Self::AwaitingGuess
        )
    }

    pub const fn is_trap(self) -> bool {
        matches!(
            self,
            Self::PendingFailureFeint
                | Self::AwaitingGuess
                | Self::RevealingSuccess
                | Self::RevealingFailure
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// What the player must swipe to score.
    pub target_direction: Direction,
    /// What is currently drawn. Differs from the target while faking.
    pub displayed_direction: Direction,
    /// The real answer once a trap has sprung.
    pub actual_direction: Option<Direction>,
    pub consecutive_correct: u32,
}

impl Round {
    pub fn new(target: Direction, consecutive_correct: u32) -> Self {
        Self {
            target_direction: target,
            displayed_direction: target,
            actual_direction: None,
            consecutive_correct,
        }
    }

    pub fn is_faked(&self) -> bool {
        self.displayed_direction != self.target_direction
    }
}

/// `clamp(streak / streak_per_level, 1, max_difficulty)`.
pub fn difficulty_level(consecutive_correct: u32, rules: &RulesParams) -> u32 {
    (consecutive_correct / rules.streak_per_level.max(1)).clamp(1, rules.max_difficulty.max(1))
}

/// Callbacks the round machine schedules on its own timer lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundTimer {
    ShowFake { difficulty: u32 },
    RestoreDisplay,
    TriggerTrap,
    ShowQuestion,
    FinishSuccess,
    Failure(FailureStage),
}
