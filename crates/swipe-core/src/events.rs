use crate::direction::Direction;
use crate::round::RoundState;
use crate::trap::FailureStage;
use serde::{Deserialize, Serialize};

/// Trap progress as seen by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrapStage {
    /// The correct swipe was shown as a success, but nothing was scored.
    Feint,
    /// The arrow is replaced by the undetermined indicator.
    QuestionMark,
    Revealed { actual: Direction, correct: bool },
    Failure(FailureStage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted { round: u64, displayed: Direction },
    StateChanged { from: RoundState, to: RoundState },
    DisplayChanged { direction: Direction, faked: bool },
    ScoreChanged { current: u32, high: u32 },
    Trap(TrapStage),
    Celebration { level: u32 },
    GameReset,
}
