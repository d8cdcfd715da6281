use swipe_core::trap::FailureStage;
use swipe_core::{GameEvent, RoundState, TrapStage};

/// One terminal line per event worth showing. State changes that the
/// other events already imply are skipped.
pub fn describe(event: &GameEvent) -> Option<String> {
    let line = match event {
        GameEvent::RoundStarted { round, displayed } => {
            format!("#{:<4} {}  ({})", round, displayed.arrow(), displayed)
        }
        GameEvent::DisplayChanged { direction, faked } => {
            if *faked {
                format!("      {}  ?!", direction.arrow())
            } else {
                format!("      {}  (back)", direction.arrow())
            }
        }
        GameEvent::ScoreChanged { current, high } => {
            format!("      score {}  best {}", current, high)
        }
        GameEvent::Celebration { level } => format!("🎉 Celebration level {}!", level),
        GameEvent::GameReset => "🔄 Streak broken, starting over".to_string(),
        GameEvent::Trap(stage) => match stage {
            TrapStage::Feint => "      ✔ ...".to_string(),
            TrapStage::QuestionMark => "      ❓  Which way was it really?".to_string(),
            TrapStage::Revealed { actual, correct } => {
                let verdict = if *correct { "✅ Got it" } else { "💥 Trapped" };
                format!("      {} (it was {})", verdict, actual.arrow())
            }
            TrapStage::Failure(FailureStage::FailText) => "      ✖ FAIL".to_string(),
            TrapStage::Failure(_) => return None,
        },
        GameEvent::StateChanged { to, .. } => match to {
            RoundState::Idle => "      (stopped)".to_string(),
            _ => return None,
        },
    };
    Some(line)
}
