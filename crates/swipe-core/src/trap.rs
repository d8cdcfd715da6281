use crate::direction::{pick_random, Direction};
use crate::error::GameResult;
use crate::round::RoundTimer;
use crate::timer::{TimerCategory, TimerHandle, TimerScheduler};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum_macros::{Display, EnumIter};
use swipe_protocol::config::TimingParams;
use tracing::debug;

/// Scripted stages after a wrong guess. Purely visual, except `Reset`
/// which starts the next round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum FailureStage {
    Overlay,
    Seal,
    FailText,
    Particles,
    Reset,
}

impl FailureStage {
    pub fn next(self) -> Option<FailureStage> {
        match self {
            Self::Overlay => Some(Self::Seal),
            Self::Seal => Some(Self::FailText),
            Self::FailText => Some(Self::Particles),
            Self::Particles => Some(Self::Reset),
            Self::Reset => None,
        }
    }

    /// Offset from the wrong guess.
    pub fn offset(self, timing: &TimingParams) -> Duration {
        let ms = match self {
            Self::Overlay => 0,
            Self::Seal => timing.failure_seal_ms,
            Self::FailText => timing.failure_text_ms,
            Self::Particles => timing.failure_particles_ms,
            Self::Reset => timing.failure_reset_ms,
        };
        Duration::from_millis(ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessOutcome {
    pub actual: Direction,
    pub guess: Direction,
    pub correct: bool,
}

/// Runs the trap: feint, question mark, guess, reveal.
///
/// The whole sequence lives on the `Trap` timer lane and is chained one
/// stage at a time, so at most one trap timer is ever outstanding.
#[derive(Debug, Clone)]
pub struct TrapController {
    timing: TimingParams,
    actual: Option<Direction>,
    waiting_for_guess: bool,
}

impl TrapController {
    pub fn new(timing: TimingParams) -> Self {
        Self {
            timing,
            actual: None,
            waiting_for_guess: false,
        }
    }

    pub fn actual(&self) -> Option<Direction> {
        self.actual
    }

    pub fn is_waiting_for_guess(&self) -> bool {
        self.waiting_for_guess
    }

    /// The player swiped the real target on a trapped round.
    pub fn arm_feint(&self, timers: &mut TimerScheduler<RoundTimer>, now: Duration) -> TimerHandle {
        timers.schedule(
            TimerCategory::Trap,
            now,
            self.timing.trap_feint(),
            RoundTimer::TriggerTrap,
        )
    }

    /// Chooses the hidden answer, distinct from what was on screen.
    pub fn trigger(
        &mut self,
        displayed: Direction,
        rng: &mut fastrand::Rng,
        timers: &mut TimerScheduler<RoundTimer>,
        now: Duration,
    ) -> GameResult<Direction> {
        let actual = pick_random(rng, &[displayed])?;
        self.actual = Some(actual);
        debug!("🪤 Trap sprung: shown {} but actual is {}", displayed, actual);

        timers.schedule(
            TimerCategory::Trap,
            now,
            self.timing.trap_question(),
            RoundTimer::ShowQuestion,
        );
        Ok(actual)
    }

    pub fn show_question(&mut self) {
        self.waiting_for_guess = true;
    }

    /// Judges a guess. Returns `None` when no guess is expected.
    ///
    /// The waiting flag drops before anything else, so one trap can only be
    /// resolved once.
    pub fn resolve_guess(
        &mut self,
        guess: Direction,
        timers: &mut TimerScheduler<RoundTimer>,
        now: Duration,
    ) -> Option<GuessOutcome> {
        if !self.waiting_for_guess {
            return None;
        }
        self.waiting_for_guess = false;

        let actual = self.actual?;
        let correct = guess == actual;

        if correct {
            timers.schedule(
                TimerCategory::Trap,
                now,
                self.timing.guess_success(),
                RoundTimer::FinishSuccess,
            );
        } else {
            self.schedule_after(FailureStage::Overlay, timers, now);
        }

        Some(GuessOutcome {
            actual,
            guess,
            correct,
        })
    }

    /// Arms the stage after `current`. Returns `false` once `Reset` has run.
    pub fn schedule_after(
        &self,
        current: FailureStage,
        timers: &mut TimerScheduler<RoundTimer>,
        now: Duration,
    ) -> bool {
        let Some(next) = current.next() else {
            return false;
        };

        let gap = next
            .offset(&self.timing)
            .saturating_sub(current.offset(&self.timing));
        timers.schedule(TimerCategory::Trap, now, gap, RoundTimer::Failure(next));
        true
    }

    pub fn clear(&mut self, timers: &mut TimerScheduler<RoundTimer>) {
        timers.cancel_category(TimerCategory::Trap);
        self.actual = None;
        self.waiting_for_guess = false;
    }
}
