use crate::direction::{pick_random, Direction};
use crate::error::GameResult;
use crate::round::{difficulty_level, RoundTimer};
use crate::timer::{TimerCategory, TimerHandle, TimerScheduler};
use std::time::Duration;
use swipe_protocol::config::{RulesParams, TimingParams};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FakeOutPlan {
    pub delay: Duration,
    pub difficulty: u32,
}

/// Decides whether a round flashes a wrong arrow, and when.
///
/// The controller only ever touches `displayed_direction`; the target is
/// owned by the round machine and never changes here.
#[derive(Debug, Clone)]
pub struct FakeOutController {
    rules: RulesParams,
    timing: TimingParams,
}

impl FakeOutController {
    pub fn new(rules: RulesParams, timing: TimingParams) -> Self {
        Self { rules, timing }
    }

    /// `min(cap, difficulty * chance_per_level)`.
    pub fn fake_probability(&self, difficulty: u32) -> f64 {
        (difficulty as f64 * self.rules.fake_chance_per_level).min(self.rules.fake_chance_cap)
    }

    /// `max(min, base - difficulty * step)`.
    pub fn fake_duration(&self, difficulty: u32) -> Duration {
        let t = &self.timing;
        let shrink = t.fake_duration_step_ms.saturating_mul(difficulty as u64);
        let ms = t
            .fake_duration_base_ms
            .saturating_sub(shrink)
            .max(t.fake_duration_min_ms);
        Duration::from_millis(ms)
    }

    /// Rolls for this round. `None` below the streak threshold or on a
    /// losing roll.
    pub fn plan(&self, consecutive_correct: u32, rng: &mut fastrand::Rng) -> Option<FakeOutPlan> {
        if consecutive_correct < self.rules.fake_min_streak {
            return None;
        }

        let difficulty = difficulty_level(consecutive_correct, &self.rules);
        if rng.f64() >= self.fake_probability(difficulty) {
            return None;
        }

        let t = &self.timing;
        let delay_ms = rng.u64(t.fake_delay_min_ms..=t.fake_delay_max_ms);
        Some(FakeOutPlan {
            delay: Duration::from_millis(delay_ms),
            difficulty,
        })
    }

    /// Called once per round start. Always clears the previous round's fake
    /// timer first.
    pub fn on_round_start(
        &self,
        consecutive_correct: u32,
        rng: &mut fastrand::Rng,
        timers: &mut TimerScheduler<RoundTimer>,
        now: Duration,
    ) -> Option<TimerHandle> {
        timers.cancel_category(TimerCategory::FakeOut);

        let plan = self.plan(consecutive_correct, rng)?;
        debug!(
            "🎭 Fake-out planned in {:?} (difficulty {})",
            plan.delay, plan.difficulty
        );
        Some(timers.schedule(
            TimerCategory::FakeOut,
            now,
            plan.delay,
            RoundTimer::ShowFake {
                difficulty: plan.difficulty,
            },
        ))
    }

    /// Fires the fake: returns the lie to display and arms its restore.
    pub fn show_fake(
        &self,
        target: Direction,
        difficulty: u32,
        rng: &mut fastrand::Rng,
        timers: &mut TimerScheduler<RoundTimer>,
        now: Duration,
    ) -> GameResult<Direction> {
        let fake = pick_random(rng, &[target])?;
        timers.schedule(
            TimerCategory::FakeOut,
            now,
            self.fake_duration(difficulty),
            RoundTimer::RestoreDisplay,
        );
        Ok(fake)
    }

    pub fn cancel(&self, timers: &mut TimerScheduler<RoundTimer>) -> bool {
        timers.cancel_category(TimerCategory::FakeOut)
    }
}
