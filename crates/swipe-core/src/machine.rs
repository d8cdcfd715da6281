use crate::direction::{pick_random, Direction, SwipeGesture};
use crate::error::GameResult;
use crate::events::{GameEvent, TrapStage};
use crate::fakeout::FakeOutController;
use crate::round::{difficulty_level, Round, RoundState, RoundTimer};
use crate::score::ScoreStore;
use crate::timer::{TimerCategory, TimerHandle, TimerScheduler};
use crate::trap::{FailureStage, TrapController};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use swipe_protocol::config::{GameConfig, RulesParams};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// No round was listening.
    Ignored,
    Scored { streak: u32 },
    Missed,
    /// Correct swipe on a trapped round; nothing scored yet.
    TrapSprung,
    GuessCorrect { actual: Direction },
    GuessWrong { actual: Direction },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub state: RoundState,
    pub round: Round,
    pub round_id: u64,
    pub difficulty: u32,
    pub current_score: u32,
    pub high_score: u32,
}

/// Owns the round, its timers and the score store.
///
/// Every mutation goes through `start_round`, `handle_swipe`, `advance_to`,
/// `reset_game` or `shutdown`, and each of those runs to completion before
/// the next. Time is a game clock supplied by the caller; timers fire only
/// inside [`RoundMachine::advance_to`].
pub struct RoundMachine {
    rules: RulesParams,
    state: RoundState,
    round: Round,
    round_id: u64,
    trap_armed: bool,
    clock: Duration,
    rng: fastrand::Rng,
    timers: TimerScheduler<RoundTimer>,
    fake_out: FakeOutController,
    trap: TrapController,
    scores: ScoreStore,
    events: Vec<GameEvent>,
}

impl RoundMachine {
    pub fn new(config: &GameConfig, scores: ScoreStore) -> Self {
        Self::with_rng(config, scores, fastrand::Rng::new())
    }

    pub fn with_seed(config: &GameConfig, scores: ScoreStore, seed: u64) -> Self {
        Self::with_rng(config, scores, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(config: &GameConfig, scores: ScoreStore, rng: fastrand::Rng) -> Self {
        Self {
            rules: config.rules.clone(),
            state: RoundState::Idle,
            round: Round::new(Direction::Up, 0),
            round_id: 0,
            trap_armed: false,
            clock: Duration::ZERO,
            rng,
            timers: TimerScheduler::new(),
            fake_out: FakeOutController::new(config.rules.clone(), config.timing.clone()),
            trap: TrapController::new(config.timing.clone()),
            scores,
            events: Vec::new(),
        }
    }

    // --- Accessors ---

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn round_id(&self) -> u64 {
        self.round_id
    }

    pub fn consecutive_correct(&self) -> u32 {
        self.round.consecutive_correct
    }

    pub fn difficulty(&self) -> u32 {
        difficulty_level(self.round.consecutive_correct, &self.rules)
    }

    /// Whether the current round hides a trap behind its correct swipe.
    pub fn is_trap_armed(&self) -> bool {
        self.trap_armed
    }

    pub fn is_waiting_for_guess(&self) -> bool {
        self.trap.is_waiting_for_guess()
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn pending_timer(&self, category: TimerCategory) -> Option<TimerHandle> {
        self.timers.pending(category)
    }

    pub fn timer_deadline(&self, category: TimerCategory) -> Option<Duration> {
        self.timers.deadline_of(category)
    }

    pub fn rules(&self) -> &RulesParams {
        &self.rules
    }

    pub fn scores(&self) -> &ScoreStore {
        &self.scores
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            state: self.state,
            round: self.round,
            round_id: self.round_id,
            difficulty: self.difficulty(),
            current_score: self.scores.current_score(),
            high_score: self.scores.high_score(),
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Transitions ---

    /// Deals a fresh target. The streak carries over; everything else about
    /// the previous round, including its timers, is discarded.
    pub fn start_round(&mut self) -> GameResult<()> {
        self.fake_out.cancel(&mut self.timers);
        self.trap.clear(&mut self.timers);

        let streak = self.round.consecutive_correct;
        let target = pick_random(&mut self.rng, &[])?;
        self.round = Round::new(target, streak);
        self.round_id += 1;
        self.trap_armed =
            streak >= self.rules.trap_min_streak && self.rng.f64() < self.rules.trap_chance;

        debug!(
            "🎯 Round #{}: target {} (streak {}, trap {})",
            self.round_id, target, streak, self.trap_armed
        );

        self.set_state(RoundState::AwaitingSwipe);
        self.emit(GameEvent::RoundStarted {
            round: self.round_id,
            displayed: target,
        });

        self.fake_out
            .on_round_start(streak, &mut self.rng, &mut self.timers, self.clock);
        Ok(())
    }

    pub fn handle_swipe(&mut self, direction: Direction) -> GameResult<SwipeOutcome> {
        match self.state {
            RoundState::AwaitingSwipe | RoundState::Faking => self.judge_swipe(direction),
            RoundState::AwaitingGuess => self.judge_guess(direction),
            state => {
                debug!("Ignoring {} swipe while {}", direction, state);
                Ok(SwipeOutcome::Ignored)
            }
        }
    }

    /// Resolves a raw drag and feeds it to [`RoundMachine::handle_swipe`].
    /// Drags shorter than the minimum distance are ignored.
    pub fn handle_gesture(&mut self, gesture: SwipeGesture) -> GameResult<SwipeOutcome> {
        match gesture.resolve(self.rules.min_swipe_distance) {
            Some(direction) => self.handle_swipe(direction),
            None => Ok(SwipeOutcome::Ignored),
        }
    }

    /// Moves the clock forward, firing due timers in deadline order.
    /// Returns how many fired. The clock never moves backwards.
    pub fn advance_to(&mut self, now: Duration) -> GameResult<usize> {
        let mut fired = 0;

        loop {
            let deadline = match self.timers.next_deadline() {
                Some(d) if d <= now => d,
                _ => break,
            };
            self.clock = self.clock.max(deadline);

            let Some((_, timer)) = self.timers.pop_due(deadline) else {
                break;
            };
            self.on_timer(timer)?;
            fired += 1;
        }

        self.clock = self.clock.max(now);
        Ok(fired)
    }

    pub fn advance_by(&mut self, delta: Duration) -> GameResult<usize> {
        self.advance_to(self.clock + delta)
    }

    /// Abandons the current streak: finalizes the score and deals a new
    /// round, whatever state the machine was in.
    pub fn reset_game(&mut self) -> GameResult<()> {
        self.timers.cancel_all();
        self.trap.clear(&mut self.timers);

        self.round.consecutive_correct = 0;
        self.scores.commit_game_over();

        info!("🔄 Game reset");
        self.emit(GameEvent::GameReset);
        self.emit_score();
        self.start_round()
    }

    pub fn reset_high_score(&mut self) {
        self.scores.reset_high_score();
        self.emit_score();
    }

    /// Teardown. No timer can fire after this returns.
    pub fn shutdown(&mut self) {
        self.timers.cancel_all();
        self.trap.clear(&mut self.timers);
        self.set_state(RoundState::Idle);
    }

    // --- Internals ---

    fn judge_swipe(&mut self, direction: Direction) -> GameResult<SwipeOutcome> {
        let correct = direction == self.round.target_direction;

        if correct && self.trap_armed {
            self.fake_out.cancel(&mut self.timers);
            if self.round.is_faked() {
                let target = self.round.target_direction;
                self.round.displayed_direction = target;
                self.emit(GameEvent::DisplayChanged {
                    direction: target,
                    faked: false,
                });
            }
            self.set_state(RoundState::PendingFailureFeint);
            self.emit(GameEvent::Trap(TrapStage::Feint));
            self.trap.arm_feint(&mut self.timers, self.clock);
            return Ok(SwipeOutcome::TrapSprung);
        }

        if correct {
            let streak = self.bump_streak();
            if streak % self.rules.celebrate_every.max(1) == 0 {
                let level = streak / self.rules.celebrate_every.max(1);
                info!("🎉 Streak of {} (level {})", streak, level);
                self.emit(GameEvent::Celebration { level });
            }
            self.start_round()?;
            Ok(SwipeOutcome::Scored { streak })
        } else {
            self.break_streak();
            self.start_round()?;
            Ok(SwipeOutcome::Missed)
        }
    }

    fn judge_guess(&mut self, direction: Direction) -> GameResult<SwipeOutcome> {
        let Some(outcome) = self
            .trap
            .resolve_guess(direction, &mut self.timers, self.clock)
        else {
            return Ok(SwipeOutcome::Ignored);
        };

        self.emit(GameEvent::Trap(TrapStage::Revealed {
            actual: outcome.actual,
            correct: outcome.correct,
        }));

        if outcome.correct {
            self.bump_streak();
            self.set_state(RoundState::RevealingSuccess);
            Ok(SwipeOutcome::GuessCorrect {
                actual: outcome.actual,
            })
        } else {
            self.break_streak();
            self.set_state(RoundState::RevealingFailure);
            self.emit(GameEvent::Trap(TrapStage::Failure(FailureStage::Overlay)));
            Ok(SwipeOutcome::GuessWrong {
                actual: outcome.actual,
            })
        }
    }

    fn on_timer(&mut self, timer: RoundTimer) -> GameResult<()> {
        match timer {
            RoundTimer::ShowFake { difficulty } => {
                if self.state != RoundState::AwaitingSwipe {
                    return Ok(());
                }
                let fake = self.fake_out.show_fake(
                    self.round.target_direction,
                    difficulty,
                    &mut self.rng,
                    &mut self.timers,
                    self.clock,
                )?;
                self.round.displayed_direction = fake;
                self.set_state(RoundState::Faking);
                self.emit(GameEvent::DisplayChanged {
                    direction: fake,
                    faked: true,
                });
            }
            RoundTimer::RestoreDisplay => {
                if self.state != RoundState::Faking {
                    return Ok(());
                }
                let target = self.round.target_direction;
                self.round.displayed_direction = target;
                self.set_state(RoundState::AwaitingSwipe);
                self.emit(GameEvent::DisplayChanged {
                    direction: target,
                    faked: false,
                });
            }
            RoundTimer::TriggerTrap => {
                if self.state != RoundState::PendingFailureFeint {
                    return Ok(());
                }
                let actual = self.trap.trigger(
                    self.round.displayed_direction,
                    &mut self.rng,
                    &mut self.timers,
                    self.clock,
                )?;
                self.round.actual_direction = Some(actual);
            }
            RoundTimer::ShowQuestion => {
                if self.state != RoundState::PendingFailureFeint {
                    return Ok(());
                }
                self.trap.show_question();
                self.set_state(RoundState::AwaitingGuess);
                self.emit(GameEvent::Trap(TrapStage::QuestionMark));
            }
            RoundTimer::FinishSuccess => {
                if self.state != RoundState::RevealingSuccess {
                    return Ok(());
                }
                self.start_round()?;
            }
            RoundTimer::Failure(stage) => {
                if self.state != RoundState::RevealingFailure {
                    return Ok(());
                }
                self.emit(GameEvent::Trap(TrapStage::Failure(stage)));
                if stage == FailureStage::Reset {
                    self.start_round()?;
                } else {
                    self.trap.schedule_after(stage, &mut self.timers, self.clock);
                }
            }
        }
        Ok(())
    }

    fn bump_streak(&mut self) -> u32 {
        self.round.consecutive_correct = self.round.consecutive_correct.saturating_add(1);
        let streak = self.round.consecutive_correct;
        self.scores.update_score(streak);
        self.emit_score();
        streak
    }

    fn break_streak(&mut self) {
        debug!("💥 Streak of {} broken", self.round.consecutive_correct);
        self.round.consecutive_correct = 0;
        self.scores.commit_game_over();
        self.emit_score();
    }

    fn set_state(&mut self, to: RoundState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        self.emit(GameEvent::StateChanged { from, to });
    }

    fn emit_score(&mut self) {
        self.emit(GameEvent::ScoreChanged {
            current: self.scores.current_score(),
            high: self.scores.high_score(),
        });
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
