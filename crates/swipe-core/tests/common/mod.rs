#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;
use strum::IntoEnumIterator;
use swipe_core::config::GameConfig;
use swipe_core::score::{HighScoreSync, MemoryStore, ScoreRecord, ScoreStore};
use swipe_core::{Direction, RoundMachine, RoundState, SwipeOutcome};

pub const SEED: u64 = 42;

pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// No traps, no fake-outs: only the target matters.
pub fn quiet_config() -> GameConfig {
    let mut cfg = GameConfig::default();
    cfg.rules.trap_chance = 0.0;
    cfg.rules.fake_chance_per_level = 0.0;
    cfg
}

/// Every eligible round is trapped.
pub fn trap_config() -> GameConfig {
    let mut cfg = quiet_config();
    cfg.rules.trap_chance = 1.0;
    cfg
}

/// Every eligible round fakes, exactly one second in.
pub fn fake_config() -> GameConfig {
    let mut cfg = quiet_config();
    cfg.rules.fake_chance_per_level = 1.0;
    cfg.rules.fake_chance_cap = 1.0;
    cfg.timing.fake_delay_min_ms = 1000;
    cfg.timing.fake_delay_max_ms = 1000;
    cfg
}

pub fn wrong_for(d: Direction) -> Direction {
    Direction::iter().find(|x| *x != d).unwrap()
}

pub fn started(cfg: &GameConfig) -> RoundMachine {
    started_with(cfg, ScoreStore::in_memory())
}

pub fn started_with(cfg: &GameConfig, scores: ScoreStore) -> RoundMachine {
    let mut m = RoundMachine::with_seed(cfg, scores, SEED);
    m.start_round().unwrap();
    m
}

/// Swipes the target `n` times. Panics if any swipe does not score.
pub fn build_streak(m: &mut RoundMachine, n: u32) {
    for _ in 0..n {
        assert_eq!(m.state(), RoundState::AwaitingSwipe);
        let target = m.round().target_direction;
        match m.handle_swipe(target).unwrap() {
            SwipeOutcome::Scored { .. } => {}
            other => panic!("expected a scored swipe, got {:?}", other),
        }
    }
}

/// Records every high score pushed to sync.
#[derive(Clone, Default)]
pub struct RecordingSync {
    pub calls: Arc<Mutex<Vec<u32>>>,
}

impl RecordingSync {
    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }
}

impl HighScoreSync for RecordingSync {
    fn high_score_raised(&self, score: u32) {
        self.calls.lock().unwrap().push(score);
    }
}

pub fn store_with(current: u32, high: u32, sync: RecordingSync) -> ScoreStore {
    let record = ScoreRecord {
        current_score: current,
        high_score: high,
        ..Default::default()
    };
    ScoreStore::open(
        Box::new(MemoryStore::with_record(record)),
        Box::new(sync),
    )
    .unwrap()
}
