use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid Configuration: {0}")]
    Invalid(String),
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    #[command(flatten)]
    pub rules: RulesParams,
    #[command(flatten)]
    pub timing: TimingParams,
    #[command(flatten)]
    pub sync: SyncParams,
}

/// Streak thresholds and probabilities that shape each round.
#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RulesParams {
    /// Streak needed before a round may hide a trap.
    #[arg(long, default_value_t = 3)]
    pub trap_min_streak: u32,
    #[arg(long, default_value_t = 0.20)]
    pub trap_chance: f64,

    // === FAKE-OUT ===
    #[arg(long, default_value_t = 5)]
    pub fake_min_streak: u32,
    #[arg(long, default_value_t = 5)]
    pub streak_per_level: u32,
    #[arg(long, default_value_t = 10)]
    pub max_difficulty: u32,
    #[arg(long, default_value_t = 0.07)]
    pub fake_chance_per_level: f64,
    #[arg(long, default_value_t = 0.70)]
    pub fake_chance_cap: f64,

    #[arg(long, default_value_t = 10)]
    pub celebrate_every: u32,

    /// Gestures shorter than this (in points) are not swipes.
    #[arg(long, default_value_t = 20.0)]
    pub min_swipe_distance: f32,
}

impl Default for RulesParams {
    fn default() -> Self {
        Self {
            trap_min_streak: 3,
            trap_chance: 0.20,
            fake_min_streak: 5,
            streak_per_level: 5,
            max_difficulty: 10,
            fake_chance_per_level: 0.07,
            fake_chance_cap: 0.70,
            celebrate_every: 10,
            min_swipe_distance: 20.0,
        }
    }
}

/// Every delay in the round machine, in milliseconds.
#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingParams {
    #[arg(long, default_value_t = 800)]
    pub fake_delay_min_ms: u64,
    #[arg(long, default_value_t = 2500)]
    pub fake_delay_max_ms: u64,
    #[arg(long, default_value_t = 700)]
    pub fake_duration_base_ms: u64,
    #[arg(long, default_value_t = 50)]
    pub fake_duration_step_ms: u64,
    #[arg(long, default_value_t = 200)]
    pub fake_duration_min_ms: u64,

    // === TRAP ===
    #[arg(long, default_value_t = 500)]
    pub trap_feint_ms: u64,
    #[arg(long, default_value_t = 100)]
    pub trap_question_ms: u64,
    #[arg(long, default_value_t = 500)]
    pub guess_success_ms: u64,

    // Failure stage offsets, measured from the wrong guess.
    #[arg(long, default_value_t = 400)]
    pub failure_seal_ms: u64,
    #[arg(long, default_value_t = 800)]
    pub failure_text_ms: u64,
    #[arg(long, default_value_t = 1000)]
    pub failure_particles_ms: u64,
    #[arg(long, default_value_t = 3000)]
    pub failure_reset_ms: u64,
}

impl Default for TimingParams {
    fn default() -> Self {
        Self {
            fake_delay_min_ms: 800,
            fake_delay_max_ms: 2500,
            fake_duration_base_ms: 700,
            fake_duration_step_ms: 50,
            fake_duration_min_ms: 200,
            trap_feint_ms: 500,
            trap_question_ms: 100,
            guess_success_ms: 500,
            failure_seal_ms: 400,
            failure_text_ms: 800,
            failure_particles_ms: 1000,
            failure_reset_ms: 3000,
        }
    }
}

impl TimingParams {
    pub fn trap_feint(&self) -> Duration {
        Duration::from_millis(self.trap_feint_ms)
    }

    pub fn trap_question(&self) -> Duration {
        Duration::from_millis(self.trap_question_ms)
    }

    pub fn guess_success(&self) -> Duration {
        Duration::from_millis(self.guess_success_ms)
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SyncParams {
    /// Leaderboard backend base URL. Sync is disabled when unset.
    #[arg(long, env = "SWIPE_SYNC_URL")]
    pub sync_url: Option<String>,
    #[arg(long, env = "SWIPE_SYNC_KEY", hide_env_values = true)]
    pub sync_key: Option<String>,
    #[arg(long, default_value = "Player")]
    pub username: String,
    #[arg(long, default_value = "data/score.json")]
    pub score_file: String,
}

impl Default for SyncParams {
    fn default() -> Self {
        Self {
            sync_url: None,
            sync_key: None,
            username: "Player".to_string(),
            score_file: "data/score.json".to_string(),
        }
    }
}

impl SyncParams {
    pub fn is_enabled(&self) -> bool {
        self.sync_url.is_some() && self.sync_key.is_some()
    }
}

impl GameConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.rules;
        let t = &self.timing;

        for (name, p) in [
            ("trap_chance", r.trap_chance),
            ("fake_chance_per_level", r.fake_chance_per_level),
            ("fake_chance_cap", r.fake_chance_cap),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }

        if r.streak_per_level == 0 {
            return Err(ConfigError::Invalid("streak_per_level must be > 0".into()));
        }
        if r.max_difficulty == 0 {
            return Err(ConfigError::Invalid("max_difficulty must be > 0".into()));
        }
        if r.celebrate_every == 0 {
            return Err(ConfigError::Invalid("celebrate_every must be > 0".into()));
        }
        if t.fake_delay_min_ms > t.fake_delay_max_ms {
            return Err(ConfigError::Invalid(format!(
                "fake delay range is inverted: {}ms > {}ms",
                t.fake_delay_min_ms, t.fake_delay_max_ms
            )));
        }

        let stages = [
            t.failure_seal_ms,
            t.failure_text_ms,
            t.failure_particles_ms,
            t.failure_reset_ms,
        ];
        if stages.windows(2).any(|w| w[0] > w[1]) {
            return Err(ConfigError::Invalid(
                "failure stage offsets must be non-decreasing".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let cfg: GameConfig =
            serde_json::from_str(r#"{ "rules": { "trap_chance": 0.5 } }"#).unwrap();
        assert_eq!(cfg.rules.trap_chance, 0.5);
        assert_eq!(cfg.rules.fake_min_streak, 5);
        assert_eq!(cfg.timing, TimingParams::default());
        assert_eq!(cfg.sync.username, "Player");
    }

    #[test]
    fn test_inverted_delay_range_is_rejected() {
        let mut cfg = GameConfig::default();
        cfg.timing.fake_delay_min_ms = 3000;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_out_of_range_probability_is_rejected() {
        let mut cfg = GameConfig::default();
        cfg.rules.trap_chance = 1.5;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }
}
