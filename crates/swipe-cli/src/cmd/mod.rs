pub mod leaderboard;
pub mod play;
pub mod register;
pub mod score;
pub mod simulate;

use swipe_core::score::{HighScoreSync, JsonFileStore};
use swipe_core::{GameResult, ScoreStore};
use swipe_protocol::config::GameConfig;
use swipe_node::{SyncClient, SyncResult};

pub type CmdResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Opens the on-disk score record named by the config.
pub fn open_scores(config: &GameConfig, sync: Box<dyn HighScoreSync>) -> GameResult<ScoreStore> {
    ScoreStore::open(Box::new(JsonFileStore::new(&config.sync.score_file)), sync)
}

pub fn sync_client(config: &GameConfig) -> SyncResult<SyncClient> {
    SyncClient::from_params(&config.sync)
}
