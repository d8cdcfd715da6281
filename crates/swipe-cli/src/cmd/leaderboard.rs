use super::{sync_client, CmdResult};
use crate::reports;
use clap::Args;
use swipe_protocol::config::GameConfig;

#[derive(Args, Debug, Clone)]
pub struct LeaderboardArgs {
    #[command(flatten)]
    pub config: GameConfig,

    /// Rows to show
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

pub async fn run(args: &LeaderboardArgs, config: GameConfig) -> CmdResult {
    let client = sync_client(&config)?;
    let board = client.leaderboard().await?;
    reports::print_leaderboard(&board, args.top, &config.sync.username);
    Ok(())
}
