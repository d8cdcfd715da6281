use super::{open_scores, CmdResult};
use crate::reports;
use clap::Args;
use swipe_core::score::NoSync;
use swipe_protocol::config::GameConfig;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: GameConfig,

    /// Zero the stored high score
    #[arg(long, default_value_t = false)]
    pub reset_high: bool,
}

pub fn run(args: &ScoreArgs, config: GameConfig) -> CmdResult {
    let mut scores = open_scores(&config, Box::new(NoSync))?;
    if args.reset_high {
        scores.reset_high_score();
    }
    reports::print_score_record(scores.record(), &config.sync.score_file);
    Ok(())
}
