use super::{sync_client, CmdResult};
use clap::Args;
use swipe_protocol::config::GameConfig;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    #[command(flatten)]
    pub config: GameConfig,

    pub name: String,
}

pub async fn run(args: &RegisterArgs, config: GameConfig) -> CmdResult {
    let client = sync_client(&config)?;
    client.register(&args.name).await?;
    info!("✅ Registered '{}'", args.name.trim());
    println!(
        "Registered '{}'. Pass --username {} to play under it.",
        args.name.trim(),
        args.name.trim()
    );
    Ok(())
}
