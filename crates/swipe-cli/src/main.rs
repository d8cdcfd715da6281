use clap::{Parser, Subcommand};
use std::process;
use swipe_protocol::config::{ConfigError, GameConfig};
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON game config. Replaces the command-line rule and timing values.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play in the terminal (w/a/s/d or up/down/left/right)
    Play(cmd::play::PlayArgs),
    /// Let a bot play against virtual time and report the run
    Simulate(cmd::simulate::SimulateArgs),
    /// Show the online rankings
    Leaderboard(cmd::leaderboard::LeaderboardArgs),
    /// Claim a username on the leaderboard backend
    Register(cmd::register::RegisterArgs),
    /// Show (or reset) the local score record
    Score(cmd::score::ScoreArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Play(args) => match resolve_config(cli.config.as_deref(), &args.config) {
            Ok(config) => cmd::play::run(config).await,
            Err(e) => Err(e.into()),
        },
        Commands::Simulate(args) => match resolve_config(cli.config.as_deref(), &args.config) {
            Ok(config) => cmd::simulate::run(&args, config),
            Err(e) => Err(e.into()),
        },
        Commands::Leaderboard(args) => match resolve_config(cli.config.as_deref(), &args.config)
        {
            Ok(config) => cmd::leaderboard::run(&args, config).await,
            Err(e) => Err(e.into()),
        },
        Commands::Register(args) => match resolve_config(cli.config.as_deref(), &args.config) {
            Ok(config) => cmd::register::run(&args, config).await,
            Err(e) => Err(e.into()),
        },
        Commands::Score(args) => match resolve_config(cli.config.as_deref(), &args.config) {
            Ok(config) => cmd::score::run(&args, config),
            Err(e) => Err(e.into()),
        },
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}

/// A config file wins over flags, except for sync settings it leaves
/// empty, which fall back to flags and the environment.
fn resolve_config(path: Option<&str>, from_args: &GameConfig) -> Result<GameConfig, ConfigError> {
    let Some(path) = path else {
        from_args.validate()?;
        return Ok(from_args.clone());
    };

    info!("📂 Loading config: {}", path);
    let mut config = GameConfig::load_from_file(path)?;
    if config.sync.sync_url.is_none() {
        config.sync.sync_url = from_args.sync.sync_url.clone();
    }
    if config.sync.sync_key.is_none() {
        config.sync.sync_key = from_args.sync.sync_key.clone();
    }
    Ok(config)
}
