use super::{open_scores, sync_client, CmdResult};
use crate::reports;
use clap::Args;
use std::str::FromStr;
use swipe_core::score::{HighScoreSync, NoSync};
use swipe_core::{Direction, RoundMachine};
use swipe_node::{GameSession, RemoteHighScoreSync};
use swipe_protocol::config::GameConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Handle;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub config: GameConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Swipe(Direction),
    Reset,
    Status,
    Quit,
}

pub fn parse_input(line: &str) -> Option<Input> {
    let word = line.trim();
    match word.to_ascii_lowercase().as_str() {
        "w" | "k" => Some(Input::Swipe(Direction::Up)),
        "s" | "j" => Some(Input::Swipe(Direction::Down)),
        "a" | "h" => Some(Input::Swipe(Direction::Left)),
        "d" | "l" => Some(Input::Swipe(Direction::Right)),
        "r" | "reset" => Some(Input::Reset),
        "?" | "status" => Some(Input::Status),
        "q" | "quit" | "exit" => Some(Input::Quit),
        _ => Direction::from_str(word).ok().map(Input::Swipe),
    }
}

pub async fn run(config: GameConfig) -> CmdResult {
    let remote = if config.sync.is_enabled() {
        let client = sync_client(&config)?;
        info!("☁️  Syncing high scores as '{}'", config.sync.username);
        Some(RemoteHighScoreSync::new(
            client,
            config.sync.username.clone(),
            Handle::current(),
        ))
    } else {
        None
    };
    let sync: Box<dyn HighScoreSync> = match &remote {
        Some(r) => Box::new(r.clone()),
        None => Box::new(NoSync),
    };

    let scores = open_scores(&config, sync)?;
    info!(
        "🚀 Starting game (high score {})",
        scores.high_score()
    );
    let machine = RoundMachine::new(&config, scores);
    let (handle, mut events, session) = GameSession::spawn(machine);

    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            if let Some(line) = reports::describe_event(&event) {
                println!("{}", line);
            }
        }
    });

    println!("Swipe with w/a/s/d (or up/down/left/right). r = reset, ? = status, q = quit.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Some(Input::Swipe(direction)) => handle.swipe(direction)?,
            Some(Input::Reset) => handle.reset()?,
            Some(Input::Status) => reports::print_snapshot(&handle.snapshot().await?),
            Some(Input::Quit) => break,
            None => {
                if !line.trim().is_empty() {
                    warn!("Unrecognized input '{}'", line.trim());
                }
            }
        }
    }

    handle.shutdown()?;
    let last = session.await??;
    if let Err(e) = printer.await {
        warn!("Event printer stopped: {}", e);
    }
    if let Some(remote) = remote {
        remote.flush().await;
    }

    reports::print_snapshot(&last);
    Ok(())
}
