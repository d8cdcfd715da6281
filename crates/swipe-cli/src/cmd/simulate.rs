use super::CmdResult;
use crate::reports;
use clap::Args;
use std::time::Duration;
use swipe_core::direction::pick_random;
use swipe_core::{GameEvent, GameResult, RoundMachine, RoundState, ScoreStore, SwipeOutcome};
use swipe_protocol::config::GameConfig;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub config: GameConfig,

    /// Number of swipes the bot makes
    #[arg(long, default_value_t = 200)]
    pub swipes: u32,

    /// Chance the bot gets a swipe (or a trap guess) right
    #[arg(long, default_value_t = 0.9)]
    pub accuracy: f64,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Bot reaction time per swipe, in milliseconds
    #[arg(long, default_value_t = 450)]
    pub think_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationReport {
    pub swipes: u32,
    pub scored: u32,
    pub missed: u32,
    pub traps: u32,
    pub guesses_right: u32,
    pub guesses_wrong: u32,
    pub fakes_shown: u32,
    pub celebrations: u32,
    pub best_streak: u32,
    pub rounds: u64,
    pub high_score: u32,
    pub game_time: Duration,
}

pub fn run(args: &SimulateArgs, config: GameConfig) -> CmdResult {
    if !(0.0..=1.0).contains(&args.accuracy) {
        return Err(format!("accuracy must be within [0, 1], got {}", args.accuracy).into());
    }
    info!(
        "🤖 Simulating {} swipes (accuracy {:.0}%, seed {})",
        args.swipes,
        args.accuracy * 100.0,
        args.seed
    );

    let report = simulate(&config, args)?;
    reports::print_simulation(&report);
    Ok(())
}

/// Plays `args.swipes` swipes against virtual time. The score record stays
/// in memory so a simulation never touches the player's file.
pub fn simulate(config: &GameConfig, args: &SimulateArgs) -> GameResult<SimulationReport> {
    let mut machine = RoundMachine::with_seed(config, ScoreStore::in_memory(), args.seed);
    let mut bot = fastrand::Rng::with_seed(args.seed.wrapping_add(1));
    let think = Duration::from_millis(args.think_ms.max(1));
    let mut report = SimulationReport::default();

    machine.start_round()?;

    while report.swipes < args.swipes {
        machine.advance_by(think)?;
        tally_events(&mut report, machine.drain_events());

        if !machine.state().accepts_swipe() {
            continue;
        }

        let answer = match machine.state() {
            RoundState::AwaitingGuess => match machine.round().actual_direction {
                Some(actual) => actual,
                None => continue,
            },
            _ => machine.round().target_direction,
        };
        let choice = if bot.f64() < args.accuracy {
            answer
        } else {
            pick_random(&mut bot, &[answer])?
        };

        report.swipes += 1;
        match machine.handle_swipe(choice)? {
            SwipeOutcome::Scored { .. } => report.scored += 1,
            SwipeOutcome::Missed => report.missed += 1,
            SwipeOutcome::TrapSprung => report.traps += 1,
            SwipeOutcome::GuessCorrect { .. } => report.guesses_right += 1,
            SwipeOutcome::GuessWrong { .. } => report.guesses_wrong += 1,
            SwipeOutcome::Ignored => {}
        }
        report.best_streak = report.best_streak.max(machine.consecutive_correct());
        tally_events(&mut report, machine.drain_events());
    }

    report.rounds = machine.round_id();
    report.high_score = machine.scores().high_score();
    report.game_time = machine.clock();
    Ok(report)
}

fn tally_events(report: &mut SimulationReport, events: Vec<GameEvent>) {
    for event in events {
        match event {
            GameEvent::DisplayChanged { faked: true, .. } => report.fakes_shown += 1,
            GameEvent::Celebration { .. } => report.celebrations += 1,
            _ => {}
        }
    }
}
