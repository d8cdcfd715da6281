use crate::error::{SessionError, SessionResult};
use std::future;
use swipe_core::direction::SwipeGesture;
use swipe_core::{Direction, GameEvent, MachineSnapshot, RoundMachine, RoundState};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

pub enum SessionCommand {
    Swipe(Direction),
    Gesture(SwipeGesture),
    Reset,
    ResetHighScore,
    Snapshot(oneshot::Sender<MachineSnapshot>),
    Shutdown,
}

/// Cheap, cloneable sender side of a running [`GameSession`].
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    pub fn send(&self, cmd: SessionCommand) -> SessionResult<()> {
        self.tx.send(cmd).map_err(|_| SessionError::Closed)
    }

    pub fn swipe(&self, direction: Direction) -> SessionResult<()> {
        self.send(SessionCommand::Swipe(direction))
    }

    pub fn gesture(&self, gesture: SwipeGesture) -> SessionResult<()> {
        self.send(SessionCommand::Gesture(gesture))
    }

    pub fn reset(&self) -> SessionResult<()> {
        self.send(SessionCommand::Reset)
    }

    pub fn reset_high_score(&self) -> SessionResult<()> {
        self.send(SessionCommand::ResetHighScore)
    }

    pub async fn snapshot(&self) -> SessionResult<MachineSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::Snapshot(reply))?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    pub fn shutdown(&self) -> SessionResult<()> {
        self.send(SessionCommand::Shutdown)
    }
}

/// Drives a [`RoundMachine`] in real time.
///
/// The session task is the only owner of the machine. Commands and timer
/// deadlines are handled one at a time from a single `select!`, so a timer
/// can never interleave with a swipe. Before each command the game clock is
/// caught up to wall time, which lets any timer that is already due fire
/// first.
///
/// Score saves run inline on this task. The record is a few hundred bytes,
/// small enough that the write is not handed to a blocking thread.
pub struct GameSession {
    machine: RoundMachine,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
    events: mpsc::UnboundedSender<GameEvent>,
    started: Instant,
}

impl GameSession {
    /// Starts the session task. The task ends on `Shutdown` or once every
    /// handle is dropped, and yields the final snapshot.
    pub fn spawn(
        machine: RoundMachine,
    ) -> (
        SessionHandle,
        mpsc::UnboundedReceiver<GameEvent>,
        JoinHandle<SessionResult<MachineSnapshot>>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let session = Self {
            machine,
            commands: cmd_rx,
            events: event_tx,
            started: Instant::now(),
        };
        let task = tokio::spawn(session.run());

        (SessionHandle { tx: cmd_tx }, event_rx, task)
    }

    async fn run(mut self) -> SessionResult<MachineSnapshot> {
        if self.machine.state() == RoundState::Idle {
            self.machine.start_round()?;
        }
        info!("🎮 Session started");
        self.publish();

        loop {
            let deadline = self.machine.next_deadline().map(|d| self.started + d);

            tokio::select! {
                cmd = self.commands.recv() => {
                    let Some(cmd) = cmd else {
                        debug!("All session handles dropped");
                        break;
                    };
                    self.catch_up()?;
                    if !self.apply(cmd)? {
                        break;
                    }
                }
                _ = sleep_until_opt(deadline) => {
                    self.catch_up()?;
                }
            }

            self.publish();
        }

        self.machine.shutdown();
        self.publish();
        info!("🛑 Session stopped");
        Ok(self.machine.snapshot())
    }

    /// Returns `false` when the session should stop.
    fn apply(&mut self, cmd: SessionCommand) -> SessionResult<bool> {
        match cmd {
            SessionCommand::Swipe(direction) => {
                let outcome = self.machine.handle_swipe(direction)?;
                debug!("Swipe {} -> {:?}", direction, outcome);
            }
            SessionCommand::Gesture(gesture) => {
                let outcome = self.machine.handle_gesture(gesture)?;
                debug!("Gesture {:?} -> {:?}", gesture, outcome);
            }
            SessionCommand::Reset => self.machine.reset_game()?,
            SessionCommand::ResetHighScore => self.machine.reset_high_score(),
            SessionCommand::Snapshot(reply) => {
                let _ = reply.send(self.machine.snapshot());
            }
            SessionCommand::Shutdown => return Ok(false),
        }
        Ok(true)
    }

    fn catch_up(&mut self) -> SessionResult<()> {
        self.machine.advance_to(self.started.elapsed())?;
        Ok(())
    }

    fn publish(&mut self) {
        for event in self.machine.drain_events() {
            // Nobody listening is fine.
            let _ = self.events.send(event);
        }
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => future::pending().await,
    }
}
