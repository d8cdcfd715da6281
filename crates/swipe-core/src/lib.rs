// Re-export the shared config so callers can reach it via swipe_core::config
pub use swipe_protocol::config;

pub mod direction;
pub mod error;
pub mod events;
pub mod fakeout;
pub mod machine;
pub mod round;
pub mod score;
pub mod timer;
pub mod trap;

pub use direction::{pick_random, Direction, SwipeGesture};
pub use error::{GameError, GameResult};
pub use events::{GameEvent, TrapStage};
pub use machine::{MachineSnapshot, RoundMachine, SwipeOutcome};
pub use round::{Round, RoundState};
pub use score::{ScoreRecord, ScoreStore};
