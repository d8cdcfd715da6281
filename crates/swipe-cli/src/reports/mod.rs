mod events;
mod tables;

pub use self::events::describe as describe_event;
pub use self::tables::{
    leaderboard as print_leaderboard, score_record as print_score_record,
    simulation as print_simulation, snapshot as print_snapshot,
};
