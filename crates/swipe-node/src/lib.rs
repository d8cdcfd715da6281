pub mod error;
pub mod remote;
pub mod session;
pub mod sync;

pub use error::{SessionError, SessionResult, SyncError, SyncResult};
pub use remote::{RemoteHighScoreSync, SyncStatus};
pub use session::{GameSession, SessionCommand, SessionHandle};
pub use sync::SyncClient;
