use swipe_core::GameError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    InvalidResponse { status: u16, body: String },

    #[error("Failed to decode backend response: {0}")]
    Decoding(#[from] serde_json::Error),

    #[error("Sync not configured: {0}")]
    Configuration(String),

    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),
}

pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Game session has stopped")]
    Closed,

    #[error("Game error: {0}")]
    Game(#[from] GameError),
}

pub type SessionResult<T> = Result<T, SessionError>;
