use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    /// Every direction was excluded. Unreachable while callers exclude at
    /// most one of the four.
    #[error("No direction left to pick after excluding {0} of 4")]
    NoDirectionAvailable(usize),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),
}

impl From<swipe_protocol::config::ConfigError> for GameError {
    fn from(e: swipe_protocol::config::ConfigError) -> Self {
        GameError::Config(e.to_string())
    }
}

pub type GameResult<T> = Result<T, GameError>;
