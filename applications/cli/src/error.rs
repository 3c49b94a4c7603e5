/// CLI error types
use audiobook_client::ClientError;
use audiobook_core::ValidationError;
use audiobook_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Not logged in. Run `audiobook login` first")]
    NotLoggedIn,

    #[error("This command requires an admin account")]
    NotAdmin,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
