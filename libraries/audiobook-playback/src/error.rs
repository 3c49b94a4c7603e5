//! Error types for listen sessions

use audiobook_core::ValidationError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Transport controls are disabled while no playable source exists
    #[error("Controls are locked until audio is available")]
    ControlsLocked,

    /// Chapter index outside the book
    #[error("No chapter at index {0}")]
    NoChapter(usize),

    /// Admin audio index outside the chapter's renditions
    #[error("No audio at index {0}")]
    NoAudio(usize),

    /// Voice id not among the user's samples
    #[error("Unknown voice sample: {0}")]
    UnknownVoice(i64),

    /// Generation requested without a selected voice
    #[error("Select a voice first")]
    NoVoiceSelected,

    /// Generation requested for a chapter without text
    #[error("This chapter has no text to generate audio from")]
    NoChapterText,

    /// Operation not valid in the current phase
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Media element refused an operation
    #[error("Media error: {0}")]
    Media(String),

    /// Input rejected before reaching the media element
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
