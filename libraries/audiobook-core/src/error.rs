/// Client-side validation errors
use thiserror::Error;

/// Result type alias using `ValidationError`
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Validation failure detected before a request reaches the server
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty or blank
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Review rating outside 1..=5
    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),

    /// New password shorter than the minimum
    #[error("Password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length
        min: usize,
    },

    /// Password confirmation does not match
    #[error("Password confirmation does not match")]
    PasswordMismatch,

    /// File is not an image
    #[error("Not an image file: {0}")]
    NotAnImage(String),

    /// Playback rate outside the supported set
    #[error("Unsupported playback rate: {0}")]
    UnsupportedRate(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ValidationError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Fail with `MissingField` when `value` is empty after trimming.
pub fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}
