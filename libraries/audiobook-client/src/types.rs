//! Types for client configuration and service-specific request/response bodies.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default REST backend origin
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default AI service origin
pub const DEFAULT_AI_URL: &str = "http://localhost:5000";

/// Configuration for reaching the backend and the AI service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST backend
    pub api_url: String,
    /// Base URL of the AI service (TTS, OCR)
    pub ai_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config with explicit origins and the default timeout.
    pub fn new(api_url: impl Into<String>, ai_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ai_url: ai_url.into(),
            ..Self::default()
        }
    }

    /// Replace the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            ai_url: DEFAULT_AI_URL.to_string(),
            // Speech synthesis can take a while on CPU-only hosts
            timeout: Duration::from_secs(300),
        }
    }
}

// =============================================================================
// Backend request bodies
// =============================================================================

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Request body for category create/rename.
#[derive(Debug, Serialize)]
pub(crate) struct CategoryRequest<'a> {
    pub name: &'a str,
}

// =============================================================================
// AI service types
// =============================================================================

/// Response from the speech synthesis endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TtsResponse {
    /// Status message
    #[serde(default)]
    pub message: String,
    /// URL of the generated audio file
    pub audio_file_url: String,
}

/// Request body for the OCR endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct OcrRequest<'a> {
    pub image_url: &'a str,
}

/// Response from the OCR endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OcrResponse {
    /// Status message
    #[serde(default)]
    pub message: String,
    /// Text recognised in the image
    #[serde(default)]
    pub text_from_image: String,
}
