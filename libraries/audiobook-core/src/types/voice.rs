/// Personal voice samples ("my audio")
use super::null_as_default;
use crate::error::{require, Result};
use serde::{Deserialize, Serialize};

/// A user's recorded or uploaded voice, used as the TTS reference sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSample {
    /// Server-assigned identifier
    pub id: i64,

    /// Display name
    #[serde(rename = "audio_name", default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Media URL of the sample
    #[serde(rename = "audio_url", default, deserialize_with = "null_as_default")]
    pub url: String,

    /// Owner
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
}

/// Request body for registering a voice sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewVoiceSample {
    /// Display name (required)
    pub audio_name: String,
    /// Uploaded media URL
    pub audio_url: String,
    /// Owner
    pub username: String,
}

impl NewVoiceSample {
    /// Check required fields
    pub fn validate(&self) -> Result<()> {
        require("audio name", &self.audio_name)?;
        require("audio url", &self.audio_url)?;
        require("username", &self.username)
    }
}

/// Request body for renaming or re-pointing a voice sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceSampleUpdate {
    /// Display name
    pub audio_name: String,
    /// Media URL
    pub audio_url: String,
}
