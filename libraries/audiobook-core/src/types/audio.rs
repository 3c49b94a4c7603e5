/// Chapter audio types
use super::null_as_default;
use crate::error::{require, Result};
use serde::{Deserialize, Serialize};

/// Admin-uploaded audio rendition of a chapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audio {
    /// Server-assigned identifier
    pub id: i64,

    /// Display name, usually the voice label
    #[serde(rename = "audio_name", default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Media URL
    #[serde(rename = "audio_file", default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// Request body for attaching audio to a chapter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAudio {
    /// Owning chapter
    pub chapter_id: i64,
    /// Display name
    pub audio_name: String,
    /// Media URL returned by the upload endpoint
    pub audio_file: String,
}

impl NewAudio {
    /// Check required fields
    pub fn validate(&self) -> Result<()> {
        require("audio name", &self.audio_name)?;
        require("audio file", &self.audio_file)
    }
}

/// Request body for updating chapter audio
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AudioUpdate {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_name: Option<String>,
    /// New media URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<String>,
}
