//! Chapter audio endpoints.

use crate::error::Result;
use crate::http::{expect_success, send};
use audiobook_core::{AudioUpdate, NewAudio};
use reqwest::Client;
use tracing::{debug, info};

/// Client for audio attached to chapters.
pub struct AudioClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AudioClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Attach an uploaded audio file to a chapter.
    pub async fn add(&self, audio: &NewAudio) -> Result<()> {
        audio.validate()?;

        let url = format!("{}/audio", self.base_url);
        debug!(url = %url, chapter_id = audio.chapter_id, name = %audio.audio_name, "Adding audio");

        let response = send(self.http.post(&url).json(audio)).await?;
        expect_success(response).await?;

        info!(chapter_id = audio.chapter_id, name = %audio.audio_name, "Audio attached");
        Ok(())
    }

    /// Rename or re-point an audio entry.
    pub async fn update(&self, id: i64, update: &AudioUpdate) -> Result<()> {
        let url = format!("{}/audio/{}", self.base_url, id);
        debug!(url = %url, "Updating audio");

        let response = send(self.http.put(&url).json(update)).await?;
        expect_success(response).await?;

        info!(audio_id = id, "Audio updated");
        Ok(())
    }

    /// Delete an audio entry.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let url = format!("{}/audio/{}", self.base_url, id);
        debug!(url = %url, "Deleting audio");

        let response = send(self.http.delete(&url)).await?;
        expect_success(response).await?;

        info!(audio_id = id, "Audio deleted");
        Ok(())
    }
}
