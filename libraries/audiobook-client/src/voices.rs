//! Personal voice sample ("my audio") endpoints.

use crate::error::Result;
use crate::http::{encode_segment, expect_success, read_json, read_text, send};
use audiobook_core::{NewVoiceSample, VoiceSample, VoiceSampleUpdate};
use reqwest::Client;
use tracing::{debug, info};

/// Voice sample client for the audiobook backend.
pub struct VoicesClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> VoicesClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// List a user's voice samples.
    pub async fn list(&self, username: &str) -> Result<Vec<VoiceSample>> {
        let url = format!("{}/getMyAudio/{}", self.base_url, encode_segment(username));
        debug!(url = %url, "Listing voice samples");

        let response = send(self.http.get(&url)).await?;
        read_json(response, "voice samples").await
    }

    /// Register an uploaded sample. Returns the server's message text.
    pub async fn add(&self, sample: &NewVoiceSample) -> Result<String> {
        sample.validate()?;

        let url = format!("{}/addMyAudio", self.base_url);
        debug!(url = %url, name = %sample.audio_name, "Adding voice sample");

        let response = send(self.http.post(&url).json(sample)).await?;
        let message = read_text(response).await?;

        info!(username = %sample.username, name = %sample.audio_name, "Voice sample added");
        Ok(message)
    }

    /// Rename or re-point a sample.
    pub async fn update(&self, id: i64, update: &VoiceSampleUpdate) -> Result<()> {
        let url = format!("{}/updateMyAudio/{}", self.base_url, id);
        debug!(url = %url, "Updating voice sample");

        let response = send(self.http.put(&url).json(update)).await?;
        expect_success(response).await?;

        info!(sample_id = id, "Voice sample updated");
        Ok(())
    }

    /// Delete a sample.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let url = format!("{}/deleteMyAudio/{}", self.base_url, id);
        debug!(url = %url, "Deleting voice sample");

        let response = send(self.http.delete(&url)).await?;
        expect_success(response).await?;

        info!(sample_id = id, "Voice sample deleted");
        Ok(())
    }
}
