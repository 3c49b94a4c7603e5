//! Stand-alone AI tools and the personal voice library.
//!
//! Text-to-speech renders arbitrary text in one of the user's voice samples.
//! Image-to-speech uploads an image, extracts its text and renders that.
//! Every successful render by a logged-in user is appended to listen history.

use crate::client::AudiobookClient;
use crate::error::{ClientError, Result};
use crate::upload::is_image_file;
use audiobook_core::error::require;
use audiobook_core::{
    ListenHistoryEntry, NewVoiceSample, User, ValidationError, VoiceSample, VoiceSampleUpdate,
};
use chrono::Utc;
use std::path::Path;
use tracing::{info, warn};

/// History book title for text-to-speech renders
pub const TTS_HISTORY_TITLE: &str = "Text to Speech";

/// History book title for image-to-speech renders
pub const ITS_HISTORY_TITLE: &str = "ITS Generated";

/// A rendered audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechOutput {
    /// URL of the generated audio
    pub audio_url: String,
    /// Service status message
    pub message: String,
    /// Whether a history entry was written
    pub recorded: bool,
}

/// Text recognised in an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    /// Uploaded image URL
    pub image_url: String,
    /// Recognised text
    pub text: String,
}

/// Text-to-speech and image-to-speech.
pub struct SpeechTools<'a> {
    client: &'a AudiobookClient,
}

impl<'a> SpeechTools<'a> {
    /// Create the tools over `client`.
    pub fn new(client: &'a AudiobookClient) -> Self {
        Self { client }
    }

    /// Render `text` in `voice`, recording history when `user` is set.
    pub async fn text_to_speech(
        &self,
        user: Option<&User>,
        text: &str,
        voice: &VoiceSample,
    ) -> Result<SpeechOutput> {
        require("text", text)?;

        let tts = self.client.ai().generate_speech(text, &voice.url).await?;
        let recorded = match user {
            Some(user) => {
                let entry = ListenHistoryEntry::new(
                    &user.username,
                    TTS_HISTORY_TITLE,
                    TTS_HISTORY_TITLE,
                    &tts.audio_file_url,
                    &voice.name,
                    Utc::now(),
                );
                self.record(&entry).await
            }
            None => false,
        };

        Ok(SpeechOutput {
            audio_url: tts.audio_file_url,
            message: tts.message,
            recorded,
        })
    }

    /// Upload an image and extract its text.
    pub async fn extract_text(&self, image: &Path) -> Result<ExtractedText> {
        if !is_image_file(image) {
            return Err(ValidationError::NotAnImage(image.display().to_string()).into());
        }

        let image_url = self.client.uploads().upload_file(image).await?;
        let ocr = self.client.ai().extract_text(&image_url).await?;

        info!(image = %image_url, chars = ocr.text_from_image.chars().count(), "Image text extracted");
        Ok(ExtractedText {
            image_url,
            text: ocr.text_from_image,
        })
    }

    /// Render text extracted from an image. Requires a logged-in user.
    pub async fn image_text_to_speech(
        &self,
        user: Option<&User>,
        text: &str,
        voice: &VoiceSample,
    ) -> Result<SpeechOutput> {
        require("text", text)?;
        let user = user.ok_or(ClientError::NotLoggedIn)?;

        let tts = self.client.ai().generate_speech(text, &voice.url).await?;
        let entry = ListenHistoryEntry::new(
            &user.username,
            ITS_HISTORY_TITLE,
            &voice.name,
            &tts.audio_file_url,
            format!("ITS - {}", voice.name),
            Utc::now(),
        );
        let recorded = self.record(&entry).await;

        Ok(SpeechOutput {
            audio_url: tts.audio_file_url,
            message: tts.message,
            recorded,
        })
    }

    async fn record(&self, entry: &ListenHistoryEntry) -> bool {
        match self.client.history().add(entry).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, audio = %entry.audio_name, "Failed to record listen history");
                false
            }
        }
    }
}

// =============================================================================
// Voice library
// =============================================================================

/// A user's voice samples, kept in sync with the server after each change.
pub struct VoiceLibrary<'a> {
    client: &'a AudiobookClient,
    username: String,
    samples: Vec<VoiceSample>,
}

impl<'a> VoiceLibrary<'a> {
    /// Create an empty library for `username`.
    pub fn new(client: &'a AudiobookClient, username: impl Into<String>) -> Self {
        Self {
            client,
            username: username.into(),
            samples: Vec::new(),
        }
    }

    /// Owner of the library
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Samples as last loaded
    pub fn samples(&self) -> &[VoiceSample] {
        &self.samples
    }

    /// Find a sample by id
    pub fn get(&self, id: i64) -> Option<&VoiceSample> {
        self.samples.iter().find(|s| s.id == id)
    }

    /// Re-fetch the samples from the server.
    pub async fn refresh(&mut self) -> Result<&[VoiceSample]> {
        self.samples = self.client.voices().list(&self.username).await?;
        Ok(&self.samples)
    }

    /// Upload a voice recording and register it under `name`.
    pub async fn add_from_file(&mut self, name: &str, file: &Path) -> Result<&[VoiceSample]> {
        require("audio name", name)?;

        let audio_url = self.client.uploads().upload_file(file).await?;
        self.client
            .voices()
            .add(&NewVoiceSample {
                audio_name: name.to_string(),
                audio_url,
                username: self.username.clone(),
            })
            .await?;

        self.refresh().await
    }

    /// Rename a sample, keeping its audio.
    pub async fn rename(&mut self, id: i64, name: &str) -> Result<&[VoiceSample]> {
        require("audio name", name)?;

        let sample = self.get(id).ok_or_else(|| ClientError::NotFound {
            entity: "voice sample",
            key: id.to_string(),
        })?;
        let update = VoiceSampleUpdate {
            audio_name: name.to_string(),
            audio_url: sample.url.clone(),
        };
        self.client.voices().update(id, &update).await?;

        self.refresh().await
    }

    /// Delete a sample.
    pub async fn delete(&mut self, id: i64) -> Result<&[VoiceSample]> {
        self.client.voices().delete(id).await?;
        self.refresh().await
    }
}
