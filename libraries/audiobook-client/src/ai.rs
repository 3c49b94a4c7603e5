//! AI service endpoints (voice-cloned speech synthesis and OCR).
//!
//! These live on their own origin and are not proxied through the backend.

use crate::error::Result;
use crate::http::{read_json, send};
use crate::types::{OcrRequest, OcrResponse, TtsResponse};
use audiobook_core::error::require;
use reqwest::multipart::Form;
use reqwest::Client;
use tracing::{debug, info};

/// Client for the AI service.
pub struct AiClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AiClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Synthesize `text` in the voice of the sample at `voice_url`.
    pub async fn generate_speech(&self, text: &str, voice_url: &str) -> Result<TtsResponse> {
        require("text", text)?;
        require("voice", voice_url)?;

        let url = format!("{}/generate", self.base_url);
        debug!(url = %url, chars = text.chars().count(), voice = %voice_url, "Requesting speech synthesis");

        let form = Form::new()
            .text("text", text.to_string())
            .text("audio_url", voice_url.to_string());

        let response = send(self.http.post(&url).multipart(form)).await?;
        let tts: TtsResponse = read_json(response, "speech synthesis response").await?;

        info!(audio = %tts.audio_file_url, "Speech generated");
        Ok(tts)
    }

    /// Recognise the text in the image at `image_url`.
    pub async fn extract_text(&self, image_url: &str) -> Result<OcrResponse> {
        require("image url", image_url)?;

        let url = format!("{}/getText", self.base_url);
        debug!(url = %url, image = %image_url, "Requesting text extraction");

        let response = send(self.http.post(&url).json(&OcrRequest { image_url })).await?;
        let ocr: OcrResponse = read_json(response, "text extraction response").await?;

        info!(chars = ocr.text_from_image.chars().count(), "Text extracted");
        Ok(ocr)
    }
}
