//! Main audiobook client.

use crate::ai::AiClient;
use crate::audio::AudioClient;
use crate::books::BooksClient;
use crate::categories::CategoriesClient;
use crate::chapters::ChaptersClient;
use crate::error::{ClientError, Result};
use crate::history::HistoryClient;
use crate::reviews::ReviewsClient;
use crate::types::ClientConfig;
use crate::upload::UploadClient;
use crate::users::UsersClient;
use crate::voices::VoicesClient;
use reqwest::Client;
use std::time::Duration;

/// Client for the audiobook REST backend and the AI service.
///
/// One `reqwest::Client` is shared by every sub-client. Each call is
/// fire-once: no retry, no caching.
///
/// # Example
///
/// ```ignore
/// use audiobook_client::{AudiobookClient, ClientConfig};
///
/// let client = AudiobookClient::new(ClientConfig::default())?;
///
/// let featured = client.books().featured().await?;
/// println!("{} featured books", featured.len());
///
/// let role = client.users().login("an", "secret").await?;
/// println!("Logged in as {role}");
/// ```
#[derive(Debug, Clone)]
pub struct AudiobookClient {
    http: Client,
    api_url: String,
    ai_url: String,
}

impl AudiobookClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api_url = normalize_url(&config.api_url)?;
        let ai_url = normalize_url(&config.ai_url)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Audiobook/{} (CLI)", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            api_url,
            ai_url,
        })
    }

    /// Backend base URL, without trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// AI service base URL, without trailing slash.
    pub fn ai_url(&self) -> &str {
        &self.ai_url
    }

    /// Account, profile and user management.
    pub fn users(&self) -> UsersClient<'_> {
        UsersClient::new(&self.http, &self.api_url)
    }

    /// Book catalog.
    pub fn books(&self) -> BooksClient<'_> {
        BooksClient::new(&self.http, &self.api_url)
    }

    /// Categories.
    pub fn categories(&self) -> CategoriesClient<'_> {
        CategoriesClient::new(&self.http, &self.api_url)
    }

    /// Chapters.
    pub fn chapters(&self) -> ChaptersClient<'_> {
        ChaptersClient::new(&self.http, &self.api_url)
    }

    /// Audio attached to chapters.
    pub fn audio(&self) -> AudioClient<'_> {
        AudioClient::new(&self.http, &self.api_url)
    }

    /// Book reviews.
    pub fn reviews(&self) -> ReviewsClient<'_> {
        ReviewsClient::new(&self.http, &self.api_url)
    }

    /// Listen history.
    pub fn history(&self) -> HistoryClient<'_> {
        HistoryClient::new(&self.http, &self.api_url)
    }

    /// Personal voice samples ("my audio").
    pub fn voices(&self) -> VoicesClient<'_> {
        VoicesClient::new(&self.http, &self.api_url)
    }

    /// File uploads.
    pub fn uploads(&self) -> UploadClient<'_> {
        UploadClient::new(&self.http, &self.api_url)
    }

    /// AI service (speech synthesis, OCR).
    pub fn ai(&self) -> AiClient<'_> {
        AiClient::new(&self.http, &self.ai_url)
    }
}

fn normalize_url(url: &str) -> Result<String> {
    if url.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = url.trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::InvalidUrl(format!(
            "{} must start with http:// or https://",
            url
        )));
    }

    Ok(url)
}
