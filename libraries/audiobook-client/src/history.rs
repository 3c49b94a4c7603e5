//! Listen history endpoints.

use crate::error::Result;
use crate::http::{encode_segment, expect_success, read_json, send};
use audiobook_core::{ListenHistoryEntry, Page, PageResponse};
use reqwest::Client;
use tracing::{debug, info};

/// Default history page size
pub const DEFAULT_HISTORY_PAGE_SIZE: u32 = 10;

/// Listen history client for the audiobook backend.
pub struct HistoryClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> HistoryClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Append an entry. History is write-once.
    pub async fn add(&self, entry: &ListenHistoryEntry) -> Result<()> {
        let url = format!("{}/listenHistory", self.base_url);
        debug!(url = %url, username = %entry.username, audio = %entry.audio_name, "Recording listen history");

        let response = send(self.http.post(&url).json(entry)).await?;
        expect_success(response).await?;

        info!(username = %entry.username, audio = %entry.audio_name, "Listen history recorded");
        Ok(())
    }

    /// One page of a user's history, newest first as ordered by the server.
    pub async fn list(&self, username: &str, page: u32, size: u32) -> Result<Page<ListenHistoryEntry>> {
        let url = format!("{}/listenHistory/{}", self.base_url, encode_segment(username));
        debug!(url = %url, page, size, "Fetching listen history");

        let response = send(self.http.get(&url).query(&[("page", page), ("size", size)])).await?;
        let body: PageResponse<ListenHistoryEntry> = read_json(response, "listen history").await?;
        Ok(body.into_page(page))
    }
}
