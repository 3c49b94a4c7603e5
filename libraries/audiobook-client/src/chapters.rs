//! Chapter endpoints.

use crate::error::Result;
use crate::http::{expect_success, send};
use audiobook_core::{ChapterUpdate, NewChapter};
use reqwest::Client;
use tracing::{debug, info};

/// Chapter client for the audiobook backend.
pub struct ChaptersClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> ChaptersClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Add a chapter to a book. The backend does not return the new id.
    pub async fn add(&self, chapter: &NewChapter) -> Result<()> {
        chapter.validate()?;

        let url = format!("{}/chapter", self.base_url);
        debug!(url = %url, book_id = chapter.book_id, title = %chapter.chapter_title, "Adding chapter");

        let response = send(self.http.post(&url).json(chapter)).await?;
        expect_success(response).await?;

        info!(book_id = chapter.book_id, title = %chapter.chapter_title, "Chapter added");
        Ok(())
    }

    /// Update a chapter's title and/or text.
    pub async fn update(&self, id: i64, update: &ChapterUpdate) -> Result<()> {
        let url = format!("{}/chapter/{}", self.base_url, id);
        debug!(url = %url, "Updating chapter");

        let response = send(self.http.put(&url).json(update)).await?;
        expect_success(response).await?;

        info!(chapter_id = id, "Chapter updated");
        Ok(())
    }

    /// Delete a chapter.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let url = format!("{}/chapter/{}", self.base_url, id);
        debug!(url = %url, "Deleting chapter");

        let response = send(self.http.delete(&url)).await?;
        expect_success(response).await?;

        info!(chapter_id = id, "Chapter deleted");
        Ok(())
    }
}
