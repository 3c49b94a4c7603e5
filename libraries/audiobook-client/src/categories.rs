//! Category endpoints.

use crate::error::Result;
use crate::http::{expect_success, read_json, send};
use crate::types::CategoryRequest;
use audiobook_core::error::require;
use audiobook_core::Category;
use reqwest::Client;
use tracing::{debug, info, warn};

/// Category client for the audiobook backend.
pub struct CategoriesClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> CategoriesClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// List all categories.
    pub async fn list(&self) -> Result<Vec<Category>> {
        let url = format!("{}/category/getCategories", self.base_url);
        debug!(url = %url, "Listing categories");

        let response = send(self.http.get(&url)).await?;
        read_json(response, "categories").await
    }

    /// Create a category.
    pub async fn add(&self, name: &str) -> Result<()> {
        require("category name", name)?;

        let url = format!("{}/category", self.base_url);
        debug!(url = %url, name = %name, "Adding category");

        let response = send(self.http.post(&url).json(&CategoryRequest { name })).await?;
        expect_success(response).await?;

        info!(name = %name, "Category added");
        Ok(())
    }

    /// Rename a category.
    pub async fn rename(&self, id: i64, name: &str) -> Result<()> {
        require("category name", name)?;

        let url = format!("{}/category/{}", self.base_url, id);
        debug!(url = %url, name = %name, "Renaming category");

        let response = send(self.http.put(&url).json(&CategoryRequest { name })).await?;
        expect_success(response).await?;

        info!(category_id = id, name = %name, "Category renamed");
        Ok(())
    }

    /// Delete a category.
    ///
    /// The backend also deletes every book in it.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let url = format!("{}/category/{}", self.base_url, id);
        warn!(category_id = id, "Deleting category; its books are deleted with it");

        let response = send(self.http.delete(&url)).await?;
        expect_success(response).await?;

        info!(category_id = id, "Category deleted");
        Ok(())
    }
}
