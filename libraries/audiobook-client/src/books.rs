//! Book catalog endpoints.

use crate::error::Result;
use crate::http::{encode_segment, expect_success, read_json, send};
use audiobook_core::{Book, BookDetail, BookUpdate, FeaturedBook, NewBook, Page, PageResponse};
use reqwest::Client;
use tracing::{debug, info};

/// Book client for the audiobook backend.
pub struct BooksClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> BooksClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Featured books for the home carousel.
    pub async fn featured(&self) -> Result<Vec<FeaturedBook>> {
        let url = format!("{}/featuredBook", self.base_url);
        debug!(url = %url, "Fetching featured books");

        let response = send(self.http.get(&url)).await?;
        read_json(response, "featured books").await
    }

    /// All books, optionally filtered. `0` means no filter for either argument.
    pub async fn list(&self, category_id: i64, min_rating: u8) -> Result<Vec<Book>> {
        let url = format!("{}/book/{}/{}", self.base_url, category_id, min_rating);
        debug!(url = %url, "Listing books");

        let response = send(self.http.get(&url)).await?;
        read_json(response, "book list").await
    }

    /// Every book in the catalog (`/book/0/0`).
    pub async fn all(&self) -> Result<Vec<Book>> {
        self.list(0, 0).await
    }

    /// One server-side page of a category (`0` = all categories).
    pub async fn list_page(&self, category_id: i64, page: u32) -> Result<Page<Book>> {
        let url = format!(
            "{}/bookInCategory/page/{}/{}",
            self.base_url, category_id, page
        );
        debug!(url = %url, "Listing books page");

        let response = send(self.http.get(&url)).await?;
        let body: PageResponse<Book> = read_json(response, "book page").await?;
        Ok(body.into_page(page))
    }

    /// Books in a category with a minimum rating, unpaginated.
    pub async fn in_category(&self, category_id: i64, min_rating: u8) -> Result<Vec<Book>> {
        let url = format!(
            "{}/bookInCategory/{}/{}",
            self.base_url, category_id, min_rating
        );
        debug!(url = %url, "Listing books in category");

        let response = send(self.http.get(&url)).await?;
        read_json(response, "category books").await
    }

    /// Book with its chapters and their audio.
    pub async fn detail(&self, id: i64) -> Result<BookDetail> {
        let url = format!("{}/book/{}", self.base_url, id);
        debug!(url = %url, "Fetching book detail");

        let response = send(self.http.get(&url)).await?;
        read_json(response, "book detail").await
    }

    /// Keyword search with optional category and rating filters.
    pub async fn search(&self, keyword: &str, category_id: i64, min_rating: u8) -> Result<Vec<Book>> {
        let url = format!(
            "{}/searchBook/{}/{}/{}",
            self.base_url,
            encode_segment(keyword),
            category_id,
            min_rating
        );
        debug!(url = %url, keyword = %keyword, "Searching books");

        let response = send(self.http.get(&url)).await?;
        read_json(response, "search results").await
    }

    /// Create a book. The backend does not return the new id.
    pub async fn add(&self, book: &NewBook) -> Result<()> {
        book.validate()?;

        let url = format!("{}/book", self.base_url);
        debug!(url = %url, title = %book.title, "Adding book");

        let response = send(self.http.post(&url).json(book)).await?;
        expect_success(response).await?;

        info!(title = %book.title, author = %book.author, "Book added");
        Ok(())
    }

    /// Update a book.
    pub async fn update(&self, id: i64, update: &BookUpdate) -> Result<()> {
        let url = format!("{}/book/{}", self.base_url, id);
        debug!(url = %url, "Updating book");

        let response = send(self.http.put(&url).json(update)).await?;
        expect_success(response).await?;

        info!(book_id = id, "Book updated");
        Ok(())
    }

    /// Delete a book.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let url = format!("{}/book/{}", self.base_url, id);
        debug!(url = %url, "Deleting book");

        let response = send(self.http.delete(&url)).await?;
        expect_success(response).await?;

        info!(book_id = id, "Book deleted");
        Ok(())
    }
}
