//! Book reviews: endpoints, the book-detail review board and the admin
//! moderation view.

use crate::client::AudiobookClient;
use crate::error::Result;
use crate::http::{expect_success, read_json, send};
use audiobook_core::stats::top_rated;
use audiobook_core::{
    Book, BookDetail, NewReview, Page, PageResponse, Review, ReviewStatistics, ValidationError,
};
use reqwest::Client;
use tracing::{debug, info};

/// Reviews shown per page on the book detail screen
pub const BOOK_DETAIL_REVIEW_PAGE_SIZE: u32 = 5;

/// Review client for the audiobook backend.
pub struct ReviewsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> ReviewsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// One page of a book's reviews.
    ///
    /// The backend may answer with a paginated object or a bare array.
    pub async fn list(&self, book_id: i64, page: u32, size: u32) -> Result<Page<Review>> {
        let url = format!("{}/{}/reviews", self.base_url, book_id);
        debug!(url = %url, page, size, "Fetching reviews");

        let response = send(self.http.get(&url).query(&[("page", page), ("size", size)])).await?;
        let body: PageResponse<Review> = read_json(response, "reviews").await?;
        Ok(body.into_page(page))
    }

    /// Post a review on a book.
    pub async fn add(&self, book_id: i64, review: &NewReview) -> Result<()> {
        let url = format!("{}/{}/reviews", self.base_url, book_id);
        debug!(url = %url, username = %review.username, rating = %review.rating, "Posting review");

        let response = send(self.http.post(&url).json(review)).await?;
        expect_success(response).await?;

        info!(book_id, username = %review.username, rating = %review.rating, "Review posted");
        Ok(())
    }

    /// Delete a review.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let url = format!("{}/reviews/{}", self.base_url, id);
        debug!(url = %url, "Deleting review");

        let response = send(self.http.delete(&url)).await?;
        expect_success(response).await?;

        info!(review_id = id, "Review deleted");
        Ok(())
    }
}

// =============================================================================
// Review board (book detail screen)
// =============================================================================

/// Paged view of one book's reviews with submit and delete.
pub struct ReviewBoard<'a> {
    client: &'a AudiobookClient,
    book_id: i64,
    size: u32,
    current: Page<Review>,
}

impl<'a> ReviewBoard<'a> {
    /// Create a board. Nothing is fetched until [`ReviewBoard::load`].
    pub fn new(client: &'a AudiobookClient, book_id: i64, size: u32) -> Self {
        Self {
            client,
            book_id,
            size: size.max(1),
            current: Page {
                items: Vec::new(),
                page: 0,
                total_pages: 0,
                total_elements: 0,
            },
        }
    }

    /// Book whose reviews are shown
    pub fn book_id(&self) -> i64 {
        self.book_id
    }

    /// Page size
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Last loaded page
    pub fn current(&self) -> &Page<Review> {
        &self.current
    }

    /// Fetch a page and make it current.
    pub async fn load(&mut self, page: u32) -> Result<&Page<Review>> {
        self.current = self
            .client
            .reviews()
            .list(self.book_id, page, self.size)
            .await?;
        Ok(&self.current)
    }

    /// Load the following page, if any.
    pub async fn next_page(&mut self) -> Result<&Page<Review>> {
        if self.current.has_next() {
            self.load(self.current.page + 1).await
        } else {
            Ok(&self.current)
        }
    }

    /// Load the preceding page, if any.
    pub async fn previous_page(&mut self) -> Result<&Page<Review>> {
        if self.current.has_previous() {
            self.load(self.current.page - 1).await
        } else {
            Ok(&self.current)
        }
    }

    /// Validate and post a review, then show page 0.
    pub async fn submit(&mut self, username: &str, rating: u8, comment: &str) -> Result<&Page<Review>> {
        let review = NewReview::new(username, rating, comment)?;
        self.client.reviews().add(self.book_id, &review).await?;
        self.load(0).await
    }

    /// Delete a review, then re-fetch the current page.
    pub async fn delete(&mut self, review_id: i64) -> Result<&Page<Review>> {
        self.client.reviews().delete(review_id).await?;
        let page = self.current.page;
        self.load(page).await
    }
}

// =============================================================================
// Review moderation (admin statistics screen)
// =============================================================================

/// Admin view over catalog ratings and individual reviews.
///
/// Ratings are read from the book list; after a review is deleted the list is
/// re-fetched so the server-derived averages stay current.
pub struct ReviewModeration<'a> {
    client: &'a AudiobookClient,
    books: Vec<Book>,
    selected: Option<BookDetail>,
    board: Option<ReviewBoard<'a>>,
}

impl<'a> ReviewModeration<'a> {
    /// Create an empty view.
    pub fn new(client: &'a AudiobookClient) -> Self {
        Self {
            client,
            books: Vec::new(),
            selected: None,
            board: None,
        }
    }

    /// Fetch every book and return the catalog statistics.
    pub async fn load(&mut self) -> Result<ReviewStatistics> {
        self.books = self.client.books().all().await?;
        Ok(self.statistics())
    }

    /// Books as last loaded
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Statistics over the loaded books
    pub fn statistics(&self) -> ReviewStatistics {
        ReviewStatistics::from_books(&self.books)
    }

    /// Highest rated loaded books
    pub fn top_rated(&self, limit: usize) -> Vec<&Book> {
        top_rated(&self.books, limit)
    }

    /// Book whose reviews are open
    pub fn selected(&self) -> Option<&BookDetail> {
        self.selected.as_ref()
    }

    /// Open a book's reviews at page 0.
    pub async fn open_book(&mut self, book_id: i64) -> Result<&Page<Review>> {
        let detail = self.client.books().detail(book_id).await?;
        let mut board = ReviewBoard::new(self.client, book_id, BOOK_DETAIL_REVIEW_PAGE_SIZE);
        board.load(0).await?;

        self.selected = Some(detail);
        Ok(self.board.insert(board).current())
    }

    /// Move the open book's reviews to another page.
    pub async fn change_page(&mut self, page: u32) -> Result<&Page<Review>> {
        let board = self.board.as_mut().ok_or_else(no_book_open)?;
        board.load(page).await
    }

    /// Delete a review of the open book, then reload its page and the book list.
    pub async fn delete_review(&mut self, review_id: i64) -> Result<ReviewStatistics> {
        let board = self.board.as_mut().ok_or_else(no_book_open)?;
        board.delete(review_id).await?;

        self.books = self.client.books().all().await?;
        Ok(self.statistics())
    }

    /// Reviews of the open book, if any
    pub fn reviews(&self) -> Option<&Page<Review>> {
        self.board.as_ref().map(ReviewBoard::current)
    }
}

fn no_book_open() -> ValidationError {
    ValidationError::invalid_input("no book is open for moderation")
}
