//! Catalog browsing: home, filtered listing and search.

use crate::client::AudiobookClient;
use crate::error::Result;
use audiobook_core::{Book, Category, FeaturedBook, Page};
use tracing::{debug, warn};

/// Books per page when a rating filter forces local pagination
pub const ITEMS_PER_PAGE: u32 = 10;

/// Listing filter. `0` means "any" for both fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Category id
    pub category_id: i64,
    /// Minimum star rating, 0..=5
    pub min_rating: u8,
}

/// Home screen content.
#[derive(Debug, Clone, Default)]
pub struct HomeView {
    /// Featured carousel
    pub featured: Vec<FeaturedBook>,
    /// Category tiles
    pub categories: Vec<Category>,
}

/// One page of the catalog plus the categories for the filter list.
#[derive(Debug, Clone)]
pub struct CatalogView {
    /// Books on the requested page
    pub books: Page<Book>,
    /// All categories
    pub categories: Vec<Category>,
}

/// Read-only catalog operations.
pub struct Catalog<'a> {
    client: &'a AudiobookClient,
}

impl<'a> Catalog<'a> {
    /// Create a catalog view over `client`.
    pub fn new(client: &'a AudiobookClient) -> Self {
        Self { client }
    }

    /// Featured books and categories, fetched concurrently.
    ///
    /// Either half falls back to empty if its request fails.
    pub async fn home(&self) -> HomeView {
        let books = self.client.books();
        let categories = self.client.categories();
        let (featured, categories) = tokio::join!(books.featured(), categories.list());

        HomeView {
            featured: featured.unwrap_or_else(|e| {
                warn!(error = %e, "Failed to load featured books");
                Vec::new()
            }),
            categories: categories.unwrap_or_else(|e| {
                warn!(error = %e, "Failed to load categories");
                Vec::new()
            }),
        }
    }

    /// One page of books matching `filter`.
    ///
    /// Without a rating filter the backend paginates. With one, the full
    /// filtered list is fetched and sliced locally.
    pub async fn books(&self, filter: CatalogFilter, page: u32) -> Result<Page<Book>> {
        if filter.min_rating > 0 {
            debug!(?filter, page, "Paginating rating-filtered books locally");
            let all = self
                .client
                .books()
                .list(filter.category_id, filter.min_rating)
                .await?;
            Ok(Page::paginate(all, page, ITEMS_PER_PAGE))
        } else {
            self.client
                .books()
                .list_page(filter.category_id, page)
                .await
        }
    }

    /// Books page and categories, fetched concurrently.
    pub async fn browse(&self, filter: CatalogFilter, page: u32) -> Result<CatalogView> {
        let categories = self.client.categories();
        let (books, categories) = tokio::try_join!(self.books(filter, page), categories.list())?;
        Ok(CatalogView { books, categories })
    }

    /// Keyword search across all categories.
    pub async fn search(&self, keyword: &str) -> Result<Vec<Book>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }
        self.client.books().search(keyword, 0, 0).await
    }
}
