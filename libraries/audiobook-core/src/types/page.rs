/// Pagination shapes
use serde::{Deserialize, Serialize};

/// Normalised page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Zero-based page index
    pub page: u32,
    /// Number of pages available
    pub total_pages: u32,
    /// Number of items across all pages
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Slice an already-loaded list into fixed-size pages.
    ///
    /// A `page` past the end yields an empty item list with the real totals.
    pub fn paginate(items: Vec<T>, page: u32, per_page: u32) -> Self {
        let per_page = per_page.max(1);
        let total_elements = items.len() as u64;
        let total_pages = items.len().div_ceil(per_page as usize).max(1) as u32;
        let items = items
            .into_iter()
            .skip(page as usize * per_page as usize)
            .take(per_page as usize)
            .collect();

        Self {
            items,
            page,
            total_pages,
            total_elements,
        }
    }

    /// Whether a following page exists
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    /// Whether a preceding page exists
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Check if the page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Raw list response: either a paginated object or a bare array.
///
/// Several endpoints answer with one shape or the other depending on the
/// backend build; decode through this type and call [`PageResponse::into_page`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PageResponse<T> {
    /// `{ "content": [...], "totalPages": n, ... }`
    Paged {
        /// Items on this page
        content: Vec<T>,
        /// Number of pages
        #[serde(rename = "totalPages", default)]
        total_pages: Option<u32>,
        /// Number of items across all pages
        #[serde(rename = "totalElements", default)]
        total_elements: Option<u64>,
        /// Page index echoed by the server
        #[serde(default)]
        number: Option<u32>,
    },
    /// Plain JSON array
    Bare(Vec<T>),
}

impl<T> PageResponse<T> {
    /// Convert to a [`Page`]. A bare array becomes a single page 0.
    pub fn into_page(self, requested_page: u32) -> Page<T> {
        match self {
            Self::Paged {
                content,
                total_pages,
                total_elements,
                number,
            } => {
                let total_pages = total_pages.unwrap_or(1);
                let total_elements = total_elements.unwrap_or(content.len() as u64);
                Page {
                    items: content,
                    page: number.unwrap_or(requested_page),
                    total_pages,
                    total_elements,
                }
            }
            Self::Bare(items) => Page {
                total_elements: items.len() as u64,
                items,
                page: 0,
                total_pages: 1,
            },
        }
    }

    /// Drop pagination and keep only the items
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Paged { content, .. } => content,
            Self::Bare(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn object_and_array_yield_same_items() {
        let paged: PageResponse<i32> =
            serde_json::from_str(r#"{"content": [1, 2, 3], "totalPages": 4, "totalElements": 12}"#)
                .unwrap();
        let bare: PageResponse<i32> = serde_json::from_str("[1, 2, 3]").unwrap();

        let paged = paged.into_page(2);
        let bare = bare.into_page(2);

        assert_eq!(paged.items, bare.items);
        assert_eq!(paged.page, 2);
        assert_eq!(paged.total_pages, 4);
        assert_eq!(paged.total_elements, 12);

        assert_eq!(bare.page, 0);
        assert_eq!(bare.total_pages, 1);
        assert_eq!(bare.total_elements, 3);
    }

    #[test]
    fn paged_without_totals_counts_content() {
        let page = serde_json::from_str::<PageResponse<i32>>(r#"{"content": [5]}"#)
            .unwrap()
            .into_page(0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_elements, 1);
        assert!(!page.has_next());
    }

    #[test]
    fn server_page_number_wins() {
        let page = serde_json::from_str::<PageResponse<i32>>(
            r#"{"content": [], "totalPages": 3, "number": 1}"#,
        )
        .unwrap()
        .into_page(0);
        assert_eq!(page.page, 1);
        assert!(page.has_next());
        assert!(page.has_previous());
        assert!(page.is_empty());
    }

    #[test]
    fn paginate_slices_locally() {
        let page = Page::paginate((1..=25).collect::<Vec<_>>(), 2, 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 25);
        assert!(!page.has_next());
    }

    #[test]
    fn paginate_empty_list_is_one_page() {
        let page = Page::<i32>::paginate(Vec::new(), 0, 10);
        assert_eq!(page.total_pages, 1);
        assert!(page.is_empty());
    }

    proptest! {
        #[test]
        fn paginate_covers_every_item_once(len in 0usize..80, per_page in 1u32..15) {
            let items: Vec<usize> = (0..len).collect();
            let first = Page::paginate(items.clone(), 0, per_page);
            let mut seen = Vec::new();
            for page in 0..first.total_pages {
                seen.extend(Page::paginate(items.clone(), page, per_page).items);
            }
            prop_assert_eq!(seen, items);
        }
    }
}
