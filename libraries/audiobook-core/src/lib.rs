//! Audiobook Core
//!
//! Platform-agnostic domain types, wire shapes and client-side validation
//! shared by the audiobook client crates.
//!
//! The backend owns every entity described here; this crate only models what
//! the client reads and sends:
//! - **Domain Types**: `Book`, `Chapter`, `Audio`, `VoiceSample`, `Review`,
//!   `ListenHistoryEntry`, `User`
//! - **Request Bodies**: `NewBook`, `NewChapter`, `NewReview`, ...
//! - **Pagination**: `Page` plus `PageResponse`, which accepts both the
//!   paginated object and the bare array shapes the backend answers with
//! - **Validation**: `ValidationError`, raised before any network call
//! - **Statistics**: rating aggregates used by the admin review screen
//!
//! # Example
//!
//! ```rust
//! use audiobook_core::types::{Page, PageResponse, Review};
//!
//! let body = r#"[{"id": 1, "review": "Hay", "rating": 5, "user": {"username": "an"}}]"#;
//! let response: PageResponse<Review> = serde_json::from_str(body).unwrap();
//! let page: Page<Review> = response.into_page(0);
//!
//! assert_eq!(page.items.len(), 1);
//! assert_eq!(page.total_pages, 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod stats;
pub mod types;

pub use error::{Result, ValidationError};
pub use stats::{RatingBucket, ReviewStatistics};
pub use types::{
    Audio, AudioUpdate, Book, BookDetail, BookUpdate, Category, Chapter, ChapterUpdate,
    FeaturedBook, ListenHistoryEntry, NewAudio, NewBook, NewChapter, NewReview, NewVoiceSample,
    Page, PageResponse, PasswordChange, ProfileUpdate, Rating, Registration, Review,
    ReviewAuthor, Role, User, UserUpdate, VoiceSample, VoiceSampleUpdate,
};
