//! Audiobook Client
//!
//! HTTP client library for the audiobook REST backend and its AI service.
//!
//! # Features
//!
//! - **Endpoints**: one sub-client per backend resource (books, categories,
//!   chapters, audio, users, reviews, history, voice samples, uploads)
//! - **AI service**: voice-cloned speech synthesis and OCR on a separate origin
//! - **Session**: persisted login with a single watch-channel subscription
//! - **Flows**: catalog browsing, review board and moderation, admin
//!   book/chapter/audio management, TTS/ITS tools and the voice library
//!
//! # Example
//!
//! ```ignore
//! use audiobook_client::{AudiobookClient, AuthSession, ClientConfig, FileSessionStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AudiobookClient::new(ClientConfig::default())?;
//!     let session = AuthSession::hydrated(FileSessionStore::new("userData.json"));
//!
//!     let user = session.login(&client, "an", "secret").await?;
//!     println!("Logged in as {} ({})", user.fullname, user.role);
//!
//!     let detail = client.books().detail(1).await?;
//!     println!("{} has {} chapters", detail.title, detail.chapters.len());
//!
//!     Ok(())
//! }
//! ```

mod admin;
mod ai;
mod audio;
mod books;
mod catalog;
mod categories;
mod chapters;
mod client;
mod error;
mod history;
mod http;
mod reviews;
mod session;
mod tools;
mod types;
mod upload;
mod users;
mod voices;

// Re-export main types
pub use client::AudiobookClient;
pub use error::{ClientError, Result};
pub use types::{ClientConfig, OcrResponse, TtsResponse, DEFAULT_AI_URL, DEFAULT_API_URL};

// Session
pub use session::{
    AuthSession, FileSessionStore, MemorySessionStore, SessionState, SessionStore,
    SESSION_FILE_NAME,
};

// Flows
pub use admin::{AddedBook, BookDraft, CatalogAdmin, ChapterDraft};
pub use catalog::{Catalog, CatalogFilter, CatalogView, HomeView, ITEMS_PER_PAGE};
pub use reviews::{ReviewBoard, ReviewModeration, BOOK_DETAIL_REVIEW_PAGE_SIZE};
pub use tools::{
    ExtractedText, SpeechOutput, SpeechTools, VoiceLibrary, ITS_HISTORY_TITLE, TTS_HISTORY_TITLE,
};
pub use upload::{file_name_of, is_image_file, mime_type_for_file};

// Re-export sub-clients for direct use if needed
pub use ai::AiClient;
pub use audio::AudioClient;
pub use books::BooksClient;
pub use categories::CategoriesClient;
pub use chapters::ChaptersClient;
pub use history::{HistoryClient, DEFAULT_HISTORY_PAGE_SIZE};
pub use reviews::ReviewsClient;
pub use upload::UploadClient;
pub use users::UsersClient;
pub use voices::VoicesClient;
