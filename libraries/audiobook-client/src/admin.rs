//! Admin catalog management: composite book/chapter/audio flows.
//!
//! The backend's create endpoints do not return ids, so new books and
//! chapters are located by re-listing and matching on title. Multi-step flows
//! stop at the first failing step; steps already done are not rolled back.

use crate::client::AudiobookClient;
use crate::error::{ClientError, Result};
use crate::upload::file_name_of;
use audiobook_core::error::require;
use audiobook_core::{
    Book, BookDetail, BookUpdate, ChapterUpdate, NewAudio, NewBook, NewChapter, User, UserUpdate,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Chapter entered alongside a new book.
#[derive(Debug, Clone, Default)]
pub struct ChapterDraft {
    /// Title; drafts with a blank title are skipped
    pub title: String,
    /// Text content
    pub text: String,
    /// Audio file to upload and attach
    pub audio_file: Option<PathBuf>,
    /// Voice label used as the audio name; defaults to the file name
    pub voice: Option<String>,
}

impl ChapterDraft {
    fn audio_name(&self, file: &Path) -> String {
        match self.voice.as_deref().map(str::trim) {
            Some(voice) if !voice.is_empty() => voice.to_string(),
            _ => file_name_of(file),
        }
    }
}

/// Book form contents.
#[derive(Debug, Clone, Default)]
pub struct BookDraft {
    /// Title (required)
    pub title: String,
    /// Author (required)
    pub author: String,
    /// Description
    pub description: String,
    /// Cover URL used when no cover file is given
    pub image_url: String,
    /// Cover file to upload
    pub cover_file: Option<PathBuf>,
    /// Category (`None` = uncategorised)
    pub category_id: Option<i64>,
    /// Publication date
    pub published: Option<String>,
    /// Chapters to create with the book
    pub chapters: Vec<ChapterDraft>,
}

/// Result of adding a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedBook {
    /// Recovered id, `None` if the book could not be found after creation
    pub book_id: Option<i64>,
    /// Titles of chapters created
    pub chapters_created: Vec<String>,
    /// Number of audio files attached
    pub audios_attached: usize,
}

/// Admin operations over books, chapters, audio, categories and users.
pub struct CatalogAdmin<'a> {
    client: &'a AudiobookClient,
}

impl<'a> CatalogAdmin<'a> {
    /// Create an admin view over `client`.
    pub fn new(client: &'a AudiobookClient) -> Self {
        Self { client }
    }

    /// Create a book with its chapters and their audio.
    ///
    /// Fails with `NotFound` if the new book cannot be located afterwards and
    /// there are chapters to attach.
    pub async fn add_book(&self, draft: &BookDraft) -> Result<AddedBook> {
        require("title", &draft.title)?;
        require("author", &draft.author)?;

        let image = match &draft.cover_file {
            Some(path) => self.client.uploads().upload_file(path).await?,
            None => draft.image_url.clone(),
        };

        let new_book = NewBook {
            title: draft.title.clone(),
            author: draft.author.clone(),
            image,
            description: draft.description.clone(),
            category_id: draft.category_id.unwrap_or(0),
            published: draft
                .published
                .clone()
                .filter(|p| !p.trim().is_empty()),
        };
        self.client.books().add(&new_book).await?;

        let pending: Vec<&ChapterDraft> = draft
            .chapters
            .iter()
            .filter(|c| !c.title.trim().is_empty())
            .collect();

        let book_id = self.find_book_id(&draft.title, &draft.author).await?;
        let Some(book_id) = book_id else {
            if pending.is_empty() {
                warn!(title = %draft.title, "Book added but could not be located");
                return Ok(AddedBook {
                    book_id: None,
                    chapters_created: Vec::new(),
                    audios_attached: 0,
                });
            }
            return Err(ClientError::NotFound {
                entity: "book",
                key: format!("{} / {}", draft.title, draft.author),
            });
        };

        let mut added = AddedBook {
            book_id: Some(book_id),
            chapters_created: Vec::new(),
            audios_attached: 0,
        };

        for chapter in pending {
            let attached = self.add_chapter(book_id, chapter).await?;
            added.chapters_created.push(chapter.title.clone());
            if attached {
                added.audios_attached += 1;
            }
        }

        info!(
            book_id,
            chapters = added.chapters_created.len(),
            audios = added.audios_attached,
            "Book created"
        );
        Ok(added)
    }

    /// Add one chapter to an existing book, uploading and attaching its audio.
    ///
    /// Returns whether an audio was attached.
    pub async fn add_chapter(&self, book_id: i64, draft: &ChapterDraft) -> Result<bool> {
        require("chapter title", &draft.title)?;

        self.client
            .chapters()
            .add(&NewChapter {
                book_id,
                chapter_title: draft.title.clone(),
                text: Some(draft.text.clone()),
            })
            .await?;

        let Some(file) = &draft.audio_file else {
            return Ok(false);
        };

        let detail = self.client.books().detail(book_id).await?;
        let chapter_id = detail
            .chapter_titled(&draft.title)
            .map(|c| c.id)
            .ok_or_else(|| ClientError::NotFound {
                entity: "chapter",
                key: draft.title.clone(),
            })?;

        self.attach_audio(chapter_id, file, draft.audio_name(file))
            .await?;
        Ok(true)
    }

    /// Update a chapter's title and text, attaching a new audio if given.
    pub async fn update_chapter(&self, chapter_id: i64, draft: &ChapterDraft) -> Result<bool> {
        require("chapter title", &draft.title)?;

        self.client
            .chapters()
            .update(
                chapter_id,
                &ChapterUpdate {
                    chapter_title: Some(draft.title.clone()),
                    text: Some(draft.text.clone()),
                },
            )
            .await?;

        match &draft.audio_file {
            Some(file) => {
                self.attach_audio(chapter_id, file, draft.audio_name(file))
                    .await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete a chapter and its audio.
    pub async fn delete_chapter(&self, chapter_id: i64) -> Result<()> {
        self.client.chapters().delete(chapter_id).await
    }

    /// Delete one audio rendition.
    pub async fn delete_audio(&self, audio_id: i64) -> Result<()> {
        self.client.audio().delete(audio_id).await
    }

    /// Update a book from a form. A new cover file replaces `image_url`.
    pub async fn update_book(&self, book_id: i64, draft: &BookDraft) -> Result<()> {
        let image = match &draft.cover_file {
            Some(path) => self.client.uploads().upload_file(path).await?,
            None => draft.image_url.clone(),
        };

        let update = BookUpdate {
            title: draft.title.clone(),
            author: draft.author.clone(),
            description: draft.description.clone(),
            image,
            published: draft
                .published
                .clone()
                .filter(|p| !p.trim().is_empty()),
            category_id: draft.category_id.filter(|id| *id > 0),
        };
        self.client.books().update(book_id, &update).await
    }

    /// Delete a book.
    pub async fn delete_book(&self, book_id: i64) -> Result<()> {
        self.client.books().delete(book_id).await
    }

    /// Book with chapters, for the chapter management dialog.
    pub async fn book(&self, book_id: i64) -> Result<BookDetail> {
        self.client.books().detail(book_id).await
    }

    /// All books.
    pub async fn books(&self) -> Result<Vec<Book>> {
        self.client.books().all().await
    }

    /// All users.
    pub async fn users(&self) -> Result<Vec<User>> {
        self.client.users().list().await
    }

    /// Change a user's name, email or role.
    pub async fn update_user(&self, username: &str, update: &UserUpdate) -> Result<()> {
        self.client.users().update(username, update).await
    }

    /// Delete a user.
    pub async fn delete_user(&self, username: &str) -> Result<()> {
        self.client.users().delete(username).await
    }

    /// Newest book with this title and author
    async fn find_book_id(&self, title: &str, author: &str) -> Result<Option<i64>> {
        let books = self.client.books().all().await?;
        Ok(books
            .iter()
            .filter(|b| b.title == title && b.author == author)
            .map(|b| b.id)
            .max())
    }

    async fn attach_audio(&self, chapter_id: i64, file: &Path, name: String) -> Result<()> {
        let audio_file = self.client.uploads().upload_file(file).await?;
        self.client
            .audio()
            .add(&NewAudio {
                chapter_id,
                audio_name: name,
                audio_file,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_name_prefers_voice_label() {
        let draft = ChapterDraft {
            title: "Chương 1".into(),
            voice: Some("Giọng nam".into()),
            ..ChapterDraft::default()
        };
        assert_eq!(draft.audio_name(Path::new("/tmp/c1.mp3")), "Giọng nam");
    }

    #[test]
    fn test_audio_name_falls_back_to_file_name() {
        let draft = ChapterDraft {
            title: "Chương 1".into(),
            voice: Some("  ".into()),
            ..ChapterDraft::default()
        };
        assert_eq!(draft.audio_name(Path::new("/tmp/c1.mp3")), "c1.mp3");
    }
}
