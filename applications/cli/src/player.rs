/// Listen controller: network side effects around a listen session
use crate::error::Result;
use audiobook_client::AudiobookClient;
use audiobook_core::{BookDetail, ListenHistoryEntry, User, VoiceSample};
use audiobook_playback::{HeadlessMedia, ListenSession, MediaElement};
use chrono::Utc;
use tracing::{info, warn};

/// Outcome of rendering the current chapter in a personal voice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedChapter {
    /// Generated audio URL, loaded into the session
    pub url: String,
    /// Whether a listen-history record was written
    pub recorded: bool,
}

/// Loads a book, drives TTS for its chapters and records listening
pub struct ListenController<'a, M: MediaElement = HeadlessMedia> {
    client: &'a AudiobookClient,
    user: Option<User>,
    book: BookDetail,
    session: ListenSession<M>,
}

impl<'a> ListenController<'a, HeadlessMedia> {
    /// Open a book without an audio device
    pub async fn open(
        client: &'a AudiobookClient,
        user: Option<User>,
        book_id: i64,
    ) -> Result<ListenController<'a, HeadlessMedia>> {
        Self::open_with(client, user, book_id, HeadlessMedia::new()).await
    }
}

impl<'a, M: MediaElement> ListenController<'a, M> {
    /// Open a book, loading it and the listener's voices concurrently
    pub async fn open_with(
        client: &'a AudiobookClient,
        user: Option<User>,
        book_id: i64,
        media: M,
    ) -> Result<Self> {
        let books = client.books();
        let voices = client.voices();
        let username = user.as_ref().map(|u| u.username.clone());

        let load_voices = async {
            match &username {
                Some(name) => voices.list(name).await,
                None => Ok(Vec::new()),
            }
        };
        let (book, samples) = tokio::try_join!(books.detail(book_id), load_voices)?;

        info!(
            book_id,
            chapters = book.chapters.len(),
            voices = samples.len(),
            "Book opened for listening"
        );

        let mut session = ListenSession::new(media, book.chapters.clone());
        session.set_voices(samples);

        Ok(Self {
            client,
            user,
            book,
            session,
        })
    }

    /// The open book
    pub fn book(&self) -> &BookDetail {
        &self.book
    }

    /// The listen session
    pub fn session(&self) -> &ListenSession<M> {
        &self.session
    }

    /// The listen session, for transport controls
    pub fn session_mut(&mut self) -> &mut ListenSession<M> {
        &mut self.session
    }

    /// Re-fetch the listener's voices
    pub async fn refresh_voices(&mut self) -> Result<&[VoiceSample]> {
        if let Some(user) = &self.user {
            let samples = self.client.voices().list(&user.username).await?;
            self.session.set_voices(samples);
        }
        Ok(self.session.voices())
    }

    /// Render the current chapter in the selected voice and start playing it
    ///
    /// A logged-in listener gets one history record per render. If the
    /// selection changed while the request was in flight, the result is
    /// dropped and `Ok(None)` is returned.
    pub async fn generate(&mut self) -> Result<Option<GeneratedChapter>> {
        let ticket = self.session.begin_generation()?;

        let tts = match self
            .client
            .ai()
            .generate_speech(&ticket.chapter_text, &ticket.voice_url)
            .await
        {
            Ok(tts) => tts,
            Err(e) => {
                self.session.fail_generation(&ticket, e.to_string());
                return Err(e.into());
            }
        };

        if !self
            .session
            .complete_generation(&ticket, &tts.audio_file_url)
        {
            return Ok(None);
        }

        let recorded = match &self.user {
            Some(user) => {
                let entry = ListenHistoryEntry::new(
                    &user.username,
                    &self.book.title,
                    &ticket.chapter_title,
                    &tts.audio_file_url,
                    format!(
                        "{} - {} ({})",
                        self.book.title, ticket.chapter_title, ticket.voice_name
                    ),
                    Utc::now(),
                );
                record(self.client, &entry).await
            }
            None => false,
        };

        Ok(Some(GeneratedChapter {
            url: tts.audio_file_url,
            recorded,
        }))
    }
}

async fn record(client: &AudiobookClient, entry: &ListenHistoryEntry) -> bool {
    match client.history().add(entry).await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, audio = %entry.audio_name, "Failed to record listen history");
            false
        }
    }
}
