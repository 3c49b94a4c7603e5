/// Listen history log rows
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Write-once record of something a user listened to or generated
///
/// The client only appends and reads these; there is no update or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenHistoryEntry {
    /// Server-assigned identifier (absent when posting)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Listener
    pub username: String,

    /// Book title, or the tool name for TTS/ITS output
    #[serde(rename = "titleOfBook")]
    pub book_title: String,

    /// Chapter title
    #[serde(rename = "titleOfChapter")]
    pub chapter_title: String,

    /// Audio URL
    #[serde(rename = "audioUrl")]
    pub audio_url: String,

    /// Audio display name
    #[serde(rename = "nameOfAudio")]
    pub audio_name: String,

    /// Timestamp string
    pub time: String,
}

impl ListenHistoryEntry {
    /// Create a new entry stamped with `at` in RFC 3339
    pub fn new(
        username: impl Into<String>,
        book_title: impl Into<String>,
        chapter_title: impl Into<String>,
        audio_url: impl Into<String>,
        audio_name: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            book_title: book_title.into(),
            chapter_title: chapter_title.into(),
            audio_url: audio_url.into(),
            audio_name: audio_name.into(),
            time: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
