/// Chapter domain types
use super::{null_as_default, Audio};
use crate::error::{require, Result};
use serde::{Deserialize, Serialize};

/// Book subdivision owning zero or more rendered audio files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// Server-assigned identifier
    pub id: i64,

    /// Chapter title
    #[serde(rename = "title_chapter", default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Plain-text content, the input for voice-cloned TTS
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,

    /// Admin-uploaded audio renditions
    #[serde(rename = "listAudio", default, deserialize_with = "null_as_default")]
    pub audios: Vec<Audio>,
}

impl Chapter {
    /// Whether the chapter has text a voice can be rendered from
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Request body for creating a chapter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewChapter {
    /// Owning book
    pub book_id: i64,
    /// Title (required)
    pub chapter_title: String,
    /// Text content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl NewChapter {
    /// Check required fields
    pub fn validate(&self) -> Result<()> {
        require("chapter title", &self.chapter_title)
    }
}

/// Request body for updating a chapter
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChapterUpdate {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_title: Option<String>,
    /// New text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_wire_names() {
        let chapter: Chapter = serde_json::from_value(serde_json::json!({
            "id": 4,
            "title_chapter": "Mở đầu",
            "text": null,
            "listAudio": [{"id": 1, "audio_name": "Giọng nam", "audio_file": "http://x/a.mp3"}]
        }))
        .unwrap();

        assert_eq!(chapter.title, "Mở đầu");
        assert!(!chapter.has_text());
        assert_eq!(chapter.audios[0].name, "Giọng nam");
    }

    #[test]
    fn new_chapter_requires_title() {
        let chapter = NewChapter {
            book_id: 1,
            chapter_title: String::new(),
            text: None,
        };
        assert!(chapter.validate().is_err());
    }
}
