/// Book domain types
use super::{null_as_default, Chapter};
use crate::error::{require, Result};
use serde::{Deserialize, Serialize};

/// Book as listed by catalog endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Server-assigned identifier
    pub id: i64,

    /// Title
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Author name
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,

    /// Cover image URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,

    /// Description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Publication date as sent by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,

    /// Category name
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,

    /// Server-derived average rating
    #[serde(default)]
    pub rating: Option<f64>,

    /// Number of reviews
    #[serde(default, rename = "reviewCount")]
    pub review_count: Option<u32>,
}

impl Book {
    /// Whether the book has received at least one rating
    pub fn is_rated(&self) -> bool {
        self.rating.is_some_and(|r| r > 0.0)
    }
}

/// Entry of the featured books carousel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedBook {
    /// Book identifier
    pub id: i64,
    /// Title
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Cover image URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    /// Average rating
    #[serde(default)]
    pub rating: f64,
    /// Category name
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
}

/// Book with its chapters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDetail {
    /// Book identifier
    pub id: i64,
    /// Title
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Author name
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    /// Cover image URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    /// Description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Publication date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    /// Category name
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    /// Server-derived average rating
    #[serde(default)]
    pub rating: Option<f64>,
    /// Chapters in reading order
    #[serde(default, rename = "listChapter", deserialize_with = "null_as_default")]
    pub chapters: Vec<Chapter>,
}

impl BookDetail {
    /// Find a chapter by exact title
    pub fn chapter_titled(&self, title: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.title == title)
    }
}

/// Request body for creating a book
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBook {
    /// Title (required)
    pub title: String,
    /// Author (required)
    pub author: String,
    /// Cover image URL
    pub image: String,
    /// Description
    pub description: String,
    /// Category identifier (0 = none)
    #[serde(rename = "categoryId")]
    pub category_id: i64,
    /// Publication date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
}

impl NewBook {
    /// Check required fields
    pub fn validate(&self) -> Result<()> {
        require("title", &self.title)?;
        require("author", &self.author)
    }
}

/// Request body for updating a book
///
/// `category_id` and `published` are only sent when set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookUpdate {
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Description
    pub description: String,
    /// Cover image URL
    pub image: String,
    /// Publication date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    /// New category
    #[serde(rename = "categoryId", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_tolerates_nulls_and_missing_fields() {
        let book: Book = serde_json::from_value(serde_json::json!({
            "id": 7,
            "title": "Tắt đèn",
            "author": "Ngô Tất Tố",
            "image": null,
            "category": "Văn học"
        }))
        .unwrap();

        assert_eq!(book.image, "");
        assert_eq!(book.description, "");
        assert_eq!(book.rating, None);
        assert!(!book.is_rated());
    }

    #[test]
    fn book_reads_review_count() {
        let book: Book = serde_json::from_value(serde_json::json!({
            "id": 1, "title": "A", "author": "B", "rating": 4.5, "reviewCount": 12
        }))
        .unwrap();
        assert_eq!(book.review_count, Some(12));
        assert!(book.is_rated());
    }

    #[test]
    fn detail_maps_list_chapter() {
        let detail: BookDetail = serde_json::from_value(serde_json::json!({
            "id": 3,
            "title": "Số đỏ",
            "author": "Vũ Trọng Phụng",
            "listChapter": [
                {"id": 10, "title_chapter": "Chương 1", "text": "Xin chào", "listAudio": []}
            ]
        }))
        .unwrap();

        assert_eq!(detail.chapters.len(), 1);
        assert_eq!(detail.chapter_titled("Chương 1").map(|c| c.id), Some(10));
        assert!(detail.chapter_titled("Chương 2").is_none());
    }

    #[test]
    fn detail_without_chapters_is_empty() {
        let detail: BookDetail =
            serde_json::from_value(serde_json::json!({"id": 3, "listChapter": null})).unwrap();
        assert!(detail.chapters.is_empty());
    }

    #[test]
    fn new_book_serializes_category_id() {
        let book = NewBook {
            title: "T".into(),
            author: "A".into(),
            image: String::new(),
            description: String::new(),
            category_id: 2,
            published: None,
        };
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["categoryId"], 2);
        assert!(json.get("published").is_none());
    }

    #[test]
    fn new_book_requires_title_and_author() {
        let mut book = NewBook {
            title: " ".into(),
            author: "A".into(),
            image: String::new(),
            description: String::new(),
            category_id: 0,
            published: None,
        };
        assert!(book.validate().is_err());
        book.title = "T".into();
        assert!(book.validate().is_ok());
        book.author.clear();
        assert!(book.validate().is_err());
    }

    #[test]
    fn book_update_skips_unset_fields() {
        let update = BookUpdate {
            title: "T".into(),
            ..BookUpdate::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("categoryId").is_none());
        assert!(json.get("published").is_none());
    }
}
