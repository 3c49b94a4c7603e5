/// Review domain types
use super::null_as_default;
use crate::error::{require, Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Star rating in 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating
    pub const MIN: u8 = 1;
    /// Highest accepted rating
    pub const MAX: u8 = 5;

    /// Create a rating, rejecting values outside 1..=5
    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::RatingOutOfRange(value))
        }
    }

    /// Get the numeric value
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reviewer reference embedded in a review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewAuthor {
    /// Reviewer's username
    pub username: String,
}

/// A user's review of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Server-assigned identifier
    pub id: i64,

    /// Free-text comment
    #[serde(rename = "review", default, deserialize_with = "null_as_default")]
    pub comment: String,

    /// Star rating as stored by the server
    pub rating: u8,

    /// Owning user
    pub user: ReviewAuthor,

    /// Creation date, when the server sends it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Request body for posting a review
///
/// The book id travels in the URL path, not the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewReview {
    /// Reviewer
    pub username: String,
    /// Rating
    pub rating: Rating,
    /// Comment
    pub review: String,
}

impl NewReview {
    /// Build a review, validating rating range and comment
    pub fn new(username: impl Into<String>, rating: u8, comment: impl Into<String>) -> Result<Self> {
        let review = Self {
            username: username.into(),
            rating: Rating::new(rating)?,
            review: comment.into(),
        };
        require("username", &review.username)?;
        require("review", &review.review)?;
        Ok(review)
    }
}
