//! Catalog-wide rating statistics
//!
//! Aggregates are computed from the server-derived `Book::rating`; individual
//! reviews are never re-averaged on the client.

use crate::types::Book;
use serde::Serialize;

/// Number of books in one star bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingBucket {
    /// Star label, 5 down to 1
    pub stars: u8,
    /// Books whose rating falls in this bucket
    pub count: usize,
}

/// Summary shown on the admin review statistics screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewStatistics {
    /// Number of books in the catalog
    pub total_books: usize,
    /// Number of books with a positive rating
    pub rated_books: usize,
    /// Mean rating over rated books, rounded to one decimal (0.0 if none)
    pub average_rating: f64,
    /// Buckets ordered 5★ first
    pub distribution: Vec<RatingBucket>,
}

impl ReviewStatistics {
    /// Compute statistics from a book listing
    pub fn from_books(books: &[Book]) -> Self {
        let ratings: Vec<f64> = books.iter().filter_map(positive_rating).collect();

        let average_rating = if ratings.is_empty() {
            0.0
        } else {
            round_one_decimal(ratings.iter().sum::<f64>() / ratings.len() as f64)
        };

        let distribution = (1..=5u8)
            .rev()
            .map(|stars| RatingBucket {
                stars,
                count: ratings.iter().filter(|&&r| bucket_for(r) == stars).count(),
            })
            .collect();

        Self {
            total_books: books.len(),
            rated_books: ratings.len(),
            average_rating,
            distribution,
        }
    }

    /// Count for a given star bucket
    pub fn bucket(&self, stars: u8) -> usize {
        self.distribution
            .iter()
            .find(|b| b.stars == stars)
            .map_or(0, |b| b.count)
    }
}

/// Star bucket for a positive rating.
///
/// 5★ is >= 4.5, then half-open bands of width one down to 1★ (0, 1.5).
pub fn bucket_for(rating: f64) -> u8 {
    match rating {
        r if r >= 4.5 => 5,
        r if r >= 3.5 => 4,
        r if r >= 2.5 => 3,
        r if r >= 1.5 => 2,
        _ => 1,
    }
}

/// Highest rated books first, unrated books excluded
pub fn top_rated(books: &[Book], limit: usize) -> Vec<&Book> {
    let mut rated: Vec<&Book> = books.iter().filter(|b| b.is_rated()).collect();
    rated.sort_by(|a, b| {
        let a = a.rating.unwrap_or_default();
        let b = b.rating.unwrap_or_default();
        b.total_cmp(&a)
    });
    rated.truncate(limit);
    rated
}

fn positive_rating(book: &Book) -> Option<f64> {
    book.rating.filter(|r| *r > 0.0)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i64, rating: Option<f64>) -> Book {
        Book {
            id,
            title: format!("Book {id}"),
            author: "Author".into(),
            image: String::new(),
            description: String::new(),
            published: None,
            category: String::new(),
            rating,
            review_count: None,
        }
    }

    #[test]
    fn empty_catalog() {
        let stats = ReviewStatistics::from_books(&[]);
        assert_eq!(stats.total_books, 0);
        assert!((stats.average_rating - 0.0).abs() < f64::EPSILON);
        assert!(stats.distribution.iter().all(|b| b.count == 0));
    }

    #[test]
    fn average_ignores_unrated_books() {
        let books = [
            book(1, Some(4.0)),
            book(2, Some(3.0)),
            book(3, None),
            book(4, Some(0.0)),
            book(5, Some(3.5)),
        ];
        let stats = ReviewStatistics::from_books(&books);
        assert_eq!(stats.total_books, 5);
        assert_eq!(stats.rated_books, 3);
        assert!((stats.average_rating - 3.5).abs() < 1e-9);
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        let books = [book(1, Some(4.0)), book(2, Some(4.0)), book(3, Some(5.0))];
        let stats = ReviewStatistics::from_books(&books);
        assert!((stats.average_rating - 4.3).abs() < 1e-9);
    }

    #[test]
    fn bucket_boundaries() {
        assert_eq!(bucket_for(5.0), 5);
        assert_eq!(bucket_for(4.5), 5);
        assert_eq!(bucket_for(4.49), 4);
        assert_eq!(bucket_for(3.5), 4);
        assert_eq!(bucket_for(2.5), 3);
        assert_eq!(bucket_for(1.5), 2);
        assert_eq!(bucket_for(1.49), 1);
        assert_eq!(bucket_for(0.1), 1);
    }

    #[test]
    fn distribution_is_ordered_five_first() {
        let books = [book(1, Some(4.8)), book(2, Some(4.6)), book(3, Some(1.0))];
        let stats = ReviewStatistics::from_books(&books);
        let stars: Vec<u8> = stats.distribution.iter().map(|b| b.stars).collect();
        assert_eq!(stars, vec![5, 4, 3, 2, 1]);
        assert_eq!(stats.bucket(5), 2);
        assert_eq!(stats.bucket(1), 1);
        assert_eq!(stats.bucket(3), 0);
    }

    #[test]
    fn top_rated_sorts_descending_and_limits() {
        let books = [
            book(1, Some(3.0)),
            book(2, Some(4.9)),
            book(3, None),
            book(4, Some(4.1)),
        ];
        let ids: Vec<i64> = top_rated(&books, 2).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }
}
