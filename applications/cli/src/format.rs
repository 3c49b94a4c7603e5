/// Text rendering helpers for command output
use audiobook_core::{Book, Page, Review};
use std::time::Duration;

/// Format a position as `m:ss`
pub fn format_time(position: Duration) -> String {
    let secs = position.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Star string for a 0-5 rating, e.g. `★★★☆☆`
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Average rating as shown in listings
pub fn rating_label(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r > 0.0 => format!("{r:.1}"),
        _ => "unrated".to_string(),
    }
}

/// One-line book summary
pub fn book_line(book: &Book) -> String {
    format!(
        "[{}] {} - {} ({}, {})",
        book.id,
        book.title,
        book.author,
        if book.category.is_empty() {
            "uncategorised"
        } else {
            &book.category
        },
        rating_label(book.rating)
    )
}

/// One-line review summary
pub fn review_line(review: &Review) -> String {
    let date = review.date.as_deref().unwrap_or("-");
    format!(
        "[{}] {} {} ({}): {}",
        review.id,
        stars(review.rating),
        review.user.username,
        date,
        review.comment
    )
}

/// Page footer, e.g. `page 2/5 (47 total)`
pub fn page_footer<T>(page: &Page<T>) -> String {
    format!(
        "page {}/{} ({} total)",
        page.page + 1,
        page.total_pages.max(1),
        page.total_elements
    )
}
