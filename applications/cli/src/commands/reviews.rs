/// Book reviews
use crate::cli::ReviewsCommand;
use crate::error::Result;
use crate::format::{page_footer, review_line};
use crate::Context;
use audiobook_client::{ReviewBoard, BOOK_DETAIL_REVIEW_PAGE_SIZE};
use audiobook_core::{Page, Review};
use std::io::Write;

pub async fn run<W: Write>(ctx: &Context, command: ReviewsCommand, out: &mut W) -> Result<()> {
    match command {
        ReviewsCommand::List { book, page } => {
            let mut board = ReviewBoard::new(&ctx.client, book, BOOK_DETAIL_REVIEW_PAGE_SIZE);
            print_page(board.load(page).await?, out)?;
        }
        ReviewsCommand::Add {
            book,
            rating,
            comment,
        } => {
            let user = ctx.require_user()?;
            let mut board = ReviewBoard::new(&ctx.client, book, BOOK_DETAIL_REVIEW_PAGE_SIZE);
            let page = board.submit(&user.username, rating, &comment).await?;
            writeln!(out, "Review posted")?;
            print_page(page, out)?;
        }
        ReviewsCommand::Delete { book, review } => {
            ctx.require_user()?;
            let mut board = ReviewBoard::new(&ctx.client, book, BOOK_DETAIL_REVIEW_PAGE_SIZE);
            let page = board.delete(review).await?;
            writeln!(out, "Review {review} deleted")?;
            print_page(page, out)?;
        }
    }
    Ok(())
}

fn print_page<W: Write>(page: &Page<Review>, out: &mut W) -> Result<()> {
    if page.is_empty() {
        writeln!(out, "No reviews")?;
        return Ok(());
    }
    for review in &page.items {
        writeln!(out, "{}", review_line(review))?;
    }
    writeln!(out, "{}", page_footer(page))?;
    Ok(())
}
