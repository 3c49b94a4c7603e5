/// Home screen, listings, search and book detail
use crate::cli::{BooksCommand, CategoriesCommand};
use crate::error::Result;
use crate::format::{book_line, page_footer, rating_label, review_line};
use crate::Context;
use audiobook_client::{Catalog, CatalogFilter, ReviewBoard, BOOK_DETAIL_REVIEW_PAGE_SIZE};
use std::io::Write;

async fn featured<W: Write>(ctx: &Context, out: &mut W) -> Result<()> {
    let home = Catalog::new(&ctx.client).home().await;

    writeln!(out, "Featured")?;
    if home.featured.is_empty() {
        writeln!(out, "  (nothing featured)")?;
    }
    for book in &home.featured {
        writeln!(
            out,
            "  [{}] {} ({}, {})",
            book.id,
            book.title,
            book.category,
            rating_label(Some(book.rating))
        )?;
    }

    writeln!(out, "Categories")?;
    for category in &home.categories {
        writeln!(out, "  [{}] {}", category.id, category.name)?;
    }
    Ok(())
}

pub async fn books<W: Write>(ctx: &Context, command: BooksCommand, out: &mut W) -> Result<()> {
    let catalog = Catalog::new(&ctx.client);

    match command {
        BooksCommand::Featured => featured(ctx, out).await?,
        BooksCommand::List {
            category,
            rating,
            page,
        } => {
            let filter = CatalogFilter {
                category_id: category,
                min_rating: rating,
            };
            let books = catalog.books(filter, page).await?;
            if books.is_empty() {
                writeln!(out, "No books found")?;
                return Ok(());
            }
            for book in &books.items {
                writeln!(out, "{}", book_line(book))?;
            }
            writeln!(out, "{}", page_footer(&books))?;
        }
        BooksCommand::Search { keyword } => {
            let books = catalog.search(&keyword).await?;
            if books.is_empty() {
                writeln!(out, "No books match \"{keyword}\"")?;
            }
            for book in &books {
                writeln!(out, "{}", book_line(book))?;
            }
        }
        BooksCommand::Show { id } => show(ctx, id, out).await?,
    }
    Ok(())
}

async fn show<W: Write>(ctx: &Context, id: i64, out: &mut W) -> Result<()> {
    let mut board = ReviewBoard::new(&ctx.client, id, BOOK_DETAIL_REVIEW_PAGE_SIZE);
    let books = ctx.client.books();
    let (book, _) = tokio::try_join!(books.detail(id), board.load(0))?;

    writeln!(out, "{} by {}", book.title, book.author)?;
    writeln!(out, "  Category:  {}", book.category)?;
    if let Some(published) = &book.published {
        writeln!(out, "  Published: {published}")?;
    }
    writeln!(out, "  Rating:    {}", rating_label(book.rating))?;
    if !book.description.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", book.description)?;
    }

    writeln!(out)?;
    writeln!(out, "Chapters")?;
    for (i, chapter) in book.chapters.iter().enumerate() {
        let voices: Vec<&str> = chapter.audios.iter().map(|a| a.name.as_str()).collect();
        let voices = if voices.is_empty() {
            "no audio".to_string()
        } else {
            voices.join(", ")
        };
        writeln!(out, "  {}. {} ({})", i + 1, chapter.title, voices)?;
    }

    let reviews = board.current();
    writeln!(out)?;
    writeln!(out, "Reviews")?;
    if reviews.is_empty() {
        writeln!(out, "  (no reviews yet)")?;
    }
    for review in &reviews.items {
        writeln!(out, "  {}", review_line(review))?;
    }
    if reviews.has_next() {
        writeln!(out, "  {}", page_footer(reviews))?;
    }
    Ok(())
}

pub async fn categories<W: Write>(
    ctx: &Context,
    command: CategoriesCommand,
    out: &mut W,
) -> Result<()> {
    let CategoriesCommand::List = command;
    let categories = ctx.client.categories().list().await?;
    for category in &categories {
        match category.books {
            Some(count) => writeln!(out, "[{}] {} ({count} books)", category.id, category.name)?,
            None => writeln!(out, "[{}] {}", category.id, category.name)?,
        }
    }
    Ok(())
}
