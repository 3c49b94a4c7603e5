/// Catalog and user administration
use crate::cli::{
    AdminAudioCommand, AdminBooksCommand, AdminCategoriesCommand, AdminChaptersCommand, AdminCommand,
    AdminUsersCommand, BookFormArgs, ChapterFormArgs,
};
use crate::error::{CliError, Result};
use crate::format::{book_line, page_footer, rating_label, review_line};
use crate::Context;
use audiobook_client::{BookDraft, CatalogAdmin, ChapterDraft, ReviewModeration};
use audiobook_core::{ReviewStatistics, UserUpdate, ValidationError};
use std::io::Write;
use std::path::PathBuf;

pub async fn run<W: Write>(ctx: &Context, command: AdminCommand, out: &mut W) -> Result<()> {
    ctx.require_admin()?;
    let admin = CatalogAdmin::new(&ctx.client);

    match command {
        AdminCommand::Books(command) => books(&admin, command, out).await,
        AdminCommand::Chapters(command) => chapters(&admin, command, out).await,
        AdminCommand::Audio(AdminAudioCommand::Delete { id }) => {
            admin.delete_audio(id).await?;
            writeln!(out, "Audio {id} deleted")?;
            Ok(())
        }
        AdminCommand::Categories(command) => categories(ctx, command, out).await,
        AdminCommand::Users(command) => users(&admin, command, out).await,
        AdminCommand::Stats {
            book,
            page,
            delete_review,
            top,
        } => stats(ctx, book, page, delete_review, top, out).await,
    }
}

// ===== Books =====

async fn books<W: Write>(
    admin: &CatalogAdmin<'_>,
    command: AdminBooksCommand,
    out: &mut W,
) -> Result<()> {
    match command {
        AdminBooksCommand::List => {
            for book in admin.books().await? {
                writeln!(out, "{}", book_line(&book))?;
            }
        }
        AdminBooksCommand::Add { form, chapters } => {
            let mut draft = book_draft(form);
            draft.chapters = chapters
                .iter()
                .map(|spec| parse_chapter_spec(spec)?.into_draft())
                .collect::<Result<_>>()?;

            let added = admin.add_book(&draft).await?;
            match added.book_id {
                Some(id) => writeln!(out, "Book \"{}\" added with id {id}", draft.title)?,
                None => writeln!(
                    out,
                    "Book \"{}\" added, but it could not be found in the catalog yet",
                    draft.title
                )?,
            }
            for title in &added.chapters_created {
                writeln!(out, "  + {title}")?;
            }
            if added.audios_attached > 0 {
                writeln!(out, "  {} audio file(s) attached", added.audios_attached)?;
            }
        }
        AdminBooksCommand::Update { id, form } => {
            admin.update_book(id, &book_draft(form)).await?;
            writeln!(out, "Book {id} updated")?;
        }
        AdminBooksCommand::Delete { id } => {
            admin.delete_book(id).await?;
            writeln!(out, "Book {id} deleted")?;
        }
    }
    Ok(())
}

fn book_draft(form: BookFormArgs) -> BookDraft {
    BookDraft {
        title: form.title,
        author: form.author,
        description: form.description,
        image_url: form.image_url,
        cover_file: form.cover,
        category_id: form.category,
        published: form.published,
        chapters: Vec::new(),
    }
}

/// Chapter given on the command line as `Title|text file|audio file|voice`
#[derive(Debug, Clone, PartialEq, Eq)]
struct ChapterSpec {
    title: String,
    text_file: Option<PathBuf>,
    audio_file: Option<PathBuf>,
    voice: Option<String>,
}

impl ChapterSpec {
    fn into_draft(self) -> Result<ChapterDraft> {
        let text = match &self.text_file {
            Some(path) => std::fs::read_to_string(path)?,
            None => String::new(),
        };
        Ok(ChapterDraft {
            title: self.title,
            text,
            audio_file: self.audio_file,
            voice: self.voice,
        })
    }
}

fn parse_chapter_spec(spec: &str) -> Result<ChapterSpec> {
    let mut fields = spec.split('|').map(str::trim);
    let title = fields.next().unwrap_or_default().to_string();
    if title.is_empty() {
        return Err(ValidationError::invalid_input(format!("chapter \"{spec}\" has no title")).into());
    }

    let mut optional = || fields.next().filter(|f| !f.is_empty()).map(str::to_string);
    let text_file = optional().map(PathBuf::from);
    let audio_file = optional().map(PathBuf::from);
    let voice = optional();

    Ok(ChapterSpec {
        title,
        text_file,
        audio_file,
        voice,
    })
}

// ===== Chapters =====

async fn chapters<W: Write>(
    admin: &CatalogAdmin<'_>,
    command: AdminChaptersCommand,
    out: &mut W,
) -> Result<()> {
    match command {
        AdminChaptersCommand::List { book } => {
            let detail = admin.book(book).await?;
            writeln!(out, "{} ({} chapters)", detail.title, detail.chapters.len())?;
            for chapter in &detail.chapters {
                writeln!(out, "[{}] {}", chapter.id, chapter.title)?;
                for audio in &chapter.audios {
                    writeln!(out, "    audio [{}] {}  {}", audio.id, audio.name, audio.url)?;
                }
            }
        }
        AdminChaptersCommand::Add { book, chapter } => {
            let draft = chapter_draft(chapter)?;
            let attached = admin.add_chapter(book, &draft).await?;
            writeln!(out, "Chapter \"{}\" added to book {book}", draft.title)?;
            if attached {
                writeln!(out, "  audio attached")?;
            }
        }
        AdminChaptersCommand::Update { id, chapter } => {
            let draft = chapter_draft(chapter)?;
            let attached = admin.update_chapter(id, &draft).await?;
            writeln!(out, "Chapter {id} updated")?;
            if attached {
                writeln!(out, "  audio attached")?;
            }
        }
        AdminChaptersCommand::Delete { id } => {
            admin.delete_chapter(id).await?;
            writeln!(out, "Chapter {id} deleted")?;
        }
    }
    Ok(())
}

fn chapter_draft(form: ChapterFormArgs) -> Result<ChapterDraft> {
    let text = match &form.text_file {
        Some(path) => std::fs::read_to_string(path)?,
        None => form.text,
    };
    Ok(ChapterDraft {
        title: form.title,
        text,
        audio_file: form.audio,
        voice: form.voice,
    })
}

// ===== Categories =====

async fn categories<W: Write>(
    ctx: &Context,
    command: AdminCategoriesCommand,
    out: &mut W,
) -> Result<()> {
    let categories = ctx.client.categories();
    match command {
        AdminCategoriesCommand::Add { name } => {
            categories.add(&name).await?;
            writeln!(out, "Category \"{name}\" added")?;
        }
        AdminCategoriesCommand::Rename { id, name } => {
            categories.rename(id, &name).await?;
            writeln!(out, "Category {id} renamed to \"{name}\"")?;
        }
        AdminCategoriesCommand::Delete { id } => {
            categories.delete(id).await?;
            writeln!(out, "Category {id} deleted")?;
        }
    }
    Ok(())
}

// ===== Users =====

async fn users<W: Write>(
    admin: &CatalogAdmin<'_>,
    command: AdminUsersCommand,
    out: &mut W,
) -> Result<()> {
    match command {
        AdminUsersCommand::List => {
            for user in admin.users().await? {
                writeln!(
                    out,
                    "{:<16} {:<6} {} <{}>",
                    user.username, user.role, user.fullname, user.email
                )?;
            }
        }
        AdminUsersCommand::Update {
            username,
            fullname,
            email,
            role,
        } => {
            let current = admin
                .users()
                .await?
                .into_iter()
                .find(|u| u.username == username)
                .ok_or_else(|| CliError::NotFound(format!("user {username}")))?;

            let update = UserUpdate {
                fullname: fullname.unwrap_or(current.fullname),
                email: email.unwrap_or(current.email),
                role: role.map_or(current.role, Into::into),
            };
            admin.update_user(&username, &update).await?;
            writeln!(out, "User {username} updated ({})", update.role)?;
        }
        AdminUsersCommand::Delete { username } => {
            admin.delete_user(&username).await?;
            writeln!(out, "User {username} deleted")?;
        }
    }
    Ok(())
}

// ===== Statistics and moderation =====

async fn stats<W: Write>(
    ctx: &Context,
    book: Option<i64>,
    page: u32,
    delete_review: Option<i64>,
    top: usize,
    out: &mut W,
) -> Result<()> {
    let mut moderation = ReviewModeration::new(&ctx.client);
    let mut statistics = moderation.load().await?;

    if let Some(book_id) = book {
        moderation.open_book(book_id).await?;
        if page > 0 {
            moderation.change_page(page).await?;
        }
        if let Some(review_id) = delete_review {
            statistics = moderation.delete_review(review_id).await?;
            writeln!(out, "Review {review_id} deleted")?;
        }
    }

    print_statistics(&statistics, out)?;

    writeln!(out)?;
    writeln!(out, "Top rated")?;
    for book in moderation.top_rated(top) {
        writeln!(out, "  {:>7}  {}", rating_label(book.rating), book.title)?;
    }

    if let (Some(detail), Some(reviews)) = (moderation.selected(), moderation.reviews()) {
        writeln!(out)?;
        writeln!(out, "Reviews of {}", detail.title)?;
        if reviews.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for review in &reviews.items {
            writeln!(out, "  {}", review_line(review))?;
        }
        writeln!(out, "  {}", page_footer(reviews))?;
    }
    Ok(())
}

fn print_statistics<W: Write>(statistics: &ReviewStatistics, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "{} books, {} rated, average {:.2}",
        statistics.total_books, statistics.rated_books, statistics.average_rating
    )?;
    for bucket in statistics.distribution.iter().rev() {
        writeln!(out, "  {} star: {}", bucket.stars, bucket.count)?;
    }
    Ok(())
}
