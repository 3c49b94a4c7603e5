/// Login, registration, profile and listen history
use crate::cli::{ProfileCommand, RegisterArgs};
use crate::error::{CliError, Result};
use crate::format::page_footer;
use crate::Context;
use audiobook_core::{ProfileUpdate, Registration};
use audiobook_playback::{HeadlessMedia, PlaybackArbiter};
use std::io::Write;

pub async fn login<W: Write>(
    ctx: &Context,
    username: &str,
    password: &str,
    out: &mut W,
) -> Result<()> {
    let user = ctx.session.login(&ctx.client, username, password).await?;
    writeln!(out, "Logged in as {} ({})", user.fullname, user.role)?;
    Ok(())
}

pub async fn register<W: Write>(ctx: &Context, args: RegisterArgs, out: &mut W) -> Result<()> {
    let registration = Registration {
        username: args.username,
        password: args.password,
        fullname: args.fullname,
        email: args.email,
        phonenumber: args.phone,
    };
    let message = ctx.session.register(&ctx.client, &registration).await?;

    if message.trim().is_empty() {
        writeln!(out, "Account {} created", registration.username)?;
    } else {
        writeln!(out, "{}", message.trim())?;
    }
    writeln!(out, "Run `audiobook login {}` to sign in", registration.username)?;
    Ok(())
}

pub fn logout<W: Write>(ctx: &Context, out: &mut W) -> Result<()> {
    ctx.session.logout();
    writeln!(out, "Logged out")?;
    Ok(())
}

pub fn whoami<W: Write>(ctx: &Context, out: &mut W) -> Result<()> {
    match ctx.session.current_user() {
        Some(user) => {
            writeln!(out, "{} ({})", user.username, user.role)?;
            writeln!(out, "  Name:  {}", user.fullname)?;
            writeln!(out, "  Email: {}", user.email)?;
            writeln!(out, "  Phone: {}", user.phonenumber)?;
        }
        None => writeln!(out, "Not logged in")?,
    }
    Ok(())
}

pub async fn profile<W: Write>(ctx: &Context, command: ProfileCommand, out: &mut W) -> Result<()> {
    let current = ctx.require_user()?;

    match command {
        ProfileCommand::Update {
            fullname,
            email,
            phone,
        } => {
            let update = ProfileUpdate {
                fullname: fullname.unwrap_or(current.fullname),
                email: email.unwrap_or(current.email),
                phonenumber: phone.unwrap_or(current.phonenumber),
            };
            let user = ctx.session.update_profile(&ctx.client, &update).await?;
            writeln!(out, "Profile updated: {} <{}>", user.fullname, user.email)?;
        }
        ProfileCommand::Password { old, new, confirm } => {
            ctx.session
                .change_password(&ctx.client, &old, &new, &confirm)
                .await?;
            writeln!(out, "Password changed")?;
        }
    }
    Ok(())
}

pub async fn history<W: Write>(
    ctx: &Context,
    page: u32,
    size: u32,
    play: Option<usize>,
    out: &mut W,
) -> Result<()> {
    let user = ctx.require_user()?;
    let entries = ctx.client.history().list(&user.username, page, size).await?;

    if entries.is_empty() {
        writeln!(out, "No listening history")?;
        return Ok(());
    }

    let mut arbiter = PlaybackArbiter::new(HeadlessMedia::new());
    if let Some(n) = play {
        let entry = n
            .checked_sub(1)
            .and_then(|i| entries.items.get(i))
            .ok_or_else(|| CliError::NotFound(format!("history entry {n}")))?;
        arbiter.acquire(n, &entry.audio_url);
    }

    for (i, entry) in entries.items.iter().enumerate() {
        let marker = if arbiter.is_playing(&(i + 1)) { ">" } else { " " };
        writeln!(
            out,
            "{marker} {}. {}  {} / {}  [{}]",
            i + 1,
            entry.time,
            entry.book_title,
            entry.chapter_title,
            entry.audio_name
        )?;
        writeln!(out, "      {}", entry.audio_url)?;
    }
    writeln!(out, "{}", page_footer(&entries))?;
    Ok(())
}
