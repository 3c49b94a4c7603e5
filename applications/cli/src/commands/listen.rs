/// Listen to a book without an audio device: resolve what would play
use crate::cli::ListenArgs;
use crate::error::Result;
use crate::format::format_time;
use crate::player::ListenController;
use crate::Context;
use audiobook_core::ValidationError;
use audiobook_playback::{AudioSource, HeadlessMedia, MediaElement};
use std::io::Write;

pub async fn run<W: Write>(ctx: &Context, args: ListenArgs, out: &mut W) -> Result<()> {
    let chapter = one_based("chapter", args.chapter)?;
    let audio = args.audio.map(|a| one_based("audio", a)).transpose()?;

    let mut controller =
        ListenController::open(&ctx.client, ctx.session.current_user(), args.book).await?;

    let source = AudioSource::from(args.source);
    {
        let session = controller.session_mut();
        session.set_source(source);
        session.select_chapter(chapter)?;
    }

    match source {
        AudioSource::Admin => {
            if let Some(index) = audio {
                controller.session_mut().select_admin_audio(index)?;
            }
        }
        AudioSource::User => {
            if let Some(voice) = args.voice {
                controller.session_mut().select_voice(voice)?;
            }
            writeln!(out, "Generating audio...")?;
            match controller.generate().await? {
                Some(generated) if !generated.recorded => {
                    writeln!(out, "(not saved to listening history)")?;
                }
                Some(_) => {}
                None => writeln!(out, "Selection changed; generated audio discarded")?,
            }
        }
    }

    let session = controller.session_mut();
    if let Some(rate) = args.rate {
        session.set_rate(rate)?;
    }
    if let Some(volume) = args.volume {
        session.set_volume(f32::from(volume) / 100.0)?;
    }
    session.play()?;

    print_state(&controller, out)
}

fn one_based(field: &str, value: usize) -> Result<usize> {
    value
        .checked_sub(1)
        .ok_or_else(|| ValidationError::invalid_input(format!("{field} numbers start at 1")).into())
}

fn print_state<W: Write>(controller: &ListenController<'_, HeadlessMedia>, out: &mut W) -> Result<()> {
    let book = controller.book();
    let session = controller.session();

    writeln!(out, "{} by {}", book.title, book.author)?;
    if let Some(chapter) = session.current_chapter() {
        writeln!(
            out,
            "Chapter {}/{}: {}",
            session.current_index() + 1,
            session.chapters().len(),
            chapter.title
        )?;
    }

    match session.source() {
        AudioSource::Admin => match session.current_admin_audio() {
            Some(audio) => writeln!(out, "Voice: {} (narrated)", audio.name)?,
            None => writeln!(out, "This chapter has no narrated audio")?,
        },
        AudioSource::User => {
            if let Some(voice) = session.selected_voice() {
                writeln!(out, "Voice: {} (generated)", voice.name)?;
            }
        }
    }

    match session.source_url() {
        Some(url) => writeln!(out, "Source: {url}")?,
        None => writeln!(out, "Nothing to play")?,
    }

    let volume = session.volume();
    writeln!(
        out,
        "{} at {} / {}, rate {}, volume {:.0}%{}",
        if session.is_playing() { "Playing" } else { "Paused" },
        format_time(session.position()),
        format_time(session.duration()),
        session.rate(),
        volume.level() * 100.0,
        if volume.is_muted() { " (muted)" } else { "" }
    )?;

    if session.media().src().is_some() && session.has_next() {
        writeln!(out, "Next: chapter {}", session.current_index() + 2)?;
    }
    Ok(())
}
