/// Text-to-speech and image-to-speech
use crate::error::{CliError, Result};
use crate::Context;
use audiobook_client::{SpeechOutput, SpeechTools};
use audiobook_core::{User, VoiceSample};
use std::io::Write;
use std::path::{Path, PathBuf};

pub async fn tts<W: Write>(
    ctx: &Context,
    voice_id: i64,
    text: Option<String>,
    file: Option<PathBuf>,
    out: &mut W,
) -> Result<()> {
    let user = ctx.require_user()?;
    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(file)) => std::fs::read_to_string(&file)?,
        (None, None) => String::new(),
    };
    let voice = find_voice(ctx, &user, voice_id).await?;

    let output = SpeechTools::new(&ctx.client)
        .text_to_speech(Some(&user), &text, &voice)
        .await?;
    print_output(&output, &voice, out)
}

pub async fn its<W: Write>(
    ctx: &Context,
    image: &Path,
    voice_id: Option<i64>,
    out: &mut W,
) -> Result<()> {
    let user = ctx.require_user()?;
    let tools = SpeechTools::new(&ctx.client);

    let extracted = tools.extract_text(image).await?;
    writeln!(out, "Extracted text:")?;
    writeln!(out, "{}", extracted.text)?;

    let Some(voice_id) = voice_id else {
        return Ok(());
    };
    let voice = find_voice(ctx, &user, voice_id).await?;
    let output = tools
        .image_text_to_speech(Some(&user), &extracted.text, &voice)
        .await?;
    writeln!(out)?;
    print_output(&output, &voice, out)
}

async fn find_voice(ctx: &Context, user: &User, voice_id: i64) -> Result<VoiceSample> {
    ctx.client
        .voices()
        .list(&user.username)
        .await?
        .into_iter()
        .find(|v| v.id == voice_id)
        .ok_or_else(|| CliError::NotFound(format!("voice {voice_id}")))
}

fn print_output<W: Write>(output: &SpeechOutput, voice: &VoiceSample, out: &mut W) -> Result<()> {
    writeln!(out, "Audio ({}): {}", voice.name, output.audio_url)?;
    if !output.message.is_empty() {
        writeln!(out, "{}", output.message)?;
    }
    if !output.recorded {
        writeln!(out, "(not saved to listening history)")?;
    }
    Ok(())
}
