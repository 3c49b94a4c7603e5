/// Personal voice library
use crate::cli::VoicesCommand;
use crate::error::Result;
use crate::Context;
use audiobook_client::VoiceLibrary;
use audiobook_core::VoiceSample;
use std::io::Write;

pub async fn run<W: Write>(ctx: &Context, command: VoicesCommand, out: &mut W) -> Result<()> {
    let user = ctx.require_user()?;
    let mut library = VoiceLibrary::new(&ctx.client, &user.username);

    let samples = match command {
        VoicesCommand::List => library.refresh().await?,
        VoicesCommand::Add { name, file } => {
            let samples = library.add_from_file(&name, &file).await?;
            writeln!(out, "Voice \"{name}\" added")?;
            samples
        }
        VoicesCommand::Rename { id, name } => {
            library.refresh().await?;
            let samples = library.rename(id, &name).await?;
            writeln!(out, "Voice {id} renamed to \"{name}\"")?;
            samples
        }
        VoicesCommand::Delete { id } => {
            let samples = library.delete(id).await?;
            writeln!(out, "Voice {id} deleted")?;
            samples
        }
    };

    print_samples(samples, out)
}

fn print_samples<W: Write>(samples: &[VoiceSample], out: &mut W) -> Result<()> {
    if samples.is_empty() {
        writeln!(out, "No voices yet. Add one with `audiobook voices add <name> <file>`")?;
        return Ok(());
    }
    for sample in samples {
        writeln!(out, "[{}] {}  {}", sample.id, sample.name, sample.url)?;
    }
    Ok(())
}
