/// Command handlers
///
/// Each handler writes human-readable output to `out` and returns errors to
/// the caller, which decides how to report them.
pub mod account;
pub mod admin;
pub mod catalog;
pub mod listen;
pub mod reviews;
pub mod tools;
pub mod voices;

use crate::cli::Commands;
use crate::error::Result;
use crate::Context;
use std::io::Write;

/// Run one parsed command
pub async fn dispatch<W: Write>(ctx: &Context, command: Commands, out: &mut W) -> Result<()> {
    match command {
        Commands::Login { username, password } => {
            account::login(ctx, &username, &password, out).await
        }
        Commands::Register(args) => account::register(ctx, args, out).await,
        Commands::Logout => account::logout(ctx, out),
        Commands::Whoami => account::whoami(ctx, out),
        Commands::Profile(command) => account::profile(ctx, command, out).await,
        Commands::History { page, size, play } => {
            account::history(ctx, page, size, play, out).await
        }
        Commands::Books(command) => catalog::books(ctx, command, out).await,
        Commands::Categories(command) => catalog::categories(ctx, command, out).await,
        Commands::Reviews(command) => reviews::run(ctx, command, out).await,
        Commands::Voices(command) => voices::run(ctx, command, out).await,
        Commands::Tts { voice, text, file } => tools::tts(ctx, voice, text, file, out).await,
        Commands::Its { image, voice } => tools::its(ctx, &image, voice, out).await,
        Commands::Listen(args) => listen::run(ctx, args, out).await,
        Commands::Admin(command) => admin::run(ctx, command, out).await,
    }
}
