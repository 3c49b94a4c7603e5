/// Audiobook - command-line client for the audiobook platform
use audiobook_cli::{cli::Cli, commands, CliConfig, Context};
use audiobook_client::{AudiobookClient, AuthSession, FileSessionStore};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "audiobook=info,audiobook_cli=info,audiobook_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = CliConfig::load(cli.config.as_deref())?.with_overrides(cli.api_url, cli.ai_url);
    config.validate()?;

    tracing::debug!(
        api_url = %config.api.api_url,
        ai_url = %config.api.ai_url,
        "Configuration loaded"
    );

    let client = AudiobookClient::new(config.client_config())?;
    let session = AuthSession::hydrated(FileSessionStore::new(config.session_file()));
    let ctx = Context::new(client, session);

    let mut stdout = std::io::stdout().lock();
    commands::dispatch(&ctx, cli.command, &mut stdout).await?;

    Ok(())
}
