mod cli;

use crate::cli::{Command, LogFormat, StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use snip_core::{Repository, Shortener};
use snip_shortener::{ShortenerService, ShortenerSettings};
use snip_storage::{InMemoryRepository, SqliteRepository};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_format);

    let command = config
        .command()
        .context("exactly one of --url or --decode is required")?;
    let settings = config.settings();

    info!(
        storage_backend = %config.storage,
        codec = %settings.codec,
        "starting snip"
    );

    match config.storage {
        StorageBackendArg::InMemory => run(InMemoryRepository::new(), settings, command).await,
        StorageBackendArg::Sqlite => {
            let repository = SqliteRepository::connect(&config.database_url)
                .await
                .with_context(|| format!("failed to open {}", config.database_url))?;
            let result = run(repository.clone(), settings, command).await;
            repository.close().await;
            result
        }
    }
}

async fn run<R: Repository>(
    repository: R,
    settings: ShortenerSettings,
    command: Command,
) -> anyhow::Result<()> {
    let service = ShortenerService::new(repository, settings)?;

    match command {
        Command::Shorten(url) => {
            let code = service.shorten(&url).await?;
            println!("{}", code.display());
        }
        Command::Resolve(code) => {
            let url = service.resolve(&code).await?;
            println!("{url}");
        }
    }

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }
}
