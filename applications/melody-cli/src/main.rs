/// MelodyFlow - command-line front end for the playback engine
mod commands;
mod config;

use clap::{Parser, Subcommand};
use config::AppConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "melody")]
#[command(about = "MelodyFlow music player for Subsonic servers", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./melodyflow.toml if present)
    #[arg(short, long, global = true, env = "MELODYFLOW_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List songs from the catalog
    Songs {
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },
    /// Start playing a song, queueing the loaded catalog around it
    Play {
        /// Song identifier
        song_id: String,
        /// Advance this many times after starting
        #[arg(long, default_value_t = 0)]
        skip: u32,
    },
    /// Check that the server is reachable with the configured credentials
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "melody=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    tracing::debug!(
        url = %config.server.url,
        page_size = config.pager.page_size,
        mode = ?config.playback.mode,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Songs { pages } => commands::songs(&config, pages).await?,
        Commands::Play { song_id, skip } => commands::play(&config, &song_id, skip).await?,
        Commands::Ping => commands::ping(&config).await?,
    }

    Ok(())
}
