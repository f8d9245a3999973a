//! mixcue — ingest a music library and generate filtered playlists
//!
//! Credentials come from flags or the environment; the library is ingested
//! once, the genre/subgenre dictionaries are printed, and with `--filters`
//! a shuffled playlist is generated (and optionally pushed back to the
//! remote service).

use anyhow::Result;
use clap::Parser;
use mixcue_backend::{Backend, BackendError, GenerateError};
use mixcue_common::config::CatalogConfig;
use mixcue_common::events::EventBus;
use mixcue_common::Credentials;
use mixcue_ingest::catalog::CatalogClient;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "mixcue", about = "Generate playlists from your music library")]
struct Args {
    /// Service-level developer token
    #[arg(long, env = "MIXCUE_DEVELOPER_TOKEN", hide_env_values = true)]
    developer_token: String,

    /// Per-user library token
    #[arg(long, env = "MIXCUE_USER_TOKEN", hide_env_values = true)]
    user_token: String,

    /// Config file (otherwise MIXCUE_CONFIG, then the platform default)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Subgenre filters for playlist generation (repeat or comma-separate)
    #[arg(long, value_delimiter = ',')]
    filters: Vec<String>,

    /// Name of the generated playlist
    #[arg(long, default_value = "Mixcue Playlist")]
    name: String,

    /// Push the generated playlist back to the remote service
    #[arg(long)]
    push: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    info!("Starting mixcue");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = CatalogConfig::resolve(args.config.as_deref())?;
    let client = Arc::new(CatalogClient::new(&config)?);
    let backend = Backend::new(client, config, EventBus::new(100));

    let credentials = Credentials::new(args.developer_token, args.user_token);
    let user_token = credentials.user_token.clone();

    let counts = match backend
        .onboard_user(credentials, CancellationToken::new())
        .await
    {
        Ok(counts) => counts,
        Err(BackendError::Ingest(e)) => {
            tracing::error!(error = %e, "ingestion failed");
            eprintln!("Could not load your library. Please try again later.");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "Song count: {} | Genre count: {} | Subgenre count: {}",
        counts.songs, counts.genres, counts.subgenres
    );
    println!("Genres: {}", backend.genre_names(&user_token).await?.join(", "));
    println!(
        "Subgenres: {}",
        backend.subgenre_names(&user_token).await?.join(", ")
    );

    if args.filters.is_empty() {
        return Ok(());
    }

    let playlist = match backend
        .create_playlist(&user_token, &args.name, &args.filters)
        .await
    {
        Ok(playlist) => playlist,
        Err(BackendError::Generate(GenerateError::EmptyResult { .. })) => {
            eprintln!("No songs matched your selection.");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    println!("\nPlaylist: {} — {}", playlist.name(), playlist.description());
    for song in playlist.songs() {
        println!("  {} — {}", song.name, song.artist);
    }

    if args.push {
        let remote_id = backend.push_playlist(&user_token, 0).await?;
        println!("Pushed to remote service as {remote_id}");
    }

    Ok(())
}
