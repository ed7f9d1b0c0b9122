use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moodtune_core::{
    load_config, validate_config, ConversionPipeline, CsvFeatureSource, GenerationPipeline,
    PlatformClient, SpotifyClient, YouTubeClient,
};
use moodtune_server::{api::create_router, state::AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("MOODTUNE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    let config_json = serde_json::to_string(&config).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    info!(
        config_hash = &config_hash[..16],
        features = %config.features.path.display(),
        "Configuration loaded successfully"
    );

    if config.spotify.access_token.is_empty() {
        warn!("No Spotify access token configured; platform calls will be rejected");
    }
    if config.youtube.access_token.is_empty() {
        warn!("No YouTube access token configured; platform calls will be rejected");
    }

    // Platform clients
    let spotify: Arc<dyn PlatformClient> = Arc::new(
        SpotifyClient::new(config.spotify.clone()).context("Failed to create Spotify client")?,
    );
    let youtube: Arc<dyn PlatformClient> = Arc::new(
        YouTubeClient::new(config.youtube.clone()).context("Failed to create YouTube client")?,
    );

    // Pipelines
    let conversion = Arc::new(
        ConversionPipeline::new(spotify, youtube)
            .with_default_name(config.defaults.converted_playlist_name.clone()),
    );
    let features = Arc::new(CsvFeatureSource::new(config.features.path.clone()));
    if !features.path().exists() {
        warn!(
            "Feature dataset {:?} not found; generation requests will fail",
            features.path()
        );
    }
    let generation = GenerationPipeline::new(Arc::clone(&conversion), features)
        .with_default_name(config.defaults.generated_playlist_name.clone());

    // Create app state
    let addr = SocketAddr::new(config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, conversion, generation));

    // Create router
    let app = create_router(state);

    // Start server
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
