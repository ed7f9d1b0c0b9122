//! Music platform capabilities.
//!
//! The pipelines only talk to platforms through [`PlatformClient`]. The
//! adapters in this module implement it over the Spotify and YouTube Data
//! Web APIs; tests use `testing::MockPlatform`.
//!
//! Adapters own pagination, batching and credentials. Callers always see a
//! fully materialized, ordered track list.

mod reference;
mod spotify;
mod types;
mod youtube;

pub use reference::PlaylistRef;
pub use spotify::SpotifyClient;
pub use types::*;
pub use youtube::YouTubeClient;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use thiserror::Error;

/// Errors from a platform adapter.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The access token was rejected.
    #[error("Unauthorized: access token rejected by {0}")]
    Unauthorized(Platform),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded on {0}")]
    RateLimited(Platform),

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// The narrow capability contract the pipelines depend on.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Which platform this client talks to.
    fn platform(&self) -> Platform;

    /// Whether a playlist may be created when no track matched.
    fn allows_empty_playlist(&self) -> bool;

    /// Read every track of a playlist, in playlist order.
    async fn read_playlist_tracks(&self, playlist: &PlaylistRef)
        -> Result<Vec<Track>, PlatformError>;

    /// Free-text search for a single song. `Ok(None)` means no hit.
    async fn search_top_track(&self, query: &str) -> Result<Option<Track>, PlatformError>;

    /// Create a playlist and attach the given tracks in order.
    async fn create_playlist(&self, request: &NewPlaylist)
        -> Result<CreatedPlaylist, PlatformError>;
}

/// Map a non-success HTTP status to a [`PlatformError`].
pub(crate) async fn check_response(
    platform: Platform,
    response: Response,
    what: &str,
) -> Result<Response, PlatformError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(PlatformError::Unauthorized(platform)),
        StatusCode::TOO_MANY_REQUESTS => Err(PlatformError::RateLimited(platform)),
        StatusCode::NOT_FOUND => Err(PlatformError::NotFound(what.to_string())),
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(PlatformError::ApiError {
                status: status.as_u16(),
                message: body,
            })
        }
    }
}
