use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub spotify: SpotifyConfig,
    #[serde(default)]
    pub youtube: YouTubeConfig,
    #[serde(default)]
    pub features: FeaturesConfig,
    #[serde(default)]
    pub defaults: PlaylistDefaults,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Spotify Web API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpotifyConfig {
    /// API base URL (default: "https://api.spotify.com/v1")
    #[serde(default = "default_spotify_api_base")]
    pub api_base: String,
    /// OAuth bearer token with playlist read/modify scopes
    #[serde(default)]
    pub access_token: String,
    /// Account that owns created playlists
    #[serde(default)]
    pub user_id: String,
    /// Create the playlist even when nothing matched (default: true)
    #[serde(default = "default_true")]
    pub allow_empty_playlist: bool,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            api_base: default_spotify_api_base(),
            access_token: String::new(),
            user_id: String::new(),
            allow_empty_playlist: true,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_spotify_api_base() -> String {
    "https://api.spotify.com/v1".to_string()
}

/// YouTube Data API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct YouTubeConfig {
    /// API base URL (default: "https://www.googleapis.com/youtube/v3")
    #[serde(default = "default_youtube_api_base")]
    pub api_base: String,
    /// OAuth bearer token with the youtube scope
    #[serde(default)]
    pub access_token: String,
    /// Create the playlist even when nothing matched (default: false)
    #[serde(default)]
    pub allow_empty_playlist: bool,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_base: default_youtube_api_base(),
            access_token: String::new(),
            allow_empty_playlist: false,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_youtube_api_base() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

/// Audio feature dataset
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    #[serde(default = "default_features_path")]
    pub path: PathBuf,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            path: default_features_path(),
        }
    }
}

fn default_features_path() -> PathBuf {
    PathBuf::from("tracks_features.csv")
}

/// Names given to playlists when the caller does not supply one
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistDefaults {
    #[serde(default = "default_converted_name")]
    pub converted_playlist_name: String,
    #[serde(default = "default_generated_name")]
    pub generated_playlist_name: String,
}

impl Default for PlaylistDefaults {
    fn default() -> Self {
        Self {
            converted_playlist_name: default_converted_name(),
            generated_playlist_name: default_generated_name(),
        }
    }
}

fn default_converted_name() -> String {
    "Converted Playlist".to_string()
}

fn default_generated_name() -> String {
    "Generated Playlist".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u32 {
    30
}

/// Sanitized config for API responses (tokens redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub spotify: SanitizedSpotifyConfig,
    pub youtube: SanitizedYouTubeConfig,
    pub features: FeaturesConfig,
    pub defaults: PlaylistDefaults,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSpotifyConfig {
    pub api_base: String,
    pub access_token_configured: bool,
    pub user_id: String,
    pub allow_empty_playlist: bool,
    pub timeout_secs: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedYouTubeConfig {
    pub api_base: String,
    pub access_token_configured: bool,
    pub allow_empty_playlist: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            spotify: SanitizedSpotifyConfig {
                api_base: config.spotify.api_base.clone(),
                access_token_configured: !config.spotify.access_token.is_empty(),
                user_id: config.spotify.user_id.clone(),
                allow_empty_playlist: config.spotify.allow_empty_playlist,
                timeout_secs: config.spotify.timeout_secs,
            },
            youtube: SanitizedYouTubeConfig {
                api_base: config.youtube.api_base.clone(),
                access_token_configured: !config.youtube.access_token.is_empty(),
                allow_empty_playlist: config.youtube.allow_empty_playlist,
                timeout_secs: config.youtube.timeout_secs,
            },
            features: config.features.clone(),
            defaults: config.defaults.clone(),
        }
    }
}
