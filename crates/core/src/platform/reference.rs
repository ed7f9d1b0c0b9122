//! Playlist reference parsing.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::Platform;
use crate::error::PipelineError;

static SPOTIFY_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"spotify\.com/.*playlist/([A-Za-z0-9]+)").unwrap());
static SPOTIFY_URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^spotify:playlist:([A-Za-z0-9]+)$").unwrap());
static YOUTUBE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"youtube\.com/.*[?&]list=([A-Za-z0-9_-]+)").unwrap());

/// A playlist reference resolved to its platform and native playlist id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRef {
    pub platform: Platform,
    pub id: String,
}

impl PlaylistRef {
    pub fn new(platform: Platform, id: impl Into<String>) -> Self {
        Self {
            platform,
            id: id.into(),
        }
    }

    /// Identify the platform and playlist id from a URL or URI.
    ///
    /// Fails with [`PipelineError::UnrecognizedReference`] when the reference
    /// matches neither platform's shape.
    pub fn parse(reference: &str) -> Result<Self, PipelineError> {
        let reference = reference.trim();

        let spotify = SPOTIFY_URL
            .captures(reference)
            .or_else(|| SPOTIFY_URI.captures(reference));
        if let Some(caps) = spotify {
            return Ok(Self::new(Platform::Spotify, &caps[1]));
        }

        if let Some(caps) = YOUTUBE_URL.captures(reference) {
            return Ok(Self::new(Platform::YouTube, &caps[1]));
        }

        Err(PipelineError::UnrecognizedReference(reference.to_string()))
    }
}
