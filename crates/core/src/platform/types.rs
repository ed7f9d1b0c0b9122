//! Platform-neutral track and playlist types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// A supported music platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Spotify,
    YouTube,
}

impl Platform {
    /// The other supported platform.
    pub fn opposite(self) -> Self {
        match self {
            Self::Spotify => Self::YouTube,
            Self::YouTube => Self::Spotify,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spotify => "spotify",
            Self::YouTube => "youtube",
        }
    }

    /// Human-facing name, used in playlist descriptions.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Spotify => "Spotify",
            Self::YouTube => "YouTube Music",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spotify" => Ok(Self::Spotify),
            "youtube" | "youtube_music" | "ytmusic" => Ok(Self::YouTube),
            other => Err(PipelineError::UnsupportedPlatform(other.to_string())),
        }
    }
}

/// A track descriptor.
///
/// Within a playlist a track is identified by `native_id` on its origin
/// platform. Across platforms only title + artist are usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub primary_artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_id: Option<String>,
    pub platform: Platform,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        primary_artist: impl Into<String>,
        native_id: Option<String>,
        platform: Platform,
    ) -> Self {
        Self {
            title: title.into(),
            primary_artist: primary_artist.into(),
            native_id,
            platform,
        }
    }

    /// Free-text query used to find this track on another platform.
    pub fn search_query(&self) -> String {
        format!("{} {}", self.title, self.primary_artist)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.primary_artist, self.title)
    }
}

/// Request to create a playlist on a platform.
///
/// The owner is not part of the request: each adapter creates playlists
/// under the account it was constructed with.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlaylist {
    pub name: String,
    pub description: String,
    /// Native ids to attach, in playlist order.
    pub track_ids: Vec<String>,
}

/// A playlist that was just created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedPlaylist {
    pub id: String,
    pub url: String,
}
