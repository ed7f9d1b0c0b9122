//! Pipeline-level error taxonomy.
//!
//! Every variant here is fatal to the call that raised it and reaches the
//! caller unchanged. Per-track search and feature-lookup misses never show up
//! here; they are recorded as diagnostics and the track is dropped.

use thiserror::Error;

use crate::features::FeatureTableError;
use crate::platform::{Platform, PlatformError};

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The playlist reference matches neither platform's URL shape.
    #[error("Unrecognized playlist reference: {0}")]
    UnrecognizedReference(String),

    /// The source (or seed) playlist resolved to zero tracks.
    #[error("Playlist {0} has no tracks")]
    EmptyPlaylist(String),

    /// Source and target coincide.
    #[error("Cannot convert a {source_platform} playlist to {target}")]
    UnsupportedConversion {
        source_platform: Platform,
        target: Platform,
    },

    /// The requested platform is outside the supported set.
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// Nothing matched and the target platform refuses empty playlists.
    #[error("None of the {attempted} tracks could be found on {target}")]
    NoMatchesFound { target: Platform, attempted: usize },

    /// No seed track had a known feature vector.
    #[error("None of the {seed_tracks} seed tracks have known audio features")]
    NoScorableTracks { seed_tracks: usize },

    /// A track in the input batch is malformed.
    #[error("Invalid track at position {index}: {reason}")]
    InvalidTrack { index: usize, reason: String },

    /// Generation criteria outside their allowed ranges.
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),

    /// A read or create call against a platform failed.
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// The feature reference table could not be loaded.
    #[error("Feature table error: {0}")]
    FeatureTable(#[from] FeatureTableError),
}

impl PipelineError {
    /// Short machine-readable label, used for metrics and API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnrecognizedReference(_) => "unrecognized_reference",
            Self::EmptyPlaylist(_) => "empty_playlist",
            Self::UnsupportedConversion { .. } => "unsupported_conversion",
            Self::UnsupportedPlatform(_) => "unsupported_platform",
            Self::NoMatchesFound { .. } => "no_matches_found",
            Self::NoScorableTracks { .. } => "no_scorable_tracks",
            Self::InvalidTrack { .. } => "invalid_track",
            Self::InvalidCriteria(_) => "invalid_criteria",
            Self::Platform(_) => "platform_error",
            Self::FeatureTable(_) => "feature_table_error",
        }
    }
}
