//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the platform and feature
//! source traits, allowing the pipelines to be exercised end to end without
//! network access or the real dataset.
//!
//! # Example
//!
//! ```rust,ignore
//! use moodtune_core::testing::{fixtures, MockFeatureSource, MockPlatform};
//!
//! let spotify = MockPlatform::new(Platform::Spotify);
//! let youtube = MockPlatform::new(Platform::YouTube);
//! let features = MockFeatureSource::new();
//!
//! spotify.add_playlist("seed", vec![fixtures::track("A", "X", "a1", Platform::Spotify)]).await;
//! features.add("a1", fixtures::features(0.8, 0.6, 0.7, -5.0)).await;
//! ```

mod mock_feature_source;
mod mock_platform;

pub use mock_feature_source::MockFeatureSource;
pub use mock_platform::{MockPlatform, RecordedPlatformCall, RecordedPlaylist};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::features::FeatureVector;
    use crate::platform::{Platform, Track};

    /// A track with a native id.
    pub fn track(title: &str, artist: &str, id: &str, platform: Platform) -> Track {
        Track::new(title, artist, Some(id.to_string()), platform)
    }

    /// A feature vector.
    pub fn features(energy: f64, valence: f64, danceability: f64, loudness: f64) -> FeatureVector {
        FeatureVector::new(energy, valence, danceability, loudness)
    }

    /// Share URL for a Spotify playlist id.
    pub fn spotify_url(id: &str) -> String {
        format!("https://open.spotify.com/playlist/{}", id)
    }

    /// Share URL for a YouTube Music playlist id.
    pub fn youtube_url(id: &str) -> String {
        format!("https://music.youtube.com/playlist?list={}", id)
    }
}
