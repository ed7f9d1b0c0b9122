//! The conversion pipeline.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::error::PipelineError;
use crate::matcher::{ConversionResult, TrackMatcher};
use crate::metrics::{CONVERSIONS_TOTAL, CONVERSION_DURATION};
use crate::platform::{NewPlaylist, Platform, PlatformClient, PlaylistRef};

/// Everything a conversion produced.
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub source: Platform,
    pub target: Platform,
    /// Id of the created playlist on the target platform.
    pub playlist_id: String,
    /// Canonical URL of the created playlist.
    pub url: String,
    /// Per-track match results, in source order.
    pub result: ConversionResult,
}

/// Moves playlists between the two supported platforms.
///
/// Holds one capability handle per platform. Handles are injected at
/// construction and shared read-only across invocations; nothing else
/// persists between calls.
pub struct ConversionPipeline {
    spotify: Arc<dyn PlatformClient>,
    youtube: Arc<dyn PlatformClient>,
    matcher: TrackMatcher,
    default_name: String,
}

impl ConversionPipeline {
    /// Create a pipeline over the given platform clients.
    pub fn new(spotify: Arc<dyn PlatformClient>, youtube: Arc<dyn PlatformClient>) -> Self {
        debug_assert_eq!(spotify.platform(), Platform::Spotify);
        debug_assert_eq!(youtube.platform(), Platform::YouTube);

        Self {
            spotify,
            youtube,
            matcher: TrackMatcher::new(),
            default_name: "Converted Playlist".to_string(),
        }
    }

    /// Name used when the caller does not supply one.
    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = name.into();
        self
    }

    /// The client for `platform`.
    pub fn client(&self, platform: Platform) -> &dyn PlatformClient {
        match platform {
            Platform::Spotify => self.spotify.as_ref(),
            Platform::YouTube => self.youtube.as_ref(),
        }
    }

    /// Convert the playlist at `source_ref` onto `target` and return the new
    /// playlist's URL.
    pub async fn convert(&self, source_ref: &str, target: Platform) -> Result<String, PipelineError> {
        Ok(self.convert_named(source_ref, target, None).await?.url)
    }

    /// Like [`convert`](Self::convert), with an optional playlist name and the
    /// full outcome.
    pub async fn convert_named(
        &self,
        source_ref: &str,
        target: Platform,
        name: Option<&str>,
    ) -> Result<ConversionOutcome, PipelineError> {
        let start = Instant::now();
        let result = self.run(source_ref, target, name).await;

        let source_label = PlaylistRef::parse(source_ref)
            .map(|r| r.platform.as_str())
            .unwrap_or("unknown");
        let result_label = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        CONVERSIONS_TOTAL
            .with_label_values(&[source_label, target.as_str(), result_label])
            .inc();
        CONVERSION_DURATION
            .with_label_values(&[target.as_str()])
            .observe(start.elapsed().as_secs_f64());

        result
    }

    async fn run(
        &self,
        source_ref: &str,
        target: Platform,
        name: Option<&str>,
    ) -> Result<ConversionOutcome, PipelineError> {
        let source = PlaylistRef::parse(source_ref)?;

        let tracks = self
            .client(source.platform)
            .read_playlist_tracks(&source)
            .await?;
        if tracks.is_empty() {
            return Err(PipelineError::EmptyPlaylist(source_ref.to_string()));
        }

        if source.platform == target {
            return Err(PipelineError::UnsupportedConversion {
                source_platform: source.platform,
                target,
            });
        }

        info!(
            source = %source.platform,
            target = %target,
            playlist = %source.id,
            tracks = tracks.len(),
            "Converting playlist"
        );

        let target_client = self.client(target);
        let result = self.matcher.match_tracks(&tracks, target_client).await?;
        let track_ids = result.matched_ids();

        if track_ids.is_empty() && !target_client.allows_empty_playlist() {
            return Err(PipelineError::NoMatchesFound {
                target,
                attempted: tracks.len(),
            });
        }

        if !result.diagnostics.is_empty() {
            warn!(
                target = %target,
                unmatched = result.diagnostics.len(),
                total = tracks.len(),
                "Some tracks could not be matched"
            );
        }

        let request = NewPlaylist {
            name: name.unwrap_or(&self.default_name).to_string(),
            description: format!("Converted from {}", source.platform.display_name()),
            track_ids,
        };
        let created = target_client.create_playlist(&request).await?;

        info!(
            target = %target,
            url = %created.url,
            matched = request.track_ids.len(),
            "Playlist converted"
        );

        Ok(ConversionOutcome {
            source: source.platform,
            target,
            playlist_id: created.id,
            url: created.url,
            result,
        })
    }
}
