//! Sequential search-based track matcher.

use tracing::{debug, warn};

use super::{ConversionResult, MatchDiagnostic, MatchEntry, MissReason};
use crate::error::PipelineError;
use crate::metrics::TRACK_MATCHES;
use crate::platform::{PlatformClient, Track};

/// Matches tracks onto a target platform, one search per track.
///
/// Tracks are processed strictly in input order, one at a time.
#[derive(Debug, Clone, Default)]
pub struct TrackMatcher;

impl TrackMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Resolve every track to a native id on `target`.
    ///
    /// Always succeeds at the batch level; the only error is a malformed
    /// input track (blank title), reported before any search is issued.
    pub async fn match_tracks(
        &self,
        tracks: &[Track],
        target: &dyn PlatformClient,
    ) -> Result<ConversionResult, PipelineError> {
        validate_tracks(tracks)?;

        let mut result = ConversionResult {
            entries: Vec::with_capacity(tracks.len()),
            diagnostics: Vec::new(),
        };

        for track in tracks {
            let query = track.search_query();

            let outcome = match target.search_top_track(&query).await {
                Ok(Some(hit)) => hit.native_id.ok_or(MissReason::NoResult),
                Ok(None) => Err(MissReason::NoResult),
                Err(e) => Err(MissReason::SearchFailed(e.to_string())),
            };

            match outcome {
                Ok(id) => {
                    debug!(track = %track, target = %target.platform(), id = %id, "Matched track");
                    TRACK_MATCHES.with_label_values(&["matched"]).inc();
                    result.entries.push(MatchEntry {
                        source_track: track.clone(),
                        matched: true,
                        destination_native_id: Some(id),
                    });
                }
                Err(reason) => {
                    match &reason {
                        MissReason::NoResult => {
                            warn!(track = %track, target = %target.platform(), "No results found");
                            TRACK_MATCHES.with_label_values(&["no_result"]).inc();
                        }
                        MissReason::SearchFailed(e) => {
                            warn!(track = %track, target = %target.platform(), error = %e, "Search failed");
                            TRACK_MATCHES.with_label_values(&["error"]).inc();
                        }
                    }
                    result.diagnostics.push(MatchDiagnostic {
                        track: track.to_string(),
                        reason,
                    });
                    result.entries.push(MatchEntry {
                        source_track: track.clone(),
                        matched: false,
                        destination_native_id: None,
                    });
                }
            }
        }

        Ok(result)
    }
}

fn validate_tracks(tracks: &[Track]) -> Result<(), PipelineError> {
    for (index, track) in tracks.iter().enumerate() {
        if track.title.trim().is_empty() {
            return Err(PipelineError::InvalidTrack {
                index,
                reason: "missing title".to_string(),
            });
        }
    }
    Ok(())
}
