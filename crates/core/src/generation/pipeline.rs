//! The generation pipeline.

use std::sync::Arc;

use tracing::info;

use super::criteria::Criteria;
use super::scoring::{rank_tracks, ScoredTrack, TargetProfile};
use crate::conversion::ConversionPipeline;
use crate::error::PipelineError;
use crate::features::FeatureSource;
use crate::metrics::{GENERATIONS_TOTAL, SELECTED_DISTANCE};
use crate::platform::{NewPlaylist, Platform, PlaylistRef, Track};

/// Everything a generation produced.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Selected tracks, closest first.
    pub selected: Vec<ScoredTrack>,
    /// Seed tracks that had features.
    pub scored: usize,
    /// Seed tracks skipped for missing features.
    pub skipped: usize,
    /// Platform the final playlist lives on.
    pub platform: Platform,
    /// Canonical URL of the final playlist.
    pub url: String,
}

/// Builds new playlists from a seed playlist and mood criteria.
pub struct GenerationPipeline {
    converter: Arc<ConversionPipeline>,
    features: Arc<dyn FeatureSource>,
    reference_platform: Platform,
    default_name: String,
}

impl GenerationPipeline {
    /// The feature table is keyed by Spotify track ids, so seeds are scored
    /// on Spotify.
    pub fn new(converter: Arc<ConversionPipeline>, features: Arc<dyn FeatureSource>) -> Self {
        Self {
            converter,
            features,
            reference_platform: Platform::Spotify,
            default_name: "Generated Playlist".to_string(),
        }
    }

    /// Name used when the caller does not supply one.
    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = name.into();
        self
    }

    /// Generate a playlist and return its URL on `target_platform`.
    pub async fn generate(
        &self,
        seed_ref: &str,
        seed_platform: Platform,
        target_platform: Platform,
        criteria: &Criteria,
        playlist_name: Option<&str>,
    ) -> Result<String, PipelineError> {
        Ok(self
            .generate_detailed(seed_ref, seed_platform, target_platform, criteria, playlist_name)
            .await?
            .url)
    }

    /// Like [`generate`](Self::generate), returning the full outcome.
    pub async fn generate_detailed(
        &self,
        seed_ref: &str,
        seed_platform: Platform,
        target_platform: Platform,
        criteria: &Criteria,
        playlist_name: Option<&str>,
    ) -> Result<GenerationOutcome, PipelineError> {
        let result = self
            .run(seed_ref, seed_platform, target_platform, criteria, playlist_name)
            .await;

        let result_label = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        GENERATIONS_TOTAL
            .with_label_values(&[target_platform.as_str(), result_label])
            .inc();

        result
    }

    async fn run(
        &self,
        seed_ref: &str,
        seed_platform: Platform,
        target_platform: Platform,
        criteria: &Criteria,
        playlist_name: Option<&str>,
    ) -> Result<GenerationOutcome, PipelineError> {
        criteria.validate()?;

        let seed = PlaylistRef::parse(seed_ref)?;
        if seed.platform != seed_platform {
            return Err(PipelineError::UnrecognizedReference(format!(
                "{} (not a {} playlist)",
                seed_ref, seed_platform
            )));
        }

        let name = playlist_name.unwrap_or(&self.default_name);
        let seeds = self.seed_tracks(seed_ref, &seed).await?;

        let table = self.features.load_feature_table().await?;
        let target = TargetProfile::from_criteria(criteria);
        let ranking = rank_tracks(&seeds, &table, &target, criteria.amount);

        if ranking.selected.is_empty() {
            return Err(PipelineError::NoScorableTracks {
                seed_tracks: seeds.len(),
            });
        }

        info!(
            seeds = seeds.len(),
            scored = ranking.scored,
            skipped = ranking.skipped,
            selected = ranking.selected.len(),
            "Ranked seed tracks"
        );
        for scored in &ranking.selected {
            SELECTED_DISTANCE.observe(scored.distance);
        }

        let reference = self.converter.client(self.reference_platform);
        let request = NewPlaylist {
            name: name.to_string(),
            description: "Generated by MoodTune".to_string(),
            track_ids: ranking
                .selected
                .iter()
                .filter_map(|s| s.track.native_id.clone())
                .collect(),
        };
        let created = reference.create_playlist(&request).await?;

        let url = if target_platform == self.reference_platform {
            created.url
        } else {
            self.converter
                .convert_named(&created.url, target_platform, Some(name))
                .await?
                .url
        };

        info!(target = %target_platform, url = %url, "Playlist generated");

        Ok(GenerationOutcome {
            selected: ranking.selected,
            scored: ranking.scored,
            skipped: ranking.skipped,
            platform: target_platform,
            url,
        })
    }

    /// The seed track list on the reference platform.
    async fn seed_tracks(
        &self,
        seed_ref: &str,
        seed: &PlaylistRef,
    ) -> Result<Vec<Track>, PipelineError> {
        let reference = self.converter.client(self.reference_platform);

        let tracks = if seed.platform == self.reference_platform {
            reference.read_playlist_tracks(seed).await?
        } else {
            info!(
                from = %seed.platform,
                to = %self.reference_platform,
                "Normalizing seed playlist"
            );
            let converted = self
                .converter
                .convert_named(seed_ref, self.reference_platform, None)
                .await?;
            let normalized = PlaylistRef::new(self.reference_platform, converted.playlist_id);
            reference.read_playlist_tracks(&normalized).await?
        };

        if tracks.is_empty() {
            return Err(PipelineError::EmptyPlaylist(seed_ref.to_string()));
        }
        Ok(tracks)
    }
}
