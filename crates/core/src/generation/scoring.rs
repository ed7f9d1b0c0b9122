//! Scoring seed tracks against a target profile.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::criteria::Criteria;
use crate::features::{FeatureTable, FeatureVector};
use crate::platform::Track;
use crate::ranking::RankedQueue;

/// The four-dimensional point a generation aims for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetProfile {
    pub energy: f64,
    pub valence: f64,
    pub danceability: f64,
    pub loudness: f64,
}

impl TargetProfile {
    /// Derive the target from caller criteria.
    pub fn from_criteria(criteria: &Criteria) -> Self {
        Self {
            energy: criteria.target_energy,
            valence: criteria.target_valence,
            danceability: criteria.environment.target_danceability(),
            loudness: criteria.activity.target_loudness(),
        }
    }

    /// Unweighted L1 distance. Loudness is in dB and dominates the other
    /// dimensions, which are all in `[0, 1]`.
    pub fn distance(&self, features: &FeatureVector) -> f64 {
        (features.energy - self.energy).abs()
            + (features.valence - self.valence).abs()
            + (features.loudness - self.loudness).abs()
            + (features.danceability - self.danceability).abs()
    }
}

/// A selected track and how far it is from the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTrack {
    pub track: Track,
    pub distance: f64,
}

/// Result of ranking a seed list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    /// Closest first, at most `amount` long.
    pub selected: Vec<ScoredTrack>,
    /// Tracks that had features and were scored.
    pub scored: usize,
    /// Tracks skipped because no features were known for them.
    pub skipped: usize,
}

/// Score `seeds` and keep the `amount` closest to `target`.
///
/// Tracks without a native id or without an entry in `table` are skipped,
/// never scored as worst-case. Equal distances keep seed order.
pub fn rank_tracks(
    seeds: &[Track],
    table: &FeatureTable,
    target: &TargetProfile,
    amount: usize,
) -> Ranking {
    let mut queue = RankedQueue::with_capacity(seeds.len());
    let mut skipped = 0;

    for track in seeds {
        let features = track.native_id.as_deref().and_then(|id| table.get(id));
        match features {
            Some(features) => {
                let distance = target.distance(features);
                debug!(track = %track, distance, "Scored track");
                // The queue pops the highest priority first.
                queue.insert(track, -distance);
            }
            None => {
                debug!(track = %track, "No features, skipping");
                skipped += 1;
            }
        }
    }

    let scored = queue.len();
    let selected = queue
        .take_top(amount)
        .into_iter()
        .map(|(priority, track)| ScoredTrack {
            track: track.clone(),
            distance: -priority,
        })
        .collect();

    Ranking {
        selected,
        scored,
        skipped,
    }
}
