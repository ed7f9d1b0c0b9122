//! Match result types.

use serde::{Deserialize, Serialize};

use crate::platform::Track;

/// Outcome for one source track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEntry {
    pub source_track: Track,
    pub matched: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_native_id: Option<String>,
}

/// Why a track did not match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail", rename_all = "snake_case")]
pub enum MissReason {
    /// The search returned nothing.
    NoResult,
    /// The search call itself failed.
    SearchFailed(String),
}

/// Caller-visible record of a non-match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDiagnostic {
    /// Human-readable track description.
    pub track: String,
    pub reason: MissReason,
}

/// Ordered result of matching a batch of tracks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// One entry per input track, in input order.
    pub entries: Vec<MatchEntry>,
    /// One diagnostic per non-match, in input order.
    pub diagnostics: Vec<MatchDiagnostic>,
}

impl ConversionResult {
    /// Destination ids of matched tracks, in source order.
    pub fn matched_ids(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|e| e.destination_native_id.clone())
            .collect()
    }

    pub fn matched_count(&self) -> usize {
        self.entries.iter().filter(|e| e.matched).count()
    }

    pub fn unmatched_count(&self) -> usize {
        self.entries.len() - self.matched_count()
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &MatchEntry> {
        self.entries.iter().filter(|e| !e.matched)
    }
}
