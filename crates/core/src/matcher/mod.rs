//! Cross-platform track matching.
//!
//! Resolves each track of a source playlist to a native id on the target
//! platform with a single free-text search. Individual misses never abort the
//! batch; they are recorded as [`MatchDiagnostic`]s and logged.

mod track_matcher;
mod types;

pub use track_matcher::TrackMatcher;
pub use types::{ConversionResult, MatchDiagnostic, MatchEntry, MissReason};
