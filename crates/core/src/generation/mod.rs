//! Mood-driven playlist generation.
//!
//! A seed playlist is normalized onto Spotify (the platform the feature table
//! is keyed by), every seed track with known features is scored against a
//! target profile derived from the caller's [`Criteria`], and the closest
//! tracks become a new playlist on the requested platform.

mod criteria;
mod pipeline;
mod scoring;

pub use criteria::{Activity, Criteria, Environment};
pub use pipeline::{GenerationOutcome, GenerationPipeline};
pub use scoring::{rank_tracks, Ranking, ScoredTrack, TargetProfile};
