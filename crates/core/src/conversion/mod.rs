//! Cross-platform playlist conversion.
//!
//! ```text
//! reference ──parse──▶ source platform ──read──▶ tracks
//!                                                  │
//!                               TrackMatcher (target search, in order)
//!                                                  │
//!                 target platform ◀──create── matched ids ──▶ URL
//! ```

mod pipeline;

pub use pipeline::{ConversionOutcome, ConversionPipeline};
