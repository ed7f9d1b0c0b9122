pub mod config;
pub mod conversion;
pub mod error;
pub mod features;
pub mod generation;
pub mod matcher;
pub mod metrics;
pub mod platform;
pub mod ranking;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, FeaturesConfig,
    PlaylistDefaults, SanitizedConfig, ServerConfig, SpotifyConfig, YouTubeConfig,
};
pub use conversion::{ConversionOutcome, ConversionPipeline};
pub use error::PipelineError;
pub use features::{CsvFeatureSource, FeatureSource, FeatureTable, FeatureTableError, FeatureVector};
pub use generation::{
    Activity, Criteria, Environment, GenerationOutcome, GenerationPipeline, ScoredTrack,
    TargetProfile,
};
pub use matcher::{ConversionResult, MatchDiagnostic, MatchEntry, MissReason, TrackMatcher};
pub use platform::{
    CreatedPlaylist, NewPlaylist, Platform, PlatformClient, PlatformError, PlaylistRef,
    SpotifyClient, Track, YouTubeClient,
};
pub use ranking::{MaxHeap, RankedQueue};
