//! Audio feature reference table.
//!
//! Generation scores seed tracks against a read-only table mapping Spotify
//! track ids to [`FeatureVector`]s. The table is bulk-loaded once per request
//! through a [`FeatureSource`].

mod csv_source;
mod types;

pub use csv_source::CsvFeatureSource;
pub use types::{FeatureTable, FeatureVector};

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while loading the feature table.
#[derive(Debug, Error)]
pub enum FeatureTableError {
    /// The dataset file does not exist.
    #[error("Feature dataset not found: {0}")]
    NotFound(String),

    /// The dataset lacks a required column.
    #[error("Feature dataset is missing column '{0}'")]
    MissingColumn(&'static str),

    /// Reading the dataset failed.
    #[error("Failed to read feature dataset: {0}")]
    ReadError(String),
}

/// Anything that can produce the feature reference table.
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Load the whole table. Called once per generation request.
    async fn load_feature_table(&self) -> Result<FeatureTable, FeatureTableError>;
}
