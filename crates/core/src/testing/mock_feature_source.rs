//! Mock feature source for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::features::{FeatureSource, FeatureTable, FeatureTableError, FeatureVector};

/// Mock implementation of the FeatureSource trait.
///
/// Serves a fixed in-memory table and counts loads.
#[derive(Debug, Clone, Default)]
pub struct MockFeatureSource {
    table: Arc<RwLock<FeatureTable>>,
    loads: Arc<AtomicUsize>,
    next_error: Arc<RwLock<Option<FeatureTableError>>>,
}

impl MockFeatureSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the features for one track id.
    pub async fn add(&self, id: &str, features: FeatureVector) {
        self.table.write().await.insert(id, features);
    }

    /// Configure the next load to fail with the given error.
    pub async fn set_next_error(&self, error: FeatureTableError) {
        *self.next_error.write().await = Some(error);
    }

    /// How many times the table was loaded.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeatureSource for MockFeatureSource {
    async fn load_feature_table(&self) -> Result<FeatureTable, FeatureTableError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }
        Ok(self.table.read().await.clone())
    }
}
