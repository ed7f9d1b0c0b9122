//! Feature vector and table types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The four-dimensional descriptor used for similarity scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// 0.0 to 1.0
    pub energy: f64,
    /// 0.0 to 1.0
    pub valence: f64,
    /// 0.0 to 1.0
    pub danceability: f64,
    /// dB, typically negative
    pub loudness: f64,
}

impl FeatureVector {
    pub fn new(energy: f64, valence: f64, danceability: f64, loudness: f64) -> Self {
        Self {
            energy,
            valence,
            danceability,
            loudness,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.energy.is_finite()
            && self.valence.is_finite()
            && self.danceability.is_finite()
            && self.loudness.is_finite()
    }
}

/// Native track id → feature vector.
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    features: HashMap<String, FeatureVector>,
}

impl FeatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, features: FeatureVector) {
        self.features.insert(id.into(), features);
    }

    pub fn get(&self, id: &str) -> Option<&FeatureVector> {
        self.features.get(id)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, FeatureVector)> for FeatureTable {
    fn from_iter<I: IntoIterator<Item = (S, FeatureVector)>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().map(|(id, f)| (id.into(), f)).collect(),
        }
    }
}
