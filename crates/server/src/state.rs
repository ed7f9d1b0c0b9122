use std::sync::Arc;

use moodtune_core::{Config, ConversionPipeline, GenerationPipeline, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    conversion: Arc<ConversionPipeline>,
    generation: GenerationPipeline,
}

impl AppState {
    pub fn new(
        config: Config,
        conversion: Arc<ConversionPipeline>,
        generation: GenerationPipeline,
    ) -> Self {
        Self {
            config,
            conversion,
            generation,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn conversion(&self) -> &ConversionPipeline {
        &self.conversion
    }

    pub fn generation(&self) -> &GenerationPipeline {
        &self.generation
    }
}
