use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Timeouts are not 0
/// - Default playlist names are not blank
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.spotify.timeout_secs == 0 || config.youtube.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.defaults.converted_playlist_name.trim().is_empty()
        || config.defaults.generated_playlist_name.trim().is_empty()
    {
        return Err(ConfigError::ValidationError(
            "default playlist names cannot be blank".to_string(),
        ));
    }

    Ok(())
}
