use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Catalog section exists (enforced by serde) and carries a token
/// - Catalog request timeout is positive
/// - Server port is not 0
/// - Debounce delay, trending limit and queue size are positive
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.catalog.api_token.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "catalog.api_token is required".to_string(),
        ));
    }

    if config.catalog.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.timeout_secs must be greater than 0".to_string(),
        ));
    }

    if config.search.debounce_ms == 0 {
        return Err(ConfigError::ValidationError(
            "search.debounce_ms must be greater than 0".to_string(),
        ));
    }

    if config.trending.limit == 0 {
        return Err(ConfigError::ValidationError(
            "trending.limit must be at least 1".to_string(),
        ));
    }

    if config.trending.queue_size == 0 {
        return Err(ConfigError::ValidationError(
            "trending.queue_size must be at least 1".to_string(),
        ));
    }

    Ok(())
}
