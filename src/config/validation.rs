use crate::config::types::{Config, CrawlerConfig, MarkupSchema, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    validate_schema(&config.schema)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_starting_url(&config.starting_url)?;

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// The starting URL doubles as the base origin, so it needs a scheme and host
fn validate_starting_url(starting_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(starting_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid starting URL '{}': {}", starting_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Starting URL '{}' must use HTTP or HTTPS",
            starting_url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Starting URL '{}' has no host",
            starting_url
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.download_dir.is_empty() {
        return Err(ConfigError::Validation(
            "download_dir cannot be empty".to_string(),
        ));
    }

    if matches!(config.data_path.as_deref(), Some("")) {
        return Err(ConfigError::Validation(
            "data_path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

/// Class names are matched as single tokens
fn validate_schema(schema: &MarkupSchema) -> Result<(), ConfigError> {
    for (key, class) in schema.entries() {
        if class.is_empty() {
            return Err(ConfigError::Validation(format!(
                "schema.{} cannot be empty",
                key
            )));
        }

        if class.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "schema.{} must be a single class name, got '{}'",
                key, class
            )));
        }
    }

    Ok(())
}
