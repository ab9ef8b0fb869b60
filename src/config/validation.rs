use crate::config::types::{Config, HarvestConfig, MetadataConfig, OutputConfig, StorageConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_storage_config(&config.storage)?;
    validate_metadata_config(&config.metadata)?;
    validate_harvest_config(&config.harvest)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the remote storage configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    validate_https_url("shared-link-url", &config.shared_link_url)?;
    validate_base_url("api-base-url", &config.api_base_url)?;
    validate_base_url("content-base-url", &config.content_base_url)?;

    if let Some(token) = &config.access_token {
        if token.is_empty() {
            return Err(ConfigError::Validation(
                "access-token must not be empty when set; omit the key instead".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates the metadata endpoint configuration
fn validate_metadata_config(config: &MetadataConfig) -> Result<(), ConfigError> {
    validate_https_url("problems-url", &config.problems_url)
}

/// Validates crawl policy entries
fn validate_harvest_config(config: &HarvestConfig) -> Result<(), ConfigError> {
    for name in &config.skip {
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "skip entries cannot be empty".to_string(),
            ));
        }

        // Skip entries are matched against top-level folder names; a path
        // separator means the entry can never match.
        if name.contains('/') {
            return Err(ConfigError::Validation(format!(
                "skip entry '{}' must be a bare contest folder name",
                name
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_https_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", key, e)))?;

    if url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use HTTPS scheme",
            key, value
        )));
    }

    Ok(())
}

/// Base endpoint URLs may be plain HTTP so tests can point at a local mock
/// server.
fn validate_base_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", key, e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use an HTTP(S) scheme",
            key, value
        )));
    }

    Ok(())
}
