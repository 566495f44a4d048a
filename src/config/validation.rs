use crate::config::types::{ArchiveConfig, CatalogConfig, Config, HttpConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalog_config(&config.catalog)?;
    validate_http_config(&config.http)?;
    validate_archive_config(&config.archive)?;
    Ok(())
}

/// Validates catalog configuration
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    validate_http_url("index-url", &config.index_url)?;
    validate_http_url("site-root", &config.site_root)?;

    if Selector::parse(&config.link_selector).is_err() {
        return Err(ConfigError::Validation(format!(
            "link-selector '{}' is not a valid CSS selector",
            config.link_selector
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates archive extraction configuration
fn validate_archive_config(config: &ArchiveConfig) -> Result<(), ConfigError> {
    if config.text_extensions.is_empty() {
        return Err(ConfigError::Validation(
            "text-extensions must list at least one extension".to_string(),
        ));
    }

    for ext in &config.text_extensions {
        if !ext.starts_with('.') || ext.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "text extension '{}' must start with '.' followed by a name",
                ext
            )));
        }
    }

    if encoding_rs::Encoding::for_label(config.fallback_encoding.as_bytes()).is_none() {
        return Err(ConfigError::Validation(format!(
            "Unknown fallback-encoding '{}'",
            config.fallback_encoding
        )));
    }

    Ok(())
}

/// Validates that a configured value is an absolute HTTP(S) URL
fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use HTTP or HTTPS",
            key, value
        )));
    }

    Ok(())
}
