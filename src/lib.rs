//! Aozora Collector: catalog discovery and plain-text extraction
//!
//! This crate discovers works listed on a catalog index page, resolves each
//! work's author and archive location from its detail page, downloads the
//! archive and extracts the embedded plain-text document.

pub mod archive;
pub mod catalog;
pub mod config;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod url;

use thiserror::Error;

/// Run-level error type for Aozora Collector operations
///
/// Only failures that prevent a run from producing any entries surface here.
/// Per-entry failures are reported as [`EntryError`] inside an
/// [`pipeline::EntryOutcome`].
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to discover entries from {url}: {source}")]
    Discovery { url: String, source: FetchError },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Network fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

/// Archive container errors
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Malformed archive: {0}")]
    Malformed(String),

    #[error("No text member found in archive")]
    NoTextMember,
}

/// Per-entry failure, paired with its entry by the pipeline driver
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("Failed to fetch archive: {0}")]
    Fetch(#[from] FetchError),

    #[error("Malformed archive: {0}")]
    MalformedArchive(String),

    #[error("No text member found in archive")]
    NoTextMember,

    #[error("No archive available{}", resolution_suffix(.resolution_error))]
    UnresolvedArchive { resolution_error: Option<String> },
}

fn resolution_suffix(resolution_error: &Option<String>) -> String {
    match resolution_error {
        Some(reason) => format!(" (resolution failed: {})", reason),
        None => String::new(),
    }
}

impl From<ArchiveError> for EntryError {
    fn from(err: ArchiveError) -> Self {
        match err {
            ArchiveError::Malformed(message) => EntryError::MalformedArchive(message),
            ArchiveError::NoTextMember => EntryError::NoTextMember,
        }
    }
}

impl EntryError {
    /// Returns true for outcomes that are expected in normal catalog data
    ///
    /// A missing archive or an archive that only bundles formatted variants
    /// is not a system fault.
    pub fn is_benign(&self) -> bool {
        matches!(
            self,
            EntryError::NoTextMember | EntryError::UnresolvedArchive { .. }
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for run-level operations
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{CardLink, Entry, Resolution};
pub use config::Config;
pub use fetch::{Fetch, HttpFetcher};
pub use pipeline::{EntryOutcome, Pipeline, RunSummary, StopHandle};
