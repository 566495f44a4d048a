//! Configuration module for Aozora Collector
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional, so an empty file (or no file at all) yields the
//! catalog defaults.
//!
//! # Example
//!
//! ```no_run
//! use aozora_collector::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("collector.toml")).unwrap();
//! println!("Request timeout: {}s", config.http.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ArchiveConfig, CatalogConfig, Config, HttpConfig, DEFAULT_INDEX_URL, DEFAULT_SITE_ROOT,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::validate;
