//! Catalog module for Aozora Collector
//!
//! This module turns a catalog index page into a list of resolved entries:
//! - [`CatalogCrawler`] scans the index and derives canonical detail pages
//! - [`EntryResolver`] reads author and archive location from each detail page
//! - [`Entry`] holds the result for one work

mod crawler;
mod entry;
mod resolver;

pub use crawler::{CatalogCrawler, CatalogLink};
pub use entry::{CardLink, Entry, ResolvedDetail, Resolution};
pub use resolver::{EntryResolver, ARCHIVE_SUFFIX};

use crate::config::CatalogConfig;
use crate::fetch::Fetch;
use crate::CollectorError;
use scraper::Selector;

/// Discovers entries from `index_url` using the given fetcher
///
/// # Example
///
/// ```no_run
/// use aozora_collector::catalog::discover_entries;
/// use aozora_collector::config::{CatalogConfig, HttpConfig};
/// use aozora_collector::HttpFetcher;
///
/// # async fn example() -> aozora_collector::Result<()> {
/// let fetcher = HttpFetcher::new(&HttpConfig::default())?;
/// let config = CatalogConfig::default();
/// let entries = discover_entries(&fetcher, &config, &config.index_url).await?;
/// for entry in &entries {
///     println!("{}", entry);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn discover_entries<F: Fetch + ?Sized>(
    fetcher: &F,
    config: &CatalogConfig,
    index_url: &str,
) -> Result<Vec<Entry>, CollectorError> {
    CatalogCrawler::new(fetcher, config)?
        .discover_entries(index_url)
        .await
}

/// Parses a CSS selector, reporting failures as [`CollectorError::Selector`]
pub(crate) fn parse_selector(selector: &str) -> Result<Selector, CollectorError> {
    Selector::parse(selector).map_err(|e| CollectorError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
