//! Catalog index crawling
//!
//! The index page lists works as anchors. Every anchor whose href has the
//! detail-page shape becomes one [`Entry`], resolved through its detail page
//! before the next anchor is looked at.

use crate::catalog::entry::{CardLink, Entry};
use crate::catalog::parse_selector;
use crate::catalog::resolver::EntryResolver;
use crate::config::CatalogConfig;
use crate::fetch::Fetch;
use crate::CollectorError;
use scraper::{Html, Selector};

/// A catalog anchor that matched the detail-page pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLink {
    pub card: CardLink,
    pub title: String,
}

/// Discovers entries from a catalog index page
pub struct CatalogCrawler<'a, F: Fetch + ?Sized> {
    fetcher: &'a F,
    resolver: EntryResolver<'a, F>,
    link_selector: Selector,
    site_root: String,
}

impl<'a, F: Fetch + ?Sized> CatalogCrawler<'a, F> {
    /// Creates a crawler using the catalog configuration
    ///
    /// # Returns
    ///
    /// * `Ok(CatalogCrawler)` - Ready to discover entries
    /// * `Err(CollectorError::Selector)` - The configured link selector is invalid
    pub fn new(fetcher: &'a F, config: &CatalogConfig) -> Result<Self, CollectorError> {
        Ok(Self {
            fetcher,
            resolver: EntryResolver::new(fetcher)?,
            link_selector: parse_selector(&config.link_selector)?,
            site_root: config.site_root.clone(),
        })
    }

    /// Fetches the index page and resolves every matching work
    ///
    /// Entries come back in the order their links appear on the page. A work
    /// whose detail page cannot be fetched is still returned, with empty
    /// author and archive and a failed [`crate::Resolution`].
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Entry>)` - All matching works
    /// * `Err(CollectorError::Discovery)` - The index page could not be fetched
    pub async fn discover_entries(&self, index_url: &str) -> Result<Vec<Entry>, CollectorError> {
        tracing::info!("Fetching catalog index {}", index_url);

        let page = self
            .fetcher
            .fetch_page(index_url)
            .await
            .map_err(|source| CollectorError::Discovery {
                url: index_url.to_string(),
                source,
            })?;

        let links = self.scan_links(&page);
        tracing::info!("Found {} work links on {}", links.len(), index_url);

        let mut entries = Vec::with_capacity(links.len());
        for link in links {
            let detail_url = link.card.detail_url(&self.site_root);

            let entry = match self.resolver.resolve(&detail_url).await {
                Ok(detail) => Entry::resolved(link.card, link.title, detail_url, detail),
                Err(e) => {
                    tracing::warn!("Failed to resolve {}: {}", detail_url, e);
                    Entry::unresolved(link.card, link.title, detail_url, e.to_string())
                }
            };

            tracing::debug!("Discovered {}", entry);
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Returns the catalog anchors that match the detail-page pattern, in page order
    pub fn scan_links(&self, html: &str) -> Vec<CatalogLink> {
        let document = Html::parse_document(html);

        document
            .select(&self.link_selector)
            .filter_map(|anchor| {
                let href = anchor.value().attr("href").unwrap_or("");
                match CardLink::parse(href.trim()) {
                    Some(card) => Some(CatalogLink {
                        card,
                        title: anchor.text().collect::<String>().trim().to_string(),
                    }),
                    None => {
                        tracing::debug!("Skipping non-work link '{}'", href);
                        None
                    }
                }
            })
            .collect()
    }
}
