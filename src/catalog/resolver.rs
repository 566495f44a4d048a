//! Detail-page resolution
//!
//! A work's detail page carries the author table and the download table.
//! The resolver reads the author name from the former and the first archive
//! link from the latter.

use crate::catalog::entry::ResolvedDetail;
use crate::catalog::parse_selector;
use crate::fetch::Fetch;
use crate::url::resolve_archive_href;
use crate::{CollectorError, FetchError};
use scraper::{Html, Selector};

/// Cell holding the author name: second cell of the second row of the author table
const AUTHOR_SELECTOR: &str = "table[summary='作家データ'] tr:nth-child(2) td:nth-child(2)";

/// Links inside the download table
const DOWNLOAD_LINK_SELECTOR: &str = "table.download a";

/// Suffix identifying archive links, matched case-sensitively
pub const ARCHIVE_SUFFIX: &str = ".zip";

/// Resolves author names and archive locations from detail pages
pub struct EntryResolver<'a, F: Fetch + ?Sized> {
    fetcher: &'a F,
    author_selector: Selector,
    download_selector: Selector,
}

impl<'a, F: Fetch + ?Sized> EntryResolver<'a, F> {
    pub fn new(fetcher: &'a F) -> Result<Self, CollectorError> {
        Ok(Self {
            fetcher,
            author_selector: parse_selector(AUTHOR_SELECTOR)?,
            download_selector: parse_selector(DOWNLOAD_LINK_SELECTOR)?,
        })
    }

    /// Fetches the detail page and extracts author and archive location
    ///
    /// A page without the author table yields an empty author; a page without
    /// an archive link yields no archive location. Only a failed fetch is an
    /// error, so callers can tell "no archive exists" apart from "the page
    /// could not be read".
    pub async fn resolve(&self, detail_url: &str) -> Result<ResolvedDetail, FetchError> {
        let page = self.fetcher.fetch_page(detail_url).await?;
        Ok(self.parse_detail_page(&page, detail_url))
    }

    /// Extracts author and archive location from detail-page HTML
    pub fn parse_detail_page(&self, html: &str, detail_url: &str) -> ResolvedDetail {
        let document = Html::parse_document(html);

        let author = document
            .select(&self.author_selector)
            .next()
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        if author.is_empty() {
            tracing::debug!("No author found on {}", detail_url);
        }

        let archive_location = self
            .find_archive_href(&document)
            .and_then(|href| match resolve_archive_href(detail_url, href) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::warn!(
                        "Cannot resolve archive link '{}' against {}: {}",
                        href,
                        detail_url,
                        e
                    );
                    None
                }
            });

        ResolvedDetail {
            author,
            archive_location,
        }
    }

    /// Returns the first download-table href ending in the archive suffix
    fn find_archive_href<'d>(&self, document: &'d Html) -> Option<&'d str> {
        document
            .select(&self.download_selector)
            .filter_map(|anchor| anchor.value().attr("href"))
            .map(str::trim)
            .find(|href| href.ends_with(ARCHIVE_SUFFIX))
    }
}
