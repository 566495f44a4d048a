//! Pipeline driver - the discovery → fetch → extract run
//!
//! The driver calls the catalog crawler once, then walks the entries in
//! order. Every entry produces exactly one [`EntryOutcome`]; no per-entry
//! failure ends the run.

use crate::archive::TextExtractor;
use crate::catalog::{CatalogCrawler, Entry, Resolution};
use crate::config::Config;
use crate::fetch::{Fetch, HttpFetcher};
use crate::{CollectorError, EntryError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of processing one entry
#[derive(Debug)]
pub struct EntryOutcome {
    pub entry: Entry,
    pub result: Result<String, EntryError>,
}

impl EntryOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Counters for one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Entries returned by discovery
    pub discovered: usize,
    /// Entries whose text was extracted
    pub extracted: usize,
    /// Entries whose archive could not be fetched
    pub fetch_failed: usize,
    /// Entries whose archive was not a readable container
    pub malformed_archive: usize,
    /// Entries whose archive held no text member
    pub no_text_member: usize,
    /// Entries without an archive location
    pub unresolved_archive: usize,
    /// Whether the run was stopped before every entry was processed
    pub stopped: bool,
}

impl RunSummary {
    /// Number of entries that produced an outcome
    pub fn processed(&self) -> usize {
        self.extracted
            + self.fetch_failed
            + self.malformed_archive
            + self.no_text_member
            + self.unresolved_archive
    }

    /// Number of entries that failed for any reason
    pub fn failed(&self) -> usize {
        self.processed() - self.extracted
    }

    fn record(&mut self, result: &Result<String, EntryError>) {
        match result {
            Ok(_) => self.extracted += 1,
            Err(EntryError::Fetch(_)) => self.fetch_failed += 1,
            Err(EntryError::MalformedArchive(_)) => self.malformed_archive += 1,
            Err(EntryError::NoTextMember) => self.no_text_member += 1,
            Err(EntryError::UnresolvedArchive { .. }) => self.unresolved_archive += 1,
        }
    }
}

/// Shared flag that stops a run before its next entry
///
/// Clones share the same flag. Stopping never interrupts the entry being
/// processed.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a stop
    ///
    /// Returns `true` for the first request and `false` if a stop was
    /// already pending.
    pub fn stop(&self) -> bool {
        !self.stopped.swap(true, Ordering::SeqCst)
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Sequential discovery, fetch and extraction over one catalog
pub struct Pipeline<F: Fetch> {
    config: Config,
    fetcher: F,
    extractor: TextExtractor,
    stop: StopHandle,
}

impl Pipeline<HttpFetcher> {
    /// Creates a pipeline that fetches over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Pipeline)` - Ready to run
    /// * `Err(CollectorError::HttpClient)` - Failed to build the HTTP client
    pub fn from_config(config: Config) -> Result<Self, CollectorError> {
        let fetcher = HttpFetcher::new(&config.http)?;
        Ok(Self::new(config, fetcher))
    }
}

impl<F: Fetch> Pipeline<F> {
    /// Creates a pipeline with an injected fetcher
    pub fn new(config: Config, fetcher: F) -> Self {
        let extractor = TextExtractor::new(&config.archive);
        Self {
            config,
            fetcher,
            extractor,
            stop: StopHandle::new(),
        }
    }

    /// Returns a handle that stops the run before its next entry
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Discovers the entries listed on `index_url` without fetching archives
    pub async fn discover(&self, index_url: &str) -> Result<Vec<Entry>, CollectorError> {
        CatalogCrawler::new(&self.fetcher, &self.config.catalog)?
            .discover_entries(index_url)
            .await
    }

    /// Runs the whole pipeline, handing each outcome to `on_outcome` in entry order
    ///
    /// # Returns
    ///
    /// * `Ok(RunSummary)` - Discovery succeeded; every processed entry was reported
    /// * `Err(CollectorError)` - Discovery failed and nothing was processed
    pub async fn run<C>(
        &self,
        index_url: &str,
        mut on_outcome: C,
    ) -> Result<RunSummary, CollectorError>
    where
        C: FnMut(EntryOutcome),
    {
        let entries = self.discover(index_url).await?;

        let mut summary = RunSummary {
            discovered: entries.len(),
            ..RunSummary::default()
        };

        tracing::info!("Processing {} entries", entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            if self.stop.is_stopped() {
                tracing::warn!(
                    "Run stopped, {} entries not processed",
                    summary.discovered - index
                );
                summary.stopped = true;
                break;
            }

            let result = self.process_entry(&entry).await;
            match &result {
                Ok(text) => tracing::info!(
                    "Extracted {} characters for {} ({})",
                    text.chars().count(),
                    entry.title(),
                    entry.detail_page_location()
                ),
                Err(e) if e.is_benign() => tracing::info!(
                    "Skipped {} ({}): {}",
                    entry.title(),
                    entry.detail_page_location(),
                    e
                ),
                Err(e) => tracing::warn!(
                    "Failed {} ({}): {}",
                    entry.title(),
                    entry.detail_page_location(),
                    e
                ),
            }

            summary.record(&result);
            on_outcome(EntryOutcome { entry, result });
        }

        Ok(summary)
    }

    /// Runs the pipeline and collects every outcome
    pub async fn collect(&self, index_url: &str) -> Result<Vec<EntryOutcome>, CollectorError> {
        let mut outcomes = Vec::new();
        self.run(index_url, |outcome| outcomes.push(outcome)).await?;
        Ok(outcomes)
    }

    /// Fetches and extracts one entry's archive
    ///
    /// Entries without an archive location fail without a network attempt.
    pub async fn process_entry(&self, entry: &Entry) -> Result<String, EntryError> {
        let Some(archive_url) = entry.archive_location() else {
            let resolution_error = match entry.resolution() {
                Resolution::Failed { reason } => Some(reason.clone()),
                Resolution::Resolved => None,
            };
            return Err(EntryError::UnresolvedArchive { resolution_error });
        };

        let bytes = self.fetcher.fetch_bytes(archive_url).await?;
        tracing::debug!("Fetched {} bytes from {}", bytes.len(), archive_url);

        Ok(self.extractor.extract_text(&bytes)?)
    }
}
