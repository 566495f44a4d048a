//! Pipeline module for Aozora Collector
//!
//! This module ties the stages together:
//! - Catalog discovery (index page and detail pages)
//! - Archive download
//! - Text extraction
//!
//! Entries are processed one after another and each one is reported on its
//! own; only a failed discovery ends a run early.

mod driver;

pub use driver::{EntryOutcome, Pipeline, RunSummary, StopHandle};
