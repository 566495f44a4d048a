//! URL handling module for Aozora Collector
//!
//! Archive links on detail pages are either absolute or relative to the
//! page's directory. This module turns both into absolute URLs.

mod join;

pub use join::{clean_path, is_absolute, join_to_parent_dir, parent_dir, resolve_archive_href};
