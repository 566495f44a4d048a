//! Archive module for Aozora Collector
//!
//! Works are distributed as ZIP archives that bundle a plain-text rendition,
//! sometimes next to formatted variants. This module pulls out the text.

mod extractor;

pub use extractor::{extract_text, TextExtractor};
