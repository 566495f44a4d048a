//! Output module for Aozora Collector
//!
//! Presentation of pipeline results on the terminal: one block per
//! extracted entry, a listing for discovery-only runs, and the final
//! statistics.

mod stats;

pub use stats::{format_statistics, print_statistics};

use crate::catalog::Entry;
use crate::pipeline::EntryOutcome;
use std::io::{self, Write};

/// How much of each successful entry to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Detail-page URL and entry metadata followed by the text
    Full,
    /// Detail-page URL and entry metadata only
    MetadataOnly,
}

/// Writes a successful outcome to `out`
///
/// Failed outcomes are not written; the pipeline driver already logs them.
pub fn write_outcome<W: Write>(
    out: &mut W,
    outcome: &EntryOutcome,
    mode: OutputMode,
) -> io::Result<()> {
    let Ok(text) = &outcome.result else {
        return Ok(());
    };

    writeln!(out, "{}", outcome.entry.detail_page_location())?;
    writeln!(out, "{}", outcome.entry)?;
    if mode == OutputMode::Full {
        writeln!(out)?;
        writeln!(out, "{}", text.trim_end())?;
        writeln!(out)?;
    }
    Ok(())
}

/// Writes a one-line-per-entry listing of discovered entries
pub fn write_entry_list<W: Write>(out: &mut W, entries: &[Entry]) -> io::Result<()> {
    for (position, entry) in entries.iter().enumerate() {
        writeln!(out, "{:>4}. {}", position + 1, entry)?;
        writeln!(out, "      {}", entry.detail_page_location())?;
    }
    Ok(())
}
